//! Parsing of one decompressed campaign export into an in-memory table.

use std::io::Read;

use encoding_rs::Encoding;
use log::{debug, info};

use crate::{columns::ColumnMap, error::SplitError, io_utils};

/// One parsed source file. Header names are kept verbatim; `columns` carries
/// the alias resolution used by the transformer.
#[derive(Debug, Clone)]
pub struct SourceTable {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub columns: ColumnMap,
    /// Rows dropped for carrying more fields than the header.
    pub overlong_rows: usize,
}

impl SourceTable {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Reads a whole CSV stream. Short rows are kept and their missing trailing
/// fields read as empty; rows longer than the header are dropped and counted.
/// Tokenization or decoding failures reject the source as a unit so that no
/// partial rows escape.
pub fn read_source<R>(
    name: &str,
    reader: R,
    delimiter: u8,
    encoding: &'static Encoding,
) -> Result<SourceTable, SplitError>
where
    R: Read,
{
    let mut reader = io_utils::open_csv_reader(reader, delimiter);
    let headers = io_utils::reader_headers(&mut reader, encoding)
        .map_err(|err| SplitError::malformed(name, format!("unreadable header row: {err}")))?;
    if headers.iter().all(|header| header.is_empty()) {
        return Err(SplitError::malformed(name, "no columns"));
    }

    let mut rows = Vec::new();
    let mut overlong_rows = 0usize;
    for (row_idx, record) in reader.byte_records().enumerate() {
        let record = record
            .map_err(|err| SplitError::malformed(name, format!("row {}: {err}", row_idx + 2)))?;
        if record.len() > headers.len() {
            debug!(
                "'{}' row {} has {} field(s) for {} column(s); dropping it",
                name,
                row_idx + 2,
                record.len(),
                headers.len()
            );
            overlong_rows += 1;
            continue;
        }
        let decoded = io_utils::decode_record(&record, encoding).ok_or_else(|| {
            SplitError::malformed(
                name,
                format!("row {} is not valid {}", row_idx + 2, encoding.name()),
            )
        })?;
        rows.push(decoded);
    }
    debug!(
        "Read {} row(s) across {} column(s) from '{}'",
        rows.len(),
        headers.len(),
        name
    );

    if overlong_rows > 0 {
        info!(
            "Dropped {} row(s) with more fields than the header from '{}'",
            overlong_rows, name
        );
    }

    let columns = ColumnMap::resolve(&headers);
    Ok(SourceTable {
        name: name.to_string(),
        headers,
        rows,
        columns,
        overlong_rows,
    })
}
