//! Destinations for the finished tables.

use std::{
    collections::BTreeMap,
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use log::info;

use crate::{aggregate::SplitTables, io_utils, records::OutputTable};

pub trait TableSink {
    /// Writes `rows` as the table named by `T::FILE_NAME`, header row first.
    fn write_table<T: OutputTable>(&mut self, rows: &[T]) -> Result<()>;
}

fn write_rows<W: Write, T: OutputTable>(writer: &mut csv::Writer<W>, rows: &[T]) -> Result<()> {
    writer
        .write_record(T::HEADERS)
        .with_context(|| format!("Writing {} header", T::FILE_NAME))?;
    for (idx, row) in rows.iter().enumerate() {
        writer
            .serialize(row)
            .with_context(|| format!("Writing row {} of {}", idx + 1, T::FILE_NAME))?;
    }
    writer
        .flush()
        .with_context(|| format!("Flushing {}", T::FILE_NAME))?;
    Ok(())
}

/// Writes each table as a file under one directory, creating it on demand.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn create(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir).with_context(|| format!("Creating output directory {dir:?}"))?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    pub fn path_for(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }
}

impl TableSink for DirectorySink {
    fn write_table<T: OutputTable>(&mut self, rows: &[T]) -> Result<()> {
        let path = self.path_for(T::FILE_NAME);
        let mut writer = io_utils::open_csv_writer(&path)?;
        write_rows(&mut writer, rows)?;
        info!("Wrote {} row(s) to {:?}", rows.len(), path);
        Ok(())
    }
}

/// Keeps rendered tables in memory, keyed by file name.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub tables: BTreeMap<String, String>,
}

impl MemorySink {
    pub fn get(&self, file_name: &str) -> Option<&str> {
        self.tables.get(file_name).map(String::as_str)
    }
}

impl TableSink for MemorySink {
    fn write_table<T: OutputTable>(&mut self, rows: &[T]) -> Result<()> {
        let mut writer = io_utils::output_writer_builder().from_writer(Vec::new());
        write_rows(&mut writer, rows)?;
        let bytes = writer
            .into_inner()
            .map_err(|err| anyhow::anyhow!("Finishing {}: {}", T::FILE_NAME, err.error()))?;
        let text = String::from_utf8(bytes)
            .with_context(|| format!("Rendering {} as UTF-8", T::FILE_NAME))?;
        self.tables.insert(T::FILE_NAME.to_string(), text);
        Ok(())
    }
}

impl SplitTables {
    pub fn write_to<S: TableSink>(&self, sink: &mut S) -> Result<()> {
        sink.write_table(&self.clients)?;
        sink.write_table(&self.campaigns)?;
        sink.write_table(&self.economics)?;
        Ok(())
    }
}
