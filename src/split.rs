//! Run orchestration: discover archives, read and transform them, fold the
//! results in archive order, and hand the finished tables to a sink.

use std::{
    io::Read,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use encoding_rs::{Encoding, UTF_8};
use log::info;
use rayon::prelude::*;

use crate::{
    aggregate::{Aggregator, SplitTables},
    archive,
    cli::{DedupeStrategy, SplitArgs},
    error::SplitError,
    io_utils,
    report::{self, RunReport},
    sink::{DirectorySink, TableSink},
    source::read_source,
    transform::{TransformedSource, transform},
};

#[derive(Debug, Clone, Copy)]
pub struct SplitOptions {
    pub delimiter: u8,
    pub encoding: &'static Encoding,
    pub dedupe: DedupeStrategy,
    /// Reader threads; `None` uses the global rayon pool.
    pub jobs: Option<usize>,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            delimiter: io_utils::DEFAULT_CSV_DELIMITER,
            encoding: UTF_8,
            dedupe: DedupeStrategy::default(),
            jobs: None,
        }
    }
}

pub fn execute(args: &SplitArgs) -> Result<()> {
    let options = SplitOptions {
        delimiter: args.delimiter.unwrap_or(io_utils::DEFAULT_CSV_DELIMITER),
        encoding: io_utils::resolve_encoding(args.input_encoding.as_deref())?,
        dedupe: args.dedupe,
        jobs: args.jobs.filter(|jobs| *jobs > 0),
    };
    info!(
        "Splitting archives in {:?} -> {:?} (delimiter '{}', keep {:?} duplicate)",
        args.input,
        args.output,
        crate::printable_delimiter(options.delimiter),
        options.dedupe
    );

    let (tables, report) = split_archives(&args.input, &options)?;
    let mut sink = DirectorySink::create(&args.output)?;
    tables
        .write_to(&mut sink)
        .with_context(|| format!("Writing tables to {:?}", args.output))?;

    let skipped = report.skipped().count();
    info!(
        "Split {} archive(s) ({} skipped) into {} client, {} campaign, {} economics row(s)",
        report.sources.len(),
        skipped,
        report.client_rows,
        report.campaign_rows,
        report.economics_rows
    );
    if args.summary {
        print!("{}", report::render_summary(&report));
    }
    Ok(())
}

/// Splits every archive in `input`. Fails only when the directory cannot be
/// listed or no archive yields a usable source.
pub fn split_archives(input: &Path, options: &SplitOptions) -> Result<(SplitTables, RunReport)> {
    let archives = archive::discover_archives(input)?;
    let load = |path: &PathBuf| {
        let result = archive::read_archive(path, options.delimiter, options.encoding)
            .and_then(|table| transform(&table));
        (archive::source_name(path), result)
    };

    let results: Vec<(String, Result<TransformedSource, SplitError>)> = match options.jobs {
        Some(1) => archives.iter().map(load).collect(),
        Some(jobs) => rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build()
            .context("Building reader thread pool")?
            .install(|| archives.par_iter().map(load).collect()),
        None => archives.par_iter().map(load).collect(),
    };

    fold(input, results, options.dedupe).map_err(Into::into)
}

/// Splits already-decompressed streams in the order given.
pub fn split_streams<I, R>(
    sources: I,
    options: &SplitOptions,
) -> Result<(SplitTables, RunReport), SplitError>
where
    I: IntoIterator<Item = (String, R)>,
    R: Read,
{
    let results = sources.into_iter().map(|(name, reader)| {
        let result = read_source(&name, reader, options.delimiter, options.encoding)
            .and_then(|table| transform(&table));
        (name, result)
    });
    fold(Path::new("<streams>"), results, options.dedupe)
}

/// Writes the outcome of [`split_streams`] into `sink`.
pub fn split_streams_into<I, R, S>(
    sources: I,
    options: &SplitOptions,
    sink: &mut S,
) -> Result<RunReport>
where
    I: IntoIterator<Item = (String, R)>,
    R: Read,
    S: TableSink,
{
    let (tables, report) = split_streams(sources, options)?;
    tables.write_to(sink)?;
    Ok(report)
}

fn fold<I>(
    input: &Path,
    results: I,
    dedupe: DedupeStrategy,
) -> Result<(SplitTables, RunReport), SplitError>
where
    I: IntoIterator<Item = (String, Result<TransformedSource, SplitError>)>,
{
    let mut aggregator = Aggregator::new();
    for (name, result) in results {
        aggregator.absorb(&name, result);
    }
    if aggregator.loaded_sources() == 0 {
        return Err(SplitError::NoReadableSources {
            input: input.to_path_buf(),
        });
    }
    Ok(aggregator.finish(dedupe))
}
