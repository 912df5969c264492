use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Split zipped campaign exports into client, campaign, and economics tables",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Read every .zip archive in a directory and write client.csv, campaign.csv, economics.csv
    Split(SplitArgs),
}

#[derive(Debug, Clone, Args)]
pub struct SplitArgs {
    /// Directory holding the zipped campaign exports
    #[arg(short = 'i', long = "input", default_value = "files/input")]
    pub input: PathBuf,
    /// Directory receiving the three output tables (created if missing)
    #[arg(short = 'o', long = "output", default_value = "files/output")]
    pub output: PathBuf,
    /// CSV delimiter of the archived files (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the archived files (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// Which occurrence of a repeated client_id survives deduplication
    #[arg(long = "dedupe", default_value = "first")]
    pub dedupe: DedupeStrategy,
    /// Worker threads used to read archives (defaults to all cores)
    #[arg(short = 'j', long = "jobs")]
    pub jobs: Option<usize>,
    /// Print a per-archive summary table after writing the outputs
    #[arg(long = "summary")]
    pub summary: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
#[value(rename_all = "kebab-case")]
pub enum DedupeStrategy {
    /// Keep the record from the earliest archive and row
    #[default]
    First,
    /// Keep the record from the latest archive and row
    Last,
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}
