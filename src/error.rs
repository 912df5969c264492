//! Failure taxonomy for reading, cleaning, and aggregating campaign sources.
//!
//! Only [`SplitError::NoReadableSources`] and I/O failures on the output side
//! abort a run. Everything else is recovered at the row, facet, or source
//! level by the caller.

use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SplitError {
    #[error("source '{source_name}' is malformed: {reason}")]
    MalformedSource { source_name: String, reason: String },
    #[error("cannot build a contact date from month '{month}' and day '{day}'")]
    InvalidDate { month: String, day: String },
    #[error("source '{source_name}' is missing required column '{column}'")]
    MissingRequiredColumn {
        source_name: String,
        column: &'static str,
    },
    #[error("no readable source archives found in {input:?}")]
    NoReadableSources { input: PathBuf },
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Zip(#[from] zip::result::ZipError),
}

impl SplitError {
    pub fn malformed(source_name: &str, reason: impl Into<String>) -> Self {
        SplitError::MalformedSource {
            source_name: source_name.to_string(),
            reason: reason.into(),
        }
    }
}
