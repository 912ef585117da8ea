//! Error types for dataset loading

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while assembling the raw dataset snapshot.
///
/// Malformed cell values never surface here: unparsable timestamps and
/// unresolvable lookups degrade to nulls inside the pipeline. These errors
/// cover structural problems only, such as a dataset file or column that is
/// absent altogether.
#[derive(Error, Debug)]
pub enum Error {
    #[error("data directory not found: {0}")]
    DataDirNotFound(PathBuf),

    #[error("required dataset missing from data directory: {0}")]
    MissingDataset(&'static str),

    #[error("failed to read {file}: {source}")]
    Csv {
        file: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for dataset operations
pub type Result<T> = std::result::Result<T, Error>;
