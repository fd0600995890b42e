use std::path::PathBuf;

use thiserror::Error;

use crate::archive::ArchiveError;

/// Failure while reading a candidate location.
///
/// These never reach callers of the public lookup functions: they are
/// logged and the candidate is treated as absent.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File {path} is not valid UTF-8")]
    InvalidUtf8 { path: PathBuf },

    #[error("Failed to read archive {path}: {source}")]
    Archive {
        path: PathBuf,
        #[source]
        source: ArchiveError,
    },

    #[error("Entry {entry} in archive {path} is not valid UTF-8")]
    EntryNotUtf8 { path: PathBuf, entry: String },
}

pub type Result<T> = std::result::Result<T, LoadError>;
