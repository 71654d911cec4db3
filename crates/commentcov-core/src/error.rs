use crate::go::ParseError;
use std::path::PathBuf;

/// Errors from measuring comment coverage
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A file is not valid Go; no items are produced for it
    #[error("{file}:{error}")]
    Parse { file: String, error: ParseError },

    /// A source file could not be read
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Walking a directory for Go files failed
    #[cfg(feature = "walk")]
    #[error("failed to walk {}", root.display())]
    Walk {
        root: PathBuf,
        source: ignore::Error,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
