//! Error types for listing operations.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T, E = FilistError> = std::result::Result<T, E>;

/// Errors that abort a listing run.
///
/// There is no partial-success mode: the first error stops the current root
/// and every root after it.
#[derive(Debug, Error)]
pub enum FilistError {
    /// A root argument could not be made absolute.
    #[error("cannot resolve {path}: {source}")]
    ResolveRoot {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Listing or stat failure while walking the tree.
    #[error(transparent)]
    Walk(#[from] walkdir::Error),

    /// A column value could not be computed (hashing an unreadable file).
    #[error("cannot read {path}: {source}")]
    Column {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing to the output stream failed.
    #[error("write error: {0}")]
    Output(#[from] io::Error),
}

impl FilistError {
    /// Attach an entry path to a column failure.
    pub fn column(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Column {
            path: path.into(),
            source,
        }
    }
}
