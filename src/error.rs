//! Error types for the cratos library
//!
//! Discovery never fails on an unreadable directory (it logs and moves on), so
//! the variants here cover root resolution and per-module aggregation only.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for all library operations
#[derive(Error, Debug)]
pub enum CratosError {
    /// No `--path` flag, `CRATOS_PATH` or `HOME` to search from
    #[error("no entrypoint found; CRATOS_PATH or HOME environment variables required")]
    RootResolution,

    /// Package manifest missing or unparsable
    #[error("invalid manifest {path}: {reason}")]
    Manifest { path: PathBuf, reason: String },

    /// The version-control client reported a failure; `message` is its stderr
    #[error("{message}")]
    Vcs { path: PathBuf, message: String },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, CratosError>;

impl CratosError {
    /// Create a new manifest error
    pub fn manifest(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Manifest {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a new version-control error
    pub fn vcs(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Vcs {
            path: path.into(),
            message: message.into(),
        }
    }
}
