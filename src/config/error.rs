//! Config loading errors.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Which step of a config load failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadErrorKind {
    ReadFailure,
    ParseFailure,
}

/// Fatal error while loading a config file. There is no fallback config.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("error reading config file: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error parsing config file: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

impl LoadError {
    pub fn kind(&self) -> LoadErrorKind {
        match self {
            LoadError::Read { .. } => LoadErrorKind::ReadFailure,
            LoadError::Parse { .. } => LoadErrorKind::ParseFailure,
        }
    }

    /// The config file the failed load was attempted on.
    pub fn path(&self) -> &Path {
        match self {
            LoadError::Read { path, .. } | LoadError::Parse { path, .. } => path,
        }
    }
}
