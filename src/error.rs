//! Error types for loading business cases and writing exports
//!
//! The projection engine itself is total and never returns these.

use std::path::PathBuf;
use thiserror::Error;

use crate::params::MAX_HORIZON_YEARS;

/// Errors raised while reading inputs or writing outputs
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Market tables are keyed by 1-based year
    #[error("market table year must be between 1 and {max}, got {0}", max = MAX_HORIZON_YEARS)]
    InvalidYear(u32),

    #[error("horizon of {0} years exceeds the maximum of {max}", max = MAX_HORIZON_YEARS)]
    HorizonTooLong(u32),

    #[error("duplicate scenario id '{0}'")]
    DuplicateScenario(String),

    #[error("unknown scenario id '{0}'")]
    UnknownScenario(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
