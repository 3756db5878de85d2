//! Error types for loading ranking data

use std::io;
use thiserror::Error;

/// Errors that can occur while loading a score table
#[derive(Debug, Error)]
pub enum RankingError {
    /// Score file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Score file is not valid JSON or has the wrong shape
    #[error("Invalid score table: {0}")]
    Parse(#[from] serde_json::Error),
}
