//! Query-specific error types
//!
//! The query layer is almost entirely total: unknown categories match nothing
//! and out-of-range pages produce empty slices. The only rejected input is a
//! sort token that does not name a known sort strategy.

use thiserror::Error;

/// Errors raised while interpreting query input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Sort token does not name a known sort mode
    #[error(
        "Unknown sort mode '{0}': expected one of default, az, za, newest, trending, rating-high, rating-low"
    )]
    UnknownSortMode(String),
}
