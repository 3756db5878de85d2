//! Engine construction errors

use thiserror::Error;

/// Errors raised while building a [`super::VisibilityEngine`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Page size must be at least 1
    #[error("Invalid page size {0}: items per page must be at least 1")]
    InvalidItemsPerPage(usize),
}
