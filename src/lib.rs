//! Projscope - a visibility engine for project catalogs
//!
//! This library decides which items of a catalog are visible, and in which
//! order, under a search query, category facets, a sort mode and pagination.
//! Popularity data comes from an optional, external [`ranking::RankingSource`].
//!
//! ```
//! use projscope::engine::VisibilityEngine;
//! use projscope::item::Item;
//! use projscope::query::url;
//!
//! let mut engine = VisibilityEngine::new(vec![
//!     Item::new("Clock").with_category("Tools"),
//!     Item::new("Chess").with_category("Games"),
//! ]);
//! engine.toggle_category("games");
//!
//! assert_eq!(engine.visible_items().len(), 1);
//! assert_eq!(url::encode(engine.state()), "category=games");
//! ```

use thiserror::Error;

pub mod catalog;
pub mod cli;
pub mod config;
pub mod engine;
pub mod item;
pub mod output;
pub mod query;
pub mod ranking;

#[cfg(test)]
pub mod testing;

pub use engine::VisibilityEngine;
pub use item::Item;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum ProjscopeError {
    /// Catalog could not be loaded
    #[error("Catalog error: {0}")]
    CatalogError(#[from] catalog::CatalogError),
    /// Score table could not be loaded
    #[error("Ranking error: {0}")]
    RankingError(#[from] ranking::RankingError),
    /// Engine could not be built
    #[error("Engine error: {0}")]
    EngineError(#[from] engine::EngineError),
    /// Query input was rejected
    #[error("Query error: {0}")]
    QueryError(#[from] query::QueryError),
    /// Output could not be rendered
    #[error("Output error: {0}")]
    OutputError(#[from] output::OutputError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
