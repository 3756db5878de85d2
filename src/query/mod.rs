//! Query state, filtering, sorting and URL encoding
//!
//! The pieces here are pure and independent of the engine:
//!
//! - [`state`]: the mutable [`QueryState`] record and its invariants
//! - [`filter`]: the search + category predicate
//! - [`sort`]: the [`SortMode`] strategies
//! - [`url`]: the query-string codec used to persist state in links

pub mod error;
pub mod filter;
pub mod sort;
pub mod state;
pub mod url;

pub use error::QueryError;
pub use filter::FilterByQuery;
pub use sort::SortMode;
pub use state::{CategorySelection, CategorySet, QueryState};
