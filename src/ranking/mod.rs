//! Ranking source abstraction
//!
//! Popularity scores, badges and the discovery lists (trending, hidden gems)
//! are owned by an external analytics component. The engine only talks to it
//! through the [`RankingSource`] trait and never stores or recomputes scores.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────┐        identifier         ┌──────────────────┐
//! │  VisibilityEngine        │ ────────────────────────▶ │  RankingSource   │
//! │  - trending sort         │                           │  - score_of      │
//! │  - items_with_badges     │ ◀──────────────────────── │  - badge_of      │
//! │  - trending / gems       │    score, badge, top-N    │  - top_trending  │
//! └──────────────────────────┘                           │  - top_hidden_.. │
//!                                                        └──────────────────┘
//! ```
//!
//! The engine holds the source as `Option<Box<dyn RankingSource>>`; `None`
//! is the explicit "not attached" state and every ranking-dependent feature
//! degrades to an empty or `None` result.

pub mod error;
pub mod table;

pub use error::RankingError;
pub use table::ScoreTable;

use serde::{Deserialize, Serialize};

/// Display badge attached to an item by the ranking source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    /// Badge category, e.g. `trending` or `new`
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Text shown to the user
    pub label: String,
}

impl Badge {
    /// Create a badge with a label only
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            kind: None,
            label: label.into(),
        }
    }

    /// Set the badge kind
    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }
}

/// An item identifier with the score the ranking source gave it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedId {
    /// Item identifier (see [`crate::item::Item::identifier`])
    pub id: String,
    /// Score assigned by the ranking source
    pub score: f64,
}

impl RankedId {
    /// Create a ranked identifier
    #[must_use]
    pub fn new(id: impl Into<String>, score: f64) -> Self {
        Self {
            id: id.into(),
            score,
        }
    }
}

/// Source of popularity data for catalog items
///
/// Implementations must be synchronous, side-effect-free lookups. How scores
/// are computed is entirely up to the implementation.
pub trait RankingSource {
    /// Popularity score for one item; unknown identifiers should score 0
    fn score_of(&self, id: &str) -> f64;

    /// Display badge for one item, if it has one
    fn badge_of(&self, id: &str) -> Option<Badge>;

    /// Up to `limit` identifiers ranked as trending, best first
    fn top_trending(&self, limit: usize) -> Vec<RankedId>;

    /// Up to `limit` identifiers ranked as hidden gems, best first
    fn top_hidden_gems(&self, limit: usize) -> Vec<RankedId>;
}
