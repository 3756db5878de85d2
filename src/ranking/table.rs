//! File-backed ranking source
//!
//! A [`ScoreTable`] holds scores that were computed elsewhere (for example by
//! an analytics job) and answers [`RankingSource`] queries from them. It does
//! no scoring of its own.
//!
//! The on-disk format is JSON:
//!
//! ```json
//! {
//!   "scores":     { "weather-app": 42.5, "todo": 17 },
//!   "badges":     { "weather-app": { "type": "trending", "label": "Hot" } },
//!   "hiddenGems": { "pixel-art": 8.1 }
//! }
//! ```
//!
//! Every section is optional.

use super::error::RankingError;
use super::{Badge, RankedId, RankingSource};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Precomputed popularity data keyed by item identifier
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreTable {
    #[serde(default)]
    scores: HashMap<String, f64>,
    #[serde(default)]
    badges: HashMap<String, Badge>,
    #[serde(default)]
    hidden_gems: HashMap<String, f64>,
}

impl ScoreTable {
    /// Create an empty table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a table from a JSON file
    ///
    /// # Errors
    ///
    /// Returns `RankingError::Io` if the file cannot be read and
    /// `RankingError::Parse` if it is not a valid score table.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RankingError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)?;
        let table = Self::from_json_str(&raw)?;
        tracing::debug!(
            path = %path.display(),
            scores = table.scores.len(),
            badges = table.badges.len(),
            hidden_gems = table.hidden_gems.len(),
            "loaded score table"
        );
        Ok(table)
    }

    /// Parse a table from a JSON string
    ///
    /// # Errors
    ///
    /// Returns `RankingError::Parse` if the JSON is malformed.
    pub fn from_json_str(raw: &str) -> Result<Self, RankingError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Set the popularity score of an item
    #[must_use]
    pub fn with_score(mut self, id: impl Into<String>, score: f64) -> Self {
        self.scores.insert(id.into(), score);
        self
    }

    /// Set the badge of an item
    #[must_use]
    pub fn with_badge(mut self, id: impl Into<String>, badge: Badge) -> Self {
        self.badges.insert(id.into(), badge);
        self
    }

    /// Set the hidden-gem score of an item
    #[must_use]
    pub fn with_hidden_gem(mut self, id: impl Into<String>, score: f64) -> Self {
        self.hidden_gems.insert(id.into(), score);
        self
    }

    /// Whether the table holds no data at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty() && self.badges.is_empty() && self.hidden_gems.is_empty()
    }
}

// Highest score first; equal scores are ordered by identifier so the result
// does not depend on hash map iteration order.
fn top_n(scores: &HashMap<String, f64>, limit: usize) -> Vec<RankedId> {
    let mut ranked: Vec<RankedId> = scores
        .iter()
        .map(|(id, score)| RankedId::new(id.clone(), *score))
        .collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.id.cmp(&b.id)));
    ranked.truncate(limit);
    ranked
}

impl RankingSource for ScoreTable {
    fn score_of(&self, id: &str) -> f64 {
        self.scores.get(id).copied().unwrap_or(0.0)
    }

    fn badge_of(&self, id: &str) -> Option<Badge> {
        self.badges.get(id).cloned()
    }

    fn top_trending(&self, limit: usize) -> Vec<RankedId> {
        top_n(&self.scores, limit)
    }

    fn top_hidden_gems(&self, limit: usize) -> Vec<RankedId> {
        top_n(&self.hidden_gems, limit)
    }
}
