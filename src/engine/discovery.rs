//! Ranking-backed views: badges and the global discovery lists
//!
//! Badges decorate the current visible set. Trending and hidden gems are
//! global: they ignore search, category and page and always work over the
//! whole collection.

use super::VisibilityEngine;
use crate::item::Item;
use crate::ranking::{Badge, RankedId};
use serde::{Serialize, Serializer, ser};
use serde_json::Value;

/// Number of trending items returned when the caller does not say
pub const DEFAULT_TRENDING_LIMIT: usize = 10;

/// Number of hidden gems returned when the caller does not say
pub const DEFAULT_HIDDEN_GEMS_LIMIT: usize = 5;

/// A visible item with the badge the ranking source gave it
///
/// Serializes as the item's fields plus `badge` (`null` when absent), which
/// replaces any `badge` field the catalog record carried.
#[derive(Debug, Clone, PartialEq)]
pub struct BadgedItem<'a> {
    /// The catalog item
    pub item: &'a Item,
    /// Badge, `None` when the item has none or no source is attached
    pub badge: Option<Badge>,
}

/// A catalog item resolved from a ranked identifier
///
/// Serializes as the item's fields plus `score`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredItem<'a> {
    /// The catalog item
    pub item: &'a Item,
    /// Score reported by the ranking source
    pub score: f64,
}

impl Serialize for BadgedItem<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let badge =
            serde_json::to_value(&self.badge).map_err(<S::Error as ser::Error>::custom)?;
        self.item
            .to_json_object([("badge", badge)])
            .map_err(<S::Error as ser::Error>::custom)?
            .serialize(serializer)
    }
}

impl Serialize for ScoredItem<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.item
            .to_json_object([("score", Value::from(self.score))])
            .map_err(<S::Error as ser::Error>::custom)?
            .serialize(serializer)
    }
}

impl VisibilityEngine {
    /// Visible items (filtered and sorted, not paginated) with their badges
    ///
    /// Without a ranking source every badge is `None`.
    #[must_use]
    pub fn items_with_badges(&self) -> Vec<BadgedItem<'_>> {
        self.attach_badges(self.visible_items())
    }

    /// Items on the current page with their badges
    ///
    /// Same slice as [`VisibilityEngine::paginated_items`].
    #[must_use]
    pub fn paginated_items_with_badges(&self) -> Vec<BadgedItem<'_>> {
        self.attach_badges(self.paginated_items())
    }

    fn attach_badges<'a>(&'a self, items: Vec<&'a Item>) -> Vec<BadgedItem<'a>> {
        let ranking = self.ranking();
        items
            .into_iter()
            .map(|item| BadgedItem {
                item,
                badge: ranking.and_then(|r| r.badge_of(item.identifier())),
            })
            .collect()
    }

    /// Top `limit` trending items across the whole collection
    ///
    /// Empty without a ranking source.
    #[must_use]
    pub fn trending_items(&self, limit: usize) -> Vec<ScoredItem<'_>> {
        let Some(ranking) = self.ranking() else {
            tracing::debug!("trending requested without a ranking source");
            return Vec::new();
        };
        self.resolve_ranked(ranking.top_trending(limit))
    }

    /// Top `limit` hidden gems across the whole collection
    ///
    /// Empty without a ranking source.
    #[must_use]
    pub fn hidden_gems(&self, limit: usize) -> Vec<ScoredItem<'_>> {
        let Some(ranking) = self.ranking() else {
            tracing::debug!("hidden gems requested without a ranking source");
            return Vec::new();
        };
        self.resolve_ranked(ranking.top_hidden_gems(limit))
    }

    // Identifiers that match no item are dropped; duplicates resolve to the
    // first item with that identifier.
    fn resolve_ranked(&self, ranked: Vec<RankedId>) -> Vec<ScoredItem<'_>> {
        ranked
            .into_iter()
            .filter_map(|entry| {
                let found = self.items.iter().find(|item| item.identifier() == entry.id);
                if found.is_none() {
                    tracing::debug!(id = %entry.id, "ranked identifier has no matching item");
                }
                found.map(|item| ScoredItem {
                    item,
                    score: entry.score,
                })
            })
            .collect()
    }
}
