//! Sort strategies for the visible item list
//!
//! Every strategy is a stable sort, so items that compare equal keep the
//! order they had after filtering (which is catalog order). All comparators
//! are total: floats are compared with [`f64::total_cmp`]. Titles are compared
//! with accents folded and case ignored, then case-sensitively, then
//! byte-wise.

use super::error::QueryError;
use crate::item::Item;
use crate::ranking::RankingSource;
use serde::{Deserialize, Serialize};
use std::cmp::{Ordering, Reverse};
use std::fmt;
use std::str::FromStr;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Sort strategy applied after filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortMode {
    /// Keep catalog order
    #[default]
    #[serde(rename = "default")]
    Default,
    /// Title, A to Z
    #[serde(rename = "az")]
    AlphabeticalAsc,
    /// Title, Z to A
    #[serde(rename = "za")]
    AlphabeticalDesc,
    /// Most recently added first; undated items last
    #[serde(rename = "newest")]
    NewestFirst,
    /// Highest popularity score first (needs a ranking source)
    #[serde(rename = "trending")]
    Trending,
    /// Highest rating first
    #[serde(rename = "rating-high")]
    RatingDesc,
    /// Lowest rating first
    #[serde(rename = "rating-low")]
    RatingAsc,
}

impl SortMode {
    /// Every sort mode, in menu order
    pub const ALL: [Self; 7] = [
        Self::Default,
        Self::AlphabeticalAsc,
        Self::AlphabeticalDesc,
        Self::NewestFirst,
        Self::Trending,
        Self::RatingDesc,
        Self::RatingAsc,
    ];

    /// Wire token used in URLs and on the command line
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::AlphabeticalAsc => "az",
            Self::AlphabeticalDesc => "za",
            Self::NewestFirst => "newest",
            Self::Trending => "trending",
            Self::RatingDesc => "rating-high",
            Self::RatingAsc => "rating-low",
        }
    }

    /// Whether this mode consults the ranking source
    #[must_use]
    pub const fn needs_ranking(self) -> bool {
        matches!(self, Self::Trending)
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "default" => Ok(Self::Default),
            "az" | "a-z" | "alphabetical-ascending" => Ok(Self::AlphabeticalAsc),
            "za" | "z-a" | "alphabetical-descending" => Ok(Self::AlphabeticalDesc),
            "newest" | "newest-first" => Ok(Self::NewestFirst),
            "trending" => Ok(Self::Trending),
            "rating-high" | "rating-descending" => Ok(Self::RatingDesc),
            "rating-low" | "rating-ascending" => Ok(Self::RatingAsc),
            _ => Err(QueryError::UnknownSortMode(s.to_string())),
        }
    }
}

// Primary key: NFD with combining marks dropped, lower-cased ("Éclair" ->
// "eclair"). The lower-cased and raw titles break ties.
fn title_key(title: &str) -> (String, String, String) {
    let folded = title
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect();
    (folded, title.to_lowercase(), title.to_string())
}

/// Title order ignoring accents and case, with a byte-wise tie-break
///
/// ```
/// use projscope::query::sort::compare_titles;
/// use std::cmp::Ordering;
///
/// assert_eq!(compare_titles("Éclair", "Zebra"), Ordering::Less);
/// assert_eq!(compare_titles("apple", "Éclair"), Ordering::Less);
/// ```
#[must_use]
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    title_key(a).cmp(&title_key(b))
}

/// Sort filtered items in place according to `mode`
///
/// `Trending` is a no-op when `ranking` is `None`. Scores are looked up once
/// per item so the comparison stays consistent even if the source were to
/// answer differently on a second call.
pub fn sort_items(items: &mut [&Item], mode: SortMode, ranking: Option<&dyn RankingSource>) {
    match mode {
        SortMode::Default => {}
        SortMode::AlphabeticalAsc => {
            items.sort_by_cached_key(|item| title_key(&item.title));
        }
        SortMode::AlphabeticalDesc => {
            items.sort_by_cached_key(|item| Reverse(title_key(&item.title)));
        }
        SortMode::NewestFirst => {
            // None < Some, so undated items end up last
            items.sort_by_key(|item| Reverse(item.date_added));
        }
        SortMode::Trending => {
            if let Some(ranking) = ranking {
                let mut scored: Vec<(f64, &Item)> = items
                    .iter()
                    .map(|item| (ranking.score_of(item.identifier()), *item))
                    .collect();
                scored.sort_by(|a, b| b.0.total_cmp(&a.0));
                for (slot, (_, item)) in items.iter_mut().zip(scored) {
                    *slot = item;
                }
            }
        }
        SortMode::RatingDesc => {
            items.sort_by(|a, b| b.rating_or_zero().total_cmp(&a.rating_or_zero()));
        }
        SortMode::RatingAsc => {
            items.sort_by(|a, b| a.rating_or_zero().total_cmp(&b.rating_or_zero()));
        }
    }
}
