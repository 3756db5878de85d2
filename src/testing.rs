//! Testing utilities for projscope
//!
//! Fixtures shared by the unit tests: a small sample catalog and a
//! [`FixedRanking`] source whose answers are set up by the test.
//!
//! Only available when compiled with `cfg(test)`.

use crate::item::{Item, parse_date};
use crate::ranking::{Badge, RankedId, RankingSource};
use std::collections::HashMap;

/// Ranking source with canned answers
///
/// Scores and badges are looked up by identifier. The trending and hidden-gem
/// lists are returned as configured (truncated to the requested limit), so
/// tests can include identifiers that match no catalog item.
#[derive(Debug, Default, Clone)]
pub struct FixedRanking {
    scores: HashMap<String, f64>,
    badges: HashMap<String, Badge>,
    trending: Vec<RankedId>,
    gems: Vec<RankedId>,
}

impl FixedRanking {
    /// Create a source that knows nothing
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a popularity score
    #[must_use]
    pub fn with_score(mut self, id: &str, score: f64) -> Self {
        self.scores.insert(id.to_string(), score);
        self
    }

    /// Set a badge label
    #[must_use]
    pub fn with_badge(mut self, id: &str, label: &str) -> Self {
        self.badges.insert(id.to_string(), Badge::new(label));
        self
    }

    /// Append an entry to the trending list
    #[must_use]
    pub fn with_trending(mut self, id: &str, score: f64) -> Self {
        self.trending.push(RankedId::new(id, score));
        self
    }

    /// Append an entry to the hidden-gems list
    #[must_use]
    pub fn with_gem(mut self, id: &str, score: f64) -> Self {
        self.gems.push(RankedId::new(id, score));
        self
    }
}

impl RankingSource for FixedRanking {
    fn score_of(&self, id: &str) -> f64 {
        self.scores.get(id).copied().unwrap_or(0.0)
    }

    fn badge_of(&self, id: &str) -> Option<Badge> {
        self.badges.get(id).cloned()
    }

    fn top_trending(&self, limit: usize) -> Vec<RankedId> {
        self.trending.iter().take(limit).cloned().collect()
    }

    fn top_hidden_gems(&self, limit: usize) -> Vec<RankedId> {
        self.gems.iter().take(limit).cloned().collect()
    }
}

/// Build an item with the fields most tests care about
///
/// # Panics
/// Panics if `date` is given but is not a valid `YYYY-MM-DD` date.
#[must_use]
pub fn item(title: &str, category: Option<&str>, rating: Option<f64>, date: Option<&str>) -> Item {
    let mut item = Item::new(title);
    item.category = category.map(str::to_string);
    item.rating = rating;
    item.date_added = date.map(|d| parse_date(d).expect("invalid fixture date"));
    item
}

/// A twelve-item catalog spread over three categories
///
/// Two items have no category, two have no rating and one has no date.
#[must_use]
pub fn sample_catalog() -> Vec<Item> {
    vec![
        item("Calculator", Some("Tools"), Some(4.0), Some("2023-02-10")).with_folder("calculator"),
        item("Snake Game", Some("Games"), Some(4.5), Some("2023-05-01")).with_folder("snake"),
        item("Weather App", Some("Tools"), Some(3.5), Some("2024-01-15")).with_folder("weather"),
        item("Tic Tac Toe", Some("Games"), Some(3.0), Some("2022-11-20")).with_name("tictactoe"),
        item("Periodic Table", Some("Science"), Some(5.0), Some("2024-03-02")),
        item("Pomodoro Timer", Some("Tools"), None, Some("2023-08-08")).with_folder("pomodoro"),
        item("Memory Cards", Some("Games"), Some(2.5), Some("2023-09-30")).with_folder("memory"),
        item("Solar System", Some("Science"), Some(4.2), None).with_folder("solar"),
        item("Color Picker", None, Some(3.8), Some("2024-02-11")).with_folder("color-picker"),
        item("Quote Machine", None, None, Some("2022-06-06")).with_folder("quotes"),
        item("Typing Test", Some("Games"), Some(4.1), Some("2024-04-20")).with_folder("typing"),
        item("Unit Converter", Some("Tools"), Some(3.2), Some("2023-12-12")).with_folder("units"),
    ]
}
