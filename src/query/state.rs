//! Mutable query state
//!
//! [`QueryState`] is the only mutable record in the engine. Its fields are
//! private so the invariants always hold:
//!
//! - the search query is lower-case
//! - the category selection is either "all" or a non-empty set of lower-case
//!   tokens (see [`CategorySelection`])
//! - every mutator that changes filter criteria resets the page to 1, since
//!   the old page number may not exist under the new filter
//!
//! ```
//! use projscope::query::{QueryState, SortMode};
//!
//! let mut state = QueryState::new();
//! state.set_page(4);
//! state.set_search_query("Clock");
//!
//! assert_eq!(state.search_query(), "clock");
//! assert_eq!(state.page(), 1);
//! assert_eq!(state.sort_mode(), SortMode::Default);
//! ```

use super::sort::SortMode;
use std::collections::BTreeSet;
use std::fmt;

/// Non-empty set of lower-case category tokens
///
/// Only [`CategorySelection::from_tokens`] and [`CategorySelection::toggle`]
/// build one, so the set is never empty, never holds `"all"` or an empty
/// token, and every token is lower-case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySet(BTreeSet<String>);

impl CategorySet {
    /// Tokens in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Number of selected tokens (at least 1)
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no token is selected (never true)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the lower-case token is selected
    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        self.0.contains(token)
    }
}

/// Category facet selection
///
/// `All` is the sentinel selection (written as `"all"` on the wire) and means
/// no category filter. `Only` holds a [`CategorySet`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategorySelection {
    /// No category filter
    #[default]
    All,
    /// Items must belong to one of these categories
    Only(CategorySet),
}

// Lower-cases a raw token; empty tokens are dropped.
fn normalize_token(raw: &str) -> Option<String> {
    let token = raw.to_lowercase();
    (!token.is_empty()).then_some(token)
}

impl CategorySelection {
    /// Wire token for the "no filter" selection
    pub const ALL_TOKEN: &'static str = "all";

    /// Build a selection from raw tokens
    ///
    /// Tokens are lower-cased and empty tokens are ignored. Any `"all"` token
    /// or an input without usable tokens yields [`CategorySelection::All`].
    #[must_use]
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = BTreeSet::new();
        for token in tokens.into_iter().filter_map(|t| normalize_token(t.as_ref())) {
            if token == Self::ALL_TOKEN {
                return Self::All;
            }
            set.insert(token);
        }

        if set.is_empty() { Self::All } else { Self::Only(CategorySet(set)) }
    }

    /// Toggle a category token
    ///
    /// `"all"` clears the selection and empty tokens are ignored. Any other
    /// token is removed if present and added otherwise; removing the last
    /// token falls back to `All`.
    pub fn toggle(&mut self, token: &str) {
        let Some(token) = normalize_token(token) else {
            return;
        };
        if token == Self::ALL_TOKEN {
            *self = Self::All;
            return;
        }

        match self {
            Self::All => {
                *self = Self::Only(CategorySet(BTreeSet::from([token])));
            }
            Self::Only(CategorySet(set)) => {
                if !set.remove(&token) {
                    set.insert(token);
                }
                if set.is_empty() {
                    *self = Self::All;
                }
            }
        }
    }

    /// Whether this is the "no filter" selection
    #[must_use]
    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// Whether the token is part of the selection
    ///
    /// `"all"` is reported as a member of the `All` selection only.
    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        match self {
            Self::All => token == Self::ALL_TOKEN,
            Self::Only(set) => set.contains(token),
        }
    }

    /// Whether an item with the given lower-case category passes the facet
    ///
    /// Items without a category only pass the `All` selection.
    #[must_use]
    pub fn matches(&self, category: Option<&str>) -> bool {
        match self {
            Self::All => true,
            Self::Only(set) => category.is_some_and(|c| set.contains(c)),
        }
    }

    /// Selected tokens in wire form (`["all"]` for the `All` selection)
    #[must_use]
    pub fn tokens(&self) -> Vec<&str> {
        match self {
            Self::All => vec![Self::ALL_TOKEN],
            Self::Only(set) => set.iter().collect(),
        }
    }
}

impl fmt::Display for CategorySelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tokens().join(","))
    }
}

/// Filter, sort and pagination state of a visibility engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    search_query: String,
    categories: CategorySelection,
    collection: Option<String>,
    page: usize,
    sort_mode: SortMode,
}

impl QueryState {
    /// Create the initial state: no search, all categories, page 1, default sort
    #[must_use]
    pub const fn new() -> Self {
        Self {
            search_query: String::new(),
            categories: CategorySelection::All,
            collection: None,
            page: 1,
            sort_mode: SortMode::Default,
        }
    }

    /// Lower-cased search text; empty means no search filter
    #[must_use]
    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Current category selection
    #[must_use]
    pub const fn categories(&self) -> &CategorySelection {
        &self.categories
    }

    /// Selected sub-collection, if any
    #[must_use]
    pub fn collection(&self) -> Option<&str> {
        self.collection.as_deref()
    }

    /// 1-based page number
    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    /// Active sort strategy
    #[must_use]
    pub const fn sort_mode(&self) -> SortMode {
        self.sort_mode
    }

    /// Store a lower-cased search query and go back to page 1
    pub fn set_search_query(&mut self, query: &str) {
        self.search_query = query.to_lowercase();
        self.page = 1;
    }

    /// Toggle a category token and go back to page 1
    pub fn toggle_category(&mut self, token: &str) {
        self.categories.toggle(token);
        self.page = 1;
    }

    /// Replace the whole category selection and go back to page 1
    pub fn set_categories(&mut self, categories: CategorySelection) {
        self.categories = categories;
        self.page = 1;
    }

    /// Select or clear the sub-collection and go back to page 1
    pub fn set_collection(&mut self, collection: Option<String>) {
        self.collection = collection;
        self.page = 1;
    }

    /// Store the page number as given
    ///
    /// No clamping happens here; pages outside the visible range simply
    /// produce empty slices.
    pub const fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Change the sort strategy and go back to page 1
    pub const fn set_sort_mode(&mut self, mode: SortMode) {
        self.sort_mode = mode;
        self.page = 1;
    }

    /// Restore the initial state
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for QueryState {
    fn default() -> Self {
        Self::new()
    }
}
