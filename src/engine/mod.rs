//! Visibility engine
//!
//! [`VisibilityEngine`] owns an immutable item collection and a mutable
//! [`QueryState`], and derives the visible view from them on demand:
//!
//! ```text
//! items ──▶ filter (search, category) ──▶ sort (SortMode) ──▶ paginate
//!                                              ▲
//!                                              │ scores (Trending only)
//!                                       Option<RankingSource>
//! ```
//!
//! Nothing is cached. Every derivation recomputes from the full collection
//! and the current state, so a read after any mutation is always consistent
//! with that mutation.
//!
//! ```
//! use projscope::engine::VisibilityEngine;
//! use projscope::item::Item;
//! use projscope::query::SortMode;
//!
//! let mut engine = VisibilityEngine::new(vec![
//!     Item::new("Alpha").with_category("tools").with_rating(4.0),
//!     Item::new("Beta").with_category("games").with_rating(2.0),
//! ]);
//!
//! engine.set_search_query("a");
//! engine.set_sort_mode(SortMode::RatingDesc);
//!
//! let titles: Vec<&str> = engine.visible_items().iter().map(|i| i.title.as_str()).collect();
//! assert_eq!(titles, vec!["Alpha", "Beta"]);
//! ```

mod discovery;
pub mod error;

pub use discovery::{BadgedItem, DEFAULT_HIDDEN_GEMS_LIMIT, DEFAULT_TRENDING_LIMIT, ScoredItem};
pub use error::EngineError;

use crate::item::Item;
use crate::query::error::QueryError;
use crate::query::filter::FilterByQuery;
use crate::query::sort::{SortMode, sort_items};
use crate::query::state::QueryState;
use crate::ranking::RankingSource;
use serde::Serialize;
use std::fmt;

/// Page size used when none is configured
pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

/// Summary of the current page position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    /// Current 1-based page (as stored, not clamped)
    pub page: usize,
    /// Fixed page size
    pub items_per_page: usize,
    /// Number of visible items across all pages
    pub total_items: usize,
    /// Number of pages, 0 when nothing is visible
    pub total_pages: usize,
}

/// Query engine over a fixed item collection
pub struct VisibilityEngine {
    items: Vec<Item>,
    state: QueryState,
    items_per_page: usize,
    ranking: Option<Box<dyn RankingSource>>,
}

impl VisibilityEngine {
    /// Create an engine with the default page size and no ranking source
    #[must_use]
    pub fn new(items: Vec<Item>) -> Self {
        Self {
            items,
            state: QueryState::new(),
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            ranking: None,
        }
    }

    /// Create a new builder for constructing a `VisibilityEngine`
    #[must_use]
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    /// The full, unfiltered collection in catalog order
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Current query state
    #[must_use]
    pub const fn state(&self) -> &QueryState {
        &self.state
    }

    /// Fixed page size
    #[must_use]
    pub const fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    // ------------------------------------------------------------------
    // Ranking source
    // ------------------------------------------------------------------

    /// Attach (or replace) the ranking source
    pub fn attach_ranking_source(&mut self, source: impl RankingSource + 'static) {
        tracing::debug!("ranking source attached");
        self.ranking = Some(Box::new(source));
    }

    /// Detach the ranking source, returning it if one was attached
    pub fn detach_ranking_source(&mut self) -> Option<Box<dyn RankingSource>> {
        tracing::debug!("ranking source detached");
        self.ranking.take()
    }

    /// Whether a ranking source is attached
    #[must_use]
    pub const fn has_ranking_source(&self) -> bool {
        self.ranking.is_some()
    }

    pub(crate) fn ranking(&self) -> Option<&dyn RankingSource> {
        self.ranking.as_deref()
    }

    // ------------------------------------------------------------------
    // State mutators
    // ------------------------------------------------------------------

    /// Set the free-text search (lower-cased) and go back to page 1
    pub fn set_search_query(&mut self, query: &str) {
        self.state.set_search_query(query);
        tracing::debug!(search = self.state.search_query(), "search query set");
    }

    /// Toggle a category facet and go back to page 1
    ///
    /// `"all"` clears the facet; any other token flips its membership.
    pub fn toggle_category(&mut self, token: &str) {
        self.state.toggle_category(token);
        tracing::debug!(
            token,
            categories = %self.state.categories(),
            "category toggled"
        );
    }

    /// Select or clear the sub-collection and go back to page 1
    pub fn set_collection(&mut self, collection: Option<String>) {
        self.state.set_collection(collection);
        tracing::debug!(collection = ?self.state.collection(), "collection set");
    }

    /// Jump to a page; the value is stored as given
    pub fn set_page(&mut self, page: usize) {
        self.state.set_page(page);
        tracing::debug!(page, "page set");
    }

    /// Change the sort strategy and go back to page 1
    pub fn set_sort_mode(&mut self, mode: SortMode) {
        if mode.needs_ranking() && self.ranking.is_none() {
            tracing::warn!(sort = %mode, "no ranking source attached; sort keeps catalog order");
        }
        self.state.set_sort_mode(mode);
        tracing::debug!(sort = %mode, "sort mode set");
    }

    /// Change the sort strategy from its wire token
    ///
    /// # Errors
    ///
    /// Returns `QueryError::UnknownSortMode` for unrecognized tokens. The
    /// state, including the page, is left untouched in that case.
    pub fn set_sort_mode_str(&mut self, token: &str) -> Result<(), QueryError> {
        let mode = token.parse::<SortMode>()?;
        self.set_sort_mode(mode);
        Ok(())
    }

    /// Restore the initial query state
    pub fn reset(&mut self) {
        self.state.reset();
        tracing::debug!("query state reset");
    }

    /// Install a complete query state, e.g. one decoded from a URL
    pub fn replace_state(&mut self, state: QueryState) {
        tracing::debug!(?state, "query state replaced");
        self.state = state;
    }

    // ------------------------------------------------------------------
    // Derived views
    // ------------------------------------------------------------------

    /// Items matching the current search and category, in sort order
    #[must_use]
    pub fn visible_items(&self) -> Vec<&Item> {
        let mut visible: Vec<&Item> = self.items.iter().filter_by_query(&self.state).collect();
        sort_items(&mut visible, self.state.sort_mode(), self.ranking());
        tracing::trace!(
            total = self.items.len(),
            visible = visible.len(),
            sort = %self.state.sort_mode(),
            "derived visible items"
        );
        visible
    }

    /// The slice of visible items on the current page
    ///
    /// Pages before 1 or past the last page yield an empty list.
    #[must_use]
    pub fn paginated_items(&self) -> Vec<&Item> {
        let Some(start) = self
            .state
            .page()
            .checked_sub(1)
            .and_then(|p| p.checked_mul(self.items_per_page))
        else {
            return Vec::new();
        };

        self.visible_items()
            .into_iter()
            .skip(start)
            .take(self.items_per_page)
            .collect()
    }

    /// Number of visible items
    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.items.iter().filter_by_query(&self.state).count()
    }

    /// Number of pages needed for the visible items (may be 0)
    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.visible_count().div_ceil(self.items_per_page)
    }

    /// Whether no item matches the current query
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.visible_count() == 0
    }

    /// Current page position and totals
    #[must_use]
    pub fn page_info(&self) -> PageInfo {
        let total_items = self.visible_count();
        PageInfo {
            page: self.state.page(),
            items_per_page: self.items_per_page,
            total_items,
            total_pages: total_items.div_ceil(self.items_per_page),
        }
    }
}

impl fmt::Debug for VisibilityEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VisibilityEngine")
            .field("items", &self.items.len())
            .field("state", &self.state)
            .field("items_per_page", &self.items_per_page)
            .field("ranking", &self.ranking.is_some())
            .finish()
    }
}

/// Builder for `VisibilityEngine`
///
/// ```
/// use projscope::engine::VisibilityEngine;
/// use projscope::item::Item;
/// use projscope::ranking::ScoreTable;
///
/// let engine = VisibilityEngine::builder()
///     .items(vec![Item::new("Clock")])
///     .items_per_page(25)
///     .ranking_source(ScoreTable::new().with_score("Clock", 3.0))
///     .build()
///     .unwrap();
///
/// assert_eq!(engine.items_per_page(), 25);
/// assert!(engine.has_ranking_source());
/// ```
pub struct EngineBuilder {
    items: Vec<Item>,
    items_per_page: usize,
    ranking: Option<Box<dyn RankingSource>>,
    state: Option<QueryState>,
}

impl EngineBuilder {
    /// Create a new builder with default settings
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            ranking: None,
            state: None,
        }
    }

    /// Set the item collection
    #[must_use]
    pub fn items(mut self, items: Vec<Item>) -> Self {
        self.items = items;
        self
    }

    /// Set the page size (must be at least 1)
    #[must_use]
    pub const fn items_per_page(mut self, items_per_page: usize) -> Self {
        self.items_per_page = items_per_page;
        self
    }

    /// Attach a ranking source
    #[must_use]
    pub fn ranking_source(mut self, source: impl RankingSource + 'static) -> Self {
        self.ranking = Some(Box::new(source));
        self
    }

    /// Start from a given query state instead of the initial one
    #[must_use]
    pub fn state(mut self, state: QueryState) -> Self {
        self.state = Some(state);
        self
    }

    /// Build the `VisibilityEngine`
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidItemsPerPage` if the page size is 0.
    pub fn build(self) -> Result<VisibilityEngine, EngineError> {
        if self.items_per_page == 0 {
            return Err(EngineError::InvalidItemsPerPage(self.items_per_page));
        }

        tracing::debug!(
            items = self.items.len(),
            items_per_page = self.items_per_page,
            ranking = self.ranking.is_some(),
            "visibility engine built"
        );

        Ok(VisibilityEngine {
            items: self.items,
            state: self.state.unwrap_or_default(),
            items_per_page: self.items_per_page,
            ranking: self.ranking,
        })
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
