//! Filter predicate for the visible item set
//!
//! An item is visible when its title contains the search query (compared
//! lower-case) and its category passes the category facet. The collection id
//! in the query state does not take part in filtering.

use super::state::QueryState;
use crate::item::Item;

/// Whether the item's title contains the (already lower-case) query
///
/// An empty query matches every item.
#[must_use]
pub fn matches_search(item: &Item, query: &str) -> bool {
    query.is_empty() || item.title.to_lowercase().contains(query)
}

/// Whether the item passes both the search and category criteria
#[must_use]
pub fn matches(item: &Item, state: &QueryState) -> bool {
    matches_search(item, state.search_query())
        && state.categories().matches(item.category_key().as_deref())
}

/// Extension trait that filters item iterators by a query state
///
/// ```
/// use projscope::item::Item;
/// use projscope::query::{FilterByQuery, QueryState};
///
/// let items = vec![Item::new("Clock"), Item::new("Calculator")];
/// let mut state = QueryState::new();
/// state.set_search_query("clo");
///
/// let visible: Vec<&Item> = items.iter().filter_by_query(&state).collect();
/// assert_eq!(visible.len(), 1);
/// ```
pub trait FilterByQuery<'a>: Iterator<Item = &'a Item> + Sized {
    /// Keep only items matching the query state, preserving order
    fn filter_by_query(self, state: &'a QueryState) -> impl Iterator<Item = &'a Item> {
        self.filter(move |item| matches(item, state))
    }
}

impl<'a, I> FilterByQuery<'a> for I where I: Iterator<Item = &'a Item> {}
