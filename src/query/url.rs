//! Query-string codec for [`QueryState`]
//!
//! The state is written as the parameters `category`, `search`, `sort`,
//! `page` and `collection`, each omitted when it holds its default value
//! (all categories, empty search, default sort, page 1, no collection).
//!
//! Multi-category selections are written as a repeated `category` parameter,
//! one per token, so every state round-trips. A single-category selection
//! produces the same `category=<token>` form older links use.
//!
//! Decoding never fails: missing or unparseable parameters fall back to their
//! defaults.
//!
//! ```
//! use projscope::query::{QueryState, SortMode, url};
//!
//! let mut state = QueryState::new();
//! state.toggle_category("games");
//! state.set_sort_mode(SortMode::RatingDesc);
//! state.set_page(2);
//!
//! let encoded = url::encode(&state);
//! assert_eq!(encoded, "category=games&sort=rating-high&page=2");
//! assert_eq!(url::decode(&encoded), state);
//! ```

use super::sort::SortMode;
use super::state::{CategorySelection, QueryState};
use std::fmt::Write;

/// Parameter name for category tokens
pub const PARAM_CATEGORY: &str = "category";
/// Parameter name for the search text
pub const PARAM_SEARCH: &str = "search";
/// Parameter name for the sort mode
pub const PARAM_SORT: &str = "sort";
/// Parameter name for the page number
pub const PARAM_PAGE: &str = "page";
/// Parameter name for the collection id
pub const PARAM_COLLECTION: &str = "collection";

/// Encode the state as a query string without the leading `?`
///
/// Returns an empty string for the initial state.
#[must_use]
pub fn encode(state: &QueryState) -> String {
    let mut params: Vec<(&str, String)> = Vec::new();

    if let CategorySelection::Only(tokens) = state.categories() {
        params.extend(tokens.iter().map(|t| (PARAM_CATEGORY, t.to_string())));
    }
    if !state.search_query().is_empty() {
        params.push((PARAM_SEARCH, state.search_query().to_string()));
    }
    if state.sort_mode() != SortMode::Default {
        params.push((PARAM_SORT, state.sort_mode().as_str().to_string()));
    }
    if state.page() != 1 {
        params.push((PARAM_PAGE, state.page().to_string()));
    }
    if let Some(collection) = state.collection() {
        params.push((PARAM_COLLECTION, collection.to_string()));
    }

    params
        .iter()
        .map(|(key, value)| format!("{key}={}", percent_encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Decode a query string into a state
///
/// A leading `?` is ignored. Unknown parameters are skipped. For single-value
/// parameters the first occurrence wins.
#[must_use]
pub fn decode(query: &str) -> QueryState {
    let query = query.trim().trim_start_matches('?');

    let mut categories: Vec<String> = Vec::new();
    let mut search: Option<String> = None;
    let mut sort: Option<String> = None;
    let mut page: Option<String> = None;
    let mut collection: Option<String> = None;

    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (raw_key, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
        let key = percent_decode(raw_key);
        let value = percent_decode(raw_value);

        match key.as_str() {
            PARAM_CATEGORY => categories.push(value),
            PARAM_SEARCH => {
                search.get_or_insert(value);
            }
            PARAM_SORT => {
                sort.get_or_insert(value);
            }
            PARAM_PAGE => {
                page.get_or_insert(value);
            }
            PARAM_COLLECTION => {
                collection.get_or_insert(value);
            }
            other => tracing::trace!(param = other, "ignoring unknown query parameter"),
        }
    }

    let mut state = QueryState::new();
    state.set_categories(CategorySelection::from_tokens(&categories));
    if let Some(search) = search {
        state.set_search_query(&search);
    }
    if let Some(sort) = sort {
        match sort.parse::<SortMode>() {
            Ok(mode) => state.set_sort_mode(mode),
            Err(e) => tracing::debug!(error = %e, "falling back to default sort"),
        }
    }
    state.set_collection(collection.filter(|c| !c.is_empty()));
    // Page goes last; the other setters reset it to 1
    state.set_page(page.as_deref().map_or(1, parse_page));
    state
}

fn parse_page(raw: &str) -> usize {
    match raw.trim().parse::<usize>() {
        Ok(page) if page > 0 => page,
        _ => 1,
    }
}

// RFC 3986 unreserved characters pass through; everything else is escaped
// byte-wise, space included (as %20).
fn percent_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for &b in input.as_bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(b as char);
            }
            _ => {
                let _ = write!(out, "%{b:02X}");
            }
        }
    }
    out
}

// `+` decodes to a space. Invalid or truncated escapes are kept verbatim and
// the decoded bytes are read as lossy UTF-8.
fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out: Vec<u8> = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len() => {
                let hex = std::str::from_utf8(&bytes[i + 1..i + 3])
                    .ok()
                    .and_then(|h| u8::from_str_radix(h, 16).ok());
                if let Some(value) = hex {
                    out.push(value);
                    i += 3;
                } else {
                    out.push(b'%');
                    i += 1;
                }
            }
            other => {
                out.push(other);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}
