//! Pagination types
//!
//! The paged request primitive, loop bounds, and helpers for reading page
//! tokens and items out of response bodies.

use crate::types::{JsonValue, Method, RequestDescriptor};
use serde::{Deserialize, Serialize};

/// Query parameter carrying the continuation token
pub const PAGE_TOKEN_PARAM: &str = "pageToken";

/// Response field holding the continuation token
pub const NEXT_PAGE_TOKEN_FIELD: &str = "nextPageToken";

/// Default upper bound on pages fetched by one collection
pub const DEFAULT_MAX_PAGES: u32 = 10_000;

/// Result of inspecting one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextPage {
    /// More pages available behind this token
    Continue(String),
    /// No more pages
    Done,
}

impl NextPage {
    /// Read the continuation out of a response body
    pub fn from_response(body: &JsonValue) -> Self {
        match next_page_token(body) {
            Some(token) => Self::Continue(token),
            None => Self::Done,
        }
    }

    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }
}

/// A listing request repeated once per page
///
/// `base_uri` already carries the fixed query parameters; `extra_query` is
/// appended after the page token on every call.
#[derive(Debug, Clone, PartialEq)]
pub struct PagedRequest {
    /// Endpoint with fixed query parameters
    pub base_uri: String,
    /// Response field holding the page's items
    pub items_field: String,
    /// Caller-supplied query fragment, e.g. `filter=...`
    pub extra_query: String,
    /// GET for listings, POST for search-style endpoints
    pub method: Method,
    /// Fixed payload sent with every page (POST only)
    pub payload: Option<JsonValue>,
}

impl PagedRequest {
    /// Create a GET listing request
    pub fn get(base_uri: impl Into<String>, items_field: impl Into<String>) -> Self {
        Self {
            base_uri: base_uri.into(),
            items_field: items_field.into(),
            extra_query: String::new(),
            method: Method::GET,
            payload: None,
        }
    }

    /// Create a POST listing request with a fixed payload
    pub fn post(
        base_uri: impl Into<String>,
        items_field: impl Into<String>,
        payload: JsonValue,
    ) -> Self {
        Self {
            base_uri: base_uri.into(),
            items_field: items_field.into(),
            extra_query: String::new(),
            method: Method::POST,
            payload: Some(payload),
        }
    }

    /// Append a query fragment sent with every page
    #[must_use]
    pub fn with_extra_query(mut self, fragment: impl AsRef<str>) -> Self {
        let fragment = fragment.as_ref().trim_start_matches(&['&', '?'][..]);
        if !fragment.is_empty() {
            if !self.extra_query.is_empty() {
                self.extra_query.push('&');
            }
            self.extra_query.push_str(fragment);
        }
        self
    }

    /// Endpoint for the page behind `token` (first page when `None`)
    pub fn endpoint(&self, token: Option<&str>) -> String {
        let mut uri = self.base_uri.clone();
        if let Some(token) = token {
            uri = append_query(
                &uri,
                &format!("{PAGE_TOKEN_PARAM}={}", urlencoding::encode(token)),
            );
        }
        append_query(&uri, &self.extra_query)
    }

    /// Descriptor for the page behind `token`
    pub fn descriptor(&self, token: Option<&str>) -> RequestDescriptor {
        RequestDescriptor {
            uri: self.endpoint(token),
            method: self.method,
            payload: self.payload.clone(),
        }
    }
}

/// Bounds on a single pagination run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Maximum pages before giving up; `None` (or zero) trusts the upstream
    /// to terminate
    pub max_pages: Option<u32>,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            max_pages: Some(DEFAULT_MAX_PAGES),
        }
    }
}

impl PaginationConfig {
    /// Bound the run to `max_pages` pages; zero means no bound
    pub fn bounded(max_pages: u32) -> Self {
        Self {
            max_pages: (max_pages > 0).then_some(max_pages),
        }
    }

    /// No bound at all
    pub fn unbounded() -> Self {
        Self { max_pages: None }
    }

    /// Whether `pages` fetched pages have used up the bound
    pub fn exhausted(&self, pages: u32) -> bool {
        self.max_pages.is_some_and(|max| max > 0 && pages >= max)
    }
}

/// Tracks progress of one pagination run
#[derive(Debug, Clone, Default)]
pub struct PaginationState {
    /// Pages fetched so far
    pub pages: u32,
    /// Items collected so far
    pub total_fetched: usize,
    /// Token for the next page, if any
    pub token: Option<String>,
    /// Is pagination complete?
    pub done: bool,
}

impl PaginationState {
    /// Create a new pagination state
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one fetched page and its continuation
    pub fn advance(&mut self, items: usize, next: NextPage) {
        self.pages += 1;
        self.total_fetched += items;
        match next {
            NextPage::Continue(token) => self.token = Some(token),
            NextPage::Done => {
                self.token = None;
                self.done = true;
            }
        }
    }
}

/// Non-empty string value of `nextPageToken`, if any
pub fn next_page_token(body: &JsonValue) -> Option<String> {
    body.get(NEXT_PAGE_TOKEN_FIELD)
        .and_then(JsonValue::as_str)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

/// Items under `field`; anything other than an array counts as no items
pub fn extract_items(body: &mut JsonValue, field: &str) -> Vec<JsonValue> {
    match body.get_mut(field).map(JsonValue::take) {
        Some(JsonValue::Array(items)) => items,
        _ => Vec::new(),
    }
}

/// Append a query fragment, choosing `?` or `&` as the separator
pub fn append_query(uri: &str, fragment: &str) -> String {
    let fragment = fragment.trim_start_matches(&['&', '?'][..]);
    if fragment.is_empty() {
        return uri.to_string();
    }
    let separator = if uri.contains('?') { '&' } else { '?' };
    format!("{uri}{separator}{fragment}")
}
