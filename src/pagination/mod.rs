//! Pagination module
//!
//! # Overview
//!
//! Every listing endpoint of the upstream follows the same convention: the
//! request takes a `pageToken` query parameter and the response carries
//! `nextPageToken` when more results remain. [`collect_pages`] drives that
//! loop through the request executor, concatenating one named array field
//! from each page and pausing through the configured throttle after every
//! call.

mod collector;
mod types;

pub use collector::collect_pages;
pub use types::{
    append_query, extract_items, next_page_token, NextPage, PagedRequest, PaginationConfig,
    PaginationState, DEFAULT_MAX_PAGES, NEXT_PAGE_TOKEN_FIELD, PAGE_TOKEN_PARAM,
};
