//! Legacy v4 service: insights, local posts and reviews
//!
//! These endpoints are deprecated upstream without a direct replacement.
//! They are kept because the listing data they expose is not available
//! anywhere else yet.

use super::{join, ApiHosts};
use crate::pagination::PagedRequest;
use crate::types::RequestDescriptor;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::json;

/// Upstream limit on location names per insights call (not enforced here)
pub const MAX_INSIGHT_LOCATIONS: usize = 10;

pub const POSTS_PAGE_SIZE: u32 = 100;
pub const REVIEWS_PAGE_SIZE: u32 = 50;

/// Inclusive reporting window for insights
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }
}

/// Qualify a location id with its account, e.g. `accounts/1/locations/2`
///
/// Ids that already carry the account prefix are returned unchanged.
pub fn prefix_location(account: &str, location: &str) -> String {
    let account = account.trim_end_matches('/');
    let location = location.trim_start_matches('/');
    if location
        .strip_prefix(account)
        .is_some_and(|rest| rest.starts_with('/'))
    {
        location.to_string()
    } else {
        format!("{account}/{location}")
    }
}

/// Basic insight metrics for up to [`MAX_INSIGHT_LOCATIONS`] locations
///
/// Callers with more locations must batch; a longer list is sent as-is and
/// the upstream decides what to do with it.
pub fn insights<S: AsRef<str>>(
    hosts: &ApiHosts,
    account: &str,
    locations: &[S],
    range: &TimeRange,
) -> RequestDescriptor {
    let location_names: Vec<String> = locations
        .iter()
        .map(|location| prefix_location(account, location.as_ref()))
        .collect();

    RequestDescriptor::post(
        join(&hosts.legacy, &format!("{account}/locations:reportInsights")),
        json!({
            "locationNames": location_names,
            "basicRequest": {
                "metricRequests": [{"metric": "ALL"}],
                "timeRange": {
                    "startTime": range.start.to_rfc3339_opts(SecondsFormat::Secs, true),
                    "endTime": range.end.to_rfc3339_opts(SecondsFormat::Secs, true),
                },
            },
        }),
    )
}

/// Local posts published on a location
pub fn local_posts(hosts: &ApiHosts, account: &str, location: &str) -> PagedRequest {
    PagedRequest::get(
        format!(
            "{}?pageSize={POSTS_PAGE_SIZE}",
            join(
                &hosts.legacy,
                &format!("{}/localPosts", prefix_location(account, location))
            )
        ),
        "localPosts",
    )
}

/// Customer reviews of a location
pub fn reviews(hosts: &ApiHosts, account: &str, location: &str) -> PagedRequest {
    PagedRequest::get(
        format!(
            "{}?pageSize={REVIEWS_PAGE_SIZE}",
            join(
                &hosts.legacy,
                &format!("{}/reviews", prefix_location(account, location))
            )
        ),
        "reviews",
    )
}
