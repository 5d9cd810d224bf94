//! Endpoint builders
//!
//! One pure function per upstream resource. Each returns either a
//! [`PagedRequest`](crate::pagination::PagedRequest) naming the response
//! field that holds the items, or a single
//! [`RequestDescriptor`](crate::types::RequestDescriptor) whose raw response
//! is handed back as-is.
//!
//! Resource names (`accounts/123`, `locations/456`) are opaque strings
//! returned by the API and are concatenated into paths unchanged.
//! Caller-supplied query values are percent-encoded.

mod account;
mod business;
mod legacy;
mod place_actions;

pub use account::{accounts, ACCOUNTS_PAGE_SIZE};
pub use business::{
    attribute_metadata, categories, google_updated, location_attributes, locations,
    search_chains, search_google_locations, AttributeScope, ATTRIBUTES_PAGE_SIZE,
    CATEGORIES_PAGE_SIZE, CHAINS_PAGE_SIZE, GOOGLE_LOCATIONS_PAGE_SIZE, LOCATIONS_PAGE_SIZE,
    LOCATION_READ_MASK,
};
pub use legacy::{
    insights, local_posts, prefix_location, reviews, TimeRange, MAX_INSIGHT_LOCATIONS,
    POSTS_PAGE_SIZE, REVIEWS_PAGE_SIZE,
};
pub use place_actions::{place_action_links, PLACE_ACTIONS_PAGE_SIZE};

use serde::{Deserialize, Serialize};

/// Base URLs of the four services, including their version segment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiHosts {
    pub account_management: String,
    pub business_information: String,
    pub place_actions: String,
    /// Legacy v4 service (insights, posts, reviews)
    pub legacy: String,
}

impl Default for ApiHosts {
    fn default() -> Self {
        Self {
            account_management: "https://mybusinessaccountmanagement.googleapis.com/v1".to_string(),
            business_information: "https://mybusinessbusinessinformation.googleapis.com/v1"
                .to_string(),
            place_actions: "https://mybusinessplaceactions.googleapis.com/v1".to_string(),
            legacy: "https://mybusiness.googleapis.com/v4".to_string(),
        }
    }
}

impl ApiHosts {
    /// Point every service at one base URL (mock servers, proxies)
    pub fn single(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            account_management: format!("{base}/v1"),
            business_information: format!("{base}/v1"),
            place_actions: format!("{base}/v1"),
            legacy: format!("{base}/v4"),
        }
    }

    /// Check every host parses as an absolute URL
    pub fn validate(&self) -> crate::Result<()> {
        for host in [
            &self.account_management,
            &self.business_information,
            &self.place_actions,
            &self.legacy,
        ] {
            url::Url::parse(host)?;
        }
        Ok(())
    }
}

/// Join a host and a path with exactly one slash
pub(crate) fn join(host: &str, path: &str) -> String {
    format!(
        "{}/{}",
        host.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// `&key=<encoded value>`, or nothing when the value is absent or blank
pub(crate) fn optional_param(key: &str, value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => format!("&{key}={}", urlencoding::encode(v)),
        _ => String::new(),
    }
}
