//! Business information service
//!
//! Locations, categories, attributes and the search endpoints.

use super::{join, optional_param, ApiHosts};
use crate::pagination::PagedRequest;
use crate::types::RequestDescriptor;
use serde_json::json;

/// Fields requested for every location
pub const LOCATION_READ_MASK: &str = "name,languageCode,storeCode,title,phoneNumbers,categories,\
storefrontAddress,websiteUri,regularHours,specialHours,serviceArea,labels,\
adWordsLocationExtensions,latlng,openInfo,metadata,profile,relationshipData,moreHours,serviceItems";

pub const LOCATIONS_PAGE_SIZE: u32 = 100;
pub const CATEGORIES_PAGE_SIZE: u32 = 100;
pub const ATTRIBUTES_PAGE_SIZE: u32 = 200;
pub const CHAINS_PAGE_SIZE: u32 = 500;
pub const GOOGLE_LOCATIONS_PAGE_SIZE: u32 = 10;

/// Locations under an account, optionally filtered
pub fn locations(hosts: &ApiHosts, account: &str, filter: Option<&str>) -> PagedRequest {
    PagedRequest::get(
        format!(
            "{}?readMask={LOCATION_READ_MASK}&pageSize={LOCATIONS_PAGE_SIZE}",
            join(&hosts.business_information, &format!("{account}/locations"))
        ),
        "locations",
    )
    .with_extra_query(optional_param("filter", filter))
}

/// Business categories for a region and language
pub fn categories(
    hosts: &ApiHosts,
    region_code: &str,
    language_code: &str,
    filter: Option<&str>,
) -> PagedRequest {
    PagedRequest::get(
        format!(
            "{}?regionCode={}&languageCode={}&view=FULL&pageSize={CATEGORIES_PAGE_SIZE}",
            join(&hosts.business_information, "categories"),
            urlencoding::encode(region_code),
            urlencoding::encode(language_code),
        ),
        "categories",
    )
    .with_extra_query(optional_param("filter", filter))
}

/// What attribute metadata is scoped to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeScope {
    /// Attributes available to an existing location
    Location(String),
    /// Attributes available to a category in a region
    Category {
        category: String,
        region_code: String,
        language_code: String,
    },
}

impl AttributeScope {
    fn query(&self) -> String {
        match self {
            AttributeScope::Location(location) => format!("parent={location}"),
            AttributeScope::Category {
                category,
                region_code,
                language_code,
            } => format!(
                "categoryName={}&regionCode={}&languageCode={}",
                category,
                urlencoding::encode(region_code),
                urlencoding::encode(language_code)
            ),
        }
    }
}

/// Metadata describing the attributes available in a scope
pub fn attribute_metadata(hosts: &ApiHosts, scope: &AttributeScope) -> PagedRequest {
    PagedRequest::get(
        format!(
            "{}?{}&pageSize={ATTRIBUTES_PAGE_SIZE}",
            join(&hosts.business_information, "attributes"),
            scope.query()
        ),
        "attributeMetadata",
    )
}

/// Attribute values currently set on a location
pub fn location_attributes(hosts: &ApiHosts, location: &str) -> RequestDescriptor {
    RequestDescriptor::get(join(
        &hosts.business_information,
        &format!("{location}/attributes"),
    ))
}

/// Google-updated snapshot of a location
pub fn google_updated(hosts: &ApiHosts, location: &str) -> RequestDescriptor {
    RequestDescriptor::get(format!(
        "{}?readMask={LOCATION_READ_MASK}",
        join(
            &hosts.business_information,
            &format!("{location}:getGoogleUpdated")
        )
    ))
}

/// Chains whose name matches
pub fn search_chains(hosts: &ApiHosts, chain_name: &str) -> RequestDescriptor {
    RequestDescriptor::get(format!(
        "{}?chainName={}&pageSize={CHAINS_PAGE_SIZE}",
        join(&hosts.business_information, "chains:search"),
        urlencoding::encode(chain_name)
    ))
}

/// Google Maps locations matching a free-text query
pub fn search_google_locations(hosts: &ApiHosts, query: &str) -> RequestDescriptor {
    RequestDescriptor::post(
        join(&hosts.business_information, "googleLocations:search"),
        json!({
            "query": query,
            "pageSize": GOOGLE_LOCATIONS_PAGE_SIZE,
        }),
    )
}
