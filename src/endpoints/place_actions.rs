//! Place actions service

use super::{join, ApiHosts};
use crate::pagination::PagedRequest;

/// Page size requested for place action links
pub const PLACE_ACTIONS_PAGE_SIZE: u32 = 100;

/// Booking, ordering and similar action links attached to a location
pub fn place_action_links(hosts: &ApiHosts, location: &str) -> PagedRequest {
    PagedRequest::get(
        format!(
            "{}?pageSize={PLACE_ACTIONS_PAGE_SIZE}",
            join(&hosts.place_actions, &format!("{location}/placeActionLinks"))
        ),
        "placeActionLinks",
    )
}
