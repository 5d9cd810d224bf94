//! Account management service

use super::{join, ApiHosts};
use crate::pagination::PagedRequest;

/// Page size requested for account listings
pub const ACCOUNTS_PAGE_SIZE: u32 = 20;

/// Every account the credential can see
pub fn accounts(hosts: &ApiHosts) -> PagedRequest {
    PagedRequest::get(
        format!(
            "{}?pageSize={ACCOUNTS_PAGE_SIZE}",
            join(&hosts.account_management, "accounts")
        ),
        "accounts",
    )
}
