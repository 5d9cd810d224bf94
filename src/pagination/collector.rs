//! The page-token loop

use super::types::{extract_items, NextPage, PagedRequest, PaginationConfig, PaginationState};
use crate::error::{Error, Result};
use crate::http::{RequestExecutor, Throttle};
use crate::types::JsonValue;
use tracing::{debug, info, warn};

/// Fetch every page of `request` and concatenate their items in page order
///
/// The throttle pauses after every call, including the last one and a
/// failed one. Any failure aborts the run and the items collected so far
/// are dropped.
pub async fn collect_pages(
    executor: &RequestExecutor,
    throttle: &dyn Throttle,
    request: &PagedRequest,
    config: &PaginationConfig,
) -> Result<Vec<JsonValue>> {
    let mut items = Vec::new();
    let mut state = PaginationState::new();

    loop {
        let descriptor = request.descriptor(state.token.as_deref());
        let mut body = match executor.execute(&descriptor).await {
            Ok(body) => body,
            Err(e) => {
                throttle.pause().await;
                return Err(e);
            }
        };

        let page = extract_items(&mut body, &request.items_field);
        let page_len = page.len();
        items.extend(page);
        state.advance(page_len, NextPage::from_response(&body));

        debug!(
            page = state.pages,
            items = page_len,
            field = %request.items_field,
            has_next = state.token.is_some(),
            "Fetched page"
        );

        throttle.pause().await;

        if state.done {
            break;
        }

        if let Some(max_pages) = config.max_pages.filter(|_| config.exhausted(state.pages)) {
            warn!(
                pages = state.pages,
                collected = items.len(),
                uri = %request.base_uri,
                "Page limit reached with a continuation token still pending"
            );
            return Err(Error::PaginationLimitExceeded {
                max_pages,
                collected: items.len(),
            });
        }
    }

    info!(
        pages = state.pages,
        items = state.total_fetched,
        field = %request.items_field,
        "Collection complete"
    );
    Ok(items)
}
