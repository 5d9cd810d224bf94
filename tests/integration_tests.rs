//! Integration tests using mock HTTP server
//!
//! Drives the public `ListingFetcher` end to end: endpoint builders →
//! pagination loop → request executor → reqwest → wiremock.

use chrono::{TimeZone, Utc};
use listing_fetcher::auth::StaticToken;
use listing_fetcher::config::FetcherConfig;
use listing_fetcher::endpoints::{ApiHosts, TimeRange};
use listing_fetcher::http::{FixedInterval, NoThrottle, ReqwestTransport, ThrottleConfig};
use listing_fetcher::pagination::PaginationConfig;
use listing_fetcher::{Error, ListingFetcher};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use wiremock::matchers::{
    body_partial_json, header, method, path, query_param, query_param_is_missing,
};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fetcher(server: &MockServer) -> ListingFetcher {
    ListingFetcher::builder(StaticToken::new("integration-token"))
        .hosts(ApiHosts::single(server.uri()))
        .throttle(NoThrottle)
        .build(ReqwestTransport::new().unwrap())
}

// ============================================================================
// Account Management
// ============================================================================

#[tokio::test]
async fn test_accounts_two_pages() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/accounts"))
        .and(query_param("pageSize", "20"))
        .and(query_param_is_missing("pageToken"))
        .and(header("Authorization", "Bearer integration-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accounts": [{"name": "a1"}, {"name": "a2"}],
            "nextPageToken": "t1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/accounts"))
        .and(query_param("pageToken", "t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accounts": [{"name": "a3"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let accounts = fetcher(&server).accounts().await.unwrap();

    assert_eq!(
        accounts,
        vec![json!({"name": "a1"}), json!({"name": "a2"}), json!({"name": "a3"})]
    );
}

#[tokio::test]
async fn test_accounts_forbidden_no_retry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/accounts"))
        .respond_with(ResponseTemplate::new(403).set_body_string(r#"{"error":"denied"}"#))
        .expect(1)
        .mount(&server)
        .await;

    let err = fetcher(&server).accounts().await.unwrap_err();

    match err {
        Error::Request { status, body, .. } => {
            assert_eq!(status, 403);
            assert_eq!(body, r#"{"error":"denied"}"#);
        }
        other => panic!("expected request error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_failure_mid_pagination_returns_no_items() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/accounts"))
        .and(query_param_is_missing("pageToken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accounts": [{"name": "a1"}],
            "nextPageToken": "t1"
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/accounts"))
        .and(query_param("pageToken", "t1"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .expect(1)
        .mount(&server)
        .await;

    let result = fetcher(&server).accounts().await;
    assert_eq!(result.unwrap_err().status(), Some(503));
}

// ============================================================================
// Business Information
// ============================================================================

#[tokio::test]
async fn test_locations_with_filter() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/accounts/1/locations"))
        .and(query_param("filter", "storeCode=\"S 1\""))
        .and(query_param("pageSize", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "locations": [{"name": "locations/10", "storeCode": "S 1"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let locations = fetcher(&server)
        .locations("accounts/1", Some("storeCode=\"S 1\""))
        .await
        .unwrap();

    assert_eq!(locations.len(), 1);
    assert_eq!(locations[0]["name"], "locations/10");
}

#[tokio::test]
async fn test_all_locations_walks_every_account() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/accounts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accounts": [{"name": "accounts/1"}, {"name": "accounts/2"}, {"type": "nameless"}]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/accounts/1/locations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "locations": [{"name": "locations/11"}]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/accounts/2/locations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "locations": [{"name": "locations/21"}, {"name": "locations/22"}]
        })))
        .mount(&server)
        .await;

    let locations = fetcher(&server).all_locations().await.unwrap();
    let names: Vec<&str> = locations
        .iter()
        .map(|l| l["name"].as_str().unwrap())
        .collect();

    assert_eq!(names, vec!["locations/11", "locations/21", "locations/22"]);
}

#[tokio::test]
async fn test_categories_default_region() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/categories"))
        .and(query_param("regionCode", "US"))
        .and(query_param("languageCode", "en"))
        .and(query_param("view", "FULL"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "categories": [{"name": "categories/gcid:cafe"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let categories = fetcher(&server).categories(None).await.unwrap();
    assert_eq!(categories, vec![json!({"name": "categories/gcid:cafe"})]);
}

#[tokio::test]
async fn test_attribute_metadata_missing_field_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/attributes"))
        .and(query_param("parent", "locations/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let metadata = fetcher(&server)
        .location_attribute_metadata("locations/5")
        .await
        .unwrap();
    assert!(metadata.is_empty());
}

#[tokio::test]
async fn test_search_chains_single_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/chains:search"))
        .and(query_param("chainName", "Foo Bar"))
        .and(query_param("pageSize", "500"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "chains": [{"name": "chains/1"}],
            "nextPageToken": "ignored"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = fetcher(&server).search_chains("Foo Bar").await.unwrap();

    assert_eq!(
        result,
        json!({"chains": [{"name": "chains/1"}], "nextPageToken": "ignored"})
    );
}

#[tokio::test]
async fn test_search_google_locations_posts_query() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/googleLocations:search"))
        .and(body_partial_json(json!({"query": "Blue Bottle Oakland"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "googleLocations": [{"name": "googleLocations/abc"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = fetcher(&server)
        .search_google_locations("Blue Bottle Oakland")
        .await
        .unwrap();
    assert_eq!(result["googleLocations"][0]["name"], "googleLocations/abc");
}

#[tokio::test]
async fn test_location_attributes_and_google_updated() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/locations/5/attributes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"attributes": []})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/locations/5:getGoogleUpdated"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"diffMask": "title"})))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = fetcher(&server);
    assert_eq!(
        fetcher.location_attributes("locations/5").await.unwrap(),
        json!({"attributes": []})
    );
    assert_eq!(
        fetcher.google_updated("locations/5").await.unwrap(),
        json!({"diffMask": "title"})
    );
}

// ============================================================================
// Place Actions
// ============================================================================

#[tokio::test]
async fn test_place_action_links() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/locations/5/placeActionLinks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "placeActionLinks": [{"uri": "https://book.example"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let links = fetcher(&server)
        .place_action_links("locations/5")
        .await
        .unwrap();
    assert_eq!(links, vec![json!({"uri": "https://book.example"})]);
}

// ============================================================================
// Legacy v4
// ============================================================================

fn january() -> TimeRange {
    TimeRange::new(
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap(),
    )
}

#[tokio::test]
async fn test_insights_prefixes_locations() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v4/accounts/1/locations:reportInsights"))
        .and(body_partial_json(json!({
            "locationNames": ["accounts/1/locations/2", "accounts/1/locations/3"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "locationMetrics": [{}, {}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = fetcher(&server)
        .insights("accounts/1", &["locations/2", "locations/3"], &january())
        .await
        .unwrap();
    assert_eq!(result["locationMetrics"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_insights_batched_splits_by_ten() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v4/accounts/1/locations:reportInsights"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(3)
        .mount(&server)
        .await;

    let ids: Vec<String> = (0..25).map(|i| format!("locations/{i}")).collect();
    let responses = fetcher(&server)
        .insights_batched("accounts/1", &ids, &january())
        .await
        .unwrap();
    assert_eq!(responses.len(), 3);

    let received = server.received_requests().await.unwrap();
    let sizes: Vec<usize> = received
        .iter()
        .map(|r| {
            let body: serde_json::Value = serde_json::from_slice(&r.body).unwrap();
            body["locationNames"].as_array().unwrap().len()
        })
        .collect();
    assert_eq!(sizes, vec![10, 10, 5]);
}

#[tokio::test]
async fn test_reviews_and_posts_paginate() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v4/accounts/1/locations/2/reviews"))
        .and(query_param_is_missing("pageToken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "reviews": [{"reviewId": "r1"}],
            "nextPageToken": "next"
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v4/accounts/1/locations/2/reviews"))
        .and(query_param("pageToken", "next"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "reviews": [{"reviewId": "r2"}],
            "averageRating": 4.5
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v4/accounts/1/locations/2/localPosts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "localPosts": [{"name": "p1"}]
        })))
        .mount(&server)
        .await;

    let fetcher = fetcher(&server);
    let reviews = fetcher.reviews("accounts/1", "locations/2").await.unwrap();
    assert_eq!(
        reviews,
        vec![json!({"reviewId": "r1"}), json!({"reviewId": "r2"})]
    );

    let posts = fetcher
        .local_posts("accounts/1", "locations/2")
        .await
        .unwrap();
    assert_eq!(posts, vec![json!({"name": "p1"})]);
}

// ============================================================================
// Limits, Pacing and Credentials
// ============================================================================

#[tokio::test]
async fn test_endless_token_hits_page_limit() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/accounts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accounts": [{"name": "loop"}],
            "nextPageToken": "same-token-forever"
        })))
        .expect(4)
        .mount(&server)
        .await;

    let fetcher = ListingFetcher::builder(StaticToken::new("t"))
        .hosts(ApiHosts::single(server.uri()))
        .throttle(NoThrottle)
        .pagination(PaginationConfig::bounded(4))
        .build(ReqwestTransport::new().unwrap());

    let err = fetcher.accounts().await.unwrap_err();
    assert!(err.is_pagination_limit());
}

#[tokio::test]
async fn test_fixed_interval_paces_every_call() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/chains:search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let fetcher = ListingFetcher::builder(StaticToken::new("t"))
        .hosts(ApiHosts::single(server.uri()))
        .throttle(FixedInterval::from_millis(50))
        .build(ReqwestTransport::new().unwrap());

    let start = Instant::now();
    fetcher.search_chains("a").await.unwrap();
    fetcher.search_chains("b").await.unwrap();
    assert!(start.elapsed() >= Duration::from_millis(100));
}

#[tokio::test]
async fn test_token_fetched_for_every_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/accounts"))
        .and(header("Authorization", "Bearer rotated-0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accounts": [{"name": "a1"}],
            "nextPageToken": "t1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/accounts"))
        .and(header("Authorization", "Bearer rotated-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accounts": [{"name": "a2"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let counter = Arc::new(AtomicUsize::new(0));
    let calls = Arc::clone(&counter);
    let fetcher = ListingFetcher::builder(move || -> listing_fetcher::Result<String> {
        Ok(format!("rotated-{}", calls.fetch_add(1, Ordering::SeqCst)))
    })
    .hosts(ApiHosts::single(server.uri()))
    .throttle(NoThrottle)
    .build(ReqwestTransport::new().unwrap());

    let accounts = fetcher.accounts().await.unwrap();
    assert_eq!(accounts.len(), 2);
    assert_eq!(counter.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_from_config_uses_configured_hosts() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/accounts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"accounts": []})))
        .expect(1)
        .mount(&server)
        .await;

    let config = FetcherConfig {
        hosts: ApiHosts::single(server.uri()),
        throttle: ThrottleConfig::None,
        ..FetcherConfig::default()
    };
    let fetcher = ListingFetcher::from_config(&config, StaticToken::new("t")).unwrap();

    assert!(fetcher.accounts().await.unwrap().is_empty());
}
