//! Listing fetcher facade
//!
//! One async method per upstream resource. Paginated resources return the
//! concatenated items; single-object resources return the raw response.
//! Every upstream call is followed by one throttle pause, and calls are
//! issued strictly one after another.

use crate::auth::TokenProvider;
use crate::config::FetcherConfig;
use crate::endpoints::{self, ApiHosts, AttributeScope, TimeRange, MAX_INSIGHT_LOCATIONS};
use crate::error::Result;
use crate::http::{FixedInterval, ReqwestTransport, RequestExecutor, Throttle, Transport};
use crate::pagination::{collect_pages, PagedRequest, PaginationConfig};
use crate::types::{JsonValue, RequestDescriptor};
use std::sync::Arc;
use tracing::{debug, info};

/// Client for the business listing API family
#[derive(Clone)]
pub struct ListingFetcher {
    executor: RequestExecutor,
    throttle: Arc<dyn Throttle>,
    hosts: ApiHosts,
    pagination: PaginationConfig,
    region_code: String,
    language_code: String,
}

impl ListingFetcher {
    /// Build a fetcher with default hosts, reqwest transport and 1s pacing
    pub fn new(tokens: impl TokenProvider + 'static) -> Result<Self> {
        Ok(Self::builder(tokens).build(ReqwestTransport::new()?))
    }

    /// Build a fetcher from a loaded configuration
    pub fn from_config(
        config: &FetcherConfig,
        tokens: impl TokenProvider + 'static,
    ) -> Result<Self> {
        let transport = ReqwestTransport::with_config(config.http.client_config())?;
        Ok(Self::builder(tokens)
            .hosts(config.hosts.clone())
            .throttle_shared(config.throttle.build())
            .pagination(config.pagination())
            .region(config.region_code.clone(), config.language_code.clone())
            .build(transport))
    }

    /// Start building a fetcher
    pub fn builder(tokens: impl TokenProvider + 'static) -> ListingFetcherBuilder {
        ListingFetcherBuilder {
            tokens: Arc::new(tokens),
            throttle: Arc::new(FixedInterval::default()),
            hosts: ApiHosts::default(),
            pagination: PaginationConfig::default(),
            region_code: "US".to_string(),
            language_code: "en".to_string(),
        }
    }

    /// Service hosts in use
    pub fn hosts(&self) -> &ApiHosts {
        &self.hosts
    }

    /// Default region for category and attribute lookups
    pub fn region_code(&self) -> &str {
        &self.region_code
    }

    /// Default language for category and attribute lookups
    pub fn language_code(&self) -> &str {
        &self.language_code
    }

    // ========================================================================
    // Primitives
    // ========================================================================

    /// Collect every page of a listing request
    pub async fn collect(&self, request: &PagedRequest) -> Result<Vec<JsonValue>> {
        collect_pages(&self.executor, self.throttle.as_ref(), request, &self.pagination).await
    }

    /// Issue one request and pause afterwards, whether it succeeded or not
    pub async fn fetch_one(&self, request: &RequestDescriptor) -> Result<JsonValue> {
        let result = self.executor.execute(request).await;
        self.throttle.pause().await;
        result
    }

    // ========================================================================
    // Account management
    // ========================================================================

    /// Every account visible to the credential
    pub async fn accounts(&self) -> Result<Vec<JsonValue>> {
        self.collect(&endpoints::accounts(&self.hosts)).await
    }

    // ========================================================================
    // Business information
    // ========================================================================

    /// Locations of one account
    pub async fn locations(&self, account: &str, filter: Option<&str>) -> Result<Vec<JsonValue>> {
        self.collect(&endpoints::locations(&self.hosts, account, filter))
            .await
    }

    /// Locations of every account, in account order
    pub async fn all_locations(&self) -> Result<Vec<JsonValue>> {
        let accounts = self.accounts().await?;
        let mut locations = Vec::new();

        for account in &accounts {
            let Some(name) = account.get("name").and_then(JsonValue::as_str) else {
                debug!(?account, "Skipping account without a name");
                continue;
            };
            locations.extend(self.locations(name, None).await?);
        }

        info!(
            accounts = accounts.len(),
            locations = locations.len(),
            "Collected locations across accounts"
        );
        Ok(locations)
    }

    /// Categories for the configured region and language
    pub async fn categories(&self, filter: Option<&str>) -> Result<Vec<JsonValue>> {
        self.categories_in(&self.region_code, &self.language_code, filter)
            .await
    }

    /// Categories for an explicit region and language
    pub async fn categories_in(
        &self,
        region_code: &str,
        language_code: &str,
        filter: Option<&str>,
    ) -> Result<Vec<JsonValue>> {
        self.collect(&endpoints::categories(
            &self.hosts,
            region_code,
            language_code,
            filter,
        ))
        .await
    }

    /// Attribute metadata available to an existing location
    pub async fn location_attribute_metadata(&self, location: &str) -> Result<Vec<JsonValue>> {
        self.attribute_metadata(&AttributeScope::Location(location.to_string()))
            .await
    }

    /// Attribute metadata available to a category in the configured region
    pub async fn category_attribute_metadata(&self, category: &str) -> Result<Vec<JsonValue>> {
        self.attribute_metadata(&AttributeScope::Category {
            category: category.to_string(),
            region_code: self.region_code.clone(),
            language_code: self.language_code.clone(),
        })
        .await
    }

    /// Attribute metadata for any scope
    pub async fn attribute_metadata(&self, scope: &AttributeScope) -> Result<Vec<JsonValue>> {
        self.collect(&endpoints::attribute_metadata(&self.hosts, scope))
            .await
    }

    /// Attribute values set on a location
    pub async fn location_attributes(&self, location: &str) -> Result<JsonValue> {
        self.fetch_one(&endpoints::location_attributes(&self.hosts, location))
            .await
    }

    /// Google-updated snapshot of a location
    pub async fn google_updated(&self, location: &str) -> Result<JsonValue> {
        self.fetch_one(&endpoints::google_updated(&self.hosts, location))
            .await
    }

    /// Chains matching a name
    pub async fn search_chains(&self, chain_name: &str) -> Result<JsonValue> {
        self.fetch_one(&endpoints::search_chains(&self.hosts, chain_name))
            .await
    }

    /// Google Maps locations matching a free-text query
    pub async fn search_google_locations(&self, query: &str) -> Result<JsonValue> {
        self.fetch_one(&endpoints::search_google_locations(&self.hosts, query))
            .await
    }

    // ========================================================================
    // Place actions
    // ========================================================================

    /// Action links of a location
    pub async fn place_action_links(&self, location: &str) -> Result<Vec<JsonValue>> {
        self.collect(&endpoints::place_action_links(&self.hosts, location))
            .await
    }

    // ========================================================================
    // Legacy v4
    // ========================================================================

    /// Insights for at most ten locations in one call
    ///
    /// Longer lists are forwarded unchanged; see [`Self::insights_batched`].
    pub async fn insights<S: AsRef<str>>(
        &self,
        account: &str,
        locations: &[S],
        range: &TimeRange,
    ) -> Result<JsonValue> {
        self.fetch_one(&endpoints::insights(&self.hosts, account, locations, range))
            .await
    }

    /// Insights for any number of locations, one call per ten
    pub async fn insights_batched<S: AsRef<str>>(
        &self,
        account: &str,
        locations: &[S],
        range: &TimeRange,
    ) -> Result<Vec<JsonValue>> {
        let mut responses = Vec::with_capacity(locations.len().div_ceil(MAX_INSIGHT_LOCATIONS));
        for chunk in locations.chunks(MAX_INSIGHT_LOCATIONS) {
            responses.push(self.insights(account, chunk, range).await?);
        }
        Ok(responses)
    }

    /// Local posts of a location
    pub async fn local_posts(&self, account: &str, location: &str) -> Result<Vec<JsonValue>> {
        self.collect(&endpoints::local_posts(&self.hosts, account, location))
            .await
    }

    /// Reviews of a location
    pub async fn reviews(&self, account: &str, location: &str) -> Result<Vec<JsonValue>> {
        self.collect(&endpoints::reviews(&self.hosts, account, location))
            .await
    }
}

impl std::fmt::Debug for ListingFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListingFetcher")
            .field("hosts", &self.hosts)
            .field("pagination", &self.pagination)
            .field("region_code", &self.region_code)
            .field("language_code", &self.language_code)
            .finish_non_exhaustive()
    }
}

/// Builder for [`ListingFetcher`]
pub struct ListingFetcherBuilder {
    tokens: Arc<dyn TokenProvider>,
    throttle: Arc<dyn Throttle>,
    hosts: ApiHosts,
    pagination: PaginationConfig,
    region_code: String,
    language_code: String,
}

impl ListingFetcherBuilder {
    /// Set the service hosts
    #[must_use]
    pub fn hosts(mut self, hosts: ApiHosts) -> Self {
        self.hosts = hosts;
        self
    }

    /// Set the pause policy
    #[must_use]
    pub fn throttle(self, throttle: impl Throttle + 'static) -> Self {
        self.throttle_shared(Arc::new(throttle))
    }

    /// Set an already shared pause policy
    #[must_use]
    pub fn throttle_shared(mut self, throttle: Arc<dyn Throttle>) -> Self {
        self.throttle = throttle;
        self
    }

    /// Set pagination bounds
    #[must_use]
    pub fn pagination(mut self, pagination: PaginationConfig) -> Self {
        self.pagination = pagination;
        self
    }

    /// Set the default region and language
    #[must_use]
    pub fn region(
        mut self,
        region_code: impl Into<String>,
        language_code: impl Into<String>,
    ) -> Self {
        self.region_code = region_code.into();
        self.language_code = language_code.into();
        self
    }

    /// Finish with the given transport
    pub fn build(self, transport: impl Transport + 'static) -> ListingFetcher {
        ListingFetcher {
            executor: RequestExecutor::from_shared(Arc::new(transport), self.tokens),
            throttle: self.throttle,
            hosts: self.hosts,
            pagination: self.pagination,
            region_code: self.region_code,
            language_code: self.language_code,
        }
    }
}
