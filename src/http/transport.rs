//! Transport abstraction and the reqwest-backed default
//!
//! The transport performs exactly one HTTP exchange and reports the status
//! and raw body. It never inspects the status itself; that is the
//! executor's job. Connections, TLS and redirects live here.

use crate::error::Result;
use crate::types::Method;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::trace;

/// A fully prepared HTTP exchange
#[derive(Debug, Clone)]
pub struct TransportRequest {
    /// Absolute URI
    pub uri: String,
    /// HTTP method
    pub method: Method,
    /// Header name/value pairs, sent in order
    pub headers: Vec<(String, String)>,
    /// Serialized body, if any
    pub body: Option<String>,
}

/// Status and raw text body of an HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Performs a single HTTP exchange
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the request and return whatever the server answered
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse>;
}

/// Configuration for the reqwest transport
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: format!("listing-fetcher/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// Transport backed by a shared `reqwest::Client`
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
    config: HttpClientConfig,
}

impl ReqwestTransport {
    /// Create a transport with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a transport with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self { client, config })
    }

    /// Wrap an existing client
    pub fn from_client(client: Client) -> Self {
        Self {
            client,
            config: HttpClientConfig::default(),
        }
    }

    /// Get the underlying reqwest client
    pub fn inner(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse> {
        let mut req = self.client.request(request.method.into(), &request.uri);

        for (key, value) in &request.headers {
            req = req.header(key.as_str(), value.as_str());
        }

        if let Some(body) = request.body {
            req = req.body(body);
        }

        let response = req.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        trace!(status, bytes = body.len(), "Transport exchange complete");

        Ok(TransportResponse { status, body })
    }
}

impl std::fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestTransport")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
