//! Request executor
//!
//! One authenticated call per invocation: fetch a fresh token, send, check
//! for 200, parse JSON. No retries.

use super::transport::{Transport, TransportRequest};
use crate::auth::TokenProvider;
use crate::error::{Error, Result};
use crate::types::{JsonValue, RequestDescriptor};
use std::sync::Arc;
use tracing::debug;

/// Executes single requests against the upstream
#[derive(Clone)]
pub struct RequestExecutor {
    transport: Arc<dyn Transport>,
    tokens: Arc<dyn TokenProvider>,
}

impl RequestExecutor {
    /// Create an executor from a transport and a token provider
    pub fn new(transport: impl Transport + 'static, tokens: impl TokenProvider + 'static) -> Self {
        Self {
            transport: Arc::new(transport),
            tokens: Arc::new(tokens),
        }
    }

    /// Create an executor from already shared collaborators
    pub fn from_shared(transport: Arc<dyn Transport>, tokens: Arc<dyn TokenProvider>) -> Self {
        Self { transport, tokens }
    }

    /// Perform one call and return the parsed JSON body
    ///
    /// Any status other than 200 becomes [`Error::Request`] carrying the
    /// status and raw body. A 200 with an empty body yields `Null`.
    pub async fn execute(&self, request: &RequestDescriptor) -> Result<JsonValue> {
        if request.uri.is_empty() {
            return Err(Error::config("request URI is empty"));
        }

        let token = self.tokens.token()?;
        let transport_request = TransportRequest {
            uri: request.uri.clone(),
            method: request.method,
            headers: vec![
                ("Authorization".to_string(), format!("Bearer {token}")),
                ("Content-Type".to_string(), "application/json".to_string()),
            ],
            body: request.body(),
        };

        debug!(method = %request.method, uri = %request.uri, "Sending request");
        let response = self.transport.send(transport_request).await?;
        debug!(status = response.status, uri = %request.uri, "Received response");

        if response.status != 200 {
            return Err(Error::request(response.status, response.body));
        }

        if response.body.trim().is_empty() {
            return Ok(JsonValue::Null);
        }

        Ok(serde_json::from_str(&response.body)?)
    }
}

impl std::fmt::Debug for RequestExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestExecutor").finish_non_exhaustive()
    }
}
