//! Common types used throughout the listing fetcher
//!
//! Shared type aliases and the request descriptor handed to the executor.

use serde::{Deserialize, Serialize};

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

// ============================================================================
// HTTP Types
// ============================================================================

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    GET,
    POST,
}

impl Method {
    /// Upper-case method name as sent on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::GET => reqwest::Method::GET,
            Method::POST => reqwest::Method::POST,
        }
    }
}

// ============================================================================
// Request Descriptor
// ============================================================================

/// One call against the upstream: endpoint, method and optional payload
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    /// Absolute endpoint URI
    pub uri: String,
    /// HTTP method
    pub method: Method,
    /// JSON payload, sent only for non-GET methods
    pub payload: Option<JsonValue>,
}

impl RequestDescriptor {
    /// Create a GET descriptor
    pub fn get(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            method: Method::GET,
            payload: None,
        }
    }

    /// Create a POST descriptor with a JSON payload
    pub fn post(uri: impl Into<String>, payload: JsonValue) -> Self {
        Self {
            uri: uri.into(),
            method: Method::POST,
            payload: Some(payload),
        }
    }

    /// Serialized body, if one should be sent
    ///
    /// GET never carries a body, and neither does a missing or `null` payload.
    pub fn body(&self) -> Option<String> {
        if self.method == Method::GET {
            return None;
        }
        match &self.payload {
            None | Some(JsonValue::Null) => None,
            Some(payload) => Some(payload.to_string()),
        }
    }
}
