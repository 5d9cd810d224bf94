// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Listing Fetcher
//!
//! Enumerates and retrieves business listing data from the account
//! management, business information, place actions and legacy v4 REST
//! services.
//!
//! ## Features
//!
//! - **Page-token pagination**: follows `nextPageToken` to the end and
//!   concatenates one item field per page, with a safety bound
//! - **Throttling**: fixed 1s pause after every call by default, or a
//!   governor token bucket
//! - **Fresh credentials**: the bearer token is requested from a
//!   [`TokenProvider`](auth::TokenProvider) before every call
//! - **No hidden recovery**: non-200 responses surface as
//!   [`Error::Request`] and abort the whole collection
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use listing_fetcher::{auth::EnvToken, ListingFetcher, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let fetcher = ListingFetcher::new(EnvToken::default())?;
//!
//!     for account in fetcher.accounts().await? {
//!         let name = account["name"].as_str().unwrap_or_default();
//!         let locations = fetcher.locations(name, None).await?;
//!         println!("{name}: {} locations", locations.len());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! caller ──► ListingFetcher ──► endpoints::* ──► collect_pages ──► RequestExecutor ──► Transport
//!                                  (PagedRequest /       │               │
//!                                   RequestDescriptor)   └── Throttle    └── TokenProvider
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Bearer token providers
pub mod auth;

/// Transport, request executor and throttling
pub mod http;

/// Page-token pagination loop
pub mod pagination;

/// Per-resource endpoint builders
pub mod endpoints;

/// Configuration loading
pub mod config;

/// High-level client
pub mod fetcher;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use fetcher::{ListingFetcher, ListingFetcherBuilder};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
