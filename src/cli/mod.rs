//! CLI module
//!
//! Command-line interface over [`ListingFetcher`](crate::fetcher::ListingFetcher).
//! Every command prints one JSON document on stdout.
//!
//! # Commands
//!
//! - `accounts`, `locations`, `all-locations` - account and location listings
//! - `categories`, `attributes`, `location-attributes`, `google-updated` - business information
//! - `search-chains`, `search-locations` - search endpoints
//! - `place-actions` - place action links
//! - `posts`, `reviews`, `insights` - legacy v4 service

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::{Runner, TokenSource};
