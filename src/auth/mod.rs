//! Authentication module
//!
//! Supplies the bearer token for each request. The token is always
//! obtained fresh from a [`TokenProvider`]; nothing is cached here, so a
//! long pagination run picks up normal token rotation.
//!
//! Providers: static token, environment variable, external command, or any
//! closure returning `Result<String>`.

mod provider;

pub use provider::{CommandToken, EnvToken, StaticToken, TokenProvider, DEFAULT_TOKEN_ENV};
