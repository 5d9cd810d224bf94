//! Token provider implementations

use crate::error::{Error, Result};
use std::process::Command;
use tracing::debug;

/// Environment variable read by the CLI when no other token source is given
pub const DEFAULT_TOKEN_ENV: &str = "LISTING_FETCHER_TOKEN";

/// Zero-argument source of bearer tokens
///
/// Called once per request. Implementations must return a token that stays
/// valid for the duration of that single call.
pub trait TokenProvider: Send + Sync {
    /// Return the current bearer token
    fn token(&self) -> Result<String>;
}

impl<F> TokenProvider for F
where
    F: Fn() -> Result<String> + Send + Sync,
{
    fn token(&self) -> Result<String> {
        self()
    }
}

/// Fixed token, mostly useful for tests and short scripts
#[derive(Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl TokenProvider for StaticToken {
    fn token(&self) -> Result<String> {
        non_empty(self.0.clone(), "static token is empty")
    }
}

impl std::fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("StaticToken").field(&"<redacted>").finish()
    }
}

/// Reads the token from an environment variable on every call
#[derive(Debug, Clone)]
pub struct EnvToken {
    var: String,
}

impl EnvToken {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }

    /// Name of the variable being read
    pub fn var(&self) -> &str {
        &self.var
    }
}

impl Default for EnvToken {
    fn default() -> Self {
        Self::new(DEFAULT_TOKEN_ENV)
    }
}

impl TokenProvider for EnvToken {
    fn token(&self) -> Result<String> {
        let value = std::env::var(&self.var)
            .map_err(|_| Error::auth(format!("environment variable {} is not set", self.var)))?;
        non_empty(
            value.trim().to_string(),
            &format!("environment variable {} is empty", self.var),
        )
    }
}

/// Runs an external command and uses its trimmed stdout as the token
///
/// e.g. `gcloud auth print-access-token`. The command is run on every call.
#[derive(Debug, Clone)]
pub struct CommandToken {
    program: String,
    args: Vec<String>,
}

impl CommandToken {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Split a command line on whitespace into program and arguments
    pub fn parse(command_line: &str) -> Result<Self> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts
            .next()
            .ok_or_else(|| Error::config("token command is empty"))?;
        Ok(Self::new(program, parts.collect()))
    }
}

impl TokenProvider for CommandToken {
    fn token(&self) -> Result<String> {
        debug!(program = %self.program, "Fetching token from command");
        let output = Command::new(&self.program)
            .args(&self.args)
            .output()
            .map_err(|e| Error::auth(format!("failed to run {}: {e}", self.program)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::auth(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        non_empty(
            stdout.trim().to_string(),
            &format!("{} printed no token", self.program),
        )
    }
}

fn non_empty(token: String, message: &str) -> Result<String> {
    if token.is_empty() {
        Err(Error::auth(message))
    } else {
        Ok(token)
    }
}
