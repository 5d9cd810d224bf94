//! CLI runner - executes commands

use crate::auth::{CommandToken, EnvToken, StaticToken, TokenProvider};
use crate::cli::commands::{Cli, Commands};
use crate::config::FetcherConfig;
use crate::endpoints::TimeRange;
use crate::error::{Error, Result};
use crate::fetcher::ListingFetcher;
use serde_json::Value;

/// Where the CLI gets its bearer token from
#[derive(Debug, Clone)]
pub enum TokenSource {
    Static(StaticToken),
    Command(CommandToken),
    Env(EnvToken),
}

impl TokenProvider for TokenSource {
    fn token(&self) -> Result<String> {
        match self {
            TokenSource::Static(p) => p.token(),
            TokenSource::Command(p) => p.token(),
            TokenSource::Env(p) => p.token(),
        }
    }
}

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command and print its result
    pub async fn run(&self) -> Result<()> {
        let fetcher = ListingFetcher::from_config(&self.load_config()?, self.token_source()?)?;
        let output = self.execute(&fetcher).await?;
        println!("{}", self.render(&output)?);
        Ok(())
    }

    /// Load the config file (if any) and apply environment overrides
    fn load_config(&self) -> Result<FetcherConfig> {
        let config = match &self.cli.config {
            Some(path) => FetcherConfig::from_file(path)?,
            None => FetcherConfig::default(),
        };
        config.with_env_overrides()
    }

    /// Pick the token source from the flags
    pub fn token_source(&self) -> Result<TokenSource> {
        if let Some(token) = &self.cli.token {
            return Ok(TokenSource::Static(StaticToken::new(token.clone())));
        }
        if let Some(command) = &self.cli.token_command {
            return Ok(TokenSource::Command(CommandToken::parse(command)?));
        }
        Ok(TokenSource::Env(EnvToken::new(self.cli.token_env.clone())))
    }

    /// Dispatch the subcommand
    pub async fn execute(&self, fetcher: &ListingFetcher) -> Result<Value> {
        match &self.cli.command {
            Commands::Accounts => fetcher.accounts().await.map(Value::Array),
            Commands::Locations { account, filter } => fetcher
                .locations(account, filter.as_deref())
                .await
                .map(Value::Array),
            Commands::AllLocations => fetcher.all_locations().await.map(Value::Array),
            Commands::Categories {
                region,
                language,
                filter,
            } => {
                let items = fetcher
                    .categories_in(
                        region.as_deref().unwrap_or(fetcher.region_code()),
                        language.as_deref().unwrap_or(fetcher.language_code()),
                        filter.as_deref(),
                    )
                    .await?;
                Ok(Value::Array(items))
            }
            Commands::Attributes { location, category } => {
                let items = match (location, category) {
                    (Some(location), _) => fetcher.location_attribute_metadata(location).await?,
                    (None, Some(category)) => {
                        fetcher.category_attribute_metadata(category).await?
                    }
                    (None, None) => {
                        return Err(Error::config("either --location or --category is required"))
                    }
                };
                Ok(Value::Array(items))
            }
            Commands::LocationAttributes { location } => {
                fetcher.location_attributes(location).await
            }
            Commands::GoogleUpdated { location } => fetcher.google_updated(location).await,
            Commands::SearchChains { name } => fetcher.search_chains(name).await,
            Commands::SearchLocations { query } => fetcher.search_google_locations(query).await,
            Commands::PlaceActions { location } => fetcher
                .place_action_links(location)
                .await
                .map(Value::Array),
            Commands::Posts { account, location } => fetcher
                .local_posts(account, location)
                .await
                .map(Value::Array),
            Commands::Reviews { account, location } => {
                fetcher.reviews(account, location).await.map(Value::Array)
            }
            Commands::Insights {
                account,
                locations,
                start,
                end,
            } => {
                if end < start {
                    return Err(Error::config("--end must not be before --start"));
                }
                let range = TimeRange::new(*start, *end);
                fetcher
                    .insights_batched(account, locations.as_slice(), &range)
                    .await
                    .map(Value::Array)
            }
        }
    }

    fn render(&self, value: &Value) -> Result<String> {
        let rendered = if self.cli.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(rendered)
    }
}
