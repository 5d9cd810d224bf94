//! CLI commands and argument parsing

use crate::auth::DEFAULT_TOKEN_ENV;
use crate::config::CONFIG_PATH_ENV;
use chrono::{DateTime, Utc};
use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

/// Business listing fetcher CLI
#[derive(Parser, Debug)]
#[command(name = "listing-fetcher")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML or JSON)
    #[arg(short = 'C', long, global = true, env = CONFIG_PATH_ENV)]
    pub config: Option<PathBuf>,

    /// Bearer token to use for every request
    #[arg(long, global = true, conflicts_with = "token_command")]
    pub token: Option<String>,

    /// Command printing a fresh token, run before every request
    /// (e.g. "gcloud auth print-access-token")
    #[arg(long, global = true)]
    pub token_command: Option<String>,

    /// Environment variable holding the token, read before every request
    #[arg(long, global = true, default_value = DEFAULT_TOKEN_ENV)]
    pub token_env: String,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List every account
    Accounts,

    /// List the locations of one account
    Locations {
        /// Account resource name (accounts/123)
        #[arg(long)]
        account: String,

        /// Location filter expression
        #[arg(long)]
        filter: Option<String>,
    },

    /// List the locations of every account
    AllLocations,

    /// List business categories
    Categories {
        /// Region code (defaults to config)
        #[arg(long)]
        region: Option<String>,

        /// Language code (defaults to config)
        #[arg(long)]
        language: Option<String>,

        /// Category filter expression
        #[arg(long)]
        filter: Option<String>,
    },

    /// List attribute metadata for a location or a category
    #[command(group(ArgGroup::new("scope").required(true).args(["location", "category"])))]
    Attributes {
        /// Location resource name (locations/456)
        #[arg(long)]
        location: Option<String>,

        /// Category name (categories/gcid:...)
        #[arg(long)]
        category: Option<String>,
    },

    /// Show the attribute values set on a location
    LocationAttributes {
        #[arg(long)]
        location: String,
    },

    /// Show the Google-updated snapshot of a location
    GoogleUpdated {
        #[arg(long)]
        location: String,
    },

    /// Search chains by name
    SearchChains {
        /// Chain name
        name: String,
    },

    /// Search Google Maps locations
    SearchLocations {
        /// Free-text query
        query: String,
    },

    /// List place action links of a location
    PlaceActions {
        #[arg(long)]
        location: String,
    },

    /// List local posts of a location (legacy v4)
    Posts {
        #[arg(long)]
        account: String,

        #[arg(long)]
        location: String,
    },

    /// List reviews of a location (legacy v4)
    Reviews {
        #[arg(long)]
        account: String,

        #[arg(long)]
        location: String,
    },

    /// Report basic insights (legacy v4), batched ten locations per call
    Insights {
        #[arg(long)]
        account: String,

        /// Location ids, comma-separated (locations/1,locations/2)
        #[arg(long, value_delimiter = ',', required = true)]
        locations: Vec<String>,

        /// Start of the window (RFC 3339)
        #[arg(long)]
        start: DateTime<Utc>,

        /// End of the window (RFC 3339)
        #[arg(long)]
        end: DateTime<Utc>,
    },
}
