//! Target configuration for contract runs.
//!
//! This module describes the service under test: where it listens, where
//! its GraphQL companion lives, and how long the client waits for it.
//! Configuration can come from command line arguments, environment
//! variables, or be built programmatically.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `COVENANT_BASE_URL` | http://localhost:3000 | Base URL of the service under test |
//! | `COVENANT_GRAPHQL_URL` | https://countries.trevorblades.com/ | GraphQL endpoint URL |
//! | `COVENANT_TIMEOUT_SECS` | 30 | HTTP client timeout (seconds) |
//! | `COVENANT_API_KEY` | (none) | API key for key-protected endpoints |
//! | `COVENANT_LOG_LEVEL` | info | Log level |
//!
//! # Example
//!
//! ```rust
//! use covenant_contract::TargetConfig;
//!
//! // Create from environment
//! let config = TargetConfig::from_env();
//!
//! // Or create programmatically
//! let config = TargetConfig {
//!     base_url: "http://localhost:8080".to_string(),
//!     ..Default::default()
//! };
//! ```

use clap::Parser;

/// Describes the service a contract run is pointed at.
///
/// This struct can be constructed from environment variables using
/// [`TargetConfig::from_env`], from command line arguments using
/// [`TargetConfig::parse`], or programmatically.
#[derive(Debug, Clone, Parser)]
#[command(name = "covenant")]
#[command(about = "HTTP contract verification target")]
pub struct TargetConfig {
    /// Base URL of the service under test.
    #[arg(
        long,
        env = "COVENANT_BASE_URL",
        default_value = "http://localhost:3000"
    )]
    pub base_url: String,

    /// URL of the GraphQL endpoint (a separate host in most deployments).
    #[arg(
        long,
        env = "COVENANT_GRAPHQL_URL",
        default_value = "https://countries.trevorblades.com/"
    )]
    pub graphql_url: String,

    /// HTTP client timeout in seconds.
    ///
    /// A hung call blocks until this elapses; the engine itself performs
    /// no cancellation.
    #[arg(long, env = "COVENANT_TIMEOUT_SECS", default_value = "30")]
    pub timeout_secs: u64,

    /// API key for key-protected endpoints.
    #[arg(long, env = "COVENANT_API_KEY")]
    pub api_key: Option<String>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "COVENANT_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            graphql_url: "https://countries.trevorblades.com/".to_string(),
            timeout_secs: 30,
            api_key: None,
            log_level: "info".to_string(),
        }
    }
}

impl TargetConfig {
    /// Creates a new TargetConfig from environment variables.
    ///
    /// This is a convenience method that parses environment variables
    /// without requiring command line arguments.
    pub fn from_env() -> Self {
        // Try to parse from environment, falling back to defaults
        Self::try_parse().unwrap_or_default()
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if url::Url::parse(&self.base_url).is_err() {
            errors.push(format!("Base URL is not a valid URL: {}", self.base_url));
        }

        if url::Url::parse(&self.graphql_url).is_err() {
            errors.push(format!(
                "GraphQL URL is not a valid URL: {}",
                self.graphql_url
            ));
        }

        if self.timeout_secs == 0 {
            errors.push("Timeout cannot be 0".to_string());
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Creates a configuration pointed at a test service.
    ///
    /// Both the REST and GraphQL URLs are set to `base_url`; tests hosting
    /// GraphQL elsewhere override [`TargetConfig::graphql_url`] afterwards.
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            graphql_url: base_url.to_string(),
            timeout_secs: 5, // Shorter timeout for tests
            api_key: None,
            log_level: "debug".to_string(),
        }
    }
}
