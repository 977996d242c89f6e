//! Configuration types for newsdesk

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Article feed configuration (endpoint, query, HTTP client settings)
///
/// Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Feed search endpoint (default: the public Algolia-style news search API)
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Search query sent on every fetch (default: "android")
    #[serde(default = "default_query")]
    pub query: String,

    /// Maximum number of items requested per fetch (default: 20)
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// HTTP request timeout (default: 30 seconds)
    #[serde(default = "default_request_timeout")]
    pub request_timeout: Duration,

    /// User-Agent header sent to the feed endpoint
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            query: default_query(),
            page_size: default_page_size(),
            request_timeout: default_request_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

/// Persistence configuration (database location)
///
/// Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PersistenceConfig {
    /// Path to the SQLite database file (default: "./newsdesk.db")
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

/// Main configuration for the article store
///
/// Fields are organized into logical sub-configs:
/// - [`source`](SourceConfig) — feed endpoint and HTTP client settings
/// - [`persistence`](PersistenceConfig) — database location
///
/// `Config::default()` works out of the box.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Article feed settings
    #[serde(default)]
    pub source: SourceConfig,

    /// Persistence settings
    #[serde(default)]
    pub persistence: PersistenceConfig,
}

fn default_endpoint() -> String {
    "https://hn.algolia.com/api/v1/search_by_date".to_string()
}

fn default_query() -> String {
    "android".to_string()
}

fn default_page_size() -> u32 {
    20
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_user_agent() -> String {
    concat!("newsdesk/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_database_path() -> PathBuf {
    PathBuf::from("./newsdesk.db")
}
