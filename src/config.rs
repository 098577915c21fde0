use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    /// Recipe API connection settings
    #[serde(default)]
    pub api: ApiConfig,
    /// Search behaviour
    #[serde(default)]
    pub search: SearchConfig,
    /// Local persistence
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Connection settings for the recipe API
#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Base URL of the recipe API (no trailing slash)
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
        }
    }
}

/// Search request and presentation settings
#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    /// Number of results requested per search
    #[serde(default = "default_results_per_page")]
    pub results_per_page: u32,
    /// Number of placeholder cards shown while a search is loading
    #[serde(default = "default_skeleton_count")]
    pub skeleton_count: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            results_per_page: default_results_per_page(),
            skeleton_count: default_skeleton_count(),
        }
    }
}

/// Where the local key-value document lives
#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

// Default value functions
fn default_base_url() -> String {
    "https://api.spoonacular.com".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_results_per_page() -> u32 {
    12
}

fn default_skeleton_count() -> usize {
    6
}

fn default_storage_path() -> PathBuf {
    PathBuf::from("recipe-finder.json")
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_FINDER__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_FINDER__API__BASE_URL
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// See [`AppConfig::load`] for the source priority.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        // Use double underscore for nested: RECIPE_FINDER__SEARCH__RESULTS_PER_PAGE
        .add_source(
            Environment::with_prefix("RECIPE_FINDER")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
