use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// SQLite database connection URL
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Kinopoisk Unofficial API key
    pub kinopoisk_api_key: String,

    /// Kinopoisk Unofficial API base URL
    #[serde(default = "default_kinopoisk_api_url")]
    pub kinopoisk_api_url: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Timeout for catalog API calls, in seconds
    #[serde(default = "default_catalog_timeout_secs")]
    pub catalog_timeout_secs: u64,

    /// Release year used for genre-based candidate searches
    #[serde(default = "default_search_year")]
    pub search_year: i32,
}

fn default_database_url() -> String {
    "sqlite:cinematch.db".to_string()
}

fn default_kinopoisk_api_url() -> String {
    "https://kinopoiskapiunofficial.tech".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_catalog_timeout_secs() -> u64 {
    10
}

fn default_search_year() -> i32 {
    2026
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
