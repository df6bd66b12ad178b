use anyhow::Result;
use moka::future::Cache;
use sea_orm::Database;
use std::time::Duration;
use tracing::{debug, info};
use crate::schemas::AppState;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://assetrust.db?mode=rwc";
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Runtime settings collected from the command line and the environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    /// How long a cached schedule stays valid
    pub cache_ttl: Duration,
    /// Upper bound for a single HTTP request
    pub request_timeout: Duration,
}

impl AppConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    pub fn with_cache_ttl_secs(mut self, secs: u64) -> Self {
        self.cache_ttl = Duration::from_secs(secs);
        self
    }

    pub fn with_request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout = Duration::from_secs(secs);
        self
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATABASE_URL)
    }
}

/// Initialize application state from the given configuration
pub async fn initialize_app_state(config: &AppConfig) -> Result<AppState> {
    // Connect to database
    info!("Connecting to database: {}", config.database_url);
    let db = Database::connect(&config.database_url).await?;

    // Initialize cache
    debug!("Schedule cache TTL: {:?}", config.cache_ttl);
    let cache = Cache::builder()
        .max_capacity(1000)
        .time_to_live(config.cache_ttl)
        .build();

    Ok(AppState {
        db,
        cache,
        today: None,
        request_timeout: config.request_timeout,
    })
}
