use std::{path::PathBuf, time::Duration};

use catalog_client::CatalogConfig;
use utils::assets::{StaticUrl, static_dir, static_url_prefix};

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_SEARCH_CACHE_TTL_SECS: u64 = 5;

/// Process-wide settings, read once at startup
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory served under `static_url`
    pub static_root: PathBuf,
    pub static_url: StaticUrl,
    pub catalog: CatalogConfig,
    /// How long a rendered search page is reused
    pub search_cache_ttl: Duration,
    /// Fixed seed for sample selection; random per request when unset
    pub selection_seed: Option<u64>,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.trim().parse::<u16>().ok())
            .unwrap_or_else(|| {
                tracing::info!("No valid PORT set, using {}", DEFAULT_PORT);
                DEFAULT_PORT
            });

        let search_cache_ttl = std::env::var("SEARCH_CACHE_TTL_SECS")
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_SEARCH_CACHE_TTL_SECS);

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port,
            static_root: static_dir(),
            static_url: StaticUrl::new(static_url_prefix()),
            catalog: CatalogConfig::from_env(),
            search_cache_ttl: Duration::from_secs(search_cache_ttl),
            selection_seed: std::env::var("MOODWAVE_SELECTION_SEED")
                .ok()
                .and_then(|s| s.trim().parse().ok()),
        }
    }

    /// Config rooted at `static_root` with no catalog credentials
    pub fn for_static_root(static_root: impl Into<PathBuf>) -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0,
            static_root: static_root.into(),
            static_url: StaticUrl::default(),
            catalog: CatalogConfig::default(),
            search_cache_ttl: Duration::from_secs(DEFAULT_SEARCH_CACHE_TTL_SECS),
            selection_seed: None,
        }
    }
}
