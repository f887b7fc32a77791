use std::{path::PathBuf, sync::Arc};

use catalog_client::{CatalogClient, CatalogClientError};
use rand::rngs::StdRng;
use studio::{RandomChooser, Studio};
use utils::assets::StaticUrl;

use crate::{cache::SearchCache, config::ServerConfig};

/// Shared, read-only handles passed to every handler
#[derive(Clone)]
pub struct AppState {
    pub studio: Arc<Studio>,
    pub catalog: CatalogClient,
    pub search_cache: SearchCache,
    pub static_url: StaticUrl,
    pub static_root: PathBuf,
    selection_seed: Option<u64>,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> Result<Self, CatalogClientError> {
        Ok(Self {
            studio: Arc::new(Studio::with_defaults(&config.static_root)),
            catalog: CatalogClient::new(config.catalog.clone())?,
            search_cache: SearchCache::new(config.search_cache_ttl),
            static_url: config.static_url.clone(),
            static_root: config.static_root.clone(),
            selection_seed: config.selection_seed,
        })
    }

    /// Fresh chooser for one request
    pub fn chooser(&self) -> RandomChooser<StdRng> {
        match self.selection_seed {
            Some(seed) => RandomChooser::seeded(seed),
            None => RandomChooser::from_entropy(),
        }
    }
}
