use std::{sync::Arc, time::Duration};

use catalog_client::TrackSummary;
use moka::future::Cache;

const MAX_ENTRIES: u64 = 256;

/// Short-lived cache of search results, keyed on the normalized query
#[derive(Clone)]
pub struct SearchCache {
    cache: Cache<String, Arc<Vec<TrackSummary>>>,
}

impl SearchCache {
    pub fn new(ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(MAX_ENTRIES)
            .time_to_live(ttl)
            .build();
        Self { cache }
    }

    /// Case and surrounding whitespace do not change the results
    pub fn key(query: &str) -> String {
        query.trim().to_lowercase()
    }

    pub async fn get(&self, query: &str) -> Option<Arc<Vec<TrackSummary>>> {
        self.cache.get(&Self::key(query)).await
    }

    pub async fn put(&self, query: &str, results: Vec<TrackSummary>) -> Arc<Vec<TrackSummary>> {
        let results = Arc::new(results);
        self.cache.insert(Self::key(query), results.clone()).await;
        results
    }
}
