//! Evicts expired host resolutions from the context cache.

use std::sync::Arc;

use domain::services::ContextCache;

use super::scheduler::{Job, JobFrequency};

pub struct ContextCachePruneJob {
    cache: Arc<ContextCache>,
}

impl ContextCachePruneJob {
    pub fn new(cache: Arc<ContextCache>) -> Self {
        Self { cache }
    }
}

#[async_trait::async_trait]
impl Job for ContextCachePruneJob {
    fn name(&self) -> &'static str {
        "context_cache_prune"
    }

    fn frequency(&self) -> JobFrequency {
        JobFrequency::Minutes(1)
    }

    async fn execute(&self) -> anyhow::Result<()> {
        let removed = self.cache.prune_expired().await;
        if removed > 0 {
            tracing::debug!(removed, "Pruned expired host resolutions");
        }
        metrics::gauge!("context_cache_entries").set(self.cache.len().await as f64);
        Ok(())
    }
}
