//! Records connection pool gauges and flags pool exhaustion.

use sqlx::PgPool;

use super::scheduler::{Job, JobFrequency};

pub struct PoolMetricsJob {
    pool: PgPool,
}

impl PoolMetricsJob {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Every connection is open and busy; site requests will queue for one.
fn pool_exhausted(size: u32, idle: usize, max_connections: u32) -> bool {
    size >= max_connections && idle == 0
}

#[async_trait::async_trait]
impl Job for PoolMetricsJob {
    fn name(&self) -> &'static str {
        "pool_metrics"
    }

    fn frequency(&self) -> JobFrequency {
        JobFrequency::Seconds(10)
    }

    async fn execute(&self) -> anyhow::Result<()> {
        persistence::metrics::record_pool_metrics(&self.pool);

        let max_connections = self.pool.options().get_max_connections();
        if pool_exhausted(self.pool.size(), self.pool.num_idle(), max_connections) {
            tracing::warn!(max_connections, "Database pool exhausted");
        }
        Ok(())
    }
}
