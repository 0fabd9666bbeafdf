//! Background job scheduler and job implementations.

mod cache_prune;
mod pool_metrics;
mod scheduler;

pub use cache_prune::ContextCachePruneJob;
pub use pool_metrics::PoolMetricsJob;
pub use scheduler::{Job, JobFrequency, JobScheduler};
