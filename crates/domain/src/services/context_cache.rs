//! Per-host cache of resolved contexts.
//!
//! Each lookup takes a [`CacheTicket`] carrying the cache epoch before it
//! reads the store. [`ContextCache::invalidate`] bumps the epoch, so results
//! of lookups that started before an admin change are discarded instead of
//! overwriting newer state. Failed resolutions are never cached.
//!
//! Hosts without a mapping all share one stored default-template context;
//! the per-host entry only records that the host fell back. The number of
//! per-host entries is capped, and hosts beyond the cap are resolved
//! without being cached.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use crate::errors::ResolutionError;
use crate::models::domain_mapping::normalize_host;
use crate::models::{ResolutionSource, ResolvedContext};
use crate::services::template_resolution::TemplateResolver;

/// Default cap on cached hosts.
pub const DEFAULT_MAX_CACHED_HOSTS: usize = 10_000;

#[derive(Debug, Clone)]
enum CachedResolution {
    Mapped(ResolvedContext),
    /// Served from the shared default-template context.
    Default,
}

#[derive(Debug, Clone)]
struct CachedHost {
    resolution: CachedResolution,
    stored_at: Instant,
}

#[derive(Debug, Clone)]
struct CachedDefault {
    context: ResolvedContext,
    stored_at: Instant,
}

#[derive(Debug, Default)]
struct CacheEntries {
    hosts: HashMap<String, CachedHost>,
    default: Option<CachedDefault>,
}

/// Epoch observed when a lookup started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheTicket {
    epoch: u64,
}

/// Whether a context was served from the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Miss,
}

#[derive(Debug)]
pub struct ContextCache {
    entries: RwLock<CacheEntries>,
    epoch: AtomicU64,
    ttl: Duration,
    max_hosts: usize,
}

impl ContextCache {
    /// A zero `ttl` disables caching.
    pub fn new(ttl: Duration) -> Self {
        Self::with_max_hosts(ttl, DEFAULT_MAX_CACHED_HOSTS)
    }

    /// Caches at most `max_hosts` hosts. Zero disables caching.
    pub fn with_max_hosts(ttl: Duration, max_hosts: usize) -> Self {
        Self {
            entries: RwLock::new(CacheEntries::default()),
            epoch: AtomicU64::new(0),
            ttl,
            max_hosts,
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero() && self.max_hosts > 0
    }

    pub fn max_hosts(&self) -> usize {
        self.max_hosts
    }

    fn key(raw_host: &str) -> String {
        normalize_host(raw_host).unwrap_or_default()
    }

    fn is_fresh(&self, stored_at: Instant) -> bool {
        stored_at.elapsed() < self.ttl
    }

    pub fn ticket(&self) -> CacheTicket {
        CacheTicket {
            epoch: self.epoch.load(Ordering::SeqCst),
        }
    }

    pub async fn get(&self, raw_host: &str) -> Option<ResolvedContext> {
        if !self.is_enabled() {
            return None;
        }
        let key = Self::key(raw_host);
        let entries = self.entries.read().await;
        let cached = entries.hosts.get(&key).filter(|c| self.is_fresh(c.stored_at))?;

        match &cached.resolution {
            CachedResolution::Mapped(context) => Some(context.clone()),
            CachedResolution::Default => {
                let default = entries
                    .default
                    .as_ref()
                    .filter(|d| self.is_fresh(d.stored_at))?;
                let mut context = default.context.clone();
                context.host = key;
                Some(context)
            }
        }
    }

    /// Stores `context` unless the cache was invalidated since `ticket`.
    ///
    /// Returns `true` if the host was recorded. A new host is refused once
    /// the cache holds `max_hosts` hosts.
    pub async fn store(
        &self,
        ticket: CacheTicket,
        raw_host: &str,
        context: ResolvedContext,
    ) -> bool {
        if !self.is_enabled() {
            return false;
        }
        let key = Self::key(raw_host);
        let mut entries = self.entries.write().await;
        if self.epoch.load(Ordering::SeqCst) != ticket.epoch {
            tracing::debug!(host = raw_host, "Discarding stale resolution");
            return false;
        }

        let now = Instant::now();
        let resolution = match context.source {
            ResolutionSource::DomainMapping => CachedResolution::Mapped(context),
            ResolutionSource::DefaultTemplate => {
                entries.default = Some(CachedDefault {
                    context,
                    stored_at: now,
                });
                CachedResolution::Default
            }
        };

        if entries.hosts.len() >= self.max_hosts && !entries.hosts.contains_key(&key) {
            tracing::debug!(host = %key, max_hosts = self.max_hosts, "Context cache full");
            return false;
        }
        entries.hosts.insert(
            key,
            CachedHost {
                resolution,
                stored_at: now,
            },
        );
        true
    }

    /// Drops every entry and rejects lookups still in flight.
    pub async fn invalidate(&self) {
        let mut entries = self.entries.write().await;
        self.epoch.fetch_add(1, Ordering::SeqCst);
        entries.hosts.clear();
        entries.default = None;
    }

    /// Drops expired entries. Returns how many hosts were removed.
    pub async fn prune_expired(&self) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.hosts.len();
        entries.hosts.retain(|_, cached| cached.stored_at.elapsed() < self.ttl);
        if entries
            .default
            .as_ref()
            .is_some_and(|d| d.stored_at.elapsed() >= self.ttl)
        {
            entries.default = None;
        }
        before - entries.hosts.len()
    }

    /// Number of cached hosts.
    pub async fn len(&self) -> usize {
        self.entries.read().await.hosts.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Serves `raw_host` from the cache or resolves and caches it.
    pub async fn get_or_resolve(
        &self,
        resolver: &TemplateResolver,
        raw_host: &str,
    ) -> Result<(ResolvedContext, CacheStatus), ResolutionError> {
        if let Some(context) = self.get(raw_host).await {
            return Ok((context, CacheStatus::Hit));
        }

        let ticket = self.ticket();
        let context = resolver.resolve(raw_host).await?;
        self.store(ticket, raw_host, context.clone()).await;
        Ok((context, CacheStatus::Miss))
    }
}
