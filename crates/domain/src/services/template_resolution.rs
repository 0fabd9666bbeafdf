//! Domain lookup: resolves a request host to its template and configuration.
//!
//! Resolution order:
//! 1. Active domain mapping whose full domain equals the host
//! 2. The default template (lowest `created_at`, then `id`, if several)
//!
//! Soft-deleted templates never match. With neither a mapping nor a default
//! the lookup fails with [`ResolutionError::NotConfigured`].

use std::sync::Arc;

use tracing::{debug, warn};

use crate::errors::ResolutionError;
use crate::models::domain_mapping::normalize_host;
use crate::models::{ResolutionSource, ResolvedContext, Template};
use crate::services::template_config::load_template_config;
use crate::store::SiteStore;

/// Picks the default template deterministically.
///
/// Deleted templates are ignored. When more than one default remains the
/// oldest wins, ties broken by id.
pub fn select_default_template(candidates: Vec<Template>) -> Option<Template> {
    let live: Vec<Template> = candidates.into_iter().filter(|t| !t.is_deleted()).collect();

    if live.len() > 1 {
        warn!(
            count = live.len(),
            slugs = ?live.iter().map(|t| t.slug.as_str()).collect::<Vec<_>>(),
            "Multiple default templates found, using the oldest"
        );
    }

    live.into_iter().min_by(|a, b| {
        a.created_at
            .cmp(&b.created_at)
            .then_with(|| a.id.cmp(&b.id))
    })
}

/// Resolves hosts against a [`SiteStore`].
#[derive(Clone)]
pub struct TemplateResolver {
    store: Arc<dyn SiteStore>,
}

impl std::fmt::Debug for TemplateResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateResolver").finish_non_exhaustive()
    }
}

impl TemplateResolver {
    pub fn new(store: Arc<dyn SiteStore>) -> Self {
        Self { store }
    }

    /// Resolves `raw_host` (as received, port and case included).
    pub async fn resolve(&self, raw_host: &str) -> Result<ResolvedContext, ResolutionError> {
        let host = normalize_host(raw_host);

        let mapped = match host.as_deref() {
            Some(host) => self.lookup_mapped(host).await?,
            None => None,
        };

        let (template, source, mapping_id) = match mapped {
            Some((template, mapping_id)) => {
                (template, ResolutionSource::DomainMapping, Some(mapping_id))
            }
            None => {
                let defaults = self.store.list_default_templates().await?;
                let template =
                    select_default_template(defaults).ok_or(ResolutionError::NotConfigured)?;
                (template, ResolutionSource::DefaultTemplate, None)
            }
        };

        let config = load_template_config(self.store.as_ref(), template.id).await?;

        debug!(
            host = host.as_deref().unwrap_or(""),
            template = %template.slug,
            source = %source,
            "Resolved site template"
        );

        Ok(ResolvedContext {
            host: host.unwrap_or_default(),
            source,
            mapping_id,
            template: template.summary(),
            config,
        })
    }

    async fn lookup_mapped(
        &self,
        host: &str,
    ) -> Result<Option<(Template, uuid::Uuid)>, ResolutionError> {
        let Some(mapping) = self.store.find_active_mapping(host).await? else {
            return Ok(None);
        };

        match self.store.find_template(mapping.template_id).await? {
            Some(template) if !template.is_deleted() => Ok(Some((template, mapping.id))),
            _ => {
                warn!(
                    host,
                    mapping_id = %mapping.id,
                    "Domain mapping points at a missing or deleted template, using default"
                );
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TemplateConfigRecord;
    use crate::services::test_support::InMemorySiteStore;
    use chrono::{Duration, Utc};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tracing_subscriber::layer::SubscriberExt;
    use uuid::Uuid;

    fn config_record(template_id: Uuid, primary: &str) -> TemplateConfigRecord {
        let now = Utc::now();
        TemplateConfigRecord {
            id: Uuid::new_v4(),
            template_id,
            primary_color: Some(primary.to_string()),
            secondary_color: None,
            accent_color: None,
            font_family: None,
            custom_css: None,
            enabled_sections: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn resolver(store: &Arc<InMemorySiteStore>) -> TemplateResolver {
        TemplateResolver::new(store.clone())
    }

    #[tokio::test]
    async fn test_mapped_host_then_unmapped_host_falls_back() {
        let store = Arc::new(InMemorySiteStore::new());
        let t0 = store.add_template("Default", "default", true);
        let t1 = store.add_template("Festival", "festival", false);
        store.add_mapping(t1.id, Some("festival"), "example.com", true);
        store.put_config(config_record(t1.id, "#111111"));

        let resolver = resolver(&store);

        let mapped = resolver.resolve("festival.example.com").await.unwrap();
        assert_eq!(mapped.template.id, t1.id);
        assert_eq!(mapped.source, ResolutionSource::DomainMapping);
        assert_eq!(mapped.config.primary_color.as_deref(), Some("#111111"));

        let fallback = resolver.resolve("random.example.com").await.unwrap();
        assert_eq!(fallback.template.id, t0.id);
        assert_eq!(fallback.source, ResolutionSource::DefaultTemplate);
        assert!(fallback.config.is_empty());
        assert!(fallback.mapping_id.is_none());
    }

    #[tokio::test]
    async fn test_host_is_normalized_before_lookup() {
        let store = Arc::new(InMemorySiteStore::new());
        store.add_template("Default", "default", true);
        let t1 = store.add_template("Festival", "festival", false);
        store.add_mapping(t1.id, Some("festival"), "example.com", true);

        let ctx = resolver(&store)
            .resolve("Festival.Example.com:443")
            .await
            .unwrap();
        assert_eq!(ctx.template.id, t1.id);
        assert_eq!(ctx.host, "festival.example.com");
    }

    #[tokio::test]
    async fn test_inactive_mapping_is_ignored() {
        let store = Arc::new(InMemorySiteStore::new());
        let t0 = store.add_template("Default", "default", true);
        let t1 = store.add_template("Festival", "festival", false);
        store.add_mapping(t1.id, None, "festival.io", false);

        let ctx = resolver(&store).resolve("festival.io").await.unwrap();
        assert_eq!(ctx.template.id, t0.id);
    }

    #[tokio::test]
    async fn test_mapping_to_deleted_template_falls_back() {
        let store = Arc::new(InMemorySiteStore::new());
        let t0 = store.add_template("Default", "default", true);
        let t1 = store.add_template("Old", "old", false);
        store.add_mapping(t1.id, None, "old.example.com", true);
        store.soft_delete(t1.id);

        let ctx = resolver(&store).resolve("old.example.com").await.unwrap();
        assert_eq!(ctx.template.id, t0.id);
        assert_eq!(ctx.source, ResolutionSource::DefaultTemplate);
    }

    #[derive(Clone, Default)]
    struct WarningCounter(Arc<AtomicUsize>);

    impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for WarningCounter {
        fn on_event(
            &self,
            event: &tracing::Event<'_>,
            _ctx: tracing_subscriber::layer::Context<'_, S>,
        ) {
            if *event.metadata().level() == tracing::Level::WARN {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    #[tokio::test]
    async fn test_mapping_to_deleted_template_logs_warning() {
        let store = Arc::new(InMemorySiteStore::new());
        store.add_template("Default", "default", true);
        let t1 = store.add_template("Old", "old", false);
        store.add_mapping(t1.id, None, "old.example.com", true);
        store.soft_delete(t1.id);

        let warnings = WarningCounter::default();
        let _guard = tracing::subscriber::set_default(
            tracing_subscriber::registry().with(warnings.clone()),
        );

        resolver(&store).resolve("example.org").await.unwrap();
        assert_eq!(warnings.0.load(Ordering::SeqCst), 0);

        resolver(&store).resolve("old.example.com").await.unwrap();
        assert_eq!(warnings.0.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_deleted_default_is_not_configured() {
        let store = Arc::new(InMemorySiteStore::new());
        let t0 = store.add_template("Default", "default", true);
        store.soft_delete(t0.id);

        let result = resolver(&store).resolve("example.com").await;
        assert_eq!(result, Err(ResolutionError::NotConfigured));
    }

    #[tokio::test]
    async fn test_no_default_is_not_configured() {
        let store = Arc::new(InMemorySiteStore::new());
        store.add_template("Draft", "draft", false);

        let result = resolver(&store).resolve("example.com").await;
        assert_eq!(result, Err(ResolutionError::NotConfigured));
    }

    #[tokio::test]
    async fn test_empty_host_uses_default() {
        let store = Arc::new(InMemorySiteStore::new());
        let t0 = store.add_template("Default", "default", true);

        let ctx = resolver(&store).resolve("").await.unwrap();
        assert_eq!(ctx.template.id, t0.id);
        assert_eq!(ctx.host, "");
    }

    #[tokio::test]
    async fn test_store_failure_is_transient() {
        let store = Arc::new(InMemorySiteStore::new());
        store.add_template("Default", "default", true);
        store.set_unavailable(true);

        let result = resolver(&store).resolve("example.com").await;
        assert!(matches!(result, Err(ResolutionError::TransientFetch(_))));
    }

    #[tokio::test]
    async fn test_fallback_always_succeeds_when_default_exists() {
        let store = Arc::new(InMemorySiteStore::new());
        let t0 = store.add_template("Default", "default", true);
        let t1 = store.add_template("Mapped", "mapped", false);
        store.add_mapping(t1.id, None, "mapped.example.com", true);

        let resolver = resolver(&store);
        for host in [
            "example.com",
            "www.example.com",
            "mapped.example.com.evil.org",
            "localhost:8080",
            "127.0.0.1",
        ] {
            let ctx = resolver.resolve(host).await.unwrap();
            assert_eq!(ctx.template.id, t0.id, "host {host} should fall back");
        }
    }

    #[test]
    fn test_select_default_prefers_oldest_then_lowest_id() {
        let store = InMemorySiteStore::new();
        let now = Utc::now();
        let newer = store.add_template_at("Newer", "newer", true, now);
        let older = store.add_template_at("Older", "older", true, now - Duration::days(3));

        let picked = select_default_template(vec![newer.clone(), older.clone()]).unwrap();
        assert_eq!(picked.id, older.id);

        let mut a = newer.clone();
        let mut b = newer;
        a.id = Uuid::from_u128(1);
        b.id = Uuid::from_u128(2);
        let picked = select_default_template(vec![b, a]).unwrap();
        assert_eq!(picked.id, Uuid::from_u128(1));
    }

    #[test]
    fn test_select_default_skips_deleted() {
        let store = InMemorySiteStore::new();
        let mut deleted = store.add_template("Gone", "gone", true);
        deleted.deleted_at = Some(Utc::now());
        assert!(select_default_template(vec![deleted]).is_none());
        assert!(select_default_template(vec![]).is_none());
    }
}
