//! In-memory [`SiteStore`] for unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::errors::StoreError;
use crate::models::{DomainMapping, Template, TemplateConfigRecord};
use crate::store::SiteStore;

#[derive(Default)]
pub struct InMemorySiteStore {
    templates: Mutex<Vec<Template>>,
    mappings: Mutex<Vec<DomainMapping>>,
    configs: Mutex<HashMap<Uuid, TemplateConfigRecord>>,
    unavailable: AtomicBool,
    mapping_lookups: AtomicUsize,
}

impl InMemorySiteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_template(&self, name: &str, slug: &str, is_default: bool) -> Template {
        self.add_template_at(name, slug, is_default, Utc::now())
    }

    pub fn add_template_at(
        &self,
        name: &str,
        slug: &str,
        is_default: bool,
        created_at: DateTime<Utc>,
    ) -> Template {
        let template = Template {
            id: Uuid::new_v4(),
            name: name.to_string(),
            slug: slug.to_string(),
            description: None,
            is_default,
            is_public: true,
            deleted_at: None,
            created_at,
            updated_at: created_at,
        };
        self.templates.lock().unwrap().push(template.clone());
        template
    }

    pub fn soft_delete(&self, template_id: Uuid) {
        let mut templates = self.templates.lock().unwrap();
        if let Some(t) = templates.iter_mut().find(|t| t.id == template_id) {
            t.deleted_at = Some(Utc::now());
        }
    }

    pub fn add_mapping(
        &self,
        template_id: Uuid,
        subdomain: Option<&str>,
        domain: &str,
        is_active: bool,
    ) -> DomainMapping {
        let now = Utc::now();
        let mapping = DomainMapping {
            id: Uuid::new_v4(),
            template_id,
            domain: domain.to_string(),
            subdomain: subdomain.map(String::from),
            is_active,
            ssl_enabled: true,
            created_at: now,
            updated_at: now,
        };
        self.mappings.lock().unwrap().push(mapping.clone());
        mapping
    }

    pub fn put_config(&self, record: TemplateConfigRecord) {
        self.configs
            .lock()
            .unwrap()
            .insert(record.template_id, record);
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of mapping lookups served so far.
    pub fn mapping_lookups(&self) -> usize {
        self.mapping_lookups.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(StoreError::Unavailable("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl SiteStore for InMemorySiteStore {
    async fn find_active_mapping(&self, host: &str) -> Result<Option<DomainMapping>, StoreError> {
        self.check_available()?;
        self.mapping_lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .mappings
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.is_active && m.full_domain() == host)
            .cloned())
    }

    async fn find_template(&self, template_id: Uuid) -> Result<Option<Template>, StoreError> {
        self.check_available()?;
        Ok(self
            .templates
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == template_id && !t.is_deleted())
            .cloned())
    }

    async fn list_default_templates(&self) -> Result<Vec<Template>, StoreError> {
        self.check_available()?;
        Ok(self
            .templates
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.is_default && !t.is_deleted())
            .cloned()
            .collect())
    }

    async fn find_template_config(
        &self,
        template_id: Uuid,
    ) -> Result<Option<TemplateConfigRecord>, StoreError> {
        self.check_available()?;
        Ok(self.configs.lock().unwrap().get(&template_id).cloned())
    }
}
