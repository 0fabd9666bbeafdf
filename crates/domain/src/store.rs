//! Read seam between the resolution pipeline and persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::StoreError;
use crate::models::{DomainMapping, Template, TemplateConfigRecord};

/// Reads the template resolution pipeline needs from the backing store.
///
/// Implementations must never return soft-deleted templates.
#[async_trait]
pub trait SiteStore: Send + Sync {
    /// Active mapping whose full domain equals `host` (already normalized).
    async fn find_active_mapping(&self, host: &str) -> Result<Option<DomainMapping>, StoreError>;

    /// A non-deleted template by id.
    async fn find_template(&self, template_id: Uuid) -> Result<Option<Template>, StoreError>;

    /// Every non-deleted template flagged as default, in any order.
    async fn list_default_templates(&self) -> Result<Vec<Template>, StoreError>;

    /// The stored configuration row of a template, if one was ever saved.
    async fn find_template_config(
        &self,
        template_id: Uuid,
    ) -> Result<Option<TemplateConfigRecord>, StoreError>;
}
