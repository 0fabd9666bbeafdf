//! PostgreSQL implementation of the [`SiteStore`] seam.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use domain::models::{DomainMapping, Template, TemplateConfigRecord};
use domain::{SiteStore, StoreError};

use crate::repositories::{DomainMappingRepository, TemplateConfigRepository, TemplateRepository};

/// PostgreSQL error code 23505 = unique_violation
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505"))
}

/// Maps a driver error to [`StoreError::Unavailable`].
pub fn unavailable(err: sqlx::Error) -> StoreError {
    tracing::error!(error = %err, "Site store query failed");
    StoreError::Unavailable(err.to_string())
}

/// Reads templates, mappings and configurations from PostgreSQL.
#[derive(Clone)]
pub struct PgSiteStore {
    templates: TemplateRepository,
    mappings: DomainMappingRepository,
    configs: TemplateConfigRepository,
}

impl PgSiteStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            templates: TemplateRepository::new(pool.clone()),
            mappings: DomainMappingRepository::new(pool.clone()),
            configs: TemplateConfigRepository::new(pool),
        }
    }
}

#[async_trait]
impl SiteStore for PgSiteStore {
    async fn find_active_mapping(&self, host: &str) -> Result<Option<DomainMapping>, StoreError> {
        let entity = self
            .mappings
            .find_active_by_full_domain(host)
            .await
            .map_err(unavailable)?;
        Ok(entity.map(Into::into))
    }

    async fn find_template(&self, template_id: Uuid) -> Result<Option<Template>, StoreError> {
        let entity = self
            .templates
            .find_by_id(template_id)
            .await
            .map_err(unavailable)?;
        Ok(entity.map(Into::into))
    }

    async fn list_default_templates(&self) -> Result<Vec<Template>, StoreError> {
        let entities = self.templates.list_defaults().await.map_err(unavailable)?;
        Ok(entities.into_iter().map(Into::into).collect())
    }

    async fn find_template_config(
        &self,
        template_id: Uuid,
    ) -> Result<Option<TemplateConfigRecord>, StoreError> {
        let entity = self
            .configs
            .find_by_template_id(template_id)
            .await
            .map_err(unavailable)?;
        Ok(entity.map(Into::into))
    }
}
