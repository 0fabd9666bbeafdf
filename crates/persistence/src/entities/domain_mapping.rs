//! Domain mapping entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::DomainMapping;

/// Database row mapping for the domain_mappings table.
///
/// `full_domain` is a generated column.
#[derive(Debug, Clone, FromRow)]
pub struct DomainMappingEntity {
    pub id: Uuid,
    pub template_id: Uuid,
    pub domain: String,
    pub subdomain: Option<String>,
    pub full_domain: String,
    pub is_active: bool,
    pub ssl_enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DomainMappingEntity> for DomainMapping {
    fn from(entity: DomainMappingEntity) -> Self {
        Self {
            id: entity.id,
            template_id: entity.template_id,
            domain: entity.domain,
            subdomain: entity.subdomain,
            is_active: entity.is_active,
            ssl_enabled: entity.ssl_enabled,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
