//! Template configuration entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::TemplateConfigRecord;

/// Database row mapping for the template_configs table.
#[derive(Debug, Clone, FromRow)]
pub struct TemplateConfigEntity {
    pub id: Uuid,
    pub template_id: Uuid,
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub accent_color: Option<String>,
    pub font_family: Option<String>,
    pub custom_css: Option<String>,
    pub enabled_sections: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TemplateConfigEntity> for TemplateConfigRecord {
    fn from(entity: TemplateConfigEntity) -> Self {
        Self {
            id: entity.id,
            template_id: entity.template_id,
            primary_color: entity.primary_color,
            secondary_color: entity.secondary_color,
            accent_color: entity.accent_color,
            font_family: entity.font_family,
            custom_css: entity.custom_css,
            enabled_sections: entity.enabled_sections,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
