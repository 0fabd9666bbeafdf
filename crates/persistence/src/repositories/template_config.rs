//! Template configuration repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use domain::models::TemplateConfig;
use domain::services::serialize_enabled_sections;

use crate::entities::TemplateConfigEntity;
use crate::metrics::QueryTimer;

/// Repository for template configuration rows.
#[derive(Clone)]
pub struct TemplateConfigRepository {
    pool: PgPool,
}

impl TemplateConfigRepository {
    /// Creates a new TemplateConfigRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find the configuration row of a template.
    pub async fn find_by_template_id(
        &self,
        template_id: Uuid,
    ) -> Result<Option<TemplateConfigEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_template_config");
        let result = sqlx::query_as::<_, TemplateConfigEntity>(
            r#"
            SELECT * FROM template_configs WHERE template_id = $1
            "#,
        )
        .bind(template_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Create the configuration row of a template, or replace it in place.
    ///
    /// An empty section list is stored as NULL (no restriction).
    pub async fn upsert(
        &self,
        template_id: Uuid,
        config: &TemplateConfig,
    ) -> Result<TemplateConfigEntity, sqlx::Error> {
        let timer = QueryTimer::new("upsert_template_config");
        let enabled_sections = (!config.enabled_sections.is_empty())
            .then(|| serialize_enabled_sections(&config.enabled_sections));

        let result = sqlx::query_as::<_, TemplateConfigEntity>(
            r#"
            INSERT INTO template_configs (template_id, primary_color, secondary_color,
                                          accent_color, font_family, custom_css,
                                          enabled_sections)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (template_id) DO UPDATE SET
                primary_color = EXCLUDED.primary_color,
                secondary_color = EXCLUDED.secondary_color,
                accent_color = EXCLUDED.accent_color,
                font_family = EXCLUDED.font_family,
                custom_css = EXCLUDED.custom_css,
                enabled_sections = EXCLUDED.enabled_sections,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(template_id)
        .bind(&config.primary_color)
        .bind(&config.secondary_color)
        .bind(&config.accent_color)
        .bind(&config.font_family)
        .bind(&config.custom_css)
        .bind(enabled_sections)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }
}
