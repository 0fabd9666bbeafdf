//! Template repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::TemplateEntity;
use crate::metrics::QueryTimer;

const TEMPLATE_COLUMNS: &str = "id, name, slug, description, is_default, is_public, \
                                deleted_at, created_at, updated_at";

/// Repository for template-related database operations.
///
/// Soft-deleted rows are invisible to every query here.
#[derive(Clone)]
pub struct TemplateRepository {
    pool: PgPool,
}

impl TemplateRepository {
    /// Creates a new TemplateRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all live templates, oldest first.
    pub async fn list(&self) -> Result<Vec<TemplateEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_templates");
        let result = sqlx::query_as::<_, TemplateEntity>(&format!(
            "SELECT {TEMPLATE_COLUMNS} FROM templates \
             WHERE deleted_at IS NULL \
             ORDER BY created_at ASC, id ASC"
        ))
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a live template by id.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<TemplateEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_template_by_id");
        let result = sqlx::query_as::<_, TemplateEntity>(&format!(
            "SELECT {TEMPLATE_COLUMNS} FROM templates WHERE id = $1 AND deleted_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Whether a live template already uses `slug`.
    pub async fn slug_exists(&self, slug: &str) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("template_slug_exists");
        let exists: (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS(SELECT 1 FROM templates WHERE slug = $1 AND deleted_at IS NULL)
            "#,
        )
        .bind(slug)
        .fetch_one(&self.pool)
        .await?;
        timer.record();
        Ok(exists.0)
    }

    /// All live templates flagged as default.
    pub async fn list_defaults(&self) -> Result<Vec<TemplateEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_default_templates");
        let result = sqlx::query_as::<_, TemplateEntity>(&format!(
            "SELECT {TEMPLATE_COLUMNS} FROM templates \
             WHERE is_default = true AND deleted_at IS NULL"
        ))
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Create a new, non-default template.
    pub async fn create(
        &self,
        name: &str,
        slug: &str,
        description: Option<&str>,
        is_public: bool,
    ) -> Result<TemplateEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_template");
        let result = sqlx::query_as::<_, TemplateEntity>(&format!(
            "INSERT INTO templates (name, slug, description, is_public) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {TEMPLATE_COLUMNS}"
        ))
        .bind(name)
        .bind(slug)
        .bind(description)
        .bind(is_public)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Update a template (partial update).
    /// Only provided fields are updated; None values are preserved.
    pub async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        slug: Option<&str>,
        description: Option<&str>,
        is_public: Option<bool>,
    ) -> Result<Option<TemplateEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_template");
        let result = sqlx::query_as::<_, TemplateEntity>(&format!(
            "UPDATE templates SET \
                 name = COALESCE($2, name), \
                 slug = COALESCE($3, slug), \
                 description = COALESCE($4, description), \
                 is_public = COALESCE($5, is_public), \
                 updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING {TEMPLATE_COLUMNS}"
        ))
        .bind(id)
        .bind(name)
        .bind(slug)
        .bind(description)
        .bind(is_public)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Soft-delete a template. A deleted template loses its default flag.
    /// Returns the number of rows affected (0 or 1).
    pub async fn soft_delete(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("soft_delete_template");
        let result = sqlx::query(
            r#"
            UPDATE templates
            SET deleted_at = NOW(), is_default = false, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Make `id` the only default template.
    ///
    /// Returns `None` (and changes nothing) if the template does not exist.
    pub async fn set_default(&self, id: Uuid) -> Result<Option<TemplateEntity>, sqlx::Error> {
        let timer = QueryTimer::new("set_default_template");
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            UPDATE templates
            SET is_default = false, updated_at = NOW()
            WHERE is_default = true AND id <> $1
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let updated = sqlx::query_as::<_, TemplateEntity>(&format!(
            "UPDATE templates SET is_default = true, updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING {TEMPLATE_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        if updated.is_some() {
            tx.commit().await?;
        } else {
            tx.rollback().await?;
        }
        timer.record();
        Ok(updated)
    }

    /// Copy a template and its configuration under a new name and slug.
    ///
    /// The copy is never default. Returns `None` if the source does not exist.
    pub async fn duplicate(
        &self,
        source_id: Uuid,
        name: &str,
        slug: &str,
    ) -> Result<Option<TemplateEntity>, sqlx::Error> {
        let timer = QueryTimer::new("duplicate_template");
        let mut tx = self.pool.begin().await?;

        let copy = sqlx::query_as::<_, TemplateEntity>(&format!(
            "INSERT INTO templates (name, slug, description, is_public, is_default) \
             SELECT $2, $3, description, is_public, false \
             FROM templates WHERE id = $1 AND deleted_at IS NULL \
             RETURNING {TEMPLATE_COLUMNS}"
        ))
        .bind(source_id)
        .bind(name)
        .bind(slug)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(copy) = copy else {
            tx.rollback().await?;
            timer.record();
            return Ok(None);
        };

        sqlx::query(
            r#"
            INSERT INTO template_configs (template_id, primary_color, secondary_color,
                                          accent_color, font_family, custom_css,
                                          enabled_sections)
            SELECT $2, primary_color, secondary_color, accent_color, font_family,
                   custom_css, enabled_sections
            FROM template_configs WHERE template_id = $1
            "#,
        )
        .bind(source_id)
        .bind(copy.id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        timer.record();
        Ok(Some(copy))
    }
}
