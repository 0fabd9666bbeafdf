//! Domain mapping repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use domain::models::domain_mapping::compose_full_domain;
use domain::models::DomainMapping;
use domain::StoreError;

use crate::entities::DomainMappingEntity;
use crate::metrics::QueryTimer;
use crate::store::{is_unique_violation, unavailable};

/// Repository for domain mapping operations.
#[derive(Clone)]
pub struct DomainMappingRepository {
    pool: PgPool,
}

/// Input data for creating or replacing a mapping.
#[derive(Debug, Clone)]
pub struct DomainMappingInput {
    pub template_id: Uuid,
    pub domain: String,
    pub subdomain: Option<String>,
    pub is_active: bool,
    pub ssl_enabled: bool,
}

impl DomainMappingInput {
    pub fn full_domain(&self) -> String {
        compose_full_domain(self.subdomain.as_deref(), &self.domain)
    }
}

impl From<&DomainMapping> for DomainMappingInput {
    fn from(mapping: &DomainMapping) -> Self {
        Self {
            template_id: mapping.template_id,
            domain: mapping.domain.clone(),
            subdomain: mapping.subdomain.clone(),
            is_active: mapping.is_active,
            ssl_enabled: mapping.ssl_enabled,
        }
    }
}

fn mapping_error(err: sqlx::Error, input: &DomainMappingInput) -> StoreError {
    if is_unique_violation(&err) {
        StoreError::DuplicateMapping(input.full_domain())
    } else {
        unavailable(err)
    }
}

impl DomainMappingRepository {
    /// Creates a new DomainMappingRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List every mapping, ordered by host.
    pub async fn list(&self) -> Result<Vec<DomainMappingEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_domain_mappings");
        let result = sqlx::query_as::<_, DomainMappingEntity>(
            r#"
            SELECT * FROM domain_mappings ORDER BY full_domain ASC, created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a mapping by id.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<DomainMappingEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_domain_mapping_by_id");
        let result = sqlx::query_as::<_, DomainMappingEntity>(
            r#"
            SELECT * FROM domain_mappings WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find the active mapping for a normalized host.
    pub async fn find_active_by_full_domain(
        &self,
        host: &str,
    ) -> Result<Option<DomainMappingEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_active_domain_mapping");
        let result = sqlx::query_as::<_, DomainMappingEntity>(
            r#"
            SELECT * FROM domain_mappings WHERE full_domain = $1 AND is_active = true
            "#,
        )
        .bind(host)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Create a mapping.
    ///
    /// Fails with [`StoreError::DuplicateMapping`] if an active mapping
    /// already owns the same host.
    pub async fn create(
        &self,
        input: &DomainMappingInput,
    ) -> Result<DomainMappingEntity, StoreError> {
        let timer = QueryTimer::new("create_domain_mapping");
        let result = sqlx::query_as::<_, DomainMappingEntity>(
            r#"
            INSERT INTO domain_mappings (template_id, domain, subdomain, is_active, ssl_enabled)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(input.template_id)
        .bind(&input.domain)
        .bind(&input.subdomain)
        .bind(input.is_active)
        .bind(input.ssl_enabled)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result.map_err(|err| mapping_error(err, input))
    }

    /// Replace every mutable field of a mapping.
    pub async fn update(
        &self,
        id: Uuid,
        input: &DomainMappingInput,
    ) -> Result<Option<DomainMappingEntity>, StoreError> {
        let timer = QueryTimer::new("update_domain_mapping");
        let result = sqlx::query_as::<_, DomainMappingEntity>(
            r#"
            UPDATE domain_mappings SET
                template_id = $2,
                domain = $3,
                subdomain = $4,
                is_active = $5,
                ssl_enabled = $6,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(input.template_id)
        .bind(&input.domain)
        .bind(&input.subdomain)
        .bind(input.is_active)
        .bind(input.ssl_enabled)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result.map_err(|err| mapping_error(err, input))
    }

    /// Delete a mapping.
    /// Returns the number of rows deleted (0 or 1).
    pub async fn delete(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_domain_mapping");
        let result = sqlx::query(
            r#"
            DELETE FROM domain_mappings WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }
}
