//! Repository for API key database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::entities::ApiKeyEntity;

/// Repository for API key operations.
#[derive(Clone)]
pub struct ApiKeyRepository {
    pool: PgPool,
}

impl ApiKeyRepository {
    /// Creates a new API key repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Finds an API key by its hash.
    ///
    /// Returns `None` if no key with the given hash exists.
    pub async fn find_by_key_hash(
        &self,
        key_hash: &str,
    ) -> Result<Option<ApiKeyEntity>, sqlx::Error> {
        let result = sqlx::query_as::<_, ApiKeyEntity>(
            r#"
            SELECT id, key_hash, key_prefix, name, roles, is_active,
                   last_used_at, created_at, expires_at
            FROM api_keys
            WHERE key_hash = $1
            "#,
        )
        .bind(key_hash)
        .fetch_optional(&self.pool)
        .await?;

        Ok(result)
    }

    /// Stores a new key. Only the hash and display prefix are persisted.
    pub async fn create(
        &self,
        name: &str,
        key_hash: &str,
        key_prefix: &str,
        roles: &[String],
    ) -> Result<ApiKeyEntity, sqlx::Error> {
        sqlx::query_as::<_, ApiKeyEntity>(
            r#"
            INSERT INTO api_keys (name, key_hash, key_prefix, roles)
            VALUES ($1, $2, $3, $4)
            RETURNING id, key_hash, key_prefix, name, roles, is_active,
                      last_used_at, created_at, expires_at
            "#,
        )
        .bind(name)
        .bind(key_hash)
        .bind(key_prefix)
        .bind(roles)
        .fetch_one(&self.pool)
        .await
    }

    /// Whether any active key carries `role`.
    pub async fn any_active_with_role(&self, role: &str) -> Result<bool, sqlx::Error> {
        let exists: (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM api_keys
                WHERE is_active = true AND $1 = ANY(roles)
            )
            "#,
        )
        .bind(role)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists.0)
    }

    /// Updates the last_used_at timestamp for an API key.
    ///
    /// This is typically called asynchronously after successful authentication.
    pub async fn update_last_used(&self, key_id: i64) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE api_keys
            SET last_used_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(key_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Checks if an API key is valid for authentication.
    ///
    /// Returns `true` if the key is active and not expired.
    pub fn is_key_valid(key: &ApiKeyEntity) -> bool {
        Self::is_key_valid_at(key, Utc::now())
    }

    /// Checks if an API key is valid at a specific time.
    pub fn is_key_valid_at(key: &ApiKeyEntity, at: DateTime<Utc>) -> bool {
        key.is_active && key.expires_at.map_or(true, |expires_at| expires_at >= at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use domain::models::StaffRole;

    fn make_test_key(is_active: bool, expires_at: Option<DateTime<Utc>>) -> ApiKeyEntity {
        ApiKeyEntity {
            id: 1,
            key_hash: "test_hash".to_string(),
            key_prefix: "sisf_aBcDeFgH".to_string(),
            name: "Test Key".to_string(),
            roles: vec!["reviewer".to_string(), "Editor".to_string()],
            is_active,
            last_used_at: None,
            created_at: Utc::now(),
            expires_at,
        }
    }

    #[test]
    fn test_is_key_valid_active_no_expiry() {
        let key = make_test_key(true, None);
        assert!(ApiKeyRepository::is_key_valid(&key));
    }

    #[test]
    fn test_is_key_valid_active_future_expiry() {
        let key = make_test_key(true, Some(Utc::now() + Duration::days(30)));
        assert!(ApiKeyRepository::is_key_valid(&key));
    }

    #[test]
    fn test_is_key_valid_active_past_expiry() {
        let key = make_test_key(true, Some(Utc::now() - Duration::days(1)));
        assert!(!ApiKeyRepository::is_key_valid(&key));
    }

    #[test]
    fn test_is_key_valid_inactive() {
        let key = make_test_key(false, Some(Utc::now() + Duration::days(30)));
        assert!(!ApiKeyRepository::is_key_valid(&key));
    }

    #[test]
    fn test_is_key_valid_at_boundary() {
        let at = Utc::now();
        let key = make_test_key(true, Some(at));
        assert!(ApiKeyRepository::is_key_valid_at(&key, at));
        assert!(!ApiKeyRepository::is_key_valid_at(&key, at + Duration::seconds(1)));
    }

    #[test]
    fn test_staff_role_picks_highest() {
        let key = make_test_key(true, None);
        assert_eq!(key.staff_role(), Some(StaffRole::Editor));
    }
}
