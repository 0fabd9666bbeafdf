//! Staff API key authentication extractor.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use sqlx::PgPool;

use crate::app::AppState;
use crate::error::ApiError;
use domain::models::StaffRole;
use persistence::repositories::ApiKeyRepository;
use shared::crypto::{is_well_formed_key, sha256_hex};

/// Header carrying the staff API key.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Authenticated staff key.
///
/// Inserted into request extensions by the auth middleware; handlers can
/// also extract it directly.
#[derive(Debug, Clone)]
pub struct StaffAuth {
    /// Database ID of the authenticated API key.
    pub api_key_id: i64,
    /// Key prefix for identification (e.g., "sisf_aBcDeFgH").
    pub key_prefix: String,
    /// Highest-priority role granted to the key.
    pub role: StaffRole,
}

impl StaffAuth {
    /// Validates an API key and returns the staff identity behind it.
    ///
    /// A valid key without any recognised role is rejected as forbidden.
    pub async fn validate(pool: &PgPool, api_key: &str) -> Result<Self, ApiError> {
        if !is_well_formed_key(api_key) {
            return Err(ApiError::Unauthorized(
                "Invalid or missing API key".to_string(),
            ));
        }

        let key_hash = sha256_hex(api_key);

        let repo = ApiKeyRepository::new(pool.clone());
        let key = repo
            .find_by_key_hash(&key_hash)
            .await
            .map_err(|e| {
                tracing::error!("Database error during API key lookup: {}", e);
                ApiError::ServiceUnavailable("Authentication service unavailable".to_string())
            })?
            .ok_or_else(|| ApiError::Unauthorized("Invalid or missing API key".to_string()))?;

        if !ApiKeyRepository::is_key_valid(&key) {
            return Err(if key.is_active {
                ApiError::Unauthorized("API key has expired".to_string())
            } else {
                ApiError::Unauthorized("Invalid or missing API key".to_string())
            });
        }

        let role = key
            .staff_role()
            .ok_or_else(|| ApiError::Forbidden("API key has no staff role".to_string()))?;

        // Update last_used_at asynchronously (fire and forget)
        let pool_clone = pool.clone();
        let key_id = key.id;
        tokio::spawn(async move {
            let repo = ApiKeyRepository::new(pool_clone);
            if let Err(e) = repo.update_last_used(key_id).await {
                tracing::warn!("Failed to update API key last_used_at: {}", e);
            }
        });

        Ok(StaffAuth {
            api_key_id: key.id,
            key_prefix: key.key_prefix,
            role,
        })
    }

    /// Fails with `Forbidden` unless the role grants at least `required`.
    pub fn require(&self, required: StaffRole) -> Result<(), ApiError> {
        if self.role.satisfies(required) {
            Ok(())
        } else {
            Err(ApiError::Forbidden(format!("{} access required", required)))
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for StaffAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(auth) = parts.extensions.get::<StaffAuth>() {
            return Ok(auth.clone());
        }

        let api_key = parts
            .headers
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Invalid or missing API key".to_string()))?;

        Self::validate(&state.pool, api_key).await
    }
}
