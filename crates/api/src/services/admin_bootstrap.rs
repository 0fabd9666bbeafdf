//! Admin bootstrap for initial setup.
//!
//! Stores the configured bootstrap key as an admin API key when no active
//! admin key exists yet. Runs once on startup after migrations.

use persistence::repositories::ApiKeyRepository;
use shared::crypto::{extract_key_prefix, sha256_hex};
use sqlx::PgPool;
use tracing::{info, warn};

use crate::config::SecurityConfig;
use domain::models::StaffRole;

#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Whether the bootstrap created a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    NotConfigured,
    AdminExists,
    Created,
}

/// Bootstraps the admin API key if configured. Idempotent.
pub async fn bootstrap_admin_key(
    pool: &PgPool,
    config: &SecurityConfig,
) -> Result<BootstrapOutcome, BootstrapError> {
    let api_key = config.bootstrap_admin_key.as_str();
    if api_key.is_empty() {
        return Ok(BootstrapOutcome::NotConfigured);
    }

    let key_prefix = extract_key_prefix(api_key).ok_or_else(|| {
        BootstrapError::Config("bootstrap_admin_key is not a well-formed API key".to_string())
    })?;

    let repo = ApiKeyRepository::new(pool.clone());
    if repo.any_active_with_role(StaffRole::Admin.as_str()).await? {
        info!("Active admin API key already exists - skipping bootstrap");
        return Ok(BootstrapOutcome::AdminExists);
    }

    let key = repo
        .create(
            "Bootstrap admin key",
            &sha256_hex(api_key),
            key_prefix,
            &[StaffRole::Admin.as_str().to_string()],
        )
        .await?;

    info!(
        api_key_id = key.id,
        api_key_prefix = %key.key_prefix,
        "Bootstrap admin API key created"
    );
    warn!("SECURITY: Remove SISF__SECURITY__BOOTSTRAP_ADMIN_KEY from the environment once staff keys are issued");

    Ok(BootstrapOutcome::Created)
}
