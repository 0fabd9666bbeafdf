//! API key entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use domain::models::{resolve_staff_role, StaffRole};

/// Database row mapping for the api_keys table.
#[derive(Debug, Clone, FromRow)]
pub struct ApiKeyEntity {
    pub id: i64,
    pub key_hash: String,
    pub key_prefix: String,
    pub name: String,
    pub roles: Vec<String>, // TEXT[]
    pub is_active: bool,
    pub last_used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl ApiKeyEntity {
    /// Highest-priority staff role granted to this key.
    pub fn staff_role(&self) -> Option<StaffRole> {
        resolve_staff_role(&self.roles)
    }
}
