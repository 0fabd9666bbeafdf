//! Submission entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::{Submission, SubmissionKind, SubmissionStatus};

/// Database row mapping for the submissions table.
#[derive(Debug, Clone, FromRow)]
pub struct SubmissionEntity {
    pub id: Uuid,
    pub kind: String,
    pub status: String,
    pub name: String,
    pub email: String,
    pub organization: Option<String>,
    pub message: Option<String>,
    pub details: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<SubmissionEntity> for Submission {
    fn from(entity: SubmissionEntity) -> Self {
        Self {
            id: entity.id,
            // CHECK constraints keep both columns within the known values
            kind: SubmissionKind::parse(&entity.kind).unwrap_or(SubmissionKind::Contact),
            status: SubmissionStatus::parse(&entity.status).unwrap_or(SubmissionStatus::New),
            name: entity.name,
            email: entity.email,
            organization: entity.organization,
            message: entity.message,
            details: entity.details,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
