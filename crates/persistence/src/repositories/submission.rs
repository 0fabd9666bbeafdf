//! Submission repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use domain::models::submission::CreateSubmissionRequest;
use domain::models::{SubmissionKind, SubmissionStatus};

use crate::entities::SubmissionEntity;
use crate::metrics::QueryTimer;

/// Query parameters for submission pagination.
#[derive(Debug, Clone)]
pub struct SubmissionQuery {
    pub kind: Option<SubmissionKind>,
    pub status: Option<SubmissionStatus>,
    pub cursor: Option<(DateTime<Utc>, Uuid)>,
    pub limit: i64,
}

/// Repository for submission database operations.
#[derive(Clone)]
pub struct SubmissionRepository {
    pool: PgPool,
}

impl SubmissionRepository {
    /// Creates a new SubmissionRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Store a new submission with status `new`.
    pub async fn create(
        &self,
        kind: SubmissionKind,
        request: &CreateSubmissionRequest,
    ) -> Result<SubmissionEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_submission");
        let details = request
            .details
            .clone()
            .unwrap_or_else(|| serde_json::json!({}));

        let result = sqlx::query_as::<_, SubmissionEntity>(
            r#"
            INSERT INTO submissions (kind, name, email, organization, message, details)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(kind.as_str())
        .bind(&request.name)
        .bind(&request.email)
        .bind(&request.organization)
        .bind(&request.message)
        .bind(details)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Newest submissions first, keyset-paginated on `(created_at, id)`.
    ///
    /// Returns the page and whether more results exist.
    pub async fn list(
        &self,
        query: &SubmissionQuery,
    ) -> Result<(Vec<SubmissionEntity>, bool), sqlx::Error> {
        let timer = QueryTimer::new("list_submissions");

        // Fetch limit + 1 to determine if more results exist
        let fetch_limit = query.limit + 1;
        let (cursor_created_at, cursor_id) = match query.cursor {
            Some((created_at, id)) => (Some(created_at), id),
            None => (None, Uuid::max()),
        };

        let mut rows = sqlx::query_as::<_, SubmissionEntity>(
            r#"
            SELECT * FROM submissions
            WHERE ($1::text IS NULL OR kind = $1)
              AND ($2::text IS NULL OR status = $2)
              AND ($3::timestamptz IS NULL OR (created_at, id) < ($3, $4))
            ORDER BY created_at DESC, id DESC
            LIMIT $5
            "#,
        )
        .bind(query.kind.map(|k| k.as_str()))
        .bind(query.status.map(|s| s.as_str()))
        .bind(cursor_created_at)
        .bind(cursor_id)
        .bind(fetch_limit)
        .fetch_all(&self.pool)
        .await?;
        timer.record();

        let has_more = rows.len() as i64 > query.limit;
        if has_more {
            rows.pop();
        }
        Ok((rows, has_more))
    }

    /// Change the review status of a submission.
    pub async fn update_status(
        &self,
        id: Uuid,
        status: SubmissionStatus,
    ) -> Result<Option<SubmissionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_submission_status");
        let result = sqlx::query_as::<_, SubmissionEntity>(
            r#"
            UPDATE submissions SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a submission.
    /// Returns the number of rows deleted (0 or 1).
    pub async fn delete(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_submission");
        let result = sqlx::query(
            r#"
            DELETE FROM submissions WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }
}
