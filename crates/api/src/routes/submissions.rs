//! Public form submissions and their review by staff.

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::StaffAuth;
use crate::middleware::metrics::record_submission_received;
use domain::models::submission::{
    CreateSubmissionRequest, ListSubmissionsQuery, ListSubmissionsResponse, SubmissionReceipt,
    UpdateSubmissionStatusRequest,
};
use domain::models::{Submission, SubmissionKind};
use persistence::repositories::{SubmissionQuery, SubmissionRepository};
use shared::pagination::{clamp_page_size, decode_cursor, encode_cursor};

/// POST /api/v1/submissions/:kind
pub async fn create_submission(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Json(request): Json<CreateSubmissionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let kind = SubmissionKind::parse(&kind)
        .ok_or_else(|| ApiError::NotFound(format!("Unknown submission kind: {}", kind)))?;
    request.validate()?;

    let submission: Submission = SubmissionRepository::new(state.pool.clone())
        .create(kind, &request)
        .await?
        .into();

    record_submission_received(kind.as_str());
    info!(submission_id = %submission.id, kind = %kind, "Submission received");

    Ok((
        StatusCode::CREATED,
        Json(SubmissionReceipt {
            id: submission.id,
            kind: submission.kind,
            received_at: submission.created_at,
        }),
    ))
}

/// GET /api/v1/admin/submissions
///
/// Newest first, paginated with an opaque cursor.
pub async fn list_submissions(
    State(state): State<AppState>,
    Query(query): Query<ListSubmissionsQuery>,
) -> Result<Json<ListSubmissionsResponse>, ApiError> {
    let cursor = query
        .cursor
        .as_deref()
        .map(decode_cursor)
        .transpose()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let (rows, has_more) = SubmissionRepository::new(state.pool.clone())
        .list(&SubmissionQuery {
            kind: query.kind,
            status: query.status,
            cursor,
            limit: clamp_page_size(query.limit),
        })
        .await?;

    let data: Vec<Submission> = rows.into_iter().map(Submission::from).collect();
    let next_cursor = if has_more {
        data.last().map(|s| encode_cursor(s.created_at, s.id))
    } else {
        None
    };

    Ok(Json(ListSubmissionsResponse { data, next_cursor }))
}

/// PATCH /api/v1/admin/submissions/:submission_id
pub async fn update_submission_status(
    State(state): State<AppState>,
    Extension(auth): Extension<StaffAuth>,
    Path(submission_id): Path<Uuid>,
    Json(request): Json<UpdateSubmissionStatusRequest>,
) -> Result<Json<Submission>, ApiError> {
    let submission: Submission = SubmissionRepository::new(state.pool.clone())
        .update_status(submission_id, request.status)
        .await?
        .ok_or_else(|| ApiError::NotFound("Submission not found".to_string()))?
        .into();

    info!(
        staff_key_id = auth.api_key_id,
        submission_id = %submission_id,
        status = %submission.status,
        "Submission status changed"
    );

    Ok(Json(submission))
}

/// DELETE /api/v1/admin/submissions/:submission_id
pub async fn delete_submission(
    State(state): State<AppState>,
    Extension(auth): Extension<StaffAuth>,
    Path(submission_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let deleted = SubmissionRepository::new(state.pool.clone())
        .delete(submission_id)
        .await?;

    if deleted == 0 {
        return Err(ApiError::NotFound("Submission not found".to_string()));
    }

    info!(
        staff_key_id = auth.api_key_id,
        submission_id = %submission_id,
        "Submission deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}
