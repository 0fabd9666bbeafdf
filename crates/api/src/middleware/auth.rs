//! Staff authentication middleware.
//!
//! Each guard validates the `X-API-Key` header, checks the key's role and
//! stores the resulting [`StaffAuth`] in request extensions.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::api_key::{StaffAuth, API_KEY_HEADER};
use domain::models::StaffRole;

async fn authorize(
    state: &AppState,
    mut req: Request<Body>,
    next: Next,
    required: StaffRole,
) -> Response {
    let api_key = match req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
    {
        Some(key) => key.to_string(),
        None => {
            return ApiError::Unauthorized("Invalid or missing API key".to_string())
                .into_response()
        }
    };

    let auth = match StaffAuth::validate(&state.pool, &api_key).await {
        Ok(auth) => auth,
        Err(err) => return err.into_response(),
    };

    if let Err(err) = auth.require(required) {
        tracing::info!(
            key_prefix = %auth.key_prefix,
            role = %auth.role,
            required = %required,
            "Staff request rejected"
        );
        return err.into_response();
    }

    req.extensions_mut().insert(auth);
    next.run(req).await
}

/// Guard for routes that only admins may use (domain mappings).
pub async fn require_admin(State(state): State<AppState>, req: Request<Body>, next: Next) -> Response {
    authorize(&state, req, next, StaffRole::Admin).await
}

/// Guard for template and configuration editing.
pub async fn require_editor(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    authorize(&state, req, next, StaffRole::Editor).await
}

/// Guard for submission review.
pub async fn require_reviewer(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    authorize(&state, req, next, StaffRole::Reviewer).await
}
