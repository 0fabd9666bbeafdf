//! Domain mapping administration endpoints (admin only).

use axum::{
    extract::{Extension, Path, State},
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
use crate::routes::admin_templates::find_template;
use domain::models::domain_mapping::{
    CreateDomainMappingRequest, DomainMappingResponse, ListDomainMappingsResponse,
    UpdateDomainMappingRequest,
};
use domain::models::DomainMapping;
use persistence::repositories::{DomainMappingInput, DomainMappingRepository};

/// Mappings must point at an existing, non-deleted template.
async fn ensure_template_exists(state: &AppState, template_id: Uuid) -> Result<(), ApiError> {
    find_template(state, template_id)
        .await
        .map(|_| ())
        .map_err(|err| match err {
            ApiError::NotFound(_) => {
                ApiError::Validation(format!("Template {} does not exist", template_id))
            }
            other => other,
        })
}

/// GET /api/v1/admin/domains
pub async fn list_domain_mappings(
    State(state): State<AppState>,
) -> Result<Json<ListDomainMappingsResponse>, ApiError> {
    let mappings = DomainMappingRepository::new(state.pool.clone()).list().await?;

    Ok(Json(ListDomainMappingsResponse {
        data: mappings
            .into_iter()
            .map(|m| DomainMapping::from(m).into())
            .collect(),
    }))
}

/// POST /api/v1/admin/domains
///
/// Returns 409 when another active mapping already answers for the host.
pub async fn create_domain_mapping(
    State(state): State<AppState>,
    Extension(auth): Extension<StaffAuth>,
    Json(request): Json<CreateDomainMappingRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let request = request.normalized();
    request.validate()?;
    ensure_template_exists(&state, request.template_id).await?;

    let input = DomainMappingInput {
        template_id: request.template_id,
        domain: request.domain,
        subdomain: request.subdomain,
        is_active: request.is_active,
        ssl_enabled: request.ssl_enabled,
    };

    let mapping: DomainMapping = DomainMappingRepository::new(state.pool.clone())
        .create(&input)
        .await?
        .into();

    state.context_cache.invalidate().await;
    info!(
        staff_key_id = auth.api_key_id,
        mapping_id = %mapping.id,
        host = %mapping.full_domain(),
        template_id = %mapping.template_id,
        "Domain mapping created"
    );

    Ok((
        StatusCode::CREATED,
        Json(DomainMappingResponse::from(mapping)),
    ))
}

/// PATCH /api/v1/admin/domains/:mapping_id
pub async fn update_domain_mapping(
    State(state): State<AppState>,
    Extension(auth): Extension<StaffAuth>,
    Path(mapping_id): Path<Uuid>,
    Json(request): Json<UpdateDomainMappingRequest>,
) -> Result<Json<DomainMappingResponse>, ApiError> {
    let request = request.normalized();
    request.validate()?;

    let repo = DomainMappingRepository::new(state.pool.clone());
    let current: DomainMapping = repo
        .find_by_id(mapping_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Domain mapping not found".to_string()))?
        .into();

    let updated = request.apply_to(&current);
    updated.validate_full_domain()?;
    if updated.template_id != current.template_id {
        ensure_template_exists(&state, updated.template_id).await?;
    }

    let mapping: DomainMapping = repo
        .update(mapping_id, &DomainMappingInput::from(&updated))
        .await?
        .ok_or_else(|| ApiError::NotFound("Domain mapping not found".to_string()))?
        .into();

    state.context_cache.invalidate().await;
    info!(
        staff_key_id = auth.api_key_id,
        mapping_id = %mapping.id,
        host = %mapping.full_domain(),
        is_active = mapping.is_active,
        "Domain mapping updated"
    );

    Ok(Json(mapping.into()))
}

/// DELETE /api/v1/admin/domains/:mapping_id
pub async fn delete_domain_mapping(
    State(state): State<AppState>,
    Extension(auth): Extension<StaffAuth>,
    Path(mapping_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let deleted = DomainMappingRepository::new(state.pool.clone())
        .delete(mapping_id)
        .await?;

    if deleted == 0 {
        return Err(ApiError::NotFound("Domain mapping not found".to_string()));
    }

    state.context_cache.invalidate().await;
    info!(
        staff_key_id = auth.api_key_id,
        mapping_id = %mapping_id,
        "Domain mapping deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}
