//! Template administration endpoints.
//!
//! Every change that can alter what a host resolves to invalidates the
//! context cache.

use std::collections::HashSet;

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
use domain::models::template::{
    duplicate_slug, CreateTemplateRequest, DuplicateTemplateRequest, ListTemplatesResponse,
    UpdateTemplateRequest,
};
use domain::models::template_config::{SaveTemplateConfigRequest, TemplateConfigResponse};
use domain::models::{Template, TemplateConfig};
use domain::services::decode_template_config;
use persistence::entities::TemplateConfigEntity;
use persistence::repositories::{TemplateConfigRepository, TemplateRepository};

pub(crate) async fn find_template(state: &AppState, id: Uuid) -> Result<Template, ApiError> {
    TemplateRepository::new(state.pool.clone())
        .find_by_id(id)
        .await?
        .map(Template::from)
        .ok_or_else(|| ApiError::NotFound("Template not found".to_string()))
}

async fn ensure_slug_available(repo: &TemplateRepository, slug: &str) -> Result<(), ApiError> {
    if repo.slug_exists(slug).await? {
        return Err(ApiError::Conflict(format!("Slug already in use: {}", slug)));
    }
    Ok(())
}

/// GET /api/v1/admin/templates
pub async fn list_templates(
    State(state): State<AppState>,
) -> Result<Json<ListTemplatesResponse>, ApiError> {
    let templates = TemplateRepository::new(state.pool.clone()).list().await?;

    Ok(Json(ListTemplatesResponse {
        data: templates.into_iter().map(Template::from).collect(),
    }))
}

/// POST /api/v1/admin/templates
pub async fn create_template(
    State(state): State<AppState>,
    Extension(auth): Extension<StaffAuth>,
    Json(request): Json<CreateTemplateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    let repo = TemplateRepository::new(state.pool.clone());
    ensure_slug_available(&repo, &request.slug).await?;

    let template: Template = repo
        .create(
            &request.name,
            &request.slug,
            request.description.as_deref(),
            request.is_public,
        )
        .await?
        .into();

    info!(
        staff_key_id = auth.api_key_id,
        template_id = %template.id,
        slug = %template.slug,
        "Template created"
    );

    Ok((StatusCode::CREATED, Json(template)))
}

/// GET /api/v1/admin/templates/:template_id
pub async fn get_template(
    State(state): State<AppState>,
    Path(template_id): Path<Uuid>,
) -> Result<Json<Template>, ApiError> {
    Ok(Json(find_template(&state, template_id).await?))
}

/// PATCH /api/v1/admin/templates/:template_id
pub async fn update_template(
    State(state): State<AppState>,
    Extension(auth): Extension<StaffAuth>,
    Path(template_id): Path<Uuid>,
    Json(request): Json<UpdateTemplateRequest>,
) -> Result<Json<Template>, ApiError> {
    request.validate()?;
    if request.is_empty() {
        return Err(ApiError::Validation("No fields to update".to_string()));
    }

    let repo = TemplateRepository::new(state.pool.clone());
    let current = find_template(&state, template_id).await?;
    if let Some(slug) = request.slug.as_deref().filter(|s| *s != current.slug) {
        ensure_slug_available(&repo, slug).await?;
    }

    let template: Template = repo
        .update(
            template_id,
            request.name.as_deref(),
            request.slug.as_deref(),
            request.description.as_deref(),
            request.is_public,
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Template not found".to_string()))?
        .into();

    state.context_cache.invalidate().await;
    info!(
        staff_key_id = auth.api_key_id,
        template_id = %template.id,
        "Template updated"
    );

    Ok(Json(template))
}

/// DELETE /api/v1/admin/templates/:template_id
///
/// Soft delete. Mappings that point at the template stay in place and their
/// hosts fall back to the default template.
pub async fn delete_template(
    State(state): State<AppState>,
    Extension(auth): Extension<StaffAuth>,
    Path(template_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let deleted = TemplateRepository::new(state.pool.clone())
        .soft_delete(template_id)
        .await?;

    if deleted == 0 {
        return Err(ApiError::NotFound("Template not found".to_string()));
    }

    state.context_cache.invalidate().await;
    state.preview_sessions.clear(template_id).await;
    info!(
        staff_key_id = auth.api_key_id,
        template_id = %template_id,
        "Template deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/templates/:template_id/duplicate
pub async fn duplicate_template(
    State(state): State<AppState>,
    Extension(auth): Extension<StaffAuth>,
    Path(template_id): Path<Uuid>,
    Json(request): Json<DuplicateTemplateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    let repo = TemplateRepository::new(state.pool.clone());
    let source = find_template(&state, template_id).await?;

    let slug = match request.slug {
        Some(slug) => {
            ensure_slug_available(&repo, &slug).await?;
            slug
        }
        None => {
            let taken: HashSet<String> =
                repo.list().await?.into_iter().map(|t| t.slug).collect();
            duplicate_slug(&source.slug, |candidate| taken.contains(candidate))
        }
    };
    let name = request
        .name
        .unwrap_or_else(|| format!("{} (copy)", source.name));

    let copy: Template = repo
        .duplicate(template_id, &name, &slug)
        .await?
        .ok_or_else(|| ApiError::NotFound("Template not found".to_string()))?
        .into();

    info!(
        staff_key_id = auth.api_key_id,
        source_id = %template_id,
        template_id = %copy.id,
        slug = %copy.slug,
        "Template duplicated"
    );

    Ok((StatusCode::CREATED, Json(copy)))
}

/// POST /api/v1/admin/templates/:template_id/default
pub async fn set_default_template(
    State(state): State<AppState>,
    Extension(auth): Extension<StaffAuth>,
    Path(template_id): Path<Uuid>,
) -> Result<Json<Template>, ApiError> {
    let template: Template = TemplateRepository::new(state.pool.clone())
        .set_default(template_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Template not found".to_string()))?
        .into();

    state.context_cache.invalidate().await;
    info!(
        staff_key_id = auth.api_key_id,
        template_id = %template.id,
        "Default template changed"
    );

    Ok(Json(template))
}

fn config_response(template_id: Uuid, entity: Option<TemplateConfigEntity>) -> TemplateConfigResponse {
    match entity {
        Some(entity) => {
            let updated_at = entity.updated_at;
            TemplateConfigResponse {
                template_id,
                config: decode_template_config(entity.into()),
                updated_at: Some(updated_at),
            }
        }
        None => TemplateConfigResponse {
            template_id,
            config: TemplateConfig::default(),
            updated_at: None,
        },
    }
}

fn validated_config(request: SaveTemplateConfigRequest) -> Result<TemplateConfig, ApiError> {
    let request = request.normalized();
    request.validate()?;
    Ok(request.into_config())
}

/// GET /api/v1/admin/templates/:template_id/config
///
/// A template that never had its configuration saved returns an empty one.
pub async fn get_template_config(
    State(state): State<AppState>,
    Path(template_id): Path<Uuid>,
) -> Result<Json<TemplateConfigResponse>, ApiError> {
    find_template(&state, template_id).await?;

    let entity = TemplateConfigRepository::new(state.pool.clone())
        .find_by_template_id(template_id)
        .await?;

    Ok(Json(config_response(template_id, entity)))
}

/// PUT /api/v1/admin/templates/:template_id/config
pub async fn save_template_config(
    State(state): State<AppState>,
    Extension(auth): Extension<StaffAuth>,
    Path(template_id): Path<Uuid>,
    Json(request): Json<SaveTemplateConfigRequest>,
) -> Result<Json<TemplateConfigResponse>, ApiError> {
    let config = validated_config(request)?;
    find_template(&state, template_id).await?;

    let entity = TemplateConfigRepository::new(state.pool.clone())
        .upsert(template_id, &config)
        .await?;

    state.context_cache.invalidate().await;
    info!(
        staff_key_id = auth.api_key_id,
        template_id = %template_id,
        "Template configuration saved"
    );

    Ok(Json(config_response(template_id, Some(entity))))
}

/// PUT /api/v1/admin/templates/:template_id/preview
///
/// Applies unsaved configuration to the template's preview head.
pub async fn apply_preview(
    State(state): State<AppState>,
    Path(template_id): Path<Uuid>,
    Json(request): Json<SaveTemplateConfigRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let config = validated_config(request)?;
    let template = find_template(&state, template_id).await?;

    let preview = state
        .preview_sessions
        .apply(template_id, &template.name, &config)
        .await;

    Ok(Json(preview))
}

/// DELETE /api/v1/admin/templates/:template_id/preview
pub async fn clear_preview(
    State(state): State<AppState>,
    Path(template_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if state.preview_sessions.clear(template_id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("No preview session for template".to_string()))
    }
}
