//! Public site endpoints: page shell, resolved context, styles and sections.

use axum::{
    extract::{Host, Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Serialize;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::metrics::{record_resolution, ResolutionOutcome};
use crate::services::site_shell::{festive_theme, render_fallback, render_site};
use domain::models::{ResolutionSource, ResolvedContext};
use domain::services::{build_style_block, FestiveTheme};
use domain::ResolutionError;

/// Resolved context plus the presentation flags the page needs.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SiteContextResponse {
    #[serde(flatten)]
    pub context: ResolvedContext,
    pub festive_theme: FestiveTheme,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub festive_effect: Option<&'static str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SectionVisibilityResponse {
    pub section_id: String,
    pub enabled: bool,
}

/// Resolves the request host through the context cache and records the outcome.
pub(crate) async fn resolve_host(
    state: &AppState,
    host: &str,
) -> Result<ResolvedContext, ResolutionError> {
    match state
        .context_cache
        .get_or_resolve(&state.resolver, host)
        .await
    {
        Ok((context, cache_status)) => {
            let outcome = match context.source {
                ResolutionSource::DomainMapping => ResolutionOutcome::Mapped,
                ResolutionSource::DefaultTemplate => ResolutionOutcome::Default,
            };
            record_resolution(outcome, Some(cache_status));
            Ok(context)
        }
        Err(err) => {
            let outcome = match err {
                ResolutionError::NotConfigured => ResolutionOutcome::NotConfigured,
                ResolutionError::TransientFetch(_) => ResolutionOutcome::Unavailable,
            };
            record_resolution(outcome, None);
            Err(err)
        }
    }
}

fn current_festive_theme(state: &AppState) -> FestiveTheme {
    festive_theme(
        state.config.site.festive_effects_enabled,
        Utc::now().date_naive(),
    )
}

/// GET /
///
/// Renders the page shell for the request host. Never returns a blank page:
/// resolution failures render the fallback shell.
pub async fn site_page(State(state): State<AppState>, Host(host): Host) -> Response {
    let site_name = &state.config.resolution.fallback_site_name;

    match resolve_host(&state, &host).await {
        Ok(context) => Html(render_site(&context, current_festive_theme(&state))).into_response(),
        Err(ResolutionError::NotConfigured) => {
            tracing::warn!(host = %host, "No template configured for host");
            Html(render_fallback(site_name, "This site is being set up.")).into_response()
        }
        Err(ResolutionError::TransientFetch(msg)) => {
            tracing::error!(host = %host, error = %msg, "Rendering fallback page");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Html(render_fallback(
                    site_name,
                    "The site is temporarily unavailable. Please try again shortly.",
                )),
            )
                .into_response()
        }
    }
}

/// GET /api/v1/site/context
pub async fn site_context(
    State(state): State<AppState>,
    Host(host): Host,
) -> Result<Json<SiteContextResponse>, ApiError> {
    let context = resolve_host(&state, &host).await?;
    let festive_theme = current_festive_theme(&state);

    Ok(Json(SiteContextResponse {
        context,
        festive_theme,
        festive_effect: festive_theme.effect(),
    }))
}

/// GET /api/v1/site/style.css
///
/// Returns 204 when the template defines no styles.
pub async fn site_styles(
    State(state): State<AppState>,
    Host(host): Host,
) -> Result<Response, ApiError> {
    let context = resolve_host(&state, &host).await?;

    Ok(match build_style_block(&context.config.style_inputs()) {
        Some(css) => (
            [
                (header::CONTENT_TYPE, "text/css; charset=utf-8"),
                (header::CACHE_CONTROL, "no-cache"),
            ],
            css,
        )
            .into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}

/// GET /api/v1/site/sections/:section_id
pub async fn section_visibility(
    State(state): State<AppState>,
    Host(host): Host,
    Path(section_id): Path<String>,
) -> Result<Json<SectionVisibilityResponse>, ApiError> {
    shared::validation::validate_section_id(&section_id)
        .map_err(|_| ApiError::Validation(format!("Invalid section id: {}", section_id)))?;

    let context = resolve_host(&state, &host).await?;
    let enabled = context.section_enabled(&section_id);

    Ok(Json(SectionVisibilityResponse {
        section_id,
        enabled,
    }))
}
