use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, rate_limit_middleware, require_admin, require_editor,
    require_reviewer, security_headers_middleware, trace_id, RateLimiterState,
};
use crate::routes::{admin_domains, admin_templates, health, site, submissions};
use crate::services::PreviewSessions;
use domain::services::{ContextCache, TemplateResolver};
use persistence::PgSiteStore;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub resolver: TemplateResolver,
    pub context_cache: Arc<ContextCache>,
    pub preview_sessions: Arc<PreviewSessions>,
    pub rate_limiter: Option<Arc<RateLimiterState>>,
}

impl AppState {
    pub fn new(config: Config, pool: PgPool) -> Self {
        let resolver = TemplateResolver::new(Arc::new(PgSiteStore::new(pool.clone())));
        let context_cache = Arc::new(ContextCache::with_max_hosts(
            config.resolution.cache_ttl(),
            config.resolution.cache_max_entries,
        ));
        let rate_limiter =
            RateLimiterState::new(config.security.submission_rate_limit_per_minute).map(Arc::new);

        Self {
            pool,
            config: Arc::new(config),
            resolver,
            context_cache,
            preview_sessions: Arc::new(PreviewSessions::new()),
            rate_limiter,
        }
    }
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    build_router(AppState::new(config, pool))
}

pub fn build_router(state: AppState) -> Router {
    let config = state.config.clone();

    let cors = if config.security.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Public site (resolved per request Host)
    let site_routes = Router::new()
        .route("/", get(site::site_page))
        .route("/api/v1/site/context", get(site::site_context))
        .route("/api/v1/site/style.css", get(site::site_styles))
        .route(
            "/api/v1/site/sections/:section_id",
            get(site::section_visibility),
        );

    // Public forms, limited per client IP
    let submission_routes = Router::new()
        .route("/api/v1/submissions/:kind", post(submissions::create_submission))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ));

    // Templates, configuration and preview (editor or admin)
    let editor_routes = Router::new()
        .route(
            "/api/v1/admin/templates",
            get(admin_templates::list_templates).post(admin_templates::create_template),
        )
        .route(
            "/api/v1/admin/templates/:template_id",
            get(admin_templates::get_template)
                .patch(admin_templates::update_template)
                .delete(admin_templates::delete_template),
        )
        .route(
            "/api/v1/admin/templates/:template_id/duplicate",
            post(admin_templates::duplicate_template),
        )
        .route(
            "/api/v1/admin/templates/:template_id/default",
            post(admin_templates::set_default_template),
        )
        .route(
            "/api/v1/admin/templates/:template_id/config",
            get(admin_templates::get_template_config).put(admin_templates::save_template_config),
        )
        .route(
            "/api/v1/admin/templates/:template_id/preview",
            put(admin_templates::apply_preview).delete(admin_templates::clear_preview),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_editor));

    // Domain mappings (admin only)
    let admin_routes = Router::new()
        .route(
            "/api/v1/admin/domains",
            get(admin_domains::list_domain_mappings).post(admin_domains::create_domain_mapping),
        )
        .route(
            "/api/v1/admin/domains/:mapping_id",
            axum::routing::patch(admin_domains::update_domain_mapping)
                .delete(admin_domains::delete_domain_mapping),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    // Submission review (reviewer or higher)
    let reviewer_routes = Router::new()
        .route(
            "/api/v1/admin/submissions",
            get(submissions::list_submissions),
        )
        .route(
            "/api/v1/admin/submissions/:submission_id",
            axum::routing::patch(submissions::update_submission_status)
                .delete(submissions::delete_submission),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_reviewer,
        ));

    let ops_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    Router::new()
        .merge(ops_routes)
        .merge(site_routes)
        .merge(submission_routes)
        .merge(editor_routes)
        .merge(admin_routes)
        .merge(reviewer_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            security_headers_middleware,
        ))
        .layer(CompressionLayer::new())
        .layer(RequestBodyLimitLayer::new(config.server.max_body_size))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state)
}
