//! Tracing subscriber setup for the site service.

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::LoggingConfig;

/// Targets held at `warn` regardless of `logging.level`.
const QUIET_TARGETS: &str = "sqlx::query=warn";

/// Filter used when `RUST_LOG` is unset.
fn default_directives(level: &str) -> String {
    let level = level.trim();
    let level = if level.is_empty() { "info" } else { level };
    format!("{},{}", level, QUIET_TARGETS)
}

/// Installs the global subscriber.
///
/// `RUST_LOG` takes precedence over `logging.level`. `logging.format = "json"`
/// emits one JSON object per event; anything else is human-readable.
pub fn init_logging(config: &LoggingConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directives(&config.level)))
        .unwrap_or_else(|_| EnvFilter::new(default_directives("info")));

    let registry = tracing_subscriber::registry().with(env_filter);
    let base = fmt::layer()
        .with_span_events(FmtSpan::CLOSE)
        .with_target(true);

    if config.format == "json" {
        registry.with(base.json().with_current_span(true)).init();
    } else {
        registry.with(base.pretty()).init();
    }
}
