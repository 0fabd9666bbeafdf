//! Application services used by the route handlers.

pub mod admin_bootstrap;
pub mod preview;
pub mod site_shell;

pub use admin_bootstrap::{bootstrap_admin_key, BootstrapError, BootstrapOutcome};
pub use preview::{PreviewResponse, PreviewSessions};
pub use site_shell::{festive_theme, render_fallback, render_site};
