//! HTTP route handlers.

pub mod admin_domains;
pub mod admin_templates;
pub mod health;
pub mod site;
pub mod submissions;
