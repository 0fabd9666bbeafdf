//! Domain layer for the SISF site backend.
//!
//! This crate contains:
//! - Domain models (Template, DomainMapping, TemplateConfig, Submission)
//! - The [`store::SiteStore`] seam the resolution pipeline reads through
//! - Template resolution services (domain lookup, config accessor,
//!   style injector, section gate, context cache)
//! - Domain error types

pub mod errors;
pub mod models;
pub mod services;
pub mod store;

pub use errors::{ResolutionError, StoreError};
pub use store::SiteStore;
