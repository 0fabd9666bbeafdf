//! Persistence layer for the SISF site backend.
//!
//! This crate contains:
//! - Database connection management
//! - Entity definitions (database row mappings)
//! - Repository implementations
//! - [`store::PgSiteStore`], the PostgreSQL-backed `SiteStore`

pub mod db;
pub mod entities;
pub mod metrics;
pub mod repositories;
pub mod store;

pub use store::PgSiteStore;
