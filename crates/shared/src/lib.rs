//! Shared utilities and common types for the SISF site backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Cryptographic utilities (API key hashing)
//! - Cursor-based pagination for admin listings
//! - Common field validation (colors, slugs, host names)

pub mod crypto;
pub mod pagination;
pub mod validation;
