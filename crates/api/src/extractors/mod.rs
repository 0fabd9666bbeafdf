//! Custom Axum extractors.

pub mod api_key;
pub mod client_ip;

pub use api_key::{StaffAuth, API_KEY_HEADER};
pub use client_ip::ClientIp;
