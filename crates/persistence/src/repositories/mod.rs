//! Repository implementations for database operations.

pub mod api_key;
pub mod domain_mapping;
pub mod submission;
pub mod template;
pub mod template_config;

pub use api_key::ApiKeyRepository;
pub use domain_mapping::{DomainMappingInput, DomainMappingRepository};
pub use submission::{SubmissionQuery, SubmissionRepository};
pub use template::TemplateRepository;
pub use template_config::TemplateConfigRepository;
