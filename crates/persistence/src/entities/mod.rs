//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod api_key;
pub mod domain_mapping;
pub mod submission;
pub mod template;
pub mod template_config;

pub use api_key::ApiKeyEntity;
pub use domain_mapping::DomainMappingEntity;
pub use submission::SubmissionEntity;
pub use template::TemplateEntity;
pub use template_config::TemplateConfigEntity;
