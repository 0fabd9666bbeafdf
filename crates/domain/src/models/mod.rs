//! Domain models for the SISF site.

pub mod domain_mapping;
pub mod resolved_context;
pub mod staff_role;
pub mod submission;
pub mod template;
pub mod template_config;

pub use domain_mapping::DomainMapping;
pub use resolved_context::{ResolutionSource, ResolvedContext};
pub use staff_role::{resolve_staff_role, StaffRole};
pub use submission::{Submission, SubmissionKind, SubmissionStatus};
pub use template::{Template, TemplateSummary};
pub use template_config::{TemplateConfig, TemplateConfigRecord};
