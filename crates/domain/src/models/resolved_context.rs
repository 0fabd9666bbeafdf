//! The transient result of resolving a request host.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::template::TemplateSummary;
use crate::models::template_config::TemplateConfig;
use crate::services::section_gate::section_enabled;

/// How the template for a host was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionSource {
    /// An active domain mapping matched the host.
    DomainMapping,
    /// No mapping matched; the default template was used.
    DefaultTemplate,
}

impl std::fmt::Display for ResolutionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolutionSource::DomainMapping => write!(f, "domain_mapping"),
            ResolutionSource::DefaultTemplate => write!(f, "default_template"),
        }
    }
}

/// Template and configuration selected for one host.
///
/// Lives for a single page view (or one cache TTL); never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ResolvedContext {
    pub host: String,
    pub source: ResolutionSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mapping_id: Option<Uuid>,
    pub template: TemplateSummary,
    pub config: TemplateConfig,
}

impl ResolvedContext {
    /// Parsed enabled-section list; empty means "no restriction".
    pub fn enabled_sections(&self) -> &[String] {
        &self.config.enabled_sections
    }

    /// Raw custom CSS, unsanitized.
    pub fn custom_css(&self) -> Option<&str> {
        self.config.custom_css.as_deref()
    }

    pub fn section_enabled(&self, section_id: &str) -> bool {
        section_enabled(section_id, self.enabled_sections())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(sections: Vec<String>) -> ResolvedContext {
        ResolvedContext {
            host: "festival.example.com".to_string(),
            source: ResolutionSource::DomainMapping,
            mapping_id: Some(Uuid::new_v4()),
            template: TemplateSummary {
                id: Uuid::new_v4(),
                name: "Festival".to_string(),
                slug: "festival".to_string(),
                is_default: false,
            },
            config: TemplateConfig {
                custom_css: Some(".hero { color: red; }".to_string()),
                enabled_sections: sections,
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_section_enabled_delegates_to_gate() {
        let ctx = context(vec!["hero".to_string()]);
        assert!(ctx.section_enabled("hero"));
        assert!(!ctx.section_enabled("faq"));

        let open = context(vec![]);
        assert!(open.section_enabled("faq"));
    }

    #[test]
    fn test_custom_css_accessor() {
        assert_eq!(
            context(vec![]).custom_css(),
            Some(".hero { color: red; }")
        );
    }

    #[test]
    fn test_source_serialization() {
        assert_eq!(
            serde_json::to_string(&ResolutionSource::DefaultTemplate).unwrap(),
            "\"default_template\""
        );
        assert_eq!(ResolutionSource::DomainMapping.to_string(), "domain_mapping");
    }
}
