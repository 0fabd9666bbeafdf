//! Template configuration model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;
use validator::Validate;

use crate::services::style_injector::StyleInputs;

/// Style and content parameters of a template.
///
/// Every field is optional; an empty configuration renders with system
/// defaults and shows every section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TemplateConfig {
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub accent_color: Option<String>,
    pub font_family: Option<String>,
    /// Free-form CSS, injected verbatim. Only staff can set it.
    pub custom_css: Option<String>,
    #[serde(default)]
    pub enabled_sections: Vec<String>,
}

impl TemplateConfig {
    pub fn is_empty(&self) -> bool {
        *self == TemplateConfig::default()
    }

    pub fn style_inputs(&self) -> StyleInputs<'_> {
        StyleInputs {
            primary_color: self.primary_color.as_deref(),
            secondary_color: self.secondary_color.as_deref(),
            accent_color: self.accent_color.as_deref(),
            font_family: self.font_family.as_deref(),
            custom_css: self.custom_css.as_deref(),
        }
    }
}

/// A template configuration row as stored, before decoding.
///
/// `enabled_sections` holds the serialized JSON list exactly as persisted,
/// which may be absent or malformed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateConfigRecord {
    pub id: Uuid,
    pub template_id: Uuid,
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub accent_color: Option<String>,
    pub font_family: Option<String>,
    pub custom_css: Option<String>,
    pub enabled_sections: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for saving a template configuration.
///
/// The payload replaces the stored configuration as a whole; omitted fields
/// are cleared.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct SaveTemplateConfigRequest {
    #[validate(custom(function = "shared::validation::validate_hex_color"))]
    pub primary_color: Option<String>,

    #[validate(custom(function = "shared::validation::validate_hex_color"))]
    pub secondary_color: Option<String>,

    #[validate(custom(function = "shared::validation::validate_hex_color"))]
    pub accent_color: Option<String>,

    #[validate(length(max = 200, message = "Font family must be at most 200 characters"))]
    pub font_family: Option<String>,

    #[validate(length(max = 50000, message = "Custom CSS must be at most 50000 characters"))]
    pub custom_css: Option<String>,

    #[validate(custom(function = "shared::validation::validate_section_list"))]
    pub enabled_sections: Option<Vec<String>>,
}

impl SaveTemplateConfigRequest {
    /// Blank strings become `None` so they are not validated as colors.
    pub fn normalized(mut self) -> Self {
        fn blank_to_none(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.trim().is_empty())
        }
        self.primary_color = blank_to_none(self.primary_color);
        self.secondary_color = blank_to_none(self.secondary_color);
        self.accent_color = blank_to_none(self.accent_color);
        self.font_family = blank_to_none(self.font_family).map(|f| f.trim().to_string());
        self.custom_css = blank_to_none(self.custom_css);
        self
    }

    pub fn into_config(self) -> TemplateConfig {
        let mut seen = HashSet::new();
        let mut enabled_sections = self.enabled_sections.unwrap_or_default();
        enabled_sections.retain(|section| seen.insert(section.clone()));
        TemplateConfig {
            primary_color: self.primary_color,
            secondary_color: self.secondary_color,
            accent_color: self.accent_color,
            font_family: self.font_family,
            custom_css: self.custom_css,
            enabled_sections,
        }
    }
}

/// Response payload for template configuration endpoints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TemplateConfigResponse {
    pub template_id: Uuid,
    pub config: TemplateConfig,
    /// `None` when the template has never had a configuration saved.
    pub updated_at: Option<DateTime<Utc>>,
}
