//! Template configuration accessor.
//!
//! Fetches at most one configuration row per template and decodes it into a
//! [`TemplateConfig`]. Decoding never fails: malformed values degrade to the
//! permissive defaults.

use tracing::warn;
use uuid::Uuid;

use crate::errors::ResolutionError;
use crate::models::{TemplateConfig, TemplateConfigRecord};
use crate::store::SiteStore;

/// Decodes a serialized enabled-sections list.
///
/// Absent, blank, non-JSON, non-array values and arrays containing anything
/// other than strings all decode to an empty list. Blank entries are dropped.
pub fn parse_enabled_sections(raw: Option<&str>) -> Vec<String> {
    let raw = match raw.map(str::trim) {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Vec::new(),
    };

    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(sections) => sections
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        Err(err) => {
            warn!(error = %err, "Malformed enabled_sections value, showing all sections");
            Vec::new()
        }
    }
}

/// Serializes a section list for storage.
pub fn serialize_enabled_sections(sections: &[String]) -> String {
    serde_json::to_string(sections).unwrap_or_else(|_| "[]".to_string())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Converts a stored row into a configuration view.
pub fn decode_template_config(record: TemplateConfigRecord) -> TemplateConfig {
    let enabled_sections = parse_enabled_sections(record.enabled_sections.as_deref());
    TemplateConfig {
        primary_color: non_blank(record.primary_color),
        secondary_color: non_blank(record.secondary_color),
        accent_color: non_blank(record.accent_color),
        font_family: non_blank(record.font_family),
        custom_css: non_blank(record.custom_css),
        enabled_sections,
    }
}

/// Loads the configuration of a template.
///
/// A template without a saved configuration yields an empty one.
pub async fn load_template_config<S>(
    store: &S,
    template_id: Uuid,
) -> Result<TemplateConfig, ResolutionError>
where
    S: SiteStore + ?Sized,
{
    let record = store.find_template_config(template_id).await?;
    Ok(record.map(decode_template_config).unwrap_or_default())
}
