//! Template domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A named bundle of site content and appearance, selectable per domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Template {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub is_default: bool,
    pub is_public: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Template {
    /// Soft-deleted templates take no part in lookups.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    pub fn summary(&self) -> TemplateSummary {
        TemplateSummary {
            id: self.id,
            name: self.name.clone(),
            slug: self.slug.clone(),
            is_default: self.is_default,
        }
    }
}

/// The part of a template exposed with a resolved site context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TemplateSummary {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub is_default: bool,
}

fn default_public() -> bool {
    true
}

/// Request payload for creating a template.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateTemplateRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(min = 2, max = 64, message = "Slug must be 2-64 characters"))]
    #[validate(custom(function = "shared::validation::validate_slug"))]
    pub slug: String,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,

    #[serde(default = "default_public")]
    pub is_public: bool,
}

/// Request payload for updating a template (partial update).
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateTemplateRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(length(min = 2, max = 64, message = "Slug must be 2-64 characters"))]
    #[validate(custom(function = "shared::validation::validate_slug"))]
    pub slug: Option<String>,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,

    pub is_public: Option<bool>,
}

impl UpdateTemplateRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.slug.is_none()
            && self.description.is_none()
            && self.is_public.is_none()
    }
}

/// Request payload for duplicating a template.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct DuplicateTemplateRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(length(min = 2, max = 64, message = "Slug must be 2-64 characters"))]
    #[validate(custom(function = "shared::validation::validate_slug"))]
    pub slug: Option<String>,
}

/// Response for the template list endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListTemplatesResponse {
    pub data: Vec<Template>,
}

/// Picks the slug for a duplicate: `<slug>-copy`, then `<slug>-copy-2`, ...
pub fn duplicate_slug<F>(source_slug: &str, is_taken: F) -> String
where
    F: Fn(&str) -> bool,
{
    let base = format!("{}-copy", source_slug);
    if !is_taken(&base) {
        return base;
    }
    (2..)
        .map(|n| format!("{}-{}", base, n))
        .find(|candidate| !is_taken(candidate))
        .unwrap_or(base)
}
