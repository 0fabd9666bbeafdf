//! Domain-to-template mapping model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Binds a host (base domain plus optional subdomain) to one template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DomainMapping {
    pub id: Uuid,
    pub template_id: Uuid,
    pub domain: String,
    pub subdomain: Option<String>,
    pub is_active: bool,
    pub ssl_enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DomainMapping {
    /// The host this mapping answers for, e.g. `festival.example.com`.
    pub fn full_domain(&self) -> String {
        compose_full_domain(self.subdomain.as_deref(), &self.domain)
    }

    /// Checks the combined host fits in a DNS name.
    pub fn validate_full_domain(&self) -> Result<(), ValidationError> {
        shared::validation::validate_full_domain(&self.full_domain())
    }
}

/// Joins subdomain and domain with `.`; a blank subdomain is ignored.
pub fn compose_full_domain(subdomain: Option<&str>, domain: &str) -> String {
    match subdomain.map(str::trim).filter(|s| !s.is_empty()) {
        Some(sub) => format!("{}.{}", sub, domain).to_ascii_lowercase(),
        None => domain.to_ascii_lowercase(),
    }
}

/// Normalizes a request host for lookup.
///
/// Trims whitespace, drops any `:port` suffix and trailing dot, and
/// lower-cases. Returns `None` for an empty host.
pub fn normalize_host(raw: &str) -> Option<String> {
    let host = raw.trim();

    let host = if let Some(rest) = host.strip_prefix('[') {
        // IPv6 literal: keep the bracketed address, drop the port
        match rest.split_once(']') {
            Some((addr, _)) => addr,
            None => rest,
        }
    } else {
        match host.rsplit_once(':') {
            Some((name, port)) if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) => {
                name
            }
            _ => host,
        }
    };

    let host = host.trim_end_matches('.');
    if host.is_empty() {
        None
    } else {
        Some(host.to_ascii_lowercase())
    }
}

fn default_true() -> bool {
    true
}

/// Request payload for creating a domain mapping.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
#[validate(schema(function = "validate_create_full_domain", skip_on_field_errors = true))]
pub struct CreateDomainMappingRequest {
    pub template_id: Uuid,

    #[validate(custom(function = "shared::validation::validate_domain_name"))]
    pub domain: String,

    #[validate(custom(function = "shared::validation::validate_subdomain"))]
    pub subdomain: Option<String>,

    #[serde(default = "default_true")]
    pub is_active: bool,

    #[serde(default = "default_true")]
    pub ssl_enabled: bool,
}

impl CreateDomainMappingRequest {
    /// Lower-cases host parts and drops a blank subdomain before validation.
    pub fn normalized(mut self) -> Self {
        self.domain = self.domain.trim().to_ascii_lowercase();
        self.subdomain = self
            .subdomain
            .map(|s| s.trim().to_ascii_lowercase())
            .filter(|s| !s.is_empty());
        self
    }

    pub fn full_domain(&self) -> String {
        compose_full_domain(self.subdomain.as_deref(), &self.domain)
    }
}

fn validate_create_full_domain(
    request: &CreateDomainMappingRequest,
) -> Result<(), ValidationError> {
    shared::validation::validate_full_domain(&request.full_domain())
}

/// Allows an empty string, which clears the subdomain on update.
fn validate_subdomain_update(subdomain: &str) -> Result<(), ValidationError> {
    if subdomain.is_empty() {
        Ok(())
    } else {
        shared::validation::validate_subdomain(subdomain)
    }
}

/// Request payload for updating a domain mapping (partial update).
///
/// Sending `"subdomain": ""` removes the subdomain.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateDomainMappingRequest {
    pub template_id: Option<Uuid>,

    #[validate(custom(function = "shared::validation::validate_domain_name"))]
    pub domain: Option<String>,

    #[validate(custom(function = "validate_subdomain_update"))]
    pub subdomain: Option<String>,

    pub is_active: Option<bool>,

    pub ssl_enabled: Option<bool>,
}

impl UpdateDomainMappingRequest {
    pub fn normalized(mut self) -> Self {
        self.domain = self.domain.map(|d| d.trim().to_ascii_lowercase());
        self.subdomain = self.subdomain.map(|s| s.trim().to_ascii_lowercase());
        self
    }

    /// Applies this update on top of an existing mapping, without persisting.
    ///
    /// Field formats are checked by `validate`; the combined host length
    /// of the result is checked with [`DomainMapping::validate_full_domain`].
    pub fn apply_to(&self, mapping: &DomainMapping) -> DomainMapping {
        let mut updated = mapping.clone();
        if let Some(template_id) = self.template_id {
            updated.template_id = template_id;
        }
        if let Some(domain) = &self.domain {
            updated.domain = domain.clone();
        }
        if let Some(subdomain) = &self.subdomain {
            updated.subdomain = Some(subdomain.clone()).filter(|s| !s.is_empty());
        }
        if let Some(is_active) = self.is_active {
            updated.is_active = is_active;
        }
        if let Some(ssl_enabled) = self.ssl_enabled {
            updated.ssl_enabled = ssl_enabled;
        }
        updated
    }
}

/// Response payload for mapping operations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct DomainMappingResponse {
    #[serde(flatten)]
    pub mapping: DomainMapping,
    pub full_domain: String,
}

impl From<DomainMapping> for DomainMappingResponse {
    fn from(mapping: DomainMapping) -> Self {
        let full_domain = mapping.full_domain();
        Self {
            mapping,
            full_domain,
        }
    }
}

/// Response for the mapping list endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListDomainMappingsResponse {
    pub data: Vec<DomainMappingResponse>,
}
