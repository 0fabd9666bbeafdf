//! Common validation utilities.

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

/// Maximum length of a fully-qualified host name.
pub const MAX_HOST_LENGTH: usize = 253;

/// Maximum length of a stored subdomain prefix.
pub const MAX_SUBDOMAIN_LENGTH: usize = 63;

lazy_static! {
    static ref HEX_COLOR_REGEX: Regex =
        Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").unwrap();
    static ref SLUG_REGEX: Regex = Regex::new(r"^[a-z0-9][a-z0-9-]*[a-z0-9]$").unwrap();
    static ref HOST_LABEL_REGEX: Regex =
        Regex::new(r"^[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?$").unwrap();
    static ref SECTION_ID_REGEX: Regex = Regex::new(r"^[a-z0-9][a-z0-9_-]{0,63}$").unwrap();
}

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

/// Validates a `#rgb` / `#rrggbb` color token.
pub fn validate_hex_color(color: &str) -> Result<(), ValidationError> {
    if HEX_COLOR_REGEX.is_match(color) {
        Ok(())
    } else {
        Err(error(
            "hex_color",
            "Color must be a hex value like #1a2b3c or #abc",
        ))
    }
}

/// Validates slug format: lowercase alphanumeric with hyphens, no leading/trailing hyphens.
pub fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    if SLUG_REGEX.is_match(slug) {
        Ok(())
    } else {
        Err(error(
            "slug_format",
            "Slug must be lowercase alphanumeric with hyphens, no leading/trailing hyphens",
        ))
    }
}

fn is_valid_host(value: &str, min_labels: usize) -> bool {
    if value.is_empty() || value.len() > MAX_HOST_LENGTH {
        return false;
    }
    let labels: Vec<&str> = value.split('.').collect();
    labels.len() >= min_labels && labels.iter().all(|label| HOST_LABEL_REGEX.is_match(label))
}

/// Validates a base domain such as `example.com` (lowercase, at least two labels).
pub fn validate_domain_name(domain: &str) -> Result<(), ValidationError> {
    if is_valid_host(domain, 2) {
        Ok(())
    } else {
        Err(error(
            "domain_format",
            "Domain must be a lowercase host name such as example.com",
        ))
    }
}

/// Validates a subdomain prefix such as `festival` or `eu.festival`.
pub fn validate_subdomain(subdomain: &str) -> Result<(), ValidationError> {
    if subdomain.len() > MAX_SUBDOMAIN_LENGTH {
        return Err(error(
            "subdomain_length",
            "Subdomain must be at most 63 characters",
        ));
    }
    if is_valid_host(subdomain, 1) {
        Ok(())
    } else {
        Err(error(
            "subdomain_format",
            "Subdomain must be lowercase letters, digits and hyphens",
        ))
    }
}

/// Validates the combined `subdomain.domain` host length.
pub fn validate_full_domain(full_domain: &str) -> Result<(), ValidationError> {
    if full_domain.len() <= MAX_HOST_LENGTH {
        Ok(())
    } else {
        Err(error(
            "full_domain_length",
            "Subdomain and domain together must be at most 253 characters",
        ))
    }
}

/// Validates a page section identifier such as `hero` or `speakers_grid`.
pub fn validate_section_id(section_id: &str) -> Result<(), ValidationError> {
    if SECTION_ID_REGEX.is_match(section_id) {
        Ok(())
    } else {
        Err(error(
            "section_id_format",
            "Section identifiers must be lowercase letters, digits, '_' or '-'",
        ))
    }
}

/// Validates every entry of a section list.
pub fn validate_section_list(sections: &[String]) -> Result<(), ValidationError> {
    sections.iter().try_for_each(|s| validate_section_id(s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_hex_color() {
        assert!(validate_hex_color("#111111").is_ok());
        assert!(validate_hex_color("#abc").is_ok());
        assert!(validate_hex_color("#A1B2C3").is_ok());
        assert!(validate_hex_color("111111").is_err());
        assert!(validate_hex_color("#11111").is_err());
        assert!(validate_hex_color("#gggggg").is_err());
        assert!(validate_hex_color("red").is_err());
    }

    #[test]
    fn test_validate_hex_color_error_message() {
        let err = validate_hex_color("blue").unwrap_err();
        assert_eq!(
            err.message.unwrap().to_string(),
            "Color must be a hex value like #1a2b3c or #abc"
        );
    }

    #[test]
    fn test_validate_slug() {
        assert!(validate_slug("sisf-2026").is_ok());
        assert!(validate_slug("a1").is_ok());
        assert!(validate_slug("-leading").is_err());
        assert!(validate_slug("trailing-").is_err());
        assert!(validate_slug("Upper").is_err());
        assert!(validate_slug("a").is_err());
    }

    #[test]
    fn test_validate_domain_name() {
        assert!(validate_domain_name("example.com").is_ok());
        assert!(validate_domain_name("sisf.co.uk").is_ok());
        assert!(validate_domain_name("localhost").is_err());
        assert!(validate_domain_name("Example.com").is_err());
        assert!(validate_domain_name("exa mple.com").is_err());
        assert!(validate_domain_name("-bad.com").is_err());
        assert!(validate_domain_name("").is_err());
    }

    #[test]
    fn test_validate_domain_name_too_long() {
        let long = format!("{}.com", "a.".repeat(130));
        assert!(validate_domain_name(&long).is_err());
    }

    #[test]
    fn test_validate_subdomain() {
        assert!(validate_subdomain("festival").is_ok());
        assert!(validate_subdomain("eu.festival").is_ok());
        assert!(validate_subdomain("").is_err());
        assert!(validate_subdomain("fest_ival").is_err());
    }

    #[test]
    fn test_validate_subdomain_length() {
        let max = format!("{}.{}", "a".repeat(31), "b".repeat(31));
        assert_eq!(max.len(), 63);
        assert!(validate_subdomain(&max).is_ok());

        let over = format!("{}.{}", "a".repeat(32), "b".repeat(31));
        let err = validate_subdomain(&over).unwrap_err();
        assert_eq!(err.code, "subdomain_length");
    }

    #[test]
    fn test_validate_full_domain_length() {
        let domain = format!("{}.com", "d".repeat(60));
        let at_limit = format!("{}.{}", "s".repeat(253 - domain.len() - 1), domain);
        assert_eq!(at_limit.len(), 253);
        assert!(validate_full_domain(&at_limit).is_ok());

        let err = validate_full_domain(&format!("x{}", at_limit)).unwrap_err();
        assert_eq!(err.code, "full_domain_length");
    }

    #[test]
    fn test_validate_section_id() {
        assert!(validate_section_id("hero").is_ok());
        assert!(validate_section_id("speakers_grid").is_ok());
        assert!(validate_section_id("faq-2").is_ok());
        assert!(validate_section_id("").is_err());
        assert!(validate_section_id("Hero").is_err());
        assert!(validate_section_id("_hidden").is_err());
    }

    #[test]
    fn test_validate_section_list() {
        assert!(validate_section_list(&[]).is_ok());
        assert!(validate_section_list(&["hero".into(), "faq".into()]).is_ok());
        assert!(validate_section_list(&["hero".into(), "Bad Id".into()]).is_err());
    }
}
