//! Visibility check for named page regions.

/// Returns `true` if `section_id` should render.
///
/// An empty list means the template never restricted its sections, so
/// everything renders.
pub fn section_enabled<S: AsRef<str>>(section_id: &str, enabled_sections: &[S]) -> bool {
    enabled_sections.is_empty()
        || enabled_sections
            .iter()
            .any(|section| section.as_ref() == section_id)
}
