//! Template resolution services.

pub mod context_cache;
pub mod seasonal_theme;
pub mod section_gate;
pub mod style_injector;
pub mod template_config;
pub mod template_resolution;

#[cfg(test)]
pub(crate) mod test_support;

pub use context_cache::{CacheStatus, CacheTicket, ContextCache};
pub use seasonal_theme::{festive_theme_for, FestiveTheme};
pub use section_gate::section_enabled;
pub use style_injector::{
    build_style_block, escape_html, HeadElements, StyleBlockId, StyleHost, StyleInjector,
    StyleInputs, DYNAMIC_STYLE_ELEMENT_ID,
};
pub use template_config::{
    decode_template_config, load_template_config, parse_enabled_sections,
    serialize_enabled_sections,
};
pub use template_resolution::{select_default_template, TemplateResolver};
