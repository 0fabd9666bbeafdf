//! Server-rendered page shell for the public site.

use chrono::NaiveDate;

use domain::models::ResolvedContext;
use domain::services::{
    escape_html, festive_theme_for, FestiveTheme, HeadElements, StyleHost, StyleInjector,
};

/// Sections rendered by the shell, in page order.
pub const SHELL_SECTIONS: &[&str] = &[
    "hero",
    "about",
    "speakers",
    "agenda",
    "startups",
    "sponsors",
    "investors",
    "venue",
    "faq",
    "contact",
];

const BASELINE_CSS: &str = "body { margin: 0; font-family: system-ui, sans-serif; color: #1a1a1a; background: #ffffff; }";

/// Festive theme for `today`, or `None` when festive effects are switched off.
pub fn festive_theme(enabled: bool, today: NaiveDate) -> FestiveTheme {
    if enabled {
        festive_theme_for(today)
    } else {
        FestiveTheme::None
    }
}

/// Renders the page for a resolved context.
///
/// Dynamic styles go through a [`StyleInjector`] bound to the page head, so
/// the page carries at most one dynamic style block.
pub fn render_site(context: &ResolvedContext, festive: FestiveTheme) -> String {
    let mut head = HeadElements::with_title(context.template.name.clone());
    head.push_meta("sisf-template", context.template.slug.clone());

    let mut injector = StyleInjector::new(&mut head);
    injector.apply(&context.config.style_inputs());

    let mut body_attrs = format!(
        " data-template=\"{}\"",
        escape_html(&context.template.slug)
    );
    if let Some(effect) = festive.effect() {
        body_attrs.push_str(&format!(
            " data-festive-theme=\"{}\" data-festive-effect=\"{}\"",
            festive, effect
        ));
    }

    let sections: String = SHELL_SECTIONS
        .iter()
        .filter(|id| context.section_enabled(id))
        .map(|id| format!("<section id=\"{id}\" data-section=\"{id}\"></section>\n"))
        .collect();

    render_document(injector.host(), &body_attrs, &sections)
}

/// Minimal page served when no template can be resolved.
pub fn render_fallback(site_name: &str, message: &str) -> String {
    let mut head = HeadElements::with_title(site_name);
    head.attach_style("baseline-styles", BASELINE_CSS.to_string());

    let body = format!(
        "<main class=\"fallback\">\n<h1>{}</h1>\n<p>{}</p>\n</main>\n",
        escape_html(site_name),
        escape_html(message)
    );

    render_document(&head, " data-fallback=\"true\"", &body)
}

fn render_document(head: &HeadElements, body_attrs: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n{}</head>\n<body{}>\n{}</body>\n</html>\n",
        head.render(),
        body_attrs,
        body
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::models::{ResolutionSource, TemplateConfig, TemplateSummary};
    use uuid::Uuid;

    fn context(config: TemplateConfig) -> ResolvedContext {
        ResolvedContext {
            host: "festival.example.com".to_string(),
            source: ResolutionSource::DomainMapping,
            mapping_id: None,
            template: TemplateSummary {
                id: Uuid::new_v4(),
                name: "Festival <2026>".to_string(),
                slug: "festival".to_string(),
                is_default: false,
            },
            config,
        }
    }

    #[test]
    fn test_render_site_injects_single_style_block() {
        let html = render_site(
            &context(TemplateConfig {
                primary_color: Some("#111111".to_string()),
                ..Default::default()
            }),
            FestiveTheme::None,
        );

        assert_eq!(html.matches("<style id=\"template-custom-styles\">").count(), 1);
        assert!(html.contains("--color-primary: #111111;"));
        assert!(html.contains("<title>Festival &lt;2026&gt;</title>"));
        assert!(!html.contains("data-festive-theme"));
    }

    #[test]
    fn test_render_site_without_styles_has_no_block() {
        let html = render_site(&context(TemplateConfig::default()), FestiveTheme::None);
        assert!(!html.contains("<style"));
        for id in SHELL_SECTIONS {
            assert!(html.contains(&format!("data-section=\"{id}\"")));
        }
    }

    #[test]
    fn test_render_site_gates_sections() {
        let html = render_site(
            &context(TemplateConfig {
                enabled_sections: vec!["hero".to_string(), "faq".to_string()],
                ..Default::default()
            }),
            FestiveTheme::None,
        );

        assert!(html.contains("data-section=\"hero\""));
        assert!(html.contains("data-section=\"faq\""));
        assert!(!html.contains("data-section=\"speakers\""));
    }

    #[test]
    fn test_render_site_festive_attributes() {
        let html = render_site(&context(TemplateConfig::default()), FestiveTheme::Halloween);
        assert!(html.contains("data-festive-theme=\"halloween\" data-festive-effect=\"bats\""));
    }

    #[test]
    fn test_render_fallback_is_never_blank() {
        let html = render_fallback("SISF 2026", "Site is being set up");
        assert!(html.contains("<h1>SISF 2026</h1>"));
        assert!(html.contains("baseline-styles"));
        assert!(html.contains("data-fallback=\"true\""));
    }

    #[test]
    fn test_festive_theme_switch() {
        let halloween = NaiveDate::from_ymd_opt(2026, 10, 31).unwrap();
        assert_eq!(festive_theme(true, halloween), FestiveTheme::Halloween);
        assert_eq!(festive_theme(false, halloween), FestiveTheme::None);
    }
}
