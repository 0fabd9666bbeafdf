//! Style injector.
//!
//! Builds the dynamic style block of a template and keeps it attached to a
//! document head. At most one dynamic block is attached at any time: every
//! new application releases the previous block first, and dropping the
//! injector releases whatever it still holds.
//!
//! Custom CSS is copied into the block verbatim. It is only writable by
//! authenticated staff and is not sanitized.

use std::fmt::Write as _;

/// Element id of the dynamic style block in rendered pages.
pub const DYNAMIC_STYLE_ELEMENT_ID: &str = "template-custom-styles";

/// Raw style parameters of a template.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StyleInputs<'a> {
    pub primary_color: Option<&'a str>,
    pub secondary_color: Option<&'a str>,
    pub accent_color: Option<&'a str>,
    pub font_family: Option<&'a str>,
    pub custom_css: Option<&'a str>,
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl StyleInputs<'_> {
    pub fn is_blank(&self) -> bool {
        present(self.primary_color).is_none()
            && present(self.secondary_color).is_none()
            && present(self.accent_color).is_none()
            && present(self.font_family).is_none()
            && present(self.custom_css).is_none()
    }
}

/// Synthesizes the CSS of a dynamic style block.
///
/// Returns `None` when every input is blank.
pub fn build_style_block(inputs: &StyleInputs<'_>) -> Option<String> {
    if inputs.is_blank() {
        return None;
    }

    let variables = [
        ("--color-primary", present(inputs.primary_color)),
        ("--color-secondary", present(inputs.secondary_color)),
        ("--color-accent", present(inputs.accent_color)),
        ("--font-family", present(inputs.font_family)),
    ];

    let mut css = String::new();
    if variables.iter().any(|(_, value)| value.is_some()) {
        css.push_str(":root {\n");
        for (name, value) in variables {
            if let Some(value) = value {
                let _ = writeln!(css, "  {}: {};", name, value);
            }
        }
        css.push_str("}\n");
    }

    if present(inputs.font_family).is_some() {
        css.push_str("body {\n  font-family: var(--font-family);\n}\n");
    }

    // Unsanitized; trimmed only for layout.
    if let Some(custom) = present(inputs.custom_css) {
        css.push_str(custom);
        css.push('\n');
    }

    Some(css)
}

/// Handle of one attached style block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StyleBlockId(u64);

/// A document that style blocks can be attached to.
pub trait StyleHost {
    fn attach_style(&mut self, element_id: &str, css: String) -> StyleBlockId;

    /// Returns `false` if the block was not attached.
    fn detach_style(&mut self, block: StyleBlockId) -> bool;

    fn dynamic_style_count(&self) -> usize;
}

impl<T: StyleHost + ?Sized> StyleHost for &mut T {
    fn attach_style(&mut self, element_id: &str, css: String) -> StyleBlockId {
        (**self).attach_style(element_id, css)
    }

    fn detach_style(&mut self, block: StyleBlockId) -> bool {
        (**self).detach_style(block)
    }

    fn dynamic_style_count(&self) -> usize {
        (**self).dynamic_style_count()
    }
}

/// Owns the single dynamic style slot of a [`StyleHost`].
pub struct StyleInjector<H: StyleHost> {
    host: H,
    attached: Option<StyleBlockId>,
}

impl<H: StyleHost> StyleInjector<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            attached: None,
        }
    }

    /// Replaces the attached block with one built from `inputs`.
    ///
    /// Returns `true` if a block is attached afterwards.
    pub fn apply(&mut self, inputs: &StyleInputs<'_>) -> bool {
        self.release();

        match build_style_block(inputs) {
            Some(css) => {
                let block = self.host.attach_style(DYNAMIC_STYLE_ELEMENT_ID, css);
                self.attached = Some(block);
                true
            }
            None => false,
        }
    }

    /// Detaches the current block, if any.
    pub fn release(&mut self) {
        if let Some(block) = self.attached.take() {
            if !self.host.detach_style(block) {
                tracing::warn!(?block, "Dynamic style block was already detached");
            }
        }
    }

    pub fn is_attached(&self) -> bool {
        self.attached.is_some()
    }

    pub fn host(&self) -> &H {
        &self.host
    }
}

impl<H: StyleHost> Drop for StyleInjector<H> {
    fn drop(&mut self) {
        self.release();
    }
}

impl<H: StyleHost + std::fmt::Debug> std::fmt::Debug for StyleInjector<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StyleInjector")
            .field("host", &self.host)
            .field("attached", &self.attached)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum HeadNode {
    Title(String),
    Meta { name: String, content: String },
    Style {
        block: StyleBlockId,
        element_id: String,
        css: String,
    },
}

/// In-memory document head.
#[derive(Debug, Clone, Default)]
pub struct HeadElements {
    nodes: Vec<HeadNode>,
    next_block: u64,
}

impl HeadElements {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(title: impl Into<String>) -> Self {
        let mut head = Self::new();
        head.nodes.push(HeadNode::Title(title.into()));
        head
    }

    pub fn push_meta(&mut self, name: impl Into<String>, content: impl Into<String>) {
        self.nodes.push(HeadNode::Meta {
            name: name.into(),
            content: content.into(),
        });
    }

    /// CSS of the attached dynamic block.
    pub fn dynamic_css(&self) -> Option<&str> {
        self.nodes.iter().find_map(|node| match node {
            HeadNode::Style { css, .. } => Some(css.as_str()),
            _ => None,
        })
    }

    /// Renders the head contents as HTML.
    pub fn render(&self) -> String {
        let mut html = String::new();
        for node in &self.nodes {
            match node {
                HeadNode::Title(title) => {
                    let _ = writeln!(html, "<title>{}</title>", escape_html(title));
                }
                HeadNode::Meta { name, content } => {
                    let _ = writeln!(
                        html,
                        "<meta name=\"{}\" content=\"{}\">",
                        escape_html(name),
                        escape_html(content)
                    );
                }
                HeadNode::Style {
                    element_id, css, ..
                } => {
                    let _ = writeln!(
                        html,
                        "<style id=\"{}\">\n{}</style>",
                        escape_html(element_id),
                        css
                    );
                }
            }
        }
        html
    }
}

impl StyleHost for HeadElements {
    fn attach_style(&mut self, element_id: &str, css: String) -> StyleBlockId {
        self.next_block += 1;
        let block = StyleBlockId(self.next_block);
        self.nodes.push(HeadNode::Style {
            block,
            element_id: element_id.to_string(),
            css,
        });
        block
    }

    fn detach_style(&mut self, block: StyleBlockId) -> bool {
        let before = self.nodes.len();
        self.nodes
            .retain(|node| !matches!(node, HeadNode::Style { block: b, .. } if *b == block));
        self.nodes.len() != before
    }

    fn dynamic_style_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| matches!(node, HeadNode::Style { .. }))
            .count()
    }
}

/// Escapes text for HTML element content and attribute values.
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn colors(primary: &str) -> StyleInputs<'_> {
        StyleInputs {
            primary_color: Some(primary),
            ..Default::default()
        }
    }

    #[test]
    fn test_blank_inputs_build_nothing() {
        assert_eq!(build_style_block(&StyleInputs::default()), None);
        let whitespace = StyleInputs {
            font_family: Some("  "),
            custom_css: Some(""),
            ..Default::default()
        };
        assert_eq!(build_style_block(&whitespace), None);
    }

    #[test]
    fn test_block_contains_only_present_tokens() {
        let css = build_style_block(&StyleInputs {
            primary_color: Some("#111111"),
            accent_color: Some("#ff0066"),
            ..Default::default()
        })
        .unwrap();
        assert!(css.starts_with(":root {\n"));
        assert!(css.contains("  --color-primary: #111111;\n"));
        assert!(css.contains("  --color-accent: #ff0066;\n"));
        assert!(!css.contains("--color-secondary"));
        assert!(!css.contains("body"));
    }

    #[test]
    fn test_font_adds_body_rule() {
        let css = build_style_block(&StyleInputs {
            font_family: Some("'Inter', sans-serif"),
            ..Default::default()
        })
        .unwrap();
        assert!(css.contains("--font-family: 'Inter', sans-serif;"));
        assert!(css.contains("body {\n  font-family: var(--font-family);\n}"));
    }

    #[test]
    fn test_custom_css_appended_verbatim_after_variables() {
        let custom = ".hero { background: url(\"x.png\"); } </style><b>";
        let css = build_style_block(&StyleInputs {
            primary_color: Some("#111"),
            custom_css: Some(custom),
            ..Default::default()
        })
        .unwrap();
        let vars_end = css.find("}\n").unwrap();
        let custom_at = css.find(custom).unwrap();
        assert!(custom_at > vars_end);
    }

    #[test]
    fn test_custom_css_only_has_no_root_block() {
        let css = build_style_block(&StyleInputs {
            custom_css: Some("h1 { color: red; }"),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(css, "h1 { color: red; }\n");
    }

    #[test]
    fn test_repeated_apply_keeps_single_block() {
        let mut head = HeadElements::with_title("SISF 2026");
        {
            let mut injector = StyleInjector::new(&mut head);
            for primary in ["#111111", "#222222", "#333333", "#444444"] {
                assert!(injector.apply(&colors(primary)));
                assert_eq!(injector.host().dynamic_style_count(), 1);
            }
            assert!(injector
                .host()
                .dynamic_css()
                .unwrap()
                .contains("#444444"));
        }
        assert_eq!(head.dynamic_style_count(), 0);
    }

    #[test]
    fn test_blank_apply_reverts_to_baseline() {
        let mut injector = StyleInjector::new(HeadElements::new());
        assert!(injector.apply(&colors("#111111")));
        assert!(!injector.apply(&StyleInputs::default()));
        assert_eq!(injector.host().dynamic_style_count(), 0);
        assert!(!injector.is_attached());
    }

    #[test]
    fn test_single_block_over_mixed_sequence() {
        let inputs = [
            colors("#111111"),
            StyleInputs::default(),
            StyleInputs {
                custom_css: Some("p { margin: 0; }"),
                ..Default::default()
            },
            StyleInputs::default(),
            StyleInputs::default(),
            colors("#abcdef"),
            colors("#abcdef"),
        ];
        let mut injector = StyleInjector::new(HeadElements::new());
        for input in inputs.iter().cycle().take(50) {
            let attached = injector.apply(input);
            let count = injector.host().dynamic_style_count();
            assert!(count <= 1);
            assert_eq!(count == 1, attached);
        }
    }

    #[test]
    fn test_release_and_drop_detach() {
        let mut head = HeadElements::new();
        let mut injector = StyleInjector::new(&mut head);
        injector.apply(&colors("#111111"));
        injector.release();
        assert_eq!(injector.host().dynamic_style_count(), 0);
        injector.release();
        assert!(!injector.is_attached());
    }

    #[test]
    fn test_render_escapes_metadata_but_not_css() {
        let mut head = HeadElements::with_title("SISF <2026>");
        head.push_meta("description", "Startups & \"investors\"");
        let mut injector = StyleInjector::new(head);
        injector.apply(&StyleInputs {
            custom_css: Some("a > b { color: red; }"),
            ..Default::default()
        });

        let html = injector.host().render();
        assert!(html.contains("<title>SISF &lt;2026&gt;</title>"));
        assert!(html.contains("content=\"Startups &amp; &quot;investors&quot;\""));
        assert!(html.contains("<style id=\"template-custom-styles\">"));
        assert!(html.contains("a > b { color: red; }"));
    }
}
