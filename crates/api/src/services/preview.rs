//! Admin live style preview.
//!
//! Each template being edited gets its own in-memory head with a
//! [`StyleInjector`]. Updates for the same template are serialised, so a
//! preview never holds more than one dynamic style block.

use std::collections::HashMap;

use serde::Serialize;
use tokio::sync::Mutex;
use uuid::Uuid;

use domain::models::TemplateConfig;
use domain::services::{HeadElements, StyleHost, StyleInjector};

#[derive(Debug, Clone, Serialize)]
pub struct PreviewResponse {
    pub template_id: Uuid,
    pub style_attached: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css: Option<String>,
    pub head_html: String,
}

#[derive(Debug, Default)]
pub struct PreviewSessions {
    sessions: Mutex<HashMap<Uuid, StyleInjector<HeadElements>>>,
}

impl PreviewSessions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-applies the preview styles for `template_id`, replacing any previous block.
    pub async fn apply(
        &self,
        template_id: Uuid,
        title: &str,
        config: &TemplateConfig,
    ) -> PreviewResponse {
        let mut sessions = self.sessions.lock().await;
        let injector = sessions
            .entry(template_id)
            .or_insert_with(|| StyleInjector::new(HeadElements::with_title(title)));

        let style_attached = injector.apply(&config.style_inputs());
        debug_assert!(injector.host().dynamic_style_count() <= 1);

        tracing::debug!(%template_id, style_attached, "Preview styles applied");

        PreviewResponse {
            template_id,
            style_attached,
            css: injector.host().dynamic_css().map(str::to_string),
            head_html: injector.host().render(),
        }
    }

    /// Ends the preview for `template_id`. Returns `false` if none was open.
    pub async fn clear(&self, template_id: Uuid) -> bool {
        // Dropping the injector detaches its block.
        self.sessions.lock().await.remove(&template_id).is_some()
    }

    pub async fn active_count(&self) -> usize {
        self.sessions.lock().await.len()
    }
}
