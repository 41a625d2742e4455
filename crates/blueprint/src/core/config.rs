//! Render configuration
//!
//! Settings that apply to every diagram in one render call. Per-diagram
//! values (such as a sequence diagram's own message spacing) take
//! precedence over the defaults carried here.

use super::CharacterSet;

/// Vertical distance between consecutive message slots, in pixels
pub const DEFAULT_MESSAGE_SPACING: f64 = 48.0;

/// Configuration shared by all renderers
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Glyphs used by the terminal preview
    pub character_set: CharacterSet,
    /// Prefix for generated element ids (tooltip ids, diagram ids)
    pub id_prefix: String,
    /// Message spacing used when a diagram does not set its own
    pub message_spacing: f64,
    /// Whether `render_page` embeds the generated stylesheet
    pub embed_stylesheet: bool,
}

impl RenderConfig {
    pub fn new(character_set: CharacterSet) -> Self {
        Self {
            character_set,
            ..Self::default()
        }
    }

    pub fn with_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }

    pub fn with_message_spacing(mut self, spacing: f64) -> Self {
        self.message_spacing = spacing;
        self
    }

    pub fn with_stylesheet(mut self, embed: bool) -> Self {
        self.embed_stylesheet = embed;
        self
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            character_set: CharacterSet::default(),
            id_prefix: "bp".to_string(),
            message_spacing: DEFAULT_MESSAGE_SPACING,
            embed_stylesheet: true,
        }
    }
}
