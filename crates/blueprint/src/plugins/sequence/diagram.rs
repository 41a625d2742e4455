//! Declarative sequence diagram
//!
//! The scene-level form of a sequence diagram: ordered actors and
//! messages plus an optional spacing override. Validation builds a
//! [`SequenceDatabase`], so every configuration error surfaces before any
//! markup exists.

use anyhow::Result;
use serde::Deserialize;

use super::database::{Actor, Message, SequenceDatabase};
use super::layout::{LayoutConfig, SequenceLayoutAlgorithm, SequenceLayoutResult};
use super::renderer::SequenceAsciiRenderer;
use super::svg::SequenceSvgRenderer;
use crate::core::{CharacterSet, DiagramError, RenderConfig};

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceDiagram {
    pub actors: Vec<Actor>,
    #[serde(default)]
    pub messages: Vec<Message>,
    /// Vertical distance between message slots, overriding the default
    #[serde(default)]
    pub message_spacing: Option<f64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub class_name: Option<String>,
}

impl SequenceDiagram {
    pub fn new(actors: Vec<Actor>, messages: Vec<Message>) -> Self {
        Self {
            actors,
            messages,
            ..Self::default()
        }
    }

    pub fn with_message_spacing(mut self, spacing: f64) -> Self {
        self.message_spacing = Some(spacing);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    /// Validate and convert into a database
    pub fn to_database(&self) -> Result<SequenceDatabase, DiagramError> {
        if let Some(spacing) = self.message_spacing {
            if !spacing.is_finite() || spacing <= 0.0 {
                return Err(DiagramError::layout_error(format!(
                    "message spacing must be a positive number, got {spacing}"
                )));
            }
        }
        let mut database =
            SequenceDatabase::from_parts(self.actors.iter().cloned(), self.messages.iter().cloned())?;
        database.set_message_spacing(self.message_spacing);
        database.set_title(self.title.clone());
        Ok(database)
    }

    /// Pixel layout, using this diagram's spacing or `default_spacing`
    pub fn layout(&self, default_spacing: f64) -> Result<SequenceLayoutResult> {
        let database = self.to_database()?;
        let spacing = self.message_spacing.unwrap_or(default_spacing);
        SequenceLayoutAlgorithm::with_config(LayoutConfig::svg().with_message_spacing(spacing))
            .layout(&database)
    }

    pub fn render_svg(&self, config: &RenderConfig) -> Result<String> {
        let database = self.to_database()?;
        SequenceSvgRenderer::with_config(config.clone()).render(&database)
    }

    pub fn render_text(&self, style: CharacterSet) -> Result<String> {
        let database = self.to_database()?;
        SequenceAsciiRenderer::with_style(style).render(&database)
    }
}

impl From<SequenceDatabase> for SequenceDiagram {
    fn from(database: SequenceDatabase) -> Self {
        Self {
            actors: database.actors().to_vec(),
            messages: database.messages().to_vec(),
            message_spacing: database.message_spacing(),
            title: database.title().map(str::to_string),
            class_name: None,
        }
    }
}
