//! Declarative scenes
//!
//! A scene is a titled list of elements loaded from JSON. Rendering is all
//! or nothing: every nested sequence diagram is validated before any
//! markup is produced.

use anyhow::Result;
use serde::Deserialize;
use tracing::{debug, info, span, Level};

use super::element::{class, Component, Element, RenderContext};
use crate::core::theme::stylesheet;
use crate::core::{Detector, DiagramError, RenderConfig};
use crate::plugins::sequence::SequenceDiagram;

/// One concrete diagram composed from primitives
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub elements: Vec<Element>,
}

impl Scene {
    pub fn new(elements: Vec<Element>) -> Self {
        Self {
            elements,
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Load a scene from JSON
    pub fn from_json(input: &str) -> Result<Self, DiagramError> {
        let scene: Scene = serde_json::from_str(input)?;
        debug!(elements = scene.elements.len(), "Loaded scene");
        Ok(scene)
    }

    /// Check every element, failing on the first configuration error
    pub fn validate(&self) -> Result<(), DiagramError> {
        self.elements.iter().try_for_each(|e| e.validate())
    }

    /// Every sequence diagram in the scene, depth first
    pub fn sequences(&self) -> Vec<&SequenceDiagram> {
        fn collect<'a>(element: &'a Element, out: &mut Vec<&'a SequenceDiagram>) {
            match element {
                Element::Sequence(diagram) => out.push(diagram),
                Element::Container(container) => {
                    for child in &container.children {
                        collect(child, out);
                    }
                }
                Element::Tooltip(tooltip) => collect(&tooltip.child, out),
                Element::Node(_) | Element::Arrow(_) | Element::Text(_) => {}
            }
        }

        let mut out = Vec::new();
        for element in &self.elements {
            collect(element, &mut out);
        }
        out
    }

    /// Render the scene as an HTML fragment
    pub fn render_html(&self, config: &RenderConfig) -> Result<String> {
        let render_span = span!(Level::INFO, "render_scene", elements = self.elements.len());
        let _enter = render_span.enter();

        self.validate()?;

        let mut cx = RenderContext::new(config);
        let mut attrs = vec![("class", class("scene"))];
        if let Some(title) = &self.title {
            attrs.push(("aria-label", title.clone()));
        }
        cx.out.open("div", &attrs);
        if let Some(title) = &self.title {
            cx.out.element("h2", &[("class", class("scene__title"))], title);
        }
        if let Some(description) = &self.description {
            cx.out
                .element("p", &[("class", class("scene__description"))], description);
        }
        for element in &self.elements {
            element.render(&mut cx)?;
        }
        cx.out.close("div");

        let html = cx.finish();
        info!(bytes = html.len(), "Rendered scene");
        Ok(html)
    }

    /// Render a complete HTML page, optionally embedding the stylesheet
    pub fn render_page(&self, config: &RenderConfig) -> Result<String> {
        let body = self.render_html(config)?;
        Ok(wrap_page(
            self.title.as_deref().unwrap_or("Diagram"),
            &body,
            config.embed_stylesheet,
        ))
    }
}

/// Wrap a rendered fragment in a standalone HTML document
pub fn wrap_page(title: &str, body: &str, embed_stylesheet: bool) -> String {
    let mut page = String::from("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>");
    crate::core::markup::escape_xml_into(&mut page, title);
    page.push_str("</title>\n");
    if embed_stylesheet {
        page.push_str("<style>\n");
        page.push_str(&stylesheet());
        page.push_str("\n</style>\n");
    }
    page.push_str("</head>\n<body>\n");
    page.push_str(body);
    page.push_str("\n</body>\n</html>\n");
    page
}

/// Detector for JSON scene documents
pub struct SceneDetector;

impl SceneDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SceneDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for SceneDetector {
    fn confidence(&self, input: &str) -> f64 {
        let trimmed = input.trim_start();
        if !trimmed.starts_with('{') {
            return 0.0;
        }
        if input.contains("\"elements\"") {
            1.0
        } else if input.contains("\"type\"") {
            0.4
        } else {
            0.2
        }
    }

    fn diagram_type(&self) -> &'static str {
        "scene"
    }

    fn patterns(&self) -> Vec<&'static str> {
        vec!["{", "\"elements\"", "\"type\""]
    }
}
