//! Element tree and render context
//!
//! Every primitive implements [`Component`]. [`Element`] is the closed set
//! of primitives a scene or container can hold; containers own their
//! children directly, so a tree is dropped as a unit.

use anyhow::Result;
use serde::Deserialize;

use super::{Arrow, Container, Node, Tooltip};
use crate::core::markup::MarkupWriter;
use crate::core::theme::CLASS_PREFIX;
use crate::core::{DiagramError, RenderConfig};
use crate::plugins::sequence::{SequenceDiagram, SequenceSvgRenderer};

/// Prefixed class name
pub(crate) fn class(name: &str) -> String {
    format!("{CLASS_PREFIX}-{name}")
}

/// Class list with an optional caller-supplied class appended
pub(crate) fn class_list(classes: &[String], extra: Option<&str>) -> String {
    let mut list = classes.join(" ");
    if let Some(extra) = extra.map(str::trim).filter(|e| !e.is_empty()) {
        list.push(' ');
        list.push_str(extra);
    }
    list
}

/// Mutable state for one render pass
pub struct RenderContext<'a> {
    config: &'a RenderConfig,
    pub out: MarkupWriter,
    id_counter: usize,
    described_by: Option<String>,
}

impl<'a> RenderContext<'a> {
    pub fn new(config: &'a RenderConfig) -> Self {
        Self {
            config,
            out: MarkupWriter::new(),
            id_counter: 0,
            described_by: None,
        }
    }

    pub fn config(&self) -> &RenderConfig {
        self.config
    }

    /// Allocate a document-unique id
    pub fn next_id(&mut self, kind: &str) -> String {
        self.id_counter += 1;
        format!("{}-{}-{}", self.config.id_prefix, kind, self.id_counter)
    }

    /// Hand a tooltip id to the next focusable element rendered
    pub fn describe_next(&mut self, id: String) {
        self.described_by = Some(id);
    }

    pub fn take_described_by(&mut self) -> Option<String> {
        self.described_by.take()
    }

    pub fn finish(self) -> String {
        self.out.finish()
    }
}

/// A renderable primitive
pub trait Component {
    /// Append markup for this component
    fn render(&self, cx: &mut RenderContext<'_>) -> Result<()>;

    /// Check configuration errors without rendering
    fn validate(&self) -> Result<(), DiagramError> {
        Ok(())
    }

    /// Whether the rendered element takes keyboard focus itself
    fn is_focusable(&self) -> bool {
        false
    }

    /// Render to a standalone fragment
    fn to_html(&self, config: &RenderConfig) -> Result<String> {
        self.validate()?;
        let mut cx = RenderContext::new(config);
        self.render(&mut cx)?;
        Ok(cx.finish())
    }
}

/// Plain text run
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TextElement {
    pub text: String,
}

/// Any primitive that can appear in a scene
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Element {
    Node(Node),
    Arrow(Arrow),
    Tooltip(Tooltip),
    Container(Container),
    Sequence(SequenceDiagram),
    Text(TextElement),
}

impl Element {
    pub fn text(text: impl Into<String>) -> Self {
        Element::Text(TextElement { text: text.into() })
    }

    /// Element kind as written in scene files
    pub fn kind(&self) -> &'static str {
        match self {
            Element::Node(_) => "node",
            Element::Arrow(_) => "arrow",
            Element::Tooltip(_) => "tooltip",
            Element::Container(_) => "container",
            Element::Sequence(_) => "sequence",
            Element::Text(_) => "text",
        }
    }

    fn render_sequence(diagram: &SequenceDiagram, cx: &mut RenderContext<'_>) -> Result<()> {
        let database = diagram.to_database()?;
        let svg_id = cx.next_id("seq");
        let svg = SequenceSvgRenderer::with_config(cx.config().clone()).render_with_id(&database, &svg_id)?;

        let classes = class_list(&[class("sequence")], diagram.class_name.as_deref());
        cx.out.open("figure", &[("class", classes)]);
        cx.out.raw(&svg);
        cx.out.close("figure");
        Ok(())
    }
}

impl Component for Element {
    fn render(&self, cx: &mut RenderContext<'_>) -> Result<()> {
        match self {
            Element::Node(node) => node.render(cx),
            Element::Arrow(arrow) => arrow.render(cx),
            Element::Tooltip(tooltip) => tooltip.render(cx),
            Element::Container(container) => container.render(cx),
            Element::Sequence(diagram) => Self::render_sequence(diagram, cx),
            Element::Text(t) => {
                cx.out.element("span", &[("class", class("text"))], &t.text);
                Ok(())
            }
        }
    }

    fn validate(&self) -> Result<(), DiagramError> {
        match self {
            Element::Node(node) => node.validate(),
            Element::Arrow(arrow) => arrow.validate(),
            Element::Tooltip(tooltip) => tooltip.validate(),
            Element::Container(container) => container.validate(),
            Element::Sequence(diagram) => diagram.to_database().map(|_| ()),
            Element::Text(_) => Ok(()),
        }
    }

    fn is_focusable(&self) -> bool {
        match self {
            Element::Node(node) => node.is_focusable(),
            _ => false,
        }
    }
}

impl From<Node> for Element {
    fn from(node: Node) -> Self {
        Element::Node(node)
    }
}

impl From<Arrow> for Element {
    fn from(arrow: Arrow) -> Self {
        Element::Arrow(arrow)
    }
}

impl From<Tooltip> for Element {
    fn from(tooltip: Tooltip) -> Self {
        Element::Tooltip(tooltip)
    }
}

impl From<Container> for Element {
    fn from(container: Container) -> Self {
        Element::Container(container)
    }
}

impl From<SequenceDiagram> for Element {
    fn from(diagram: SequenceDiagram) -> Self {
        Element::Sequence(diagram)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::NodeVariant;

    #[test]
    fn test_ids_are_unique_and_prefixed() {
        let config = RenderConfig::default().with_id_prefix("docs");
        let mut cx = RenderContext::new(&config);
        assert_eq!(cx.next_id("tip"), "docs-tip-1");
        assert_eq!(cx.next_id("tip"), "docs-tip-2");
    }

    #[test]
    fn test_class_list_appends_extra() {
        assert_eq!(class_list(&[class("node")], Some("wide")), "bp-node wide");
        assert_eq!(class_list(&[class("node")], Some("  ")), "bp-node");
        assert_eq!(class_list(&[class("node")], None), "bp-node");
    }

    #[test]
    fn test_element_tagged_json() {
        let element: Element = serde_json::from_str(
            r#"{"type": "node", "label": "Postgres", "variant": "database"}"#,
        )
        .unwrap();
        match element {
            Element::Node(node) => assert_eq!(node.variant, NodeVariant::Database),
            other => panic!("unexpected element: {other:?}"),
        }
    }

    #[test]
    fn test_text_is_escaped() {
        let html = Element::text("a < b").to_html(&RenderConfig::default()).unwrap();
        assert_eq!(html, "<span class=\"bp-text\">a &lt; b</span>");
    }

    #[test]
    fn test_unknown_element_type_rejected() {
        let result: Result<Element, _> = serde_json::from_str(r#"{"type": "hexagon"}"#);
        assert!(result.is_err());
    }
}
