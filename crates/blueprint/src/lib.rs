//! Blueprint - declarative architecture and sequence diagrams
//!
//! A library of presentational diagram primitives (nodes, arrows,
//! tooltips, containers) and a sequence diagram layout engine. Scenes are
//! loaded from JSON and rendered to accessible HTML; sequence diagrams can
//! also be written in a compact text notation and rendered to SVG or to a
//! terminal preview.
//!
//! # Quick Start
//!
//! ```rust
//! use blueprint::render;
//!
//! let input = "sequence\nactor a\nactor b\na ->> b : hello";
//! let html = render(input).unwrap();
//! assert!(html.contains("<svg"));
//! ```
//!
//! # Advanced Usage
//!
//! For more control, use the individual components:
//!
//! ```rust
//! use blueprint::prelude::*;
//!
//! let input = "sequence\nactor svc \"Order Service\" service\nactor db database\nsvc ->> db : INSERT";
//!
//! // Parse into a database
//! let parser = SequenceParser::new();
//! let mut database = SequenceDatabase::new();
//! parser.parse(input, &mut database).unwrap();
//! assert_eq!(database.actor_count(), 2);
//!
//! // Lay it out
//! let layout = SequenceLayoutAlgorithm::new().layout(&database).unwrap();
//! assert!(layout.actors[0].x < layout.actors[1].x);
//!
//! // Render to SVG
//! let svg = SequenceSvgRenderer::new().render(&database).unwrap();
//! assert!(svg.starts_with("<svg"));
//! ```

pub mod core;
pub mod plugins;
pub mod primitives;

pub use core::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        ActorVariant, Arrangement, ArrowDirection, CharacterSet, ContainerColor, Database,
        Detector, DiagramError, LayoutAlgorithm, MessageVariant, NodeVariant, Parser,
        RenderConfig, Renderer, Size,
    };
    pub use crate::plugins::orchestrator::{Document, Orchestrator};
    pub use crate::plugins::sequence::{
        Actor, Message, SequenceAsciiRenderer, SequenceDatabase, SequenceDetector,
        SequenceDiagram, SequenceLayoutAlgorithm, SequenceParser, SequenceSvgRenderer,
    };
    pub use crate::primitives::{
        Arrow, Component, Container, Element, Node, Scene, StructuredContent, Tooltip,
        TooltipContent,
    };
}

/// Render a JSON scene or sequence notation to an HTML fragment
///
/// The input kind is detected automatically.
///
/// # Example
/// ```rust
/// use blueprint::render;
///
/// let html = render(r#"{"elements": [{"type": "node", "label": "Postgres", "variant": "database"}]}"#).unwrap();
/// assert!(html.contains("bp-node--database"));
/// ```
pub fn render(input: &str) -> anyhow::Result<String> {
    use crate::plugins::orchestrator::Orchestrator;

    Orchestrator::with_all_plugins().process_html(input)
}

/// Render a JSON scene or sequence notation with a specific configuration
pub fn render_with_config(input: &str, config: RenderConfig) -> anyhow::Result<String> {
    use crate::plugins::orchestrator::Orchestrator;

    Orchestrator::with_all_plugins()
        .with_config(config)
        .process_html(input)
}

/// Render sequence notation (or a single-diagram scene) to standalone SVG
///
/// # Example
/// ```rust
/// use blueprint::render_svg;
///
/// let svg = render_svg("sequence\nactor a\nactor b\na -) b : ping").unwrap();
/// assert!(svg.contains("bp-message--async"));
/// ```
pub fn render_svg(input: &str) -> anyhow::Result<String> {
    use crate::plugins::orchestrator::Orchestrator;

    Orchestrator::with_all_plugins().process_svg(input)
}

/// Render a terminal preview of the sequence diagrams in the input
///
/// # Example
/// ```rust
/// use blueprint::{render_text, CharacterSet};
///
/// let text = render_text("sequence\nactor a\nactor b\na ->> b : hi", CharacterSet::Ascii).unwrap();
/// assert!(text.contains("hi"));
/// ```
pub fn render_text(input: &str, style: CharacterSet) -> anyhow::Result<String> {
    use crate::plugins::orchestrator::Orchestrator;

    Orchestrator::with_all_plugins().process_ascii_with_style(input, style)
}

/// Parse sequence notation into a database without rendering
///
/// # Example
/// ```rust
/// use blueprint::parse;
///
/// let db = parse("sequence\nactor a\nactor b\na ->> b : one\nb -->> a : two").unwrap();
/// assert_eq!(db.actor_count(), 2);
/// assert_eq!(db.message_count(), 2);
/// assert_eq!(db.messages()[1].id, "m2");
/// ```
pub fn parse(input: &str) -> anyhow::Result<plugins::sequence::SequenceDatabase> {
    use crate::plugins::sequence::SequenceParser;

    SequenceParser::new().parse_to_database(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOTATION: &str = "sequence\nactor svc\nactor db\nsvc ->> db : query";

    #[test]
    fn test_render_notation() {
        let output = render(NOTATION).unwrap();
        assert!(output.contains("<figure class=\"bp-sequence\">"));
        assert!(output.contains("query"));
    }

    #[test]
    fn test_render_scene() {
        let output = render(r#"{"elements": [{"type": "arrow", "direction": "right"}]}"#).unwrap();
        assert!(output.contains("bp-arrow--right"));
    }

    #[test]
    fn test_render_with_config() {
        let output = render_with_config(NOTATION, RenderConfig::default().with_id_prefix("doc"))
            .unwrap();
        assert!(output.contains("id=\"doc-seq-1\""));
    }

    #[test]
    fn test_render_text_styles() {
        let unicode = render_text(NOTATION, CharacterSet::Unicode).unwrap();
        let ascii = render_text(NOTATION, CharacterSet::Ascii).unwrap();
        assert!(unicode.contains('▶'));
        assert!(ascii.is_ascii());
    }

    #[test]
    fn test_parse() {
        let db = parse(NOTATION).unwrap();
        assert_eq!(db.actor_count(), 2);
        assert_eq!(db.messages()[0].from, "svc");
    }

    #[test]
    fn test_unrecognized_input_fails() {
        assert!(render("hello world").is_err());
    }
}
