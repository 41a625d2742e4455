//! Plugin orchestrator for coordinating the rendering pipeline
//!
//! The orchestrator manages the flow of data through all plugins:
//! Detector → Parser/Loader → Database or Scene → Layout → Renderer

use anyhow::Result;
use tracing::{debug, info, span, trace, warn, Level};

use crate::core::{CharacterSet, Detector, DiagramError, RenderConfig};
use crate::plugins::sequence::{
    SequenceAsciiRenderer, SequenceDatabase, SequenceDetector, SequenceParser, SequenceSvgRenderer,
};
use crate::primitives::{wrap_page, Scene, SceneDetector};

/// An input document after detection and loading
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    Scene(Scene),
    Sequence(SequenceDatabase),
}

impl Document {
    pub fn kind(&self) -> &'static str {
        match self {
            Document::Scene(_) => "scene",
            Document::Sequence(_) => "sequence",
        }
    }
}

/// Plugin orchestrator that coordinates the entire pipeline
///
/// Detectors are consulted in registration order; the most confident one
/// above the detection threshold wins, earlier registrations breaking ties.
pub struct Orchestrator {
    detectors: Vec<Box<dyn Detector>>,
    sequence_parser: SequenceParser,
    config: RenderConfig,
}

impl Orchestrator {
    /// Create an orchestrator with no detectors registered
    pub fn new() -> Self {
        Self {
            detectors: Vec::new(),
            sequence_parser: SequenceParser::new(),
            config: RenderConfig::default(),
        }
    }

    /// Create an orchestrator with the scene and sequence detectors
    pub fn with_all_plugins() -> Self {
        let mut orchestrator = Self::new();
        orchestrator.register_detector(Box::new(SceneDetector::new()));
        orchestrator.register_detector(Box::new(SequenceDetector::new()));
        orchestrator
    }

    pub fn with_config(mut self, config: RenderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Register a detector plugin
    pub fn register_detector(&mut self, detector: Box<dyn Detector>) {
        debug!(detector = detector.diagram_type(), "Registered detector");
        self.detectors.push(detector);
    }

    /// Get registered detector names, in registration order
    pub fn get_detectors(&self) -> Vec<&'static str> {
        self.detectors.iter().map(|d| d.diagram_type()).collect()
    }

    /// Detect the input kind from its text
    pub fn detect_diagram_type(&self, input: &str) -> Result<&'static str> {
        let detect_span = span!(Level::INFO, "detect_diagram_type", input_len = input.len());
        let _enter = detect_span.enter();

        trace!("Starting input detection");

        let mut best: Option<(&'static str, f64)> = None;
        for detector in &self.detectors {
            let name = detector.diagram_type();
            let confidence = detector.confidence(input);
            trace!(detector = name, confidence, "Checking detector");
            if !detector.detect(input) {
                continue;
            }
            if best.map_or(true, |(_, top)| confidence > top) {
                best = Some((name, confidence));
            }
        }

        match best {
            Some((name, confidence)) => {
                info!(detector = name, confidence, "Detected input kind");
                Ok(name)
            }
            None => {
                warn!("No suitable detector found for input");
                Err(DiagramError::detection_error(
                    "input is neither a JSON scene nor sequence notation".to_string(),
                )
                .into())
            }
        }
    }

    /// Detect and load the input without rendering
    pub fn load(&self, input: &str) -> Result<Document> {
        let load_span = span!(Level::INFO, "load_document", input_len = input.len());
        let _enter = load_span.enter();

        let document = match self.detect_diagram_type(input)? {
            "scene" => {
                let scene = Scene::from_json(input)?;
                scene.validate()?;
                Document::Scene(scene)
            }
            "sequence" => Document::Sequence(self.sequence_parser.parse_to_database(input)?),
            other => {
                return Err(DiagramError::UnknownDiagramType {
                    diagram_type: other.to_string(),
                }
                .into())
            }
        };
        debug!(kind = document.kind(), "Loaded document");
        Ok(document)
    }

    /// Render the input as an HTML fragment
    pub fn process_html(&self, input: &str) -> Result<String> {
        let process_span = span!(Level::INFO, "process_html", input_len = input.len());
        let _enter = process_span.enter();

        match self.load(input)? {
            Document::Scene(scene) => scene.render_html(&self.config),
            Document::Sequence(database) => self.sequence_figure(&database),
        }
    }

    /// Render the input as a standalone HTML page
    pub fn process_page(&self, input: &str) -> Result<String> {
        let process_span = span!(Level::INFO, "process_page", input_len = input.len());
        let _enter = process_span.enter();

        match self.load(input)? {
            Document::Scene(scene) => scene.render_page(&self.config),
            Document::Sequence(database) => {
                let body = self.sequence_figure(&database)?;
                let title = database.title().unwrap_or("Sequence diagram");
                Ok(wrap_page(title, &body, self.config.embed_stylesheet))
            }
        }
    }

    /// Render the input as a standalone SVG document
    ///
    /// A scene qualifies only when it holds exactly one sequence diagram at
    /// the top level.
    pub fn process_svg(&self, input: &str) -> Result<String> {
        let process_span = span!(Level::INFO, "process_svg", input_len = input.len());
        let _enter = process_span.enter();

        let database = match self.load(input)? {
            Document::Sequence(database) => database,
            Document::Scene(scene) => {
                let top_level: Vec<_> = scene
                    .elements
                    .iter()
                    .filter_map(|element| match element {
                        crate::primitives::Element::Sequence(diagram) => Some(diagram),
                        _ => None,
                    })
                    .collect();
                if scene.elements.len() != 1 || top_level.len() != 1 {
                    warn!(
                        elements = scene.elements.len(),
                        "SVG output needs a scene holding a single sequence diagram"
                    );
                    return Err(DiagramError::render_error(
                        "SVG output needs a scene holding exactly one sequence diagram".to_string(),
                    )
                    .into());
                }
                top_level[0].to_database()?
            }
        };

        SequenceSvgRenderer::with_config(self.config.clone()).render(&database)
    }

    /// Render a terminal preview of every sequence diagram in the input
    pub fn process_ascii(&self, input: &str) -> Result<String> {
        self.process_ascii_with_style(input, self.config.character_set)
    }

    pub fn process_ascii_with_style(&self, input: &str, style: CharacterSet) -> Result<String> {
        let process_span = span!(Level::INFO, "process_ascii", input_len = input.len(), style = %style);
        let _enter = process_span.enter();

        let renderer = SequenceAsciiRenderer::with_style(style);
        match self.load(input)? {
            Document::Sequence(database) => renderer.render(&database),
            Document::Scene(scene) => {
                let sequences = scene.sequences();
                if sequences.is_empty() {
                    return Err(DiagramError::render_error(
                        "scene has no sequence diagram to preview".to_string(),
                    )
                    .into());
                }
                let mut previews = Vec::with_capacity(sequences.len());
                for diagram in sequences {
                    previews.push(diagram.render_text(style)?);
                }
                debug!(count = previews.len(), "Rendered scene previews");
                Ok(previews.join("\n\n"))
            }
        }
    }

    fn sequence_figure(&self, database: &SequenceDatabase) -> Result<String> {
        let svg_id = format!("{}-seq-1", self.config.id_prefix);
        let svg = SequenceSvgRenderer::with_config(self.config.clone())
            .render_with_id(database, &svg_id)?;
        Ok(format!(
            "<figure class=\"{}\">{}</figure>",
            crate::primitives::class("sequence"),
            svg
        ))
    }
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::with_all_plugins()
    }
}
