//! Sequence diagram SVG renderer
//!
//! Draws lifelines, actor headers and message arrows from the pixel layout.
//! Actors and messages that carry a tooltip get a focusable trigger group
//! followed by a hidden `role="tooltip"` group that the embedded
//! stylesheet reveals on hover or focus.

use anyhow::Result;
use tracing::{debug, span, Level};

use super::database::SequenceDatabase;
use super::layout::{
    LayoutConfig, MessageGeometry, PositionedActor, PositionedMessage, SequenceLayoutAlgorithm,
    SequenceLayoutResult,
};
use crate::core::markup::{fmt_num, MarkupWriter};
use crate::core::theme::{sequence_stylesheet, CLASS_PREFIX};
use crate::core::{label_width, wrap_label, MessageVariant, RenderConfig, Renderer};
use crate::primitives::TooltipContent;

const LIFELINE_COLOR: &str = "#d1d5db";
const LABEL_COLOR: &str = "#111827";
const TIP_FILL: &str = "#111827";
const TIP_TEXT: &str = "#f9fafb";
const TIP_CHAR_WIDTH: f64 = 6.5;
const TIP_LINE_HEIGHT: f64 = 16.0;
const TIP_PADDING: f64 = 8.0;
const TIP_GAP: f64 = 10.0;
/// Tooltip lines wrap past this many columns
const TIP_MAX_COLUMNS: usize = 40;

fn marker_id(svg_id: &str, variant: MessageVariant) -> String {
    format!("{svg_id}-head-{variant}")
}

fn attr(name: &'static str, value: impl Into<String>) -> (&'static str, String) {
    (name, value.into())
}

/// Sequence diagram SVG renderer
pub struct SequenceSvgRenderer {
    config: RenderConfig,
}

impl SequenceSvgRenderer {
    pub fn new() -> Self {
        Self::with_config(RenderConfig::default())
    }

    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Layout used for `database`, honoring its own spacing override
    pub fn layout(&self, database: &SequenceDatabase) -> Result<SequenceLayoutResult> {
        let spacing = database
            .message_spacing()
            .unwrap_or(self.config.message_spacing);
        SequenceLayoutAlgorithm::with_config(LayoutConfig::svg().with_message_spacing(spacing))
            .layout(database)
    }

    /// Render using the configured id prefix as the SVG id
    pub fn render(&self, database: &SequenceDatabase) -> Result<String> {
        self.render_with_id(database, &self.config.id_prefix)
    }

    /// Render with an explicit document-unique SVG id; every inner id
    /// derives from it
    pub fn render_with_id(&self, database: &SequenceDatabase, svg_id: &str) -> Result<String> {
        let render_span = span!(Level::INFO, "render_sequence_svg", svg_id);
        let _enter = render_span.enter();

        let layout = self.layout(database)?;
        let has_tooltips = layout.actors.iter().any(|a| a.tooltip.is_some())
            || layout.messages.iter().any(|m| m.tooltip.is_some());

        let title = match database.title() {
            Some(title) => title.to_string(),
            None => {
                let names: Vec<&str> = layout.actors.iter().map(|a| a.label.as_str()).collect();
                format!("Sequence diagram: {}", names.join(", "))
            }
        };

        let mut w = MarkupWriter::new();
        w.open(
            "svg",
            &[
                attr("xmlns", "http://www.w3.org/2000/svg"),
                attr("id", svg_id),
                attr("class", format!("{CLASS_PREFIX}-sequence-svg")),
                attr("width", fmt_num(layout.width)),
                attr("height", fmt_num(layout.height)),
                attr(
                    "viewBox",
                    format!("0 0 {} {}", fmt_num(layout.width), fmt_num(layout.height)),
                ),
                // Focusable tooltip triggers must stay reachable inside
                attr("role", if has_tooltips { "group" } else { "img" }),
                attr("aria-labelledby", format!("{svg_id}-title")),
                attr("overflow", "visible"),
            ],
        );
        w.element("title", &[attr("id", format!("{svg_id}-title"))], &title);
        if self.config.embed_stylesheet {
            w.open("style", &[]);
            w.raw(&sequence_stylesheet());
            w.close("style");
        }
        self.write_markers(&mut w, svg_id);

        w.open("g", &[attr("class", format!("{CLASS_PREFIX}-lifelines"))]);
        for actor in &layout.actors {
            w.empty(
                "line",
                &[
                    attr("class", format!("{CLASS_PREFIX}-lifeline")),
                    attr("x1", fmt_num(actor.x)),
                    attr("y1", fmt_num(layout.lifeline_top)),
                    attr("x2", fmt_num(actor.x)),
                    attr("y2", fmt_num(layout.lifeline_bottom)),
                    attr("stroke", LIFELINE_COLOR),
                    attr("stroke-dasharray", "4 4"),
                ],
            );
        }
        w.close("g");

        for actor in &layout.actors {
            self.write_actor(&mut w, actor, &layout, svg_id);
        }
        for message in &layout.messages {
            self.write_message(&mut w, message, &layout, svg_id);
        }

        w.close("svg");

        debug!(
            actors = layout.actors.len(),
            messages = layout.messages.len(),
            "Rendered sequence SVG"
        );
        Ok(w.finish())
    }

    fn write_markers(&self, w: &mut MarkupWriter, svg_id: &str) {
        w.open("defs", &[]);
        for variant in MessageVariant::ALL {
            let stroke = variant.stroke();
            let fill = if variant.has_open_head() {
                "none"
            } else {
                stroke.color
            };
            w.open(
                "marker",
                &[
                    attr("id", marker_id(svg_id, *variant)),
                    attr("viewBox", "0 0 10 10"),
                    attr("refX", "9"),
                    attr("refY", "5"),
                    attr("markerWidth", "8"),
                    attr("markerHeight", "8"),
                    attr("orient", "auto-start-reverse"),
                ],
            );
            w.empty(
                "path",
                &[
                    attr("d", "M0,0 L10,5 L0,10 z"),
                    attr("fill", fill),
                    attr("stroke", stroke.color),
                    attr("stroke-width", "1"),
                ],
            );
            w.close("marker");
        }
        w.close("defs");
    }

    fn write_actor(
        &self,
        w: &mut MarkupWriter,
        actor: &PositionedActor,
        layout: &SequenceLayoutResult,
        svg_id: &str,
    ) {
        let style = actor.variant.style();
        w.open(
            "g",
            &[
                attr(
                    "class",
                    format!("{CLASS_PREFIX}-actor {CLASS_PREFIX}-actor--{}", actor.variant),
                ),
                attr("data-actor-id", &actor.id),
                attr("data-index", actor.index.to_string()),
                attr("data-x", fmt_num(actor.x)),
            ],
        );

        let tip_id = format!("{svg_id}-actor-{}-tip", actor.index);
        let trigger = actor.tooltip.as_ref().map(|_| tip_id.as_str());
        open_trigger(w, trigger);
        w.empty(
            "rect",
            &[
                attr("x", fmt_num(actor.left)),
                attr("y", fmt_num(layout.header_y)),
                attr("width", fmt_num(actor.width)),
                attr("height", fmt_num(layout.header_height)),
                attr("rx", "6"),
                attr("fill", style.fill),
                attr("stroke", style.stroke),
            ],
        );
        w.element(
            "text",
            &[
                attr("x", fmt_num(actor.x)),
                attr("y", fmt_num(layout.header_y + layout.header_height / 2.0)),
                attr("text-anchor", "middle"),
                attr("dominant-baseline", "central"),
                attr("fill", style.text),
            ],
            &actor.label,
        );
        if let Some(tooltip) = &actor.tooltip {
            w.close("g");
            write_tip(
                w,
                &tip_id,
                tooltip,
                (actor.x, layout.header_y + layout.header_height),
                layout.width,
                false,
            );
        }
        w.close("g");
    }

    fn write_message(
        &self,
        w: &mut MarkupWriter,
        message: &PositionedMessage,
        layout: &SequenceLayoutResult,
        svg_id: &str,
    ) {
        let stroke = message.variant.stroke();
        let kind = if message.geometry.is_self_loop() {
            "self"
        } else {
            "arrow"
        };
        w.open(
            "g",
            &[
                attr(
                    "class",
                    format!(
                        "{CLASS_PREFIX}-message {CLASS_PREFIX}-message--{}",
                        message.variant
                    ),
                ),
                attr("data-message-id", &message.id),
                attr("data-index", message.index.to_string()),
                attr("data-kind", kind),
                attr("data-y", fmt_num(message.y)),
            ],
        );
        let from = layout
            .actor(&message.from)
            .map_or(message.from.as_str(), |a| a.label.as_str());
        let to = layout
            .actor(&message.to)
            .map_or(message.to.as_str(), |a| a.label.as_str());
        let summary = if message.label.is_empty() {
            format!("{from} → {to}")
        } else {
            format!("{from} → {to}: {}", message.label)
        };
        w.element("title", &[], &summary);

        let tip_id = format!("{svg_id}-message-{}-tip", message.index);
        let trigger = message.tooltip.as_ref().map(|_| tip_id.as_str());
        open_trigger(w, trigger);

        let mut stroke_attrs = vec![
            attr("fill", "none"),
            attr("stroke", stroke.color),
            attr("stroke-width", "1.5"),
            attr("marker-end", format!("url(#{})", marker_id(svg_id, message.variant))),
        ];
        if let Some(dash) = stroke.dasharray {
            stroke_attrs.push(attr("stroke-dasharray", dash));
        }

        let anchor = match message.geometry {
            MessageGeometry::Arrow { from_x, to_x, .. } => {
                let (left, right) = (from_x.min(to_x), from_x.max(to_x));
                if trigger.is_some() {
                    hit_area(w, left, message.y - 12.0, right - left, 24.0);
                }
                let mut attrs = vec![
                    attr("x1", fmt_num(from_x)),
                    attr("y1", fmt_num(message.y)),
                    attr("x2", fmt_num(to_x)),
                    attr("y2", fmt_num(message.y)),
                ];
                attrs.extend(stroke_attrs);
                w.empty("line", &attrs);
                let mid = (from_x + to_x) / 2.0;
                if !message.label.is_empty() {
                    w.element(
                        "text",
                        &[
                            attr("x", fmt_num(mid)),
                            attr("y", fmt_num(message.y - 6.0)),
                            attr("text-anchor", "middle"),
                            attr("fill", LABEL_COLOR),
                        ],
                        &message.label,
                    );
                }
                (mid, message.y - 12.0)
            }
            MessageGeometry::SelfLoop { x, width, height } => {
                let top = message.y - height / 2.0;
                let bottom = message.y + height / 2.0;
                let label_x = x + width + 6.0;
                if trigger.is_some() {
                    let label_w = label_width(&message.label) as f64 * 7.0;
                    hit_area(w, x, top - 4.0, width + 6.0 + label_w, height + 8.0);
                }
                let mut attrs = vec![attr(
                    "d",
                    format!(
                        "M{} {} H{} V{} H{}",
                        fmt_num(x),
                        fmt_num(top),
                        fmt_num(x + width),
                        fmt_num(bottom),
                        fmt_num(x)
                    ),
                )];
                attrs.extend(stroke_attrs);
                w.empty("path", &attrs);
                if !message.label.is_empty() {
                    w.element(
                        "text",
                        &[
                            attr("x", fmt_num(label_x)),
                            attr("y", fmt_num(message.y)),
                            attr("dominant-baseline", "central"),
                            attr("fill", LABEL_COLOR),
                        ],
                        &message.label,
                    );
                }
                (x + width / 2.0, top)
            }
        };

        if let Some(tooltip) = &message.tooltip {
            w.close("g");
            write_tip(w, &tip_id, tooltip, anchor, layout.width, true);
        }
        w.close("g");
    }
}

/// Open a trigger group when the element has a tooltip
fn open_trigger(w: &mut MarkupWriter, tip_id: Option<&str>) {
    if let Some(tip_id) = tip_id {
        w.open(
            "g",
            &[
                attr("class", format!("{CLASS_PREFIX}-seq-trigger")),
                attr("tabindex", "0"),
                attr("aria-describedby", tip_id),
            ],
        );
    }
}

/// Transparent rectangle enlarging the pointer target of thin strokes
fn hit_area(w: &mut MarkupWriter, x: f64, y: f64, width: f64, height: f64) {
    w.empty(
        "rect",
        &[
            attr("x", fmt_num(x)),
            attr("y", fmt_num(y)),
            attr("width", fmt_num(width)),
            attr("height", fmt_num(height)),
            attr("fill", "transparent"),
            attr("stroke", "none"),
        ],
    );
}

/// Write a hidden tooltip box near `anchor`, kept inside the diagram width.
/// `above` places it over the anchor when there is room.
fn write_tip(
    w: &mut MarkupWriter,
    id: &str,
    content: &TooltipContent,
    anchor: (f64, f64),
    max_width: f64,
    above: bool,
) {
    let lines: Vec<String> = content
        .lines()
        .iter()
        .flat_map(|line| wrap_label(line, TIP_MAX_COLUMNS))
        .collect();
    let widest = lines.iter().map(|l| label_width(l)).max().unwrap_or(0) as f64;
    let width = widest * TIP_CHAR_WIDTH + TIP_PADDING * 2.0;
    let height = lines.len() as f64 * TIP_LINE_HEIGHT + TIP_PADDING * 2.0 - 4.0;

    let x = (anchor.0 - width / 2.0).min(max_width - width).max(0.0);
    let y = if above && anchor.1 - TIP_GAP - height >= 0.0 {
        anchor.1 - TIP_GAP - height
    } else {
        anchor.1 + TIP_GAP
    };

    w.open(
        "g",
        &[
            attr("id", id),
            attr("class", format!("{CLASS_PREFIX}-seq-tip")),
            attr("role", "tooltip"),
            attr("visibility", "hidden"),
        ],
    );
    w.empty(
        "rect",
        &[
            attr("x", fmt_num(x)),
            attr("y", fmt_num(y)),
            attr("width", fmt_num(width)),
            attr("height", fmt_num(height)),
            attr("rx", "4"),
            attr("fill", TIP_FILL),
        ],
    );
    w.open(
        "text",
        &[
            attr("x", fmt_num(x + TIP_PADDING)),
            attr("y", fmt_num(y + TIP_PADDING)),
            attr("fill", TIP_TEXT),
            attr("font-size", "12"),
            attr("dominant-baseline", "hanging"),
        ],
    );
    let bold_first = content.heading().is_some();
    for (i, line) in lines.iter().enumerate() {
        let mut attrs = vec![
            attr("x", fmt_num(x + TIP_PADDING)),
            attr("dy", if i == 0 { "0".to_string() } else { fmt_num(TIP_LINE_HEIGHT) }),
        ];
        if i == 0 && bold_first {
            attrs.push(attr("font-weight", "600"));
        }
        w.element("tspan", &attrs, line);
    }
    w.close("text");
    w.close("g");
}

impl Default for SequenceSvgRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer<SequenceDatabase> for SequenceSvgRenderer {
    type Output = String;

    fn render(&self, database: &SequenceDatabase) -> Result<Self::Output> {
        SequenceSvgRenderer::render(self, database)
    }

    fn name(&self) -> &'static str {
        "svg"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }

    fn format(&self) -> &'static str {
        "svg"
    }
}
