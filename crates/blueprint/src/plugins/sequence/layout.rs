//! Sequence diagram layout algorithm
//!
//! Places actors left to right in declaration order and messages top to
//! bottom in declaration order. The same algorithm serves both pixel output
//! (SVG) and character-cell output (terminal preview); only the metrics in
//! [`LayoutConfig`] differ.
//!
//! Message slot `k` sits at `first_slot_y + k * message_spacing`. Nothing
//! about a message other than its position in the list affects its slot.

use anyhow::Result;
use tracing::{debug, span, trace, Level};

use super::database::{Message, SequenceDatabase};
use crate::core::{
    label_width, ActorVariant, ArrowDirection, DiagramError, LayoutAlgorithm, MessageVariant,
    DEFAULT_MESSAGE_SPACING,
};
use crate::primitives::TooltipContent;

/// Metrics driving the layout
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    /// Width of one label character
    pub char_width: f64,
    /// Horizontal padding inside an actor header, each side
    pub actor_padding: f64,
    /// Minimum actor header width
    pub actor_min_width: f64,
    /// Minimum gap between adjacent actor headers
    pub actor_gap: f64,
    pub header_height: f64,
    /// Outer margin around the whole diagram
    pub margin: f64,
    /// Vertical distance between consecutive message slots
    pub message_spacing: f64,
    /// Distance from the bottom of the headers to the first slot
    pub first_slot_offset: f64,
    /// Extra room past the last slot before lifelines end
    pub tail_padding: f64,
    /// Horizontal padding required around a message label
    pub label_padding: f64,
    pub self_loop_width: f64,
    pub self_loop_height: f64,
    /// Round every coordinate up to whole units
    pub snap_to_grid: bool,
}

impl LayoutConfig {
    /// Pixel metrics for SVG output
    pub fn svg() -> Self {
        Self {
            char_width: 7.0,
            actor_padding: 16.0,
            actor_min_width: 96.0,
            actor_gap: 48.0,
            header_height: 40.0,
            margin: 16.0,
            message_spacing: DEFAULT_MESSAGE_SPACING,
            first_slot_offset: 36.0,
            tail_padding: 28.0,
            label_padding: 16.0,
            self_loop_width: 28.0,
            self_loop_height: 20.0,
            snap_to_grid: false,
        }
    }

    /// Character-cell metrics for the terminal preview
    pub fn ascii() -> Self {
        Self {
            char_width: 1.0,
            actor_padding: 2.0,
            actor_min_width: 0.0,
            actor_gap: 4.0,
            header_height: 3.0,
            margin: 0.0,
            message_spacing: 2.0,
            first_slot_offset: 1.0,
            tail_padding: 2.0,
            label_padding: 4.0,
            self_loop_width: 3.0,
            self_loop_height: 1.0,
            snap_to_grid: true,
        }
    }

    pub fn with_message_spacing(mut self, spacing: f64) -> Self {
        self.message_spacing = spacing;
        self
    }

    fn snap(&self, v: f64) -> f64 {
        if self.snap_to_grid {
            v.ceil()
        } else {
            v
        }
    }

    fn half(&self, v: f64) -> f64 {
        if self.snap_to_grid {
            (v / 2.0).floor()
        } else {
            v / 2.0
        }
    }

    fn text_width(&self, text: &str) -> f64 {
        label_width(text) as f64 * self.char_width
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::svg()
    }
}

/// Positioned actor header and lifeline
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedActor {
    pub id: String,
    pub label: String,
    pub variant: ActorVariant,
    pub tooltip: Option<TooltipContent>,
    /// Left-to-right position index
    pub index: usize,
    /// Lifeline x coordinate (header center)
    pub x: f64,
    /// Left edge of the header box
    pub left: f64,
    pub width: f64,
}

/// Arrow geometry for one message
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MessageGeometry {
    /// Horizontal arrow between two different lifelines
    Arrow {
        from_x: f64,
        to_x: f64,
        /// `Left` or `Right`, from the relative actor positions
        direction: ArrowDirection,
    },
    /// Loop beside a single lifeline; there is no target to connect to
    SelfLoop { x: f64, width: f64, height: f64 },
}

impl MessageGeometry {
    pub fn is_self_loop(&self) -> bool {
        matches!(self, MessageGeometry::SelfLoop { .. })
    }
}

/// Positioned message for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedMessage {
    pub id: String,
    pub from: String,
    pub to: String,
    pub label: String,
    pub variant: MessageVariant,
    pub tooltip: Option<TooltipContent>,
    /// Top-to-bottom slot index
    pub index: usize,
    /// Vertical position of the slot
    pub y: f64,
    pub geometry: MessageGeometry,
}

/// Layout result containing all positioned elements
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceLayoutResult {
    pub actors: Vec<PositionedActor>,
    pub messages: Vec<PositionedMessage>,
    pub width: f64,
    pub height: f64,
    /// Top of the actor header row
    pub header_y: f64,
    pub header_height: f64,
    /// Lifelines run from `lifeline_top` to `lifeline_bottom`
    pub lifeline_top: f64,
    pub lifeline_bottom: f64,
    pub message_spacing: f64,
}

impl SequenceLayoutResult {
    pub fn actor(&self, id: &str) -> Option<&PositionedActor> {
        self.actors.iter().find(|a| a.id == id)
    }
}

/// Sequence diagram layout algorithm
#[derive(Debug, Clone, Default)]
pub struct SequenceLayoutAlgorithm {
    config: LayoutConfig,
}

impl SequenceLayoutAlgorithm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    fn actor_width(&self, label: &str) -> f64 {
        let c = &self.config;
        c.snap((c.text_width(label) + c.actor_padding * 2.0).max(c.actor_min_width))
    }

    /// Horizontal room a message label needs
    fn label_room(&self, message: &Message) -> f64 {
        let c = &self.config;
        c.snap(c.text_width(&message.label) + c.label_padding * 2.0)
    }

    /// Vertical position of message slot `index`
    pub fn slot_y(&self, index: usize) -> f64 {
        let c = &self.config;
        c.margin + c.header_height + c.first_slot_offset + index as f64 * c.message_spacing
    }

    /// Layout the diagram
    pub fn layout(&self, database: &SequenceDatabase) -> Result<SequenceLayoutResult> {
        let layout_span = span!(
            Level::INFO,
            "layout_sequence",
            actors = database.actor_count(),
            messages = database.message_count()
        );
        let _enter = layout_span.enter();

        let c = &self.config;
        if !c.message_spacing.is_finite() || c.message_spacing <= 0.0 {
            return Err(DiagramError::layout_error(format!(
                "message spacing must be a positive number, got {}",
                c.message_spacing
            ))
            .into());
        }

        let actors = database.actors();
        let messages = database.messages();

        let header_y = c.margin;
        let lifeline_top = header_y + c.header_height;

        if actors.is_empty() {
            debug!("Empty diagram");
            return Ok(SequenceLayoutResult {
                actors: Vec::new(),
                messages: Vec::new(),
                width: 0.0,
                height: 0.0,
                header_y,
                header_height: c.header_height,
                lifeline_top,
                lifeline_bottom: lifeline_top,
                message_spacing: c.message_spacing,
            });
        }

        let widths: Vec<f64> = actors
            .iter()
            .map(|a| self.actor_width(a.display_label()))
            .collect();

        // Distance between consecutive lifelines, widened for labels
        let mut distances: Vec<f64> = widths
            .windows(2)
            .map(|pair| self.config.half(pair[0]) + c.actor_gap + (pair[1] - c.half(pair[1])))
            .collect();
        let mut tail_room = widths[widths.len() - 1] - c.half(widths[widths.len() - 1]);

        for message in messages {
            let (Some(from_idx), Some(to_idx)) = (
                database.actor_index(&message.from),
                database.actor_index(&message.to),
            ) else {
                let missing = if database.actor_index(&message.from).is_none() {
                    &message.from
                } else {
                    &message.to
                };
                return Err(DiagramError::unknown_actor(&message.id, missing).into());
            };

            if from_idx == to_idx {
                let needed = c.self_loop_width + self.label_room(message);
                match distances.get_mut(from_idx) {
                    Some(d) => *d = d.max(needed),
                    None => tail_room = tail_room.max(needed),
                }
                continue;
            }

            let (left, right) = if from_idx < to_idx {
                (from_idx, to_idx)
            } else {
                (to_idx, from_idx)
            };
            let needed = self.label_room(message);
            let span: f64 = distances[left..right].iter().sum();
            if needed > span {
                let per_slot = c.snap((needed - span) / (right - left) as f64);
                trace!(message = %message.id, per_slot, "Widening actor gaps for label");
                for d in &mut distances[left..right] {
                    *d += per_slot;
                }
            }
        }

        let mut positioned_actors = Vec::with_capacity(actors.len());
        let mut x = c.margin + c.half(widths[0]);
        for (index, actor) in actors.iter().enumerate() {
            if index > 0 {
                x += distances[index - 1];
            }
            let width = widths[index];
            trace!(actor = %actor.id, index, x, "Placed actor");
            positioned_actors.push(PositionedActor {
                id: actor.id.clone(),
                label: actor.display_label().to_string(),
                variant: actor.variant,
                tooltip: actor.tooltip.clone(),
                index,
                x,
                left: x - c.half(width),
                width,
            });
        }

        let mut positioned_messages = Vec::with_capacity(messages.len());
        for (index, message) in messages.iter().enumerate() {
            let from_idx = database.actor_index(&message.from).unwrap_or_default();
            let to_idx = database.actor_index(&message.to).unwrap_or_default();
            let from_x = positioned_actors[from_idx].x;
            let to_x = positioned_actors[to_idx].x;
            let y = self.slot_y(index);

            let geometry = if from_idx == to_idx {
                MessageGeometry::SelfLoop {
                    x: from_x,
                    width: c.self_loop_width,
                    height: c.self_loop_height,
                }
            } else {
                MessageGeometry::Arrow {
                    from_x,
                    to_x,
                    direction: if to_idx > from_idx {
                        ArrowDirection::Right
                    } else {
                        ArrowDirection::Left
                    },
                }
            };

            trace!(message = %message.id, index, y, self_loop = geometry.is_self_loop(), "Placed message");
            positioned_messages.push(PositionedMessage {
                id: message.id.clone(),
                from: message.from.clone(),
                to: message.to.clone(),
                label: message.label.clone(),
                variant: message.variant,
                tooltip: message.tooltip.clone(),
                index,
                y,
                geometry,
            });
        }

        let lifeline_bottom = match positioned_messages.last() {
            Some(last) => last.y + c.tail_padding,
            None => lifeline_top + c.first_slot_offset,
        };
        let right_edge = x + tail_room;
        let width = right_edge + c.margin;
        let height = lifeline_bottom + c.margin;

        debug!(width, height, "Sequence layout complete");

        Ok(SequenceLayoutResult {
            actors: positioned_actors,
            messages: positioned_messages,
            width,
            height,
            header_y,
            header_height: c.header_height,
            lifeline_top,
            lifeline_bottom,
            message_spacing: c.message_spacing,
        })
    }
}

impl LayoutAlgorithm<SequenceDatabase> for SequenceLayoutAlgorithm {
    type Output = SequenceLayoutResult;

    fn layout(&self, database: &SequenceDatabase) -> Result<Self::Output> {
        SequenceLayoutAlgorithm::layout(self, database)
    }

    fn name(&self) -> &'static str {
        "sequence"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }

    fn direction(&self) -> &'static str {
        "TB"
    }
}

#[cfg(test)]
mod tests {
    use super::super::database::{Actor, Message};
    use super::*;

    fn db(actors: &[&str], messages: &[(&str, &str, &str)]) -> SequenceDatabase {
        SequenceDatabase::from_parts(
            actors.iter().map(|id| Actor::new(*id)),
            messages
                .iter()
                .enumerate()
                .map(|(i, (from, to, label))| Message::new(i.to_string(), *from, *to, *label)),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_layout() {
        let result = SequenceLayoutAlgorithm::new()
            .layout(&SequenceDatabase::new())
            .unwrap();
        assert!(result.actors.is_empty());
        assert!(result.messages.is_empty());
        assert_eq!(result.width, 0.0);
    }

    #[test]
    fn test_actors_left_to_right_in_input_order() {
        let result = SequenceLayoutAlgorithm::new()
            .layout(&db(&["zeta", "alpha", "mid"], &[]))
            .unwrap();
        let ids: Vec<_> = result.actors.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["zeta", "alpha", "mid"]);
        assert!(result.actors[0].x < result.actors[1].x);
        assert!(result.actors[1].x < result.actors[2].x);
    }

    #[test]
    fn test_headers_do_not_overlap() {
        let result = SequenceLayoutAlgorithm::new()
            .layout(&db(&["a-very-long-service-name", "b"], &[]))
            .unwrap();
        let a = &result.actors[0];
        let b = &result.actors[1];
        assert!(a.left + a.width <= b.left);
    }

    #[test]
    fn test_message_slots_are_evenly_spaced() {
        let result = SequenceLayoutAlgorithm::new()
            .layout(&db(
                &["svc", "db"],
                &[("svc", "db", "a"), ("db", "svc", "b"), ("svc", "svc", "c")],
            ))
            .unwrap();
        let ys: Vec<f64> = result.messages.iter().map(|m| m.y).collect();
        assert_eq!(ys[1] - ys[0], DEFAULT_MESSAGE_SPACING);
        assert_eq!(ys[2] - ys[1], DEFAULT_MESSAGE_SPACING);
    }

    #[test]
    fn test_custom_spacing() {
        let algo = SequenceLayoutAlgorithm::with_config(LayoutConfig::svg().with_message_spacing(75.0));
        let result = algo
            .layout(&db(&["a", "b"], &[("a", "b", "1"), ("a", "b", "2")]))
            .unwrap();
        assert_eq!(result.messages[1].y - result.messages[0].y, 75.0);
        assert_eq!(result.message_spacing, 75.0);
    }

    #[test]
    fn test_invalid_spacing_is_rejected() {
        for bad in [0.0, -4.0, f64::NAN, f64::INFINITY] {
            let algo = SequenceLayoutAlgorithm::with_config(LayoutConfig::svg().with_message_spacing(bad));
            assert!(algo.layout(&db(&["a"], &[])).is_err());
        }
    }

    #[test]
    fn test_direction_follows_relative_position() {
        let result = SequenceLayoutAlgorithm::new()
            .layout(&db(&["a", "b"], &[("a", "b", "go"), ("b", "a", "back")]))
            .unwrap();
        match result.messages[0].geometry {
            MessageGeometry::Arrow { from_x, to_x, direction } => {
                assert_eq!(direction, ArrowDirection::Right);
                assert!(from_x < to_x);
            }
            _ => panic!("expected arrow"),
        }
        match result.messages[1].geometry {
            MessageGeometry::Arrow { direction, .. } => assert_eq!(direction, ArrowDirection::Left),
            _ => panic!("expected arrow"),
        }
    }

    #[test]
    fn test_self_message_is_a_loop() {
        let result = SequenceLayoutAlgorithm::new()
            .layout(&db(&["svc", "db"], &[("svc", "svc", "validate")]))
            .unwrap();
        let svc_x = result.actors[0].x;
        match result.messages[0].geometry {
            MessageGeometry::SelfLoop { x, .. } => assert_eq!(x, svc_x),
            _ => panic!("expected self loop"),
        }
    }

    #[test]
    fn test_long_label_widens_gap() {
        let short = SequenceLayoutAlgorithm::new()
            .layout(&db(&["a", "b"], &[("a", "b", "x")]))
            .unwrap();
        let long = SequenceLayoutAlgorithm::new()
            .layout(&db(
                &["a", "b"],
                &[("a", "b", "a label that is much wider than the default gap between actors")],
            ))
            .unwrap();
        let gap = |r: &SequenceLayoutResult| r.actors[1].x - r.actors[0].x;
        assert!(gap(&long) > gap(&short));
    }

    #[test]
    fn test_self_loop_on_last_actor_extends_width() {
        let plain = SequenceLayoutAlgorithm::new()
            .layout(&db(&["a", "b"], &[]))
            .unwrap();
        let looped = SequenceLayoutAlgorithm::new()
            .layout(&db(&["a", "b"], &[("b", "b", "flush buffers to disk")]))
            .unwrap();
        assert!(looped.width > plain.width);
    }

    #[test]
    fn test_lifelines_cover_all_slots() {
        let result = SequenceLayoutAlgorithm::new()
            .layout(&db(&["a", "b"], &[("a", "b", "1"), ("b", "a", "2")]))
            .unwrap();
        for m in &result.messages {
            assert!(m.y > result.lifeline_top);
            assert!(m.y < result.lifeline_bottom);
        }
    }

    #[test]
    fn test_ascii_metrics_snap_to_whole_cells() {
        let algo = SequenceLayoutAlgorithm::with_config(LayoutConfig::ascii());
        let result = algo
            .layout(&db(&["svc", "database"], &[("svc", "database", "query rows")]))
            .unwrap();
        for a in &result.actors {
            assert_eq!(a.x.fract(), 0.0);
            assert_eq!(a.left.fract(), 0.0);
        }
        assert_eq!(result.messages[0].y, 4.0);
    }
}
