//! Sequence diagram text renderer
//!
//! Renders a terminal preview from the same layout the SVG renderer uses,
//! run with character-cell metrics.

use anyhow::Result;
use tracing::{debug, span, Level};

use super::database::SequenceDatabase;
use super::layout::{
    LayoutConfig, MessageGeometry, PositionedActor, PositionedMessage, SequenceLayoutAlgorithm,
};
use crate::core::{ArrowDirection, CharacterSet, MessageVariant, Renderer, TextCanvas};

/// Glyphs for one character set
struct Glyphs {
    h: char,
    dashed: char,
    v: char,
    top_left: char,
    top_right: char,
    bottom_left: char,
    bottom_right: char,
    tee_down: char,
    head_right: char,
    head_left: char,
    open_right: char,
    open_left: char,
}

const UNICODE: Glyphs = Glyphs {
    h: '─',
    dashed: '╌',
    v: '│',
    top_left: '┌',
    top_right: '┐',
    bottom_left: '└',
    bottom_right: '┘',
    tee_down: '┬',
    head_right: '▶',
    head_left: '◀',
    open_right: '▷',
    open_left: '◁',
};

const ASCII: Glyphs = Glyphs {
    h: '-',
    dashed: '.',
    v: '|',
    top_left: '+',
    top_right: '+',
    bottom_left: '+',
    bottom_right: '+',
    tee_down: '+',
    head_right: '>',
    head_left: '<',
    open_right: '>',
    open_left: '<',
};

/// Sequence diagram text renderer
pub struct SequenceAsciiRenderer {
    style: CharacterSet,
    layout: SequenceLayoutAlgorithm,
}

impl SequenceAsciiRenderer {
    pub fn new() -> Self {
        Self::with_style(CharacterSet::default())
    }

    pub fn with_style(style: CharacterSet) -> Self {
        Self {
            style,
            layout: SequenceLayoutAlgorithm::with_config(LayoutConfig::ascii()),
        }
    }

    fn glyphs(&self) -> &'static Glyphs {
        if self.style.is_ascii() {
            &ASCII
        } else {
            &UNICODE
        }
    }

    fn draw_actor(&self, canvas: &mut TextCanvas, actor: &PositionedActor, top: usize) {
        let g = self.glyphs();
        let left = actor.left as usize;
        let right = left + (actor.width as usize).max(2) - 1;
        let center = actor.x as usize;

        canvas.set(left, top, g.top_left);
        canvas.hline(left + 1, right - 1, top, g.h);
        canvas.set(right, top, g.top_right);

        canvas.set(left, top + 1, g.v);
        canvas.set(right, top + 1, g.v);
        canvas.text_centered(center, top + 1, &actor.label);

        canvas.set(left, top + 2, g.bottom_left);
        canvas.hline(left + 1, right - 1, top + 2, g.h);
        canvas.set(right, top + 2, g.bottom_right);
        canvas.set(center, top + 2, g.tee_down);
    }

    fn line_char(&self, variant: MessageVariant) -> char {
        let g = self.glyphs();
        if variant.is_dashed() {
            g.dashed
        } else {
            g.h
        }
    }

    fn draw_message(&self, canvas: &mut TextCanvas, message: &PositionedMessage) {
        let g = self.glyphs();
        let y = message.y as usize;
        let label_row = y.saturating_sub(1);
        let line = self.line_char(message.variant);

        match message.geometry {
            MessageGeometry::Arrow {
                from_x,
                to_x,
                direction,
            } => {
                let from_x = from_x as usize;
                let to_x = to_x as usize;
                let open = message.variant.has_open_head();
                let (head_x, head) = if direction == ArrowDirection::Right {
                    (to_x - 1, if open { g.open_right } else { g.head_right })
                } else {
                    (to_x + 1, if open { g.open_left } else { g.head_left })
                };
                let (start, end) = if direction == ArrowDirection::Right {
                    (from_x + 1, head_x.saturating_sub(1))
                } else {
                    (head_x + 1, from_x.saturating_sub(1))
                };
                if start <= end {
                    canvas.hline(start, end, y, line);
                }
                canvas.set(head_x, y, head);

                if !message.label.is_empty() {
                    canvas.text_centered((from_x + to_x) / 2, label_row, &message.label);
                }
            }
            MessageGeometry::SelfLoop { x, width, .. } => {
                let x = x as usize;
                let corner = x + (width as usize).max(2);
                canvas.hline(x + 1, corner - 1, label_row, line);
                canvas.set(corner, label_row, g.top_right);
                let head = if message.variant.has_open_head() {
                    g.open_left
                } else {
                    g.head_left
                };
                canvas.set(x + 1, y, head);
                if corner > x + 2 {
                    canvas.hline(x + 2, corner - 1, y, line);
                }
                canvas.set(corner, y, g.bottom_right);

                if !message.label.is_empty() {
                    canvas.text(corner + 2, label_row, &message.label);
                }
            }
        }
    }

    /// Render the database to a text preview
    pub fn render(&self, database: &SequenceDatabase) -> Result<String> {
        let render_span = span!(Level::INFO, "render_sequence_text", style = %self.style);
        let _enter = render_span.enter();

        let layout = self.layout.layout(database)?;
        if layout.actors.is_empty() {
            return Ok(String::new());
        }

        let mut canvas = TextCanvas::new(layout.width as usize, layout.height as usize);
        let top = layout.header_y as usize;

        for actor in &layout.actors {
            self.draw_actor(&mut canvas, actor, top);
        }

        for message in &layout.messages {
            self.draw_message(&mut canvas, message);
        }

        // Lifelines go in last so they never cover arrows or labels
        let g = self.glyphs();
        let lifeline_top = layout.lifeline_top as usize;
        let lifeline_bottom = layout.lifeline_bottom as usize;
        for actor in &layout.actors {
            canvas.vline_under(actor.x as usize, lifeline_top, lifeline_bottom, g.v);
        }

        debug!(
            width = canvas.width,
            height = canvas.height,
            "Rendered sequence preview"
        );
        Ok(canvas.to_string())
    }
}

impl Default for SequenceAsciiRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer<SequenceDatabase> for SequenceAsciiRenderer {
    type Output = String;

    fn render(&self, database: &SequenceDatabase) -> Result<Self::Output> {
        SequenceAsciiRenderer::render(self, database)
    }

    fn name(&self) -> &'static str {
        "ascii"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }

    fn format(&self) -> &'static str {
        "text"
    }
}

#[cfg(test)]
mod tests {
    use super::super::database::{Actor, Message};
    use super::*;

    fn db(messages: Vec<Message>) -> SequenceDatabase {
        SequenceDatabase::from_parts(vec![Actor::new("svc"), Actor::new("db")], messages).unwrap()
    }

    #[test]
    fn test_render_single_message() {
        let output = SequenceAsciiRenderer::new()
            .render(&db(vec![Message::new("1", "svc", "db", "query")]))
            .unwrap();

        assert!(output.contains("svc"));
        assert!(output.contains("db"));
        assert!(output.contains("query"));
        assert!(output.contains('▶'));
        assert!(!output.contains('◀'));
    }

    #[test]
    fn test_label_sits_above_arrow() {
        let output = SequenceAsciiRenderer::new()
            .render(&db(vec![Message::new("1", "svc", "db", "query")]))
            .unwrap();
        let lines: Vec<&str> = output.lines().collect();
        let label_row = lines.iter().position(|l| l.contains("query")).unwrap();
        assert!(lines[label_row + 1].contains('▶'));
    }

    #[test]
    fn test_return_message_is_dashed_and_points_left() {
        let output = SequenceAsciiRenderer::new()
            .render(&db(vec![
                Message::new("1", "db", "svc", "rows").with_variant(MessageVariant::Return)
            ]))
            .unwrap();
        assert!(output.contains('╌'));
        assert!(output.contains('◀'));
    }

    #[test]
    fn test_async_uses_open_head() {
        let output = SequenceAsciiRenderer::new()
            .render(&db(vec![
                Message::new("1", "svc", "db", "event").with_variant(MessageVariant::Async)
            ]))
            .unwrap();
        assert!(output.contains('▷'));
    }

    #[test]
    fn test_self_message_draws_hook() {
        let output = SequenceAsciiRenderer::new()
            .render(&db(vec![Message::new("1", "svc", "svc", "validate")]))
            .unwrap();
        assert!(output.contains("┐ validate"));
        assert!(output.contains("◀─┘"));
        assert!(!output.contains('▶'));
    }

    #[test]
    fn test_ascii_style() {
        let output = SequenceAsciiRenderer::with_style(CharacterSet::Ascii)
            .render(&db(vec![Message::new("1", "svc", "db", "query")]))
            .unwrap();
        assert!(output.is_ascii());
        assert!(output.contains('>'));
        assert!(output.contains('+'));
    }

    #[test]
    fn test_render_empty_database() {
        let output = SequenceAsciiRenderer::new()
            .render(&SequenceDatabase::new())
            .unwrap();
        assert!(output.is_empty());
    }
}
