//! Terminal colorization for sequence previews
//!
//! Applies ANSI escape codes to preview glyphs using crossterm.

use crossterm::style::{Color, Stylize};

/// Colorize a sequence preview using ANSI escape codes
///
/// - Actor header boxes and self-loop hooks: Cyan
/// - Arrow heads: Yellow (closed) or Magenta (open, async)
/// - Dashed return lines: Dark grey
/// - Lifelines, labels and solid arrow shafts: terminal default
pub fn colorize_output(input: &str) -> String {
    let mut result = String::with_capacity(input.len() * 2);

    for line in input.lines() {
        for c in line.chars() {
            match glyph_color(line, c) {
                Some(color) => result.push_str(&format!("{}", c.to_string().with(color))),
                None => result.push(c),
            }
        }
        result.push('\n');
    }

    if !input.ends_with('\n') && result.ends_with('\n') {
        result.pop();
    }

    result
}

fn glyph_color(line: &str, c: char) -> Option<Color> {
    match c {
        '┌' | '┐' | '└' | '┘' | '┬' => Some(Color::Cyan),
        '▶' | '◀' => Some(Color::Yellow),
        '▷' | '◁' => Some(Color::Magenta),
        '╌' => Some(Color::DarkGrey),
        // ASCII fallbacks only count when the line looks like drawing
        '+' if line.contains("+-") || line.contains("-+") => Some(Color::Cyan),
        '>' | '<' if line.contains("->") || line.contains("<-") || line.contains(".>") || line.contains("<.") => {
            Some(Color::Yellow)
        }
        _ => None,
    }
}
