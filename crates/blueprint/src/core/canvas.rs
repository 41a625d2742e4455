//! Character grid used by the terminal preview renderer
//!
//! Cells are terminal columns. A wide character occupies its own cell plus
//! a continuation cell that is skipped on output.

use unicode_width::UnicodeWidthChar;

use super::text::display_width;

/// Marks the second column of a wide character
const CONTINUATION: char = '\0';

/// A growable grid of characters
#[derive(Debug, Clone)]
pub struct TextCanvas {
    pub width: usize,
    pub height: usize,
    grid: Vec<Vec<char>>,
}

impl TextCanvas {
    /// Create a blank canvas with the specified dimensions
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            grid: vec![vec![' '; width.max(1)]; height.max(1)],
        }
    }

    /// Grow the canvas so that (`min_width`, `min_height`) fits
    pub fn ensure_size(&mut self, min_width: usize, min_height: usize) {
        if min_width > self.width {
            for row in &mut self.grid {
                row.resize(min_width, ' ');
            }
            self.width = min_width;
        }
        if min_height > self.height {
            let width = self.width.max(1);
            self.grid
                .resize_with(min_height, || vec![' '; width]);
            self.height = min_height;
        }
    }

    pub fn set(&mut self, x: usize, y: usize, c: char) {
        self.ensure_size(x + 1, y + 1);
        let old = self.grid[y][x];
        if old == CONTINUATION && x > 0 {
            self.grid[y][x - 1] = ' ';
        } else if self.grid[y].get(x + 1) == Some(&CONTINUATION) {
            self.grid[y][x + 1] = ' ';
        }
        self.grid[y][x] = c;
    }

    /// Set a cell only if nothing has been drawn there yet
    pub fn set_if_blank(&mut self, x: usize, y: usize, c: char) {
        if self.get(x, y) == ' ' {
            self.set(x, y, c);
        }
    }

    pub fn get(&self, x: usize, y: usize) -> char {
        self.grid
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(' ')
    }

    /// Draw text starting at `x`, advancing by display width
    pub fn text(&mut self, x: usize, y: usize, text: &str) {
        let mut col = x;
        for c in text.chars() {
            let width = UnicodeWidthChar::width(c).unwrap_or(0);
            if width == 0 {
                continue;
            }
            self.set(col, y, c);
            for extra in 1..width {
                let cx = col + extra;
                self.ensure_size(cx + 1, y + 1);
                if self.grid[y].get(cx + 1) == Some(&CONTINUATION) {
                    self.grid[y][cx + 1] = ' ';
                }
                self.grid[y][cx] = CONTINUATION;
            }
            col += width;
        }
    }

    /// Draw text centered on `center_x`
    pub fn text_centered(&mut self, center_x: usize, y: usize, text: &str) {
        let width = display_width(text);
        self.text(center_x.saturating_sub(width / 2), y, text);
    }

    /// Fill `x1..=x2` on row `y`
    pub fn hline(&mut self, x1: usize, x2: usize, y: usize, c: char) {
        let (start, end) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        for x in start..=end {
            self.set(x, y, c);
        }
    }

    /// Fill `y1..=y2` in column `x`, leaving drawn cells alone
    pub fn vline_under(&mut self, x: usize, y1: usize, y2: usize, c: char) {
        let (start, end) = if y1 <= y2 { (y1, y2) } else { (y2, y1) };
        for y in start..=end {
            self.set_if_blank(x, y, c);
        }
    }
}

impl std::fmt::Display for TextCanvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut rows: Vec<String> = self
            .grid
            .iter()
            .map(|row| {
                row.iter()
                    .filter(|c| **c != CONTINUATION)
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .collect();

        while rows.last().is_some_and(|row| row.is_empty()) {
            rows.pop();
        }
        while rows.first().is_some_and(|row| row.is_empty()) {
            rows.remove(0);
        }

        write!(f, "{}", rows.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut canvas = TextCanvas::new(4, 4);
        canvas.set(2, 1, 'X');
        assert_eq!(canvas.get(2, 1), 'X');
        assert_eq!(canvas.get(0, 0), ' ');
        assert_eq!(canvas.get(100, 100), ' ');
    }

    #[test]
    fn test_grows_on_demand() {
        let mut canvas = TextCanvas::new(2, 2);
        canvas.set(9, 5, 'Y');
        assert!(canvas.width >= 10);
        assert!(canvas.height >= 6);
    }

    #[test]
    fn test_vline_under_preserves_drawn_cells() {
        let mut canvas = TextCanvas::new(5, 5);
        canvas.set(2, 2, '─');
        canvas.vline_under(2, 0, 4, '│');
        assert_eq!(canvas.get(2, 1), '│');
        assert_eq!(canvas.get(2, 2), '─');
    }

    #[test]
    fn test_text_centered() {
        let mut canvas = TextCanvas::new(20, 3);
        canvas.text_centered(10, 1, "Hi");
        assert_eq!(canvas.get(9, 1), 'H');
        assert_eq!(canvas.get(10, 1), 'i');
    }

    #[test]
    fn test_wide_text_takes_two_columns() {
        let mut canvas = TextCanvas::new(10, 1);
        canvas.text(0, 0, "注文x");
        assert_eq!(canvas.get(0, 0), '注');
        assert_eq!(canvas.get(2, 0), '文');
        assert_eq!(canvas.get(4, 0), 'x');
        assert_eq!(canvas.to_string(), "注文x");
    }

    #[test]
    fn test_wide_text_centered_by_columns() {
        let mut canvas = TextCanvas::new(20, 1);
        canvas.text_centered(10, 0, "注文");
        assert_eq!(canvas.get(8, 0), '注');
        assert_eq!(canvas.get(10, 0), '文');
    }

    #[test]
    fn test_continuation_cells_are_not_overdrawn() {
        let mut canvas = TextCanvas::new(6, 3);
        canvas.text(0, 1, "注");
        canvas.vline_under(1, 0, 2, '│');
        assert_eq!(canvas.to_string(), " │\n注\n │");
    }

    #[test]
    fn test_overwriting_half_of_wide_char_clears_it() {
        let mut canvas = TextCanvas::new(6, 1);
        canvas.text(0, 0, "注");
        canvas.set(1, 0, '|');
        assert_eq!(canvas.to_string(), " |");
    }

    #[test]
    fn test_display_trims_trailing_space() {
        let mut canvas = TextCanvas::new(10, 4);
        canvas.text(1, 1, "ab");
        assert_eq!(canvas.to_string(), " ab");
    }
}
