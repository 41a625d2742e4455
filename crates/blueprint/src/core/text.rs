//! Shared text utilities for diagram processing
//!
//! Label measurement and wrapping used by layout and renderers.

use unicode_width::UnicodeWidthStr;

/// Display width of a string in terminal columns.
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Split a label on explicit line breaks.
///
/// Node labels may be multi-line; both `\n` and the literal `<br>` used in
/// hand-written scenes count as breaks.
pub fn label_lines(label: &str) -> Vec<&str> {
    label
        .split('\n')
        .flat_map(|line| line.split("<br>"))
        .map(str::trim)
        .collect()
}

/// Width in columns of the widest line of a label.
pub fn label_width(label: &str) -> usize {
    label_lines(label)
        .into_iter()
        .map(display_width)
        .max()
        .unwrap_or(0)
}

/// Wrap text to fit within a maximum width, breaking on word boundaries.
///
/// Returns a vector of lines, each fitting within `max_width` display columns.
/// If `max_width` is 0, or the label fits on one line, returns a single-element vector.
///
/// # Example
/// ```
/// use blueprint::core::wrap_label;
///
/// let lines = wrap_label("This is a long label", 10);
/// assert_eq!(lines, vec!["This is a", "long label"]);
/// ```
pub fn wrap_label(label: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 || display_width(label) <= max_width {
        return vec![label.to_string()];
    }

    let mut lines = Vec::new();
    let mut current_line = String::new();
    let mut current_width = 0;

    for word in label.split_whitespace() {
        let word_width = display_width(word);

        if current_width == 0 {
            current_line = word.to_string();
            current_width = word_width;
        } else if current_width + 1 + word_width <= max_width {
            current_line.push(' ');
            current_line.push_str(word);
            current_width += 1 + word_width;
        } else {
            lines.push(current_line);
            current_line = word.to_string();
            current_width = word_width;
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }

    if lines.is_empty() {
        vec![String::new()]
    } else {
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_short_label() {
        assert_eq!(wrap_label("Hello", 20), vec!["Hello"]);
    }

    #[test]
    fn test_wrap_long_label() {
        let result = wrap_label("This is a long label", 10);
        assert_eq!(result, vec!["This is a", "long label"]);
    }

    #[test]
    fn test_wrap_zero_width() {
        assert_eq!(wrap_label("Hello World", 0), vec!["Hello World"]);
    }

    #[test]
    fn test_wrap_unicode() {
        // CJK characters are two columns wide
        let result = wrap_label("日本 語テスト", 6);
        assert_eq!(result, vec!["日本", "語テスト"]);
    }

    #[test]
    fn test_label_lines() {
        assert_eq!(label_lines("Kafka\nConnect"), vec!["Kafka", "Connect"]);
        assert_eq!(label_lines("a<br>b"), vec!["a", "b"]);
        assert_eq!(label_lines("single"), vec!["single"]);
    }

    #[test]
    fn test_label_width_uses_widest_line() {
        assert_eq!(label_width("ab\nabcd\nabc"), 4);
        assert_eq!(label_width(""), 0);
    }
}
