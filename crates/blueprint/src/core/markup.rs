//! Markup writer shared by the HTML and SVG renderers
//!
//! A thin string builder that escapes every text node and attribute value.

use std::fmt;

/// Escape text for use in XML/HTML text and attribute positions.
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_xml_into(&mut out, text);
    out
}

/// Append `text` to `out`, escaping markup-significant characters.
pub fn escape_xml_into(out: &mut String, text: &str) {
    let mut start = 0usize;
    for (i, b) in text.bytes().enumerate() {
        let esc = match b {
            b'&' => "&amp;",
            b'<' => "&lt;",
            b'>' => "&gt;",
            b'"' => "&quot;",
            b'\'' => "&#39;",
            _ => continue,
        };
        if start < i {
            out.push_str(&text[start..i]);
        }
        out.push_str(esc);
        start = i + 1;
    }
    if start < text.len() {
        out.push_str(&text[start..]);
    }
}

/// Format a coordinate with at most two decimals and no trailing zeros.
///
/// Identical inputs always produce identical strings, which keeps rendered
/// geometry byte-for-byte reproducible.
pub fn fmt_num(v: f64) -> String {
    let rounded = (v * 100.0).round() / 100.0;
    if rounded == 0.0 {
        return "0".to_string();
    }
    let mut s = format!("{rounded:.2}");
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    s
}

/// Attribute list: name and unescaped value
pub type Attrs<'a> = [(&'a str, String)];

/// Incremental markup builder
#[derive(Debug, Default, Clone)]
pub struct MarkupWriter {
    buf: String,
}

impl MarkupWriter {
    pub fn new() -> Self {
        Self::default()
    }

    fn write_attrs(&mut self, attrs: &Attrs<'_>) {
        for (name, value) in attrs {
            self.buf.push(' ');
            self.buf.push_str(name);
            self.buf.push_str("=\"");
            escape_xml_into(&mut self.buf, value);
            self.buf.push('"');
        }
    }

    /// Write an opening tag
    pub fn open(&mut self, tag: &str, attrs: &Attrs<'_>) {
        self.buf.push('<');
        self.buf.push_str(tag);
        self.write_attrs(attrs);
        self.buf.push('>');
    }

    /// Write a closing tag
    pub fn close(&mut self, tag: &str) {
        self.buf.push_str("</");
        self.buf.push_str(tag);
        self.buf.push('>');
    }

    /// Write a self-closing element (SVG style)
    pub fn empty(&mut self, tag: &str, attrs: &Attrs<'_>) {
        self.buf.push('<');
        self.buf.push_str(tag);
        self.write_attrs(attrs);
        self.buf.push_str("/>");
    }

    /// Write an element containing only escaped text
    pub fn element(&mut self, tag: &str, attrs: &Attrs<'_>, text: &str) {
        self.open(tag, attrs);
        self.text(text);
        self.close(tag);
    }

    /// Write escaped text
    pub fn text(&mut self, text: &str) {
        escape_xml_into(&mut self.buf, text);
    }

    /// Write pre-rendered markup verbatim
    pub fn raw(&mut self, markup: &str) {
        self.buf.push_str(markup);
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn finish(self) -> String {
        self.buf
    }
}

impl fmt::Display for MarkupWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
        assert_eq!(escape_xml("plain"), "plain");
        assert_eq!(escape_xml("it's"), "it&#39;s");
    }

    #[test]
    fn test_fmt_num() {
        assert_eq!(fmt_num(10.0), "10");
        assert_eq!(fmt_num(10.5), "10.5");
        assert_eq!(fmt_num(1.234), "1.23");
        assert_eq!(fmt_num(-0.001), "0");
    }

    #[test]
    fn test_writer_escapes_attributes_and_text() {
        let mut w = MarkupWriter::new();
        w.open("div", &[("title", "<x>".to_string())]);
        w.text("a&b");
        w.close("div");
        w.empty("rect", &[("x", "1".to_string())]);
        assert_eq!(
            w.finish(),
            "<div title=\"&lt;x&gt;\">a&amp;b</div><rect x=\"1\"/>"
        );
    }
}
