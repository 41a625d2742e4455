//! Sequence notation detector
//!
//! Identifies the line-oriented sequence notation from input text.

use crate::core::Detector;

/// Detector for sequence notation
pub struct SequenceDetector;

impl SequenceDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SequenceDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for SequenceDetector {
    fn confidence(&self, input: &str) -> f64 {
        let mut lines = input
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with("%%"));

        // JSON scenes belong to the scene detector
        let Some(first) = lines.next() else {
            return 0.0;
        };
        if first.starts_with('{') || first.starts_with('[') {
            return 0.0;
        }

        if first.eq_ignore_ascii_case("sequence") {
            return 1.0;
        }

        let has_arrows = input.contains("->>") || input.contains("-)");
        let has_actor = std::iter::once(first)
            .chain(lines)
            .any(|l| l.starts_with("actor ") || l.starts_with("actor\t"));

        match (has_arrows, has_actor) {
            (true, true) => 0.8,
            (true, false) => 0.6,
            (false, true) => 0.55,
            (false, false) => 0.0,
        }
    }

    fn diagram_type(&self) -> &'static str {
        "sequence"
    }

    fn patterns(&self) -> Vec<&'static str> {
        vec!["sequence", "actor", "->>", "-->>", "-)", "spacing"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_sequence_keyword() {
        let detector = SequenceDetector::new();
        assert!(detector.detect("sequence\nactor a\nactor b\na ->> b : hi"));
        assert!(detector.detect("%% comment\nSEQUENCE\n"));
        assert_eq!(detector.confidence("sequence"), 1.0);
    }

    #[test]
    fn test_confidence_scoring() {
        let detector = SequenceDetector::new();
        assert!(detector.confidence("actor a\nactor b\na ->> b : hi") >= 0.8);
        assert!(detector.confidence("a ->> b : hi") >= 0.6);
        assert!(detector.confidence("actor a") > 0.5);
        assert_eq!(detector.confidence("graph TD; A-->B"), 0.0);
    }

    #[test]
    fn test_rejects_json_scene() {
        let detector = SequenceDetector::new();
        assert!(!detector.detect(r#"{"elements": [{"type": "text", "text": "a ->> b"}]}"#));
    }

    #[test]
    fn test_empty_input() {
        let detector = SequenceDetector::new();
        assert!(!detector.detect(""));
        assert!(!detector.detect("   \n\n"));
    }
}
