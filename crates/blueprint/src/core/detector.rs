//! Core detector trait for input kind identification

/// Core trait for input detectors
///
/// The orchestrator asks every registered detector for a confidence score
/// and routes the input to the most confident one.
pub trait Detector: Send + Sync {
    /// Detect if the input matches this input kind
    fn detect(&self, input: &str) -> bool {
        self.confidence(input) > 0.5
    }

    /// Get the confidence level of the detection (0.0 to 1.0)
    fn confidence(&self, input: &str) -> f64;

    /// Get the input kind name
    fn diagram_type(&self) -> &'static str;

    /// Get key patterns that this detector looks for
    fn patterns(&self) -> Vec<&'static str>;
}
