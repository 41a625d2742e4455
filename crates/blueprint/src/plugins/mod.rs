//! Plugin implementations for the supported input kinds
//!
//! The sequence plugin implements the core traits for sequence diagrams;
//! the orchestrator routes JSON scenes and sequence notation through them.

pub mod orchestrator;
pub mod sequence;

pub use orchestrator::*;
pub use sequence::*;
