//! Core renderer trait for diagram output
//!
//! Renderers turn a validated database into markup or text.

use anyhow::Result;

use super::Database;

/// Core trait for diagram renderers
///
/// Each diagram type can have several renderers, one per output format.
pub trait Renderer<D: Database>: Send + Sync {
    /// The output type of this renderer
    type Output;

    /// Render the diagram database into the output format
    fn render(&self, database: &D) -> Result<Self::Output>;

    /// Get the name of this renderer
    fn name(&self) -> &'static str;

    /// Get the version of this renderer
    fn version(&self) -> &'static str;

    /// Get the supported output format
    fn format(&self) -> &'static str;
}
