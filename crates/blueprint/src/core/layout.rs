//! Core layout trait for diagram positioning
//!
//! Layout is a pure function of the database and the algorithm's
//! configuration: the same input always yields the same geometry.

use anyhow::Result;

use super::Database;

/// Core trait for layout algorithms
pub trait LayoutAlgorithm<D: Database>: Send + Sync {
    /// The positioned output of this layout algorithm
    type Output;

    /// Compute positions for every element in the database
    fn layout(&self, database: &D) -> Result<Self::Output>;

    /// Get the name of this layout algorithm
    fn name(&self) -> &'static str;

    /// Get the version of this layout algorithm
    fn version(&self) -> &'static str;

    /// Get the primary flow direction of the layout
    fn direction(&self) -> &'static str;
}
