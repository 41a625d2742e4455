//! Core parser trait for diagram notation
//!
//! Parsers turn text into entities stored in a [`Database`].

use anyhow::Result;

use super::Database;

/// Core trait for diagram parsers
///
/// # Example
/// ```
/// use blueprint::core::{Database, Parser};
/// use blueprint::plugins::sequence::{SequenceDatabase, SequenceParser};
///
/// let parser = SequenceParser::new();
/// let mut db = SequenceDatabase::new();
/// parser.parse("sequence\nactor a\nactor b\na ->> b : hi", &mut db).unwrap();
/// assert_eq!(db.edge_count(), 1);
/// ```
pub trait Parser<D: Database>: Send + Sync {
    /// Parse diagram notation into the provided database
    fn parse(&self, input: &str, database: &mut D) -> Result<()>;

    /// Get the name of this parser
    fn name(&self) -> &'static str;

    /// Get the version of this parser
    fn version(&self) -> &'static str;

    /// Check if the input can be parsed by this parser
    fn can_parse(&self, input: &str) -> bool;
}
