//! Sequence diagram plugin
//!
//! Lays out actors left to right and messages top to bottom, both in input
//! order, and renders the result as SVG or as a terminal preview.
//!
//! Notation example:
//! ```text
//! sequence
//! actor svc "Order Service" service
//! actor db "Postgres" database
//! svc ->> db : INSERT order
//! db -->> svc : ok
//! svc -) svc : emit event
//! ```

mod chumsky_parser;
mod database;
mod detector;
mod diagram;
mod layout;
mod parser;
mod renderer;
mod svg;

pub use chumsky_parser::{ChumskySequenceParser, Located, ParsedActor, ParsedMessage, Statement};
pub use database::{Actor, Message, SequenceDatabase};
pub use detector::SequenceDetector;
pub use diagram::SequenceDiagram;
pub use layout::{
    LayoutConfig, MessageGeometry, PositionedActor, PositionedMessage, SequenceLayoutAlgorithm,
    SequenceLayoutResult,
};
pub use parser::SequenceParser;
pub use renderer::SequenceAsciiRenderer;
pub use svg::SequenceSvgRenderer;
