//! Core abstractions for diagram processing
//!
//! The plugin traits (database, parser, layout, renderer, detector), the
//! shared presentational vocabulary and its style tables, and the
//! infrastructure every renderer uses (markup writer, text canvas,
//! logging, errors).

mod canvas;
pub mod chumsky_utils;
mod config;
mod database;
mod detector;
mod error;
mod layout;
pub mod logging;
pub mod markup;
mod parser;
mod renderer;
mod text;
pub mod theme;
mod types;

pub use canvas::*;
pub use config::*;
pub use database::*;
pub use detector::*;
pub use error::*;
pub use layout::*;
pub use logging::*;
pub use parser::*;
pub use renderer::*;
pub use text::*;
pub use types::*;
