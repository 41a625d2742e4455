//! Presentational primitives
//!
//! Node, Arrow, Tooltip and Container render to HTML fragments and compose
//! into an [`Element`] tree. A [`Scene`] is a titled list of elements
//! loaded from JSON. Sequence diagrams live in
//! [`crate::plugins::sequence`] and appear here as an element kind.

mod arrow;
mod container;
mod element;
mod node;
mod scene;
mod tooltip;

pub use arrow::{Arrow, ArrowGeometry};
pub use container::Container;
pub use element::{Component, Element, RenderContext, TextElement};
pub use node::Node;
pub use scene::{wrap_page, Scene, SceneDetector};
pub use tooltip::{StructuredContent, Tooltip, TooltipContent, TooltipEvent, TooltipState};

pub(crate) use element::class;
