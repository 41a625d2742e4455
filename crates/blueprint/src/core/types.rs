//! Core type definitions for diagram processing
//!
//! This module contains the enumerated presentational vocabulary shared by
//! every primitive: node variants, sizes, arrow directions, container
//! colors, actor roles and message kinds.
//!
//! All of these are cosmetic. Parsing is lenient: an unrecognized name
//! falls back to the default value and logs a warning instead of failing
//! the render.

use std::fmt;

use serde::Deserialize;
use tracing::warn;

/// Resolve a parsed enum value, falling back to the default on a miss.
fn lenient<T: Default + fmt::Display>(kind: &'static str, raw: &str, parsed: Option<T>) -> T {
    parsed.unwrap_or_else(|| {
        let fallback = T::default();
        warn!(kind, value = raw, fallback = %fallback, "Unknown {kind}, using default style");
        fallback
    })
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase().replace(['-', ' '], "_")
}

/// Character set for terminal previews
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum CharacterSet {
    /// Pure ASCII characters only: - | + < >
    Ascii,
    /// Unicode box-drawing characters: ┌ ┐ └ ┘ ─ │ ▶
    #[default]
    Unicode,
}

impl CharacterSet {
    /// Returns true if this character set uses only ASCII
    pub fn is_ascii(&self) -> bool {
        matches!(self, CharacterSet::Ascii)
    }
}

impl fmt::Display for CharacterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharacterSet::Ascii => write!(f, "ascii"),
            CharacterSet::Unicode => write!(f, "unicode"),
        }
    }
}

/// Box size for nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Deserialize)]
#[serde(from = "String")]
pub enum Size {
    #[default]
    Sm,
    Md,
    Lg,
}

impl Size {
    pub const ALL: &'static [Size] = &[Size::Sm, Size::Md, Size::Lg];

    pub fn from_name(s: &str) -> Option<Self> {
        match normalize(s).as_str() {
            "sm" | "small" => Some(Size::Sm),
            "md" | "medium" => Some(Size::Md),
            "lg" | "large" => Some(Size::Lg),
            _ => None,
        }
    }

    pub fn parse_lenient(s: &str) -> Self {
        lenient("size", s, Self::from_name(s))
    }
}

impl From<String> for Size {
    fn from(s: String) -> Self {
        Self::parse_lenient(&s)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Size::Sm => write!(f, "sm"),
            Size::Md => write!(f, "md"),
            Size::Lg => write!(f, "lg"),
        }
    }
}

/// Direction a standalone arrow points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Deserialize)]
#[serde(from = "String")]
pub enum ArrowDirection {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl ArrowDirection {
    pub const ALL: &'static [ArrowDirection] = &[
        ArrowDirection::Up,
        ArrowDirection::Down,
        ArrowDirection::Left,
        ArrowDirection::Right,
    ];

    pub fn from_name(s: &str) -> Option<Self> {
        match normalize(s).as_str() {
            "up" => Some(ArrowDirection::Up),
            "down" => Some(ArrowDirection::Down),
            "left" => Some(ArrowDirection::Left),
            "right" => Some(ArrowDirection::Right),
            _ => None,
        }
    }

    pub fn parse_lenient(s: &str) -> Self {
        lenient("arrow direction", s, Self::from_name(s))
    }

    /// Returns true for left/right arrows
    pub fn is_horizontal(&self) -> bool {
        matches!(self, ArrowDirection::Left | ArrowDirection::Right)
    }
}

impl From<String> for ArrowDirection {
    fn from(s: String) -> Self {
        Self::parse_lenient(&s)
    }
}

impl fmt::Display for ArrowDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrowDirection::Up => write!(f, "up"),
            ArrowDirection::Down => write!(f, "down"),
            ArrowDirection::Left => write!(f, "left"),
            ArrowDirection::Right => write!(f, "right"),
        }
    }
}

/// Semantic role of a node, selecting its style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Deserialize)]
#[serde(from = "String")]
pub enum NodeVariant {
    Database,
    Queue,
    Connector,
    External,
    Compute,
    Storage,
    Monitoring,
    App,
    Sink,
    Cluster,
    Target,
    #[default]
    Default,
}

impl NodeVariant {
    pub const ALL: &'static [NodeVariant] = &[
        NodeVariant::Database,
        NodeVariant::Queue,
        NodeVariant::Connector,
        NodeVariant::External,
        NodeVariant::Compute,
        NodeVariant::Storage,
        NodeVariant::Monitoring,
        NodeVariant::App,
        NodeVariant::Sink,
        NodeVariant::Cluster,
        NodeVariant::Target,
        NodeVariant::Default,
    ];

    pub fn from_name(s: &str) -> Option<Self> {
        match normalize(s).as_str() {
            "database" | "db" => Some(NodeVariant::Database),
            "queue" => Some(NodeVariant::Queue),
            "connector" => Some(NodeVariant::Connector),
            "external" => Some(NodeVariant::External),
            "compute" => Some(NodeVariant::Compute),
            "storage" => Some(NodeVariant::Storage),
            "monitoring" => Some(NodeVariant::Monitoring),
            "app" => Some(NodeVariant::App),
            "sink" => Some(NodeVariant::Sink),
            "cluster" => Some(NodeVariant::Cluster),
            "target" => Some(NodeVariant::Target),
            "default" => Some(NodeVariant::Default),
            _ => None,
        }
    }

    pub fn parse_lenient(s: &str) -> Self {
        lenient("node variant", s, Self::from_name(s))
    }
}

impl From<String> for NodeVariant {
    fn from(s: String) -> Self {
        Self::parse_lenient(&s)
    }
}

impl fmt::Display for NodeVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeVariant::Database => "database",
            NodeVariant::Queue => "queue",
            NodeVariant::Connector => "connector",
            NodeVariant::External => "external",
            NodeVariant::Compute => "compute",
            NodeVariant::Storage => "storage",
            NodeVariant::Monitoring => "monitoring",
            NodeVariant::App => "app",
            NodeVariant::Sink => "sink",
            NodeVariant::Cluster => "cluster",
            NodeVariant::Target => "target",
            NodeVariant::Default => "default",
        };
        f.write_str(name)
    }
}

/// Theme color of a grouping container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Deserialize)]
#[serde(from = "String")]
pub enum ContainerColor {
    Blue,
    Green,
    Purple,
    Orange,
    Red,
    Yellow,
    #[default]
    Gray,
    Teal,
}

impl ContainerColor {
    pub const ALL: &'static [ContainerColor] = &[
        ContainerColor::Blue,
        ContainerColor::Green,
        ContainerColor::Purple,
        ContainerColor::Orange,
        ContainerColor::Red,
        ContainerColor::Yellow,
        ContainerColor::Gray,
        ContainerColor::Teal,
    ];

    pub fn from_name(s: &str) -> Option<Self> {
        match normalize(s).as_str() {
            "blue" => Some(ContainerColor::Blue),
            "green" => Some(ContainerColor::Green),
            "purple" => Some(ContainerColor::Purple),
            "orange" => Some(ContainerColor::Orange),
            "red" => Some(ContainerColor::Red),
            "yellow" => Some(ContainerColor::Yellow),
            "gray" | "grey" => Some(ContainerColor::Gray),
            "teal" => Some(ContainerColor::Teal),
            _ => None,
        }
    }

    pub fn parse_lenient(s: &str) -> Self {
        lenient("container color", s, Self::from_name(s))
    }
}

impl From<String> for ContainerColor {
    fn from(s: String) -> Self {
        Self::parse_lenient(&s)
    }
}

impl fmt::Display for ContainerColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ContainerColor::Blue => "blue",
            ContainerColor::Green => "green",
            ContainerColor::Purple => "purple",
            ContainerColor::Orange => "orange",
            ContainerColor::Red => "red",
            ContainerColor::Yellow => "yellow",
            ContainerColor::Gray => "gray",
            ContainerColor::Teal => "teal",
        };
        f.write_str(name)
    }
}

/// Semantic role of a sequence diagram actor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Deserialize)]
#[serde(from = "String")]
pub enum ActorVariant {
    Service,
    Queue,
    Database,
    External,
    Client,
    #[default]
    Default,
}

impl ActorVariant {
    pub const ALL: &'static [ActorVariant] = &[
        ActorVariant::Service,
        ActorVariant::Queue,
        ActorVariant::Database,
        ActorVariant::External,
        ActorVariant::Client,
        ActorVariant::Default,
    ];

    pub fn from_name(s: &str) -> Option<Self> {
        match normalize(s).as_str() {
            "service" => Some(ActorVariant::Service),
            "queue" => Some(ActorVariant::Queue),
            "database" | "db" => Some(ActorVariant::Database),
            "external" => Some(ActorVariant::External),
            "client" | "user" => Some(ActorVariant::Client),
            "default" => Some(ActorVariant::Default),
            _ => None,
        }
    }

    pub fn parse_lenient(s: &str) -> Self {
        lenient("actor variant", s, Self::from_name(s))
    }
}

impl From<String> for ActorVariant {
    fn from(s: String) -> Self {
        Self::parse_lenient(&s)
    }
}

impl fmt::Display for ActorVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActorVariant::Service => "service",
            ActorVariant::Queue => "queue",
            ActorVariant::Database => "database",
            ActorVariant::External => "external",
            ActorVariant::Client => "client",
            ActorVariant::Default => "default",
        };
        f.write_str(name)
    }
}

/// Kind of interaction a message represents
///
/// Only affects stroke and arrowhead styling, never placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Deserialize)]
#[serde(from = "String")]
pub enum MessageVariant {
    /// Synchronous call: solid line, filled head
    #[default]
    Sync,
    /// Fire-and-forget: solid line, open head
    Async,
    /// Response to an earlier call: dashed line, filled head
    Return,
}

impl MessageVariant {
    pub const ALL: &'static [MessageVariant] = &[
        MessageVariant::Sync,
        MessageVariant::Async,
        MessageVariant::Return,
    ];

    pub fn from_name(s: &str) -> Option<Self> {
        match normalize(s).as_str() {
            "sync" | "synchronous" | "call" => Some(MessageVariant::Sync),
            "async" | "asynchronous" | "fire_and_forget" | "event" => Some(MessageVariant::Async),
            "return" | "response" | "reply" => Some(MessageVariant::Return),
            _ => None,
        }
    }

    pub fn parse_lenient(s: &str) -> Self {
        lenient("message variant", s, Self::from_name(s))
    }

    /// Returns true if the message line is drawn dashed
    pub fn is_dashed(&self) -> bool {
        matches!(self, MessageVariant::Return)
    }

    /// Returns true if the arrowhead is open rather than filled
    pub fn has_open_head(&self) -> bool {
        matches!(self, MessageVariant::Async)
    }
}

impl From<String> for MessageVariant {
    fn from(s: String) -> Self {
        Self::parse_lenient(&s)
    }
}

impl fmt::Display for MessageVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageVariant::Sync => write!(f, "sync"),
            MessageVariant::Async => write!(f, "async"),
            MessageVariant::Return => write!(f, "return"),
        }
    }
}

/// How a container stacks its children
///
/// The container never picks this itself; it is passed through from the
/// caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Deserialize)]
#[serde(from = "String")]
pub enum Arrangement {
    #[default]
    Column,
    Row,
}

impl Arrangement {
    pub fn from_name(s: &str) -> Option<Self> {
        match normalize(s).as_str() {
            "column" | "col" | "vertical" => Some(Arrangement::Column),
            "row" | "horizontal" => Some(Arrangement::Row),
            _ => None,
        }
    }

    pub fn parse_lenient(s: &str) -> Self {
        lenient("arrangement", s, Self::from_name(s))
    }
}

impl From<String> for Arrangement {
    fn from(s: String) -> Self {
        Self::parse_lenient(&s)
    }
}

impl fmt::Display for Arrangement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arrangement::Column => write!(f, "column"),
            Arrangement::Row => write!(f, "row"),
        }
    }
}
