//! Immutable style tables
//!
//! Role-to-color lookups for every enumerated variant, plus the stylesheet
//! emitted by the HTML page wrapper. Everything here is a constant; the
//! tables are resolved at render time and never mutated.

use std::fmt::Write;

use super::types::{ActorVariant, ContainerColor, MessageVariant, NodeVariant, Size};

/// Class name prefix shared by all emitted markup
pub const CLASS_PREFIX: &str = "bp";

/// Fill, stroke and text color of a box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxStyle {
    pub fill: &'static str,
    pub stroke: &'static str,
    pub text: &'static str,
}

/// Colors of a container frame and its badges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: &'static str,
    pub border: &'static str,
    pub badge_fill: &'static str,
    pub badge_text: &'static str,
}

/// Stroke of a sequence message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stroke {
    pub color: &'static str,
    pub dasharray: Option<&'static str>,
}

const fn boxed(fill: &'static str, stroke: &'static str, text: &'static str) -> BoxStyle {
    BoxStyle { fill, stroke, text }
}

const fn palette(
    background: &'static str,
    border: &'static str,
    badge_fill: &'static str,
    badge_text: &'static str,
) -> Palette {
    Palette {
        background,
        border,
        badge_fill,
        badge_text,
    }
}

impl NodeVariant {
    /// Style table entry for this variant
    pub fn style(&self) -> BoxStyle {
        match self {
            NodeVariant::Database => boxed("#dbeafe", "#2563eb", "#1e3a8a"),
            NodeVariant::Queue => boxed("#fef3c7", "#d97706", "#78350f"),
            NodeVariant::Connector => boxed("#ede9fe", "#7c3aed", "#4c1d95"),
            NodeVariant::External => boxed("#f3f4f6", "#6b7280", "#1f2937"),
            NodeVariant::Compute => boxed("#dcfce7", "#16a34a", "#14532d"),
            NodeVariant::Storage => boxed("#e0f2fe", "#0284c7", "#0c4a6e"),
            NodeVariant::Monitoring => boxed("#fce7f3", "#db2777", "#831843"),
            NodeVariant::App => boxed("#ffedd5", "#ea580c", "#7c2d12"),
            NodeVariant::Sink => boxed("#ccfbf1", "#0d9488", "#134e4a"),
            NodeVariant::Cluster => boxed("#e0e7ff", "#4f46e5", "#312e81"),
            NodeVariant::Target => boxed("#fee2e2", "#dc2626", "#7f1d1d"),
            NodeVariant::Default => boxed("#ffffff", "#9ca3af", "#111827"),
        }
    }
}

impl ActorVariant {
    /// Style table entry for an actor header
    pub fn style(&self) -> BoxStyle {
        match self {
            ActorVariant::Service => NodeVariant::Compute.style(),
            ActorVariant::Queue => NodeVariant::Queue.style(),
            ActorVariant::Database => NodeVariant::Database.style(),
            ActorVariant::External => NodeVariant::External.style(),
            ActorVariant::Client => NodeVariant::App.style(),
            ActorVariant::Default => NodeVariant::Default.style(),
        }
    }
}

impl ContainerColor {
    /// Palette table entry for this color
    pub fn palette(&self) -> Palette {
        match self {
            ContainerColor::Blue => palette("#eff6ff", "#93c5fd", "#2563eb", "#ffffff"),
            ContainerColor::Green => palette("#f0fdf4", "#86efac", "#16a34a", "#ffffff"),
            ContainerColor::Purple => palette("#faf5ff", "#d8b4fe", "#9333ea", "#ffffff"),
            ContainerColor::Orange => palette("#fff7ed", "#fdba74", "#ea580c", "#ffffff"),
            ContainerColor::Red => palette("#fef2f2", "#fca5a5", "#dc2626", "#ffffff"),
            ContainerColor::Yellow => palette("#fefce8", "#fde047", "#ca8a04", "#1f2937"),
            ContainerColor::Gray => palette("#f9fafb", "#d1d5db", "#4b5563", "#ffffff"),
            ContainerColor::Teal => palette("#f0fdfa", "#5eead4", "#0d9488", "#ffffff"),
        }
    }
}

impl MessageVariant {
    /// Stroke table entry for this message kind
    pub fn stroke(&self) -> Stroke {
        match self {
            MessageVariant::Sync => Stroke {
                color: "#374151",
                dasharray: None,
            },
            MessageVariant::Async => Stroke {
                color: "#7c3aed",
                dasharray: None,
            },
            MessageVariant::Return => Stroke {
                color: "#6b7280",
                dasharray: Some("6 4"),
            },
        }
    }
}

impl Size {
    /// (font size px, horizontal padding px, min width px)
    pub fn metrics(&self) -> (u32, u32, u32) {
        match self {
            Size::Sm => (12, 8, 72),
            Size::Md => (14, 12, 112),
            Size::Lg => (16, 16, 160),
        }
    }
}

/// Build the stylesheet for HTML output from the tables above.
///
/// Tooltips are hidden until their trigger is hovered or holds focus,
/// which gives keyboard users the same access as pointer users.
pub fn stylesheet() -> String {
    let p = CLASS_PREFIX;
    let mut css = String::new();

    let _ = writeln!(
        css,
        ".{p}-scene{{font-family:ui-sans-serif,system-ui,sans-serif;color:#111827}}"
    );
    let _ = writeln!(
        css,
        ".{p}-node{{display:inline-flex;flex-direction:column;align-items:center;justify-content:center;border:1px solid;border-radius:6px;text-align:center;line-height:1.3}}"
    );
    let _ = writeln!(css, ".{p}-node:focus{{outline:2px solid #2563eb;outline-offset:2px}}");
    for size in Size::ALL {
        let (font, pad, min_width) = size.metrics();
        let _ = writeln!(
            css,
            ".{p}-node--{size}{{font-size:{font}px;padding:{pad_y}px {pad}px;min-width:{min_width}px}}",
            pad_y = pad / 2
        );
    }
    for variant in NodeVariant::ALL {
        let s = variant.style();
        let _ = writeln!(
            css,
            ".{p}-node--{variant}{{background:{};border-color:{};color:{}}}",
            s.fill, s.stroke, s.text
        );
    }

    let _ = writeln!(
        css,
        ".{p}-container{{position:relative;border:1px solid;border-radius:10px;padding:28px 16px 16px;margin:8px}}"
    );
    let _ = writeln!(
        css,
        ".{p}-container__badges{{position:absolute;top:-11px;left:12px;display:flex;gap:6px}}"
    );
    let _ = writeln!(
        css,
        ".{p}-badge{{font-size:12px;font-weight:600;padding:2px 8px;border-radius:999px}}"
    );
    let _ = writeln!(
        css,
        ".{p}-badge--recommended{{background:#16a34a;color:#ffffff}}"
    );
    let _ = writeln!(
        css,
        ".{p}-container__description{{font-size:13px;color:#4b5563;margin:0 0 8px}}"
    );
    let _ = writeln!(
        css,
        ".{p}-stack{{display:flex;gap:12px;align-items:center}}"
    );
    let _ = writeln!(css, ".{p}-stack--row{{flex-direction:row}}");
    let _ = writeln!(css, ".{p}-stack--column{{flex-direction:column}}");
    for color in ContainerColor::ALL {
        let pal = color.palette();
        let _ = writeln!(
            css,
            ".{p}-container--{color}{{background:{};border-color:{}}} .{p}-container--{color} > .{p}-container__badges > .{p}-badge--title{{background:{};color:{}}}",
            pal.background, pal.border, pal.badge_fill, pal.badge_text
        );
    }

    let _ = writeln!(
        css,
        ".{p}-arrow{{display:inline-flex;flex-direction:column;align-items:center;font-size:12px;color:#374151}}"
    );

    let _ = writeln!(css, ".{p}-tooltip-anchor{{position:relative;display:inline-block}}");
    let _ = writeln!(
        css,
        ".{p}-tooltip{{visibility:hidden;position:absolute;z-index:10;left:50%;bottom:calc(100% + 6px);transform:translateX(-50%);min-width:160px;max-width:320px;padding:8px 10px;border-radius:6px;background:#111827;color:#f9fafb;font-size:12px;text-align:left}}"
    );
    let _ = writeln!(
        css,
        ".{p}-tooltip-anchor:hover > .{p}-tooltip,.{p}-tooltip-anchor:focus-within > .{p}-tooltip{{visibility:visible}}"
    );
    let _ = writeln!(css, ".{p}-tooltip__heading{{font-weight:600;margin:0 0 4px}}");

    css.push_str(&sequence_stylesheet());

    css
}

/// Rules embedded in every sequence SVG.
///
/// A tooltip group directly follows its trigger, so the sibling selector
/// shows it while the trigger is hovered or focused.
pub fn sequence_stylesheet() -> String {
    let p = CLASS_PREFIX;
    let mut css = String::new();

    let _ = writeln!(
        css,
        ".{p}-sequence-svg{{font-family:ui-sans-serif,system-ui,sans-serif;font-size:13px}}"
    );
    let _ = writeln!(css, ".{p}-seq-tip{{visibility:hidden;pointer-events:none}}");
    let _ = writeln!(
        css,
        ".{p}-seq-trigger:hover + .{p}-seq-tip,.{p}-seq-trigger:focus + .{p}-seq-tip{{visibility:visible}}"
    );
    let _ = writeln!(css, ".{p}-seq-trigger{{cursor:help}}");
    let _ = writeln!(css, ".{p}-seq-trigger:focus{{outline:none}}");
    let _ = write!(
        css,
        ".{p}-seq-trigger:focus > rect,.{p}-seq-trigger:focus > line,.{p}-seq-trigger:focus > path{{stroke-width:2.5}}"
    );

    css
}
