//! Arrow primitive: a directional connector with an optional label
//!
//! Geometry is a pure function of direction and label; rendering draws it
//! as a small inline SVG with the label beside the line.

use anyhow::Result;
use serde::Deserialize;

use super::element::{class, class_list, Component, RenderContext};
use crate::core::markup::fmt_num;
use crate::core::{label_width, ArrowDirection};

const MIN_LENGTH: f64 = 48.0;
const VERTICAL_LENGTH: f64 = 40.0;
const THICKNESS: f64 = 16.0;
const HEAD: f64 = 8.0;
const CHAR_WIDTH: f64 = 7.0;

/// Line and head of a rendered arrow, in its own viewBox
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowGeometry {
    pub width: f64,
    pub height: f64,
    /// Line start
    pub x1: f64,
    pub y1: f64,
    /// Line end, where the head begins
    pub x2: f64,
    pub y2: f64,
    /// Head triangle, tip first
    pub head: [(f64, f64); 3],
}

/// Directional connector
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Arrow {
    #[serde(default)]
    pub direction: ArrowDirection,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub dashed: bool,
    #[serde(default)]
    pub class_name: Option<String>,
}

impl Arrow {
    pub fn new(direction: ArrowDirection) -> Self {
        Self {
            direction,
            label: None,
            dashed: false,
            class_name: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn dashed(mut self) -> Self {
        self.dashed = true;
        self
    }

    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    fn label_text(&self) -> Option<&str> {
        self.label.as_deref().filter(|l| !l.trim().is_empty())
    }

    pub fn geometry(&self) -> ArrowGeometry {
        let mid = THICKNESS / 2.0;
        if self.direction.is_horizontal() {
            let label = self.label_text().map(label_width).unwrap_or(0) as f64;
            let width = MIN_LENGTH.max(label * CHAR_WIDTH + 16.0);
            let (start, tip, back) = match self.direction {
                ArrowDirection::Left => (width, 0.0, HEAD),
                _ => (0.0, width, width - HEAD),
            };
            ArrowGeometry {
                width,
                height: THICKNESS,
                x1: start,
                y1: mid,
                x2: back,
                y2: mid,
                head: [(tip, mid), (back, mid - HEAD / 2.0), (back, mid + HEAD / 2.0)],
            }
        } else {
            let height = VERTICAL_LENGTH;
            let (start, tip, back) = match self.direction {
                ArrowDirection::Up => (height, 0.0, HEAD),
                _ => (0.0, height, height - HEAD),
            };
            ArrowGeometry {
                width: THICKNESS,
                height,
                x1: mid,
                y1: start,
                x2: mid,
                y2: back,
                head: [(mid, tip), (mid - HEAD / 2.0, back), (mid + HEAD / 2.0, back)],
            }
        }
    }

    fn accessible_name(&self) -> String {
        match self.label_text() {
            Some(label) => format!("Arrow {}: {}", self.direction, label),
            None => format!("Arrow {}", self.direction),
        }
    }
}

impl Component for Arrow {
    fn render(&self, cx: &mut RenderContext<'_>) -> Result<()> {
        let g = self.geometry();
        let mut classes = vec![class("arrow"), class(&format!("arrow--{}", self.direction))];
        if self.dashed {
            classes.push(class("arrow--dashed"));
        }

        cx.out.open(
            "div",
            &[
                ("class", class_list(&classes, self.class_name.as_deref())),
                ("role", "img".to_string()),
                ("aria-label", self.accessible_name()),
            ],
        );

        cx.out.open(
            "svg",
            &[
                ("width", fmt_num(g.width)),
                ("height", fmt_num(g.height)),
                ("viewBox", format!("0 0 {} {}", fmt_num(g.width), fmt_num(g.height))),
                ("aria-hidden", "true".to_string()),
                ("focusable", "false".to_string()),
            ],
        );
        let mut line = vec![
            ("x1", fmt_num(g.x1)),
            ("y1", fmt_num(g.y1)),
            ("x2", fmt_num(g.x2)),
            ("y2", fmt_num(g.y2)),
            ("stroke", "currentColor".to_string()),
            ("stroke-width", "1.5".to_string()),
        ];
        if self.dashed {
            line.push(("stroke-dasharray", "6 4".to_string()));
        }
        cx.out.empty("line", &line);
        let points = g
            .head
            .iter()
            .map(|(x, y)| format!("{},{}", fmt_num(*x), fmt_num(*y)))
            .collect::<Vec<_>>()
            .join(" ");
        cx.out
            .empty("polygon", &[("points", points), ("fill", "currentColor".to_string())]);
        cx.out.close("svg");

        if let Some(label) = self.label_text() {
            cx.out
                .element("span", &[("class", class("arrow__label"))], label);
        }
        cx.out.close("div");
        Ok(())
    }
}
