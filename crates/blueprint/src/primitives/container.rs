//! Container primitive: a titled, color-themed grouping frame
//!
//! Children are stacked in the arrangement the caller chose. Containers
//! nest without a depth limit.

use anyhow::Result;
use serde::Deserialize;
use tracing::trace;

use super::element::{class, class_list, Component, Element, RenderContext};
use crate::core::{Arrangement, ContainerColor, DiagramError};

/// Grouping region expressing an architectural boundary
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub color: ContainerColor,
    /// Adds a secondary "Recommended" badge
    #[serde(default)]
    pub recommended: bool,
    #[serde(default)]
    pub layout: Arrangement,
    #[serde(default)]
    pub class_name: Option<String>,
    #[serde(default)]
    pub children: Vec<Element>,
}

impl Container {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            color: ContainerColor::default(),
            recommended: false,
            layout: Arrangement::default(),
            class_name: None,
            children: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_color(mut self, color: ContainerColor) -> Self {
        self.color = color;
        self
    }

    pub fn recommended(mut self) -> Self {
        self.recommended = true;
        self
    }

    pub fn with_layout(mut self, layout: Arrangement) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn with_child(mut self, child: impl Into<Element>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Nesting depth of the deepest container below and including this one
    pub fn depth(&self) -> usize {
        1 + self
            .children
            .iter()
            .filter_map(|child| match child {
                Element::Container(c) => Some(c.depth()),
                Element::Tooltip(t) => match t.child.as_ref() {
                    Element::Container(c) => Some(c.depth()),
                    _ => None,
                },
                _ => None,
            })
            .max()
            .unwrap_or(0)
    }
}

impl Component for Container {
    fn render(&self, cx: &mut RenderContext<'_>) -> Result<()> {
        trace!(title = %self.title, color = %self.color, children = self.children.len(), "Rendering container");

        let classes = class_list(
            &[class("container"), class(&format!("container--{}", self.color))],
            self.class_name.as_deref(),
        );
        cx.out.open(
            "section",
            &[
                ("class", classes),
                ("aria-label", self.title.clone()),
                ("data-color", self.color.to_string()),
            ],
        );

        cx.out.open("div", &[("class", class("container__badges"))]);
        cx.out.element(
            "span",
            &[("class", format!("{} {}", class("badge"), class("badge--title")))],
            &self.title,
        );
        if self.recommended {
            cx.out.element(
                "span",
                &[("class", format!("{} {}", class("badge"), class("badge--recommended")))],
                "Recommended",
            );
        }
        cx.out.close("div");

        if let Some(description) = self.description.as_deref().filter(|d| !d.is_empty()) {
            cx.out
                .element("p", &[("class", class("container__description"))], description);
        }

        cx.out.open(
            "div",
            &[(
                "class",
                format!("{} {}", class("stack"), class(&format!("stack--{}", self.layout))),
            )],
        );
        for child in &self.children {
            child.render(cx)?;
        }
        cx.out.close("div");
        cx.out.close("section");
        Ok(())
    }

    fn validate(&self) -> Result<(), DiagramError> {
        self.children.iter().try_for_each(|child| child.validate())
    }
}
