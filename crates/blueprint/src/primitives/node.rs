//! Node primitive: a labeled box styled by semantic variant and size

use anyhow::Result;
use serde::Deserialize;
use tracing::trace;

use super::element::{class, class_list, Component, RenderContext};
use crate::core::{label_lines, NodeVariant, Size};

/// A labeled box representing one entity
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Label text; `\n` or `<br>` start a new line
    pub label: String,
    #[serde(default)]
    pub variant: NodeVariant,
    #[serde(default)]
    pub size: Size,
    /// Positive values make the node keyboard focusable
    #[serde(default)]
    pub tab_index: Option<i32>,
    #[serde(default)]
    pub class_name: Option<String>,
}

impl Node {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            variant: NodeVariant::default(),
            size: Size::default(),
            tab_index: None,
            class_name: None,
        }
    }

    pub fn with_variant(mut self, variant: NodeVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    pub fn with_tab_index(mut self, tab_index: i32) -> Self {
        self.tab_index = Some(tab_index);
        self
    }

    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }
}

impl Component for Node {
    fn render(&self, cx: &mut RenderContext<'_>) -> Result<()> {
        let classes = class_list(
            &[
                class("node"),
                class(&format!("node--{}", self.variant)),
                class(&format!("node--{}", self.size)),
            ],
            self.class_name.as_deref(),
        );

        let mut attrs = vec![("class", classes), ("data-variant", self.variant.to_string())];
        match self.tab_index {
            Some(index) if index != 0 => attrs.push(("tabindex", index.to_string())),
            _ => {}
        }
        if let Some(tip_id) = cx.take_described_by() {
            attrs.push(("aria-describedby", tip_id));
        }

        trace!(variant = %self.variant, size = %self.size, "Rendering node");
        cx.out.open("div", &attrs);
        for line in label_lines(&self.label) {
            cx.out.element("span", &[("class", class("node__line"))], line);
        }
        cx.out.close("div");
        Ok(())
    }

    fn is_focusable(&self) -> bool {
        self.tab_index.is_some_and(|index| index > 0)
    }
}
