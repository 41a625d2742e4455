//! Tooltip primitive
//!
//! A tooltip wraps exactly one element and reveals its content on pointer
//! hover or keyboard focus. When the wrapped element can take focus itself
//! the description is attached to it; otherwise the wrapper becomes the
//! focus target.

use anyhow::Result;
use serde::Deserialize;

use super::element::{class, Component, Element, RenderContext};
use crate::core::DiagramError;

/// Rich tooltip body
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredContent {
    #[serde(default)]
    pub heading: Option<String>,
    #[serde(default)]
    pub paragraphs: Vec<String>,
    /// Bullet list shown after the paragraphs
    #[serde(default)]
    pub items: Vec<String>,
}

impl StructuredContent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_heading(mut self, heading: impl Into<String>) -> Self {
        self.heading = Some(heading.into());
        self
    }

    pub fn with_paragraph(mut self, paragraph: impl Into<String>) -> Self {
        self.paragraphs.push(paragraph.into());
        self
    }

    pub fn with_item(mut self, item: impl Into<String>) -> Self {
        self.items.push(item.into());
        self
    }
}

/// Tooltip content: plain text or a structured body
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TooltipContent {
    Text(String),
    Structured(StructuredContent),
}

impl TooltipContent {
    pub fn heading(&self) -> Option<&str> {
        match self {
            TooltipContent::Text(_) => None,
            TooltipContent::Structured(s) => s.heading.as_deref(),
        }
    }

    /// Content flattened to display lines; list items get a bullet
    pub fn lines(&self) -> Vec<String> {
        match self {
            TooltipContent::Text(text) => text.lines().map(str::to_string).collect(),
            TooltipContent::Structured(s) => s
                .heading
                .iter()
                .chain(&s.paragraphs)
                .cloned()
                .chain(s.items.iter().map(|item| format!("• {item}")))
                .collect(),
        }
    }

    /// Content as a single line for accessible names
    pub fn plain_text(&self) -> String {
        self.lines().join(" ")
    }

    pub fn is_empty(&self) -> bool {
        self.lines().iter().all(|l| l.trim().is_empty())
    }

    pub(crate) fn render(&self, cx: &mut RenderContext<'_>) {
        match self {
            TooltipContent::Text(text) => {
                cx.out
                    .element("span", &[("class", class("tooltip__text"))], text);
            }
            TooltipContent::Structured(s) => {
                if let Some(heading) = &s.heading {
                    cx.out
                        .element("p", &[("class", class("tooltip__heading"))], heading);
                }
                for paragraph in &s.paragraphs {
                    cx.out.element("p", &[], paragraph);
                }
                if !s.items.is_empty() {
                    cx.out.open("ul", &[]);
                    for item in &s.items {
                        cx.out.element("li", &[], item);
                    }
                    cx.out.close("ul");
                }
            }
        }
    }
}

impl From<&str> for TooltipContent {
    fn from(text: &str) -> Self {
        TooltipContent::Text(text.to_string())
    }
}

impl From<String> for TooltipContent {
    fn from(text: String) -> Self {
        TooltipContent::Text(text)
    }
}

impl From<StructuredContent> for TooltipContent {
    fn from(content: StructuredContent) -> Self {
        TooltipContent::Structured(content)
    }
}

/// Interaction that can change tooltip visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TooltipEvent {
    PointerEnter,
    PointerLeave,
    Focus,
    Blur,
    Escape,
}

/// Transient visibility of one mounted tooltip.
///
/// Visible while the trigger is hovered or focused. `Escape` hides it until
/// the next enter or focus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TooltipState {
    hovered: bool,
    focused: bool,
    dismissed: bool,
}

impl TooltipState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next state after `event`
    pub fn apply(self, event: TooltipEvent) -> Self {
        let mut next = self;
        match event {
            TooltipEvent::PointerEnter => {
                next.hovered = true;
                next.dismissed = false;
            }
            TooltipEvent::PointerLeave => next.hovered = false,
            TooltipEvent::Focus => {
                next.focused = true;
                next.dismissed = false;
            }
            TooltipEvent::Blur => next.focused = false,
            TooltipEvent::Escape => next.dismissed = true,
        }
        if !next.hovered && !next.focused {
            next.dismissed = false;
        }
        next
    }

    pub fn handle(&mut self, event: TooltipEvent) {
        *self = self.apply(event);
    }

    pub fn is_visible(&self) -> bool {
        (self.hovered || self.focused) && !self.dismissed
    }
}

/// Tooltip wrapping a single element
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tooltip {
    pub content: TooltipContent,
    pub child: Box<Element>,
}

impl Tooltip {
    pub fn new(content: impl Into<TooltipContent>, child: impl Into<Element>) -> Self {
        Self {
            content: content.into(),
            child: Box::new(child.into()),
        }
    }
}

impl Component for Tooltip {
    fn render(&self, cx: &mut RenderContext<'_>) -> Result<()> {
        let tip_id = cx.next_id("tip");
        let anchor = class("tooltip-anchor");

        if self.child.is_focusable() {
            cx.out.open("div", &[("class", anchor)]);
            cx.describe_next(tip_id.clone());
        } else {
            cx.out.open(
                "div",
                &[
                    ("class", anchor),
                    ("tabindex", "0".to_string()),
                    ("aria-describedby", tip_id.clone()),
                ],
            );
        }
        self.child.render(cx)?;
        // A child that did not claim the description must not leak it
        cx.take_described_by();

        cx.out.open(
            "div",
            &[
                ("id", tip_id),
                ("class", class("tooltip")),
                ("role", "tooltip".to_string()),
            ],
        );
        self.content.render(cx);
        cx.out.close("div");
        cx.out.close("div");
        Ok(())
    }

    fn validate(&self) -> Result<(), DiagramError> {
        self.child.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use TooltipEvent::*;

    #[test]
    fn test_hover_shows_and_leave_hides() {
        let state = TooltipState::new().apply(PointerEnter);
        assert!(state.is_visible());
        assert!(!state.apply(PointerLeave).is_visible());
    }

    #[test]
    fn test_focus_shows_and_blur_hides() {
        let state = TooltipState::new().apply(Focus);
        assert!(state.is_visible());
        assert!(!state.apply(Blur).is_visible());
    }

    #[test]
    fn test_stays_visible_while_either_trigger_holds() {
        let state = TooltipState::new().apply(Focus).apply(PointerEnter).apply(Blur);
        assert!(state.is_visible());
    }

    #[test]
    fn test_escape_dismisses_until_next_trigger() {
        let mut state = TooltipState::new();
        state.handle(Focus);
        state.handle(Escape);
        assert!(!state.is_visible());
        state.handle(PointerEnter);
        assert!(state.is_visible());
    }

    #[test]
    fn test_escape_resets_once_interaction_ends() {
        let state = TooltipState::new().apply(Focus).apply(Escape).apply(Blur);
        assert_eq!(state, TooltipState::new());
    }

    #[test]
    fn test_content_from_json_string_or_object() {
        let text: TooltipContent = serde_json::from_str(r#""Stores orders""#).unwrap();
        assert_eq!(text, TooltipContent::from("Stores orders"));

        let structured: TooltipContent = serde_json::from_str(
            r#"{"heading": "Kafka", "paragraphs": ["Durable log"], "items": ["ordered", "replayable"]}"#,
        )
        .unwrap();
        assert_eq!(structured.heading(), Some("Kafka"));
        assert_eq!(
            structured.lines(),
            vec!["Kafka", "Durable log", "• ordered", "• replayable"]
        );
    }

    #[test]
    fn test_plain_text() {
        let content: TooltipContent = StructuredContent::new()
            .with_heading("Cache")
            .with_paragraph("Read-through")
            .into();
        assert_eq!(content.plain_text(), "Cache Read-through");
        assert!(TooltipContent::from("  ").is_empty());
    }
}
