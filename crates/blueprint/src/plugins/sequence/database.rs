//! Sequence diagram database implementation
//!
//! Stores actors and messages in input order and enforces referential
//! integrity on insert: every message endpoint must name a declared actor,
//! and actor and message ids are unique.

use anyhow::Result;
use serde::Deserialize;
use tracing::trace;

use crate::core::{ActorVariant, Database, DiagramError, MessageVariant};
use crate::primitives::TooltipContent;

/// A participant in the sequence diagram
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    /// Unique identifier used by messages
    pub id: String,
    /// Display label; the id is shown when empty
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub variant: ActorVariant,
    #[serde(default)]
    pub tooltip: Option<TooltipContent>,
}

impl Actor {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: String::new(),
            variant: ActorVariant::default(),
            tooltip: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_variant(mut self, variant: ActorVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_tooltip(mut self, tooltip: impl Into<TooltipContent>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    /// Text shown in the actor header
    pub fn display_label(&self) -> &str {
        if self.label.is_empty() {
            &self.id
        } else {
            &self.label
        }
    }
}

/// A message between two actors, or from an actor to itself
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Unique identifier within the diagram
    pub id: String,
    /// Source actor id
    pub from: String,
    /// Target actor id
    pub to: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub variant: MessageVariant,
    #[serde(default)]
    pub tooltip: Option<TooltipContent>,
}

impl Message {
    pub fn new(
        id: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            from: from.into(),
            to: to.into(),
            label: label.into(),
            variant: MessageVariant::default(),
            tooltip: None,
        }
    }

    pub fn with_variant(mut self, variant: MessageVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_tooltip(mut self, tooltip: impl Into<TooltipContent>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    /// Returns true when the message starts and ends on the same actor
    pub fn is_self_message(&self) -> bool {
        self.from == self.to
    }
}

/// Sequence diagram database
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SequenceDatabase {
    actors: Vec<Actor>,
    messages: Vec<Message>,
    message_spacing: Option<f64>,
    title: Option<String>,
}

impl SequenceDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a validated database from ordered actors and messages.
    ///
    /// Fails on the first duplicate id or dangling actor reference.
    pub fn from_parts(
        actors: impl IntoIterator<Item = Actor>,
        messages: impl IntoIterator<Item = Message>,
    ) -> Result<Self, DiagramError> {
        let mut db = Self::new();
        for actor in actors {
            db.add_actor(actor)?;
        }
        for message in messages {
            db.add_message(message)?;
        }
        Ok(db)
    }

    /// Append an actor; its position is its insertion index.
    pub fn add_actor(&mut self, actor: Actor) -> Result<(), DiagramError> {
        if self.actor_index(&actor.id).is_some() {
            return Err(DiagramError::duplicate_actor(&actor.id));
        }
        trace!(actor = %actor.id, index = self.actors.len(), "Added actor");
        self.actors.push(actor);
        Ok(())
    }

    /// Append a message; its vertical slot is its insertion index.
    pub fn add_message(&mut self, message: Message) -> Result<(), DiagramError> {
        for endpoint in [&message.from, &message.to] {
            if self.actor_index(endpoint).is_none() {
                return Err(DiagramError::unknown_actor(&message.id, endpoint));
            }
        }
        if self.messages.iter().any(|m| m.id == message.id) {
            return Err(DiagramError::duplicate_message(&message.id));
        }
        trace!(message = %message.id, slot = self.messages.len(), "Added message");
        self.messages.push(message);
        Ok(())
    }

    pub fn set_message_spacing(&mut self, spacing: Option<f64>) {
        self.message_spacing = spacing;
    }

    /// Spacing override declared by the diagram itself
    pub fn message_spacing(&self) -> Option<f64> {
        self.message_spacing
    }

    pub fn set_title(&mut self, title: Option<String>) {
        self.title = title;
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// All actors in left-to-right order
    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    /// All messages in top-to-bottom order
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn actor(&self, id: &str) -> Option<&Actor> {
        self.actors.iter().find(|a| a.id == id)
    }

    /// Horizontal position index of an actor
    pub fn actor_index(&self, id: &str) -> Option<usize> {
        self.actors.iter().position(|a| a.id == id)
    }

    pub fn actor_count(&self) -> usize {
        self.actors.len()
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    pub fn clear_all(&mut self) {
        self.actors.clear();
        self.messages.clear();
        self.message_spacing = None;
        self.title = None;
    }
}

/// Maps Actor to Node and Message to Edge for trait compatibility.
impl Database for SequenceDatabase {
    type Node = Actor;
    type Edge = Message;

    fn add_node(&mut self, node: Self::Node) -> Result<()> {
        Ok(self.add_actor(node)?)
    }

    fn add_edge(&mut self, edge: Self::Edge) -> Result<()> {
        Ok(self.add_message(edge)?)
    }

    fn get_node(&self, id: &str) -> Option<&Self::Node> {
        self.actor(id)
    }

    fn nodes(&self) -> impl Iterator<Item = &Self::Node> {
        self.actors.iter()
    }

    fn edges(&self) -> impl Iterator<Item = &Self::Edge> {
        self.messages.iter()
    }

    fn clear(&mut self) {
        self.clear_all()
    }

    fn node_count(&self) -> usize {
        self.actor_count()
    }

    fn edge_count(&self) -> usize {
        self.message_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_actor_db() -> SequenceDatabase {
        let mut db = SequenceDatabase::new();
        db.add_actor(Actor::new("svc")).unwrap();
        db.add_actor(Actor::new("db")).unwrap();
        db
    }

    #[test]
    fn test_actor_order_preserved() {
        let mut db = SequenceDatabase::new();
        for id in ["charlie", "alice", "bob"] {
            db.add_actor(Actor::new(id)).unwrap();
        }
        let ids: Vec<_> = db.actors().iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["charlie", "alice", "bob"]);
        assert_eq!(db.actor_index("alice"), Some(1));
    }

    #[test]
    fn test_duplicate_actor_rejected() {
        let mut db = two_actor_db();
        let err = db.add_actor(Actor::new("svc")).unwrap_err();
        assert!(matches!(err, DiagramError::DuplicateActor { ref actor_id } if actor_id == "svc"));
        assert_eq!(db.actor_count(), 2);
    }

    #[test]
    fn test_unknown_actor_rejected() {
        let mut db = two_actor_db();
        let err = db
            .add_message(Message::new("1", "svc", "unknown", "query"))
            .unwrap_err();
        match err {
            DiagramError::UnknownActor {
                message_id,
                actor_id,
            } => {
                assert_eq!(message_id, "1");
                assert_eq!(actor_id, "unknown");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(db.message_count(), 0);
    }

    #[test]
    fn test_unknown_source_rejected() {
        let mut db = two_actor_db();
        assert!(db
            .add_message(Message::new("1", "ghost", "db", "query"))
            .is_err());
    }

    #[test]
    fn test_duplicate_message_rejected() {
        let mut db = two_actor_db();
        db.add_message(Message::new("1", "svc", "db", "a")).unwrap();
        let err = db.add_message(Message::new("1", "db", "svc", "b")).unwrap_err();
        assert!(matches!(err, DiagramError::DuplicateMessage { .. }));
    }

    #[test]
    fn test_self_message_accepted() {
        let mut db = two_actor_db();
        db.add_message(Message::new("1", "svc", "svc", "validate"))
            .unwrap();
        assert!(db.messages()[0].is_self_message());
    }

    #[test]
    fn test_display_label_falls_back_to_id() {
        assert_eq!(Actor::new("svc").display_label(), "svc");
        assert_eq!(
            Actor::new("svc").with_label("Order Service").display_label(),
            "Order Service"
        );
    }

    #[test]
    fn test_from_parts() {
        let db = SequenceDatabase::from_parts(
            vec![Actor::new("a"), Actor::new("b")],
            vec![Message::new("1", "a", "b", "hi")],
        )
        .unwrap();
        assert_eq!(db.node_count(), 2);
        assert_eq!(db.edge_count(), 1);
    }
}
