//! Sequence notation parser
//!
//! Turns located statements from the chumsky grammar into a validated
//! [`SequenceDatabase`]. Actors must be declared before a message uses
//! them; nothing is created implicitly.

use anyhow::{Context, Result};
use tracing::{debug, span, Level};

use super::chumsky_parser::{ChumskySequenceParser, Statement};
use super::database::{Actor, Message, SequenceDatabase};
use crate::core::{ActorVariant, DiagramError, Parser};

/// Sequence notation parser
pub struct SequenceParser {
    grammar: ChumskySequenceParser,
}

impl SequenceParser {
    pub fn new() -> Self {
        Self {
            grammar: ChumskySequenceParser::new(),
        }
    }

    /// Parse notation into a fresh database
    pub fn parse_to_database(&self, input: &str) -> Result<SequenceDatabase> {
        let mut database = SequenceDatabase::new();
        self.parse(input, &mut database)?;
        Ok(database)
    }
}

impl Default for SequenceParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser<SequenceDatabase> for SequenceParser {
    fn parse(&self, input: &str, database: &mut SequenceDatabase) -> Result<()> {
        let parse_span = span!(Level::INFO, "parse_sequence", input_len = input.len());
        let _enter = parse_span.enter();

        let statements = self.grammar.parse_document(input)?;
        let mut seen_statement = false;

        for located in statements {
            let line = located.line;
            match located.statement {
                Statement::Comment => continue,
                Statement::Header => {
                    if seen_statement {
                        return Err(DiagramError::parse_error(
                            "`sequence` must be the first statement".to_string(),
                            line,
                            1,
                        )
                        .into());
                    }
                }
                Statement::Title(title) => database.set_title(Some(title)),
                Statement::Spacing(raw) => {
                    let spacing: f64 = raw.parse().map_err(|_| {
                        DiagramError::parse_error(format!("invalid spacing `{raw}`"), line, 1)
                    })?;
                    if !spacing.is_finite() || spacing <= 0.0 {
                        return Err(DiagramError::layout_error(format!(
                            "message spacing must be a positive number, got {raw}"
                        )))
                        .with_context(|| format!("line {line}"));
                    }
                    database.set_message_spacing(Some(spacing));
                }
                Statement::Actor(parsed) => {
                    let mut actor = Actor::new(parsed.id);
                    if let Some(label) = parsed.label {
                        actor = actor.with_label(label);
                    }
                    if let Some(variant) = parsed.variant {
                        actor = actor.with_variant(ActorVariant::parse_lenient(&variant));
                    }
                    if let Some(tooltip) = parsed.tooltip {
                        actor = actor.with_tooltip(tooltip);
                    }
                    database
                        .add_actor(actor)
                        .with_context(|| format!("line {line}"))?;
                }
                Statement::Message(parsed) => {
                    let id = format!("m{}", database.message_count() + 1);
                    let mut message = Message::new(id, parsed.from, parsed.to, parsed.label)
                        .with_variant(parsed.variant);
                    if let Some(tooltip) = parsed.tooltip {
                        message = message.with_tooltip(tooltip);
                    }
                    database
                        .add_message(message)
                        .with_context(|| format!("line {line}"))?;
                }
            }
            seen_statement = true;
        }

        debug!(
            actors = database.actor_count(),
            messages = database.message_count(),
            "Parsed sequence notation"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "sequence"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }

    fn can_parse(&self, input: &str) -> bool {
        self.grammar.parse_document(input).is_ok()
    }
}
