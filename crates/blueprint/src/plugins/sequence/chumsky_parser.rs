//! Sequence notation grammar using chumsky
//!
//! The notation is line oriented. Each non-blank line is one statement,
//! parsed independently so that errors carry an exact line number.

use anyhow::Result;
use chumsky::prelude::*;

use crate::core::chumsky_utils::{
    identifier, inline_whitespace, inline_whitespace_required, line_comment, quoted,
};
use crate::core::{DiagramError, MessageVariant};

/// AST for one line of sequence notation
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Leading `sequence` keyword
    Header,
    Comment,
    Title(String),
    /// `spacing <n>`, kept as text until validated
    Spacing(String),
    Actor(ParsedActor),
    Message(ParsedMessage),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedActor {
    pub id: String,
    pub label: Option<String>,
    pub variant: Option<String>,
    pub tooltip: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedMessage {
    pub from: String,
    pub to: String,
    pub variant: MessageVariant,
    pub label: String,
    pub tooltip: Option<String>,
}

/// Statement with its 1-based source line
#[derive(Debug, Clone, PartialEq)]
pub struct Located {
    pub line: usize,
    pub statement: Statement,
}

/// Chumsky-based sequence notation parser
pub struct ChumskySequenceParser;

impl ChumskySequenceParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a whole document into located statements
    pub fn parse_document(&self, input: &str) -> Result<Vec<Located>> {
        let parser = Self::line_parser();
        let mut statements = Vec::new();

        for (idx, raw) in input.lines().enumerate() {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                continue;
            }

            let statement = parser.parse(trimmed).into_result().map_err(|_| {
                let indent = raw.len() - raw.trim_start().len();
                DiagramError::parse_error(
                    format!("unrecognized statement `{trimmed}`"),
                    idx + 1,
                    indent + 1,
                )
            })?;

            statements.push(Located {
                line: idx + 1,
                statement,
            });
        }

        Ok(statements)
    }

    /// Parse a single trimmed line
    pub fn parse_statement(&self, input: &str) -> Result<Statement> {
        Self::line_parser()
            .parse(input.trim())
            .into_result()
            .map_err(|errors| anyhow::anyhow!("Parse errors: {:?}", errors))
    }

    fn line_parser<'src>() -> impl Parser<'src, &'src str, Statement> {
        Self::statement_parser()
            .then_ignore(inline_whitespace())
            .then_ignore(end())
    }

    fn statement_parser<'src>() -> impl Parser<'src, &'src str, Statement> + Clone {
        let comment = line_comment().to(Statement::Comment);

        let header = text::keyword("sequence")
            .then_ignore(inline_whitespace())
            .then_ignore(end().rewind())
            .to(Statement::Header);

        let title = text::keyword("title")
            .ignore_then(inline_whitespace_required())
            .ignore_then(Self::rest_of_line())
            .map(Statement::Title);

        let number = one_of("0123456789")
            .repeated()
            .at_least(1)
            .then(just('.').then(one_of("0123456789").repeated().at_least(1)).or_not())
            .to_slice()
            .map(|s: &str| s.to_string());

        let spacing = text::keyword("spacing")
            .ignore_then(inline_whitespace_required())
            .ignore_then(number)
            .map(Statement::Spacing);

        comment
            .or(header)
            .or(title)
            .or(spacing)
            .or(Self::actor_parser().map(Statement::Actor))
            .or(Self::message_parser().map(Statement::Message))
    }

    fn actor_parser<'src>() -> impl Parser<'src, &'src str, ParsedActor> + Clone {
        let label = inline_whitespace_required().ignore_then(quoted()).or_not();

        let variant = inline_whitespace_required()
            .ignore_then(identifier())
            .or_not();

        let tooltip = inline_whitespace()
            .ignore_then(just(':'))
            .ignore_then(Self::rest_of_line())
            .or_not();

        text::keyword("actor")
            .ignore_then(inline_whitespace_required())
            .ignore_then(identifier())
            .then(label)
            .then(variant)
            .then(tooltip)
            .map(|(((id, label), variant), tooltip)| ParsedActor {
                id,
                label,
                variant,
                tooltip: tooltip.filter(|t| !t.is_empty()),
            })
    }

    fn message_parser<'src>() -> impl Parser<'src, &'src str, ParsedMessage> + Clone {
        let arrow = just("-->>")
            .to(MessageVariant::Return)
            .or(just("->>").to(MessageVariant::Sync))
            .or(just("-)").to(MessageVariant::Async));

        let label = none_of('|')
            .repeated()
            .collect::<String>()
            .map(|s| s.trim().to_string());

        let tooltip = just('|')
            .ignore_then(Self::rest_of_line())
            .or_not();

        let body = inline_whitespace()
            .ignore_then(just(':'))
            .ignore_then(label)
            .then(tooltip)
            .or_not();

        identifier()
            .then_ignore(inline_whitespace())
            .then(arrow)
            .then_ignore(inline_whitespace())
            .then(identifier())
            .then(body)
            .map(|(((from, variant), to), body)| {
                let (label, tooltip) = body.unwrap_or_default();
                ParsedMessage {
                    from,
                    to,
                    variant,
                    label,
                    tooltip: tooltip.filter(|t| !t.is_empty()),
                }
            })
    }

    fn rest_of_line<'src>() -> impl Parser<'src, &'src str, String> + Clone {
        any()
            .repeated()
            .collect::<String>()
            .map(|s| s.trim().to_string())
    }
}

impl Default for ChumskySequenceParser {
    fn default() -> Self {
        Self::new()
    }
}
