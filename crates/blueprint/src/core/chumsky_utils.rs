//! Shared chumsky parser utilities for the text notations

use chumsky::prelude::*;

/// Parse inline whitespace only (spaces and tabs, no newlines).
pub fn inline_whitespace<'src>() -> impl Parser<'src, &'src str, ()> + Clone {
    one_of(" \t").repeated().ignored()
}

/// Parse at least one space or tab.
pub fn inline_whitespace_required<'src>() -> impl Parser<'src, &'src str, ()> + Clone {
    one_of(" \t").repeated().at_least(1).ignored()
}

/// Parse a `%%` comment running to end of line.
pub fn line_comment<'src>() -> impl Parser<'src, &'src str, ()> + Clone {
    just("%%").ignore_then(none_of('\n').repeated()).ignored()
}

/// Parse an identifier: letters, digits, `_`, `-` and `.`, not starting
/// with `-` so that arrows are never swallowed.
pub fn identifier<'src>() -> impl Parser<'src, &'src str, String> + Clone {
    any()
        .filter(|c: &char| c.is_alphanumeric() || *c == '_')
        .then(
            any()
                .filter(|c: &char| c.is_alphanumeric() || matches!(c, '_' | '.'))
                .or(just('-').then_ignore(none_of("->)").rewind()))
                .repeated()
                .collect::<String>(),
        )
        .map(|(first, rest)| {
            let mut id = String::with_capacity(rest.len() + 1);
            id.push(first);
            id.push_str(&rest);
            id
        })
}

/// Parse a double-quoted string without escapes.
pub fn quoted<'src>() -> impl Parser<'src, &'src str, String> + Clone {
    none_of('"')
        .repeated()
        .collect::<String>()
        .delimited_by(just('"'), just('"'))
}
