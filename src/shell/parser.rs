use chumsky::{prelude::*, text::ascii::ident};

/// Argument following a command word
#[derive(Debug, Clone, PartialEq)]
pub enum Arg<'a> {
    /// Parsed value plus the token exactly as typed
    Integer(i64, &'a str),
    Text(&'a str),
}

impl<'a> Arg<'a> {
    /// The argument's source text (without surrounding quotes)
    pub fn text(&self) -> &'a str {
        match self {
            Arg::Integer(_, raw) => raw,
            Arg::Text(text) => text,
        }
    }
}

/// Parse `command arg arg ...`
///
/// Arguments are whitespace separated; a double-quoted argument may contain
/// spaces. Any bare token (no quotes or whitespace) that reads as an `i64`
/// becomes [`Arg::Integer`].
pub fn parser<'a>() -> impl Parser<'a, &'a str, (&'a str, Vec<Arg<'a>>), extra::Err<Rich<'a, char>>>
{
    let quoted = just('"')
        .ignore_then(none_of("\"").repeated().to_slice())
        .then_ignore(just('"'))
        .map(Arg::Text);

    let bare = any()
        .filter(|c: &char| !c.is_whitespace() && *c != '"')
        .repeated()
        .at_least(1)
        .to_slice()
        .map(|s: &str| s.parse::<i64>().map_or(Arg::Text(s), |n| Arg::Integer(n, s)));

    let arg = choice((quoted, bare)).padded();

    ident()
        .padded()
        .then(arg.repeated().collect::<Vec<_>>())
        .then_ignore(end())
}
