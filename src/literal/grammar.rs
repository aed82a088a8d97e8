//! Literal grammar using chumsky

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use super::lexer::{self, Span, Token};
use super::{Literal, LiteralError};

/// Deepest bracket nesting the grammar is allowed to recurse into
pub const MAX_NESTING: usize = 32;

/// Parse a property value into a literal
pub fn parse(input: &str) -> Result<Literal, LiteralError> {
    let len = input.len();

    let tokens = lexer::lex(input).map_err(|span| LiteralError::Lex { span })?;
    check_nesting(&tokens)?;
    let token_iter = tokens.into_iter().map(|(tok, span)| (tok, span.into()));

    // Turn the token iterator into a stream that chumsky can use
    let token_stream =
        Stream::from_iter(token_iter).map((len..len).into(), |(t, s): (_, _)| (t, s));

    literal_parser()
        .parse(token_stream)
        .into_result()
        .map_err(|errs| {
            let first = errs.into_iter().next();
            match first {
                Some(err) => LiteralError::Syntax {
                    span: err.span().into_range(),
                    message: err.to_string(),
                },
                None => LiteralError::Syntax {
                    span: len..len,
                    message: "not a literal".to_string(),
                },
            }
        })
}

/// Reject token streams nested deeper than [`MAX_NESTING`] before the
/// recursive parser sees them
fn check_nesting(tokens: &[(Token, Span)]) -> Result<(), LiteralError> {
    let mut depth = 0usize;
    for (token, span) in tokens {
        match token {
            Token::BracketOpen | Token::ParenOpen | Token::BraceOpen => {
                depth += 1;
                if depth > MAX_NESTING {
                    return Err(LiteralError::TooDeep {
                        span: span.clone(),
                        max_depth: MAX_NESTING,
                    });
                }
            }
            Token::BracketClose | Token::ParenClose | Token::BraceClose => {
                depth = depth.saturating_sub(1);
            }
            _ => {}
        }
    }
    Ok(())
}

fn literal_parser<'a, I>() -> impl Parser<'a, I, Literal, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    let value = recursive(|value| {
        let constant = select! {
            Token::True => Literal::Bool(true),
            Token::False => Literal::Bool(false),
            Token::None => Literal::None,
            Token::Str(s) => Literal::Str(s),
        };

        let number = select! {
            Token::Int(n) => Literal::Int(n),
            Token::Float(f) => Literal::Float(f),
        };

        // A single sign is allowed in front of a number, never in front of a
        // keyword or collection
        let signed_number = choice((just(Token::Minus).to(true), just(Token::Plus).to(false)))
            .or_not()
            .then(number)
            .try_map(|(negate, number), span| match (negate, number) {
                (Some(true), Literal::Int(n)) => n
                    .checked_neg()
                    .map(Literal::Int)
                    .ok_or_else(|| Rich::custom(span, "integer out of range")),
                (Some(true), Literal::Float(f)) => Ok(Literal::Float(-f)),
                (_, number) => Ok(number),
            });

        let items = value
            .clone()
            .separated_by(just(Token::Comma))
            .allow_trailing()
            .collect::<Vec<_>>();

        let list = items
            .clone()
            .delimited_by(just(Token::BracketOpen), just(Token::BracketClose))
            .map(Literal::List);

        // `(x)` is just a parenthesized value, `(x,)` and `(x, y)` are tuples
        let parenthesized = value
            .clone()
            .then(just(Token::Comma).ignore_then(items.clone()).or_not())
            .map(|(first, rest)| match rest {
                None => first,
                Some(rest) => {
                    let mut elements = Vec::with_capacity(rest.len() + 1);
                    elements.push(first);
                    elements.extend(rest);
                    Literal::Tuple(elements)
                }
            })
            .or_not()
            .map(|inner| inner.unwrap_or(Literal::Tuple(Vec::new())))
            .delimited_by(just(Token::ParenOpen), just(Token::ParenClose));

        let entry = value
            .clone()
            .then_ignore(just(Token::Colon))
            .then(value.clone());

        let dict = entry
            .separated_by(just(Token::Comma))
            .at_least(1)
            .allow_trailing()
            .collect::<Vec<_>>()
            .map(Literal::Dict);

        let set = value
            .clone()
            .separated_by(just(Token::Comma))
            .at_least(1)
            .allow_trailing()
            .collect::<Vec<_>>()
            .map(Literal::Set);

        // `{}` is an empty dict, not an empty set
        let braced = choice((dict, set))
            .or_not()
            .map(|inner| inner.unwrap_or(Literal::Dict(Vec::new())))
            .delimited_by(just(Token::BraceOpen), just(Token::BraceClose));

        choice((constant, signed_number, list, parenthesized, braced)).boxed()
    });

    value.then_ignore(end())
}
