//! Lexer for literal property values using logos

use logos::Logos;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r\x0C]+")]
pub enum Token {
    // Keyword constants
    #[token("True")]
    True,
    #[token("False")]
    False,
    #[token("None")]
    None,

    // Delimiters
    #[token("[")]
    BracketOpen,
    #[token("]")]
    BracketClose,
    #[token("(")]
    ParenOpen,
    #[token(")")]
    ParenClose,
    #[token("{")]
    BraceOpen,
    #[token("}")]
    BraceClose,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,

    // Signs (only valid directly before a number)
    #[token("-")]
    Minus,
    #[token("+")]
    Plus,

    // Integers. A callback returning None (overflow) turns the slice into a lex error.
    #[regex(r"0[xX][0-9a-fA-F]+", |lex| i64::from_str_radix(&lex.slice()[2..], 16).ok())]
    #[regex(r"0[oO][0-7]+", |lex| i64::from_str_radix(&lex.slice()[2..], 8).ok())]
    #[regex(r"0[bB][01]+", |lex| i64::from_str_radix(&lex.slice()[2..], 2).ok())]
    #[regex(r"[1-9][0-9]*|0+", |lex| lex.slice().parse::<i64>().ok())]
    Int(i64),

    #[regex(
        r"([0-9]+\.[0-9]*|\.[0-9]+)([eE][+-]?[0-9]+)?|[0-9]+[eE][+-]?[0-9]+",
        |lex| lex.slice().parse::<f64>().ok()
    )]
    Float(f64),

    #[regex(r#""([^"\\\n]|\\.)*""#, |lex| unescape(lex.slice()))]
    #[regex(r"'([^'\\\n]|\\.)*'", |lex| unescape(lex.slice()))]
    Str(String),
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::True => write!(f, "True"),
            Token::False => write!(f, "False"),
            Token::None => write!(f, "None"),
            Token::BracketOpen => write!(f, "'['"),
            Token::BracketClose => write!(f, "']'"),
            Token::ParenOpen => write!(f, "'('"),
            Token::ParenClose => write!(f, "')'"),
            Token::BraceOpen => write!(f, "'{{'"),
            Token::BraceClose => write!(f, "'}}'"),
            Token::Comma => write!(f, "','"),
            Token::Colon => write!(f, "':'"),
            Token::Minus => write!(f, "'-'"),
            Token::Plus => write!(f, "'+'"),
            Token::Int(n) => write!(f, "integer {}", n),
            Token::Float(x) => write!(f, "float {}", x),
            Token::Str(s) => write!(f, "string {:?}", s),
        }
    }
}

/// Strip the quotes from a string literal and resolve its escapes.
///
/// Unknown escapes keep their backslash.
fn unescape(quoted: &str) -> String {
    let inner = &quoted[1..quoted.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some('\\') => out.push('\\'),
            Some('\'') => out.push('\''),
            Some('"') => out.push('"'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Lex input string into tokens with spans
///
/// Unlike a source-file lexer, a single unrecognized character means the
/// whole value is not a literal, so the first error span is returned.
pub fn lex(input: &str) -> Result<Vec<(Token, Span)>, Span> {
    Token::lexer(input)
        .spanned()
        .map(|(tok, span)| match tok {
            Ok(t) => Ok((t, span)),
            Err(()) => Err(span),
        })
        .collect()
}
