//! Literal type inference for designer property values
//!
//! Designer properties are stored as text. A value such as `"42"`, `"True"` or
//! `"[1, 2]"` is turned into the matching JSON value by an explicit ordered
//! parse: keyword constants, numbers, quoted strings, then collections. Any
//! text that does not parse as a complete literal is left as a string.

mod grammar;
pub mod lexer;

use serde_json::{Map, Number, Value};
use thiserror::Error;

pub use grammar::{parse, MAX_NESTING};
pub use lexer::Span;

/// Errors produced while parsing or converting a literal
///
/// None of these are fatal to a conversion: they only mean the value stays text.
#[derive(Debug, Error, PartialEq)]
pub enum LiteralError {
    #[error("unrecognized input at {span:?}")]
    Lex { span: Span },

    #[error("not a literal at {span:?}: {message}")]
    Syntax { span: Span, message: String },

    #[error("unhashable {kind} used as a dict key or set member")]
    Unhashable { kind: &'static str },

    #[error("tuple cannot be used as a JSON object key")]
    TupleKey,

    #[error("float {0} has no JSON representation")]
    NonFinite(f64),

    #[error("nesting deeper than {max_depth} levels at {span:?}")]
    TooDeep { span: Span, max_depth: usize },
}

/// A parsed literal value
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Literal>),
    Tuple(Vec<Literal>),
    Set(Vec<Literal>),
    Dict(Vec<(Literal, Literal)>),
}

impl Literal {
    fn kind(&self) -> &'static str {
        match self {
            Literal::None => "None",
            Literal::Bool(_) => "bool",
            Literal::Int(_) => "int",
            Literal::Float(_) => "float",
            Literal::Str(_) => "str",
            Literal::List(_) => "list",
            Literal::Tuple(_) => "tuple",
            Literal::Set(_) => "set",
            Literal::Dict(_) => "dict",
        }
    }

    fn is_hashable(&self) -> bool {
        match self {
            Literal::List(_) | Literal::Set(_) | Literal::Dict(_) => false,
            Literal::Tuple(items) => items.iter().all(Literal::is_hashable),
            _ => true,
        }
    }

    /// Convert into a JSON value
    ///
    /// Tuples and sets become arrays (sets keep first-seen order without
    /// duplicates). Dict keys are rendered the way a JSON encoder renders
    /// scalar keys.
    pub fn into_json(self) -> Result<Value, LiteralError> {
        match self {
            Literal::None => Ok(Value::Null),
            Literal::Bool(b) => Ok(Value::Bool(b)),
            Literal::Int(n) => Ok(Value::from(n)),
            Literal::Float(f) => Number::from_f64(f)
                .map(Value::Number)
                .ok_or(LiteralError::NonFinite(f)),
            Literal::Str(s) => Ok(Value::String(s)),
            Literal::List(items) | Literal::Tuple(items) => items
                .into_iter()
                .map(Literal::into_json)
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            Literal::Set(items) => {
                let mut unique: Vec<Literal> = Vec::with_capacity(items.len());
                for item in items {
                    if !item.is_hashable() {
                        return Err(LiteralError::Unhashable { kind: item.kind() });
                    }
                    if !unique.contains(&item) {
                        unique.push(item);
                    }
                }
                Literal::List(unique).into_json()
            }
            Literal::Dict(entries) => {
                let mut map = Map::with_capacity(entries.len());
                for (key, value) in entries {
                    let key = key.into_key()?;
                    // A repeated key keeps its first position and takes the last value
                    map.insert(key, value.into_json()?);
                }
                Ok(Value::Object(map))
            }
        }
    }

    fn into_key(self) -> Result<String, LiteralError> {
        match self {
            Literal::Str(s) => Ok(s),
            Literal::Int(n) => Ok(n.to_string()),
            Literal::Float(f) if f.is_finite() => Ok(format!("{:?}", f)),
            Literal::Float(f) => Err(LiteralError::NonFinite(f)),
            Literal::Bool(b) => Ok(b.to_string()),
            Literal::None => Ok("null".to_string()),
            Literal::Tuple(items) if items.iter().all(Literal::is_hashable) => {
                Err(LiteralError::TupleKey)
            }
            other => Err(LiteralError::Unhashable { kind: other.kind() }),
        }
    }
}

/// Infer the typed JSON value of a text property
///
/// Returns `None` when the text is not a literal; callers keep the text as is.
pub fn infer(text: &str) -> Option<Value> {
    parse(text).and_then(Literal::into_json).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_infer_scalars() {
        assert_eq!(infer("42"), Some(json!(42)));
        assert_eq!(infer("-7"), Some(json!(-7)));
        assert_eq!(infer("1.25"), Some(json!(1.25)));
        assert_eq!(infer("True"), Some(json!(true)));
        assert_eq!(infer("False"), Some(json!(false)));
        assert_eq!(infer("None"), Some(Value::Null));
        assert_eq!(infer("0x10"), Some(json!(16)));
    }

    #[test]
    fn test_infer_leading_whitespace() {
        assert_eq!(infer("  12"), Some(json!(12)));
    }

    #[test]
    fn test_infer_free_text_is_none() {
        assert_eq!(infer("Hello"), None);
        assert_eq!(infer("true"), None);
        assert_eq!(infer("Hello {name}"), None);
        assert_eq!(infer("{name}"), None);
        assert_eq!(infer("12px"), None);
        assert_eq!(infer(""), None);
    }

    #[test]
    fn test_infer_collections() {
        assert_eq!(infer("[1, 'a', None]"), Some(json!([1, "a", null])));
        assert_eq!(infer("(1, 2)"), Some(json!([1, 2])));
        assert_eq!(infer("{1, 2, 1}"), Some(json!([1, 2])));
        assert_eq!(
            infer("{'a': [1, 2], 3: True, None: 0}"),
            Some(json!({"a": [1, 2], "3": true, "null": 0}))
        );
        assert_eq!(infer("{}"), Some(json!({})));
    }

    #[test]
    fn test_dict_repeated_key_keeps_last_value() {
        assert_eq!(infer("{'a': 1, 'a': 2}"), Some(json!({"a": 2})));
    }

    #[test]
    fn test_unhashable_members_are_rejected() {
        assert_eq!(infer("{[1]: 2}"), None);
        assert_eq!(infer("{[1], 2}"), None);
        assert_eq!(infer("{(1, 2): 3}"), None);
    }

    #[test]
    fn test_non_finite_float_is_rejected() {
        assert_eq!(infer("1e999"), None);
    }

    #[test]
    fn test_into_json_error_kinds() {
        let set = Literal::Set(vec![Literal::List(vec![])]);
        assert_eq!(
            set.into_json(),
            Err(LiteralError::Unhashable { kind: "list" })
        );
    }

    #[test]
    fn test_deeply_nested_text_stays_text() {
        assert_eq!(infer(&"[".repeat(10_000)), None);
        let balanced = format!("{}{}", "[".repeat(500), "]".repeat(500));
        assert_eq!(infer(&balanced), None);
        let mixed = "{'a': (".repeat(200);
        assert_eq!(infer(&mixed), None);
    }
}
