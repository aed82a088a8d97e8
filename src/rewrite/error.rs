//! Error types for the schema rewriter

use thiserror::Error;

use super::color::ColorError;

/// Errors that can occur while rewriting a component tree
#[derive(Debug, Error)]
pub enum RewriteError {
    /// A `&H` color whose digits do not decode (strict mode only)
    #[error("malformed color in property '{property}' of {path}: {source}")]
    MalformedColor {
        path: String,
        property: String,
        #[source]
        source: ColorError,
    },

    /// `$Components` is not a list of mappings (strict mode only)
    #[error("invalid children of {path}: {reason}")]
    InvalidChildren { path: String, reason: String },

    /// The input to rewrite is not a mapping
    #[error("expected a component mapping, found {found}")]
    NotANode { found: &'static str },

    /// Nesting deeper than the configured limit
    #[error("component tree deeper than {max_depth} levels at {path}")]
    DepthExceeded { max_depth: usize, path: String },
}
