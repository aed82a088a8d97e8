//! Schema rewriter
//!
//! Turns a designer component tree (`$Name`, `$Type`, `$Components`, plus
//! arbitrary text properties) into template nodes (`id`, `type`,
//! `properties`, `components`). Along the way property values get their
//! types back, `&H` colors become signed ARGB integers, and every `{name}`
//! placeholder is collected into a [`ParameterSet`].
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use template_creator::{rewrite, ExtensionMap, ParameterSet};
//!
//! let raw = json!({
//!     "$Name": "Label1",
//!     "$Type": "Label",
//!     "Uuid": "-1234",
//!     "Text": "Hi {user}",
//!     "FontSize": "14.5"
//! });
//! let mut params = ParameterSet::new();
//! let node = rewrite(&raw, &ExtensionMap::new(), &mut params).unwrap();
//!
//! assert_eq!(node.id.as_deref(), Some("Label1"));
//! assert_eq!(node.property("FontSize"), Some(&json!(14.5)));
//! assert!(params.contains("user"));
//! ```

mod color;
mod config;
mod error;
mod params;
mod rewriter;
mod types;

pub use color::{decode_color, looks_like_color, ColorError, COLOR_PREFIX};
pub use config::{RewriteConfig, DEFAULT_MAX_DEPTH};
pub use error::RewriteError;
pub use params::{placeholders, ParameterSet};
pub use rewriter::{rewrite, Rewriter};
pub use types::{TemplateNode, COMPONENTS_KEY, NAME_KEY, TYPE_KEY, UUID_KEY, VERSION_KEY};

pub(crate) use types::value_kind;
