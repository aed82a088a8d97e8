//! Template Creator - turns app-builder screens into component templates
//!
//! This library rewrites the component tree of a designer screen into the
//! template schema understood by the DynamicComponents runtime extension:
//! designer markers become `id`/`type`/`components`, text properties get
//! their literal types back, `&H` colors become signed ARGB integers, and
//! `{placeholders}` are collected as template keys.
//!
//! # Example
//!
//! ```rust
//! use template_creator::{convert, ExtensionMap};
//!
//! let source = r#"{
//!     "authURL": ["ai2.appinventor.mit.edu"],
//!     "Properties": {
//!         "$Name": "Screen1", "$Type": "Form", "AppName": "Demo",
//!         "$Components": [
//!             {"$Name": "Label1", "$Type": "Label", "Uuid": "1", "Text": "Hello {name}"}
//!         ]
//!     }
//! }"#;
//!
//! let doc = convert(source, &ExtensionMap::new()).unwrap();
//! assert_eq!(doc.keys, vec!["name"]);
//! ```

pub mod config;
pub mod error;
pub mod extensions;
pub mod literal;
pub mod rewrite;
pub mod screen;
pub mod template;

pub use config::{ConfigError, ConvertConfig};
pub use error::SourceError;
pub use extensions::{ExtensionError, ExtensionMap};
pub use rewrite::{
    decode_color, rewrite, ColorError, ParameterSet, RewriteConfig, RewriteError, Rewriter,
    TemplateNode,
};
pub use screen::parse_screen_source;
pub use template::{
    generate_template, generate_template_with_config, instantiate, validate, ComponentInstance,
    InstantiateError, TemplateConfig, TemplateDocument, TemplateError, TemplateIssue,
};

use thiserror::Error;

/// Errors that can occur during the conversion pipeline
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Error reading the screen source
    #[error("screen source error: {0}")]
    Source(#[from] SourceError),

    /// Error assembling the template
    #[error("template error: {0}")]
    Template(#[from] TemplateError),
}

/// Convert screen source text to a template with default configuration
pub fn convert(source: &str, extensions: &ExtensionMap) -> Result<TemplateDocument, ConvertError> {
    convert_with_config(source, extensions, &ConvertConfig::default())
}

/// Convert screen source text to a template with custom configuration
///
/// # Example
///
/// ```rust
/// use template_creator::{convert_with_config, ConvertConfig, ConvertError, ExtensionMap};
///
/// let source = r#"{"Properties": {"$Name": "Screen1", "$Components": [
///     {"$Name": "Ball1", "$Type": "Ball", "PaintColor": "&HXX000000"}
/// ]}}"#;
///
/// let strict = ConvertConfig::new().with_strict(true);
/// let result = convert_with_config(source, &ExtensionMap::new(), &strict);
/// assert!(matches!(result, Err(ConvertError::Template(_))));
/// ```
pub fn convert_with_config(
    source: &str,
    extensions: &ExtensionMap,
    config: &ConvertConfig,
) -> Result<TemplateDocument, ConvertError> {
    let screen = parse_screen_source(source)?;
    let doc = generate_template_with_config(&screen, extensions, &config.rewrite, &config.template)?;
    Ok(doc)
}
