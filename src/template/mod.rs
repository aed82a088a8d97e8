//! Template documents
//!
//! This module assembles the final template from a screen description,
//! checks templates for problems the runtime would reject, and flattens a
//! template into concrete components the way the runtime extension does.
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use template_creator::{generate_template, ExtensionMap};
//!
//! let screen = json!({
//!     "authURL": ["ai2.appinventor.mit.edu"],
//!     "Properties": {
//!         "$Name": "Screen1",
//!         "$Type": "Form",
//!         "AppName": "Demo",
//!         "$Components": [
//!             {"$Name": "Button1", "$Type": "Button", "Text": "Hi {who}"}
//!         ]
//!     }
//! });
//!
//! let doc = generate_template(&screen, &ExtensionMap::new()).unwrap();
//! assert_eq!(doc.keys, vec!["who"]);
//! assert_eq!(doc.components[0].id.as_deref(), Some("Button1"));
//! ```

mod assembler;
mod config;
mod document;
mod instantiate;
mod validate;

pub use assembler::{
    generate_template, generate_template_with_config, TemplateError, APP_NAME_KEY,
    PLATFORMS_KEY, ROOT_KEY,
};
pub use config::{TemplateConfig, DYNAMIC_COMPONENTS_TYPE};
pub use document::{TemplateDocument, AUTHOR_PLACEHOLDER, EXTENSION_VERSION, METADATA_VERSION};
pub use instantiate::{fill_placeholders, instantiate, ComponentInstance, InstantiateError};
pub use validate::{validate, IssueCategory, TemplateIssue};
