//! The template document consumed by the runtime extension

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::extensions::ExtensionMap;
use crate::rewrite::TemplateNode;

/// Schema version of the template metadata
pub const METADATA_VERSION: u32 = 1;
/// Runtime extension version the template targets
pub const EXTENSION_VERSION: u32 = 5;
/// Stand-in author, replaced by hand after generation
pub const AUTHOR_PLACEHOLDER: &str = "<your name>";

fn default_metadata_version() -> u32 {
    METADATA_VERSION
}

fn default_extension_version() -> u32 {
    EXTENSION_VERSION
}

fn default_author() -> String {
    AUTHOR_PLACEHOLDER.to_string()
}

/// A complete template
///
/// Field order is the serialized key order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateDocument {
    /// Application name, copied verbatim from the screen
    #[serde(default)]
    pub name: Value,

    #[serde(rename = "metadata-version", default = "default_metadata_version")]
    pub metadata_version: u32,

    #[serde(default = "default_extension_version")]
    pub extension_version: u32,

    #[serde(default = "default_author")]
    pub author: String,

    /// Builder distributions the template is meant for, copied verbatim
    #[serde(default)]
    pub platforms: Value,

    #[serde(default)]
    pub extensions: ExtensionMap,

    /// Template parameters in first-seen order
    #[serde(default)]
    pub keys: Vec<String>,

    #[serde(default)]
    pub components: Vec<TemplateNode>,
}

impl TemplateDocument {
    /// Parse a template from JSON text
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Serialize with four-space indentation
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        String::from_utf8(buf).map_err(<serde_json::Error as serde::ser::Error>::custom)
    }

    /// App name as text, if it is one
    pub fn name_str(&self) -> Option<&str> {
        self.name.as_str()
    }

    /// Conventional output file name: `"<app name> - <screen>.json"`
    pub fn file_name(&self, screen: &str) -> String {
        let app = self
            .name_str()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or("template");
        let sanitized: String = app
            .chars()
            .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
            .collect();
        format!("{} - {}.json", sanitized, screen)
    }
}
