//! Extension map: short component type name to fully-qualified type name
//!
//! Projects that bundle extensions ship one `components.json` descriptor per
//! extension. Each descriptor is a JSON list whose first element names the
//! component (`name`) and its class (`type`).

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors that can occur when loading extension descriptors
#[derive(Error, Debug)]
pub enum ExtensionError {
    #[error("Failed to read extension file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse extension JSON: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("extension descriptor is an empty list")]
    EmptyDescriptor,
    #[error("extension '{name}' must map to a type name string")]
    NotATypeName { name: String },
}

/// Mapping consulted once per node while resolving component types
///
/// Entries keep the order they were added in and serialize as a flat object
/// in that order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct ExtensionMap {
    // Every value is a `Value::String`
    entries: Map<String, Value>,
}

impl TryFrom<Map<String, Value>> for ExtensionMap {
    type Error = ExtensionError;

    fn try_from(entries: Map<String, Value>) -> Result<Self, Self::Error> {
        if let Some((name, _)) = entries.iter().find(|(_, v)| !v.is_string()) {
            return Err(ExtensionError::NotATypeName { name: name.clone() });
        }
        Ok(Self { entries })
    }
}

impl From<ExtensionMap> for Map<String, Value> {
    fn from(map: ExtensionMap) -> Self {
        map.entries
    }
}

/// First element of a `components.json` descriptor
#[derive(Deserialize)]
struct ComponentDescriptor {
    name: String,
    #[serde(rename = "type")]
    component_type: String,
}

impl ExtensionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a flat `{ "Short": "full.Type" }` JSON file
    pub fn from_file(path: &Path) -> Result<Self, ExtensionError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse a flat `{ "Short": "full.Type" }` JSON object
    pub fn from_json(content: &str) -> Result<Self, ExtensionError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Register the extension described by a `components.json` file
    pub fn load_descriptor_file(&mut self, path: &Path) -> Result<(), ExtensionError> {
        let content = std::fs::read_to_string(path)?;
        self.insert_descriptor(&content)
    }

    /// Register the extension described by `components.json` content
    pub fn insert_descriptor(&mut self, content: &str) -> Result<(), ExtensionError> {
        let descriptors: Vec<ComponentDescriptor> = serde_json::from_str(content)?;
        let first = descriptors
            .into_iter()
            .next()
            .ok_or(ExtensionError::EmptyDescriptor)?;
        tracing::debug!(
            name = %first.name,
            component_type = %first.component_type,
            "registered extension"
        );
        self.insert(first.name, first.component_type);
        Ok(())
    }

    pub fn insert(&mut self, short: impl Into<String>, full: impl Into<String>) {
        self.entries
            .insert(short.into(), Value::String(full.into()));
    }

    pub fn get(&self, short: &str) -> Option<&str> {
        self.entries.get(short).and_then(Value::as_str)
    }

    /// Resolve a component type, keeping it unchanged when it is not an extension
    pub fn resolve<'a>(&'a self, component_type: &'a str) -> &'a str {
        self.get(component_type).unwrap_or(component_type)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .filter_map(|(k, v)| v.as_str().map(|v| (k.as_str(), v)))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ExtensionMap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (short, full) in iter {
            map.insert(short, full);
        }
        map
    }
}
