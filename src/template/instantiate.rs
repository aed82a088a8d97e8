//! Template instantiation - flattens a template into concrete component records
//!
//! This is the runtime side of a template: every `{key}` is replaced by the
//! value given for it, and the tree is flattened depth-first into a list in
//! which each child names the component it is created in.

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::rewrite::TemplateNode;

use super::document::TemplateDocument;

/// Errors that can occur while instantiating a template
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InstantiateError {
    /// Number of values does not match the template's keys
    #[error("template defines {expected} parameter(s), but {given} value(s) were given")]
    ParameterCount { expected: usize, given: usize },

    /// Component without an `id`
    #[error("component at {path} has no id")]
    MissingId { path: String },

    /// Component without a `type`
    #[error("component at {path} has no type")]
    MissingType { path: String },
}

/// A component ready to be created
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentInstance {
    pub id: String,
    #[serde(rename = "type")]
    pub component_type: String,
    /// Id of the containing component, absent for top-level components
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    pub properties: Map<String, Value>,
}

/// Replace `{key}` with its value for every binding, in binding order
pub fn fill_placeholders(text: &str, bindings: &[(&str, &str)]) -> String {
    let mut filled = text.to_string();
    for (key, value) in bindings {
        let placeholder = format!("{{{}}}", key);
        if filled.contains(&placeholder) {
            filled = filled.replace(&placeholder, value);
        }
    }
    filled
}

/// Flatten `document` into component instances using one value per key
pub fn instantiate(
    document: &TemplateDocument,
    values: &[String],
) -> Result<Vec<ComponentInstance>, InstantiateError> {
    if document.keys.len() != values.len() {
        return Err(InstantiateError::ParameterCount {
            expected: document.keys.len(),
            given: values.len(),
        });
    }
    let bindings: Vec<(&str, &str)> = document
        .keys
        .iter()
        .map(String::as_str)
        .zip(values.iter().map(String::as_str))
        .collect();

    let mut out = Vec::new();
    for (index, node) in document.components.iter().enumerate() {
        let path = format!("#{}", index + 1);
        flatten_node(node, None, &path, &bindings, &mut out)?;
    }
    Ok(out)
}

fn flatten_node(
    node: &TemplateNode,
    parent: Option<&str>,
    path: &str,
    bindings: &[(&str, &str)],
    out: &mut Vec<ComponentInstance>,
) -> Result<(), InstantiateError> {
    let id = node.id.as_deref().ok_or_else(|| InstantiateError::MissingId {
        path: path.to_string(),
    })?;
    let component_type = node
        .component_type
        .as_deref()
        .ok_or_else(|| InstantiateError::MissingType {
            path: path.to_string(),
        })?;

    let id = fill_placeholders(id, bindings);
    let mut properties = Map::new();
    if let Some(source) = &node.properties {
        for (key, value) in source {
            let value = match value {
                Value::String(text) => Value::String(fill_placeholders(text, bindings)),
                other => other.clone(),
            };
            properties.insert(fill_placeholders(key, bindings), value);
        }
    }

    out.push(ComponentInstance {
        id: id.clone(),
        component_type: fill_placeholders(component_type, bindings),
        parent: parent.map(str::to_string),
        properties,
    });

    for (index, child) in node.children().iter().enumerate() {
        let child_path = format!("{}/{}#{}", path, id, index + 1);
        flatten_node(child, Some(id.as_str()), &child_path, bindings, out)?;
    }
    Ok(())
}
