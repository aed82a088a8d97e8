//! Output node type and the designer's structural markers

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Component name marker, becomes `id`
pub const NAME_KEY: &str = "$Name";
/// Component type marker, becomes `type`
pub const TYPE_KEY: &str = "$Type";
/// Child list marker, becomes `components`
pub const COMPONENTS_KEY: &str = "$Components";
/// Designer version marker, dropped
pub const VERSION_KEY: &str = "$Version";
/// Designer identity, dropped
pub const UUID_KEY: &str = "Uuid";

/// A component in the template schema
///
/// Keys whose source marker was missing are left out when serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub component_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Map<String, Value>>,

    /// Child components in declaration order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<TemplateNode>>,
}

impl TemplateNode {
    /// Look up a typed property
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.as_ref().and_then(|p| p.get(key))
    }

    /// Child components, empty when the node has none
    pub fn children(&self) -> &[TemplateNode] {
        self.components.as_deref().unwrap_or(&[])
    }

    /// Convert into a plain JSON object, e.g. to nest it inside a property
    pub fn into_value(self) -> Value {
        let mut map = Map::new();
        if let Some(id) = self.id {
            map.insert("id".to_string(), Value::String(id));
        }
        if let Some(component_type) = self.component_type {
            map.insert("type".to_string(), Value::String(component_type));
        }
        if let Some(properties) = self.properties {
            map.insert("properties".to_string(), Value::Object(properties));
        }
        if let Some(components) = self.components {
            map.insert(
                "components".to_string(),
                Value::Array(components.into_iter().map(TemplateNode::into_value).collect()),
            );
        }
        Value::Object(map)
    }
}

/// Short description of a JSON value's kind for diagnostics
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}
