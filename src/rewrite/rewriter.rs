//! Recursive rewrite of designer component trees into template nodes

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::extensions::ExtensionMap;
use crate::literal;

use super::color::{decode_color, looks_like_color};
use super::config::RewriteConfig;
use super::error::RewriteError;
use super::params::ParameterSet;
use super::types::{
    value_kind, TemplateNode, COMPONENTS_KEY, NAME_KEY, TYPE_KEY, UUID_KEY, VERSION_KEY,
};

/// Rewrites raw designer nodes against one extension map and configuration
#[derive(Debug, Clone, Copy)]
pub struct Rewriter<'a> {
    extensions: &'a ExtensionMap,
    config: &'a RewriteConfig,
}

impl<'a> Rewriter<'a> {
    pub fn new(extensions: &'a ExtensionMap, config: &'a RewriteConfig) -> Self {
        Self { extensions, config }
    }

    /// Rewrite `node` and all of its descendants
    ///
    /// Every placeholder found in keys and text values is added to
    /// `parameters`. The input is never modified.
    pub fn rewrite(
        &self,
        node: &Value,
        parameters: &mut ParameterSet,
    ) -> Result<TemplateNode, RewriteError> {
        let map = node.as_object().ok_or(RewriteError::NotANode {
            found: value_kind(node),
        })?;
        let mut path = Vec::new();
        self.rewrite_node(map, parameters, &mut path)
    }

    fn rewrite_node(
        &self,
        node: &Map<String, Value>,
        parameters: &mut ParameterSet,
        path: &mut Vec<String>,
    ) -> Result<TemplateNode, RewriteError> {
        let label = node
            .get(NAME_KEY)
            .and_then(Value::as_str)
            .unwrap_or("<unnamed>")
            .to_string();
        path.push(label);
        if path.len() > self.config.max_depth {
            return Err(RewriteError::DepthExceeded {
                max_depth: self.config.max_depth,
                path: path.join("/"),
            });
        }

        let mut out = TemplateNode::default();
        for (key, value) in node {
            match key.as_str() {
                UUID_KEY | VERSION_KEY => {}
                NAME_KEY => {
                    let id = text_of(value);
                    parameters.scan(&id);
                    out.id = Some(id);
                }
                TYPE_KEY => {
                    let short = text_of(value);
                    parameters.scan(&short);
                    out.component_type = Some(self.extensions.resolve(&short).to_string());
                }
                COMPONENTS_KEY => {
                    out.components = self.rewrite_children(value, parameters, path)?;
                }
                _ => {
                    parameters.scan(key);
                    let typed = self.property_value(key, value, parameters, path)?;
                    out.properties
                        .get_or_insert_with(Map::new)
                        .insert(key.clone(), typed);
                }
            }
        }

        debug!(
            path = %path.join("/"),
            component_type = out.component_type.as_deref().unwrap_or("<none>"),
            "rewrote component"
        );
        path.pop();
        Ok(out)
    }

    fn rewrite_children(
        &self,
        value: &Value,
        parameters: &mut ParameterSet,
        path: &mut Vec<String>,
    ) -> Result<Option<Vec<TemplateNode>>, RewriteError> {
        let Some(items) = value.as_array() else {
            self.tolerate(path, format!("{} is {}, not a list", COMPONENTS_KEY, value_kind(value)))?;
            return Ok(None);
        };

        let mut children = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match item.as_object() {
                Some(child) => children.push(self.rewrite_node(child, parameters, path)?),
                None => self.tolerate(
                    path,
                    format!("child #{} is {}, not a component", index + 1, value_kind(item)),
                )?,
            }
        }
        Ok(Some(children))
    }

    fn property_value(
        &self,
        key: &str,
        value: &Value,
        parameters: &mut ParameterSet,
        path: &mut Vec<String>,
    ) -> Result<Value, RewriteError> {
        match value {
            Value::String(text) => {
                parameters.scan(text);
                self.typed_text(key, text, path)
            }
            Value::Object(nested) => Ok(self.rewrite_node(nested, parameters, path)?.into_value()),
            Value::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    out.push(match item {
                        Value::Object(nested) => {
                            self.rewrite_node(nested, parameters, path)?.into_value()
                        }
                        Value::String(text) => {
                            parameters.scan(text);
                            item.clone()
                        }
                        other => other.clone(),
                    });
                }
                Ok(Value::Array(out))
            }
            other => Ok(other.clone()),
        }
    }

    /// Color decoding first, then the text-key override, then literal inference
    fn typed_text(&self, key: &str, text: &str, path: &[String]) -> Result<Value, RewriteError> {
        if looks_like_color(text) {
            return match decode_color(text) {
                Ok(argb) => Ok(Value::from(argb)),
                Err(source) if self.config.strict => Err(RewriteError::MalformedColor {
                    path: path.join("/"),
                    property: key.to_string(),
                    source,
                }),
                Err(source) => {
                    warn!(
                        path = %path.join("/"),
                        property = key,
                        "{}; keeping the raw value",
                        source
                    );
                    Ok(Value::String(text.to_string()))
                }
            };
        }

        if self.config.is_text_key(key) {
            return Ok(Value::String(text.to_string()));
        }

        Ok(literal::infer(text).unwrap_or_else(|| Value::String(text.to_string())))
    }

    fn tolerate(&self, path: &[String], reason: String) -> Result<(), RewriteError> {
        if self.config.strict {
            return Err(RewriteError::InvalidChildren {
                path: path.join("/"),
                reason,
            });
        }
        warn!(path = %path.join("/"), "{}; skipping", reason);
        Ok(())
    }
}

/// Marker values are normally strings; anything else is kept as its JSON text
fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Rewrite with the default configuration
pub fn rewrite(
    node: &Value,
    extensions: &ExtensionMap,
    parameters: &mut ParameterSet,
) -> Result<TemplateNode, RewriteError> {
    let config = RewriteConfig::default();
    Rewriter::new(extensions, &config).rewrite(node, parameters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn extensions() -> ExtensionMap {
        [("HelloWorld", "io.foo.HelloWorld")].into_iter().collect()
    }

    fn rewrite_default(node: Value) -> (TemplateNode, ParameterSet) {
        let mut params = ParameterSet::new();
        let out = rewrite(&node, &extensions(), &mut params).expect("Should rewrite");
        (out, params)
    }

    #[test]
    fn test_markers_are_renamed_and_dropped() {
        let (node, _) = rewrite_default(json!({
            "$Name": "Button1",
            "$Type": "Button",
            "$Version": "7",
            "Uuid": "-12345",
            "Width": "120"
        }));
        assert_eq!(
            serde_json::to_value(&node).unwrap(),
            json!({
                "id": "Button1",
                "type": "Button",
                "properties": {"Width": 120}
            })
        );
    }

    #[test]
    fn test_node_without_children_has_no_components_key() {
        let (node, _) = rewrite_default(json!({"$Name": "L", "$Type": "Label"}));
        assert!(node.components.is_none());
        assert!(node.properties.is_none());
        let value = serde_json::to_value(&node).unwrap();
        assert!(value.get("components").is_none());
    }

    #[test]
    fn test_extension_type_is_substituted() {
        let (node, _) = rewrite_default(json!({"$Name": "H", "$Type": "HelloWorld"}));
        assert_eq!(node.component_type.as_deref(), Some("io.foo.HelloWorld"));
    }

    #[test]
    fn test_rewriting_a_resolved_type_again_is_unchanged() {
        let (node, _) = rewrite_default(json!({"$Name": "H", "$Type": "HelloWorld"}));
        let resolved = node.component_type.unwrap();
        let (again, _) = rewrite_default(json!({"$Name": "H", "$Type": resolved.clone()}));
        assert_eq!(again.component_type, Some(resolved));
    }

    #[test]
    fn test_children_rewritten_in_order() {
        let (node, _) = rewrite_default(json!({
            "$Name": "Arrangement1",
            "$Type": "HorizontalArrangement",
            "$Components": [
                {"$Name": "A", "$Type": "Button", "Uuid": "1"},
                {"$Name": "B", "$Type": "HelloWorld", "$Version": "2"}
            ]
        }));
        let ids: Vec<_> = node.children().iter().map(|c| c.id.as_deref()).collect();
        assert_eq!(ids, vec![Some("A"), Some("B")]);
        assert_eq!(
            node.children()[1].component_type.as_deref(),
            Some("io.foo.HelloWorld")
        );
    }

    #[test]
    fn test_text_key_stays_a_string() {
        let (node, _) = rewrite_default(json!({
            "$Name": "L",
            "$Type": "Label",
            "Text": "42",
            "FontSize": "42",
            "Visible": "False"
        }));
        assert_eq!(node.property("Text"), Some(&json!("42")));
        assert_eq!(node.property("FontSize"), Some(&json!(42)));
        assert_eq!(node.property("Visible"), Some(&json!(false)));
    }

    #[test]
    fn test_colors_are_decoded_even_on_text_key() {
        let (node, _) = rewrite_default(json!({
            "BackgroundColor": "&HFF112233",
            "TextColor": "&H112233",
            "Text": "&HFF000000"
        }));
        assert_eq!(node.property("BackgroundColor"), Some(&json!(-15584205)));
        assert_eq!(node.property("TextColor"), Some(&json!(-15584205)));
        assert_eq!(node.property("Text"), Some(&json!(-16777216)));
    }

    #[test]
    fn test_wrong_length_color_is_plain_text() {
        let (node, _) = rewrite_default(json!({"Color": "&H1234"}));
        assert_eq!(node.property("Color"), Some(&json!("&H1234")));
    }

    #[test]
    fn test_malformed_color_lenient_keeps_raw_value() {
        let (node, _) = rewrite_default(json!({"Color": "&HZZ112233"}));
        assert_eq!(node.property("Color"), Some(&json!("&HZZ112233")));
    }

    #[test]
    fn test_malformed_color_strict_fails() {
        let config = RewriteConfig::new().with_strict(true);
        let ext = extensions();
        let mut params = ParameterSet::new();
        let result = Rewriter::new(&ext, &config).rewrite(
            &json!({"$Name": "B", "Color": "&HZZ112233"}),
            &mut params,
        );
        match result {
            Err(RewriteError::MalformedColor { path, property, .. }) => {
                assert_eq!(path, "B");
                assert_eq!(property, "Color");
            }
            other => panic!("Expected malformed color error, got {:?}", other),
        }
    }

    #[test]
    fn test_parameters_collected_across_tree() {
        let (_, params) = rewrite_default(json!({
            "$Name": "Root",
            "Title": "Hello {name}, you are {{literal}} years old and {age}",
            "$Components": [
                {"$Name": "item_{index}", "$Type": "Label", "Text": "{name} again"},
                {"$Name": "B", "$Type": "Button", "{prop}": "x"}
            ]
        }));
        assert_eq!(params.into_vec(), vec!["name", "age", "index", "prop"]);
    }

    #[test]
    fn test_uuid_and_version_never_appear_in_nested_properties() {
        let (node, _) = rewrite_default(json!({
            "$Name": "Root",
            "Nested": {"$Name": "Inner", "Uuid": "1", "$Version": "3", "Size": "2"},
            "List": [{"Uuid": "9", "Value": "1.5"}, "text"]
        }));
        let value = serde_json::to_value(&node).unwrap();
        let text = value.to_string();
        assert!(!text.contains("Uuid"));
        assert!(!text.contains("$Version"));
        assert_eq!(
            node.property("Nested"),
            Some(&json!({"id": "Inner", "properties": {"Size": 2}}))
        );
        assert_eq!(
            node.property("List"),
            Some(&json!([{"properties": {"Value": 1.5}}, "text"]))
        );
    }

    #[test]
    fn test_non_string_values_pass_through() {
        let (node, _) = rewrite_default(json!({"Count": 3, "Flag": true, "Nothing": null}));
        assert_eq!(node.property("Count"), Some(&json!(3)));
        assert_eq!(node.property("Flag"), Some(&json!(true)));
        assert_eq!(node.property("Nothing"), Some(&Value::Null));
    }

    #[test]
    fn test_invalid_children_lenient_skips() {
        let (node, _) = rewrite_default(json!({
            "$Name": "Root",
            "$Components": [{"$Name": "A"}, "junk", 3]
        }));
        assert_eq!(node.children().len(), 1);

        let (node, _) = rewrite_default(json!({"$Name": "Root", "$Components": "junk"}));
        assert!(node.components.is_none());
    }

    #[test]
    fn test_invalid_children_strict_fails() {
        let config = RewriteConfig::new().with_strict(true);
        let ext = extensions();
        let mut params = ParameterSet::new();
        let result = Rewriter::new(&ext, &config)
            .rewrite(&json!({"$Name": "Root", "$Components": ["junk"]}), &mut params);
        assert!(matches!(result, Err(RewriteError::InvalidChildren { .. })));
    }

    #[test]
    fn test_depth_limit() {
        let mut tree = json!({"$Name": "leaf"});
        for i in 0..5 {
            tree = json!({"$Name": format!("n{}", i), "$Components": [tree]});
        }
        let config = RewriteConfig::new().with_max_depth(3);
        let ext = ExtensionMap::new();
        let mut params = ParameterSet::new();
        let result = Rewriter::new(&ext, &config).rewrite(&tree, &mut params);
        assert!(matches!(
            result,
            Err(RewriteError::DepthExceeded { max_depth: 3, .. })
        ));

        let config = RewriteConfig::new().with_max_depth(6);
        assert!(Rewriter::new(&ext, &config).rewrite(&tree, &mut params).is_ok());
    }

    #[test]
    fn test_non_mapping_input_is_rejected() {
        let mut params = ParameterSet::new();
        let result = rewrite(&json!("text"), &ExtensionMap::new(), &mut params);
        assert!(matches!(
            result,
            Err(RewriteError::NotANode { found: "a string" })
        ));
    }

    #[test]
    fn test_input_is_not_modified() {
        let input = json!({"$Name": "A", "Uuid": "1", "Width": "5"});
        let before = input.clone();
        let mut params = ParameterSet::new();
        rewrite(&input, &ExtensionMap::new(), &mut params).unwrap();
        assert_eq!(input, before);
    }
}
