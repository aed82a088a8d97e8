//! Assembly of a template document from a decoded screen description

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::extensions::ExtensionMap;
use crate::rewrite::{value_kind, ParameterSet, RewriteConfig, RewriteError, Rewriter, TemplateNode};

use super::config::TemplateConfig;
use super::document::{TemplateDocument, AUTHOR_PLACEHOLDER, EXTENSION_VERSION, METADATA_VERSION};

/// Key of the root component (the screen form) in a screen description
pub const ROOT_KEY: &str = "Properties";
/// Property of the root component holding the application name
pub const APP_NAME_KEY: &str = "AppName";
/// Key of the builder distribution list in a screen description
pub const PLATFORMS_KEY: &str = "authURL";

/// Errors that can occur while assembling a template
#[derive(Debug, Error)]
pub enum TemplateError {
    /// The screen description is not a JSON object
    #[error("screen description must be a mapping, found {found}")]
    NotAScreen { found: &'static str },

    /// No root component tree in the screen description
    #[error("screen description has no '{key}' component tree")]
    MissingRoot { key: &'static str },

    /// Rewriting the component tree failed
    #[error("rewrite failed: {0}")]
    Rewrite(#[from] RewriteError),
}

/// Generate a template with the default configuration
pub fn generate_template(
    screen: &Value,
    extensions: &ExtensionMap,
) -> Result<TemplateDocument, TemplateError> {
    generate_template_with_config(
        screen,
        extensions,
        &RewriteConfig::default(),
        &TemplateConfig::default(),
    )
}

/// Generate a template from a screen description
///
/// The root form found under `Properties` is rewritten in full, so its own
/// properties contribute placeholders too; only its children are emitted.
pub fn generate_template_with_config(
    screen: &Value,
    extensions: &ExtensionMap,
    rewrite_config: &RewriteConfig,
    template_config: &TemplateConfig,
) -> Result<TemplateDocument, TemplateError> {
    let screen = screen.as_object().ok_or(TemplateError::NotAScreen {
        found: value_kind(screen),
    })?;
    let root = screen
        .get(ROOT_KEY)
        .filter(|root| root.is_object())
        .ok_or(TemplateError::MissingRoot { key: ROOT_KEY })?;

    let name = root.get(APP_NAME_KEY).cloned().unwrap_or(Value::Null);
    let platforms = screen.get(PLATFORMS_KEY).cloned().unwrap_or(Value::Null);

    let mut parameters = ParameterSet::new();
    let form = Rewriter::new(extensions, rewrite_config).rewrite(root, &mut parameters)?;

    let components = form
        .components
        .unwrap_or_default()
        .into_iter()
        .filter(|node| {
            let excluded = is_excluded(node, &template_config.excluded_types, extensions);
            if excluded {
                debug!(
                    id = node.id.as_deref().unwrap_or("<unnamed>"),
                    "dropping synthetic component"
                );
            }
            !excluded
        })
        .collect::<Vec<_>>();

    info!(
        components = components.len(),
        keys = parameters.len(),
        "assembled template"
    );

    Ok(TemplateDocument {
        name,
        metadata_version: METADATA_VERSION,
        extension_version: EXTENSION_VERSION,
        author: AUTHOR_PLACEHOLDER.to_string(),
        platforms,
        extensions: extensions.clone(),
        keys: parameters.into_vec(),
        components,
    })
}

/// A node is excluded when its type is an excluded short name, or the
/// fully-qualified type the extension map gives that short name
fn is_excluded(node: &TemplateNode, excluded: &[String], extensions: &ExtensionMap) -> bool {
    let Some(component_type) = node.component_type.as_deref() else {
        return false;
    };
    excluded
        .iter()
        .any(|short| short == component_type || extensions.get(short) == Some(component_type))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn screen(components: Value) -> Value {
        json!({
            "authURL": ["ai2.appinventor.mit.edu"],
            "YaVersion": "208",
            "Source": "Form",
            "Properties": {
                "$Name": "Screen1",
                "$Type": "Form",
                "$Version": "27",
                "AppName": "Greeter",
                "Title": "Welcome {user}",
                "Uuid": "0",
                "$Components": components
            }
        })
    }

    #[test]
    fn test_document_metadata() {
        let doc = generate_template(&screen(json!([])), &ExtensionMap::new()).unwrap();
        assert_eq!(doc.name, json!("Greeter"));
        assert_eq!(doc.platforms, json!(["ai2.appinventor.mit.edu"]));
        assert_eq!(doc.metadata_version, 1);
        assert_eq!(doc.extension_version, 5);
        assert_eq!(doc.author, "<your name>");
        assert_eq!(doc.keys, vec!["user"]);
        assert!(doc.components.is_empty());
    }

    #[test]
    fn test_dynamic_components_filtered_at_top_level_only() {
        let doc = generate_template(
            &screen(json!([
                {"$Name": "A", "$Type": "Button"},
                {"$Name": "DC", "$Type": "DynamicComponents"},
                {"$Name": "B", "$Type": "VerticalArrangement", "$Components": [
                    {"$Name": "Inner", "$Type": "DynamicComponents"}
                ]}
            ])),
            &ExtensionMap::new(),
        )
        .unwrap();
        let ids: Vec<_> = doc.components.iter().map(|c| c.id.as_deref()).collect();
        assert_eq!(ids, vec![Some("A"), Some("B")]);
        assert_eq!(doc.components[1].children().len(), 1);
    }

    #[test]
    fn test_dynamic_components_filtered_when_mapped_to_full_type() {
        let extensions: ExtensionMap = [(
            "DynamicComponents",
            "com.yusufcihan.DynamicComponents.DynamicComponents",
        )]
        .into_iter()
        .collect();
        let doc = generate_template(
            &screen(json!([
                {"$Name": "DC", "$Type": "DynamicComponents"},
                {"$Name": "A", "$Type": "Button"}
            ])),
            &extensions,
        )
        .unwrap();
        assert_eq!(doc.components.len(), 1);
        assert_eq!(doc.components[0].id.as_deref(), Some("A"));
        assert_eq!(doc.extensions, extensions);
    }

    #[test]
    fn test_custom_excluded_types() {
        let doc = generate_template_with_config(
            &screen(json!([
                {"$Name": "N", "$Type": "Notifier"},
                {"$Name": "A", "$Type": "Button"}
            ])),
            &ExtensionMap::new(),
            &RewriteConfig::default(),
            &TemplateConfig::new().with_excluded_types(["Notifier"]),
        )
        .unwrap();
        assert_eq!(doc.components.len(), 1);
    }

    #[test]
    fn test_missing_root() {
        let result = generate_template(&json!({"authURL": []}), &ExtensionMap::new());
        assert!(matches!(
            result,
            Err(TemplateError::MissingRoot { key: "Properties" })
        ));
    }

    #[test]
    fn test_not_a_screen() {
        let result = generate_template(&json!([1, 2]), &ExtensionMap::new());
        assert!(matches!(
            result,
            Err(TemplateError::NotAScreen { found: "a list" })
        ));
    }

    #[test]
    fn test_missing_name_and_platforms_are_null() {
        let doc = generate_template(
            &json!({"Properties": {"$Name": "Screen1", "$Type": "Form"}}),
            &ExtensionMap::new(),
        )
        .unwrap();
        assert_eq!(doc.name, Value::Null);
        assert_eq!(doc.platforms, Value::Null);
        assert!(doc.components.is_empty());
    }
}
