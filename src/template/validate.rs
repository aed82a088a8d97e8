//! Template checks run before a template is handed to the runtime
//!
//! The runtime refuses components without an `id` or `type`, and a repeated
//! id among siblings makes the second component overwrite the first.

use std::collections::HashSet;
use std::fmt;

use crate::rewrite::{placeholders, TemplateNode};

use super::document::TemplateDocument;

/// A problem found in a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateIssue {
    pub category: IssueCategory,
    /// Position of the offending component, e.g. `Row1/#2`
    pub path: String,
    pub message: String,
}

/// Category of template problem
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueCategory {
    MissingId,
    MissingType,
    DuplicateId,
    UndeclaredKey,
}

impl fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueCategory::MissingId => write!(f, "missing-id"),
            IssueCategory::MissingType => write!(f, "missing-type"),
            IssueCategory::DuplicateId => write!(f, "duplicate-id"),
            IssueCategory::UndeclaredKey => write!(f, "undeclared-key"),
        }
    }
}

impl fmt::Display for TemplateIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.category, self.path, self.message)
    }
}

/// Run all checks on a template
pub fn validate(document: &TemplateDocument) -> Vec<TemplateIssue> {
    let declared: HashSet<&str> = document.keys.iter().map(String::as_str).collect();
    let mut issues = Vec::new();
    check_siblings(&document.components, "", &declared, &mut issues);
    issues
}

/// Display name for a component: its id if present, else its position
fn display_name(node: &TemplateNode, index: usize) -> String {
    match &node.id {
        Some(id) => id.clone(),
        None => format!("#{}", index + 1),
    }
}

fn check_siblings(
    nodes: &[TemplateNode],
    parent_path: &str,
    declared: &HashSet<&str>,
    issues: &mut Vec<TemplateIssue>,
) {
    let mut seen = HashSet::new();
    for (index, node) in nodes.iter().enumerate() {
        let name = display_name(node, index);
        let path = if parent_path.is_empty() {
            name
        } else {
            format!("{}/{}", parent_path, name)
        };

        match &node.id {
            None => issues.push(TemplateIssue {
                category: IssueCategory::MissingId,
                path: path.clone(),
                message: "component has no id".to_string(),
            }),
            Some(id) if !seen.insert(id.as_str()) => issues.push(TemplateIssue {
                category: IssueCategory::DuplicateId,
                path: path.clone(),
                message: format!("id '{}' is used by an earlier sibling", id),
            }),
            Some(_) => {}
        }
        if node.component_type.is_none() {
            issues.push(TemplateIssue {
                category: IssueCategory::MissingType,
                path: path.clone(),
                message: "component has no type".to_string(),
            });
        }

        check_placeholders(node, &path, declared, issues);
        check_siblings(node.children(), &path, declared, issues);
    }
}

fn check_placeholders(
    node: &TemplateNode,
    path: &str,
    declared: &HashSet<&str>,
    issues: &mut Vec<TemplateIssue>,
) {
    let mut texts: Vec<&str> = Vec::new();
    texts.extend(node.id.as_deref());
    texts.extend(node.component_type.as_deref());
    if let Some(properties) = &node.properties {
        for (key, value) in properties {
            texts.push(key);
            texts.extend(value.as_str());
        }
    }

    let mut reported = HashSet::new();
    for name in texts.into_iter().flat_map(placeholders) {
        if !declared.contains(name) && reported.insert(name) {
            issues.push(TemplateIssue {
                category: IssueCategory::UndeclaredKey,
                path: path.to_string(),
                message: format!("placeholder '{{{}}}' is not listed in keys", name),
            });
        }
    }
}
