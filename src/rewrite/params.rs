//! Template parameter discovery
//!
//! A placeholder is a name wrapped in single braces, `{name}`. Doubled braces
//! (`{{text}}`) are escapes and never delimit a placeholder.

use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Brace runs are captured whole so a doubled brace can be told apart from
    // a single one without lookaround.
    static ref PLACEHOLDER_RE: Regex = Regex::new(r"(\{+)([^{}]*)(\}+)")
        .expect("placeholder pattern should compile");
}

/// Iterate the placeholder names in `text`, in order of appearance
///
/// Empty placeholders (`{}`) are skipped.
pub fn placeholders(text: &str) -> impl Iterator<Item = &str> + '_ {
    PLACEHOLDER_RE.captures_iter(text).filter_map(|caps| {
        let open = caps.get(1)?.as_str();
        let name = caps.get(2)?.as_str();
        let close = caps.get(3)?.as_str();
        (open.len() == 1 && close.len() == 1 && !name.is_empty()).then_some(name)
    })
}

/// Ordered set of parameter names, first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSet {
    names: Vec<String>,
    seen: HashSet<String>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a name; returns false if it was already present
    pub fn insert(&mut self, name: &str) -> bool {
        if self.seen.contains(name) {
            return false;
        }
        self.seen.insert(name.to_string());
        self.names.push(name.to_string());
        true
    }

    /// Add every placeholder found in `text`
    pub fn scan(&mut self, text: &str) {
        for name in placeholders(text) {
            if self.insert(name) {
                tracing::debug!(parameter = name, "discovered template parameter");
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.seen.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.names
    }
}
