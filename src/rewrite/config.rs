//! Configuration for the schema rewriter

/// Default limit on component nesting
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Configuration options for rewriting a component tree
#[derive(Debug, Clone)]
pub struct RewriteConfig {
    /// Fail the conversion on a malformed color or child list instead of
    /// keeping the raw value and logging a warning
    pub strict: bool,

    /// Maximum component nesting depth
    pub max_depth: usize,

    /// Property keys whose values are always kept as text
    pub text_keys: Vec<String>,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            strict: false,
            max_depth: DEFAULT_MAX_DEPTH,
            text_keys: vec!["Text".to_string()],
        }
    }
}

impl RewriteConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable strict mode
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Set the maximum nesting depth
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Replace the list of text-only property keys
    pub fn with_text_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.text_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    pub(crate) fn is_text_key(&self, key: &str) -> bool {
        self.text_keys.iter().any(|k| k == key)
    }
}
