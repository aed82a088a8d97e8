//! Configuration for template assembly

/// Component type of the synthetic dynamic-components placeholder
pub const DYNAMIC_COMPONENTS_TYPE: &str = "DynamicComponents";

/// Configuration options for assembling a template document
#[derive(Debug, Clone)]
pub struct TemplateConfig {
    /// Component types removed from the top level of the template
    pub excluded_types: Vec<String>,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            excluded_types: vec![DYNAMIC_COMPONENTS_TYPE.to_string()],
        }
    }
}

impl TemplateConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the list of excluded top-level component types
    pub fn with_excluded_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_types = types.into_iter().map(Into::into).collect();
        self
    }
}
