use serde::Deserialize;

/// Tag key consulted for renamed fields unless configured otherwise.
pub const DEFAULT_TAG_KEY: &str = "serde";

/// Whether `$ref` fragments keep the field's description.
///
/// OpenAPI 3.0 ignores siblings of `$ref`, and strict validators reject
/// them, so descriptions are dropped unless asked for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceDescriptions {
    #[default]
    Drop,
    Keep,
}

/// Configuration for a documentation run.
///
/// Use the builder methods to customize behavior.
///
/// ## Examples
///
/// ```
/// use struct_doc_lib::{GeneratorConfig, ReferenceDescriptions};
///
/// let config = GeneratorConfig::new()
///     .tag_key("json")
///     .reference_descriptions(ReferenceDescriptions::Keep)
///     .skip_methods();
/// assert_eq!(config.tag_key, "json");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Attribute path whose `rename` overrides a field's property name
    pub tag_key: String,
    pub reference_descriptions: ReferenceDescriptions,
    /// Look for matching structs declared inside `impl` method bodies
    pub scan_methods: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            tag_key: DEFAULT_TAG_KEY.to_string(),
            reference_descriptions: ReferenceDescriptions::default(),
            scan_methods: true,
        }
    }
}

impl GeneratorConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tag key used to resolve renamed fields.
    pub fn tag_key<S: Into<String>>(mut self, key: S) -> Self {
        self.tag_key = key.into();
        self
    }

    /// Set the description policy for `$ref` fragments.
    pub fn reference_descriptions(mut self, policy: ReferenceDescriptions) -> Self {
        self.reference_descriptions = policy;
        self
    }

    /// Skip the method-local struct scan.
    pub fn skip_methods(mut self) -> Self {
        self.scan_methods = false;
        self
    }
}
