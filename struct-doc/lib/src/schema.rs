//! Serializable OpenAPI schema objects.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One OpenAPI schema object, or a fragment of one.
///
/// Empty optional parts are left out of the serialized form, so a fragment
/// with nothing set serializes as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, Schema>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<Box<Schema>>,
}

impl Schema {
    /// A top-level `object` definition named `id`.
    pub fn object<S: Into<String>>(id: S) -> Self {
        Self {
            id: Some(id.into()),
            schema_type: Some("object".to_string()),
            ..Self::default()
        }
    }

    /// Sets the description, treating an empty string as none.
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = non_empty(description);
        self
    }

    /// The definition's identifier, or `""` for anonymous fragments.
    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }
}

/// The `components` section of an OpenAPI document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Components {
    pub schemas: BTreeMap<String, Schema>,
}

impl Components {
    /// Collects definitions by identifier; `id` is removed from each entry
    /// since the map key carries it.
    pub fn from_schemas<I: IntoIterator<Item = Schema>>(schemas: I) -> Self {
        let schemas = schemas
            .into_iter()
            .map(|mut schema| {
                let id = schema.id.take().unwrap_or_default();
                (id, schema)
            })
            .collect();

        Self { schemas }
    }

    /// Wraps the section as `{"components": {"schemas": {...}}}`.
    pub fn to_document(&self) -> serde_json::Value {
        serde_json::json!({ "components": self })
    }
}

pub(crate) fn non_empty(text: &str) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}
