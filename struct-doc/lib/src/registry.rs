use std::collections::BTreeMap;

use crate::schema::Schema;

/// Completed schema definitions keyed by identifier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpecRegistry(BTreeMap<String, Schema>);

impl SpecRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `schema` under its own identifier, replacing any previous
    /// entry.
    pub fn add_schema(&mut self, schema: Schema) {
        self.0.insert(schema.id().to_string(), schema);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&Schema> {
        self.0.get(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn extend(&mut self, other: SpecRegistry) {
        self.0.extend(other.0);
    }

    /// Definitions in ascending identifier order.
    pub fn values(self) -> Vec<Schema> {
        self.0.into_values().collect()
    }
}
