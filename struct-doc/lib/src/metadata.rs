//! Struct-level annotations harvested from doc comments.
//!
//! Lines of the form `@name value` accumulate under `name`; every other
//! line accumulates under [`DESCRIPTION_ATTR`].

use std::collections::HashMap;

const METADATA_TOKEN: char = '@';

/// Attribute holding free-text lines.
pub const DESCRIPTION_ATTR: &str = "description";
/// Attribute holding the display title.
pub const TITLE_ATTR: &str = "title";

/// Attribute values parsed from one comment block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructMetadata(HashMap<String, String>);

impl StructMetadata {
    fn append(&mut self, key: &str, value: &str) {
        self.0
            .entry(key.to_string())
            .and_modify(|existing| {
                existing.push('\n');
                existing.push_str(value);
            })
            .or_insert_with(|| value.to_string());
    }

    /// Returns the accumulated value for `key`, or `default` when absent.
    pub fn lookup<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.0.get(key).map(String::as_str).unwrap_or(default)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MetadataParser;

impl MetadataParser {
    pub fn new() -> Self {
        Self
    }

    /// Splits `desc` into lines and sorts each into its attribute.
    pub fn parse_struct_desc(&self, desc: &str) -> StructMetadata {
        let mut out = StructMetadata::default();

        for line in desc.split('\n') {
            let line = line.trim();
            let attribute = line.split(' ').next().unwrap_or_default();

            match attribute.strip_prefix(METADATA_TOKEN) {
                Some(name) => out.append(name, line[attribute.len()..].trim()),
                None => out.append(DESCRIPTION_ATTR, line),
            }
        }

        out
    }
}
