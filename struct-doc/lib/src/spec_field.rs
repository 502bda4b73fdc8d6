//! Resolved schema shapes of single fields.

use std::fmt;

use crate::config::ReferenceDescriptions;
use crate::schema::{Schema, non_empty};

/// Prefix of every `$ref` pointer.
pub const REF_PREFIX: &str = "#/components/schemas/";
/// Format attached to timestamp fields.
pub const TIMESTAMP_FORMAT: &str = "RFC3339";

/// Base kinds of the schema language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecType {
    Array,
    Object,
    Boolean,
    Integer,
    Number,
    String,
}

impl SpecType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Array => "array",
            Self::Object => "object",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::String => "string",
        }
    }
}

impl fmt::Display for SpecType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const PRIMITIVES: &[(&str, SpecType)] = &[
    ("String", SpecType::String),
    ("str", SpecType::String),
    ("bool", SpecType::Boolean),
    ("f32", SpecType::Number),
    ("f64", SpecType::Number),
    ("i8", SpecType::Integer),
    ("i16", SpecType::Integer),
    ("i32", SpecType::Integer),
    ("i64", SpecType::Integer),
    ("i128", SpecType::Integer),
    ("isize", SpecType::Integer),
    ("u8", SpecType::Integer),
    ("u16", SpecType::Integer),
    ("u32", SpecType::Integer),
    ("u64", SpecType::Integer),
    ("u128", SpecType::Integer),
    ("usize", SpecType::Integer),
];

/// The schema shape one field resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecField {
    Primitive {
        kind: SpecType,
        format: Option<&'static str>,
    },
    /// A `$ref` to the definition with this identifier.
    Reference(String),
    /// An array; the items are a primitive, a reference, an opaque object or
    /// unset, never another array or map.
    Array(Box<SpecField>),
    /// An object whose values all share one shape.
    Map(Box<SpecField>),
    /// Opaque fallback for shapes the schema language cannot express.
    Object,
    /// No known shape; renders as a fragment without `type`.
    Unset,
}

impl SpecField {
    /// Looks `name` up in the primitive table; unknown names are [`SpecField::Unset`].
    pub fn primitive(name: &str) -> Self {
        PRIMITIVES
            .iter()
            .find(|(primitive, _)| *primitive == name)
            .map(|(_, kind)| Self::Primitive {
                kind: *kind,
                format: None,
            })
            .unwrap_or(Self::Unset)
    }

    pub fn timestamp() -> Self {
        Self::Primitive {
            kind: SpecType::String,
            format: Some(TIMESTAMP_FORMAT),
        }
    }

    pub fn reference<S: Into<String>>(name: S) -> Self {
        Self::Reference(name.into())
    }

    pub fn array(items: SpecField) -> Self {
        Self::Array(Box::new(items))
    }

    pub fn map(values: SpecField) -> Self {
        Self::Map(Box::new(values))
    }

    pub fn is_valid(&self) -> bool {
        !matches!(self, Self::Unset)
    }

    /// Converts the shape into a property fragment carrying `description`.
    ///
    /// Reference fragments only carry the description under
    /// [`ReferenceDescriptions::Keep`]. Array items and map values never
    /// carry one.
    pub fn to_schema_prop(&self, description: &str, policy: ReferenceDescriptions) -> Schema {
        let mut schema = self.fragment(policy);

        let describe = match self {
            Self::Reference(_) => policy == ReferenceDescriptions::Keep,
            _ => true,
        };
        if describe {
            schema.description = non_empty(description);
        }

        schema
    }

    fn fragment(&self, policy: ReferenceDescriptions) -> Schema {
        match self {
            Self::Primitive { kind, format } => Schema {
                schema_type: Some(kind.to_string()),
                format: format.map(str::to_string),
                ..Schema::default()
            },
            Self::Reference(name) => Schema {
                reference: Some(format!("{REF_PREFIX}{name}")),
                ..Schema::default()
            },
            Self::Array(items) => Schema {
                schema_type: Some(SpecType::Array.to_string()),
                items: Some(Box::new(items.fragment(policy))),
                ..Schema::default()
            },
            Self::Map(values) => Schema {
                schema_type: Some(SpecType::Object.to_string()),
                additional_properties: values
                    .is_valid()
                    .then(|| Box::new(values.fragment(policy))),
                ..Schema::default()
            },
            Self::Object => Schema {
                schema_type: Some(SpecType::Object.to_string()),
                ..Schema::default()
            },
            Self::Unset => Schema::default(),
        }
    }
}
