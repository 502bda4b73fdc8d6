//! Generates OpenAPI component schemas from the structs of Rust source code.
//!
//! ## Examples
//!
//! ```no_run
//! let schemas = struct_doc_lib::document_struct("Order|LineItem", &["src/model.rs"]).unwrap();
//! println!("{}", serde_json::to_string_pretty(&schemas).unwrap());
//! ```

pub mod comment;
pub mod config;
pub mod error;
pub mod generator;
pub mod metadata;
pub mod registry;
pub mod schema;
pub mod source;
pub mod spec_field;
pub mod tag;
pub mod target;

pub use comment::{CommentKey, CommentRegistry};
pub use config::{GeneratorConfig, ReferenceDescriptions};
pub use error::{Result, SourceError, StructDocError};
pub use generator::{Generator, OpenapiGenerator, document_struct};
pub use metadata::{MetadataParser, StructMetadata};
pub use registry::SpecRegistry;
pub use schema::{Components, Schema};
pub use source::{FileSystemProvider, MemoryProvider, SourceModel, SourceProvider, SourceUnit};
pub use spec_field::{SpecField, SpecType};
pub use tag::{TagEntry, TagError, parse_tag, tag_name};
