//! The source model: parsed Rust declarations and their underlying shapes.

pub mod decl;
pub mod file;
pub mod model;
pub mod provider;
pub mod unit;

pub use decl::{DeclKind, DeclScope, FieldDecl, MethodScope, TypeDecl};
pub use file::{FileDeclarations, SourceFile};
pub use model::{Shape, SourceModel, StructRef, TypeExpr};
pub use provider::{FileSystemProvider, MemoryProvider, SourceProvider};
pub use unit::SourceUnit;
