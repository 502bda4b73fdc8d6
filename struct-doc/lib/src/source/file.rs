use std::path::{Path, PathBuf};

use crate::error::SourceError;
use crate::source::decl::{DeclScope, MethodScope, TypeDecl};

/// Represents a parsed Rust source file backed by `syn`.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Path the file was read from (or the in-memory location name).
    pub file: PathBuf,
    syntax: syn::File,
}

/// Type declarations and method scopes collected from one file.
#[derive(Debug, Clone, Default)]
pub struct FileDeclarations {
    pub types: Vec<TypeDecl>,
    pub methods: Vec<MethodScope>,
}

impl SourceFile {
    /// Creates a new `SourceFile` by reading and parsing the file on disk.
    ///
    /// ## Errors
    /// Returns an error if the file cannot be read or is not valid Rust.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, SourceError> {
        let file = path.as_ref().to_path_buf();
        let source = std::fs::read_to_string(&file).map_err(|source| SourceError::Io {
            path: file.clone(),
            source,
        })?;

        Self::from_source(file, &source)
    }

    /// Parses already-loaded source text.
    ///
    /// ## Errors
    /// Returns an error if the text is not valid Rust.
    pub fn from_source<P: Into<PathBuf>>(path: P, source: &str) -> Result<Self, SourceError> {
        let file = path.into();
        let syntax = syn::parse_file(source).map_err(|source| SourceError::Parse {
            path: file.clone(),
            source,
        })?;

        Ok(Self { file, syntax })
    }

    /// Collects every type declaration in the file, descending into inline
    /// modules, plus the struct declarations found directly inside method
    /// bodies of `impl` blocks.
    pub fn declarations(&self, unit: &str) -> FileDeclarations {
        let mut out = FileDeclarations::default();
        collect_items(&self.syntax.items, unit, &mut out);
        out
    }
}

fn collect_items(items: &[syn::Item], unit: &str, out: &mut FileDeclarations) {
    for item in items {
        match item {
            syn::Item::Mod(module) => {
                if let Some((_, content)) = &module.content {
                    collect_items(content, unit, out);
                }
            }
            syn::Item::Impl(block) => {
                let Some(owner) = impl_owner(&block.self_ty) else {
                    continue;
                };
                for impl_item in &block.items {
                    if let syn::ImplItem::Fn(method) = impl_item {
                        out.methods.push(method_scope(&owner, method, unit));
                    }
                }
            }
            _ => {
                if let Some(decl) = TypeDecl::from_item(item, unit, DeclScope::Module) {
                    out.types.push(decl);
                }
            }
        }
    }
}

fn method_scope(owner: &str, method: &syn::ImplItemFn, unit: &str) -> MethodScope {
    let name = method.sig.ident.to_string();
    let scope = DeclScope::Method {
        owner: owner.to_string(),
        method: name.clone(),
    };

    let locals = method
        .block
        .stmts
        .iter()
        .filter_map(|stmt| match stmt {
            syn::Stmt::Item(item) => TypeDecl::from_item(item, unit, scope.clone()),
            _ => None,
        })
        .collect();

    MethodScope {
        owner: owner.to_string(),
        method: name,
        locals,
    }
}

/// Name of the type an `impl` block is attached to, e.g. `Handler` for
/// `impl<T> Service for Handler<T>`.
fn impl_owner(self_ty: &syn::Type) -> Option<String> {
    match self_ty {
        syn::Type::Path(path) => path
            .path
            .segments
            .last()
            .map(|segment| segment.ident.to_string()),
        syn::Type::Paren(inner) => impl_owner(&inner.elem),
        syn::Type::Group(inner) => impl_owner(&inner.elem),
        _ => None,
    }
}
