use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use tracing::debug;

use crate::error::SourceError;
use crate::source::decl::{MethodScope, TypeDecl};
use crate::source::file::SourceFile;

/// A **SourceUnit** is one compilation unit: a single `.rs` file or every
/// `.rs` file below a directory.
///
/// Declarations are indexed by name. When two files declare the same name
/// the first one (in sorted path order) wins.
#[derive(Debug, Clone)]
pub struct SourceUnit {
    /// Stable identity of the unit; the canonical location path for units
    /// loaded from disk.
    pub id: String,
    /// Files that make up the unit, sorted.
    pub files: Vec<PathBuf>,
    decls: BTreeMap<String, TypeDecl>,
    methods: Vec<MethodScope>,
}

impl SourceUnit {
    /// Loads a file or directory from disk.
    ///
    /// ## Errors
    /// Returns an error if the location does not exist or cannot be
    /// resolved, a directory holds no `.rs` files, or any file fails to
    /// read or parse.
    pub fn load<P: AsRef<Path>>(location: P) -> Result<Self, SourceError> {
        let location = location.as_ref();
        let root = location.canonicalize().map_err(|source| match source.kind() {
            std::io::ErrorKind::NotFound => SourceError::NotFound {
                path: location.to_path_buf(),
            },
            _ => SourceError::Io {
                path: location.to_path_buf(),
                source,
            },
        })?;

        let paths = if root.is_dir() {
            rust_files(&root)?
        } else {
            vec![root.clone()]
        };

        let files = paths
            .iter()
            .map(SourceFile::new)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::from_files(root.display().to_string(), files))
    }

    /// Builds a unit from already-parsed files.
    pub fn from_files<S: Into<String>>(id: S, files: Vec<SourceFile>) -> Self {
        let id = id.into();
        let mut decls = BTreeMap::new();
        let mut methods = Vec::new();

        for file in &files {
            let found = file.declarations(&id);
            for decl in found.types {
                if decls.contains_key(&decl.name) {
                    debug!(unit = %id, name = %decl.name, file = %file.file.display(), "Duplicate declaration ignored");
                    continue;
                }
                decls.insert(decl.name.clone(), decl);
            }
            methods.extend(found.methods);
        }

        Self {
            id,
            files: files.into_iter().map(|file| file.file).collect(),
            decls,
            methods,
        }
    }

    /// Top-level declared names in ascending order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.decls.keys().map(String::as_str)
    }

    /// Finds a top-level declaration by name.
    pub fn lookup(&self, name: &str) -> Option<&TypeDecl> {
        self.decls.get(name)
    }

    /// Every declaration in the unit: top-level ones first, then the
    /// method-local ones.
    pub fn declarations(&self) -> impl Iterator<Item = &TypeDecl> {
        self.decls
            .values()
            .chain(self.methods.iter().flat_map(|scope| scope.locals.iter()))
    }

    /// Methods declared for `owner` across all of its `impl` blocks.
    pub fn methods_of<'a>(&'a self, owner: &'a str) -> impl Iterator<Item = &'a MethodScope> {
        self.methods.iter().filter(move |scope| scope.owner == owner)
    }

    /// Finds a struct declared inside the body of `owner::method`.
    pub fn method_local(&self, owner: &str, method: &str, name: &str) -> Option<&TypeDecl> {
        self.methods
            .iter()
            .filter(|scope| scope.owner == owner && scope.method == method)
            .flat_map(|scope| scope.locals.iter())
            .find(|decl| decl.name == name)
    }
}

fn rust_files(root: &Path) -> Result<Vec<PathBuf>, SourceError> {
    let mut files = Vec::new();
    let walker = WalkBuilder::new(root).standard_filters(true).build();

    for entry in walker {
        let entry = entry?;

        let is_file = entry
            .file_type()
            .map(|file| file.is_file())
            .unwrap_or(false);

        if !is_file || entry.path().extension().and_then(|ext| ext.to_str()) != Some("rs") {
            continue;
        }

        files.push(entry.into_path());
    }

    files.sort();

    if files.is_empty() {
        return Err(SourceError::NoSourceFiles {
            path: root.to_path_buf(),
        });
    }

    Ok(files)
}
