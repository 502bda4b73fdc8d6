use std::collections::{HashMap, HashSet};

use crate::source::{DeclScope, SourceUnit};

/// Identifies the documentation of a struct (`field == None`) or of one of
/// its fields, within one compilation unit.
///
/// `scope` keeps a method-local struct apart from a module-level struct of
/// the same name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommentKey {
    pub unit: String,
    pub scope: DeclScope,
    pub owner: String,
    pub field: Option<String>,
}

impl CommentKey {
    pub fn for_struct<U: Into<String>, O: Into<String>>(unit: U, owner: O) -> Self {
        Self {
            unit: unit.into(),
            scope: DeclScope::Module,
            owner: owner.into(),
            field: None,
        }
    }

    pub fn for_field<U, O, F>(unit: U, owner: O, field: F) -> Self
    where
        U: Into<String>,
        O: Into<String>,
        F: Into<String>,
    {
        Self {
            unit: unit.into(),
            scope: DeclScope::Module,
            owner: owner.into(),
            field: Some(field.into()),
        }
    }

    /// Moves the key into the scope the owner was declared in.
    pub fn in_scope(mut self, scope: DeclScope) -> Self {
        self.scope = scope;
        self
    }
}

/// Doc comments of structs and struct fields, loaded per compilation unit.
#[derive(Debug, Default)]
pub struct CommentRegistry {
    loaded_units: HashSet<String>,
    registry: HashMap<CommentKey, String>,
}

impl CommentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the struct and field comments of `unit`.
    ///
    /// Loading a unit whose id was already loaded is a no-op.
    pub fn load(&mut self, unit: &SourceUnit) {
        if !self.loaded_units.insert(unit.id.clone()) {
            return;
        }

        for decl in unit.declarations() {
            if let Some(doc) = decl.doc.as_ref().filter(|doc| !doc.is_empty()) {
                self.registry.insert(
                    CommentKey::for_struct(&unit.id, &decl.name).in_scope(decl.scope.clone()),
                    doc.clone(),
                );
            }

            for field in decl.fields() {
                if let Some(doc) = field.doc.as_ref().filter(|doc| !doc.is_empty()) {
                    self.registry.insert(
                        CommentKey::for_field(&unit.id, &decl.name, &field.name)
                            .in_scope(decl.scope.clone()),
                        doc.clone(),
                    );
                }
            }
        }
    }

    pub fn is_loaded(&self, unit_id: &str) -> bool {
        self.loaded_units.contains(unit_id)
    }

    /// Returns the comment text for `key`, or an empty string.
    pub fn lookup(&self, key: &CommentKey) -> &str {
        self.registry.get(key).map(String::as_str).unwrap_or_default()
    }
}
