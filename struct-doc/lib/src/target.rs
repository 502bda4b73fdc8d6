//! Descriptors for the types and fields under resolution.

use tracing::debug;

use crate::comment::CommentKey;
use crate::source::{DeclScope, FieldDecl, Shape, SourceModel, StructRef, TypeDecl, TypeExpr};
use crate::spec_field::SpecField;
use crate::tag::tag_name;

/// A declaration picked by name, before we know whether it is a struct.
#[derive(Debug, Clone, Copy)]
pub struct TargetType<'m> {
    pub decl: &'m TypeDecl,
}

impl<'m> TargetType<'m> {
    pub fn new(decl: &'m TypeDecl) -> Self {
        Self { decl }
    }

    pub fn name(&self) -> &'m str {
        &self.decl.name
    }

    pub fn is_named_type(&self) -> bool {
        self.decl.is_named_type()
    }

    /// The struct this declaration resolves to, if it is struct-shaped.
    pub fn to_target_struct(&self, model: &'m SourceModel) -> Option<TargetStruct<'m>> {
        match model.decl_shape(self.decl) {
            Shape::Struct(found) => Some(TargetStruct::from(found)),
            _ => None,
        }
    }
}

/// A struct whose fields become the properties of one definition.
///
/// The definition is named after `origin`; the fields come from `body`.
/// They differ for newtypes such as `struct Admin(User)`.
#[derive(Debug, Clone, Copy)]
pub struct TargetStruct<'m> {
    pub origin: &'m TypeDecl,
    pub body: &'m TypeDecl,
}

impl<'m> From<StructRef<'m>> for TargetStruct<'m> {
    fn from(found: StructRef<'m>) -> Self {
        Self {
            origin: found.origin,
            body: found.body,
        }
    }
}

impl<'m> TargetStruct<'m> {
    /// Identifier of the resulting definition.
    pub fn name(&self) -> &'m str {
        &self.origin.name
    }

    pub fn is_named_type(&self) -> bool {
        self.origin.is_named_type()
    }

    pub fn fields(&self) -> &'m [FieldDecl] {
        self.body.fields()
    }

    /// Key of the struct-level comment.
    pub fn comment_key(&self) -> CommentKey {
        CommentKey::for_struct(&self.origin.unit, &self.origin.name)
            .in_scope(self.origin.scope.clone())
    }

    /// Type expression of `field` as seen from this struct.
    pub fn field_type(&self, field: &'m FieldDecl) -> TypeExpr<'m> {
        TypeExpr {
            ty: &field.ty,
            origin: self.body,
        }
    }
}

/// One field on its way to becoming a property.
#[derive(Debug, Clone)]
pub struct TargetField<'m> {
    pub unit: String,
    pub scope: DeclScope,
    pub owner: String,
    pub name: String,
    pub tag: String,
    /// Element still to be resolved, for pointer, slice and map fields.
    pub elem: Option<TypeExpr<'m>>,
    pub is_array: bool,
    pub is_map: bool,
    pub spec_field: SpecField,
}

impl<'m> TargetField<'m> {
    pub fn new(owner: &TargetStruct<'m>, field: &FieldDecl) -> Self {
        Self {
            unit: owner.body.unit.clone(),
            scope: owner.body.scope.clone(),
            owner: owner.body.name.clone(),
            name: field.name.clone(),
            tag: field.tag.clone(),
            elem: None,
            is_array: false,
            is_map: false,
            spec_field: SpecField::Unset,
        }
    }

    pub fn with_spec(mut self, spec_field: SpecField) -> Self {
        self.spec_field = spec_field;
        self
    }

    pub fn with_elem(mut self, elem: TypeExpr<'m>) -> Self {
        self.elem = Some(elem);
        self
    }

    pub fn array(mut self) -> Self {
        self.is_array = true;
        self
    }

    pub fn map(mut self) -> Self {
        self.is_map = true;
        self
    }

    /// Wraps a resolved element shape the way this field holds it.
    pub fn wrap(&self, elem: SpecField) -> SpecField {
        if self.is_map {
            SpecField::map(elem)
        } else if self.is_array {
            SpecField::array(elem)
        } else {
            elem
        }
    }

    pub fn comment_key(&self) -> CommentKey {
        CommentKey::for_field(&self.unit, &self.owner, &self.name).in_scope(self.scope.clone())
    }

    /// Property name: the tag's rename under `tag_key`, else the field name.
    ///
    /// Malformed tags fall back to the field name.
    pub fn canonical_field_name(&self, tag_key: &str) -> String {
        match tag_name(&self.tag, tag_key) {
            Ok(Some(renamed)) => renamed,
            Ok(None) => self.name.clone(),
            Err(err) => {
                debug!(owner = %self.owner, field = %self.name, error = %err, "Ignoring malformed tag");
                self.name.clone()
            }
        }
    }
}
