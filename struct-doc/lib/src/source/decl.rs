use tracing::debug;

use crate::tag::{render_tag, skip_meta_value};

/// A type declaration discovered in a compilation unit.
#[derive(Debug, Clone)]
pub struct TypeDecl {
    /// The declared identifier (e.g. `Order`).
    pub name: String,
    /// Id of the compilation unit that declares this type.
    pub unit: String,
    /// Doc comment text, one line per `///` line, if any.
    pub doc: Option<String>,
    pub kind: DeclKind,
    pub scope: DeclScope,
}

/// The syntactic form of a declaration.
#[derive(Debug, Clone)]
pub enum DeclKind {
    /// A struct with named fields, or a unit struct (no fields).
    Struct(Vec<FieldDecl>),
    /// A tuple struct; a single element makes it a newtype.
    Tuple(Vec<syn::Type>),
    /// A `type Name = Target;` alias.
    Alias(syn::Type),
    Enum,
    Trait,
}

/// Where a declaration lives.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DeclScope {
    /// Module level, including inline `mod { }` blocks.
    Module,
    /// Declared as a statement inside a method body of `owner`.
    Method { owner: String, method: String },
}

/// A named field of a struct declaration.
#[derive(Debug, Clone)]
pub struct FieldDecl {
    pub name: String,
    /// `true` for plain `pub` visibility.
    pub exported: bool,
    /// `true` when the field carries `#[serde(flatten)]`.
    pub embedded: bool,
    /// Non-doc attributes rendered as source text, e.g. `#[serde(rename = "id")]`.
    pub tag: String,
    pub ty: syn::Type,
    pub doc: Option<String>,
}

/// The struct declarations found directly inside one method body.
#[derive(Debug, Clone)]
pub struct MethodScope {
    /// The `impl` self type the method belongs to.
    pub owner: String,
    pub method: String,
    pub locals: Vec<TypeDecl>,
}

impl TypeDecl {
    /// Builds a declaration from a parsed item, or `None` for items that
    /// do not declare a type.
    pub fn from_item(item: &syn::Item, unit: &str, scope: DeclScope) -> Option<Self> {
        let (name, attrs, kind) = match item {
            syn::Item::Struct(item) => {
                let kind = match &item.fields {
                    syn::Fields::Named(named) => {
                        DeclKind::Struct(named.named.iter().filter_map(FieldDecl::from_field).collect())
                    }
                    syn::Fields::Unnamed(unnamed) => {
                        DeclKind::Tuple(unnamed.unnamed.iter().map(|field| field.ty.clone()).collect())
                    }
                    syn::Fields::Unit => DeclKind::Struct(Vec::new()),
                };
                (&item.ident, &item.attrs, kind)
            }
            syn::Item::Type(item) => (&item.ident, &item.attrs, DeclKind::Alias((*item.ty).clone())),
            syn::Item::Enum(item) => (&item.ident, &item.attrs, DeclKind::Enum),
            syn::Item::Trait(item) => (&item.ident, &item.attrs, DeclKind::Trait),
            _ => return None,
        };

        Some(Self {
            name: strip_raw_prefix(&name.to_string()).to_string(),
            unit: unit.to_string(),
            doc: doc_comment(attrs),
            kind,
            scope,
        })
    }

    /// Fields of a struct declaration; empty for every other kind.
    pub fn fields(&self) -> &[FieldDecl] {
        match &self.kind {
            DeclKind::Struct(fields) => fields,
            _ => &[],
        }
    }

    /// Whether the declaration introduces a nominal type that schemas can
    /// reference by name.
    pub fn is_named_type(&self) -> bool {
        matches!(self.kind, DeclKind::Struct(_) | DeclKind::Tuple(_))
    }
}

impl FieldDecl {
    fn from_field(field: &syn::Field) -> Option<Self> {
        let ident = field.ident.as_ref()?;
        let tag_attrs: Vec<_> = field
            .attrs
            .iter()
            .filter(|attr| !attr.path().is_ident("doc"))
            .collect();

        Some(Self {
            name: strip_raw_prefix(&ident.to_string()).to_string(),
            exported: matches!(field.vis, syn::Visibility::Public(_)),
            embedded: tag_attrs.iter().any(|attr| is_flatten(attr, ident)),
            tag: render_tag(tag_attrs.iter().copied()),
            ty: field.ty.clone(),
            doc: doc_comment(&field.attrs),
        })
    }
}

/// Joins `///` doc lines, dropping the single leading space rustdoc adds.
pub(crate) fn doc_comment(attrs: &[syn::Attribute]) -> Option<String> {
    let mut lines = Vec::new();

    for attr in attrs {
        if attr.path().is_ident("doc")
            && let syn::Meta::NameValue(meta) = &attr.meta
            && let syn::Expr::Lit(syn::ExprLit {
                lit: syn::Lit::Str(text),
                ..
            }) = &meta.value
        {
            let line = text.value();
            lines.push(line.strip_prefix(' ').unwrap_or(&line).to_string());
        }
    }

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

/// Malformed `serde` attributes count as not flattened.
fn is_flatten(attr: &syn::Attribute, field: &syn::Ident) -> bool {
    if !attr.path().is_ident("serde") {
        return false;
    }

    let mut flatten = false;
    let parsed = attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("flatten") {
            flatten = true;
        }
        skip_meta_value(&meta)
    });
    if let Err(err) = parsed {
        debug!(field = %field, error = %err, "Ignoring malformed serde attribute");
    }
    flatten
}

fn strip_raw_prefix(ident: &str) -> &str {
    ident.strip_prefix("r#").unwrap_or(ident)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decl(source: &str) -> TypeDecl {
        let item: syn::Item = syn::parse_str(source).unwrap();
        TypeDecl::from_item(&item, "unit", DeclScope::Module).unwrap()
    }

    #[test]
    fn captures_struct_fields_and_docs() {
        let decl = decl(
            r#"
            /// @title Order
            /// An order.
            pub struct Order {
                /// Order id
                #[serde(rename = "id")]
                pub id: String,
                total: f64,
            }
            "#,
        );

        assert_eq!(decl.name, "Order");
        assert_eq!(decl.doc.as_deref(), Some("@title Order\nAn order."));
        assert!(decl.is_named_type());

        let fields = decl.fields();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].name, "id");
        assert!(fields[0].exported);
        assert!(!fields[0].embedded);
        assert_eq!(fields[0].doc.as_deref(), Some("Order id"));
        assert!(fields[0].tag.contains("rename"));
        assert!(!fields[0].tag.contains("doc"));
        assert!(!fields[1].exported);
    }

    #[test]
    fn detects_flattened_fields() {
        let decl = decl(
            r#"
            struct Wrapper {
                #[serde(default, flatten)]
                pub base: Base,
                #[serde(rename = "x", skip_serializing_if = "Option::is_none")]
                pub other: Option<String>,
            }
            "#,
        );

        assert!(decl.fields()[0].embedded);
        assert!(!decl.fields()[1].embedded);
    }

    #[tracing_test::traced_test]
    #[test]
    fn malformed_serde_attribute_is_logged() {
        let decl = decl(
            r#"
            struct Wrapper {
                #[serde("flatten")]
                pub base: Base,
            }
            "#,
        );

        assert!(!decl.fields()[0].embedded);
        assert!(logs_contain("Ignoring malformed serde attribute"));
    }

    #[test]
    fn restricted_visibility_is_not_exported() {
        let decl = decl("struct S { pub(crate) a: String, pub b: String }");
        assert!(!decl.fields()[0].exported);
        assert!(decl.fields()[1].exported);
    }

    #[test]
    fn classifies_other_item_kinds() {
        assert!(matches!(decl("struct Id(String);").kind, DeclKind::Tuple(ref tys) if tys.len() == 1));
        assert!(matches!(decl("struct Marker;").kind, DeclKind::Struct(ref f) if f.is_empty()));
        assert!(matches!(decl("type Alias = Order;").kind, DeclKind::Alias(_)));
        assert!(matches!(decl("enum Status { A, B }").kind, DeclKind::Enum));
        assert!(matches!(decl("trait Handler {}").kind, DeclKind::Trait));
        assert!(!decl("type Alias = Order;").is_named_type());
    }

    #[test]
    fn strips_raw_identifier_prefix() {
        let decl = decl("struct S { pub r#type: String }");
        assert_eq!(decl.fields()[0].name, "type");
    }

    #[test]
    fn ignores_non_type_items() {
        let item: syn::Item = syn::parse_str("fn helper() {}").unwrap();
        assert!(TypeDecl::from_item(&item, "unit", DeclScope::Module).is_none());
    }
}
