use quote::ToTokens;

use crate::source::decl::{DeclKind, DeclScope, TypeDecl};
use crate::source::unit::SourceUnit;

/// Alias and newtype chains deeper than this are treated as unresolvable.
const MAX_ALIAS_DEPTH: usize = 32;

const TIMESTAMP_TYPES: &[&str] = &[
    "DateTime",
    "NaiveDateTime",
    "OffsetDateTime",
    "PrimitiveDateTime",
    "SystemTime",
];
const POINTER_TYPES: &[&str] = &["Box", "Rc", "Arc"];
const SLICE_TYPES: &[&str] = &[
    "Vec",
    "VecDeque",
    "LinkedList",
    "HashSet",
    "BTreeSet",
    "IndexSet",
];
const MAP_TYPES: &[&str] = &["HashMap", "BTreeMap", "IndexMap"];
const CHANNEL_TYPES: &[&str] = &[
    "Sender",
    "SyncSender",
    "Receiver",
    "UnboundedSender",
    "UnboundedReceiver",
];
const BASIC_TYPES: &[&str] = &[
    "String", "str", "char", "bool", "f32", "f64", "i8", "i16", "i32", "i64", "i128", "isize",
    "u8", "u16", "u32", "u64", "u128", "usize",
];

/// A type expression together with the declaration it appears in, which
/// decides how names inside it resolve.
#[derive(Debug, Clone, Copy)]
pub struct TypeExpr<'m> {
    pub ty: &'m syn::Type,
    pub origin: &'m TypeDecl,
}

/// A struct-shaped type.
///
/// `origin` is the declaration that was named (a struct or a newtype over
/// one); `body` is the struct declaration whose fields describe the shape.
#[derive(Debug, Clone, Copy)]
pub struct StructRef<'m> {
    pub origin: &'m TypeDecl,
    pub body: &'m TypeDecl,
}

/// Underlying representation of a type, as far as schema generation cares.
#[derive(Debug, Clone)]
pub enum Shape<'m> {
    /// A primitive, by its Rust name (`String`, `u32`, `f64`, ...).
    Basic(String),
    Timestamp,
    Struct(StructRef<'m>),
    Pointer(TypeExpr<'m>),
    Slice(TypeExpr<'m>),
    /// A map; carries the value type.
    Map(TypeExpr<'m>),
    Interface,
    Channel,
    /// A path naming no declaration in any loaded unit.
    Unresolved(String),
    /// Anything else, with a human-readable reason.
    Unknown(String),
}

/// All compilation units loaded for one documentation run.
#[derive(Debug, Clone, Default)]
pub struct SourceModel {
    units: Vec<SourceUnit>,
}

impl SourceModel {
    pub fn new(units: Vec<SourceUnit>) -> Self {
        Self { units }
    }

    /// Units in load order.
    pub fn units(&self) -> &[SourceUnit] {
        &self.units
    }

    pub fn unit(&self, id: &str) -> Option<&SourceUnit> {
        self.units.iter().find(|unit| unit.id == id)
    }

    /// Resolves a type name as seen from `origin`: the enclosing method
    /// scope first, then the declaring unit, then every other unit.
    pub fn lookup(&self, name: &str, origin: &TypeDecl) -> Option<&TypeDecl> {
        let home = self.unit(&origin.unit);

        if let DeclScope::Method { owner, method } = &origin.scope
            && let Some(local) = home.and_then(|unit| unit.method_local(owner, method, name))
        {
            return Some(local);
        }

        home.and_then(|unit| unit.lookup(name)).or_else(|| {
            self.units
                .iter()
                .filter(|unit| unit.id != origin.unit)
                .find_map(|unit| unit.lookup(name))
        })
    }

    /// Underlying shape of a declaration.
    pub fn decl_shape<'m>(&'m self, decl: &'m TypeDecl) -> Shape<'m> {
        self.decl_shape_at(decl, 0)
    }

    /// Underlying shape of a type expression.
    pub fn classify<'m>(&'m self, expr: TypeExpr<'m>) -> Shape<'m> {
        self.classify_type(expr.ty, expr.origin, 0)
    }

    fn decl_shape_at<'m>(&'m self, decl: &'m TypeDecl, depth: usize) -> Shape<'m> {
        if depth > MAX_ALIAS_DEPTH {
            return Shape::Unknown(format!("alias chain too deep at `{}`", decl.name));
        }

        match &decl.kind {
            DeclKind::Struct(_) => Shape::Struct(StructRef {
                origin: decl,
                body: decl,
            }),
            DeclKind::Tuple(types) if types.len() == 1 => {
                match self.classify_type(&types[0], decl, depth + 1) {
                    Shape::Struct(inner) => Shape::Struct(StructRef {
                        origin: decl,
                        body: inner.body,
                    }),
                    other => other,
                }
            }
            DeclKind::Tuple(_) => Shape::Unknown(format!("tuple struct `{}`", decl.name)),
            DeclKind::Alias(target) => self.classify_type(target, decl, depth + 1),
            DeclKind::Enum => Shape::Unknown(format!("enum `{}`", decl.name)),
            DeclKind::Trait => Shape::Interface,
        }
    }

    fn classify_type<'m>(
        &'m self,
        ty: &'m syn::Type,
        origin: &'m TypeDecl,
        depth: usize,
    ) -> Shape<'m> {
        match ty {
            syn::Type::Paren(inner) => self.classify_type(&inner.elem, origin, depth),
            syn::Type::Group(inner) => self.classify_type(&inner.elem, origin, depth),
            // `&[T]` is the slice itself, not a pointer to one
            syn::Type::Reference(reference) => match reference.elem.as_ref() {
                syn::Type::Slice(slice) => Shape::Slice(TypeExpr {
                    ty: &slice.elem,
                    origin,
                }),
                elem => Shape::Pointer(TypeExpr { ty: elem, origin }),
            },
            syn::Type::Ptr(pointer) => Shape::Pointer(TypeExpr {
                ty: &pointer.elem,
                origin,
            }),
            syn::Type::Slice(slice) => Shape::Slice(TypeExpr {
                ty: &slice.elem,
                origin,
            }),
            syn::Type::Array(array) => Shape::Slice(TypeExpr {
                ty: &array.elem,
                origin,
            }),
            syn::Type::TraitObject(_) | syn::Type::ImplTrait(_) => Shape::Interface,
            syn::Type::Path(path) if path.qself.is_none() => {
                self.classify_path(&path.path, origin, depth)
            }
            other => Shape::Unknown(render(other)),
        }
    }

    fn classify_path<'m>(
        &'m self,
        path: &'m syn::Path,
        origin: &'m TypeDecl,
        depth: usize,
    ) -> Shape<'m> {
        let Some(segment) = path.segments.last() else {
            return Shape::Unknown("empty path".to_string());
        };
        let name = segment.ident.to_string();
        let args = generic_types(segment);
        let expr = |index: usize| args.get(index).copied().map(|ty| TypeExpr { ty, origin });

        if TIMESTAMP_TYPES.contains(&name.as_str()) {
            return Shape::Timestamp;
        }

        let wrapped = match name.as_str() {
            "Option" => {
                return match args.first().copied() {
                    Some(inner) => self.classify_type(inner, origin, depth),
                    None => Shape::Unknown(render_path(path)),
                };
            }
            n if POINTER_TYPES.contains(&n) => expr(0).map(Shape::Pointer),
            n if SLICE_TYPES.contains(&n) => expr(0).map(Shape::Slice),
            n if MAP_TYPES.contains(&n) => expr(1).map(Shape::Map),
            n if CHANNEL_TYPES.contains(&n) => Some(Shape::Channel),
            "Value" if path.segments.iter().any(|s| s.ident == "serde_json") => {
                Some(Shape::Interface)
            }
            n if BASIC_TYPES.contains(&n) => Some(Shape::Basic(name.clone())),
            _ => None,
        };

        if let Some(shape) = wrapped {
            return shape;
        }

        // `Self` names the declaration the type is written in
        if path.segments.len() == 1 && name == "Self" {
            return self.decl_shape_at(origin, depth + 1);
        }

        match self.lookup(&name, origin) {
            Some(decl) => self.decl_shape_at(decl, depth + 1),
            None => Shape::Unresolved(render_path(path)),
        }
    }
}

fn generic_types(segment: &syn::PathSegment) -> Vec<&syn::Type> {
    match &segment.arguments {
        syn::PathArguments::AngleBracketed(args) => args
            .args
            .iter()
            .filter_map(|arg| match arg {
                syn::GenericArgument::Type(ty) => Some(ty),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn render(ty: &syn::Type) -> String {
    ty.to_token_stream().to_string()
}

fn render_path(path: &syn::Path) -> String {
    path.to_token_stream().to_string()
}
