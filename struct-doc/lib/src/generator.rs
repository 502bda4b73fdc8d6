//! The resolution engine.
//!
//! Every struct whose name matches the filter becomes one definition, and
//! so does every struct reachable from it through fields. A struct is
//! processed at most once per run, keyed by its name, which also breaks
//! reference cycles.

use std::collections::{BTreeMap, HashSet};

use regex::Regex;
use tracing::{debug, info, warn};

use crate::comment::CommentRegistry;
use crate::config::GeneratorConfig;
use crate::error::{Result, StructDocError};
use crate::metadata::{DESCRIPTION_ATTR, MetadataParser, TITLE_ATTR};
use crate::registry::SpecRegistry;
use crate::schema::Schema;
use crate::source::{DeclScope, FileSystemProvider, Shape, SourceModel, SourceProvider, TypeDecl};
use crate::spec_field::SpecField;
use crate::target::{TargetField, TargetStruct, TargetType};

/// Produces schema definitions for the structs found at some locations.
pub trait Generator {
    /// Documents every struct whose name matches `filter`.
    ///
    /// ## Returns
    /// The definitions in ascending identifier order, without duplicates.
    ///
    /// ## Errors
    /// Returns [`StructDocError::SourceLoad`] when any location fails to load.
    fn document_struct(&self, filter: &Regex, locations: &[&str]) -> Result<Vec<Schema>>;
}

/// Generates OpenAPI component schemas from Rust structs.
///
/// ## Examples
///
/// ```
/// use regex::Regex;
/// use struct_doc_lib::{Generator, MemoryProvider, OpenapiGenerator};
///
/// let provider = MemoryProvider::new().with_file(
///     "shop",
///     "order.rs",
///     "pub struct Order { pub id: String, pub total: f64 }",
/// );
/// let schemas = OpenapiGenerator::with_provider(provider)
///     .document_struct(&Regex::new("Order").unwrap(), &["shop"])
///     .unwrap();
///
/// assert_eq!(schemas[0].id(), "Order");
/// assert_eq!(schemas[0].properties.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct OpenapiGenerator<P = FileSystemProvider> {
    provider: P,
    config: GeneratorConfig,
}

impl OpenapiGenerator<FileSystemProvider> {
    /// A generator reading locations from disk.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<P: SourceProvider> OpenapiGenerator<P> {
    pub fn with_provider(provider: P) -> Self {
        Self {
            provider,
            config: GeneratorConfig::default(),
        }
    }

    pub fn config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self
    }
}

impl<P: SourceProvider> Generator for OpenapiGenerator<P> {
    fn document_struct(&self, filter: &Regex, locations: &[&str]) -> Result<Vec<Schema>> {
        let units = self.provider.load(locations)?;
        let model = SourceModel::new(units);
        let mut resolution = Resolution::new(&model, &self.config, filter);

        for unit in model.units() {
            resolution.comments.load(unit);

            for name in unit.names().filter(|name| filter.is_match(name)) {
                if let Some(decl) = unit.lookup(name) {
                    resolution.process_type(TargetType::new(decl));
                }
            }
        }

        Ok(resolution.registry.values())
    }
}

/// Documents the structs matching `filter` at the given disk locations with
/// the default configuration.
///
/// ## Errors
/// Returns [`StructDocError::InvalidFilter`] if `filter` is not a valid
/// regular expression, or [`StructDocError::SourceLoad`] if any location
/// fails to load.
pub fn document_struct(filter: &str, locations: &[&str]) -> Result<Vec<Schema>> {
    let filter = Regex::new(filter).map_err(|source| StructDocError::InvalidFilter {
        pattern: filter.to_string(),
        source,
    })?;

    OpenapiGenerator::new().document_struct(&filter, locations)
}

/// State of one `document_struct` call.
struct Resolution<'m> {
    model: &'m SourceModel,
    config: &'m GeneratorConfig,
    filter: &'m Regex,
    parser: MetadataParser,
    comments: CommentRegistry,
    processed: HashSet<String>,
    registry: SpecRegistry,
}

impl<'m> Resolution<'m> {
    fn new(model: &'m SourceModel, config: &'m GeneratorConfig, filter: &'m Regex) -> Self {
        Self {
            model,
            config,
            filter,
            parser: MetadataParser::new(),
            comments: CommentRegistry::new(),
            processed: HashSet::new(),
            registry: SpecRegistry::new(),
        }
    }

    fn process_type(&mut self, target: TargetType<'m>) {
        let Some(found) = target.to_target_struct(self.model) else {
            debug!(name = target.name(), "Skipping declaration without struct shape");
            return;
        };

        self.process_target(found);

        // method-local structs cannot own methods themselves
        if self.config.scan_methods && target.is_named_type() && target.decl.scope == DeclScope::Module {
            self.process_struct_methods(target.decl);
        }
    }

    fn process_struct_methods(&mut self, owner: &'m TypeDecl) {
        let (model, filter) = (self.model, self.filter);
        let Some(unit) = model.unit(&owner.unit) else {
            return;
        };

        for scope in unit.methods_of(&owner.name) {
            for local in scope.locals.iter().filter(|local| filter.is_match(&local.name)) {
                debug!(owner = %owner.name, method = %scope.method, name = %local.name, "Found method-local declaration");
                self.process_type(TargetType::new(local));
            }
        }
    }

    fn process_target(&mut self, target: TargetStruct<'m>) {
        if !self.processed.insert(target.name().to_string()) {
            return;
        }

        info!(name = target.name(), unit = %target.origin.unit, "Processing struct");

        if target.is_named_type() {
            self.load_comments(&target.origin.unit);
        }

        let comment = self.comments.lookup(&target.comment_key()).to_string();
        let metadata = self.parser.parse_struct_desc(&comment);

        let mut schema =
            Schema::object(target.name()).with_description(metadata.lookup(DESCRIPTION_ATTR, ""));
        schema.title = Some(metadata.lookup(TITLE_ATTR, target.name()).to_string());

        let mut flattening = vec![target.body.name.as_str()];
        self.collect_properties(&mut schema.properties, target, &mut flattening);

        self.registry.add_schema(schema);
    }

    fn collect_properties(
        &mut self,
        props: &mut BTreeMap<String, Schema>,
        target: TargetStruct<'m>,
        flattening: &mut Vec<&'m str>,
    ) {
        let model = self.model;
        self.load_comments(&target.body.unit);

        for field in target.fields() {
            let ty = target.field_type(field);

            if field.embedded {
                match model.classify(ty) {
                    Shape::Struct(found) => {
                        let inner = TargetStruct::from(found);
                        if flattening.contains(&inner.body.name.as_str()) {
                            debug!(owner = %target.body.name, field = %field.name, "Skipping recursive flatten");
                            continue;
                        }
                        flattening.push(inner.body.name.as_str());
                        self.collect_properties(props, inner, flattening);
                        flattening.pop();
                    }
                    _ => {
                        debug!(owner = %target.body.name, field = %field.name, "Skipping flattened field without struct shape");
                    }
                }
                continue;
            }

            if !field.exported {
                continue;
            }

            let tf = TargetField::new(&target, field);
            match model.classify(ty) {
                Shape::Timestamp => self.map_field(props, tf.with_spec(SpecField::timestamp())),
                Shape::Map(value) => self.resolve_elem(props, tf.with_elem(value).map()),
                Shape::Interface | Shape::Channel => {
                    debug!(owner = %tf.owner, field = %tf.name, "Falling back to object for opaque field");
                    self.map_field(props, tf.with_spec(SpecField::Object));
                }
                Shape::Struct(found) => {
                    let nested = TargetStruct::from(found);
                    self.map_field(props, tf.with_spec(SpecField::reference(nested.name())));
                    self.process_target(nested);
                }
                Shape::Pointer(elem) => self.resolve_elem(props, tf.with_elem(elem)),
                Shape::Slice(elem) => self.resolve_elem(props, tf.with_elem(elem).array()),
                Shape::Basic(name) => {
                    let spec = SpecField::primitive(&name);
                    if !spec.is_valid() {
                        debug!(owner = %tf.owner, field = %tf.name, primitive = %name, "No schema type for primitive");
                    }
                    self.map_field(props, tf.with_spec(spec));
                }
                Shape::Unresolved(path) => {
                    warn!(owner = %tf.owner, field = %tf.name, path = %path, "Unresolved field type");
                    self.map_field(props, tf);
                }
                Shape::Unknown(reason) => {
                    debug!(owner = %tf.owner, field = %tf.name, reason = %reason, "Unsupported field type");
                    self.map_field(props, tf);
                }
            }
        }
    }

    /// Resolves the element of a pointer, slice or map field.
    fn resolve_elem(&mut self, props: &mut BTreeMap<String, Schema>, mut tf: TargetField<'m>) {
        let model = self.model;
        let Some(elem) = tf.elem else {
            self.map_field(props, tf);
            return;
        };

        match model.classify(elem) {
            Shape::Pointer(inner) => {
                tf.elem = Some(inner);
                self.resolve_elem(props, tf);
            }
            Shape::Struct(found) => {
                let nested = TargetStruct::from(found);
                let spec = tf.wrap(SpecField::reference(nested.name()));
                self.map_field(props, tf.with_spec(spec));
                self.process_target(nested);
            }
            Shape::Basic(name) => {
                let spec = tf.wrap(SpecField::primitive(&name));
                self.map_field(props, tf.with_spec(spec));
            }
            Shape::Timestamp => {
                let spec = tf.wrap(SpecField::timestamp());
                self.map_field(props, tf.with_spec(spec));
            }
            other => {
                if let Shape::Unresolved(path) = &other {
                    warn!(owner = %tf.owner, field = %tf.name, path = %path, "Unresolved element type");
                }
                debug!(owner = %tf.owner, field = %tf.name, "Falling back to object for element");
                let spec = tf.wrap(SpecField::Object);
                self.map_field(props, tf.with_spec(spec));
            }
        }
    }

    fn map_field(&self, props: &mut BTreeMap<String, Schema>, tf: TargetField<'m>) {
        let description = self.comments.lookup(&tf.comment_key()).replace('\n', "");
        let name = tf.canonical_field_name(&self.config.tag_key);

        props.insert(
            name,
            tf.spec_field
                .to_schema_prop(&description, self.config.reference_descriptions),
        );
    }

    fn load_comments(&mut self, unit_id: &str) {
        if let Some(unit) = self.model.unit(unit_id) {
            self.comments.load(unit);
        }
    }
}
