use std::collections::BTreeMap;

use crate::error::{SourceError, StructDocError};
use crate::source::file::SourceFile;
use crate::source::unit::SourceUnit;

/// Turns opaque location strings into parsed compilation units.
pub trait SourceProvider {
    /// Loads one location.
    ///
    /// ## Errors
    /// Returns the reason the location could not be loaded.
    fn load_unit(&self, location: &str) -> Result<SourceUnit, SourceError>;

    /// Loads every location, skipping units whose id was already loaded.
    ///
    /// ## Errors
    /// Returns [`StructDocError::SourceLoad`] naming every location that
    /// failed, carrying the first failure as its source.
    fn load(&self, locations: &[&str]) -> Result<Vec<SourceUnit>, StructDocError> {
        let mut units: Vec<SourceUnit> = Vec::new();
        let mut failed = Vec::new();
        let mut first_error = None;

        for location in locations {
            match self.load_unit(location) {
                Ok(unit) => {
                    if !units.iter().any(|loaded| loaded.id == unit.id) {
                        units.push(unit);
                    }
                }
                Err(err) => {
                    failed.push((*location).to_string());
                    first_error.get_or_insert(err);
                }
            }
        }

        match first_error {
            Some(source) => Err(StructDocError::SourceLoad {
                locations: failed,
                source,
            }),
            None => Ok(units),
        }
    }
}

/// Loads locations as file or directory paths on disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSystemProvider;

impl SourceProvider for FileSystemProvider {
    fn load_unit(&self, location: &str) -> Result<SourceUnit, SourceError> {
        SourceUnit::load(location)
    }
}

/// Serves locations from source text held in memory.
///
/// ## Examples
///
/// ```
/// use struct_doc_lib::{MemoryProvider, SourceProvider};
///
/// let provider = MemoryProvider::new()
///     .with_file("shop", "order.rs", "pub struct Order { pub id: String }");
/// let units = provider.load(&["shop"]).unwrap();
/// assert_eq!(units[0].names().collect::<Vec<_>>(), vec!["Order"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    locations: BTreeMap<String, Vec<(String, String)>>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file to a location, creating the location on first use.
    pub fn with_file<L, P, S>(mut self, location: L, path: P, source: S) -> Self
    where
        L: Into<String>,
        P: Into<String>,
        S: Into<String>,
    {
        self.locations
            .entry(location.into())
            .or_default()
            .push((path.into(), source.into()));
        self
    }
}

impl SourceProvider for MemoryProvider {
    fn load_unit(&self, location: &str) -> Result<SourceUnit, SourceError> {
        let files = self
            .locations
            .get(location)
            .ok_or_else(|| SourceError::UnknownLocation {
                location: location.to_string(),
            })?;

        let parsed = files
            .iter()
            .map(|(path, source)| SourceFile::from_source(path.as_str(), source))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SourceUnit::from_files(location, parsed))
    }
}
