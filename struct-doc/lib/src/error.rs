use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading a source location into a compilation unit.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Source location `{path}` does not exist")]
    NotFound { path: PathBuf },

    #[error("Failed to read `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse `{path}`: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: syn::Error,
    },

    #[error("No Rust source files found in `{path}`")]
    NoSourceFiles { path: PathBuf },

    #[error("Unknown in-memory location `{location}`")]
    UnknownLocation { location: String },

    #[error("Ignore error: {0}")]
    Ignore(#[from] ignore::Error),
}

/// Errors emitted by struct-doc operations.
///
/// Only loading is fatal. Anything that goes wrong while resolving a type
/// degrades to an opaque or empty schema fragment instead of an error.
#[derive(Debug, Error)]
pub enum StructDocError {
    /// One or more requested locations could not be loaded or parsed.
    ///
    /// `locations` lists every failing location; `source` is the first failure.
    #[error("Failed to load source locations [{}]: {source}", locations.join(", "))]
    SourceLoad {
        locations: Vec<String>,
        #[source]
        source: SourceError,
    },

    /// The name filter is not a valid regular expression.
    #[error("Invalid name filter `{pattern}`: {source}")]
    InvalidFilter {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Convenience Result type for struct-doc operations.
pub type Result<T> = std::result::Result<T, StructDocError>;
