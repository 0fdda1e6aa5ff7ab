//! Scenario units driven by TOML fixtures.
//!
//! A scenario is a self-contained compilation unit for the engine: source
//! text, the types that exist in it, and the static type of each identifier.
//! Scenarios stand in for a real compiler front end in the CLI and in tests.
//!
//! # Architecture
//!
//! ```text
//! TOML text
//!   ↓ serde (DTO layer)
//! dto types
//!   ↓ validate + convert
//! Scenario (source + comparisons + TypeTable)
//!   ↓ Scenario::unit()
//! AnalysisUnit → Driver
//! ```
//!
//! Source text may wrap regions in `[|` ... `|]` markers. Markers are
//! stripped before analysis; the marked spans are kept on the scenario so
//! tests can assert where diagnostics land.

use crate::driver::AnalysisUnit;
use crate::semantic::TypeTable;
use crate::syntax::{BinaryExpr, Span};
use std::path::{Path, PathBuf};

pub mod dto;
pub mod loader;
pub mod scan;

/// Errors from parsing and validating scenario files.
#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    /// IO error reading a scenario file.
    #[error("Failed to read scenario {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// TOML deserialization failed.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A `[|` or `|]` marker without its counterpart.
    #[error("unbalanced diagnostic marker at byte {offset}")]
    UnbalancedMarker {
        /// Byte offset of the stray marker in the raw source.
        offset: usize,
    },

    /// Two type declarations share a qualified name.
    #[error("duplicate type declaration `{name}`")]
    DuplicateType {
        /// The duplicated qualified name.
        name: String,
    },

    /// A type declaration uses an unknown `kind`.
    #[error("type `{name}`: unknown kind `{value}`, expected: class, record, parameter, error")]
    UnknownKind {
        /// The declaring type.
        name: String,
        /// The invalid kind string.
        value: String,
    },

    /// A reference to a type that is not declared in the scenario.
    #[error("{context}: unknown type `{name}`")]
    UnknownType {
        /// Where the reference occurred (e.g., "types[1].base").
        context: String,
        /// The unresolved qualified name.
        name: String,
    },

    /// A type declaration combines fields its kind does not allow.
    #[error("type `{name}`: {reason}")]
    InvalidType {
        /// The declaring type.
        name: String,
        /// What is wrong with the declaration.
        reason: String,
    },
}

/// A loaded scenario: one analyzable compilation unit plus test metadata.
#[derive(Debug)]
pub struct Scenario {
    /// Unit path, for diagnostics. Defaults to the fixture file name.
    pub file: PathBuf,
    /// Source text with markers stripped.
    pub source: String,
    /// Comparisons found in the source, in source order.
    pub comparisons: Vec<BinaryExpr>,
    /// Semantic model declared by the fixture.
    pub table: TypeTable,
    /// Spans that were wrapped in `[|` ... `|]`, relative to the clean source.
    pub marked_spans: Vec<Span>,
    /// Whether the unit represents generated code.
    pub generated: bool,
}

impl Scenario {
    /// Views this scenario as a driver input.
    #[must_use]
    pub fn unit(&self) -> AnalysisUnit<'_> {
        AnalysisUnit {
            file: &self.file,
            source: &self.source,
            comparisons: &self.comparisons,
            model: &self.table,
            generated: self.generated,
        }
    }
}

/// Parses scenario TOML and builds a validated [`Scenario`].
///
/// `file` names the resulting unit in diagnostics.
///
/// # Errors
///
/// Returns an error if TOML parsing or validation fails.
pub fn load_str(content: &str, file: impl Into<PathBuf>) -> Result<Scenario, ScenarioError> {
    let dto: dto::ScenarioDto = toml::from_str(content)?;
    loader::load(dto, file.into())
}

/// Reads and loads a scenario file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed or validated.
pub fn load_file(path: &Path) -> Result<Scenario, ScenarioError> {
    let content = std::fs::read_to_string(path).map_err(|e| ScenarioError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    load_str(&content, path)
}
