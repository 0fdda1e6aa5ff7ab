//! Context types for rule execution.

use crate::semantic::SemanticModel;
use crate::syntax::Span;
use crate::types::Location;
use std::path::Path;

/// Context provided to rules for one compilation unit.
///
/// Bundles the unit's identity and source with the host's semantic model so a
/// rule can resolve operand types and build diagnostic locations without
/// owning any of it.
#[derive(Clone, Copy)]
pub struct CheckContext<'a> {
    /// Path of the unit, as reported by the host.
    pub file: &'a Path,
    /// Unit source text the expression spans index into.
    pub source: &'a str,
    /// Type information for this unit.
    pub model: &'a dyn SemanticModel,
}

impl<'a> CheckContext<'a> {
    /// Creates a new check context.
    #[must_use]
    pub fn new(file: &'a Path, source: &'a str, model: &'a dyn SemanticModel) -> Self {
        Self {
            file,
            source,
            model,
        }
    }

    /// Builds a diagnostic location for a span in this unit.
    #[must_use]
    pub fn location(&self, span: Span) -> Location {
        Location::from_span(self.file.to_path_buf(), span, self.source)
    }
}

impl std::fmt::Debug for CheckContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckContext")
            .field("file", &self.file)
            .field("source_len", &self.source.len())
            .finish_non_exhaustive()
    }
}
