//! Rule to flag `==` between records that expose list-typed properties.
//!
//! # Rationale
//!
//! Records get compiler-provided structural equality: `==` compares them
//! member by member. `List<T>` only has reference equality, so two records
//! holding lists with equal contents still compare unequal. An `==` whose
//! operand is such a record is almost always a bug; contents should be
//! compared explicitly instead.
//!
//! A property poisons equality wherever it lives in the inheritance chain,
//! and a generic operand is judged by its record constraints.
//!
//! # Configuration
//!
//! - `deny`: qualified names of property types that poison equality
//!   (default: `["System.Collections.Generic.List"]`)

use record_lint_core::{
    split_qualified, CheckContext, Diagnostic, EqualityExpr, Expr, Rule, RuleConfig, SemanticModel,
    Severity, Suggestion, TypeDef, TypeId, TypeKind,
};
use tracing::warn;

/// Rule code for record-list-equality.
pub const CODE: &str = "RA001";

/// Rule name for record-list-equality.
pub const NAME: &str = "record-list-equality";

const TITLE: &str = "Invalid record usage";
const DESCRIPTION: &str = "Here comes the rule explanation";

/// A property type that poisons record equality, matched by exact simple
/// name and namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeniedContainer {
    namespace: String,
    name: String,
}

impl DeniedContainer {
    /// Creates a denied container from namespace and simple name.
    #[must_use]
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Parses a dotted qualified name. A name without dots lives in the
    /// global namespace. Returns `None` when the simple name is empty.
    #[must_use]
    pub fn parse(qualified: &str) -> Option<Self> {
        let (namespace, name) = split_qualified(qualified);
        if name.is_empty() {
            return None;
        }
        Some(Self::new(namespace, name))
    }

    fn matches(&self, def: &TypeDef) -> bool {
        def.name() == self.name && def.namespace() == self.namespace
    }
}

/// Flags `==` where an operand's record type exposes a denied property.
#[derive(Debug, Clone)]
pub struct RecordListEquality {
    /// Custom severity.
    pub severity: Severity,
    /// Denied property types.
    pub deny: Vec<DeniedContainer>,
}

impl Default for RecordListEquality {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordListEquality {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Error,
            deny: vec![DeniedContainer::new("System.Collections.Generic", "List")],
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Replaces the denied property types.
    #[must_use]
    pub fn deny(mut self, deny: Vec<DeniedContainer>) -> Self {
        self.deny = deny;
        self
    }

    /// Builds the rule from a configuration block.
    ///
    /// Malformed `deny` entries are logged and ignored; an empty or fully
    /// malformed list keeps the default.
    #[must_use]
    pub fn from_config(config: &RuleConfig) -> Self {
        let mut rule = Self::new();

        if let Some(severity) = config.severity {
            rule.severity = severity;
        }

        let entries = config.get_str_array("deny");
        if !entries.is_empty() {
            let deny: Vec<DeniedContainer> = entries
                .iter()
                .filter_map(|entry| {
                    let parsed = DeniedContainer::parse(entry);
                    if parsed.is_none() {
                        warn!("Ignoring malformed deny entry: {entry:?}");
                    }
                    parsed
                })
                .collect();
            if !deny.is_empty() {
                rule.deny = deny;
            }
        }

        rule
    }

    /// Finds the record whose equality the operand poisons, if any.
    ///
    /// A named operand is judged by its own inheritance chain; a type
    /// parameter by the chain of each record constraint. The first chain
    /// exposing a denied property wins, so each operand yields at most one
    /// diagnostic. Failed type resolution is not an error: the operand is
    /// skipped.
    fn flagged_record<'m>(
        &self,
        model: &'m dyn SemanticModel,
        operand: &Expr,
    ) -> Option<&'m TypeDef> {
        let ty = model.expression_type(operand)?;
        let def = model.type_def(ty)?;

        for root_id in hierarchy_roots(ty, def) {
            let Some(root) = model.type_def(root_id) else {
                continue;
            };
            if !root.is_record() {
                continue;
            }
            if self.chain_has_denied_property(model, root_id) {
                return Some(root);
            }
        }
        None
    }

    /// Walks a base chain looking for a denied property.
    ///
    /// The walk covers every type from the root up to, but excluding,
    /// `System.Object`, and bails out on malformed cyclic chains.
    fn chain_has_denied_property(&self, model: &dyn SemanticModel, root: TypeId) -> bool {
        let mut visited = Vec::new();
        let mut current = Some(root);

        while let Some(id) = current {
            if visited.contains(&id) {
                break;
            }
            visited.push(id);

            let Some(def) = model.type_def(id) else {
                break;
            };
            if def.is_object_root() {
                break;
            }
            if def.properties().iter().any(|p| self.is_denied(model, p.ty)) {
                return true;
            }
            current = def.base();
        }

        false
    }

    fn is_denied(&self, model: &dyn SemanticModel, ty: TypeId) -> bool {
        model
            .type_def(ty)
            .is_some_and(|def| self.deny.iter().any(|d| d.matches(def)))
    }

    fn report(&self, ctx: &CheckContext<'_>, operand: &Expr, record: &TypeDef) -> Diagnostic {
        Diagnostic::new(
            CODE,
            NAME,
            self.severity,
            ctx.location(operand.span),
            format!("Do not use {} in equals because....", record.name()),
        )
        .with_suggestion(Suggestion::new(DESCRIPTION))
    }
}

/// Roots whose inheritance chains represent the operand type.
fn hierarchy_roots(ty: TypeId, def: &TypeDef) -> Vec<TypeId> {
    match def.kind() {
        TypeKind::Named if def.is_record() => vec![ty],
        TypeKind::TypeParameter => def.constraints().to_vec(),
        _ => Vec::new(),
    }
}

impl Rule for RecordListEquality {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn title(&self) -> &'static str {
        TITLE
    }

    fn description(&self) -> &'static str {
        DESCRIPTION
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &CheckContext<'_>, eq: EqualityExpr<'_>) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        for operand in eq.operands() {
            if let Some(record) = self.flagged_record(ctx.model, operand) {
                diagnostics.push(self.report(ctx, operand, record));
            }
        }
        diagnostics
    }
}
