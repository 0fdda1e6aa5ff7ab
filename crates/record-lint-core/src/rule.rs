//! Rule trait for defining equality lint rules.

use crate::context::CheckContext;
use crate::syntax::EqualityExpr;
use crate::types::{Diagnostic, Severity};

/// A lint rule over equality expressions.
///
/// The driver hands every `==` comparison of a unit to every enabled rule,
/// together with the unit's [`CheckContext`]. Rules resolve operand types
/// through the context's semantic model and report zero or more diagnostics
/// per comparison.
///
/// Rules run concurrently over units, so implementations hold configuration
/// only, never per-unit state.
///
/// # Example
///
/// ```ignore
/// use record_lint_core::{CheckContext, Diagnostic, EqualityExpr, Rule};
///
/// pub struct NoSelfComparison;
///
/// impl Rule for NoSelfComparison {
///     fn name(&self) -> &'static str { "no-self-comparison" }
///     fn code(&self) -> &'static str { "RA900" }
///
///     fn check(&self, ctx: &CheckContext<'_>, eq: EqualityExpr<'_>) -> Vec<Diagnostic> {
///         if eq.left().id == eq.right().id {
///             vec![Diagnostic::new(
///                 self.code(),
///                 self.name(),
///                 self.default_severity(),
///                 ctx.location(eq.span()),
///                 "Both operands are the same expression",
///             )]
///         } else {
///             vec![]
///         }
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "record-list-equality").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "RA001").
    fn code(&self) -> &'static str;

    /// Returns a short title for this rule.
    fn title(&self) -> &'static str {
        ""
    }

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the diagnostic category this rule reports under.
    fn category(&self) -> &'static str {
        "Language Usage"
    }

    /// Returns the default severity for diagnostics from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Whether the rule runs when configuration does not mention it.
    fn enabled_by_default(&self) -> bool {
        true
    }

    /// Checks a single equality expression and returns any diagnostics found.
    ///
    /// Both operands are the rule's to inspect; the driver does not dedupe or
    /// order the returned diagnostics.
    fn check(&self, ctx: &CheckContext<'_>, eq: EqualityExpr<'_>) -> Vec<Diagnostic>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantic::TypeTable;
    use crate::syntax::{BinaryExpr, BinaryOp, Expr, ExprId, Span};
    use std::path::Path;

    struct TestRule;

    impl Rule for TestRule {
        fn name(&self) -> &'static str {
            "test-rule"
        }
        fn code(&self) -> &'static str {
            "TEST001"
        }
        fn description(&self) -> &'static str {
            "A test rule"
        }

        fn check(&self, ctx: &CheckContext<'_>, eq: EqualityExpr<'_>) -> Vec<Diagnostic> {
            vec![Diagnostic::new(
                self.code(),
                self.name(),
                self.default_severity(),
                ctx.location(eq.span()),
                "Test diagnostic",
            )]
        }
    }

    #[test]
    fn rule_trait_defaults() {
        let rule = TestRule;
        assert_eq!(rule.name(), "test-rule");
        assert_eq!(rule.code(), "TEST001");
        assert_eq!(rule.default_severity(), Severity::Error);
        assert_eq!(rule.category(), "Language Usage");
        assert!(rule.enabled_by_default());
    }

    #[test]
    fn check_reports_at_comparison_span() {
        let table = TypeTable::new();
        let source = "a == b";
        let ctx = CheckContext::new(Path::new("test.cs"), source, &table);
        let cmp = BinaryExpr::new(
            BinaryOp::Eq,
            Expr::new(ExprId::new(0), Span::new(0, 1)),
            Expr::new(ExprId::new(1), Span::new(5, 6)),
        );

        let Some(eq) = cmp.as_equality() else {
            panic!("== should view as equality");
        };
        let diags = TestRule.check(&ctx, eq);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].location.offset, 0);
        assert_eq!(diags[0].location.length, 6);
    }
}
