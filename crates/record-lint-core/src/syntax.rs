//! Expression surface handed to rules by the embedding host.
//!
//! The engine does not parse source text. A host (compiler front end, test
//! scenario loader) lowers each compilation unit into plain expression handles
//! carrying byte spans, and binds their types through a
//! [`SemanticModel`](crate::semantic::SemanticModel). Rules only ever see
//! equality comparisons, obtained through [`BinaryExpr::as_equality`].

/// A half-open byte range `[start, end)` into a unit's source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    /// Creates a span. `end` is clamped to at least `start`.
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    /// Start offset in bytes.
    #[must_use]
    pub fn start(&self) -> usize {
        self.start
    }

    /// End offset in bytes (exclusive).
    #[must_use]
    pub fn end(&self) -> usize {
        self.end
    }

    /// Length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns true for zero-length spans.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns true if `other` lies entirely within this span.
    #[must_use]
    pub fn contains(&self, other: Span) -> bool {
        other.start >= self.start && other.end <= self.end
    }
}

/// Identifier for an expression within one compilation unit.
///
/// Ids are only meaningful to the host that allocated them; the engine treats
/// them as opaque lookup keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExprId(usize);

impl ExprId {
    /// Wraps a raw host-assigned id.
    #[must_use]
    pub fn new(id: usize) -> Self {
        Self(id)
    }

    /// Raw id value.
    #[must_use]
    pub fn index(&self) -> usize {
        self.0
    }
}

/// An operand expression: a handle the semantic model can resolve to a type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expr {
    /// Host-assigned identifier, used for type lookup.
    pub id: ExprId,
    /// Byte span of the operand in the unit source.
    pub span: Span,
}

impl Expr {
    /// Creates an expression handle.
    #[must_use]
    pub fn new(id: ExprId, span: Span) -> Self {
        Self { id, span }
    }
}

/// Binary comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// `==`
    Eq,
    /// `!=`
    Ne,
}

impl BinaryOp {
    /// Source symbol for the operator.
    #[must_use]
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::Ne => "!=",
        }
    }
}

impl std::fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A binary comparison between two operand expressions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryExpr {
    /// The comparison operator.
    pub op: BinaryOp,
    /// Left operand.
    pub left: Expr,
    /// Right operand.
    pub right: Expr,
    /// Span of the whole comparison, operands included.
    pub span: Span,
}

impl BinaryExpr {
    /// Creates a comparison whose span stretches from the left operand's start
    /// to the right operand's end.
    #[must_use]
    pub fn new(op: BinaryOp, left: Expr, right: Expr) -> Self {
        let span = Span::new(left.span.start(), right.span.end());
        Self {
            op,
            left,
            right,
            span,
        }
    }

    /// Views this comparison as an equality check.
    ///
    /// Returns `None` for anything that is not `==`; rules never observe other
    /// operators.
    #[must_use]
    pub fn as_equality(&self) -> Option<EqualityExpr<'_>> {
        match self.op {
            BinaryOp::Eq => Some(EqualityExpr { expr: self }),
            BinaryOp::Ne => None,
        }
    }
}

/// Borrowed view of a [`BinaryExpr`] known to be an `==` comparison.
///
/// Obtainable only through [`BinaryExpr::as_equality`], so holding one proves
/// the operator without re-checking it.
#[derive(Debug, Clone, Copy)]
pub struct EqualityExpr<'a> {
    expr: &'a BinaryExpr,
}

impl<'a> EqualityExpr<'a> {
    /// Left operand.
    #[must_use]
    pub fn left(&self) -> &'a Expr {
        &self.expr.left
    }

    /// Right operand.
    #[must_use]
    pub fn right(&self) -> &'a Expr {
        &self.expr.right
    }

    /// Both operands, in source order.
    #[must_use]
    pub fn operands(&self) -> [&'a Expr; 2] {
        [&self.expr.left, &self.expr.right]
    }

    /// Span of the whole comparison.
    #[must_use]
    pub fn span(&self) -> Span {
        self.expr.span
    }
}
