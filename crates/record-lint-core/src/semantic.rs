//! Type information surface backing expression analysis.
//!
//! Hosts expose their type system through the [`SemanticModel`] trait: a
//! deliberately narrow capability interface that answers only the questions
//! rules ask. Everything a rule can learn about a type comes from a
//! [`TypeDef`]: its kind, names, record-ness, base type, declared properties
//! and (for type parameters) constraints. [`TypeTable`] is the in-memory
//! implementation used by the scenario host and by tests.

use crate::syntax::{Expr, ExprId};
use std::collections::HashMap;

/// Identifier for a type within one semantic model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(usize);

impl TypeId {
    /// Wraps a raw model-assigned id.
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

/// Shape of a type definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    /// A named class, struct or record.
    Named,
    /// A generic type parameter; its [`TypeDef::constraints`] carry the
    /// declared constraint types.
    TypeParameter,
    /// A type the host failed to resolve. Never matches any predicate.
    Error,
}

/// A property declared directly on a type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDef {
    /// Property name.
    pub name: String,
    /// Declared property type.
    pub ty: TypeId,
}

/// A type definition as seen by rules.
///
/// Generic instantiations share the simple name of their definition:
/// `List<int>` enters the model as a type named `List` in
/// `System.Collections.Generic`, the way the original symbol's `Name` reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDef {
    kind: TypeKind,
    name: String,
    namespace: String,
    is_record: bool,
    base: Option<TypeId>,
    properties: Vec<PropertyDef>,
    constraints: Vec<TypeId>,
}

impl TypeDef {
    fn raw(kind: TypeKind, name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            namespace: namespace.into(),
            is_record: false,
            base: None,
            properties: Vec::new(),
            constraints: Vec::new(),
        }
    }

    /// A named type with nominal equality (class, struct).
    #[must_use]
    pub fn named(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self::raw(TypeKind::Named, name, namespace)
    }

    /// A record: a named type with compiler-provided structural equality.
    #[must_use]
    pub fn record(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        let mut def = Self::raw(TypeKind::Named, name, namespace);
        def.is_record = true;
        def
    }

    /// A generic type parameter such as `T`.
    #[must_use]
    pub fn type_parameter(name: impl Into<String>) -> Self {
        Self::raw(TypeKind::TypeParameter, name, "")
    }

    /// An unresolved type. Keeps the source spelling as its name.
    #[must_use]
    pub fn error(name: impl Into<String>) -> Self {
        Self::raw(TypeKind::Error, name, "")
    }

    /// Sets the base type.
    #[must_use]
    pub fn with_base(mut self, base: TypeId) -> Self {
        self.base = Some(base);
        self
    }

    /// Adds a directly declared property.
    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, ty: TypeId) -> Self {
        self.properties.push(PropertyDef {
            name: name.into(),
            ty,
        });
        self
    }

    /// Adds a constraint type (meaningful for type parameters).
    #[must_use]
    pub fn with_constraint(mut self, constraint: TypeId) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Shape of this type.
    #[must_use]
    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    /// Simple name, without namespace or type arguments.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Containing namespace as a dotted path, empty for the global namespace
    /// and for type parameters.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// True for record declarations.
    #[must_use]
    pub fn is_record(&self) -> bool {
        self.is_record
    }

    /// Base type, if one was declared.
    #[must_use]
    pub fn base(&self) -> Option<TypeId> {
        self.base
    }

    /// Properties declared directly on this type, in declaration order.
    #[must_use]
    pub fn properties(&self) -> &[PropertyDef] {
        &self.properties
    }

    /// Constraint types declared on this type parameter, in declaration order.
    #[must_use]
    pub fn constraints(&self) -> &[TypeId] {
        &self.constraints
    }

    /// Namespace-qualified name, e.g. `System.Collections.Generic.List`.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }

    /// True for the `System.Object` inheritance root, where base walks stop.
    #[must_use]
    pub fn is_object_root(&self) -> bool {
        self.name == "Object" && self.namespace == "System"
    }
}

/// Splits a dotted qualified name into `(namespace, simple name)`.
///
/// A name without dots has an empty namespace.
#[must_use]
pub fn split_qualified(qualified: &str) -> (&str, &str) {
    match qualified.rsplit_once('.') {
        Some((namespace, name)) => (namespace, name),
        None => ("", qualified),
    }
}

/// Read-only type information a host exposes to rules.
///
/// Both methods are total: unknown expressions and foreign ids answer `None`,
/// and rules treat that as "resolution failed, skip" rather than an error.
pub trait SemanticModel: Sync {
    /// Static type of an expression, if the host resolved one.
    fn expression_type(&self, expr: &Expr) -> Option<TypeId>;

    /// Definition backing a type id issued by this model.
    fn type_def(&self, id: TypeId) -> Option<&TypeDef>;
}

/// In-memory [`SemanticModel`] populated by declaration.
///
/// Ids are handed out in declaration order. Qualified-name lookup serves
/// loaders that cross-reference types by name.
#[derive(Debug, Default)]
pub struct TypeTable {
    defs: Vec<TypeDef>,
    by_name: HashMap<String, TypeId>,
    bindings: HashMap<ExprId, TypeId>,
}

impl TypeTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a type and returns its id.
    ///
    /// Re-declaring a qualified name repoints lookup at the new entry; loaders
    /// that care about duplicates check [`TypeTable::lookup`] first.
    pub fn declare(&mut self, def: TypeDef) -> TypeId {
        let id = TypeId(self.defs.len());
        self.by_name.insert(def.qualified_name(), id);
        self.defs.push(def);
        id
    }

    /// Records the static type of an expression.
    pub fn bind_expression(&mut self, expr: ExprId, ty: TypeId) {
        self.bindings.insert(expr, ty);
    }

    /// Looks a type up by qualified name.
    #[must_use]
    pub fn lookup(&self, qualified: &str) -> Option<TypeId> {
        self.by_name.get(qualified).copied()
    }

    /// Definition for an id, if this table issued it.
    #[must_use]
    pub fn get(&self, id: TypeId) -> Option<&TypeDef> {
        self.defs.get(id.0)
    }

    /// Number of declared types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    /// True when no types are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

impl SemanticModel for TypeTable {
    fn expression_type(&self, expr: &Expr) -> Option<TypeId> {
        self.bindings.get(&expr.id).copied()
    }

    fn type_def(&self, id: TypeId) -> Option<&TypeDef> {
        self.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::Span;

    #[test]
    fn declare_and_lookup_by_qualified_name() {
        let mut table = TypeTable::new();
        let list = table.declare(TypeDef::named("List", "System.Collections.Generic"));
        assert_eq!(table.lookup("System.Collections.Generic.List"), Some(list));
        assert_eq!(table.lookup("List"), None);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn lookup_without_namespace_uses_bare_name() {
        let mut table = TypeTable::new();
        let foo = table.declare(TypeDef::record("Foo", ""));
        assert_eq!(table.lookup("Foo"), Some(foo));
    }

    #[test]
    fn bind_and_resolve_expression() {
        let mut table = TypeTable::new();
        let foo = table.declare(TypeDef::record("Foo", "App"));
        table.bind_expression(ExprId::new(3), foo);

        let expr = Expr::new(ExprId::new(3), Span::new(0, 1));
        assert_eq!(table.expression_type(&expr), Some(foo));

        let unbound = Expr::new(ExprId::new(4), Span::new(2, 3));
        assert_eq!(table.expression_type(&unbound), None);
    }

    #[test]
    fn type_def_is_total_over_foreign_ids() {
        let table = TypeTable::new();
        assert!(table.type_def(TypeId::new(17)).is_none());
    }

    #[test]
    fn record_constructor_sets_record_flag() {
        assert!(TypeDef::record("Foo", "").is_record());
        assert!(!TypeDef::named("Foo", "").is_record());
        assert!(!TypeDef::error("Foo").is_record());
    }

    #[test]
    fn object_root_requires_exact_names() {
        assert!(TypeDef::named("Object", "System").is_object_root());
        assert!(!TypeDef::named("Object", "").is_object_root());
        assert!(!TypeDef::named("object", "System").is_object_root());
        assert!(!TypeDef::named("Object", "My.System").is_object_root());
    }

    #[test]
    fn qualified_name_omits_empty_namespace() {
        assert_eq!(TypeDef::record("Foo", "").qualified_name(), "Foo");
        assert_eq!(
            TypeDef::named("List", "System.Collections.Generic").qualified_name(),
            "System.Collections.Generic.List"
        );
    }

    #[test]
    fn split_qualified_takes_last_segment() {
        assert_eq!(
            split_qualified("System.Collections.Generic.List"),
            ("System.Collections.Generic", "List")
        );
        assert_eq!(split_qualified("Foo"), ("", "Foo"));
    }

    #[test]
    fn constraints_kept_in_declaration_order() {
        let mut table = TypeTable::new();
        let a = table.declare(TypeDef::record("A", ""));
        let b = table.declare(TypeDef::record("B", ""));
        let t = table.declare(
            TypeDef::type_parameter("T")
                .with_constraint(a)
                .with_constraint(b),
        );
        let def = table.get(t);
        assert_eq!(def.map(TypeDef::constraints), Some(&[a, b][..]));
    }
}
