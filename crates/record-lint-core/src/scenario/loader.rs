//! DTO → Scenario conversion with validation.

use super::dto::{ScenarioDto, TypeDto};
use super::{scan, Scenario, ScenarioError};
use crate::semantic::{TypeDef, TypeId, TypeTable};
use crate::syntax::{BinaryExpr, Expr, ExprId};
use std::collections::HashMap;
use std::path::PathBuf;

/// Converts a [`ScenarioDto`] to a validated [`Scenario`].
///
/// # Errors
///
/// Returns the first error encountered during conversion.
pub fn load(dto: ScenarioDto, file: PathBuf) -> Result<Scenario, ScenarioError> {
    let (source, marked_spans) = scan::strip_markers(&dto.source)?;

    // References are by qualified name and may point forward, so ids are
    // assigned up front; TypeTable hands them out in declaration order.
    let mut ids: HashMap<String, TypeId> = HashMap::new();
    for (index, ty) in dto.types.iter().enumerate() {
        let qualified = qualified_name(ty);
        if ids.insert(qualified.clone(), TypeId::new(index)).is_some() {
            return Err(ScenarioError::DuplicateType { name: qualified });
        }
    }

    let mut table = TypeTable::new();
    for (index, ty) in dto.types.iter().enumerate() {
        table.declare(convert_type(ty, index, &ids)?);
    }

    let mut bound: HashMap<&str, TypeId> = HashMap::new();
    for (ident, ty_name) in &dto.bindings {
        let id = resolve(&ids, ty_name, &format!("bindings.{ident}"))?;
        bound.insert(ident.as_str(), id);
    }

    let mut comparisons = Vec::new();
    let mut next_expr = 0;
    for raw in scan::find_comparisons(&source) {
        let left = make_expr(&mut next_expr, &raw.left, &bound, &mut table);
        let right = make_expr(&mut next_expr, &raw.right, &bound, &mut table);
        comparisons.push(BinaryExpr::new(raw.op, left, right));
    }

    Ok(Scenario {
        file,
        source,
        comparisons,
        table,
        marked_spans,
        generated: dto.generated,
    })
}

fn qualified_name(dto: &TypeDto) -> String {
    if dto.namespace.is_empty() {
        dto.name.clone()
    } else {
        format!("{}.{}", dto.namespace, dto.name)
    }
}

fn convert_type(
    dto: &TypeDto,
    index: usize,
    ids: &HashMap<String, TypeId>,
) -> Result<TypeDef, ScenarioError> {
    let qualified = qualified_name(dto);

    let mut def = match dto.kind.as_str() {
        "class" => TypeDef::named(&dto.name, &dto.namespace),
        "record" => TypeDef::record(&dto.name, &dto.namespace),
        "parameter" => TypeDef::type_parameter(&dto.name),
        "error" => TypeDef::error(&dto.name),
        other => {
            return Err(ScenarioError::UnknownKind {
                name: qualified,
                value: other.to_string(),
            })
        }
    };

    let nominal = matches!(dto.kind.as_str(), "class" | "record");
    if !nominal && !dto.namespace.is_empty() {
        return Err(ScenarioError::InvalidType {
            name: qualified,
            reason: format!("kind `{}` cannot declare a namespace", dto.kind),
        });
    }
    if !nominal && (dto.base.is_some() || !dto.properties.is_empty()) {
        return Err(ScenarioError::InvalidType {
            name: qualified,
            reason: "only classes and records declare a base or properties".to_string(),
        });
    }
    if dto.kind != "parameter" && !dto.constraints.is_empty() {
        return Err(ScenarioError::InvalidType {
            name: qualified,
            reason: "only type parameters declare constraints".to_string(),
        });
    }

    if let Some(base) = &dto.base {
        let id = resolve(ids, base, &format!("types[{index}].base"))?;
        def = def.with_base(id);
    }
    for (j, prop) in dto.properties.iter().enumerate() {
        let id = resolve(ids, &prop.ty, &format!("types[{index}].properties[{j}].type"))?;
        def = def.with_property(&prop.name, id);
    }
    for (j, constraint) in dto.constraints.iter().enumerate() {
        let id = resolve(ids, constraint, &format!("types[{index}].constraints[{j}]"))?;
        def = def.with_constraint(id);
    }

    Ok(def)
}

fn resolve(
    ids: &HashMap<String, TypeId>,
    name: &str,
    context: &str,
) -> Result<TypeId, ScenarioError> {
    ids.get(name)
        .copied()
        .ok_or_else(|| ScenarioError::UnknownType {
            context: context.to_string(),
            name: name.to_string(),
        })
}

fn make_expr(
    next: &mut usize,
    raw: &scan::RawOperand,
    bound: &HashMap<&str, TypeId>,
    table: &mut TypeTable,
) -> Expr {
    let id = ExprId::new(*next);
    *next += 1;
    if let Some(ty) = bound.get(raw.text.as_str()) {
        table.bind_expression(id, *ty);
    }
    Expr::new(id, raw.span)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantic::SemanticModel;
    use crate::syntax::BinaryOp;

    fn parse_and_load(toml_str: &str) -> Result<Scenario, ScenarioError> {
        let dto: ScenarioDto = toml::from_str(toml_str).unwrap();
        load(dto, PathBuf::from("test.toml"))
    }

    // -- Happy path --

    #[test]
    fn load_empty_scenario() {
        let scenario = parse_and_load("").unwrap();
        assert!(scenario.comparisons.is_empty());
        assert!(scenario.table.is_empty());
        assert!(!scenario.generated);
    }

    #[test]
    fn load_record_comparison_scenario() {
        let scenario = parse_and_load(
            r#"
source = "if ([|a == b|]) { }"

[[types]]
name = "List"
namespace = "System.Collections.Generic"

[[types]]
name = "Foo"
kind = "record"
properties = [{ name = "Bar", type = "System.Collections.Generic.List" }]

[bindings]
a = "Foo"
b = "Foo"
"#,
        )
        .unwrap();

        assert_eq!(scenario.source, "if (a == b) { }");
        assert_eq!(scenario.comparisons.len(), 1);
        assert_eq!(scenario.comparisons[0].op, BinaryOp::Eq);
        assert_eq!(scenario.marked_spans.len(), 1);
        assert!(scenario.marked_spans[0].contains(scenario.comparisons[0].span));

        let foo = scenario.table.lookup("Foo").unwrap();
        let left_ty = scenario
            .table
            .expression_type(&scenario.comparisons[0].left)
            .unwrap();
        assert_eq!(left_ty, foo);

        let def = scenario.table.get(foo).unwrap();
        assert!(def.is_record());
        assert_eq!(def.properties().len(), 1);
    }

    #[test]
    fn forward_references_resolve() {
        let scenario = parse_and_load(
            r#"
[[types]]
name = "Derived"
kind = "record"
base = "App.Base"

[[types]]
name = "Base"
namespace = "App"
kind = "record"
"#,
        )
        .unwrap();

        let derived = scenario.table.lookup("Derived").unwrap();
        let base = scenario.table.lookup("App.Base").unwrap();
        assert_eq!(scenario.table.get(derived).unwrap().base(), Some(base));
    }

    #[test]
    fn unbound_identifier_has_no_type() {
        let scenario = parse_and_load(r#"source = "x == y""#).unwrap();
        assert_eq!(scenario.comparisons.len(), 1);
        assert!(scenario
            .table
            .expression_type(&scenario.comparisons[0].left)
            .is_none());
    }

    #[test]
    fn generated_flag_flows_through() {
        let scenario = parse_and_load(r#"generated = true"#).unwrap();
        assert!(scenario.generated);
    }

    #[test]
    fn expr_ids_are_allocated_in_source_order() {
        let scenario = parse_and_load(r#"source = "a == b; c == d""#).unwrap();
        assert_eq!(scenario.comparisons[0].left.id, ExprId::new(0));
        assert_eq!(scenario.comparisons[0].right.id, ExprId::new(1));
        assert_eq!(scenario.comparisons[1].left.id, ExprId::new(2));
        assert_eq!(scenario.comparisons[1].right.id, ExprId::new(3));
    }

    // -- Error cases --

    #[test]
    fn load_rejects_duplicate_type() {
        let result = parse_and_load(
            r#"
[[types]]
name = "Foo"

[[types]]
name = "Foo"
"#,
        );
        assert!(matches!(result, Err(ScenarioError::DuplicateType { .. })));
    }

    #[test]
    fn load_rejects_unknown_kind() {
        let result = parse_and_load(
            r#"
[[types]]
name = "Foo"
kind = "interface"
"#,
        );
        assert!(matches!(
            result,
            Err(ScenarioError::UnknownKind { ref value, .. }) if value == "interface"
        ));
    }

    #[test]
    fn load_rejects_unknown_base() {
        let result = parse_and_load(
            r#"
[[types]]
name = "Foo"
kind = "record"
base = "Missing"
"#,
        );
        assert!(matches!(
            result,
            Err(ScenarioError::UnknownType { ref context, .. }) if context == "types[0].base"
        ));
    }

    #[test]
    fn load_rejects_unknown_binding_type() {
        let result = parse_and_load(
            r#"
source = "a == b"

[bindings]
a = "Missing"
"#,
        );
        assert!(matches!(
            result,
            Err(ScenarioError::UnknownType { ref context, .. }) if context == "bindings.a"
        ));
    }

    #[test]
    fn load_rejects_constraints_on_class() {
        let result = parse_and_load(
            r#"
[[types]]
name = "Base"

[[types]]
name = "Foo"
constraints = ["Base"]
"#,
        );
        assert!(matches!(result, Err(ScenarioError::InvalidType { .. })));
    }

    #[test]
    fn load_rejects_base_on_parameter() {
        let result = parse_and_load(
            r#"
[[types]]
name = "Base"

[[types]]
name = "T"
kind = "parameter"
base = "Base"
"#,
        );
        assert!(matches!(result, Err(ScenarioError::InvalidType { .. })));
    }

    #[test]
    fn load_rejects_unbalanced_marker() {
        let result = parse_and_load(r#"source = "if ([|a == b) { }""#);
        assert!(matches!(
            result,
            Err(ScenarioError::UnbalancedMarker { .. })
        ));
    }
}
