//! TOML deserialization types (DTO layer).
//!
//! These types exist solely for serde deserialization.
//! They are converted to a validated [`Scenario`](super::Scenario) via the
//! loader.

use serde::Deserialize;
use std::collections::BTreeMap;

/// Raw TOML representation of a scenario.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScenarioDto {
    /// Source text, optionally containing `[|` ... `|]` markers.
    #[serde(default)]
    pub source: String,

    /// Whether this unit is generated code (default: false).
    #[serde(default)]
    pub generated: bool,

    /// Type declarations available to the unit.
    #[serde(default)]
    pub types: Vec<TypeDto>,

    /// Static type of each identifier, as a qualified type name.
    #[serde(default)]
    pub bindings: BTreeMap<String, String>,
}

/// TOML representation of a type declaration.
#[derive(Debug, Clone, Deserialize)]
pub struct TypeDto {
    /// Simple type name (e.g., "Foo", "List", "T").
    pub name: String,

    /// Containing namespace as a dotted path (default: global).
    #[serde(default)]
    pub namespace: String,

    /// Kind of declaration: "class", "record", "parameter" or "error"
    /// (default: "class").
    #[serde(default = "default_kind")]
    pub kind: String,

    /// Qualified name of the base type, if any.
    #[serde(default)]
    pub base: Option<String>,

    /// Properties declared directly on the type.
    #[serde(default)]
    pub properties: Vec<PropertyDto>,

    /// Constraint types for a type parameter, as qualified names.
    #[serde(default)]
    pub constraints: Vec<String>,
}

/// TOML representation of a property declaration.
#[derive(Debug, Clone, Deserialize)]
pub struct PropertyDto {
    /// Property name.
    pub name: String,

    /// Qualified name of the property type.
    #[serde(rename = "type")]
    pub ty: String,
}

fn default_kind() -> String {
    "class".to_string()
}
