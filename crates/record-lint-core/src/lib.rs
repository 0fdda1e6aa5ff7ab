//! # record-lint-core
//!
//! Core framework for linting equality comparisons of record types.
//!
//! This crate provides the foundational traits and types for building
//! record equality linters. It includes:
//!
//! - [`Rule`] trait for rules over equality expressions
//! - [`SemanticModel`] capability trait hosts implement to expose types
//! - [`Driver`] for orchestrating lint execution
//! - [`Diagnostic`] for representing lint findings
//! - [`scenario`] units that stand in for a compiler front end
//!
//! ## Example
//!
//! ```ignore
//! use record_lint_core::Driver;
//!
//! let driver = Driver::builder()
//!     .rule(MyRule::new())
//!     .build();
//!
//! let result = driver.check_glob("scenarios/**/*.toml")?;
//! result.print_report();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod context;
mod driver;
mod rule;
mod semantic;
mod syntax;
mod types;

pub mod scenario;

pub use config::{Config, ConfigError, DriverConfig, RuleConfig};
pub use context::CheckContext;
pub use driver::{AnalysisUnit, Driver, DriverBuilder, DriverError};
pub use rule::{Rule, RuleBox};
pub use scenario::{Scenario, ScenarioError};
pub use semantic::{
    split_qualified, PropertyDef, SemanticModel, TypeDef, TypeId, TypeKind, TypeTable,
};
pub use syntax::{BinaryExpr, BinaryOp, EqualityExpr, Expr, ExprId, Span};
pub use types::{Diagnostic, DiagnosticRender, LintResult, Location, Severity, Suggestion};
