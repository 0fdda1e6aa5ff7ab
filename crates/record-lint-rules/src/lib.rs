//! # record-lint-rules
//!
//! Built-in lint rules for record-lint.
//!
//! This crate provides the rules that run against equality expressions
//! surfaced by the `record-lint-core` driver.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | RA001 | `record-list-equality` | Flags `==` on records exposing list-typed properties |
//!
//! ## Usage
//!
//! ```ignore
//! use record_lint_core::Driver;
//! use record_lint_rules::RecordListEquality;
//!
//! let driver = Driver::builder()
//!     .rule(RecordListEquality::new())
//!     .build();
//! let result = driver.check_glob("scenarios/**/*.toml")?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod record_list_equality;
mod registry;

pub use record_list_equality::{DeniedContainer, RecordListEquality};
pub use registry::{all_rules, default_rules, find_rule, rules_from_config};

/// Re-export core types for convenience.
pub use record_lint_core::{Diagnostic, Rule, Severity};
