//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# record-lint configuration

# Severity threshold for a failing exit: info, warning, error
fail_on = "error"

[driver]
# Glob patterns locating scenario files for `record-lint check`
scenarios = ["scenarios/**/*.toml"]

# Glob patterns to exclude from analysis
exclude = [
    "**/obj/**",
    "**/bin/**",
]

# Whether generated units are analyzed
analyze_generated = false

# Rule configurations
# Each rule can be enabled/disabled and have its severity overridden

[rules.record-list-equality]
enabled = true
# severity = "warning"  # Override default severity
# deny = ["System.Collections.Generic.List"]
"#;

const SAMPLE_SCENARIO: &str = r#"# Sample scenario: a record with a List<int> property compared with ==.
# `record-lint check` reports RA001 on both operands.
source = """
record Foo(List<int> Bar);

var a = new Foo(new() { 1 });
var b = new Foo(new() { 2 });

if (a == b)
{
}
"""

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
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new("record-lint.toml");

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;
    println!("Created record-lint.toml");

    let sample_path = Path::new("scenarios/sample.toml");
    if !sample_path.exists() || force {
        std::fs::create_dir_all("scenarios")?;
        std::fs::write(sample_path, SAMPLE_SCENARIO)?;
        println!("Created scenarios/sample.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit record-lint.toml to configure rules");
    println!("  2. Run: record-lint check");

    Ok(())
}
