//! Check command implementation.

use anyhow::{bail, Context, Result};
use record_lint_core::{Config, Driver, LintResult, RuleBox, Severity};
use record_lint_rules::{find_rule, rules_from_config};
use std::path::Path;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Runs the check command.
pub fn run(
    patterns: &[String],
    format: OutputFormat,
    rules_filter: Option<String>,
    exclude: Vec<String>,
    fail_on: Option<String>,
    source: &ConfigSource,
) -> Result<()> {
    let config = match source {
        ConfigSource::Default => Config::default(),
        other => {
            // Invariant: non-Default variants always have a path
            let p = other.path().context("resolved config has no path")?;
            Config::from_file(p)
                .with_context(|| format!("Failed to load config: {}", p.display()))?
        }
    };

    let fail_threshold = resolve_fail_threshold(fail_on.as_deref(), config.fail_on.as_deref())?;

    let patterns = if patterns.is_empty() {
        config.driver.scenarios.clone()
    } else {
        patterns.to_vec()
    };

    let rules = match rules_filter {
        Some(filter) => {
            let selectors: Vec<&str> = filter.split(',').map(str::trim).collect();
            filter_rules(&selectors)
        }
        None => rules_from_config(&config),
    };
    if rules.is_empty() {
        bail!("No rules selected");
    }

    let driver = Driver::builder()
        .rules(rules)
        .excludes(exclude)
        .config(config)
        .build();

    tracing::info!(
        "Checking {} pattern(s) with {} rule(s)",
        patterns.len(),
        driver.rule_count()
    );

    let mut result = LintResult::new();
    for pattern in &patterns {
        let path = Path::new(pattern);
        let part = if path.is_file() {
            driver
                .check_file(path)
                .with_context(|| format!("Failed to check {pattern}"))?
        } else {
            driver
                .check_glob(pattern)
                .with_context(|| format!("Failed to check {pattern}"))?
        };
        result.extend(part);
    }
    result.sort_by_location();

    super::output::print(&result, format)?;

    // Exit with error code if diagnostics reach the threshold
    if result.has_diagnostics_at(fail_threshold) {
        std::process::exit(1);
    }

    Ok(())
}

fn filter_rules(selectors: &[&str]) -> Vec<RuleBox> {
    let mut rules: Vec<RuleBox> = Vec::new();

    for selector in selectors {
        match find_rule(selector) {
            Some(rule) => rules.push(rule),
            None => tracing::warn!("Unknown rule: {}", selector),
        }
    }

    rules
}

/// Resolves the failing severity: flag beats config, default is `error`.
fn resolve_fail_threshold(flag: Option<&str>, configured: Option<&str>) -> Result<Severity> {
    let Some(value) = flag.or(configured) else {
        return Ok(Severity::Error);
    };
    match parse_severity(value) {
        Some(severity) => Ok(severity),
        None => bail!("Invalid fail-on severity {value:?}, expected: info, warning, error"),
    }
}

fn parse_severity(value: &str) -> Option<Severity> {
    match value {
        "info" => Some(Severity::Info),
        "warning" => Some(Severity::Warning),
        "error" => Some(Severity::Error),
        _ => None,
    }
}
