//! Core driver for orchestrating lint execution.

use crate::config::Config;
use crate::context::CheckContext;
use crate::rule::{Rule, RuleBox};
use crate::scenario::{self, ScenarioError};
use crate::semantic::SemanticModel;
use crate::syntax::BinaryExpr;
use crate::types::LintResult;

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while driving analysis.
#[derive(Debug, Error)]
pub enum DriverError {
    /// IO error reading files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// Error loading a scenario file.
    #[error("Failed to load scenario {path}: {source}")]
    Scenario {
        /// Path of the scenario that failed to load.
        path: PathBuf,
        /// Underlying scenario error.
        source: ScenarioError,
    },
}

/// A lowered compilation unit ready for checking.
///
/// Hosts produce one per source file: the comparisons it contains plus the
/// semantic model that types them.
#[derive(Clone, Copy)]
pub struct AnalysisUnit<'a> {
    /// Unit path, for diagnostics.
    pub file: &'a Path,
    /// Source text the expression spans index into.
    pub source: &'a str,
    /// Comparisons of the unit, in source order.
    pub comparisons: &'a [BinaryExpr],
    /// Type information for the unit.
    pub model: &'a dyn SemanticModel,
    /// Whether the unit is generated code.
    pub generated: bool,
}

/// Builder for configuring a [`Driver`].
#[derive(Default)]
pub struct DriverBuilder {
    rules: Vec<RuleBox>,
    exclude_patterns: Vec<String>,
    config: Option<Config>,
    analyze_generated: Option<bool>,
    fail_on_scenario_error: bool,
}

impl DriverBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule to the driver.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule to the driver.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds multiple boxed rules to the driver.
    #[must_use]
    pub fn rules(mut self, rules: impl IntoIterator<Item = RuleBox>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude glob patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets whether generated units are analyzed (default: false).
    #[must_use]
    pub fn analyze_generated(mut self, analyze: bool) -> Self {
        self.analyze_generated = Some(analyze);
        self
    }

    /// Sets whether scenario load errors abort the run (default: false).
    #[must_use]
    pub fn fail_on_scenario_error(mut self, fail: bool) -> Self {
        self.fail_on_scenario_error = fail;
        self
    }

    /// Builds the driver.
    #[must_use]
    pub fn build(self) -> Driver {
        let config = self.config.unwrap_or_default();

        let mut exclude_patterns = self.exclude_patterns;
        exclude_patterns.extend(config.driver.exclude.clone());

        let analyze_generated = self
            .analyze_generated
            .unwrap_or(config.driver.analyze_generated);

        Driver {
            rules: self.rules,
            exclude_patterns,
            config,
            analyze_generated,
            fail_on_scenario_error: self.fail_on_scenario_error,
        }
    }
}

/// The main driver that orchestrates lint execution.
///
/// Use [`Driver::builder()`] to construct an instance. The driver holds only
/// configuration, so a single instance can serve concurrent checks.
pub struct Driver {
    rules: Vec<RuleBox>,
    exclude_patterns: Vec<String>,
    config: Config,
    analyze_generated: bool,
    fail_on_scenario_error: bool,
}

impl Driver {
    /// Creates a new builder for configuring a driver.
    #[must_use]
    pub fn builder() -> DriverBuilder {
        DriverBuilder::new()
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Checks one lowered unit and returns its diagnostics.
    ///
    /// Generated units are skipped (and not counted) unless the driver was
    /// built with `analyze_generated(true)`. Comparisons other than `==`
    /// never reach rules.
    #[must_use]
    pub fn check_unit(&self, unit: &AnalysisUnit<'_>) -> LintResult {
        let mut result = LintResult::new();

        if unit.generated && !self.analyze_generated {
            debug!("Skipping generated unit: {}", unit.file.display());
            return result;
        }

        debug!(
            "Checking {} comparison(s) in {}",
            unit.comparisons.len(),
            unit.file.display()
        );

        let rules: Vec<&RuleBox> = self
            .rules
            .iter()
            .filter(|rule| {
                let enabled = self.rule_enabled(rule.as_ref());
                if !enabled {
                    debug!("Skipping disabled rule: {}", rule.name());
                }
                enabled
            })
            .collect();

        let ctx = CheckContext::new(unit.file, unit.source, unit.model);
        for comparison in unit.comparisons {
            let Some(eq) = comparison.as_equality() else {
                continue;
            };
            result.expressions_checked += 1;

            for rule in &rules {
                let diagnostics = rule.check(&ctx, eq);
                let diagnostics = self.apply_severity_override(rule.name(), diagnostics);
                result.diagnostics.extend(diagnostics);
            }
        }

        result.units_checked = 1;
        result
    }

    /// Checks several units and returns the merged, sorted result.
    #[must_use]
    pub fn check_units<'a>(&self, units: impl IntoIterator<Item = AnalysisUnit<'a>>) -> LintResult {
        let mut result = LintResult::new();
        for unit in units {
            result.extend(self.check_unit(&unit));
        }
        result.sort_by_location();
        result
    }

    /// Loads a scenario file and checks it.
    ///
    /// # Errors
    ///
    /// Returns an error if the scenario cannot be loaded.
    pub fn check_file(&self, path: &Path) -> Result<LintResult, DriverError> {
        let scenario = scenario::load_file(path).map_err(|e| DriverError::Scenario {
            path: path.to_path_buf(),
            source: e,
        })?;
        let mut result = self.check_unit(&scenario.unit());
        result.sort_by_location();
        Ok(result)
    }

    /// Discovers scenario files matching a glob pattern and checks them all.
    ///
    /// Invalid scenario files are logged and skipped unless the driver was
    /// built with `fail_on_scenario_error(true)`.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid pattern, an IO failure during
    /// discovery, or (when configured to fail) an invalid scenario file.
    pub fn check_glob(&self, pattern: &str) -> Result<LintResult, DriverError> {
        info!("Starting analysis for {pattern}");

        let mut files = Vec::new();
        for entry in glob::glob(pattern)? {
            let path = entry.map_err(|e| DriverError::Io(e.into_error()))?;
            if self.should_exclude(&path) {
                debug!("Excluding: {}", path.display());
                continue;
            }
            files.push(path);
        }

        info!("Found {} scenario file(s)", files.len());

        let mut result = LintResult::new();
        for path in files {
            match scenario::load_file(&path) {
                Ok(scenario) => result.extend(self.check_unit(&scenario.unit())),
                Err(e) => {
                    warn!("Failed to load {}: {}", path.display(), e);
                    if self.fail_on_scenario_error {
                        return Err(DriverError::Scenario { path, source: e });
                    }
                }
            }
        }

        result.sort_by_location();

        info!(
            "Analysis complete: {} diagnostic(s) in {} unit(s)",
            result.diagnostics.len(),
            result.units_checked
        );

        Ok(result)
    }

    /// Checks if a path should be excluded.
    fn should_exclude(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();

        for pattern in &self.exclude_patterns {
            if let Ok(glob_pattern) = glob::Pattern::new(pattern) {
                if glob_pattern.matches(&path_str) {
                    return true;
                }
            }

            // Also check as substring for patterns like "**/obj/**"
            let normalized_pattern = pattern.replace("**", "");
            if !normalized_pattern.is_empty() && path_str.contains(&normalized_pattern) {
                return true;
            }
        }

        false
    }

    fn rule_enabled(&self, rule: &dyn Rule) -> bool {
        self.config
            .rule_enabled(rule.name())
            .unwrap_or_else(|| rule.enabled_by_default())
    }

    /// Applies severity overrides from configuration.
    fn apply_severity_override(
        &self,
        rule_name: &str,
        mut diagnostics: Vec<crate::types::Diagnostic>,
    ) -> Vec<crate::types::Diagnostic> {
        if let Some(severity) = self.config.rule_severity(rule_name) {
            for d in &mut diagnostics {
                d.severity = severity;
            }
        }
        diagnostics
    }
}
