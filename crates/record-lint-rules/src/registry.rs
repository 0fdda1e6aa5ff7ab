//! Rule registry and lookup.

use crate::record_list_equality::{self, RecordListEquality};
use record_lint_core::{Config, RuleBox};

/// Returns the rules enabled by default, with default settings.
#[must_use]
pub fn default_rules() -> Vec<RuleBox> {
    vec![Box::new(RecordListEquality::new())]
}

/// Returns all available rules.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![Box::new(RecordListEquality::new())]
}

/// Builds every rule honoring its block in `config`.
///
/// Rules without a block keep their defaults. Enablement and severity
/// overrides stay with the driver; this only applies rule-specific options.
#[must_use]
pub fn rules_from_config(config: &Config) -> Vec<RuleBox> {
    let mut rules: Vec<RuleBox> = Vec::new();

    match config.rule_config(record_list_equality::NAME) {
        Some(block) => rules.push(Box::new(RecordListEquality::from_config(block))),
        None => rules.push(Box::new(RecordListEquality::new())),
    }

    rules
}

/// Looks a rule up by name or code, e.g. `record-list-equality` or `RA001`.
#[must_use]
pub fn find_rule(selector: &str) -> Option<RuleBox> {
    all_rules()
        .into_iter()
        .find(|rule| rule.name() == selector || rule.code() == selector)
}

#[cfg(test)]
mod tests {
    use super::*;
    use record_lint_core::Severity;

    #[test]
    fn default_rules_are_not_empty() {
        assert!(!default_rules().is_empty());
    }

    #[test]
    fn all_rules_have_unique_codes() {
        let rules = all_rules();
        let mut codes: Vec<&str> = rules.iter().map(|r| r.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), rules.len());
    }

    #[test]
    fn find_rule_by_name_and_code() {
        assert!(find_rule("record-list-equality").is_some());
        assert!(find_rule("RA001").is_some());
        assert!(find_rule("ra001").is_none());
        assert!(find_rule("no-such-rule").is_none());
    }

    #[test]
    fn rules_from_config_applies_rule_options() {
        let config = Config::parse(
            r#"
[rules.record-list-equality]
severity = "warning"
"#,
        )
        .expect("config parses");

        let rules = rules_from_config(&config);
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].default_severity(), Severity::Warning);
    }

    #[test]
    fn rules_from_config_defaults_without_blocks() {
        let rules = rules_from_config(&Config::new());
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].default_severity(), Severity::Error);
    }
}
