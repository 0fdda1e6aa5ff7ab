//! List rules command implementation.

use record_lint_rules::all_rules;

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<10} {:<25} {:<10} Title", "Code", "Name", "Severity");
    println!("{}", "-".repeat(80));

    for rule in all_rules() {
        println!(
            "{:<10} {:<25} {:<10} {}",
            rule.code(),
            rule.name(),
            rule.default_severity().to_string(),
            rule.title()
        );
    }

    println!("\nUse --rules to filter specific rules, e.g.:");
    println!("  record-lint check --rules record-list-equality");
    println!("  record-lint check --rules RA001");
}
