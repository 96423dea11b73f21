//! List rules command implementation.

use sollint_core::Config;
use sollint_rules::{all_rules, Target};

fn target_label(name: &str, config: &Config) -> &'static str {
    let in_target = |target: Target| target.rules(config).iter().any(|r| r.name() == name);
    if in_target(Target::Contracts) {
        "contracts"
    } else if in_target(Target::Tests) {
        "tests"
    } else {
        "-"
    }
}

/// Runs the list-rules command.
pub fn run() {
    let config = Config::default();

    println!("Available rules:\n");
    println!("{:<8} {:<22} {:<11} Description", "Code", "Name", "Target");
    println!("{}", "-".repeat(80));

    for rule in all_rules() {
        println!(
            "{:<8} {:<22} {:<11} {}",
            rule.code(),
            rule.name(),
            target_label(rule.name(), &config),
            rule.description()
        );
    }

    println!("\nRun a target:");
    println!("  sollint contracts        # report only");
    println!("  sollint contracts fix    # rewrite import blocks in place");
    println!("  sollint tests");
    println!("\nDisable a rule in sollint.toml:");
    println!("  [rules.function-comments]");
    println!("  enabled = false");
}
