//! Integration test: rule sets end-to-end via `Analyzer`.
//!
//! Uses the fixture project under `tests/fixtures/project/` (contracts,
//! tests and an ignore list) to check both lint targets the way the CLI
//! wires them up.

use sollint_core::{Analyzer, Config, IgnoreList, LintResult};
use sollint_rules::Target;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn fixture_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/project")
}

fn config_at(root: &Path) -> Config {
    let mut config = Config::default();
    config.analyzer.root = root.to_path_buf();
    config
}

fn lint_contracts(root: &Path, fix: bool) -> LintResult {
    let config = config_at(root);
    let ignore_path = root.join(&config.analyzer.ignore_file);
    let ignore_list = IgnoreList::from_file(&ignore_path).unwrap_or_default();

    let mut builder = Analyzer::builder()
        .config(config.clone())
        .ignore_list(ignore_list)
        .fix(fix);
    for rule in Target::Contracts.rules(&config) {
        builder = builder.rule_box(rule);
    }
    builder
        .build()
        .expect("analyzer should build")
        .analyze()
        .expect("analysis should succeed")
}

// ── Contracts ──

#[test]
fn contracts_report_only_the_unsorted_imports() {
    let result = lint_contracts(&fixture_root(), false);

    assert_eq!(result.files_checked, 2, "external/ is ignored");
    assert_eq!(
        result.violations.len(),
        1,
        "unexpected violations: {:#?}",
        result
            .violations
            .iter()
            .map(|v| format!("{} @ {}", v.message, v.location.file.display()))
            .collect::<Vec<_>>()
    );

    let violation = &result.violations[0];
    assert_eq!(violation.code, "SL001");
    assert_eq!(violation.location.file, Path::new("protocol/Getters.sol"));
    assert_eq!(violation.location.line, 10);

    let suggestion = violation
        .suggestion
        .as_ref()
        .expect("import-order carries the expected order");
    assert_eq!(
        suggestion.message,
        ">>> SHOULD BE >>>\n    import { Account } from \"../lib/Account.sol\";\n    import { Storage } from \"../lib/Storage.sol\";\n    import { Types } from \"../lib/Types.sol\";"
    );
}

#[test]
fn ignored_file_would_fail_every_contract_rule() {
    let root = fixture_root();
    let config = config_at(&root);
    let mut builder = Analyzer::builder()
        .config(config.clone())
        .root(root.join("contracts/external"));
    for rule in Target::Contracts.rules(&config) {
        builder = builder.rule_box(rule);
    }
    let result = builder.build().unwrap().analyze().unwrap();

    let codes: Vec<&str> = result.violations.iter().map(|v| v.code.as_str()).collect();
    assert_eq!(codes.iter().filter(|c| **c == "SL002").count(), 5);
    assert!(codes.contains(&"SL003"), "one-space param tag");
}

#[test]
fn fix_mode_sorts_and_prunes_imports() {
    let tmp = TempDir::new().unwrap();
    let contracts = tmp.path().join("contracts");
    fs::create_dir_all(&contracts).unwrap();
    fs::write(tmp.path().join(".soliumignore"), "").unwrap();
    fs::copy(
        fixture_root().join("contracts/protocol/Getters.sol"),
        contracts.join("Getters.sol"),
    )
    .unwrap();

    let result = lint_contracts(tmp.path(), true);
    assert!(result.violations.is_empty());
    assert_eq!(result.files_fixed, [PathBuf::from("Getters.sol")]);

    let fixed = fs::read_to_string(contracts.join("Getters.sol")).unwrap();
    let imports: Vec<&str> = fixed.lines().filter(|l| l.starts_with("import")).collect();
    assert_eq!(
        imports,
        [
            "import { Account } from \"../lib/Account.sol\";",
            "import { Storage } from \"../lib/Storage.sol\";",
            "import { Types } from \"../lib/Types.sol\";",
        ]
    );
    assert!(fixed.ends_with("}\n"));

    let again = lint_contracts(tmp.path(), true);
    assert!(again.files_fixed.is_empty(), "second fix is a no-op");
}

// ── Tests ──

#[test]
fn tests_report_exclusive_marker() {
    let root = fixture_root();
    let config = config_at(&root);
    let mut builder = Analyzer::builder()
        .config(config.clone())
        .root(root.join(&config.analyzer.tests_dir))
        .pattern(config.analyzer.test_pattern.clone());
    for rule in Target::Tests.rules(&config) {
        builder = builder.rule_box(rule);
    }
    let result = builder.build().unwrap().analyze().unwrap();

    assert_eq!(result.files_checked, 2);
    assert_eq!(result.violations.len(), 1);
    let violation = &result.violations[0];
    assert_eq!(violation.message, ".only( found in Admin.test.js:2");
    assert_eq!((violation.location.line, violation.location.column), (2, 5));
}
