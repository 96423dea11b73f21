//! Integration test: rules end-to-end via `Analyzer`.
//!
//! Uses a small line rule against a temp directory to exercise discovery,
//! the ignore list, configuration overrides and fix mode together.

use sollint_core::{
    Analyzer, Config, FileContext, IgnoreList, Rule, Severity, Suggestion, Violation,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Flags `console.log` calls; the fix drops those lines.
struct NoConsoleLog;

impl Rule for NoConsoleLog {
    fn name(&self) -> &'static str {
        "no-console-log"
    }

    fn code(&self) -> &'static str {
        "T001"
    }

    fn check(&self, ctx: &FileContext) -> Vec<Violation> {
        ctx.source
            .lines()
            .iter()
            .enumerate()
            .filter_map(|(i, line)| {
                let col = line.find("console.log")?;
                Some(
                    Violation::new(
                        self.code(),
                        self.name(),
                        self.default_severity(),
                        ctx.location(i + 1, col + 1),
                        format!("console.log in {}", ctx.file_name()),
                    )
                    .with_suggestion(Suggestion::new("Remove the call")),
                )
            })
            .collect()
    }

    fn fix(&self, ctx: &FileContext) -> Option<Vec<String>> {
        let lines = ctx.source.lines();
        let kept: Vec<String> = lines
            .iter()
            .filter(|l| !l.contains("console.log"))
            .cloned()
            .collect();
        (kept.len() != lines.len()).then_some(kept)
    }
}

fn setup() -> TempDir {
    let dir = TempDir::new().expect("temp dir should be created");
    let root = dir.path();
    fs::create_dir_all(root.join("nested/mocks")).expect("dirs should be created");
    fs::write(root.join("A.sol"), "contract A {\n    console.log(1);\n}\n").unwrap();
    fs::write(root.join("nested/B.sol"), "contract B {}\n").unwrap();
    fs::write(
        root.join("nested/mocks/Mock.sol"),
        "contract Mock {\n    console.log(2);\n}\n",
    )
    .unwrap();
    fs::write(root.join("notes.md"), "console.log\n").unwrap();
    dir
}

fn analyzer(root: &Path, config: Config, ignore: &str, fix: bool) -> Analyzer {
    Analyzer::builder()
        .root(root)
        .config(config)
        .ignore_list(IgnoreList::parse(ignore))
        .fix(fix)
        .rule(NoConsoleLog)
        .build()
        .expect("analyzer should build")
}

// ── Check mode ──

#[test]
fn reports_violations_with_relative_paths() {
    let dir = setup();
    let result = analyzer(dir.path(), Config::default(), "", false)
        .analyze()
        .expect("analysis should succeed");

    assert_eq!(result.files_checked, 3, "only .sol files are checked");
    assert_eq!(result.violations.len(), 2);
    assert!(result.has_errors());

    let first = &result.violations[0];
    assert_eq!(first.location.file, Path::new("A.sol"));
    assert_eq!((first.location.line, first.location.column), (2, 5));
    assert_eq!(first.message, "console.log in A.sol");
    assert_eq!(
        result.violations[1].location.file,
        Path::new("nested/mocks/Mock.sol")
    );
    assert!(result.files_fixed.is_empty());
}

#[test]
fn ignore_list_excludes_by_substring() {
    let dir = setup();
    let result = analyzer(dir.path(), Config::default(), "mocks/\n\n", false)
        .analyze()
        .expect("analysis should succeed");

    assert_eq!(result.files_checked, 2);
    assert_eq!(result.violations.len(), 1);
    assert_eq!(result.violations[0].location.file, Path::new("A.sol"));
}

#[test]
fn config_can_disable_or_downgrade_rule() {
    let dir = setup();

    let disabled = Config::parse("[rules.no-console-log]\nenabled = false\n").unwrap();
    let result = analyzer(dir.path(), disabled, "", false).analyze().unwrap();
    assert!(result.violations.is_empty());

    let downgraded = Config::parse("[rules.no-console-log]\nseverity = \"warning\"\n").unwrap();
    let result = analyzer(dir.path(), downgraded, "", false).analyze().unwrap();
    assert_eq!(result.violations.len(), 2);
    assert!(result.violations.iter().all(|v| v.severity == Severity::Warning));
    assert!(!result.has_errors());
    assert_eq!(result.count_by_severity(), (0, 2, 0));
}

// ── Fix mode ──

#[test]
fn fix_mode_rewrites_and_rechecks() {
    let dir = setup();
    let result = analyzer(dir.path(), Config::default(), "mocks", true)
        .analyze()
        .expect("analysis should succeed");

    assert!(result.violations.is_empty(), "fixed files report clean");
    assert_eq!(result.files_fixed, [Path::new("A.sol").to_path_buf()]);
    assert_eq!(
        fs::read_to_string(dir.path().join("A.sol")).unwrap(),
        "contract A {\n}\n"
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("nested/mocks/Mock.sol")).unwrap(),
        "contract Mock {\n    console.log(2);\n}\n",
        "ignored files are never rewritten"
    );
}

#[test]
fn missing_root_is_a_clean_run() {
    let dir = TempDir::new().unwrap();
    let result = analyzer(&dir.path().join("absent"), Config::default(), "", false)
        .analyze()
        .expect("a missing root holds no files");
    assert_eq!(result.files_checked, 0);
    assert!(result.violations.is_empty());
}
