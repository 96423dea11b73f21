//! Rule to keep the leading import block sorted, used, and free of duplicates.
//!
//! # Rationale
//!
//! A stable import order keeps diffs small, and imports that nothing uses
//! only slow down compilation and review.
//!
//! # Detected Patterns
//!
//! - Imports whose symbol never appears after the import block
//! - A second import of an already imported symbol
//! - Imports out of order. The sort key is: paths with a directory part
//!   first, then by directory, then by file name (case-sensitive).
//!
//! # Fix
//!
//! In fix mode the import block is replaced by the filtered, sorted list.
//! Non-import lines that sat between imports are kept after the block.

use sollint_core::{FileContext, Rule, Severity, Suggestion, Violation};
use tracing::debug;

/// Rule code for import-order.
pub const CODE: &str = "SL001";

/// Rule name for import-order.
pub const NAME: &str = "import-order";

/// One parsed `import` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDecl {
    /// Line text with leading whitespace removed.
    pub text: String,
    /// 1-indexed line number in the file.
    pub line: usize,
    /// Imported symbol for braced imports (`import { Foo } from "..."`).
    pub symbol: Option<String>,
    /// Source path, without quotes.
    pub path: String,
}

impl ImportDecl {
    /// Parses an import line.
    ///
    /// The symbol is the third whitespace-separated word when the second is
    /// `{`. The path is the first double-quoted literal on the line.
    #[must_use]
    pub fn parse(text: &str, line: usize) -> Self {
        let text = text.trim_start().to_string();
        let words: Vec<&str> = text.split_whitespace().collect();

        let symbol = match (words.get(1), words.get(2)) {
            (Some(&"{"), Some(sym)) => Some((*sym).to_string()),
            _ => None,
        };

        let path = text
            .split('"')
            .nth(1)
            .map(String::from)
            .unwrap_or_default();

        Self {
            text,
            line,
            symbol,
            path,
        }
    }

    /// Directory part and file name of the path.
    fn split_path(&self) -> (&str, &str) {
        self.path.rsplit_once('/').unwrap_or(("", &self.path))
    }

    /// Sort key: bare file names last, then directory, then file name.
    #[must_use]
    pub fn sort_key(&self) -> (bool, &str, &str) {
        let (dir, base) = self.split_path();
        (dir.is_empty(), dir, base)
    }

    /// Key used to detect duplicates.
    fn identity(&self) -> &str {
        self.symbol.as_deref().unwrap_or(&self.path)
    }
}

/// A file split around its leading import block.
#[derive(Debug, Clone, Default)]
pub struct ImportBlock {
    /// Lines before the first import.
    pub prefix: Vec<String>,
    /// Import lines in original order.
    pub imports: Vec<ImportDecl>,
    /// Every other line from the first import onward.
    pub suffix: Vec<String>,
}

impl ImportBlock {
    /// Splits `lines` into prefix, imports, and suffix.
    ///
    /// Import collection stops at the first line starting with `contract`
    /// or `library`.
    #[must_use]
    pub fn split(lines: &[String]) -> Self {
        let mut block = Self::default();
        let mut started = false;
        let mut in_code = false;

        for (i, line) in lines.iter().enumerate() {
            if !in_code && line.trim_start().starts_with("import") {
                started = true;
                block.imports.push(ImportDecl::parse(line, i + 1));
                continue;
            }

            if line.starts_with("contract") || line.starts_with("library") {
                in_code = true;
            }

            if started {
                block.suffix.push(line.clone());
            } else {
                block.prefix.push(line.clone());
            }
        }

        block
    }

    /// Imports after dropping unused and duplicate entries, sorted.
    #[must_use]
    pub fn expected(&self) -> Vec<&ImportDecl> {
        let mut seen = std::collections::HashSet::new();

        let mut kept: Vec<&ImportDecl> = self
            .imports
            .iter()
            .filter(|decl| match &decl.symbol {
                Some(sym) => {
                    let used = self.suffix.iter().any(|l| l.contains(sym.as_str()));
                    if !used {
                        debug!("Unused import: {}", decl.text);
                    }
                    used
                }
                None => true,
            })
            .filter(|decl| seen.insert(decl.identity()))
            .collect();

        kept.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        kept
    }

    /// Whether the import block already matches [`Self::expected`].
    #[must_use]
    pub fn is_correct(&self) -> bool {
        let expected = self.expected();
        expected.len() == self.imports.len()
            && expected
                .iter()
                .zip(&self.imports)
                .all(|(e, o)| e.text == o.text)
    }

    /// Prefix, expected imports, and suffix joined back together.
    #[must_use]
    pub fn rewritten(&self) -> Vec<String> {
        self.prefix
            .iter()
            .cloned()
            .chain(self.expected().into_iter().map(|d| d.text.clone()))
            .chain(self.suffix.iter().cloned())
            .collect()
    }
}

fn listing<'a>(imports: impl IntoIterator<Item = &'a ImportDecl>) -> String {
    imports
        .into_iter()
        .map(|d| format!("\n    {}", d.text))
        .collect()
}

/// Keeps the import block sorted, used, and free of duplicates.
#[derive(Debug, Clone)]
pub struct ImportOrder {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for ImportOrder {
    fn default() -> Self {
        Self::new()
    }
}

impl ImportOrder {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Error,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for ImportOrder {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires sorted imports with no unused or duplicate entries"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext) -> Vec<Violation> {
        let block = ImportBlock::split(ctx.source.lines());
        if block.is_correct() {
            return Vec::new();
        }

        let first_line = block.imports.first().map_or(1, |d| d.line);
        vec![Violation::new(
            CODE,
            NAME,
            self.severity,
            ctx.location(first_line, 1),
            format!(
                "Imports in '{}' are not sorted or contain unused/duplicate entries:{}",
                ctx.relative_path.display(),
                listing(&block.imports),
            ),
        )
        .with_suggestion(Suggestion::new(format!(
            ">>> SHOULD BE >>>{}",
            listing(block.expected())
        )))]
    }

    fn fix(&self, ctx: &FileContext) -> Option<Vec<String>> {
        let block = ImportBlock::split(ctx.source.lines());
        if block.is_correct() {
            None
        } else {
            Some(block.rewritten())
        }
    }
}
