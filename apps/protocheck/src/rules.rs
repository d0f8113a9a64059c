//! Structural rules applied to the raw text of one `.proto` file.
//!
//! Every rule is an independent pattern match over the text; there is no
//! tokenizer and no AST. All rules run on every call and problems are
//! reported as findings, so `evaluate` never fails.
//!
//! Rules, in the order their findings are emitted:
//! - syntax declaration (`syntax = "proto3";`), error
//! - package declaration, warning
//! - brace balance, error
//! - parenthesis balance, error
//! - import resolution through an [`ImportResolver`], error per import
//! - message definitions (collected; warning when none and no `service`)
//! - duplicate `= <n>;` numbers, single warning

use crate::models::{FileReport, Finding};
use regex::Regex;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

pub const MSG_SYNTAX: &str =
    "Missing or incorrect syntax declaration (should be: syntax = \"proto3\";)";
pub const MSG_PACKAGE: &str = "Missing package declaration";
pub const MSG_NO_DEFINITIONS: &str = "No message or service definitions found";
pub const MSG_DUPLICATE_NUMBERS: &str = "Duplicate field numbers detected";

/// Answers whether an imported path exists under the schema root.
pub trait ImportResolver {
    fn exists(&self, import: &str) -> bool;
}

impl<F> ImportResolver for F
where
    F: Fn(&str) -> bool,
{
    fn exists(&self, import: &str) -> bool {
        self(import)
    }
}

/// Resolves imports against a directory on disk.
#[derive(Debug, Clone)]
pub struct DirResolver {
    root: PathBuf,
}

impl DirResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirResolver { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ImportResolver for DirResolver {
    fn exists(&self, import: &str) -> bool {
        self.root.join(import).exists()
    }
}

/// Compiled patterns for the text rules. Build once, evaluate many files.
#[derive(Debug, Clone)]
pub struct RuleSet {
    syntax: Regex,
    package: Regex,
    import: Regex,
    message: Regex,
    field_number: Regex,
    decimal_digit: Regex,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleSet {
    pub fn new() -> Self {
        RuleSet {
            syntax: compile(r#"syntax\s*=\s*"proto3"\s*;"#),
            package: compile(r"package\s+\w+\s*;"),
            import: compile(r#"import\s+"([^"]+)"\s*;"#),
            message: compile(r"message\s+(\w+)\s*\{"),
            field_number: compile(r"=\s*(\d+)\s*;"),
            decimal_digit: compile(r"^\p{Nd}$"),
        }
    }

    /// Run every rule against `text` and collect the findings.
    ///
    /// The returned report has an empty `file` name; callers that know
    /// the file set it afterwards.
    pub fn evaluate(&self, text: &str, resolver: &dyn ImportResolver) -> FileReport {
        let mut report = FileReport::new("");

        if !self.syntax.is_match(text) {
            report.findings.push(Finding::error(MSG_SYNTAX));
        }
        if !self.package.is_match(text) {
            report.findings.push(Finding::warning(MSG_PACKAGE));
        }
        if let Some(f) = balance("braces", text, '{', '}') {
            report.findings.push(f);
        }
        if let Some(f) = balance("parentheses", text, '(', ')') {
            report.findings.push(f);
        }
        for import in self.imports(text) {
            if !resolver.exists(import) {
                report
                    .findings
                    .push(Finding::error(format!("Import not found: {}", import)));
            }
        }

        report.definitions = self.messages(text);
        if report.definitions.is_empty() && !text.contains("service") {
            report.findings.push(Finding::warning(MSG_NO_DEFINITIONS));
        }

        if self.has_duplicates(self.field_numbers(text)) {
            report.findings.push(Finding::warning(MSG_DUPLICATE_NUMBERS));
        }
        report
    }

    /// Quoted paths of every `import "<path>";` statement, in text order.
    pub fn imports<'t>(&self, text: &'t str) -> Vec<&'t str> {
        captures(&self.import, text)
    }

    /// Names of every `message <Name> {` definition, in text order.
    pub fn messages(&self, text: &str) -> Vec<String> {
        captures(&self.message, text)
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Every integer in a `= <n>;` position. Also matches enum values and
    /// numeric defaults.
    pub fn field_numbers<'t>(&self, text: &'t str) -> Vec<&'t str> {
        captures(&self.field_number, text)
    }

    // Numbers compare by value: "01", "1" and fullwidth "１" are the same tag.
    fn has_duplicates<'t>(&self, numbers: impl IntoIterator<Item = &'t str>) -> bool {
        let mut seen = HashSet::new();
        numbers.into_iter().any(|n| {
            let ascii: String = n
                .chars()
                .filter_map(|c| char::from_digit(self.digit_value(c), 10))
                .collect();
            let trimmed = ascii.trim_start_matches('0');
            let value = if trimmed.is_empty() { "0" } else { trimmed };
            !seen.insert(value.to_string())
        })
    }

    // Decimal digits come in contiguous runs of ten starting at zero, so a
    // digit's value is its offset from the start of its run, modulo ten.
    fn digit_value(&self, c: char) -> u32 {
        if let Some(d) = c.to_digit(10) {
            return d;
        }
        let mut start = c as u32;
        while let Some(prev) = start.checked_sub(1).and_then(char::from_u32) {
            if !self.is_decimal_digit(prev) {
                break;
            }
            start -= 1;
        }
        (c as u32 - start) % 10
    }

    fn is_decimal_digit(&self, c: char) -> bool {
        let mut buf = [0u8; 4];
        self.decimal_digit.is_match(c.encode_utf8(&mut buf))
    }
}

/// Evaluate `text` with a one-off rule set.
pub fn evaluate(text: &str, resolver: &dyn ImportResolver) -> FileReport {
    RuleSet::new().evaluate(text, resolver)
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in rule pattern must compile")
}

fn captures<'t>(re: &Regex, text: &'t str) -> Vec<&'t str> {
    re.captures_iter(text)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str())
        .collect()
}

fn balance(what: &str, text: &str, open: char, close: char) -> Option<Finding> {
    let opened = text.chars().filter(|&c| c == open).count();
    let closed = text.chars().filter(|&c| c == close).count();
    if opened == closed {
        return None;
    }
    Some(Finding::error(format!(
        "Unbalanced {}: {} open, {} close",
        what, opened, closed
    )))
}
