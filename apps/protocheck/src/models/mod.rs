//! Shared data models for rule findings, per-file reports and run summaries.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
/// Finding severity. Only `Error` affects the verdict.
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// A single classified observation about one schema file.
pub struct Finding {
    pub severity: Severity,
    pub message: String,
}

impl Finding {
    pub fn error(message: impl Into<String>) -> Self {
        Finding {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Finding {
            severity: Severity::Warning,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// All findings for one schema file plus the message names it declares.
pub struct FileReport {
    pub file: String,
    pub found: bool,
    pub findings: Vec<Finding>,
    pub definitions: Vec<String>,
}

impl FileReport {
    /// Empty report for a file that exists.
    pub fn new(file: impl Into<String>) -> Self {
        FileReport {
            file: file.into(),
            found: true,
            findings: Vec::new(),
            definitions: Vec::new(),
        }
    }

    /// Report for an expected file that is absent from the root.
    pub fn missing(file: impl Into<String>) -> Self {
        FileReport {
            file: file.into(),
            found: false,
            findings: vec![Finding::error("File not found")],
            definitions: Vec::new(),
        }
    }

    pub fn errors(&self) -> impl Iterator<Item = &Finding> {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Finding> {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Warning)
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Fail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Whole-run failure that prevents any per-file processing.
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RunError {
    RootMissing { root: String },
}

impl RunError {
    pub fn message(&self) -> String {
        match self {
            RunError::RootMissing { root } => format!("{} directory not found", root),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Aggregated counts across every expected file.
pub struct RunSummary {
    pub files_expected: usize,
    pub files_found: usize,
    pub definitions: usize,
    pub errors: usize,
    pub warnings: usize,
    pub verdict: Verdict,
}

impl RunSummary {
    /// Sum the given reports. `run_errors` counts whole-run failures.
    pub fn from_reports(files_expected: usize, reports: &[FileReport], run_errors: usize) -> Self {
        let errors = run_errors + reports.iter().map(FileReport::error_count).sum::<usize>();
        let warnings = reports.iter().map(FileReport::warning_count).sum();
        RunSummary {
            files_expected,
            files_found: reports.iter().filter(|r| r.found).count(),
            definitions: reports.iter().map(|r| r.definitions.len()).sum(),
            errors,
            warnings,
            verdict: if errors > 0 {
                Verdict::Fail
            } else {
                Verdict::Pass
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Result of one check run: reports in expected order and the summary.
pub struct RunOutcome {
    pub root: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_error: Option<RunError>,
    pub reports: Vec<FileReport>,
    pub summary: RunSummary,
}

impl RunOutcome {
    /// Process exit code: 1 on failure, 0 otherwise. Warnings never fail.
    pub fn exit_code(&self) -> i32 {
        match self.summary.verdict {
            Verdict::Pass => 0,
            Verdict::Fail => 1,
        }
    }
}
