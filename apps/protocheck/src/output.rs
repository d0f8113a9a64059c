//! Output rendering for check runs.
//!
//! Supports `human` (default) and `json` outputs. The human form mirrors
//! the classic verification banner layout; the JSON form serializes the
//! whole `RunOutcome` including the summary.

use crate::models::{FileReport, RunOutcome, Verdict};
use owo_colors::OwoColorize;

const RULE_WIDTH: usize = 60;

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub color: bool,
    /// Maximum message names listed per file.
    pub list_limit: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            color: false,
            list_limit: crate::config::DEFAULT_LIST_LIMIT,
        }
    }
}

struct Lines {
    out: String,
    color: bool,
}

impl Lines {
    fn line(&mut self, s: impl AsRef<str>) {
        self.out.push_str(s.as_ref());
        self.out.push('\n');
    }

    fn blank(&mut self) {
        self.out.push('\n');
    }

    fn banner(&mut self, title: &str) {
        let rule = "=".repeat(RULE_WIDTH);
        self.line(&rule);
        if self.color {
            self.line(title.bold().to_string());
        } else {
            self.line(title);
        }
        self.line(&rule);
    }

    fn paint_red(&self, s: &str) -> String {
        if self.color {
            s.red().bold().to_string()
        } else {
            s.to_string()
        }
    }

    fn paint_yellow(&self, s: &str) -> String {
        if self.color {
            s.yellow().bold().to_string()
        } else {
            s.to_string()
        }
    }

    fn paint_green(&self, s: &str) -> String {
        if self.color {
            s.green().bold().to_string()
        } else {
            s.to_string()
        }
    }
}

/// Render the human-readable report as a single string.
pub fn render_human(outcome: &RunOutcome, opts: RenderOptions) -> String {
    let mut w = Lines {
        out: String::new(),
        color: opts.color,
    };
    w.banner("Protocol Buffer Files Verification");
    w.blank();

    if let Some(err) = &outcome.run_error {
        w.line(format!("{} {}", w.paint_red("Error:"), err.message()));
        return w.out;
    }

    for report in &outcome.reports {
        render_file(&mut w, report, opts.list_limit);
    }

    let s = &outcome.summary;
    w.banner("Summary");
    w.line(format!("Files checked: {}", s.files_expected));
    w.line(format!("Files found: {}", s.files_found));
    w.line(format!("Total messages: {}", s.definitions));
    w.line(format!("Errors: {}", s.errors));
    w.line(format!("Warnings: {}", s.warnings));
    w.blank();

    match s.verdict {
        Verdict::Fail => {
            w.line(w.paint_red("❌ VERIFICATION FAILED"));
            w.blank();
            w.line("Errors found:");
            for report in &outcome.reports {
                for e in report.errors() {
                    w.line(format!("  - {}: {}", report.file, e.message));
                }
            }
        }
        Verdict::Pass => {
            w.line(w.paint_green("✅ VERIFICATION PASSED"));
            w.blank();
            w.line("All proto files have correct basic syntax.");
            w.line("Note: Full validation requires protoc compiler.");
            if s.warnings > 0 {
                w.blank();
                w.line(format!("{} warning(s) - review recommended", s.warnings));
            }
        }
    }
    w.out
}

fn render_file(w: &mut Lines, report: &FileReport, list_limit: usize) {
    if !report.found {
        w.line(format!("{} {}: FILE NOT FOUND", w.paint_red("❌"), report.file));
        return;
    }
    w.line(format!("Checking {}...", report.file));

    let errors: Vec<_> = report.errors().collect();
    if errors.is_empty() {
        w.line(format!("  {} No syntax errors", w.paint_green("✓")));
    } else {
        w.line(format!("  {} {} error(s):", w.paint_red("❌"), errors.len()));
        for e in errors {
            w.line(format!("     - {}", e.message));
        }
    }

    let warnings: Vec<_> = report.warnings().collect();
    if !warnings.is_empty() {
        w.line(format!("  {}  {} warning(s):", w.paint_yellow("⚠️"), warnings.len()));
        for warn in warnings {
            w.line(format!("     - {}", warn.message));
        }
    }

    let defs = &report.definitions;
    if !defs.is_empty() {
        let shown: Vec<&str> = defs.iter().take(list_limit).map(String::as_str).collect();
        w.line(format!(
            "  {} {} message(s) defined: {}",
            w.paint_green("✓"),
            defs.len(),
            shown.join(", ")
        ));
        if defs.len() > shown.len() {
            w.line(format!("     ... and {} more", defs.len() - shown.len()));
        }
    }
    w.blank();
}

/// Serialize the outcome as pretty JSON.
pub fn render_json(outcome: &RunOutcome) -> serde_json::Result<String> {
    serde_json::to_string_pretty(outcome)
}
