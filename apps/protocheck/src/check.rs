//! Check runner over the expected schema files.
//!
//! Produces a `RunOutcome` with one `FileReport` per expected file, in the
//! order given, and a summary whose verdict fails on any error. Nothing
//! here aborts early except a missing root directory.

use crate::models::{FileReport, Finding, RunError, RunOutcome, RunSummary};
use crate::rules::{DirResolver, RuleSet};
use rayon::prelude::*;
use std::fs;
use std::io;
use std::path::Path;

/// Run all rules over `files` located under `root`.
///
/// Files are evaluated in parallel; reports come back in input order so
/// rendering is deterministic.
pub fn run(root: &Path, files: &[String]) -> RunOutcome {
    let root_str = root.to_string_lossy().to_string();
    if !root.is_dir() {
        log::debug!("schema root {} does not exist", root_str);
        let reports = Vec::new();
        return RunOutcome {
            summary: RunSummary::from_reports(files.len(), &reports, 1),
            run_error: Some(RunError::RootMissing { root: root_str.clone() }),
            root: root_str,
            reports,
        };
    }

    log::debug!("checking {} file(s) under {}", files.len(), root_str);
    let rules = RuleSet::new();
    let resolver = DirResolver::new(root);
    let reports: Vec<FileReport> = files
        .par_iter()
        .map(|name| check_file(&rules, &resolver, name))
        .collect();

    RunOutcome {
        summary: RunSummary::from_reports(files.len(), &reports, 0),
        run_error: None,
        root: root_str,
        reports,
    }
}

/// Load and evaluate one file relative to the resolver's root.
fn check_file(rules: &RuleSet, resolver: &DirResolver, name: &str) -> FileReport {
    let path = resolver.root().join(name);
    if !path.exists() {
        log::info!("expected file {} not found", path.to_string_lossy());
        return FileReport::missing(name);
    }
    log::debug!("checking {}", path.to_string_lossy());
    let text = match fs::read_to_string(&path) {
        Ok(s) => s,
        Err(e) => {
            log::warn!("failed to read {}: {}", path.to_string_lossy(), e);
            let mut report = FileReport::new(name);
            report.findings.push(Finding::error(read_failure(&e)));
            return report;
        }
    };
    let mut report = rules.evaluate(&text, resolver);
    report.file = name.to_string();
    report
}

fn read_failure(e: &io::Error) -> String {
    match e.kind() {
        io::ErrorKind::InvalidData => "File is not valid UTF-8 text".to_string(),
        _ => format!("Unable to read file: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Verdict;
    use tempfile::tempdir;

    const GOOD: &str = "syntax = \"proto3\";\npackage p;\nmessage A { int32 a = 1; }\n";

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_missing_root_aborts_run() {
        let dir = tempdir().unwrap();
        let out = run(&dir.path().join("proto"), &names(&["a.proto"]));
        assert!(matches!(out.run_error, Some(RunError::RootMissing { .. })));
        assert!(out.reports.is_empty());
        assert_eq!(out.summary.errors, 1);
        assert_eq!(out.exit_code(), 1);
    }

    #[test]
    fn test_reports_follow_expected_order() {
        let dir = tempdir().unwrap();
        for n in ["c.proto", "a.proto", "b.proto"] {
            fs::write(dir.path().join(n), GOOD).unwrap();
        }
        let order = names(&["c.proto", "a.proto", "b.proto"]);
        let out = run(dir.path(), &order);
        let got: Vec<&str> = out.reports.iter().map(|r| r.file.as_str()).collect();
        assert_eq!(got, vec!["c.proto", "a.proto", "b.proto"]);
        assert_eq!(out.summary.verdict, Verdict::Pass);
        assert_eq!(out.summary.definitions, 3);
    }

    #[test]
    fn test_missing_file_does_not_stop_others() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.proto"), "message Broken {").unwrap();
        let out = run(dir.path(), &names(&["a.proto", "b.proto"]));
        assert!(!out.reports[0].found);
        assert_eq!(out.reports[0].findings, vec![Finding::error("File not found")]);
        assert!(out.reports[1].found);
        assert_eq!(out.reports[1].definitions, vec!["Broken"]);
        assert_eq!(out.summary.files_found, 1);
        assert_eq!(out.summary.errors, 3);
    }

    #[test]
    fn test_invalid_utf8_becomes_file_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("bin.proto"), [0xff, 0xfe, 0x00, 0x80]).unwrap();
        let out = run(dir.path(), &names(&["bin.proto"]));
        assert_eq!(
            out.reports[0].findings,
            vec![Finding::error("File is not valid UTF-8 text")]
        );
        assert_eq!(out.summary.verdict, Verdict::Fail);
    }

    #[test]
    fn test_imports_resolve_against_root() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("common.proto"), GOOD).unwrap();
        let svc = "syntax = \"proto3\";\npackage p;\nimport \"common.proto\";\nimport \"nope.proto\";\nservice S {}\n";
        fs::write(dir.path().join("service.proto"), svc).unwrap();
        let out = run(dir.path(), &names(&["service.proto"]));
        assert_eq!(
            out.reports[0].findings,
            vec![Finding::error("Import not found: nope.proto")]
        );
    }
}
