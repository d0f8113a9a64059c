use protocheck::config::DEFAULT_FILES;
use protocheck::models::{RunError, Severity, Verdict};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const COMMON: &str = r#"syntax = "proto3";

package tumordtwin;

message Vector3 {
  double x = 1;
  double y = 2;
  double z = 3;
}

message Timestamp {
  int64 seconds = 4;
  int32 nanos = 5;
}
"#;

const PATIENT_DATA: &str = r#"syntax = "proto3";

package tumordtwin;

import "common.proto";

message PatientData {
  string patient_id = 1;
  Timestamp acquired_at = 2;
}
"#;

const SIMULATION: &str = r#"syntax = "proto3";

package tumordtwin;

import "common.proto";

message SimulationParameters {
  int32 grid_size_x = 1;
  int32 grid_size_y = 2;
  int32 grid_size_z = 3;
  double time_step = 4;
}
"#;

const SERVICE: &str = r#"syntax = "proto3";

package tumordtwin;

import "patient_data.proto";
import "simulation.proto";

service SimulationService {
  rpc StartSimulation(SimulationParameters) returns (PatientData);
}
"#;

fn default_files() -> Vec<String> {
    DEFAULT_FILES.iter().map(|s| s.to_string()).collect()
}

fn write_all(root: &Path) {
    fs::create_dir_all(root).unwrap();
    fs::write(root.join("common.proto"), COMMON).unwrap();
    fs::write(root.join("patient_data.proto"), PATIENT_DATA).unwrap();
    fs::write(root.join("simulation.proto"), SIMULATION).unwrap();
    fs::write(root.join("service.proto"), SERVICE).unwrap();
}

#[test]
fn root_missing_fails_without_file_reports() {
    let dir = tempdir().unwrap();
    let out = protocheck::run(&dir.path().join("proto"), &default_files());
    assert!(matches!(out.run_error, Some(RunError::RootMissing { .. })));
    assert!(out.reports.is_empty());
    assert_eq!(out.summary.verdict, Verdict::Fail);
    assert_eq!(out.exit_code(), 1);
}

#[test]
fn all_files_well_formed_passes() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("proto");
    write_all(&root);

    let out = protocheck::run(&root, &default_files());
    for r in &out.reports {
        assert!(r.findings.is_empty(), "{}: {:?}", r.file, r.findings);
    }
    assert_eq!(out.summary.files_expected, 4);
    assert_eq!(out.summary.files_found, 4);
    assert_eq!(out.summary.errors, 0);
    assert_eq!(out.summary.warnings, 0);
    assert_eq!(out.summary.definitions, 4);
    assert_eq!(out.summary.verdict, Verdict::Pass);
    assert_eq!(out.exit_code(), 0);
}

#[test]
fn one_missing_file_fails_with_single_error() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("proto");
    write_all(&root);
    fs::remove_file(root.join("simulation.proto")).unwrap();
    // service.proto imports simulation.proto, so drop that import too.
    fs::write(
        root.join("service.proto"),
        SERVICE.replace("import \"simulation.proto\";\n", ""),
    )
    .unwrap();

    let out = protocheck::run(&root, &default_files());
    assert_eq!(out.summary.errors, 1);
    assert_eq!(out.summary.verdict, Verdict::Fail);
    assert_eq!(out.exit_code(), 1);
    let missing = &out.reports[2];
    assert_eq!(missing.file, "simulation.proto");
    assert!(!missing.found);
    assert_eq!(missing.findings[0].message, "File not found");
}

#[test]
fn unclosed_message_reports_literal_brace_tally() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("proto");
    write_all(&root);
    fs::write(
        root.join("common.proto"),
        "syntax = \"proto3\";\npackage p;\nmessage Foo { field int32 x = 1; ",
    )
    .unwrap();

    let out = protocheck::run(&root, &default_files());
    let common = &out.reports[0];
    let errors: Vec<_> = common.errors().collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].severity, Severity::Error);
    assert_eq!(errors[0].message, "Unbalanced braces: 1 open, 0 close");
    assert_eq!(common.definitions, vec!["Foo"]);
    assert_eq!(out.exit_code(), 1);
}

#[test]
fn warnings_alone_keep_exit_code_zero() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("proto");
    write_all(&root);
    fs::write(
        root.join("common.proto"),
        COMMON.replace("package tumordtwin;", "").replace("= 5;", "= 4;"),
    )
    .unwrap();

    let out = protocheck::run(&root, &default_files());
    assert_eq!(out.summary.errors, 0);
    assert_eq!(out.summary.warnings, 2);
    assert_eq!(out.summary.verdict, Verdict::Pass);
    assert_eq!(out.exit_code(), 0);
}
