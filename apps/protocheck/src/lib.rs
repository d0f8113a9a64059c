//! protocheck core library.
//!
//! This crate exposes programmatic APIs for structurally checking Protocol
//! Buffer schema files without a schema compiler.
//!
//! High-level modules:
//! - `rules`: The pattern-based rule engine applied to one file's text.
//! - `check`: Runs the rules over an ordered file list and aggregates a verdict.
//! - `models`: Findings, per-file reports and run summaries.
//! - `config`: Discovery and effective configuration resolution.
//! - `output`: Human/JSON report rendering.
//! - `cli`: CLI argument parsing (binary uses this).
//! - `utils`: Console helpers.
pub mod check;
pub mod cli;
pub mod config;
pub mod models;
pub mod output;
pub mod rules;
pub mod utils;

pub use check::run;
pub use models::{FileReport, Finding, RunOutcome, RunSummary, Severity, Verdict};
pub use rules::{evaluate, DirResolver, ImportResolver, RuleSet};
