//! Configuration discovery and effective settings resolution.
//!
//! protocheck reads `protocheck.toml|yaml|yml` from the base directory (or
//! closest ancestor) and merges it with CLI flags to produce an `Effective`
//! config.
//! Defaults:
//! - `root`: `proto`
//! - `files`: `common.proto`, `patient_data.proto`, `simulation.proto`, `service.proto`
//! - `output`: `human`
//! - `list_limit`: 5
//!
//! Overrides precedence: CLI > config file > defaults.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_ROOT: &str = "proto";
pub const DEFAULT_FILES: [&str; 4] = [
    "common.proto",
    "patient_data.proto",
    "simulation.proto",
    "service.proto",
];
pub const DEFAULT_LIST_LIMIT: usize = 5;

const CONFIG_NAMES: [&str; 3] = ["protocheck.toml", "protocheck.yaml", "protocheck.yml"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid TOML in {path}: {source}")]
    Toml {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid YAML in {path}: {source}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("unknown output mode '{0}' (expected human or json)")]
    Output(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

impl OutputMode {
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        match s {
            "human" => Ok(OutputMode::Human),
            "json" => Ok(OutputMode::Json),
            other => Err(ConfigError::Output(other.to_string())),
        }
    }
}

#[derive(Debug, Default, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
/// Root configuration loaded from `protocheck.toml|yaml`.
pub struct CheckConfig {
    pub root: Option<String>,
    pub files: Option<Vec<String>>,
    pub output: Option<String>,
    pub list_limit: Option<usize>,
}

/// CLI-supplied overrides; `None` falls through to config and defaults.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub base_dir: Option<String>,
    pub root: Option<String>,
    pub files: Vec<String>,
    pub output: Option<String>,
    pub no_color: bool,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by the binary after applying precedence.
pub struct Effective {
    pub root: PathBuf,
    pub files: Vec<String>,
    pub output: OutputMode,
    pub color: bool,
    pub list_limit: usize,
    pub config_path: Option<PathBuf>,
}

/// Walk upward from `start` to find a directory holding a config file.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    // Relative starts like "." have no useful parents.
    let start = fs::canonicalize(start).unwrap_or_else(|_| start.to_path_buf());
    let mut cur = start.as_path();
    loop {
        for name in CONFIG_NAMES {
            let p = cur.join(name);
            if p.is_file() {
                return Some(p);
            }
        }
        cur = cur.parent()?;
    }
}

/// Parse a config file, choosing TOML or YAML by extension.
pub fn load_config(path: &Path) -> Result<CheckConfig, ConfigError> {
    let display = path.to_string_lossy().to_string();
    let s = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: display.clone(),
        source,
    })?;
    let is_toml = path.extension().and_then(|e| e.to_str()) == Some("toml");
    if is_toml {
        toml::from_str(&s).map_err(|source| ConfigError::Toml {
            path: display,
            source,
        })
    } else {
        serde_yaml::from_str(&s).map_err(|source| ConfigError::Yaml {
            path: display,
            source,
        })
    }
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(cli: &Overrides) -> Result<Effective, ConfigError> {
    let base_dir = PathBuf::from(cli.base_dir.as_deref().unwrap_or("."));
    let config_path = find_config(&base_dir);
    let cfg = match config_path.as_deref() {
        Some(p) => {
            log::debug!("loading config from {}", p.to_string_lossy());
            load_config(p)?
        }
        None => CheckConfig::default(),
    };

    // CLI root is relative to the base dir; config root to the config file.
    let root = match (cli.root.as_deref(), cfg.root.as_deref()) {
        (Some(r), _) => base_dir.join(r),
        (None, Some(r)) => config_dir(config_path.as_deref(), &base_dir).join(r),
        (None, None) => base_dir.join(DEFAULT_ROOT),
    };

    let files = if !cli.files.is_empty() {
        cli.files.clone()
    } else {
        cfg.files
            .unwrap_or_else(|| DEFAULT_FILES.iter().map(|s| s.to_string()).collect())
    };

    let output = OutputMode::parse(
        cli.output
            .as_deref()
            .or(cfg.output.as_deref())
            .unwrap_or("human"),
    )?;

    Ok(Effective {
        color: !cli.no_color && output == OutputMode::Human,
        list_limit: cfg.list_limit.unwrap_or(DEFAULT_LIST_LIMIT),
        root,
        files,
        output,
        config_path,
    })
}

fn config_dir<'a>(config_path: Option<&'a Path>, base_dir: &'a Path) -> &'a Path {
    config_path.and_then(Path::parent).unwrap_or(base_dir)
}
