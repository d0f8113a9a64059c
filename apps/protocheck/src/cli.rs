//! CLI argument parsing via `clap`.

use crate::config::Overrides;
use clap::Parser;

#[derive(Parser)]
#[command(
    name = "protocheck",
    version,
    about = "Structural pre-check for Protocol Buffer schema files",
    long_about = "protocheck: a fast structural check of .proto files without protoc.\n\nWith no arguments it checks common.proto, patient_data.proto, simulation.proto and service.proto under ./proto.\n\nConfiguration precedence: CLI > protocheck.toml > defaults.",
    after_help = "Examples:\n  protocheck\n  protocheck --root schemas --file api.proto --file types.proto\n  protocheck --output json"
)]
/// Top-level CLI options. Every flag is optional.
pub struct Cli {
    #[arg(long, help = "Directory where config discovery starts (default: current dir)")]
    pub base_dir: Option<String>,
    #[arg(long, help = "Schema root directory (default: proto)")]
    pub root: Option<String>,
    #[arg(long = "file", help = "Expected schema file, repeatable; replaces the default list")]
    pub files: Vec<String>,
    #[arg(long, help = "Output mode: human|json (default: human)")]
    pub output: Option<String>,
    #[arg(long, action = clap::ArgAction::SetTrue, help = "Disable colored output")]
    pub no_color: bool,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            base_dir: self.base_dir.clone(),
            root: self.root.clone(),
            files: self.files.clone(),
            output: self.output.clone(),
            no_color: self.no_color,
        }
    }
}
