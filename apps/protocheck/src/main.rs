//! protocheck CLI binary entry point.
//! Resolves configuration, runs the check and prints the report.

use clap::Parser;
use protocheck::cli::Cli;
use protocheck::config::{self, OutputMode};
use protocheck::output::{self, RenderOptions};
use protocheck::utils;

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let eff = match config::resolve_effective(&cli.overrides()) {
        Ok(eff) => eff,
        Err(e) => {
            eprintln!("{} {}", utils::error_prefix(!cli.no_color), e);
            std::process::exit(2);
        }
    };
    if let Some(p) = eff.config_path.as_ref() {
        if eff.output == OutputMode::Human {
            eprintln!(
                "{} using configuration from {}",
                utils::note_prefix(eff.color),
                p.to_string_lossy()
            );
        }
    }

    let outcome = protocheck::run(&eff.root, &eff.files);
    match eff.output {
        OutputMode::Json => match output::render_json(&outcome) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("{} failed to serialize report: {}", utils::error_prefix(eff.color), e);
                std::process::exit(2);
            }
        },
        OutputMode::Human => {
            let opts = RenderOptions {
                color: utils::colors_enabled(eff.color),
                list_limit: eff.list_limit,
            };
            print!("{}", output::render_human(&outcome, opts));
        }
    }
    std::process::exit(outcome.exit_code());
}
