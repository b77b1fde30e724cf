//! Evaluar CLI
//!
//! Configuration tooling for the evaluar library.
//!
//! # Usage
//!
//! ```bash
//! # Validate a config, reporting every issue found
//! evaluar validate eval_config.yaml
//!
//! # Validate with a detailed summary
//! evaluar validate eval_config.yaml --detailed
//!
//! # Show config info
//! evaluar info eval_config.yaml --format json
//!
//! # Generate a starter config
//! evaluar init --template thresholds --output eval_config.yaml
//! ```

use clap::Parser;
use evaluar::cli::{run_command, Cli};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
