//! probcond-viz CLI
//!
//! # Usage
//!
//! ```bash
//! # Plot results and print the report
//! probcond-viz results.csv
//!
//! # Save only, JSON report
//! probcond-viz results.csv --no-show --format json
//!
//! # Custom figure theme
//! probcond-viz results.csv --theme theme.yaml
//! ```

use clap::Parser;
use probcond_common::cli::styles;
use probcond_viz::cli::{self, Cli};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Cli::parse();

    let Some(input) = args.input.clone() else {
        println!("{}", cli::usage());
        return ExitCode::FAILURE;
    };

    match cli::run(&input, &args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            if !args.common.to_cli().is_quiet() {
                eprintln!("{}", styles::error(&format!("[{}] {e}", e.code())));
                if let Some(steps) = cli::remediation(&e) {
                    eprintln!("\n{steps}");
                }
            }
            ExitCode::FAILURE
        }
    }
}
