//! backup-tree CLI Binary
//!
//! Command-line interface for browsing backup run files and naming rules.

use anyhow::Context;
use backup_tree::logging::init_logging;
use backup_tree::tooling::cli::{Cli, CliContext};
use clap::Parser;
use std::process;

fn run(cli: &Cli) -> anyhow::Result<String> {
    let context = CliContext::new(cli.config.clone()).context("loading configuration")?;

    let mut logging = context.config().logging.clone();
    cli.apply_log_overrides(&mut logging);
    init_logging(Some(&logging)).context("initializing logging")?;

    let output = context.execute(&cli.command)?;
    Ok(output)
}

fn main() {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}
