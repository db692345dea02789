//! Tendernav CLI Binary
//!
//! Command-line interface for permission-aware navigation menus.

use clap::Parser;
use std::process;
use tendernav::config::ConfigLoader;
use tendernav::logging::{init_logging, LoggingOverrides};
use tendernav::notice::Notice;
use tendernav::tooling::cli::{Cli, CliContext};
use tendernav::tooling::format::format_notice;

fn fail(err: &tendernav::error::ApiError) -> ! {
    eprintln!("{}", format_notice(&Notice::from_error(err)));
    process::exit(1);
}

fn main() {
    let cli = Cli::parse();

    let mut config = match ConfigLoader::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => fail(&e),
    };
    if let Some(user) = cli.user.clone() {
        config.session.user = user;
    }

    let overrides = LoggingOverrides {
        verbose: cli.verbose,
        level: cli.log_level.clone(),
        format: cli.log_format.clone(),
        output: cli.log_output.clone(),
        file: cli.log_file.clone(),
    };
    let logging = config.logging.clone().with_env().with_overrides(&overrides);
    if let Err(e) = init_logging(&logging, Some(&config.installation.id)) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let context = match CliContext::from_config(config) {
        Ok(ctx) => ctx,
        Err(e) => fail(&e),
    };

    match context.execute(&cli.command) {
        Ok(output) => println!("{}", output),
        Err(e) => fail(&e),
    }
}
