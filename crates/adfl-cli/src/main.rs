//! adfl - table lineage from Data Factory / Synapse copy activities

use clap::Parser;
use std::process::ExitCode;

mod cli;
mod commands;

use cli::Cli;
use commands::{extract, ls};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.global.verbose);

    let result = match &cli.command {
        cli::Commands::Extract(args) => extract::execute(args, &cli.global).await,
        cli::Commands::Ls(args) => ls::execute(args, &cli.global).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// `info` by default, `debug` with `--verbose`; `RUST_LOG` overrides both
fn init_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}
