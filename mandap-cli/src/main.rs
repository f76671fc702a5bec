//! Mandap CLI entry point.

use clap::Parser;
use mandap_cli::{install_logging, load_config, open_store, Cli, CliError};
use std::process::ExitCode;

fn run(cli: Cli) -> Result<String, CliError> {
    let (config, source) = load_config(cli.config)?;
    install_logging(&config.log_filter)?;
    tracing::debug!(source = ?source, backend = ?config.storage.backend, "configuration loaded");

    let store = open_store(&config)?;
    let _changes = store.subscribe_all(|event| {
        let count = event.value.as_array().map_or(0, |items| items.len());
        tracing::info!(key = %event.key, count, "collection changed");
    });

    cli.command.execute(&store)
}

fn main() -> ExitCode {
    // Argument errors exit here, before a data file is opened.
    let cli = Cli::parse();
    match run(cli) {
        Ok(output) => {
            println!("{}", output.trim_end());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {}", err);
            u8::try_from(err.exit_code())
                .map(ExitCode::from)
                .unwrap_or(ExitCode::FAILURE)
        }
    }
}
