//! docker-format CLI entry point
//!
//! Parses arguments, builds the effective configuration, initializes
//! logging (stderr) and dispatches to a command handler. Errors are printed
//! to stderr and mapped to an exit code by [`CliError::exit_code`].

mod cli;
mod commands;
mod error;
mod logging;
mod output;

use clap::Parser;

use docker_format_core::config::GeneralConfig;

use crate::cli::{Cli, Commands};
use crate::commands::{ConfigOverrides, resolve_config};
use crate::error::CliError;
use crate::output::OutputWriter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let code = match run(cli).await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("error: {e}");
            e.exit_code()
        }
    };
    std::process::exit(code);
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let writer = OutputWriter::new(cli.output);
    let mut overrides = ConfigOverrides {
        log_level: cli.log_level,
        containers_path: cli.containers_path,
        tag_rewrite: None,
    };

    match cli.command {
        Commands::Enrich(args) => {
            overrides.tag_rewrite = args.tag_rewrite;
            let config = resolve_config(&cli.config, &overrides).await?;
            init_logging(&config.general)?;
            commands::enrich::execute(args, &config).await
        }
        Commands::Inspect(args) => {
            let config = resolve_config(&cli.config, &overrides).await?;
            init_logging(&config.general)?;
            commands::inspect::execute(args, &config, &writer).await
        }
        Commands::Config(args) => {
            // A broken config file must still be reportable, so logging uses defaults here.
            let mut general = GeneralConfig::default();
            if let Some(level) = &overrides.log_level {
                general.log_level = level.clone();
            }
            init_logging(&general)?;
            commands::config::execute(args, &cli.config, &overrides, &writer).await
        }
    }
}

fn init_logging(general: &GeneralConfig) -> Result<(), CliError> {
    logging::init_tracing(general).map_err(|e| CliError::Config(e.to_string()))?;
    docker_format_core::metrics::describe_all();
    Ok(())
}
