//! quickcal CLI entry point.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, warn};

use quickcal_client::cli::{Cli, Command, ConfigAction};
use quickcal_client::commands;
use quickcal_client::config::ClientConfig;
use quickcal_client::error::{ClientError, ClientResult};
use quickcal_core::{TracingConfig, init_tracing};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // An explicit --config must load; the default file is optional.
    let (config, config_error) = match cli.config {
        Some(ref path) => match ClientConfig::load_from(path) {
            Ok(config) => (config, None),
            Err(e) => {
                eprintln!("error: {}", ClientError::Config(e));
                return ExitCode::FAILURE;
            }
        },
        None => match ClientConfig::load() {
            Ok(config) => (config, None),
            Err(e) => (ClientConfig::default(), Some(e)),
        },
    };

    let tracing_config = TracingConfig::for_cli(cli.debug || config.debug)
        .with_format(config.log.format)
        .with_filter(config.log.filter.clone());
    if let Err(e) = init_tracing(tracing_config) {
        eprintln!("warning: {}", e);
    }
    if let Some(e) = config_error {
        warn!(error = %e, "ignoring default config file");
    }

    match run(cli, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, config: ClientConfig) -> ClientResult<()> {
    let zone = cli.zone.unwrap_or(config.environment.zone);
    debug!(zone = %zone, "parsing environment");

    match cli.command {
        Command::Link(ref args) => commands::link::run(args, &config, zone),
        Command::Extract(ref args) => commands::extract::run(args, zone),
        Command::Inject(ref args) => commands::inject::run(args),
        Command::Config { ref action } => {
            let path = config_path(&cli);
            match action {
                ConfigAction::Dump => commands::config::dump(&config, &path),
                ConfigAction::Validate => commands::config::validate(&path),
                ConfigAction::Path => commands::config::path(&path),
            }
        }
    }
}

fn config_path(cli: &Cli) -> PathBuf {
    cli.config.clone().unwrap_or_else(ClientConfig::default_path)
}
