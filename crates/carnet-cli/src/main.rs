use std::io;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod config;
mod format;
mod util;

use crate::cli::{Cli, Commands};
use crate::config::{Config, resolve_data_dir, resolve_format};
use crate::format::FormatOptions;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Handle completions command early (before tracing init)
    if let Commands::Completions { shell } = cli.command {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "carnet", &mut io::stdout());
        return Ok(());
    }

    // Initialize tracing; data goes to stdout, diagnostics to stderr.
    let filter = if cli.quiet {
        EnvFilter::new("error")
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = Config::load();
    let opts = FormatOptions::new(cli.no_color || config.no_color);
    let output = cli.output.as_ref();

    // The config command never touches the store.
    if let Commands::Config { action } = cli.command {
        return commands::config::cmd_config(action, cli.quiet);
    }

    let store = carnet_store::Store::open(resolve_data_dir(cli.data_dir.clone(), &config))?;
    tracing::debug!("Using data directory {}", store.root().display());

    match cli.command {
        Commands::Vehicle { action } => {
            let action = match action {
                cli::VehicleAction::List { format } => cli::VehicleAction::List {
                    format: resolve_format(format, &config),
                },
                cli::VehicleAction::Show { name, format } => cli::VehicleAction::Show {
                    name,
                    format: resolve_format(format, &config),
                },
                other => other,
            };
            commands::vehicle::cmd_vehicle(&store, action, output, cli.quiet, &opts)
        }
        Commands::Service { action } => {
            let action = match action {
                cli::ServiceAction::List {
                    vehicle,
                    format,
                    no_header,
                } => cli::ServiceAction::List {
                    vehicle,
                    format: resolve_format(format, &config),
                    no_header,
                },
                other => other,
            };
            commands::service::cmd_service(&store, action, output, cli.quiet, &opts)
        }
        Commands::Fuel { action } => {
            let action = match action {
                cli::FuelAction::List {
                    vehicle,
                    format,
                    no_header,
                } => cli::FuelAction::List {
                    vehicle,
                    format: resolve_format(format, &config),
                    no_header,
                },
                other => other,
            };
            commands::fuel::cmd_fuel(&store, action, output, cli.quiet, &opts)
        }
        Commands::Dossier { vehicle, file } => {
            commands::dossier::cmd_dossier(&store, &vehicle, file, cli.quiet)
        }
        Commands::Status { vehicle, format } => commands::status::cmd_status(
            &store,
            &vehicle,
            resolve_format(format, &config),
            &config,
            output,
            &opts,
        ),
        Commands::Report { vehicle } => {
            commands::report::cmd_report(&store, &vehicle, &config, output, cli.quiet)
        }
        Commands::Config { .. } | Commands::Completions { .. } => {
            // Already handled above
            unreachable!()
        }
    }
}
