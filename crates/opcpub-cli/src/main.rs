//! # opcpub CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use opcpub_cli::generate::{run_generate_published_nodes, GenPubSchemaArgs};
use opcpub_cli::telemetry::{run_generate_telemetry, GenTelSchemaArgs};
use opcpub_cli::validate::{run_validate, ValidateArgs};

/// OPC Publisher configuration schema tooling.
///
/// Generates JSON Schemas for `publishednodes.json` and the telemetry
/// configuration, and validates configuration files against them.
#[derive(Parser, Debug)]
#[command(name = "opcpub", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity.
    #[arg(long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate the JSON Schema for publishednodes.json files.
    #[command(name = "generate-publishednodes-schema", visible_alias = "gps")]
    GeneratePublishedNodes(GenPubSchemaArgs),

    /// Generate the JSON Schema for telemetry configuration files.
    #[command(name = "generate-telemetry-schema", visible_alias = "gts")]
    GenerateTelemetry(GenTelSchemaArgs),

    /// Validate a configuration file against a generated schema.
    #[command(visible_alias = "v")]
    Validate(ValidateArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG takes precedence over --verbose.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "opcpub starting");

    let result = match cli.command {
        Commands::GeneratePublishedNodes(args) => run_generate_published_nodes(&args),
        Commands::GenerateTelemetry(args) => run_generate_telemetry(&args),
        Commands::Validate(args) => run_validate(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}
