//! # Generate Telemetry Schema Subcommand

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use opcpub_schema::{check_schema, telemetry_configuration_schema, write_schema_file};

/// Arguments for the `opcpub generate-telemetry-schema` subcommand.
#[derive(Args, Debug)]
pub struct GenTelSchemaArgs {
    /// Folder location of the schema output file.
    #[arg(short = 'd', long, default_value = crate::DEFAULT_OUTPUT_DIR)]
    pub directory: PathBuf,

    /// Output schema file name.
    #[arg(short = 'n', long, default_value = crate::TELEMETRY_SCHEMA_NAME)]
    pub name: String,
}

/// Execute the generate-telemetry-schema subcommand.
pub fn run_generate_telemetry(args: &GenTelSchemaArgs) -> Result<u8> {
    let schema = telemetry_configuration_schema();
    check_schema(&schema).context("generated telemetry schema does not compile")?;

    let path = args.directory.join(&args.name);
    write_schema_file(&path, &schema)
        .with_context(|| format!("failed to write schema file {}", path.display()))?;

    tracing::info!(path = %path.display(), "wrote telemetry configuration schema");
    println!("Schema written to {}", path.display());
    Ok(0)
}
