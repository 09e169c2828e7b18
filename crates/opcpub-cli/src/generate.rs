//! # Generate Publishednodes Schema Subcommand
//!
//! Builds the `publishednodes.json` schema from the command-line options,
//! checks that it compiles and writes it under the output directory.
//!
//! Boolean flags come in pairs (`--use-security` / `--no-use-security`);
//! the last one given wins.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use opcpub_core::NodeIdFormat;
use opcpub_schema::{check_schema, published_nodes_schema, write_schema_file, SchemaOptions};

/// Arguments for the `opcpub generate-publishednodes-schema` subcommand.
#[derive(Args, Debug)]
pub struct GenPubSchemaArgs {
    /// Folder location of the schema output file.
    #[arg(short = 'd', long, default_value = crate::DEFAULT_OUTPUT_DIR)]
    pub directory: PathBuf,

    /// Output schema file name.
    #[arg(short = 'n', long, default_value = crate::PUBLISHED_NODES_SCHEMA_NAME)]
    pub name: String,

    /// Validate the values of `Id`, `ExpandedNodeId` and `Identifier` fields.
    #[arg(
        long,
        visible_alias = "gvv",
        overrides_with = "no_gen_value_validation"
    )]
    pub gen_value_validation: bool,

    #[arg(long, alias = "no-gvv", hide = true, overrides_with = "gen_value_validation")]
    pub no_gen_value_validation: bool,

    /// NodeId formats accepted by the `Id` field.
    #[arg(
        short = 'v',
        long,
        visible_alias = "vo",
        num_args = 1..,
        default_values_t = default_formats()
    )]
    pub validate_options: Vec<NodeIdFormat>,

    /// With `--require-use-security`, require `UseSecurity: true`.
    #[arg(
        short = 'u',
        long,
        visible_alias = "us",
        overrides_with = "no_use_security"
    )]
    pub use_security: bool,

    #[arg(long, alias = "no-us", hide = true, overrides_with = "use_security")]
    pub no_use_security: bool,

    /// Make `UseSecurity` a required field of every record that declares it.
    #[arg(
        short = 'r',
        long,
        visible_alias = "rus",
        overrides_with = "no_require_use_security"
    )]
    pub require_use_security: bool,

    #[arg(long, alias = "no-rus", hide = true, overrides_with = "require_use_security")]
    pub no_require_use_security: bool,
}

fn default_formats() -> Vec<NodeIdFormat> {
    SchemaOptions::default().formats
}

impl GenPubSchemaArgs {
    /// Generation options. Formats are sorted and deduplicated so the output
    /// does not depend on the order given on the command line.
    pub fn schema_options(&self) -> SchemaOptions {
        let mut formats = self.validate_options.clone();
        formats.sort();
        formats.dedup();
        SchemaOptions {
            generate_value_validation: self.gen_value_validation,
            formats,
            use_security: self.use_security,
            require_use_security: self.require_use_security,
        }
    }

    /// Destination of the generated schema.
    pub fn output_path(&self) -> PathBuf {
        self.directory.join(&self.name)
    }
}

/// Execute the generate-publishednodes-schema subcommand.
pub fn run_generate_published_nodes(args: &GenPubSchemaArgs) -> Result<u8> {
    let options = args.schema_options();
    tracing::info!(
        gen_value_validation = options.generate_value_validation,
        formats = ?options.formats,
        use_security = options.use_security,
        require_use_security = options.require_use_security,
        "generating publishednodes schema"
    );

    let schema = published_nodes_schema(&options);
    check_schema(&schema).context("generated publishednodes schema does not compile")?;

    let path = args.output_path();
    write_schema_file(&path, &schema)
        .with_context(|| format!("failed to write schema file {}", path.display()))?;

    tracing::info!(path = %path.display(), "wrote publishednodes schema");
    println!("Schema written to {}", path.display());
    Ok(0)
}
