//! # opcpub-cli: OPC Publisher Configuration Tooling
//!
//! Provides the `opcpub` command-line interface.
//!
//! ## Subcommands
//!
//! - `opcpub generate-publishednodes-schema` (`gps`) to write the
//!   `publishednodes.json` schema.
//! - `opcpub generate-telemetry-schema` (`gts`) to write the telemetry
//!   configuration schema.
//! - `opcpub validate` (`v`) to validate a configuration file against a
//!   previously generated schema.
//!
//! ```bash
//! opcpub gps -d output --gvv -v NodeId NamespaceIndex -r
//! opcpub validate -t publishednodes --cf sample_files/publishednodes.json
//! ```
//!
//! Every handler returns the process exit code: 0 on success, 1 when a
//! configuration file fails validation. Operational failures propagate as
//! `anyhow::Error` and exit with 2.

pub mod generate;
pub mod telemetry;
pub mod validate;

/// Default directory for generated schema files.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Default file name of the generated publishednodes schema.
pub const PUBLISHED_NODES_SCHEMA_NAME: &str = "publishednodes-schema.json";

/// Default file name of the generated telemetry configuration schema.
pub const TELEMETRY_SCHEMA_NAME: &str = "telemetryconfiguration-schema.json";

/// Default configuration file checked by `validate`.
pub const DEFAULT_CONFIGURATION_FILE: &str = "sample_files/publishednodes.json";
