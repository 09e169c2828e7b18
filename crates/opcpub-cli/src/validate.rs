//! # Validate Subcommand
//!
//! Validates a publishednodes or telemetry configuration file against a
//! schema file written by one of the generate subcommands. Each violation is
//! logged at `error` level with its instance and schema paths.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use opcpub_schema::validate_file;

/// Kind of configuration file being validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConfigKind {
    #[value(name = "publishednodes")]
    PublishedNodes,
    #[value(name = "telemetry")]
    Telemetry,
}

impl ConfigKind {
    /// File name the matching generate subcommand writes by default.
    pub fn default_schema_name(&self) -> &'static str {
        match self {
            Self::PublishedNodes => crate::PUBLISHED_NODES_SCHEMA_NAME,
            Self::Telemetry => crate::TELEMETRY_SCHEMA_NAME,
        }
    }
}

/// Arguments for the `opcpub validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Type of configuration file to validate.
    #[arg(short = 't', long = "type", value_enum, default_value_t = ConfigKind::PublishedNodes)]
    pub kind: ConfigKind,

    /// Schema file to validate against. Defaults to the generated schema for
    /// the selected type under `output/`.
    #[arg(short = 's', long, visible_alias = "schema")]
    pub schema_file: Option<PathBuf>,

    /// Configuration file to validate (JSON, or YAML by extension).
    #[arg(
        long,
        visible_aliases = ["cf", "config-file"],
        default_value = crate::DEFAULT_CONFIGURATION_FILE
    )]
    pub configuration_file: PathBuf,
}

impl ValidateArgs {
    /// Schema file in effect.
    pub fn schema_path(&self) -> PathBuf {
        self.schema_file.clone().unwrap_or_else(|| {
            Path::new(crate::DEFAULT_OUTPUT_DIR).join(self.kind.default_schema_name())
        })
    }
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 when the file conforms, 1 when it does not.
pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let schema_path = args.schema_path();
    tracing::info!(
        kind = ?args.kind,
        configuration_file = %args.configuration_file.display(),
        schema_file = %schema_path.display(),
        "validating configuration file"
    );

    let outcome = validate_file(&args.configuration_file, &schema_path).with_context(|| {
        format!(
            "failed to validate {} against {}",
            args.configuration_file.display(),
            schema_path.display()
        )
    })?;

    match outcome.errors {
        None => {
            println!("{}: OK", args.configuration_file.display());
            Ok(0)
        }
        Some(errors) => {
            for violation in errors.violations() {
                tracing::error!(
                    instance_path = %violation.instance_path,
                    schema_path = %violation.schema_path,
                    "{}",
                    violation.message
                );
            }
            println!(
                "{}: FAILED ({} violation(s))\n{errors}",
                args.configuration_file.display(),
                errors.len()
            );
            Ok(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(flatten)]
        args: ValidateArgs,
    }

    fn parse(argv: &[&str]) -> ValidateArgs {
        let mut full = vec!["v"];
        full.extend_from_slice(argv);
        TestCli::try_parse_from(full).unwrap().args
    }

    #[test]
    fn test_defaults() {
        let args = parse(&[]);
        assert_eq!(args.kind, ConfigKind::PublishedNodes);
        assert_eq!(
            args.schema_path(),
            Path::new("output").join("publishednodes-schema.json")
        );
        assert_eq!(
            args.configuration_file,
            PathBuf::from("sample_files/publishednodes.json")
        );
    }

    #[test]
    fn test_telemetry_defaults_to_telemetry_schema() {
        let args = parse(&["-t", "telemetry", "--cf", "tc.json"]);
        assert_eq!(args.kind, ConfigKind::Telemetry);
        assert_eq!(
            args.schema_path(),
            Path::new("output").join("telemetryconfiguration-schema.json")
        );
        assert_eq!(args.configuration_file, PathBuf::from("tc.json"));
    }

    #[test]
    fn test_explicit_schema_file_and_aliases() {
        let args = parse(&["--schema", "s.json", "--config-file", "c.yaml"]);
        assert_eq!(args.schema_path(), PathBuf::from("s.json"));
        assert_eq!(args.configuration_file, PathBuf::from("c.yaml"));
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        assert!(TestCli::try_parse_from(["v", "-t", "opcnodes"]).is_err());
    }

    #[test]
    fn test_missing_schema_file_is_operational_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("publishednodes.json");
        std::fs::write(&config, "[]").unwrap();

        let args = ValidateArgs {
            kind: ConfigKind::PublishedNodes,
            schema_file: Some(dir.path().join("missing.json")),
            configuration_file: config,
        };
        assert!(run_validate(&args).is_err());
    }
}
