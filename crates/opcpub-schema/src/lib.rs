//! # opcpub-schema: Schema Generation & Validation
//!
//! Generates JSON Schemas for OPC Publisher configuration files and
//! validates candidate files against them.
//!
//! ## Generation (`published_nodes`, `security`, `telemetry`)
//!
//! - [`published_nodes_schema`]: the `publishednodes.json` schema, an array
//!   of records, each matching exactly one of three historical shapes, with
//!   optional NodeId value validation built from
//!   [`opcpub_core::build_node_id_pattern`].
//! - [`SecurityRequirementPolicy`]: optionally makes `UseSecurity` required
//!   and pins it to `true`.
//! - [`telemetry_configuration_schema`]: the telemetry configuration schema.
//!
//! ## Validation (`validate`)
//!
//! [`validate_document`] compiles a schema and returns a
//! [`ValidationOutcome`] whose violations carry instance and schema paths.
//! Failed `oneOf` alternatives are reported individually.
//!
//! ## Persistence (`persist`)
//!
//! [`write_schema_file`] writes tab-indented schema files.
//!
//! ## Crate Policy
//!
//! - Depends only on `opcpub-core` internally.
//! - Generation is pure; only `persist` and the `load_*` functions touch the
//!   file system.
//! - A generated schema that fails to compile is a generator defect and is
//!   surfaced as `SchemaValidationError::ValidatorBuildError`.

pub mod persist;
pub mod published_nodes;
pub mod security;
pub mod telemetry;
pub mod validate;

pub use persist::{to_schema_string, write_schema_file};
pub use published_nodes::{
    published_nodes_schema, AlternativeSchema, PublishedNodesSchema, RecordShape, SchemaOptions,
};
pub use security::SecurityRequirementPolicy;
pub use telemetry::telemetry_configuration_schema;
pub use validate::{
    check_schema, load_document_file, load_schema_file, validate_document, validate_file,
    SchemaValidationError, ValidationOutcome, ValidationViolations, Violation,
};
