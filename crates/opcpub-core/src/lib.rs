//! # opcpub-core: Foundational Types for the OPC Publisher Schema Tooling
//!
//! Defines the NodeId vocabulary shared by the schema generator and the
//! validator, and the builder for the composite NodeId regular expression
//! embedded in generated schemas.
//!
//! ## Key Design Principles
//!
//! 1. **Closed format set.** `NodeIdFormat` parses only the three known
//!    surface names. A mistyped format is an error at the boundary, never a
//!    silently missing branch in the generated pattern.
//!
//! 2. **Structural pattern composition.** Every `(format, kind)` pair is a
//!    `NodeIdAlternative` value rendered on its own and joined with `|` at
//!    the end.
//!
//! 3. **Stable output.** Qualifier, integer, GUID and byte-string fragments
//!    are identical to the ones embedded in deployed `publishednodes`
//!    schemas. The string fragment accepts a superset of what those schemas
//!    accepted, so previously valid files stay valid.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `opcpub-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod format;
pub mod pattern;

// Re-export primary types for ergonomic imports.
pub use error::OpcPubError;
pub use format::{NodeIdFormat, NodeIdKind};
pub use pattern::{build_node_id_pattern, NodeIdAlternative, NodeIdPattern};
