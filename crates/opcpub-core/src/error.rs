//! # Error Types
//!
//! Errors raised while interpreting caller-supplied NodeId options. All
//! errors use `thiserror` for derive-based `Display` and `Error`.

use thiserror::Error;

/// Top-level error type for the core NodeId vocabulary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OpcPubError {
    /// A NodeId format token did not name one of the supported formats.
    #[error("unknown NodeId format {0:?}; expected one of ExpandedNodeId, NamespaceIndex, NodeId")]
    UnknownNodeIdFormat(String),
}
