//! # NodeId Formats and Kinds
//!
//! An OPC UA NodeId is written as `<kind letter>=<value>`, optionally
//! preceded by a namespace qualifier. The qualifier convention is the
//! *format*; the value syntax is the *kind*.
//!
//! | Format | Example |
//! |--------|---------|
//! | `NodeId` | `i=2258` |
//! | `NamespaceIndex` | `ns=2;s=AlternatingBoolean` |
//! | `ExpandedNodeId` | `nsu=http://opcfoundation.org/UA/;i=2258` |
//!
//! Namespace indexes are positions in the server's namespace table and can
//! change when the information model is regenerated. `ExpandedNodeId` is the
//! preferred, stable form.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::OpcPubError;

/// Namespace URI qualifier. The URI must end with a resource-path slash
/// before the separating semicolon.
const EXPANDED_NAMESPACE_QUALIFIER: &str =
    r"^nsu=http[s]?://(?:[a-zA-Z]|[0-9]|[$-_@.&+]|[!*(),]|(?:%[0-9a-fA-F][0-9a-fA-F]))+/;";

/// Numeric namespace-index qualifier.
const NAMESPACE_INDEX_QUALIFIER: &str = r"^ns=(\d+);";

const INTEGER_BODY: &str = r"i=(\d+)$";

/// Any non-empty Unicode text. The regex engine matches code points, so
/// ASCII and non-ASCII characters are the two halves of the alphabet.
const STRING_BODY: &str = r"s=([\x00-\x7F]|[^\x00-\x7F])+$";

const GUID_BODY: &str =
    r"g=([0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12})$";

/// Padded standard base64.
const BYTE_STRING_BODY: &str =
    r"b=(?:[A-Za-z\d+/]{4})*(?:[A-Za-z\d+/]{3}=|[A-Za-z\d+/]{2}==)$";

/// Addressing convention used to name a node.
///
/// Variant order is the lexical order of the surface names, so sorting a
/// format list reproduces the canonical generator output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NodeIdFormat {
    /// Namespace-URI qualified: `nsu=<uri>/;<kind>=<value>`.
    ExpandedNodeId,
    /// Namespace-index qualified: `ns=<index>;<kind>=<value>`.
    NamespaceIndex,
    /// Unqualified: `<kind>=<value>`.
    NodeId,
}

impl NodeIdFormat {
    /// Returns all formats in canonical order.
    pub fn all_formats() -> &'static [NodeIdFormat] {
        &[Self::ExpandedNodeId, Self::NamespaceIndex, Self::NodeId]
    }

    /// Returns the surface name used on the command line and in serde.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExpandedNodeId => "ExpandedNodeId",
            Self::NamespaceIndex => "NamespaceIndex",
            Self::NodeId => "NodeId",
        }
    }

    /// Returns the start-anchored qualifier fragment, or `None` for the
    /// unqualified format.
    pub fn qualifier(&self) -> Option<&'static str> {
        match self {
            Self::ExpandedNodeId => Some(EXPANDED_NAMESPACE_QUALIFIER),
            Self::NamespaceIndex => Some(NAMESPACE_INDEX_QUALIFIER),
            Self::NodeId => None,
        }
    }
}

impl std::fmt::Display for NodeIdFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeIdFormat {
    type Err = OpcPubError;

    /// Parse a format from its surface name. Matching is case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ExpandedNodeId" => Ok(Self::ExpandedNodeId),
            "NamespaceIndex" => Ok(Self::NamespaceIndex),
            "NodeId" => Ok(Self::NodeId),
            other => Err(OpcPubError::UnknownNodeIdFormat(other.to_string())),
        }
    }
}

/// Syntax of the identifier value itself. Not configurable: every selected
/// format accepts all four kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeIdKind {
    /// `i=<digits>`
    Integer,
    /// `s=<Unicode text>`
    String,
    /// `g=<8-4-4-4-12 hex>`
    Guid,
    /// `b=<base64>`
    ByteString,
}

impl NodeIdKind {
    /// Returns all kinds in the order they appear in generated patterns.
    pub fn all_kinds() -> &'static [NodeIdKind] {
        &[Self::Integer, Self::String, Self::Guid, Self::ByteString]
    }

    /// The identifier-type letter preceding `=`.
    pub fn prefix(&self) -> char {
        match self {
            Self::Integer => 'i',
            Self::String => 's',
            Self::Guid => 'g',
            Self::ByteString => 'b',
        }
    }

    /// End-anchored body fragment, without a start anchor. The start anchor
    /// belongs to whichever fragment comes first in the rendered alternative.
    pub fn body(&self) -> &'static str {
        match self {
            Self::Integer => INTEGER_BODY,
            Self::String => STRING_BODY,
            Self::Guid => GUID_BODY,
            Self::ByteString => BYTE_STRING_BODY,
        }
    }
}
