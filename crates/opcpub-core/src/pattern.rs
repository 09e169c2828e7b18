//! # Composite NodeId Pattern
//!
//! Builds the single regular expression that accepts every selected
//! `(format, kind)` combination. Each combination is an explicit
//! [`NodeIdAlternative`]; the pattern is the `|`-join of their renderings.
//!
//! ## Invariant
//!
//! The pattern for a format set `F` accepts exactly the union of the strings
//! accepted by each `(f, k)` with `f ∈ F` and `k` any kind. Every rendered
//! alternative is anchored at both ends, so no alternative can match a prefix
//! or suffix of a longer identifier.

use std::fmt;

use crate::format::{NodeIdFormat, NodeIdKind};

/// One `(format, kind)` branch of the composite pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeIdAlternative {
    /// Qualifier convention.
    pub format: NodeIdFormat,
    /// Value syntax.
    pub kind: NodeIdKind,
}

impl NodeIdAlternative {
    /// Render this branch as a parenthesized group.
    ///
    /// Unqualified branches carry their own start anchor. Qualified branches
    /// take the qualifier's anchor and nest the kind body in its own group.
    pub fn render(&self) -> String {
        match self.format.qualifier() {
            Some(qualifier) => format!("({qualifier}({}))", self.kind.body()),
            None => format!("(^{})", self.kind.body()),
        }
    }
}

/// Ordered list of NodeId alternatives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeIdPattern {
    alternatives: Vec<NodeIdAlternative>,
}

impl NodeIdPattern {
    /// Build the alternatives for `formats`, in caller order, each format
    /// expanded over all kinds. Repeated formats contribute once.
    pub fn from_formats(formats: &[NodeIdFormat]) -> Self {
        let mut selected: Vec<NodeIdFormat> = Vec::with_capacity(formats.len());
        for format in formats {
            if !selected.contains(format) {
                selected.push(*format);
            }
        }

        let alternatives = selected
            .iter()
            .flat_map(|format| {
                NodeIdKind::all_kinds().iter().map(move |kind| NodeIdAlternative {
                    format: *format,
                    kind: *kind,
                })
            })
            .collect();

        Self { alternatives }
    }

    /// Returns the branches in emission order.
    pub fn alternatives(&self) -> &[NodeIdAlternative] {
        &self.alternatives
    }

    /// True when no format was selected.
    pub fn is_empty(&self) -> bool {
        self.alternatives.is_empty()
    }

    /// Render the composite regular expression. Empty for an empty selection.
    pub fn to_regex(&self) -> String {
        self.alternatives
            .iter()
            .map(NodeIdAlternative::render)
            .collect::<Vec<_>>()
            .join("|")
    }
}

impl fmt::Display for NodeIdPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_regex())
    }
}

/// Build the composite NodeId regular expression for `formats`.
pub fn build_node_id_pattern(formats: &[NodeIdFormat]) -> String {
    NodeIdPattern::from_formats(formats).to_regex()
}
