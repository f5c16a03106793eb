//! Structured diagnostics emitted while classifying types and rewriting
//! schemas.
//!
//! Warnings are returned to the caller alongside the rewritten document so
//! tests and API consumers can assert on them instead of scraping logs.

use serde::{Deserialize, Serialize};

/// A non-fatal diagnostic attached to a schema location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warning {
    /// Schema location the diagnostic refers to
    /// (e.g. "#/definitions/User/properties/id").
    pub path: String,
    /// Classification of the warning.
    pub kind: WarningKind,
    /// Human-readable description.
    pub message: String,
}

/// Classification of schema-rewrite warnings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WarningKind {
    /// A `type` tag outside the supported vocabulary was replaced with
    /// `string`.
    UnknownTypeTag { tag: String },
    /// A pipe-joined `type` union contained no supported member.
    EmptyTypeUnion { union: String },
    /// A multi-branch non-null union was collapsed to the string primitive.
    UnionCollapsed { union: String },
}

impl Warning {
    pub fn unknown_type_tag(path: &str, tag: &str) -> Self {
        Self {
            path: path.to_string(),
            message: format!("Unrecognized type \"{tag}\", defaulting to \"string\""),
            kind: WarningKind::UnknownTypeTag {
                tag: tag.to_string(),
            },
        }
    }

    pub fn empty_type_union(path: &str, union: &str) -> Self {
        Self {
            path: path.to_string(),
            message: format!("Unrecognized union type \"{union}\", defaulting to \"string\""),
            kind: WarningKind::EmptyTypeUnion {
                union: union.to_string(),
            },
        }
    }

    pub fn union_collapsed(path: &str, union: &str) -> Self {
        Self {
            path: path.to_string(),
            message: format!("Union type \"{union}\" collapsed to \"string\""),
            kind: WarningKind::UnionCollapsed {
                union: union.to_string(),
            },
        }
    }
}
