//! The common intermediate representation shared by both entry paths.
//!
//! Interface text and example JSON values are both reduced to a sequence of
//! [`NamedFieldList`]s before schema synthesis, so everything downstream of
//! the extractor and the inference engine is a single code path.

use serde::{Deserialize, Serialize};

/// One `name: type` field of a named block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDeclaration {
    pub name: String,
    /// The declared type, verbatim (e.g. `string`, `Tag[]`, `string | null`).
    pub raw_type: String,
}

/// A named, flat list of field declarations — one interface/type block.
///
/// Name uniqueness is a soft invariant: when two lists share a name, the
/// later definition shadows the earlier one in the synthesized `definitions`
/// mapping. Source order is preserved here regardless.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedFieldList {
    pub name: String,
    pub fields: Vec<FieldDeclaration>,
}

impl NamedFieldList {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Render this list as TypeScript-style declaration text for the
    /// `tsOutput` half of a Convert response.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str("export interface ");
        out.push_str(&self.name);
        out.push_str(" {\n");
        for field in &self.fields {
            out.push_str("  ");
            out.push_str(&field.name);
            out.push_str(": ");
            out.push_str(&field.raw_type);
            out.push_str(";\n");
        }
        out.push('}');
        out
    }
}
