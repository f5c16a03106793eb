//! Schema synthesis from field lists.
//!
//! Consumes the [`NamedFieldList`] sequence produced by either entry path
//! and emits a draft-07 shaped [`SchemaDocument`]: one `definitions` entry
//! per list, rooted at a `$ref` to the first list's name. Pure and
//! deterministic; the only observable side channel is the warning list from
//! type classification.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::classify::{classify, PrimitiveKind, TypeVerdict};
use crate::field_list::NamedFieldList;
use crate::warning::Warning;

/// Dialect tag carried by every synthesized document.
pub const DRAFT07_URI: &str = "http://json-schema.org/draft-07/schema#";

/// A synthesized schema document: a named `definitions` table plus a `$ref`
/// root pointing into it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaDocument {
    #[serde(rename = "$schema")]
    pub schema: String,
    pub definitions: Map<String, Value>,
    #[serde(rename = "$ref")]
    pub root: String,
}

impl SchemaDocument {
    /// The document as a plain JSON value, for the normalizer and generator.
    pub fn to_value(&self) -> Value {
        let mut doc = Map::new();
        doc.insert("$schema".to_string(), Value::String(self.schema.clone()));
        doc.insert(
            "definitions".to_string(),
            Value::Object(self.definitions.clone()),
        );
        doc.insert("$ref".to_string(), Value::String(self.root.clone()));
        Value::Object(doc)
    }
}

/// Result of schema synthesis.
#[derive(Debug)]
pub struct SynthesizeResult {
    pub document: SchemaDocument,
    /// Union-collapse diagnostics from classifying field types.
    pub warnings: Vec<Warning>,
}

/// Build one schema document from `field_lists`.
///
/// Later lists with a duplicate name shadow earlier ones in `definitions`
/// (accepted edge case, not an error). An empty input falls back to an empty
/// object definition under `root_name`.
pub fn synthesize(field_lists: &[NamedFieldList], root_name: &str) -> SynthesizeResult {
    let mut warnings = Vec::new();
    let mut definitions = Map::new();

    for list in field_lists {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for field in &list.fields {
            let path = format!("#/definitions/{}/properties/{}", list.name, field.name);
            let verdict = classify(&field.raw_type, &path, &mut warnings);

            // Nullability is not encoded in the node itself; a null-union
            // field just renders as its bare inner type and stays out of
            // `required`.
            let (node, nullable) = match verdict {
                TypeVerdict::Nullable(inner) => {
                    (node_for_verdict(&field.name, *inner, &path, &mut warnings), true)
                }
                other => (node_for_verdict(&field.name, other, &path, &mut warnings), false),
            };

            properties.insert(field.name.clone(), node);
            if !nullable {
                required.push(Value::String(field.name.clone()));
            }
        }

        definitions.insert(
            list.name.clone(),
            json!({
                "type": "object",
                "properties": properties,
                "required": required,
            }),
        );
    }

    let root = match field_lists.first() {
        Some(list) => list.name.clone(),
        None => {
            definitions.insert(
                root_name.to_string(),
                json!({ "type": "object", "properties": {} }),
            );
            root_name.to_string()
        }
    };

    SynthesizeResult {
        document: SchemaDocument {
            schema: DRAFT07_URI.to_string(),
            definitions,
            root: format!("#/definitions/{root}"),
        },
        warnings,
    }
}

/// Fixed policy table mapping a verdict to its schema node.
fn node_for_verdict(
    field_name: &str,
    verdict: TypeVerdict,
    path: &str,
    warnings: &mut Vec<Warning>,
) -> Value {
    match verdict {
        // Single-level nullability is stripped by callers before reaching
        // here; mirror that treatment for exhaustiveness.
        TypeVerdict::Nullable(inner) => node_for_verdict(field_name, *inner, path, warnings),
        TypeVerdict::Primitive(PrimitiveKind::Str) => {
            let hint = if field_name == "file_url" {
                "internet.url"
            } else {
                "lorem.words"
            };
            json!({ "type": "string", "faker": hint })
        }
        TypeVerdict::Primitive(PrimitiveKind::Integer) => {
            json!({ "type": "integer", "minimum": 1, "maximum": 1000 })
        }
        TypeVerdict::Primitive(PrimitiveKind::Boolean) => json!({ "type": "boolean" }),
        TypeVerdict::ArrayOf(element) => {
            // Named element types keep a $ref; primitive elements inline the
            // leaf — a $ref to "#/definitions/string" would dangle and crash
            // the generator.
            let element_verdict = classify(&element, path, warnings);
            let items = match element_verdict {
                TypeVerdict::Nullable(inner) => node_for_verdict(field_name, *inner, path, warnings),
                other => node_for_verdict(field_name, other, path, warnings),
            };
            json!({ "type": "array", "items": items, "minItems": 2, "maxItems": 5 })
        }
        TypeVerdict::Reference(name) => {
            json!({ "$ref": format!("#/definitions/{name}") })
        }
    }
}
