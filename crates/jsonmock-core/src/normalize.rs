//! Schema normalization into the generator-safe vocabulary.
//!
//! Rewrites an arbitrary JSON-Schema-like document — hand-written, dialect
//! foreign, or produced by the synthesizer — so that every `type` tag is in
//! the restricted set the sample generator accepts. Structure-preserving,
//! idempotent, and never fatal: everything the pass changes is reported as a
//! [`Warning`] record (mirrored to tracing for CLI users) instead of being
//! logged ad hoc.

use serde_json::{Map, Value};

use crate::warning::Warning;

/// Type tags the generator accepts.
pub const ALLOWED_TYPES: &[&str] = &[
    "string", "number", "boolean", "integer", "array", "object", "null",
];

/// Result of running the normalization pass.
#[derive(Debug)]
pub struct NormalizeResult {
    /// The rewritten schema; structurally identical to the input except for
    /// type-tag rewriting.
    pub schema: Value,
    /// One record per substitution the pass had to make.
    pub warnings: Vec<Warning>,
}

/// Normalize a schema node or whole document.
///
/// Normalizing an already-normalized schema yields the same document and no
/// warnings.
pub fn normalize(schema: &Value) -> NormalizeResult {
    let mut warnings = Vec::new();
    let schema = walk(schema, "#", &mut warnings);
    NormalizeResult { schema, warnings }
}

fn walk(node: &Value, path: &str, warnings: &mut Vec<Warning>) -> Value {
    let obj = match node {
        Value::Object(obj) => obj,
        Value::Array(items) => {
            let rewritten = items
                .iter()
                .enumerate()
                .map(|(i, item)| walk(item, &format!("{path}/{i}"), warnings))
                .collect();
            return Value::Array(rewritten);
        }
        // Scalars and booleans-as-schema pass through unchanged.
        other => return other.clone(),
    };

    let mut result = obj.clone();
    rewrite_type_tag(&mut result, path, warnings);

    // Map-of-schemas keywords, per key.
    for key in ["properties", "definitions"] {
        if let Some(Value::Object(map)) = result.get(key) {
            let rewritten: Map<String, Value> = map
                .iter()
                .map(|(k, v)| (k.clone(), walk(v, &format!("{path}/{key}/{k}"), warnings)))
                .collect();
            result.insert(key.to_string(), Value::Object(rewritten));
        }
    }

    // `items` — a single node or a positional sequence.
    if let Some(items) = result.get("items").cloned() {
        let rewritten = match items {
            Value::Array(seq) => Value::Array(
                seq.iter()
                    .enumerate()
                    .map(|(i, item)| walk(item, &format!("{path}/items/{i}"), warnings))
                    .collect(),
            ),
            single => walk(&single, &format!("{path}/items"), warnings),
        };
        result.insert("items".to_string(), rewritten);
    }

    // `additionalProperties` — only when it is itself an object schema.
    if let Some(extra) = result.get("additionalProperties").cloned() {
        if extra.is_object() {
            let rewritten = walk(&extra, &format!("{path}/additionalProperties"), warnings);
            result.insert("additionalProperties".to_string(), rewritten);
        }
    }

    // Combinators, per element.
    for key in ["anyOf", "oneOf", "allOf"] {
        if let Some(Value::Array(seq)) = result.get(key) {
            let rewritten: Vec<Value> = seq
                .iter()
                .enumerate()
                .map(|(i, item)| walk(item, &format!("{path}/{key}/{i}"), warnings))
                .collect();
            result.insert(key.to_string(), Value::Array(rewritten));
        }
    }

    Value::Object(result)
}

// ---------------------------------------------------------------------------
// Type-tag policy
// ---------------------------------------------------------------------------

/// Apply the type-tag policy to one node.
fn rewrite_type_tag(obj: &mut Map<String, Value>, path: &str, warnings: &mut Vec<Warning>) {
    let Some(Value::String(tag)) = obj.get("type") else {
        return;
    };
    let tag = tag.clone();

    // Pipe-joined union string, e.g. "string | null".
    if tag.contains('|') {
        let survivors: Vec<&str> = tag
            .split('|')
            .map(str::trim)
            .filter(|member| ALLOWED_TYPES.contains(member))
            .collect();

        // Survivors keep source order; duplicates are not removed.
        let rewritten = match survivors.as_slice() {
            [] => {
                tracing::warn!(path, union = %tag, "no supported member in type union, defaulting to \"string\"");
                warnings.push(Warning::empty_type_union(path, &tag));
                Value::String("string".to_string())
            }
            [single] => Value::String((*single).to_string()),
            many => Value::Array(
                many.iter()
                    .map(|member| Value::String((*member).to_string()))
                    .collect(),
            ),
        };
        obj.insert("type".to_string(), rewritten);
        return;
    }

    if ALLOWED_TYPES.contains(&tag.as_str()) {
        return;
    }

    match tag.as_str() {
        "any" | "unknown" => {
            obj.insert("type".to_string(), Value::String("string".to_string()));
        }
        "Date" => {
            obj.insert("type".to_string(), Value::String("string".to_string()));
            obj.insert(
                "format".to_string(),
                Value::String("date-time".to_string()),
            );
        }
        other => {
            tracing::warn!(path, tag = other, "unrecognized type tag, defaulting to \"string\"");
            warnings.push(Warning::unknown_type_tag(path, other));
            obj.insert("type".to_string(), Value::String("string".to_string()));
        }
    }
}
