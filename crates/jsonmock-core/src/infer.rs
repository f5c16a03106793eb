//! Structural inference from example JSON values.
//!
//! Derives the same [`NamedFieldList`] sequence the extractor would produce
//! for the equivalent hand-written declaration: root list first, nested
//! lists in depth-first, first-occurrence order, field raw types synthesized
//! textually (`string`, `number`, `Tag[]`, `string | null`, ...).

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::field_list::{FieldDeclaration, NamedFieldList};

/// Infer field lists from one example value.
///
/// Object values become the root list plus one list per distinct nested
/// object shape. A non-object root is wrapped as a single `value` field so
/// the operation stays total.
pub fn infer_from_value(value: &Value, root_name: &str) -> Vec<NamedFieldList> {
    let mut builder = InferenceBuilder::default();

    match value {
        Value::Object(map) => {
            builder.emit_object(map, root_name.to_string());
        }
        other => {
            let slot = builder.reserve(root_name.to_string());
            let raw_type = builder.raw_type_for("value", other);
            builder.lists[slot].fields = vec![FieldDeclaration {
                name: "value".to_string(),
                raw_type,
            }];
        }
    }

    builder.lists
}

#[derive(Default)]
struct InferenceBuilder {
    lists: Vec<NamedFieldList>,
    /// Structural signature → name of the list already emitted for it, so
    /// repeated shapes reuse one definition.
    shapes: HashMap<String, String>,
}

impl InferenceBuilder {
    /// Push an empty list now so parents precede their children in output
    /// order; fields are filled in after recursion.
    fn reserve(&mut self, name: String) -> usize {
        self.lists.push(NamedFieldList::new(name));
        self.lists.len() - 1
    }

    fn emit_object(&mut self, map: &Map<String, Value>, name: String) -> String {
        let slot = self.reserve(name.clone());

        let mut fields = Vec::with_capacity(map.len());
        for (key, value) in map {
            let raw_type = self.raw_type_for(key, value);
            fields.push(FieldDeclaration {
                name: key.clone(),
                raw_type,
            });
        }

        self.lists[slot].fields = fields;
        name
    }

    /// Name for an object-valued field, reusing the list of an identical
    /// shape when one was already emitted.
    fn object_type_name(&mut self, field_name: &str, map: &Map<String, Value>) -> String {
        let signature = shape_signature(map);
        if let Some(existing) = self.shapes.get(&signature) {
            return existing.clone();
        }

        let name = pascal_case(field_name);
        self.shapes.insert(signature, name.clone());
        self.emit_object(map, name)
    }

    fn raw_type_for(&mut self, field_name: &str, value: &Value) -> String {
        match value {
            // A lone null gives no better prior than a nullable string.
            Value::Null => "string | null".to_string(),
            Value::Bool(_) => "boolean".to_string(),
            Value::Number(_) => "number".to_string(),
            Value::String(_) => "string".to_string(),
            Value::Object(map) => self.object_type_name(field_name, map),
            Value::Array(items) => match items.first() {
                // Empty arrays carry no element evidence; the classifier
                // turns the placeholder into a string leaf.
                None | Some(Value::Null) => "any[]".to_string(),
                Some(Value::Object(map)) => {
                    let singular = singularize(field_name);
                    format!("{}[]", self.object_type_name(&singular, map))
                }
                // First element wins; heterogeneous arrays are not reconciled.
                Some(element) => format!("{}[]", self.raw_type_for(field_name, element)),
            },
        }
    }
}

/// Structural signature of an object shape: field names plus value kinds,
/// recursively. Two objects with the same signature share one field list.
fn shape_signature(map: &Map<String, Value>) -> String {
    let mut signature = String::from("{");
    for (key, value) in map {
        signature.push_str(key);
        signature.push(':');
        signature.push_str(&kind_signature(value));
        signature.push(';');
    }
    signature.push('}');
    signature
}

fn kind_signature(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(_) => "boolean".to_string(),
        Value::Number(_) => "number".to_string(),
        Value::String(_) => "string".to_string(),
        Value::Object(map) => shape_signature(map),
        Value::Array(items) => match items.first() {
            None => "any[]".to_string(),
            Some(element) => format!("{}[]", kind_signature(element)),
        },
    }
}

/// `file_url` → `FileUrl`, `shipping-address` → `ShippingAddress`.
fn pascal_case(name: &str) -> String {
    name.split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// Naive plural strip for array-of-object element names (`tags` → `tag`),
/// matching the generated-name convention of the interface output.
fn singularize(name: &str) -> String {
    if name.len() > 1 && name.ends_with('s') && !name.ends_with("ss") {
        name[..name.len() - 1].to_string()
    } else {
        name.to_string()
    }
}
