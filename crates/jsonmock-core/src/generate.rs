//! Sample data synthesis.
//!
//! The generator is a capability: anything implementing [`SampleGenerator`]
//! can back the Generate operation. [`RandomSampler`] is the bundled
//! implementation — bounded randomization steered by per-field hints, not
//! statistically realistic data.
//!
//! Input schemas are expected to be normalized (see [`crate::normalize`]);
//! an unresolvable reference or unsatisfiable node fails the whole request,
//! never yields a partial value.

use chrono::{TimeZone, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{Map, Value};

use crate::error::GenerateError;
use crate::options::GenerateOptions;

/// Word pool for prose-shaped strings.
const LOREM: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed",
    "tempor", "incididunt", "labore",
];

/// Hosts for URL-shaped strings.
const URL_HOSTS: &[&str] = &["example.com", "example.org", "example.net"];

/// A source of concrete values conforming to a normalized schema.
pub trait SampleGenerator {
    /// Produce one value satisfying `schema`'s structural constraints.
    fn generate(&self, schema: &Value, options: &GenerateOptions)
        -> Result<Value, GenerateError>;
}

/// The bundled rand-backed generator.
#[derive(Debug, Default)]
pub struct RandomSampler {
    seed: Option<u64>,
}

impl RandomSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fixed-seed sampler for reproducible output.
    pub fn with_seed(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }
}

impl SampleGenerator for RandomSampler {
    fn generate(
        &self,
        schema: &Value,
        options: &GenerateOptions,
    ) -> Result<Value, GenerateError> {
        let mut ctx = SampleCtx {
            root: schema,
            options,
            rng: match self.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            },
        };
        ctx.sample(schema, "#", 0)
    }
}

// ---------------------------------------------------------------------------
// Recursive sampling walker
// ---------------------------------------------------------------------------

/// Traversal state threaded through sampling.
struct SampleCtx<'a> {
    root: &'a Value,
    options: &'a GenerateOptions,
    rng: StdRng,
}

impl SampleCtx<'_> {
    fn sample(&mut self, node: &Value, path: &str, depth: usize) -> Result<Value, GenerateError> {
        if depth > self.options.max_depth {
            return Err(GenerateError::RecursionDepthExceeded {
                path: path.to_string(),
                max_depth: self.options.max_depth,
            });
        }

        let obj = match node {
            Value::Object(obj) => obj,
            // `true` as a schema admits anything.
            Value::Bool(true) => return Ok(self.lorem_string(self.options.max_length, None)),
            _ => {
                return Err(GenerateError::Unsatisfiable {
                    path: path.to_string(),
                    message: "schema node is not an object".to_string(),
                })
            }
        };

        if let Some(reference) = obj.get("$ref").and_then(Value::as_str) {
            let target = resolve_pointer(self.root, reference).ok_or_else(|| {
                GenerateError::UnresolvableRef {
                    path: path.to_string(),
                    reference: reference.to_string(),
                }
            })?;
            return self.sample(&target, path, depth + 1);
        }

        if let Some(value) = obj.get("const") {
            return Ok(value.clone());
        }
        if self.options.use_default_value {
            if let Some(value) = obj.get("default") {
                return Ok(value.clone());
            }
        }
        if self.options.use_examples_value {
            if let Some(first) = obj.get("examples").and_then(Value::as_array).and_then(|a| a.first()) {
                return Ok(first.clone());
            }
        }

        if let Some(choices) = obj.get("enum").and_then(Value::as_array) {
            if choices.is_empty() {
                return Err(GenerateError::Unsatisfiable {
                    path: path.to_string(),
                    message: "empty enum".to_string(),
                });
            }
            let idx = self.rng.random_range(0..choices.len());
            return Ok(choices[idx].clone());
        }

        for key in ["anyOf", "oneOf"] {
            if let Some(branches) = obj.get(key).and_then(Value::as_array) {
                if branches.is_empty() {
                    return Err(GenerateError::Unsatisfiable {
                        path: path.to_string(),
                        message: format!("empty {key}"),
                    });
                }
                let idx = self.rng.random_range(0..branches.len());
                return self.sample(&branches[idx], &format!("{path}/{key}/{idx}"), depth + 1);
            }
        }

        if let Some(branches) = obj.get("allOf").and_then(Value::as_array) {
            let merged = merge_all_of(obj, branches);
            return self.sample(&merged, path, depth + 1);
        }

        let tag = match obj.get("type") {
            Some(Value::String(tag)) => Some(tag.clone()),
            // Union list: any member satisfies, pick one.
            Some(Value::Array(tags)) if !tags.is_empty() => {
                let idx = self.rng.random_range(0..tags.len());
                tags[idx].as_str().map(str::to_string)
            }
            _ => None,
        };

        match tag.as_deref() {
            Some("object") => self.sample_object(obj, path, depth),
            Some("array") => self.sample_array(obj, path, depth),
            Some("string") => Ok(self.sample_string(obj)),
            Some("integer") => self.sample_integer(obj, path),
            Some("number") => self.sample_number(obj, path),
            Some("boolean") => Ok(Value::Bool(self.rng.random_bool(0.5))),
            Some("null") => Ok(Value::Null),
            Some(other) => Err(GenerateError::Unsatisfiable {
                path: path.to_string(),
                message: format!("unsupported type tag \"{other}\""),
            }),
            None => {
                // Untyped nodes: infer intent from structure.
                if obj.contains_key("properties") {
                    self.sample_object(obj, path, depth)
                } else if obj.contains_key("items") {
                    self.sample_array(obj, path, depth)
                } else {
                    Ok(self.lorem_string(self.options.max_length, None))
                }
            }
        }
    }

    fn sample_object(
        &mut self,
        obj: &Map<String, Value>,
        path: &str,
        depth: usize,
    ) -> Result<Value, GenerateError> {
        let mut out = Map::new();
        let Some(Value::Object(properties)) = obj.get("properties") else {
            return Ok(Value::Object(out));
        };

        let fill_optionals = self.options.fill_properties || self.options.always_fake_optionals;
        let required: Vec<&str> = obj
            .get("required")
            .and_then(Value::as_array)
            .map(|keys| keys.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();

        for (key, child) in properties {
            if !fill_optionals && !required.contains(&key.as_str()) {
                continue;
            }
            let value = self.sample(child, &format!("{path}/properties/{key}"), depth + 1)?;
            out.insert(key.clone(), value);
        }

        Ok(Value::Object(out))
    }

    fn sample_array(
        &mut self,
        obj: &Map<String, Value>,
        path: &str,
        depth: usize,
    ) -> Result<Value, GenerateError> {
        let min = obj
            .get("minItems")
            .and_then(Value::as_u64)
            .unwrap_or(0) as usize;
        let max = obj
            .get("maxItems")
            .and_then(Value::as_u64)
            .map(|n| n as usize)
            .unwrap_or(self.options.max_items)
            .max(min);

        let Some(items) = obj.get("items") else {
            // No element schema to satisfy; the empty array conforms.
            return Ok(Value::Array(Vec::new()));
        };

        let len = self.rng.random_range(min..=max);
        let mut out = Vec::with_capacity(len);
        for _ in 0..len {
            out.push(self.sample(items, &format!("{path}/items"), depth + 1)?);
        }
        Ok(Value::Array(out))
    }

    fn sample_string(&mut self, obj: &Map<String, Value>) -> Value {
        if obj.get("format").and_then(Value::as_str) == Some("date-time") {
            return Value::String(self.random_timestamp());
        }

        match obj.get("faker").and_then(Value::as_str) {
            Some("internet.url") => {
                let host = URL_HOSTS[self.rng.random_range(0..URL_HOSTS.len())];
                let word = LOREM[self.rng.random_range(0..LOREM.len())];
                Value::String(format!("https://{host}/{word}"))
            }
            _ => {
                let max_length = obj
                    .get("maxLength")
                    .and_then(Value::as_u64)
                    .map(|n| n as usize)
                    .unwrap_or(self.options.max_length);
                let min_length = obj.get("minLength").and_then(Value::as_u64).unwrap_or(0) as usize;
                self.lorem_string(max_length, Some(min_length))
            }
        }
    }

    fn sample_integer(&mut self, obj: &Map<String, Value>, path: &str) -> Result<Value, GenerateError> {
        let min = obj.get("minimum").and_then(Value::as_i64).unwrap_or(1);
        let max = obj.get("maximum").and_then(Value::as_i64).unwrap_or(1000);
        if min > max {
            return Err(GenerateError::Unsatisfiable {
                path: path.to_string(),
                message: format!("minimum {min} exceeds maximum {max}"),
            });
        }
        Ok(Value::Number(self.rng.random_range(min..=max).into()))
    }

    fn sample_number(&mut self, obj: &Map<String, Value>, path: &str) -> Result<Value, GenerateError> {
        let min = obj.get("minimum").and_then(Value::as_f64).unwrap_or(1.0);
        let max = obj.get("maximum").and_then(Value::as_f64).unwrap_or(1000.0);
        if min > max {
            return Err(GenerateError::Unsatisfiable {
                path: path.to_string(),
                message: format!("minimum {min} exceeds maximum {max}"),
            });
        }
        let sampled = self.rng.random_range(min..=max);
        Ok(serde_json::Number::from_f64(sampled)
            .map(Value::Number)
            .unwrap_or_else(|| Value::Number(0.into())))
    }

    fn lorem_string(&mut self, max_length: usize, min_length: Option<usize>) -> Value {
        let count = self.rng.random_range(2..=4);
        let mut text = (0..count)
            .map(|_| LOREM[self.rng.random_range(0..LOREM.len())])
            .collect::<Vec<_>>()
            .join(" ");

        if let Some(min) = min_length {
            while text.len() < min {
                text.push(' ');
                text.push_str(LOREM[self.rng.random_range(0..LOREM.len())]);
            }
        }
        if text.len() > max_length {
            text.truncate(max_length);
        }
        Value::String(text)
    }

    fn random_timestamp(&mut self) -> String {
        // Uniform over a broad plausible range of epoch seconds.
        let secs = self.rng.random_range(1_400_000_000..1_900_000_000);
        Utc.timestamp_opt(secs, 0)
            .single()
            .map(|dt| dt.to_rfc3339())
            .unwrap_or_else(|| "1970-01-01T00:00:00+00:00".to_string())
    }
}

// ---------------------------------------------------------------------------
// Schema plumbing
// ---------------------------------------------------------------------------

/// Shallow-merge an `allOf` node: branch keys override the base, property
/// maps merge one level deep, later branches win.
fn merge_all_of(base: &Map<String, Value>, branches: &[Value]) -> Value {
    let mut merged = base.clone();
    merged.remove("allOf");

    for branch in branches {
        let Value::Object(branch_obj) = branch else {
            continue;
        };
        for (key, value) in branch_obj {
            match (merged.get_mut(key), value) {
                (Some(Value::Object(existing)), Value::Object(incoming)) => {
                    for (k, v) in incoming {
                        existing.insert(k.clone(), v.clone());
                    }
                }
                _ => {
                    merged.insert(key.clone(), value.clone());
                }
            }
        }
    }

    Value::Object(merged)
}

/// Resolve a root-relative JSON Pointer (`#/definitions/Name`). Non-local
/// references are unresolvable by design.
fn resolve_pointer(root: &Value, pointer: &str) -> Option<Value> {
    let path = pointer.strip_prefix('#')?;
    if path.is_empty() {
        return Some(root.clone());
    }

    let mut current = root;
    for segment in path.strip_prefix('/')?.split('/') {
        let key = segment.replace("~1", "/").replace("~0", "~");
        current = match current {
            Value::Object(obj) => obj.get(&key)?,
            Value::Array(arr) => arr.get(key.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }

    Some(current.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample(schema: Value) -> Value {
        RandomSampler::with_seed(7)
            .generate(&schema, &GenerateOptions::default())
            .expect("generation should succeed")
    }

    fn sample_err(schema: Value) -> GenerateError {
        RandomSampler::with_seed(7)
            .generate(&schema, &GenerateOptions::default())
            .expect_err("generation should fail")
    }

    #[test]
    fn test_object_fills_every_property() {
        let value = sample(json!({
            "type": "object",
            "properties": {
                "id": { "type": "integer" },
                "name": { "type": "string" },
                "flag": { "type": "boolean" }
            },
            "required": ["id"]
        }));

        let obj = value.as_object().unwrap();
        assert!(obj["id"].is_i64());
        assert!(obj["name"].is_string());
        assert!(obj["flag"].is_boolean());
    }

    #[test]
    fn test_integer_respects_bounds() {
        for _ in 0..20 {
            let value = RandomSampler::new()
                .generate(
                    &json!({ "type": "integer", "minimum": 10, "maximum": 12 }),
                    &GenerateOptions::default(),
                )
                .unwrap();
            let n = value.as_i64().unwrap();
            assert!((10..=12).contains(&n), "got {n}");
        }
    }

    #[test]
    fn test_array_respects_item_bounds() {
        let value = sample(json!({
            "type": "array",
            "items": { "type": "integer" },
            "minItems": 2,
            "maxItems": 5
        }));

        let len = value.as_array().unwrap().len();
        assert!((2..=5).contains(&len), "got {len}");
    }

    #[test]
    fn test_array_without_items_is_empty() {
        assert_eq!(sample(json!({ "type": "array" })), json!([]));
    }

    #[test]
    fn test_string_length_bounded() {
        let options = GenerateOptions::default();
        let value = sample(json!({ "type": "string" }));
        assert!(value.as_str().unwrap().len() <= options.max_length);
    }

    #[test]
    fn test_url_hint() {
        let value = sample(json!({ "type": "string", "faker": "internet.url" }));
        assert!(value.as_str().unwrap().starts_with("https://"));
    }

    #[test]
    fn test_date_time_format() {
        let value = sample(json!({ "type": "string", "format": "date-time" }));
        assert!(chrono::DateTime::parse_from_rfc3339(value.as_str().unwrap()).is_ok());
    }

    #[test]
    fn test_ref_resolution_through_definitions() {
        let value = sample(json!({
            "definitions": {
                "Tag": { "type": "string" }
            },
            "$ref": "#/definitions/Tag"
        }));
        assert!(value.is_string());
    }

    #[test]
    fn test_unresolvable_ref_errors() {
        let err = sample_err(json!({ "$ref": "#/definitions/Ghost" }));
        assert!(matches!(err, GenerateError::UnresolvableRef { .. }));
    }

    #[test]
    fn test_recursive_ref_hits_depth_guard() {
        let err = sample_err(json!({
            "definitions": {
                "Node": {
                    "type": "object",
                    "properties": {
                        "child": { "$ref": "#/definitions/Node" }
                    }
                }
            },
            "$ref": "#/definitions/Node"
        }));
        assert!(matches!(err, GenerateError::RecursionDepthExceeded { .. }));
    }

    #[test]
    fn test_enum_membership() {
        let choices = json!(["red", "green", "blue"]);
        let value = sample(json!({ "type": "string", "enum": choices }));
        assert!(choices.as_array().unwrap().contains(&value));
    }

    #[test]
    fn test_default_and_examples_honored() {
        assert_eq!(
            sample(json!({ "type": "integer", "default": 42 })),
            json!(42)
        );
        assert_eq!(
            sample(json!({ "type": "string", "examples": ["alpha", "beta"] })),
            json!("alpha")
        );
    }

    #[test]
    fn test_type_union_list_picks_member() {
        let value = sample(json!({ "type": ["string", "null"] }));
        assert!(value.is_string() || value.is_null());
    }

    #[test]
    fn test_any_of_picks_branch() {
        let value = sample(json!({
            "anyOf": [{ "type": "integer" }, { "type": "boolean" }]
        }));
        assert!(value.is_i64() || value.is_boolean());
    }

    #[test]
    fn test_all_of_merges_objects() {
        let value = sample(json!({
            "allOf": [
                { "type": "object", "properties": { "a": { "type": "integer" } }, "required": ["a"] },
                { "properties": { "b": { "type": "boolean" } }, "required": ["b"] }
            ]
        }));

        let obj = value.as_object().unwrap();
        assert!(obj.contains_key("a"));
        assert!(obj.contains_key("b"));
    }

    #[test]
    fn test_seeded_generation_is_deterministic() {
        let schema = json!({
            "type": "object",
            "properties": {
                "id": { "type": "integer" },
                "tags": { "type": "array", "items": { "type": "string" }, "minItems": 1, "maxItems": 4 }
            }
        });

        let options = GenerateOptions::default();
        let first = RandomSampler::with_seed(99).generate(&schema, &options).unwrap();
        let second = RandomSampler::with_seed(99).generate(&schema, &options).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_unsatisfiable_bounds_error() {
        let err = sample_err(json!({ "type": "integer", "minimum": 10, "maximum": 5 }));
        assert!(matches!(err, GenerateError::Unsatisfiable { .. }));
    }

    #[test]
    fn test_untyped_node_with_properties_is_object() {
        let value = sample(json!({
            "properties": { "x": { "type": "integer" } }
        }));
        assert!(value.as_object().unwrap().contains_key("x"));
    }
}
