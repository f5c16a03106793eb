//! jsonmock-core — convert between example JSON payloads, TypeScript-style
//! interface declarations, and draft-07 JSON Schema, and synthesize mock
//! data from a schema.
//!
//! Two operations make up the public surface, both pure request/response
//! transformations over in-memory data:
//!
//! - [`convert`] — infer a schema (plus rendered interface text) from either
//!   an example JSON value or interface declaration text.
//! - [`generate`] — normalize a schema (inferring one from a raw payload if
//!   necessary) and produce one sample value from it.
//!
//! # Quick start
//!
//! ```
//! use jsonmock_core::{convert, ConvertRequest};
//! use serde_json::json;
//!
//! let request = ConvertRequest {
//!     json_input: Some(json!({ "id": 1, "name": "a" })),
//!     root_name: Some("Item".to_string()),
//!     ..ConvertRequest::default()
//! };
//!
//! let response = convert(&request).unwrap();
//! assert_eq!(response.json_schema.root, "#/definitions/Item");
//! assert!(response.ts_output[0].starts_with("export interface Item"));
//! ```

pub mod classify;
pub mod error;
pub mod extract;
pub mod field_list;
pub mod generate;
pub mod infer;
pub mod normalize;
pub mod options;
pub mod synthesize;
pub mod warning;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use crate::classify::{classify, PrimitiveKind, TypeVerdict};
pub use crate::error::{GenerateError, RequestError};
pub use crate::extract::extract_blocks;
pub use crate::field_list::{FieldDeclaration, NamedFieldList};
pub use crate::generate::{RandomSampler, SampleGenerator};
pub use crate::infer::infer_from_value;
pub use crate::normalize::{normalize, NormalizeResult, ALLOWED_TYPES};
pub use crate::options::GenerateOptions;
pub use crate::synthesize::{synthesize, SchemaDocument, SynthesizeResult, DRAFT07_URI};
pub use crate::warning::{Warning, WarningKind};

/// Default root name for the Convert operation.
pub const DEFAULT_ROOT_NAME: &str = "RootObject";

/// Root name used when Generate infers a schema from a raw example payload.
pub const GENERATED_ROOT_NAME: &str = "GeneratedSchema";

/// Input of the Convert operation. Field names follow the original wire
/// shape (`tsInput`, `jsonInput`, `rootName`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConvertRequest {
    pub ts_input: Option<String>,
    pub json_input: Option<Value>,
    pub root_name: Option<String>,
}

/// Output of the Convert operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertResponse {
    pub json_schema: SchemaDocument,
    /// One rendered declaration per field list, in source order.
    pub ts_output: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<Warning>,
}

/// Input of the Generate operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerateRequest {
    pub schema: Option<Value>,
    pub raw_json: Option<Value>,
}

/// Output of the Generate operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub data: Value,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<Warning>,
}

/// Convert an example JSON value or interface declaration text into a
/// schema document plus rendered declaration text.
///
/// `jsonInput` wins when both inputs are present; neither present is
/// [`RequestError::MissingInput`].
pub fn convert(request: &ConvertRequest) -> Result<ConvertResponse, RequestError> {
    let root_name = request.root_name.as_deref().unwrap_or(DEFAULT_ROOT_NAME);

    let field_lists = if let Some(value) = &request.json_input {
        infer_from_value(value, root_name)
    } else if let Some(text) = &request.ts_input {
        extract_blocks(text, root_name)
    } else {
        return Err(RequestError::MissingInput);
    };

    let ts_output = field_lists.iter().map(NamedFieldList::render).collect();
    let SynthesizeResult { document, warnings } = synthesize(&field_lists, root_name);

    Ok(ConvertResponse {
        json_schema: document,
        ts_output,
        warnings,
    })
}

/// Generate one sample value with the bundled [`RandomSampler`].
pub fn generate(
    request: &GenerateRequest,
    options: &GenerateOptions,
) -> Result<GenerateResponse, RequestError> {
    generate_with(request, options, &RandomSampler::new())
}

/// Generate one sample value with a caller-supplied generator.
///
/// When `schema` is absent, one is inferred from `rawJson`; both absent is
/// [`RequestError::MissingSchema`]. The schema is normalized before it
/// reaches the generator, and every substitution made along the way is
/// returned in the response's warning list.
pub fn generate_with(
    request: &GenerateRequest,
    options: &GenerateOptions,
    sampler: &dyn SampleGenerator,
) -> Result<GenerateResponse, RequestError> {
    let mut warnings = Vec::new();

    let working = if let Some(schema) = &request.schema {
        schema.clone()
    } else if let Some(raw) = &request.raw_json {
        let field_lists = infer_from_value(raw, GENERATED_ROOT_NAME);
        let SynthesizeResult {
            document,
            warnings: synthesis_warnings,
        } = synthesize(&field_lists, GENERATED_ROOT_NAME);
        warnings.extend(synthesis_warnings);
        document.to_value()
    } else {
        return Err(RequestError::MissingSchema);
    };

    let NormalizeResult {
        schema,
        warnings: normalize_warnings,
    } = normalize(&working);
    warnings.extend(normalize_warnings);

    let data = sampler.generate(&schema, options)?;
    Ok(GenerateResponse { data, warnings })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_convert_requires_input() {
        let err = convert(&ConvertRequest::default()).unwrap_err();
        assert!(matches!(err, RequestError::MissingInput));
        assert_eq!(err.to_string(), "Input is required");
    }

    #[test]
    fn test_generate_requires_schema_or_raw_json() {
        let err = generate(&GenerateRequest::default(), &GenerateOptions::default()).unwrap_err();
        assert!(matches!(err, RequestError::MissingSchema));
        assert_eq!(err.to_string(), "Schema or rawJson is required");
    }

    #[test]
    fn test_json_input_wins_over_ts_input() {
        let request = ConvertRequest {
            ts_input: Some("interface FromText { a: string; }".to_string()),
            json_input: Some(json!({ "b": 1 })),
            root_name: None,
        };

        let response = convert(&request).unwrap();
        assert_eq!(response.json_schema.root, "#/definitions/RootObject");
        assert!(response.json_schema.definitions["RootObject"]["properties"]
            .get("b")
            .is_some());
        assert!(response.json_schema.definitions.get("FromText").is_none());
    }

    #[test]
    fn test_request_wire_shape_is_camel_case() {
        let request: ConvertRequest = serde_json::from_value(json!({
            "jsonInput": { "x": 1 },
            "rootName": "Thing"
        }))
        .unwrap();

        assert_eq!(request.root_name.as_deref(), Some("Thing"));
        assert!(request.json_input.is_some());
        assert!(request.ts_input.is_none());

        let response = convert(&request).unwrap();
        let serialized = serde_json::to_value(&response).unwrap();
        assert!(serialized.get("jsonSchema").is_some());
        assert!(serialized.get("tsOutput").is_some());
    }
}
