//! Error types for the Convert and Generate operations.

use thiserror::Error;

/// Caller-visible failure of a Convert or Generate request.
#[derive(Debug, Error)]
pub enum RequestError {
    /// Convert was called with neither `tsInput` nor `jsonInput`.
    #[error("Input is required")]
    MissingInput,

    /// Generate was called with neither `schema` nor `rawJson`.
    #[error("Schema or rawJson is required")]
    MissingSchema,

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Error generating data: {0}")]
    Generator(#[from] GenerateError),
}

impl RequestError {
    /// HTTP status the original service reported for this category.
    /// Transport is out of scope here; callers map this however they like.
    pub fn http_status(&self) -> u16 {
        match self {
            RequestError::Generator(_) => 500,
            _ => 400,
        }
    }
}

/// Failure inside the sample data synthesizer. Never partial output: the
/// whole Generate request fails with this wrapped in
/// [`RequestError::Generator`].
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("unresolvable reference {reference} at {path}")]
    UnresolvableRef { path: String, reference: String },

    #[error("recursion depth exceeded at {path} (max: {max_depth})")]
    RecursionDepthExceeded { path: String, max_depth: usize },

    #[error("cannot satisfy schema at {path}: {message}")]
    Unsatisfiable { path: String, message: String },
}
