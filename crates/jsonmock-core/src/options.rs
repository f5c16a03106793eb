//! Configuration for sample generation.

use serde::{Deserialize, Serialize};

/// Options for the sample data synthesizer.
///
/// Defaults mirror the fixed configuration the original service handed to
/// its generator: fill every property, bounded array and string sizes, and
/// honor `default`/`examples` values when present.
///
/// ## Serialization Format
///
/// Fields are serialized in `kebab-case` (e.g., `max-items`, `max-length`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct GenerateOptions {
    /// Populate properties beyond the required set.
    pub fill_properties: bool,
    /// Treat optional properties as if they were required.
    pub always_fake_optionals: bool,
    /// Use a schema's `default` value verbatim when present.
    pub use_default_value: bool,
    /// Use the first `examples` entry verbatim when present.
    pub use_examples_value: bool,
    /// Array length cap when the schema doesn't carry `maxItems`.
    pub max_items: usize,
    /// String length cap when the schema doesn't carry `maxLength`.
    pub max_length: usize,
    /// Traversal depth guard for `$ref` chains and nesting.
    pub max_depth: usize,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            fill_properties: true,
            always_fake_optionals: true,
            use_default_value: true,
            use_examples_value: true,
            max_items: 3,
            max_length: 20,
            max_depth: 50,
        }
    }
}
