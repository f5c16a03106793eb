//! Declared-type classification.
//!
//! Turns the raw type text of a single field declaration into a
//! [`TypeVerdict`]. This is a total function: unrecognized forms fall back
//! to [`TypeVerdict::Reference`], never an error. Multi-branch non-null
//! unions are collapsed to the string primitive with a warning.

use crate::warning::Warning;

/// Schema-level kind of a primitive leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    /// `string`, plus the `any`/`unknown` placeholders the inference engine
    /// emits for shapeless values.
    Str,
    /// `number` — mapped to the schema-level `integer` kind with fixed
    /// bounds by policy, not numeric range inference.
    Integer,
    /// `boolean`.
    Boolean,
}

/// Classification of a single declared field type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeVerdict {
    Primitive(PrimitiveKind),
    /// `T | null`. Only single-level nullability is supported; the inner
    /// verdict is never itself `Nullable`.
    Nullable(Box<TypeVerdict>),
    /// `T[]` — holds the element type text with the marker stripped.
    ArrayOf(String),
    /// Assumed to name another field list.
    Reference(String),
}

impl TypeVerdict {
    /// True when the declared type admitted `null`.
    pub fn is_nullable(&self) -> bool {
        matches!(self, TypeVerdict::Nullable(_))
    }
}

/// Classify one raw type expression.
///
/// `path` locates the owning field for diagnostics; union-collapse warnings
/// are appended to `warnings`.
pub fn classify(raw_type: &str, path: &str, warnings: &mut Vec<Warning>) -> TypeVerdict {
    let raw = raw_type.trim();

    if raw.contains('|') {
        let branches: Vec<&str> = raw.split('|').map(str::trim).collect();
        let non_null: Vec<&str> = branches
            .iter()
            .copied()
            .filter(|branch| *branch != "null")
            .collect();
        let saw_null = non_null.len() != branches.len();

        let inner = match non_null.as_slice() {
            [single] => classify(single, path, warnings),
            _ => {
                tracing::warn!(path, union = raw, "collapsing union type to \"string\"");
                warnings.push(Warning::union_collapsed(path, raw));
                TypeVerdict::Primitive(PrimitiveKind::Str)
            }
        };

        return if saw_null {
            TypeVerdict::Nullable(Box::new(inner))
        } else {
            inner
        };
    }

    match raw {
        "string" | "any" | "unknown" => TypeVerdict::Primitive(PrimitiveKind::Str),
        "number" => TypeVerdict::Primitive(PrimitiveKind::Integer),
        "boolean" => TypeVerdict::Primitive(PrimitiveKind::Boolean),
        _ => match raw.strip_suffix("[]") {
            Some(element) => TypeVerdict::ArrayOf(element.trim().to_string()),
            None => TypeVerdict::Reference(raw.to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::warning::WarningKind;
    use pretty_assertions::assert_eq;

    fn run(raw: &str) -> (TypeVerdict, Vec<Warning>) {
        let mut warnings = Vec::new();
        let verdict = classify(raw, "#", &mut warnings);
        (verdict, warnings)
    }

    #[test]
    fn test_primitives() {
        assert_eq!(run("string").0, TypeVerdict::Primitive(PrimitiveKind::Str));
        assert_eq!(
            run("number").0,
            TypeVerdict::Primitive(PrimitiveKind::Integer)
        );
        assert_eq!(
            run("boolean").0,
            TypeVerdict::Primitive(PrimitiveKind::Boolean)
        );
    }

    #[test]
    fn test_any_placeholder_is_string_primitive() {
        assert_eq!(run("any").0, TypeVerdict::Primitive(PrimitiveKind::Str));
        assert_eq!(run("unknown").0, TypeVerdict::Primitive(PrimitiveKind::Str));
    }

    #[test]
    fn test_nullable_union() {
        let (verdict, warnings) = run("string | null");
        assert_eq!(
            verdict,
            TypeVerdict::Nullable(Box::new(TypeVerdict::Primitive(PrimitiveKind::Str)))
        );
        assert!(verdict.is_nullable());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_nullable_reference() {
        let (verdict, _) = run("Address | null");
        assert_eq!(
            verdict,
            TypeVerdict::Nullable(Box::new(TypeVerdict::Reference("Address".to_string())))
        );
    }

    #[test]
    fn test_multi_branch_union_collapses_with_warning() {
        let (verdict, warnings) = run("string | number");
        assert_eq!(verdict, TypeVerdict::Primitive(PrimitiveKind::Str));
        assert_eq!(warnings.len(), 1);
        assert!(matches!(
            warnings[0].kind,
            WarningKind::UnionCollapsed { .. }
        ));
    }

    #[test]
    fn test_multi_branch_union_with_null_stays_nullable() {
        let (verdict, warnings) = run("string | number | null");
        assert_eq!(
            verdict,
            TypeVerdict::Nullable(Box::new(TypeVerdict::Primitive(PrimitiveKind::Str)))
        );
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_array_marker() {
        assert_eq!(run("Tag[]").0, TypeVerdict::ArrayOf("Tag".to_string()));
        assert_eq!(run("string []").0, TypeVerdict::ArrayOf("string".to_string()));
    }

    #[test]
    fn test_reference_fallback() {
        assert_eq!(run("Address").0, TypeVerdict::Reference("Address".to_string()));
        // Unrecognized forms still get a verdict, never an error.
        assert_eq!(
            run("Record<string, number>").0,
            TypeVerdict::Reference("Record<string, number>".to_string())
        );
    }
}
