//! # Schema Validation
//!
//! Validates configuration documents against a generated schema and returns
//! a structured report.
//!
//! ## Outcomes
//!
//! A document that does not conform is an expected, recoverable outcome:
//! [`validate_document`] returns `Ok` with `passed == false` and the list of
//! violations. `Err` is reserved for schemas that cannot be compiled, which
//! for generated schemas means a generator defect.
//!
//! ## `oneOf` Expansion
//!
//! The `jsonschema` crate reports a failed `oneOf` as a single error at the
//! element. That hides which field broke the record. Each alternative of a
//! failed `oneOf` is therefore validated on its own, and its violations are
//! reported with paths rebased onto the full document:
//!
//! ```text
//! /0/OpcNodes/0/Id  /items/oneOf/0/properties/OpcNodes/items/properties/Id/pattern
//! /0                /items/oneOf/2/required
//! /0                /items/oneOf
//! ```
//!
//! One defect therefore produces several violations: at least one per
//! failed alternative plus the element-level `oneOf` failure.
//!
//! The schema is compiled on every call. Validation runs once per CLI
//! invocation, so compiled validators are not cached.

use std::fmt;
use std::path::Path;

use jsonschema::error::ValidationErrorKind;
use jsonschema::Validator;
use serde_json::Value;
use thiserror::Error;

/// Error during schema loading, compilation or persistence.
#[derive(Error, Debug)]
pub enum SchemaValidationError {
    /// The schema file could not be read or parsed.
    #[error("schema load error for '{path}': {reason}")]
    SchemaLoadError {
        /// Path to the schema file.
        path: String,
        /// Reason the schema could not be loaded.
        reason: String,
    },

    /// The configuration document could not be read or parsed.
    #[error("document load error for '{path}': {reason}")]
    DocumentLoadError {
        /// Path to the document that failed to load.
        path: String,
        /// Reason the document could not be loaded.
        reason: String,
    },

    /// The schema could not be compiled into a validator.
    #[error("validator build error: {reason}")]
    ValidatorBuildError {
        /// Reason the validator could not be built.
        reason: String,
    },

    /// A generated schema could not be serialized.
    #[error("schema serialization error: {reason}")]
    SchemaSerializeError {
        /// Reason serialization failed.
        reason: String,
    },

    /// A generated schema could not be written.
    #[error("schema write error for '{path}': {reason}")]
    SchemaWriteError {
        /// Target path.
        path: String,
        /// Reason the write failed.
        reason: String,
    },
}

/// A single validation violation with structured context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON Pointer path to the violating value in the document.
    pub instance_path: String,
    /// JSON Pointer path to the schema constraint that failed.
    pub schema_path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let instance_path = if self.instance_path.is_empty() {
            "(root)"
        } else {
            self.instance_path.as_str()
        };
        write!(f, "  {instance_path}: {} [{}]", self.message, self.schema_path)
    }
}

/// Collection of validation violations, in report order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationViolations {
    violations: Vec<Violation>,
}

impl ValidationViolations {
    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns a slice of all violations.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Violations reported at exactly `instance_path`.
    pub fn at_instance_path<'a>(
        &'a self,
        instance_path: &'a str,
    ) -> impl Iterator<Item = &'a Violation> + 'a {
        self.violations
            .iter()
            .filter(move |v| v.instance_path == instance_path)
    }
}

impl fmt::Display for ValidationViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// Result of validating one document.
///
/// `errors` is `None` exactly when `passed` is true; a failed validation
/// always carries at least one violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    /// Whether the document conforms to the schema.
    pub passed: bool,
    /// Violations, absent on success.
    pub errors: Option<ValidationViolations>,
}

impl ValidationOutcome {
    fn from_violations(violations: Vec<Violation>) -> Self {
        if violations.is_empty() {
            Self {
                passed: true,
                errors: None,
            }
        } else {
            Self {
                passed: false,
                errors: Some(ValidationViolations { violations }),
            }
        }
    }
}

/// Compile `schema`. The draft is taken from its `$schema` keyword.
fn build_validator(schema: &Value) -> Result<Validator, SchemaValidationError> {
    let opts = jsonschema::options();
    opts.build(schema)
        .map_err(|e| SchemaValidationError::ValidatorBuildError {
            reason: e.to_string(),
        })
}

/// Check that `schema` compiles, without validating any document.
///
/// # Errors
///
/// Returns `SchemaValidationError::ValidatorBuildError` if the schema or
/// one of its patterns is malformed.
pub fn check_schema(schema: &Value) -> Result<(), SchemaValidationError> {
    build_validator(schema).map(|_| ())
}

/// Validate a parsed document against a schema.
///
/// # Errors
///
/// Returns `SchemaValidationError::ValidatorBuildError` if the schema, or
/// one of its `oneOf` alternatives, cannot be compiled. A non-conforming
/// document is not an error.
pub fn validate_document(
    document: &Value,
    schema: &Value,
) -> Result<ValidationOutcome, SchemaValidationError> {
    let validator = build_validator(schema)?;
    let mut violations = Vec::new();
    collect_violations(&validator, schema, document, &mut violations)?;
    Ok(ValidationOutcome::from_violations(violations))
}

fn collect_violations(
    validator: &Validator,
    schema: &Value,
    instance: &Value,
    out: &mut Vec<Violation>,
) -> Result<(), SchemaValidationError> {
    for error in validator.iter_errors(instance) {
        let instance_path = error.instance_path.to_string();
        let schema_path = error.schema_path.to_string();

        if matches!(error.kind, ValidationErrorKind::OneOfNotValid { .. }) {
            expand_one_of(schema, &schema_path, instance, &instance_path, out)?;
        }

        out.push(Violation {
            instance_path,
            schema_path,
            message: error.to_string(),
        });
    }
    Ok(())
}

/// Validate `instance_path` against each alternative of the `oneOf` at
/// `schema_path` and append the rebased violations.
fn expand_one_of(
    schema: &Value,
    schema_path: &str,
    instance: &Value,
    instance_path: &str,
    out: &mut Vec<Violation>,
) -> Result<(), SchemaValidationError> {
    let Some(alternatives) = schema.pointer(schema_path).and_then(Value::as_array) else {
        return Ok(());
    };
    let Some(element) = instance.pointer(instance_path) else {
        return Ok(());
    };

    tracing::debug!(
        instance_path,
        schema_path,
        alternatives = alternatives.len(),
        "expanding oneOf failure"
    );

    for (index, alternative) in alternatives.iter().enumerate() {
        let alternative = inherit_draft(alternative, schema);
        let validator = build_validator(&alternative)?;

        let mut nested = Vec::new();
        collect_violations(&validator, &alternative, element, &mut nested)?;

        out.extend(nested.into_iter().map(|v| Violation {
            instance_path: format!("{instance_path}{}", v.instance_path),
            schema_path: format!("{schema_path}/{index}{}", v.schema_path),
            message: v.message,
        }));
    }
    Ok(())
}

/// Copy the root `$schema` into a subschema so it compiles under the same draft.
fn inherit_draft(subschema: &Value, root: &Value) -> Value {
    let mut subschema = subschema.clone();
    if let (Value::Object(map), Some(draft)) = (&mut subschema, root.get("$schema")) {
        map.entry("$schema").or_insert_with(|| draft.clone());
    }
    subschema
}

/// Load and parse a JSON schema file.
///
/// # Errors
///
/// Returns `SchemaValidationError::SchemaLoadError` if the file cannot be
/// read or is not valid JSON.
pub fn load_schema_file(path: &Path) -> Result<Value, SchemaValidationError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        SchemaValidationError::SchemaLoadError {
            path: path.display().to_string(),
            reason: format!("cannot read file: {e}"),
        }
    })?;
    serde_json::from_str(&content).map_err(|e| SchemaValidationError::SchemaLoadError {
        path: path.display().to_string(),
        reason: format!("invalid JSON: {e}"),
    })
}

/// Load a configuration document. Files ending in `.yaml`/`.yml` are read as
/// YAML, everything else as JSON.
///
/// # Errors
///
/// Returns `SchemaValidationError::DocumentLoadError` if the file cannot be
/// read or parsed.
pub fn load_document_file(path: &Path) -> Result<Value, SchemaValidationError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        SchemaValidationError::DocumentLoadError {
            path: path.display().to_string(),
            reason: format!("cannot read file: {e}"),
        }
    })?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    match ext {
        "yaml" | "yml" => serde_yaml::from_str(&content).map_err(|e| {
            SchemaValidationError::DocumentLoadError {
                path: path.display().to_string(),
                reason: format!("invalid YAML: {e}"),
            }
        }),
        _ => serde_json::from_str(&content).map_err(|e| {
            SchemaValidationError::DocumentLoadError {
                path: path.display().to_string(),
                reason: format!("invalid JSON: {e}"),
            }
        }),
    }
}

/// Validate the configuration file at `document_path` against the schema
/// file at `schema_path`.
pub fn validate_file(
    document_path: &Path,
    schema_path: &Path,
) -> Result<ValidationOutcome, SchemaValidationError> {
    let document = load_document_file(document_path)?;
    let schema = load_schema_file(schema_path)?;
    validate_document(&document, &schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_conforming_document_has_no_error_list() {
        let schema = json!({ "type": "array", "items": { "type": "integer" } });
        let outcome = validate_document(&json!([1, 2, 3]), &schema).unwrap();
        assert!(outcome.passed);
        assert!(outcome.errors.is_none());
    }

    #[test]
    fn test_failure_reports_instance_and_schema_paths() {
        let schema = json!({
            "type": "object",
            "properties": { "port": { "type": "integer" } }
        });
        let outcome = validate_document(&json!({ "port": "x" }), &schema).unwrap();
        assert!(!outcome.passed);
        let errors = outcome.errors.unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.violations()[0].instance_path, "/port");
        assert_eq!(errors.violations()[0].schema_path, "/properties/port/type");
    }

    #[test]
    fn test_one_of_failure_is_expanded_per_alternative() {
        let schema = json!({
            "type": "array",
            "items": {
                "oneOf": [
                    { "type": "object", "required": ["a"] },
                    { "type": "object", "properties": { "b": { "type": "string" } }, "required": ["b"] }
                ]
            }
        });
        let outcome = validate_document(&json!([{ "b": 1 }]), &schema).unwrap();
        let errors = outcome.errors.unwrap();

        let schema_paths: Vec<&str> =
            errors.violations().iter().map(|v| v.schema_path.as_str()).collect();
        assert!(schema_paths.contains(&"/items/oneOf/0/required"), "{schema_paths:?}");
        assert!(schema_paths.contains(&"/items/oneOf/1/properties/b/type"), "{schema_paths:?}");
        assert!(schema_paths.contains(&"/items/oneOf"), "{schema_paths:?}");
        assert_eq!(errors.at_instance_path("/0/b").count(), 1);
        assert_eq!(errors.at_instance_path("/0").count(), 2);
    }

    #[test]
    fn test_malformed_pattern_fails_compilation() {
        let schema = json!({ "type": "string", "pattern": "(^i=(\\d+)$)|(" });
        let err = check_schema(&schema).unwrap_err();
        assert!(
            matches!(err, SchemaValidationError::ValidatorBuildError { .. }),
            "Expected ValidatorBuildError, got: {err}"
        );
        assert!(validate_document(&json!("i=1"), &schema).is_err());
    }

    #[test]
    fn test_inherit_draft_keeps_existing_keyword() {
        let root = json!({ "$schema": "http://json-schema.org/draft-07/schema#" });
        let inherited = inherit_draft(&json!({ "type": "object" }), &root);
        assert_eq!(inherited["$schema"], root["$schema"]);

        let own = json!({ "$schema": "http://json-schema.org/draft-04/schema#" });
        assert_eq!(inherit_draft(&own, &root), own);
    }

    #[test]
    fn test_load_document_yaml_and_json() {
        let dir = tempfile::tempdir().unwrap();
        let yaml = dir.path().join("publishednodes.yaml");
        std::fs::write(&yaml, "- EndpointUrl: opc.tcp://localhost:50000\n  OpcNodes:\n    - Id: i=2258\n").unwrap();
        let json_path = dir.path().join("publishednodes.json");
        std::fs::write(
            &json_path,
            r#"[{"EndpointUrl":"opc.tcp://localhost:50000","OpcNodes":[{"Id":"i=2258"}]}]"#,
        )
        .unwrap();

        assert_eq!(load_document_file(&yaml).unwrap(), load_document_file(&json_path).unwrap());
    }

    #[test]
    fn test_load_errors_are_classified() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "{ not json").unwrap();
        let missing = dir.path().join("missing.json");

        assert!(matches!(
            load_document_file(&bad),
            Err(SchemaValidationError::DocumentLoadError { .. })
        ));
        assert!(matches!(
            load_schema_file(&missing),
            Err(SchemaValidationError::SchemaLoadError { .. })
        ));
        assert!(matches!(
            validate_file(&missing, &bad),
            Err(SchemaValidationError::DocumentLoadError { .. })
        ));
    }

    #[test]
    fn test_violation_display_format() {
        let v = Violation {
            instance_path: "/0/OpcNodes/0/Id".to_string(),
            schema_path: "/items/oneOf/0/properties/OpcNodes/items/properties/Id/pattern".to_string(),
            message: r#""i=12345f" does not match pattern"#.to_string(),
        };
        let display = v.to_string();
        assert!(display.contains("/0/OpcNodes/0/Id"));
        assert!(display.contains("does not match"));
        assert!(display.contains("/items/oneOf/0/"));
    }

    #[test]
    fn test_violation_display_root() {
        let v = Violation {
            instance_path: String::new(),
            schema_path: "/type".to_string(),
            message: r#"{} is not of type "array""#.to_string(),
        };
        assert!(v.to_string().contains("(root)"));
    }
}
