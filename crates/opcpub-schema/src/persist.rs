//! # Schema Files
//!
//! Generated schemas are committed next to the configuration files they
//! describe, so they are written tab-indented with a trailing newline for
//! readable diffs. Writing replaces any existing file wholesale.

use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

use crate::validate::SchemaValidationError;

/// Serialize `schema` with tab indentation.
///
/// # Errors
///
/// Returns `SchemaValidationError::SchemaSerializeError` if serialization fails.
pub fn to_schema_string(schema: &Value) -> Result<String, SchemaValidationError> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"\t"));
    schema
        .serialize(&mut ser)
        .map_err(|e| SchemaValidationError::SchemaSerializeError {
            reason: e.to_string(),
        })?;
    buf.push(b'\n');
    String::from_utf8(buf).map_err(|e| SchemaValidationError::SchemaSerializeError {
        reason: format!("serialized schema is not UTF-8: {e}"),
    })
}

/// Write `schema` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns `SchemaValidationError::SchemaSerializeError` if the schema cannot
/// be serialized, or `SchemaValidationError::SchemaWriteError` if the
/// directory cannot be created or the file cannot be written.
pub fn write_schema_file(path: &Path, schema: &Value) -> Result<(), SchemaValidationError> {
    let content = to_schema_string(schema)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| SchemaValidationError::SchemaWriteError {
            path: parent.display().to_string(),
            reason: format!("cannot create directory: {e}"),
        })?;
    }

    std::fs::write(path, content).map_err(|e| SchemaValidationError::SchemaWriteError {
        path: path.display().to_string(),
        reason: format!("cannot write file: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tab_indentation() {
        let text = to_schema_string(&json!({ "type": "array", "items": { "type": "string" } })).unwrap();
        assert!(text.contains("\n\t\"items\": {\n\t\t\"type\": \"string\"\n\t}"));
        assert!(text.ends_with("}\n"));
        assert!(!text.contains("  "));
    }

    #[test]
    fn test_write_creates_directories_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output").join("nested").join("schema.json");

        write_schema_file(&path, &json!({ "type": "array" })).unwrap();
        write_schema_file(&path, &json!({ "type": "object" })).unwrap();

        let written: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, json!({ "type": "object" }));
    }

    #[test]
    fn test_write_into_file_path_parent_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"file").unwrap();

        let err = write_schema_file(&blocker.join("schema.json"), &json!({})).unwrap_err();
        match err {
            SchemaValidationError::SchemaWriteError { path, .. } => {
                assert_eq!(path, blocker.display().to_string());
            }
            other => panic!("Expected SchemaWriteError, got: {other}"),
        }
    }

    #[test]
    fn test_write_over_directory_reports_target_path() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("schema.json");
        std::fs::create_dir(&target).unwrap();

        let err = write_schema_file(&target, &json!({})).unwrap_err();
        match err {
            SchemaValidationError::SchemaWriteError { path, reason } => {
                assert_eq!(path, target.display().to_string());
                assert!(reason.starts_with("cannot write file"), "{reason}");
            }
            other => panic!("Expected SchemaWriteError, got: {other}"),
        }
    }
}
