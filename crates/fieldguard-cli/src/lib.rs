//! # fieldguard-cli — Command-Line Interface
//!
//! ## Subcommands
//!
//! - `fieldguard validate --schema <SCHEMA> <DATA>...` — validate records.
//! - `fieldguard check-schema <SCHEMA>` — compile a schema and list its fields.
//!
//! ## Exit Codes
//!
//! `0` when everything passes, `1` when at least one record is rejected,
//! `2` on operational errors (unreadable files, invalid schema).
//!
//! ## Crate Policy
//!
//! - Argument parsing lives here; validation semantics live in
//!   `fieldguard-core`.
//! - Results go to stdout, logs to stderr.

pub mod check_schema;
pub mod validate;

use std::path::Path;

use anyhow::{bail, Context, Result};
use fieldguard_core::DocumentFormat;
use serde_json::Value;

/// Load a data document, choosing the format from its extension the same
/// way schema files are loaded: `.json` is JSON, `.yaml`/`.yml` is YAML,
/// and any other extension is rejected.
pub fn load_document(path: &Path) -> Result<Value> {
    let Some(format) = DocumentFormat::from_path(path) else {
        bail!(
            "unsupported data format for '{}': expected .json, .yaml or .yml",
            path.display()
        );
    };
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;

    match format {
        DocumentFormat::Yaml => serde_yaml::from_str(&content)
            .with_context(|| format!("invalid YAML in {}", path.display())),
        DocumentFormat::Json => serde_json::from_str(&content)
            .with_context(|| format!("invalid JSON in {}", path.display())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_document_reads_json_and_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("record.json");
        let yaml_path = dir.path().join("record.yml");
        std::fs::write(&json_path, r#"{"name": "Ada", "age": 36}"#).unwrap();
        std::fs::write(&yaml_path, "name: Ada\nage: 36\n").unwrap();

        let from_json = load_document(&json_path).unwrap();
        let from_yaml = load_document(&yaml_path).unwrap();
        assert_eq!(from_json, from_yaml);
    }

    #[test]
    fn load_document_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("record.txt");
        std::fs::write(&path, "[1, 2]").unwrap();
        let err = load_document(&path).unwrap_err();
        assert!(err.to_string().contains("unsupported data format"));
    }

    #[test]
    fn load_document_reports_path_on_bad_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{not json").unwrap();
        let err = load_document(&path).unwrap_err();
        assert!(format!("{err:#}").contains("broken.json"));
    }

    #[test]
    fn load_document_missing_file() {
        let err = load_document(Path::new("/nonexistent/fieldguard/data.json")).unwrap_err();
        assert!(err.to_string().contains("cannot read"));
    }
}
