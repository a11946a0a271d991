//! # Validate Subcommand
//!
//! Compiles the schema once and checks every data file against it. With
//! `--each`, a top-level array is treated as a batch and every element is
//! reported separately as `<file>#<index>`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde::Serialize;

use fieldguard_core::{create_validator, Schema, ValidationResult, Validator};

/// Arguments for the `fieldguard validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Schema file (.json, .yaml or .yml).
    #[arg(long, short)]
    pub schema: PathBuf,

    /// Treat a top-level array in each data file as a batch of records.
    #[arg(long)]
    pub each: bool,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Data files to validate (.json, .yaml or .yml).
    #[arg(value_name = "DATA", required = true)]
    pub data: Vec<PathBuf>,
}

/// How per-record results are printed.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// `OK <source>` or `FAIL <source>: <message>`.
    Text,
    /// One JSON object per line: `{"source": ..., "match": ..., "error": ...}`.
    Json,
}

/// Result for one record, labelled with where it came from.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RecordReport {
    pub source: String,
    #[serde(flatten)]
    pub result: ValidationResult,
}

impl RecordReport {
    /// Render the report in the requested format.
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        Ok(match format {
            OutputFormat::Text => match &self.result.error {
                None => format!("OK {}", self.source),
                Some(error) => format!("FAIL {}: {error}", self.source),
            },
            OutputFormat::Json => serde_json::to_string(self)?,
        })
    }
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 if every record matches, 1 if any is rejected.
pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let schema = Schema::from_path(&args.schema)
        .with_context(|| format!("failed to load schema {}", args.schema.display()))?;
    let validator = create_validator(&schema);

    tracing::info!(
        schema = %args.schema.display(),
        fields = schema.len(),
        "compiled schema"
    );

    let mut rejected = 0usize;
    let mut total = 0usize;

    for path in &args.data {
        for report in validate_file(&validator, path, args.each)? {
            total += 1;
            if !report.result.matched {
                rejected += 1;
            }
            println!("{}", report.render(args.format)?);
        }
    }

    tracing::info!(total, rejected, "validation finished");

    Ok(if rejected > 0 { 1 } else { 0 })
}

/// Validate one data file, returning one report per record.
pub fn validate_file(validator: &Validator, path: &Path, each: bool) -> Result<Vec<RecordReport>> {
    let document = crate::load_document(path)?;
    let source = path.display().to_string();

    let reports = match document.as_array() {
        Some(records) if each => records
            .iter()
            .enumerate()
            .map(|(index, record)| RecordReport {
                source: format!("{source}#{index}"),
                result: validator.check(record),
            })
            .collect(),
        _ => vec![RecordReport {
            result: validator.check(&document),
            source,
        }],
    };

    tracing::debug!(path = %path.display(), records = reports.len(), "validated file");
    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldguard_core::FieldRule;

    fn validator() -> Validator {
        create_validator(
            &Schema::new()
                .field("name", FieldRule::string().required())
                .field("tier", FieldRule::enumeration(["A", "B"])),
        )
    }

    #[test]
    fn validate_file_single_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("one.json");
        std::fs::write(&path, r#"{"name": "Ada", "tier": "A"}"#).unwrap();

        let reports = validate_file(&validator(), &path, false).unwrap();
        assert_eq!(reports.len(), 1);
        assert!(reports[0].result.matched);
        assert_eq!(reports[0].source, path.display().to_string());
    }

    #[test]
    fn validate_file_batch_labels_each_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("batch.yaml");
        std::fs::write(&path, "- name: Ada\n  tier: A\n- tier: B\n").unwrap();

        let reports = validate_file(&validator(), &path, true).unwrap();
        assert_eq!(reports.len(), 2);
        assert!(reports[0].result.matched);
        assert!(reports[1].source.ends_with("batch.yaml#1"));
        assert_eq!(
            reports[1].result.error.as_deref(),
            Some("Field 'name' is required.")
        );
    }

    #[test]
    fn validate_file_array_without_each_is_one_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list.json");
        std::fs::write(&path, r#"[{"name": "Ada", "tier": "A"}]"#).unwrap();

        let reports = validate_file(&validator(), &path, false).unwrap();
        assert_eq!(reports.len(), 1);
        assert!(!reports[0].result.matched);
    }

    #[test]
    fn render_text_and_json() {
        let pass = RecordReport {
            source: "a.json".to_string(),
            result: ValidationResult::pass(),
        };
        let fail = RecordReport {
            source: "b.json#2".to_string(),
            result: ValidationResult {
                matched: false,
                error: Some("Field 'name' is required.".to_string()),
            },
        };

        assert_eq!(pass.render(OutputFormat::Text).unwrap(), "OK a.json");
        assert_eq!(
            fail.render(OutputFormat::Text).unwrap(),
            "FAIL b.json#2: Field 'name' is required."
        );
        assert_eq!(
            pass.render(OutputFormat::Json).unwrap(),
            r#"{"source":"a.json","match":true}"#
        );
        assert_eq!(
            fail.render(OutputFormat::Json).unwrap(),
            r#"{"source":"b.json#2","match":false,"error":"Field 'name' is required."}"#
        );
    }

    #[test]
    fn run_validate_exit_codes() {
        let dir = tempfile::tempdir().unwrap();
        let schema = dir.path().join("schema.json");
        let good = dir.path().join("good.json");
        let bad = dir.path().join("bad.json");
        std::fs::write(&schema, r#"{"name": {"type": "String", "required": true}}"#).unwrap();
        std::fs::write(&good, r#"{"name": "Ada"}"#).unwrap();
        std::fs::write(&bad, r#"{"name": 7}"#).unwrap();

        let args = |data: Vec<PathBuf>| ValidateArgs {
            schema: schema.clone(),
            each: false,
            format: OutputFormat::Text,
            data,
        };
        assert_eq!(run_validate(&args(vec![good.clone()])).unwrap(), 0);
        assert_eq!(run_validate(&args(vec![good, bad])).unwrap(), 1);
    }

    #[test]
    fn run_validate_invalid_schema_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let schema = dir.path().join("schema.json");
        let data = dir.path().join("data.json");
        std::fs::write(&schema, r#"{"name": {"type": "Object"}}"#).unwrap();
        std::fs::write(&data, "{}").unwrap();

        let args = ValidateArgs {
            schema,
            each: false,
            format: OutputFormat::Json,
            data: vec![data],
        };
        let err = run_validate(&args).unwrap_err();
        assert!(format!("{err:#}").contains("failed to load schema"));
    }
}
