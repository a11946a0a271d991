//! # Check-Schema Subcommand
//!
//! Loads and compiles a schema without validating any data, then lists
//! its fields in the order they will be checked.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use fieldguard_core::{create_validator, FieldKind, FieldRule, Schema};

/// Arguments for the `fieldguard check-schema` subcommand.
#[derive(Args, Debug)]
pub struct CheckSchemaArgs {
    /// Schema file (.json, .yaml or .yml).
    #[arg(value_name = "SCHEMA")]
    pub path: PathBuf,
}

/// Execute the check-schema subcommand.
///
/// Returns exit code 0 when the schema compiles; load failures are errors.
pub fn run_check_schema(args: &CheckSchemaArgs) -> Result<u8> {
    let schema = Schema::from_path(&args.path)
        .with_context(|| format!("failed to load schema {}", args.path.display()))?;
    let validator = create_validator(&schema);
    tracing::debug!(
        fields = validator.field_names().count(),
        "schema compiled"
    );

    for line in describe(&schema) {
        println!("{line}");
    }
    println!("Schema OK: {} field(s)", schema.len());
    Ok(0)
}

/// One line per field, array item fields indented beneath their array.
pub fn describe(schema: &Schema) -> Vec<String> {
    let mut lines = Vec::new();
    describe_into(schema, 0, &mut lines);
    lines
}

fn describe_into(schema: &Schema, depth: usize, lines: &mut Vec<String>) {
    for (name, rule) in schema.iter() {
        lines.push(format!("{}{name}: {}", "  ".repeat(depth), summary(rule)));
        if let FieldKind::Array(array) = &rule.kind {
            describe_into(&array.items, depth + 1, lines);
        }
    }
}

fn summary(rule: &FieldRule) -> String {
    let mut text = rule.kind.type_name().to_string();
    if rule.required {
        text.push_str(" (required)");
    }
    text
}
