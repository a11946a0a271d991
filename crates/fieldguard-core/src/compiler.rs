//! # Schema Compiler
//!
//! Turns a [`Schema`] into a reusable [`Validator`].
//!
//! Compilation walks the schema once, including every nested array item
//! schema, so validating a record never re-compiles anything. A compiled
//! validator is immutable and shares its field table through an `Arc`:
//! clones are cheap, and one validator can be used from many threads at
//! once.
//!
//! ## Validation Order
//!
//! Fields are checked in declaration order and validation stops at the
//! first violation. For each field:
//!
//! 1. If the field is `required` and absent, report `MissingRequired`
//!    and skip its type checks.
//! 2. Otherwise run the type checker for the field's tag. A field that is
//!    absent but not required is still type-checked, and fails.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::checkers::{check_array, check_double, check_enum, check_number, check_string};
use crate::error::Violation;
use crate::schema::{EnumRule, FieldKind, NumberRule, Schema, StringRule};

/// Compile a schema into a [`Validator`]. Equivalent to [`Validator::compile`].
pub fn create_validator(schema: &Schema) -> Validator {
    Validator::compile(schema)
}

/// A compiled, immutable schema check.
#[derive(Debug, Clone)]
pub struct Validator {
    fields: Arc<[CompiledField]>,
}

#[derive(Debug)]
struct CompiledField {
    name: String,
    required: bool,
    check: Check,
}

/// Per-field check, with array item schemas already compiled.
#[derive(Debug)]
enum Check {
    String(StringRule),
    Number(NumberRule),
    Double(NumberRule),
    Enum(EnumRule),
    Array(Validator),
}

impl Check {
    fn compile(kind: &FieldKind) -> Self {
        match kind {
            FieldKind::String(rule) => Self::String(rule.clone()),
            FieldKind::Number(rule) => Self::Number(rule.clone()),
            FieldKind::Double(rule) => Self::Double(rule.clone()),
            FieldKind::Enum(rule) => Self::Enum(rule.clone()),
            FieldKind::Array(rule) => Self::Array(Validator::compile(&rule.items)),
        }
    }

    fn run(&self, value: Option<&Value>, field: &FieldPath<'_>) -> Result<(), Violation> {
        match self {
            Self::String(rule) => check_string(value, rule, field),
            Self::Number(rule) => check_number(value, rule, field),
            Self::Double(rule) => check_double(value, rule, field),
            Self::Enum(rule) => check_enum(value, rule, field),
            Self::Array(items) => check_array(value, items, field),
        }
    }
}

/// Field path rendered only when a violation is built: `name` at the root,
/// `<key>.name` under an array element key.
struct FieldPath<'a> {
    key: Option<&'a str>,
    name: &'a str,
}

impl fmt::Display for FieldPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.key {
            Some(key) => write!(f, "{key}.{}", self.name),
            None => f.write_str(self.name),
        }
    }
}

impl Validator {
    /// Compile `schema`, including nested array item schemas.
    pub fn compile(schema: &Schema) -> Self {
        let fields: Arc<[CompiledField]> = schema
            .iter()
            .map(|(name, rule)| CompiledField {
                name: name.to_string(),
                required: rule.required,
                check: Check::compile(&rule.kind),
            })
            .collect();
        tracing::debug!(fields = fields.len(), "compiled schema");
        Self { fields }
    }

    /// Validate a record, reporting field names as declared.
    ///
    /// # Errors
    ///
    /// Returns the first [`Violation`] in field declaration order.
    pub fn validate(&self, data: &Value) -> Result<(), Violation> {
        let result = self.run(data, None);
        if let Err(violation) = &result {
            tracing::trace!(
                field = violation.field(),
                kind = %violation.kind(),
                "record rejected"
            );
        }
        result
    }

    /// Validate a record nested under `key`; violations name fields as
    /// `<key>.<field>`. Used for array elements, where `key` is
    /// `<array field>[<index>]`.
    ///
    /// # Errors
    ///
    /// Returns the first [`Violation`] in field declaration order.
    pub fn validate_at(&self, data: &Value, key: &str) -> Result<(), Violation> {
        self.run(data, Some(key))
    }

    /// Validate a record and return the `{match, error?}` report.
    pub fn check(&self, data: &Value) -> ValidationResult {
        self.validate(data).into()
    }

    /// Names of the top-level fields, in validation order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|field| field.name.as_str())
    }

    fn run(&self, data: &Value, key: Option<&str>) -> Result<(), Violation> {
        let record = data.as_object();
        for field in self.fields.iter() {
            let value = record.and_then(|map| map.get(&field.name));
            let path = FieldPath {
                key,
                name: &field.name,
            };

            if field.required && value.is_none() {
                return Err(Violation::MissingRequired {
                    field: path.to_string(),
                });
            }
            field.check.run(value, &path)?;
        }
        Ok(())
    }
}

/// Serializable outcome of one validation: `{"match": true}` or
/// `{"match": false, "error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    #[serde(rename = "match")]
    pub matched: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ValidationResult {
    /// The passing result.
    pub fn pass() -> Self {
        Self {
            matched: true,
            error: None,
        }
    }

    /// A failing result carrying `violation`'s message.
    pub fn fail(violation: &Violation) -> Self {
        Self {
            matched: false,
            error: Some(violation.to_string()),
        }
    }
}

impl From<Result<(), Violation>> for ValidationResult {
    fn from(result: Result<(), Violation>) -> Self {
        match result {
            Ok(()) => Self::pass(),
            Err(violation) => Self::fail(&violation),
        }
    }
}
