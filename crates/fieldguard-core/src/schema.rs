//! # Schema Description
//!
//! The declarative input to the compiler: an ordered list of field names,
//! each paired with a [`FieldRule`].
//!
//! ## Ordering
//!
//! Field order is observable. The validator reports the first failing
//! field in declaration order, so a [`Schema`] keeps its fields in a `Vec`
//! and its `Deserialize` impl consumes the document's map entries in the
//! order they are written. Duplicate names in a document are rejected.
//!
//! ## Wire Shape
//!
//! ```json
//! {
//!   "name":  { "type": "String", "required": true, "minLength": 3 },
//!   "age":   { "type": "Number", "min": 0, "max": 150 },
//!   "price": { "type": "Double", "max": 10 },
//!   "tier":  { "type": "Enum", "enum": ["A", "B", "C"] },
//!   "items": { "type": "Array", "itemValidator": { "x": { "type": "Number" } } }
//! }
//! ```
//!
//! Constraint keys that do not apply to a field's `type` are ignored.
//! `Float` is accepted as an alias of `Double`. Any other `type` tag is a
//! schema-definition error.

use std::fmt;
use std::path::Path;

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SchemaError;

/// Ordered mapping from field name to [`FieldRule`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    fields: Vec<(String, FieldRule)>,
}

impl Schema {
    /// An empty schema. Every object (and every non-object) matches it.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field, or replace the rule of an existing field in place
    /// (its position is kept).
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, rule: FieldRule) -> Self {
        self.insert(name, rule);
        self
    }

    /// In-place form of [`Schema::field`]. Returns the previous rule when
    /// the name was already present.
    pub fn insert(&mut self, name: impl Into<String>, rule: FieldRule) -> Option<FieldRule> {
        let name = name.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, rule)),
            None => {
                self.fields.push((name, rule));
                None
            }
        }
    }

    /// Look up a field's rule by name.
    pub fn get(&self, name: &str) -> Option<&FieldRule> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, rule)| rule)
    }

    /// Fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldRule)> {
        self.fields.iter().map(|(name, rule)| (name.as_str(), rule))
    }

    /// Number of fields at this level (nested item schemas not counted).
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True if the schema declares no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Parse a schema from a JSON document.
    pub fn from_json_str(source: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Parse a schema from a YAML document.
    pub fn from_yaml_str(source: &str) -> Result<Self, SchemaError> {
        Ok(serde_yaml::from_str(source)?)
    }

    /// Interpret an already-parsed JSON value as a schema.
    ///
    /// Field order follows the order of the value's object map.
    pub fn from_value(value: Value) -> Result<Self, SchemaError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Load a schema file, choosing the format from its extension
    /// (`.json`, `.yaml` or `.yml`).
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnsupportedFormat`] for any other extension,
    /// [`SchemaError::Io`] if the file cannot be read, and a parse error if
    /// its content is not a valid schema.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        let format = DocumentFormat::from_path(path).ok_or_else(|| {
            SchemaError::UnsupportedFormat {
                path: path.display().to_string(),
            }
        })?;
        let content = std::fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.display().to_string(),
            source,
        })?;
        match format {
            DocumentFormat::Json => Self::from_json_str(&content),
            DocumentFormat::Yaml => Self::from_yaml_str(&content),
        }
    }
}

/// Document formats accepted for schema and data files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Pick a format from a file extension, if it is one we read.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Some(Self::Json),
            Some("yaml" | "yml") => Some(Self::Yaml),
            _ => None,
        }
    }
}

impl Serialize for Schema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, rule) in &self.fields {
            map.serialize_entry(name, rule)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Schema {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SchemaVisitor;

        impl<'de> Visitor<'de> for SchemaVisitor {
            type Value = Schema;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of field names to field rules")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Schema, A::Error> {
                let mut fields: Vec<(String, FieldRule)> =
                    Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, rule)) = access.next_entry::<String, FieldRule>()? {
                    if fields.iter().any(|(existing, _)| *existing == name) {
                        return Err(de::Error::custom(format!(
                            "duplicate field '{name}' in schema"
                        )));
                    }
                    fields.push((name, rule));
                }
                Ok(Schema { fields })
            }
        }

        deserializer.deserialize_map(SchemaVisitor)
    }
}

/// One field's type tag, constraints and presence requirement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldRule {
    /// Absent values fail with `MissingRequired` before any type check.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    /// Type tag plus the constraints that apply to it.
    #[serde(flatten)]
    pub kind: FieldKind,
}

/// The closed set of supported type tags, each with its own constraints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FieldKind {
    String(StringRule),
    Number(NumberRule),
    /// Serialized as `Double`; `Float` is read as the same variant.
    #[serde(alias = "Float")]
    Double(NumberRule),
    Enum(EnumRule),
    Array(ArrayRule),
}

impl FieldKind {
    /// The canonical type tag, as written in schema documents.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::String(_) => "String",
            Self::Number(_) => "Number",
            Self::Double(_) => "Double",
            Self::Enum(_) => "Enum",
            Self::Array(_) => "Array",
        }
    }
}

/// Length bounds for `String` fields, counted in characters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StringRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
}

/// Inclusive bounds for `Number` and `Double` fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NumberRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

/// Allowed members of an `Enum` field, in the order they are reported.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnumRule {
    #[serde(rename = "enum", default)]
    pub values: Vec<Value>,
}

/// Element schema of an `Array` field.
///
/// Every element is validated against `items` as a record. An omitted
/// `itemValidator` is the empty schema, so only the array type is checked.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArrayRule {
    #[serde(rename = "itemValidator", default)]
    pub items: Schema,
}

impl FieldRule {
    fn of(kind: FieldKind) -> Self {
        Self {
            required: false,
            kind,
        }
    }

    /// A `String` field with no length bounds.
    pub fn string() -> Self {
        Self::of(FieldKind::String(StringRule::default()))
    }

    /// A `Number` field with no bounds.
    pub fn number() -> Self {
        Self::of(FieldKind::Number(NumberRule::default()))
    }

    /// A `Double` (a.k.a. `Float`) field with no bounds.
    pub fn double() -> Self {
        Self::of(FieldKind::Double(NumberRule::default()))
    }

    /// An `Enum` field accepting exactly `values`.
    pub fn enumeration<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::of(FieldKind::Enum(EnumRule {
            values: values.into_iter().map(Into::into).collect(),
        }))
    }

    /// An `Array` field whose elements must each match `items`.
    pub fn array(items: Schema) -> Self {
        Self::of(FieldKind::Array(ArrayRule { items }))
    }

    /// Mark the field as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the minimum string length. Ignored by non-`String` fields.
    #[must_use]
    pub fn min_length(mut self, min_length: usize) -> Self {
        if let FieldKind::String(rule) = &mut self.kind {
            rule.min_length = Some(min_length);
        }
        self
    }

    /// Set the maximum string length. Ignored by non-`String` fields.
    #[must_use]
    pub fn max_length(mut self, max_length: usize) -> Self {
        if let FieldKind::String(rule) = &mut self.kind {
            rule.max_length = Some(max_length);
        }
        self
    }

    /// Set the numeric lower bound. Ignored by non-numeric fields.
    #[must_use]
    pub fn min(mut self, min: f64) -> Self {
        if let FieldKind::Number(rule) | FieldKind::Double(rule) = &mut self.kind {
            rule.min = Some(min);
        }
        self
    }

    /// Set the numeric upper bound. Ignored by non-numeric fields.
    #[must_use]
    pub fn max(mut self, max: f64) -> Self {
        if let FieldKind::Number(rule) | FieldKind::Double(rule) = &mut self.kind {
            rule.max = Some(max);
        }
        self
    }
}
