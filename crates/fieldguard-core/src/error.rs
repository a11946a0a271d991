//! # Error Types
//!
//! Two families of errors live here:
//!
//! - [`Violation`] — a data instance failed a field rule. Violations are
//!   ordinary values returned from [`Validator::validate`](crate::Validator::validate);
//!   they are never panics and carry the field path plus the constraint
//!   that was broken.
//! - [`SchemaError`] — a schema document could not be turned into a
//!   [`Schema`](crate::Schema). These are definition errors, raised once at
//!   load time, never while validating data.

use std::fmt;

use thiserror::Error;

/// The first rule violation found in a data instance.
///
/// `Display` renders the human-readable message reported to callers.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Violation {
    /// A field marked `required` is absent.
    #[error("Field '{field}' is required.")]
    MissingRequired {
        /// Path of the missing field.
        field: String,
    },

    /// The value's runtime type does not match the field's type tag.
    #[error("Field '{field}' has an invalid type. Expected {expected}.")]
    InvalidType {
        /// Path of the offending field.
        field: String,
        /// Description of the expected type, e.g. `"a string"`.
        expected: &'static str,
    },

    /// String shorter than `minLength`.
    #[error("Field '{field}' length should be at least {min_length}.")]
    TooShort {
        /// Path of the offending field.
        field: String,
        /// The configured lower bound on length.
        min_length: usize,
    },

    /// String longer than `maxLength`.
    #[error("Field '{field}' length should be at most {max_length}.")]
    TooLong {
        /// Path of the offending field.
        field: String,
        /// The configured upper bound on length.
        max_length: usize,
    },

    /// Numeric value below `min`.
    #[error("Field '{field}' value should be at least {min}.")]
    BelowMin {
        /// Path of the offending field.
        field: String,
        /// The configured lower bound. Integral bounds print without `.0`.
        min: f64,
    },

    /// Numeric value above `max`.
    #[error("Field '{field}' value should be at most {max}.")]
    AboveMax {
        /// Path of the offending field.
        field: String,
        /// The configured upper bound.
        max: f64,
    },

    /// A double/float field holds a number written without a fractional part.
    #[error("Field '{field}' has an invalid value. Expected a valid double (number with floating-point).")]
    NotFloatingPoint {
        /// Path of the offending field.
        field: String,
    },

    /// Value is not one of the allowed enum members.
    #[error("Field '{field}' has an invalid value. Expected one of: {allowed}.")]
    NotInEnum {
        /// Path of the offending field.
        field: String,
        /// Allowed members, comma-and-space joined in declaration order.
        allowed: String,
    },
}

/// Fieldless discriminant of [`Violation`], for matching without caring
/// about the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViolationKind {
    /// See [`Violation::MissingRequired`].
    MissingRequired,
    /// See [`Violation::InvalidType`].
    InvalidType,
    /// See [`Violation::TooShort`].
    TooShort,
    /// See [`Violation::TooLong`].
    TooLong,
    /// See [`Violation::BelowMin`].
    BelowMin,
    /// See [`Violation::AboveMax`].
    AboveMax,
    /// See [`Violation::NotFloatingPoint`].
    NotFloatingPoint,
    /// See [`Violation::NotInEnum`].
    NotInEnum,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::MissingRequired => "missing_required",
            Self::InvalidType => "invalid_type",
            Self::TooShort => "too_short",
            Self::TooLong => "too_long",
            Self::BelowMin => "below_min",
            Self::AboveMax => "above_max",
            Self::NotFloatingPoint => "not_floating_point",
            Self::NotInEnum => "not_in_enum",
        };
        f.write_str(name)
    }
}

impl Violation {
    /// Path of the field that failed, e.g. `name` or `items[1].x`.
    pub fn field(&self) -> &str {
        match self {
            Self::MissingRequired { field }
            | Self::InvalidType { field, .. }
            | Self::TooShort { field, .. }
            | Self::TooLong { field, .. }
            | Self::BelowMin { field, .. }
            | Self::AboveMax { field, .. }
            | Self::NotFloatingPoint { field }
            | Self::NotInEnum { field, .. } => field,
        }
    }

    /// The violation class without its payload.
    pub fn kind(&self) -> ViolationKind {
        match self {
            Self::MissingRequired { .. } => ViolationKind::MissingRequired,
            Self::InvalidType { .. } => ViolationKind::InvalidType,
            Self::TooShort { .. } => ViolationKind::TooShort,
            Self::TooLong { .. } => ViolationKind::TooLong,
            Self::BelowMin { .. } => ViolationKind::BelowMin,
            Self::AboveMax { .. } => ViolationKind::AboveMax,
            Self::NotFloatingPoint { .. } => ViolationKind::NotFloatingPoint,
            Self::NotInEnum { .. } => ViolationKind::NotInEnum,
        }
    }
}

/// Error while loading or interpreting a schema document.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The document is not a valid schema (bad JSON, unknown type tag,
    /// wrong constraint types).
    #[error("invalid schema: {0}")]
    Parse(#[from] serde_json::Error),

    /// The document is not valid YAML.
    #[error("invalid YAML schema: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The schema file extension is not one of `.json`, `.yaml`, `.yml`.
    #[error("unsupported schema format for '{path}': expected .json, .yaml or .yml")]
    UnsupportedFormat {
        /// Offending path.
        path: String,
    },

    /// IO error reading a schema file.
    #[error("cannot read schema '{path}': {source}")]
    Io {
        /// Path that failed to load.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
}
