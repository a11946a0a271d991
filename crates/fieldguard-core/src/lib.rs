//! # fieldguard-core — Declarative Record Validation
//!
//! Guards data entering a program (request payloads, loaded documents)
//! against a declarative [`Schema`], reporting the first violation found.
//!
//! ## Layers
//!
//! - [`checkers`] — one stateless check per type tag (`String`, `Number`,
//!   `Double`/`Float`, `Enum`, `Array`).
//! - [`compiler`] — turns a [`Schema`] into a reusable [`Validator`],
//!   compiling nested array item schemas up front.
//! - [`schema`] — the schema data model, its builder API and its JSON/YAML
//!   document form.
//! - [`error`] — [`Violation`] (data failed a rule) and [`SchemaError`]
//!   (a schema document could not be read).
//!
//! ## Example
//!
//! ```
//! use fieldguard_core::{create_validator, FieldRule, Schema};
//! use serde_json::json;
//!
//! let validator = create_validator(
//!     &Schema::new()
//!         .field("name", FieldRule::string().required().min_length(2))
//!         .field("tier", FieldRule::enumeration(["A", "B", "C"])),
//! );
//!
//! assert!(validator.validate(&json!({"name": "Ada", "tier": "B"})).is_ok());
//!
//! let err = validator.validate(&json!({"tier": "B"})).unwrap_err();
//! assert_eq!(err.to_string(), "Field 'name' is required.");
//! ```
//!
//! ## Crate Policy
//!
//! - Validation is pure: no I/O, no shared mutable state, no panics on
//!   bad data. Every failure is a returned [`Violation`].
//! - Coercion, multi-error collection and default substitution are out of
//!   scope.

pub mod checkers;
pub mod compiler;
pub mod error;
pub mod schema;

pub use compiler::{create_validator, ValidationResult, Validator};
pub use error::{SchemaError, Violation, ViolationKind};
pub use schema::{
    ArrayRule, DocumentFormat, EnumRule, FieldKind, FieldRule, NumberRule, Schema, StringRule,
};
