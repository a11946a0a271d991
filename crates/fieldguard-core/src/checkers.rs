//! # Type Checkers
//!
//! One stateless function per type tag. Each takes the field's value
//! (`None` when the field is absent from the record), the field's rule,
//! and the field path used in messages. Checks run in a fixed order and
//! the first failing one is reported.
//!
//! The array checker delegates element checks to a compiled
//! [`Validator`], so it is the only checker that recurses.

use std::fmt;

use serde_json::{Number, Value};

use crate::compiler::Validator;
use crate::error::Violation;
use crate::schema::{EnumRule, NumberRule, StringRule};

const EXPECT_STRING: &str = "a string";
const EXPECT_NUMBER: &str = "a number";
const EXPECT_DOUBLE: &str = "a valid double (number with floating-point)";
const EXPECT_ARRAY: &str = "an array";

/// Magnitudes in `[1e-7, 1e21)` (and zero) render in plain decimal form;
/// anything else renders in exponent form.
const DECIMAL_FORM_MIN: f64 = 1e-7;
const DECIMAL_FORM_MAX: f64 = 1e21;

/// From here up every `f64` is a whole number, so a trailing `.0` in the
/// source literal no longer marks a floating-point value.
const WHOLE_LITERAL_LIMIT: f64 = 1e16;

fn invalid_type<F: fmt::Display + ?Sized>(field: &F, expected: &'static str) -> Violation {
    Violation::InvalidType {
        field: field.to_string(),
        expected,
    }
}

/// Check a `String` field: type, then `minLength`, then `maxLength`.
///
/// Length is the number of Unicode scalar values, not bytes.
pub fn check_string<F: fmt::Display + ?Sized>(
    value: Option<&Value>,
    rule: &StringRule,
    field: &F,
) -> Result<(), Violation> {
    let Some(text) = value.and_then(Value::as_str) else {
        return Err(invalid_type(field, EXPECT_STRING));
    };
    let length = text.chars().count();

    if let Some(min_length) = rule.min_length {
        if length < min_length {
            return Err(Violation::TooShort {
                field: field.to_string(),
                min_length,
            });
        }
    }
    if let Some(max_length) = rule.max_length {
        if length > max_length {
            return Err(Violation::TooLong {
                field: field.to_string(),
                max_length,
            });
        }
    }
    Ok(())
}

/// Check a `Number` field: type, then inclusive `min`, then inclusive `max`.
pub fn check_number<F: fmt::Display + ?Sized>(
    value: Option<&Value>,
    rule: &NumberRule,
    field: &F,
) -> Result<(), Violation> {
    let Some(number) = value.and_then(Value::as_f64) else {
        return Err(invalid_type(field, EXPECT_NUMBER));
    };

    if let Some(min) = rule.min {
        if number < min {
            return Err(Violation::BelowMin {
                field: field.to_string(),
                min,
            });
        }
    }
    if let Some(max) = rule.max {
        if number > max {
            return Err(Violation::AboveMax {
                field: field.to_string(),
                max,
            });
        }
    }
    Ok(())
}

/// Check a `Double`/`Float` field.
///
/// Beyond being a finite number, the value's canonical decimal form must
/// have a fractional part: `5` fails while `5.0` and `0.000001` pass. The
/// upper bound is widened by exactly one (`value > max + 1` fails), while
/// the message still reports `max`.
pub fn check_double<F: fmt::Display + ?Sized>(
    value: Option<&Value>,
    rule: &NumberRule,
    field: &F,
) -> Result<(), Violation> {
    let Some(Value::Number(literal)) = value else {
        return Err(invalid_type(field, EXPECT_DOUBLE));
    };
    let Some(number) = literal.as_f64().filter(|n| n.is_finite()) else {
        return Err(invalid_type(field, EXPECT_DOUBLE));
    };

    if !reads_as_floating_point(literal, number) {
        return Err(Violation::NotFloatingPoint {
            field: field.to_string(),
        });
    }
    if let Some(min) = rule.min {
        if number < min {
            return Err(Violation::BelowMin {
                field: field.to_string(),
                min,
            });
        }
    }
    if let Some(max) = rule.max {
        if number > max + 1.0 {
            return Err(Violation::AboveMax {
                field: field.to_string(),
                max,
            });
        }
    }
    Ok(())
}

/// Whether `number`'s canonical decimal form has a fractional part.
///
/// In decimal range, any fractional value qualifies, as does a whole value
/// below 1e16 written with a fraction (`5.0`). Outside it the exponent form
/// decides: `1.5e21` qualifies, `1e21` and `1e-8` do not.
fn reads_as_floating_point(literal: &Number, number: f64) -> bool {
    let magnitude = number.abs();
    if magnitude == 0.0 || (DECIMAL_FORM_MIN..DECIMAL_FORM_MAX).contains(&magnitude) {
        number.fract() != 0.0 || (literal.is_f64() && magnitude < WHOLE_LITERAL_LIMIT)
    } else {
        format!("{number:e}").contains('.')
    }
}

/// Check an `Enum` field: the value must equal one of the members exactly.
///
/// No coercion is applied, so `"1"` does not match `1`.
pub fn check_enum<F: fmt::Display + ?Sized>(
    value: Option<&Value>,
    rule: &EnumRule,
    field: &F,
) -> Result<(), Violation> {
    if value.is_some_and(|v| rule.values.contains(v)) {
        return Ok(());
    }
    Err(Violation::NotInEnum {
        field: field.to_string(),
        allowed: join_members(&rule.values),
    })
}

/// Comma-and-space join of enum members; strings are rendered bare and
/// whole floats drop their `.0`, like numeric bounds do.
fn join_members(values: &[Value]) -> String {
    values
        .iter()
        .map(|v| match v {
            Value::String(s) => s.clone(),
            Value::Number(n) if n.is_f64() => n
                .as_f64()
                .map_or_else(|| n.to_string(), |f| f.to_string()),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Check an `Array` field: the value must be an array and every element
/// must satisfy `items`, checked in index order.
///
/// Element `i` is validated under the key `<field>[i]`. The first failing
/// element's violation is returned as-is.
pub fn check_array<F: fmt::Display + ?Sized>(
    value: Option<&Value>,
    items: &Validator,
    field: &F,
) -> Result<(), Violation> {
    let Some(elements) = value.and_then(Value::as_array) else {
        return Err(invalid_type(field, EXPECT_ARRAY));
    };
    for (index, element) in elements.iter().enumerate() {
        items.validate_at(element, &format!("{field}[{index}]"))?;
    }
    Ok(())
}
