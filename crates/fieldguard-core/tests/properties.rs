//! Property tests for the validator's observable guarantees: boundary
//! behaviour, declaration-order determinism and required-field precedence.

use fieldguard_core::{create_validator, FieldRule, Schema, ViolationKind};
use proptest::prelude::*;
use serde_json::{json, Value};

/// Any JSON scalar, used where the value's content should not matter.
fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "[a-z]{0,12}".prop_map(Value::from),
    ]
}

proptest! {
    /// A string of exactly `min` or `max` characters passes; one short of
    /// `min` or one past `max` fails with the matching class.
    #[test]
    fn string_length_boundaries(min in 1usize..20, span in 0usize..20) {
        let max = min + span;
        let validator = create_validator(
            &Schema::new().field("s", FieldRule::string().min_length(min).max_length(max)),
        );
        let text = |n: usize| json!({ "s": "x".repeat(n) });

        prop_assert!(validator.validate(&text(min)).is_ok());
        prop_assert!(validator.validate(&text(max)).is_ok());
        prop_assert_eq!(
            validator.validate(&text(min - 1)).unwrap_err().kind(),
            ViolationKind::TooShort
        );
        prop_assert_eq!(
            validator.validate(&text(max + 1)).unwrap_err().kind(),
            ViolationKind::TooLong
        );
    }

    /// Integer bounds are inclusive for `Number` fields.
    #[test]
    fn number_bounds_inclusive(min in -1000i64..1000, span in 0i64..1000) {
        let max = min + span;
        let validator = create_validator(
            &Schema::new().field("n", FieldRule::number().min(min as f64).max(max as f64)),
        );

        let at_min = json!({ "n": min });
        prop_assert!(validator.validate(&at_min).is_ok());
        let at_max = json!({ "n": max });
        prop_assert!(validator.validate(&at_max).is_ok());
        prop_assert_eq!(
            validator.validate(&json!({ "n": min - 1 })).unwrap_err().kind(),
            ViolationKind::BelowMin
        );
        prop_assert_eq!(
            validator.validate(&json!({ "n": max + 1 })).unwrap_err().kind(),
            ViolationKind::AboveMax
        );
    }

    /// Integer-valued literals never satisfy a `Double` field.
    #[test]
    fn double_rejects_integer_literals(n in any::<i64>()) {
        let validator = create_validator(&Schema::new().field("d", FieldRule::double()));
        prop_assert_eq!(
            validator.validate(&json!({ "d": n })).unwrap_err().kind(),
            ViolationKind::NotFloatingPoint
        );
    }

    /// Fractional values pass a `Double` field at every magnitude where
    /// `f64` can still hold a fraction, including ranges whose shortest
    /// rendering switches to exponent form.
    #[test]
    fn double_accepts_fractional_values(
        exponent in -7i32..=15,
        mantissa in 1.5f64..10.0,
    ) {
        let x = mantissa * 10f64.powi(exponent);
        prop_assume!(x.fract() != 0.0);

        let validator = create_validator(&Schema::new().field("d", FieldRule::double()));
        prop_assert!(
            validator.validate(&json!({ "d": x })).is_ok(),
            "{} should pass", x
        );
    }

    /// Whole `f64` values from 1e16 up to the exponent-form threshold fail a
    /// `Double` field even though they arrive as floats.
    #[test]
    fn double_rejects_large_whole_floats(x in 1e16f64..1e21) {
        let validator = create_validator(&Schema::new().field("d", FieldRule::double()));
        prop_assert_eq!(
            validator.validate(&json!({ "d": x })).unwrap_err().kind(),
            ViolationKind::NotFloatingPoint
        );
    }

    /// A missing required field is reported regardless of what the other
    /// fields hold.
    #[test]
    fn missing_required_reported_regardless_of_others(a in scalar(), c in scalar()) {
        let validator = create_validator(
            &Schema::new()
                .field("b", FieldRule::string().required())
                .field("a", FieldRule::number())
                .field("c", FieldRule::enumeration(["only"])),
        );
        let err = validator.validate(&json!({ "a": a, "c": c })).unwrap_err();
        prop_assert_eq!(err.to_string(), "Field 'b' is required.");
    }

    /// When both fields are invalid, the earlier declared one is reported.
    #[test]
    fn first_declared_field_reported(a in any::<i64>(), b in any::<i64>()) {
        let validator = create_validator(
            &Schema::new()
                .field("a", FieldRule::string())
                .field("b", FieldRule::string()),
        );
        let err = validator.validate(&json!({ "b": b, "a": a })).unwrap_err();
        prop_assert_eq!(err.field(), "a");
    }

    /// The first bad element of an array is the one reported.
    #[test]
    fn first_bad_array_element_reported(good in 0usize..8, tail in 0usize..4) {
        let validator = create_validator(&Schema::new().field(
            "items",
            FieldRule::array(Schema::new().field("x", FieldRule::number().required())),
        ));
        let mut items: Vec<Value> = (0..good).map(|i| json!({ "x": i })).collect();
        items.extend((0..=tail).map(|_| json!({ "x": "bad" })));

        let err = validator.validate(&json!({ "items": items })).unwrap_err();
        prop_assert_eq!(err.field(), format!("items[{good}].x"));
    }
}
