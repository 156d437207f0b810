//! Integration tests for the default conversion service
//!
//! Tests coercion between raw stored values and requested types.

use mapline_foundation::{ConversionService, DefaultConversionService, Type, Value};

fn service() -> DefaultConversionService {
    DefaultConversionService::new()
}

// =============================================================================
// Numbers
// =============================================================================

#[test]
fn string_to_integer() {
    assert_eq!(
        service().convert(&Value::from("42"), &Type::Long).unwrap(),
        Value::Int(42)
    );
    assert!(service().convert(&Value::from("forty"), &Type::Long).is_err());
}

#[test]
fn int_range_is_checked() {
    assert!(service().convert(&Value::Int(i64::MAX), &Type::Int).is_err());
    assert!(service().convert(&Value::Int(i64::MAX), &Type::Long).is_ok());
}

#[test]
fn integer_to_float() {
    assert_eq!(
        service().convert(&Value::Int(3), &Type::Double).unwrap(),
        Value::Float(3.0)
    );
}

// =============================================================================
// Strings and Booleans
// =============================================================================

#[test]
fn scalars_to_string() {
    assert_eq!(
        service().convert(&Value::Int(7), &Type::String).unwrap(),
        Value::from("7")
    );
    assert!(service().can_convert(&Value::Bool(true), &Type::String));
}

#[test]
fn string_to_bool() {
    assert_eq!(
        service().convert(&Value::from("yes"), &Type::Bool).unwrap(),
        Value::Bool(true)
    );
    assert!(!service().can_convert(&Value::from("maybe"), &Type::Bool));
}

// =============================================================================
// Nulls
// =============================================================================

#[test]
fn null_only_converts_to_optional() {
    assert_eq!(
        service()
            .convert(&Value::Null, &Type::option(Type::Long))
            .unwrap(),
        Value::Null
    );
    let err = service().convert(&Value::Null, &Type::Long).unwrap_err();
    assert!(err.to_string().contains("null"));
}
