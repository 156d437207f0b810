//! Integration tests for type descriptors
//!
//! Tests container unwrapping, substitution, and classification.

use mapline_foundation::{Type, TypeName, Value};

// =============================================================================
// Actual Types
// =============================================================================

#[test]
fn actual_type_of_containers() {
    let address = Type::structure("Address");
    assert_eq!(Type::list(address.clone()).actual_type(), &address);
    assert_eq!(Type::set(address.clone()).actual_type(), &address);
    assert_eq!(Type::array(address.clone()).actual_type(), &address);
    assert_eq!(
        Type::map(Type::String, address.clone()).actual_type(),
        &address
    );
    assert_eq!(
        Type::option(Type::list(Type::option(address.clone()))).actual_type(),
        &address
    );
    assert_eq!(address.actual_type(), &address);
}

#[test]
fn container_classification() {
    assert!(Type::list(Type::Int).is_collection_like());
    assert!(Type::array(Type::Int).is_collection_like());
    assert!(Type::array(Type::Int).is_array());
    assert!(!Type::map(Type::String, Type::Int).is_collection_like());
    assert!(Type::map(Type::String, Type::Int).is_map());
    assert!(Type::option(Type::Int).is_option());
}

#[test]
fn geospatial_types() {
    assert!(Type::Point.is_geospatial());
    assert!(Type::option(Type::Polygon).is_geospatial());
    assert!(!Type::String.is_geospatial());
}

// =============================================================================
// Type Parameters
// =============================================================================

#[test]
fn substitute_binds_nested_parameters() {
    let declared = Type::map(Type::param("K"), Type::list(Type::param("V")));
    let bound = declared.substitute(&[
        ("K".to_string(), Type::String),
        ("V".to_string(), Type::structure("Order")),
    ]);
    assert_eq!(
        bound,
        Type::map(Type::String, Type::list(Type::structure("Order")))
    );
    assert_eq!(bound.unresolved_param(), None);
}

#[test]
fn unbound_parameters_survive_substitution() {
    let declared = Type::list(Type::param("T"));
    let partially = declared.substitute(&[("U".to_string(), Type::Int)]);
    assert_eq!(partially.unresolved_param(), Some("T"));
    assert!(!partially.is_simple());
}

// =============================================================================
// Names and Values
// =============================================================================

#[test]
fn type_name_simple_name() {
    let name = TypeName::new("app::model::Person");
    assert_eq!(name.simple_name(), "Person");
    assert_eq!(name.to_string(), "app::model::Person");
}

#[test]
fn value_types() {
    assert_eq!(Value::from(3).value_type(), Type::Long);
    assert_eq!(Value::from("x").value_type(), Type::String);
    assert!(Value::Null.is_null());
    assert_eq!(Value::from("abc").as_str(), Some("abc"));
}
