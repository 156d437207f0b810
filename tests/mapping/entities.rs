//! Integration tests for PersistentEntityBuilder and PersistentEntity
//!
//! Tests identifier and version bookkeeping, ordering, and lookups.

use std::sync::Arc;

use mapline_foundation::{DefaultConversionService, ErrorKind, Type, TypeName, Value};
use mapline_mapping::{
    Annotation, PersistentEntityBuilder, PersistentProperty, PropertyOrder, TypeShape,
};

fn person() -> TypeName {
    TypeName::new("Person")
}

fn builder() -> PersistentEntityBuilder {
    PersistentEntityBuilder::new(Arc::new(TypeShape::new("Person").with_alias("person")))
}

fn property(name: &str, ty: Type) -> PersistentProperty {
    PersistentProperty::new(name, ty, person(), person(), false)
}

// =============================================================================
// Identifier and Version
// =============================================================================

#[test]
fn second_id_property_is_rejected() {
    let mut builder = builder();
    builder
        .add_persistent_property(property("id", Type::Long).with_annotations([Annotation::Id]))
        .unwrap();

    let err = builder
        .add_persistent_property(property("uuid", Type::Uuid).with_annotations([Annotation::Id]))
        .unwrap_err();

    match err.kind {
        ErrorKind::DuplicateIdProperty {
            entity,
            existing,
            duplicate,
        } => {
            assert_eq!(entity, person());
            assert_eq!(existing, "id");
            assert_eq!(duplicate, "uuid");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn second_version_property_is_rejected() {
    let mut builder = builder();
    builder
        .add_persistent_property(
            property("version", Type::Long).with_annotations([Annotation::Version]),
        )
        .unwrap();
    let err = builder
        .add_persistent_property(
            property("revision", Type::Long).with_annotations([Annotation::Version]),
        )
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DuplicateVersionProperty { .. }));
}

#[test]
fn id_and_version_are_exposed() {
    let mut builder = builder();
    builder
        .add_persistent_property(property("id", Type::Long).with_annotations([Annotation::Id]))
        .unwrap();
    builder
        .add_persistent_property(
            property("version", Type::Int).with_annotations([Annotation::Version]),
        )
        .unwrap();
    let entity = builder.build(PropertyOrder::Declaration);

    assert_eq!(entity.required_id_property().unwrap().name(), "id");
    assert!(entity.has_version_property());
    assert_eq!(
        entity
            .persistent_property_with(&Annotation::Version)
            .unwrap()
            .name(),
        "version"
    );
}

#[test]
fn missing_id_is_reported_on_demand() {
    let mut builder = builder();
    builder
        .add_persistent_property(property("name", Type::String))
        .unwrap();
    let entity = builder.build(PropertyOrder::Declaration);

    assert!(entity.id_property().is_none());
    let err = entity.required_id_property().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::MissingIdProperty { .. }));
}

// =============================================================================
// Properties
// =============================================================================

#[test]
fn empty_property_name_is_rejected() {
    let err = builder()
        .add_persistent_property(property("", Type::String))
        .unwrap_err();
    assert!(err.is_input_error());
}

#[test]
fn alphabetical_order() {
    let mut builder = builder();
    for name in ["zip", "age", "name"] {
        builder
            .add_persistent_property(property(name, Type::String))
            .unwrap();
    }
    let entity = builder.build(PropertyOrder::Alphabetical);
    assert_eq!(
        entity.property_names().collect::<Vec<_>>(),
        vec!["age", "name", "zip"]
    );
}

#[test]
fn required_property_fails_when_absent() {
    let mut builder = builder();
    builder
        .add_persistent_property(property("lastname", Type::String))
        .unwrap();
    let entity = builder.build(PropertyOrder::Declaration);

    assert!(entity.persistent_property("lastname").is_some());
    let err = entity.required_persistent_property("lastnme").unwrap_err();
    assert!(err.is_resolution_error());
}

#[test]
fn identifier_conversion() {
    let mut builder = builder();
    builder
        .add_persistent_property(property("id", Type::Long).with_annotations([Annotation::Id]))
        .unwrap();
    let entity = builder.build(PropertyOrder::Declaration);

    let converted = entity
        .convert_identifier(&Value::from("17"), &DefaultConversionService::new())
        .unwrap();
    assert_eq!(converted, Value::Int(17));
    assert!(entity.type_alias().has_value(&Value::from("person")));
}
