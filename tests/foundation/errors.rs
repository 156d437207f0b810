//! Integration tests for Error types
//!
//! Tests error construction, classification, context, and display.

use mapline_foundation::{Error, ErrorContext, ErrorKind, PropertyReferenceError, Type, TypeName};

// =============================================================================
// Classification
// =============================================================================

#[test]
fn input_errors() {
    assert!(Error::invalid_argument("empty").is_input_error());
    assert!(Error::depth_exceeded(10, 11).is_input_error());
    assert!(
        Error::new(ErrorKind::SourceTooLong {
            limit: 5,
            length: 6
        })
        .is_input_error()
    );
}

#[test]
fn mapping_errors() {
    let err = Error::missing_type(TypeName::new("Ghost"));
    assert!(err.is_mapping_error());
    assert!(!err.is_resolution_error());
    assert!(matches!(err.kind, ErrorKind::MissingTypeInformation { .. }));
}

#[test]
fn syntax_errors() {
    let err = Error::query_syntax("OrderBy", "used twice");
    assert!(err.is_syntax_error());
    assert_eq!(err.to_string(), "invalid OrderBy clause: used twice");
}

// =============================================================================
// Property References
// =============================================================================

#[test]
fn property_reference_display() {
    let err = Error::property_reference(
        PropertyReferenceError::new("zipcode", TypeName::new("Address"))
            .with_resolved_path(vec!["user".to_string(), "address".to_string()])
            .with_suggestions(vec!["zipCode".to_string()]),
    );
    let reference = err.property_reference_error().unwrap();
    assert_eq!(reference.depth(), 2);

    let msg = err.to_string();
    assert!(msg.contains("zipcode"));
    assert!(msg.contains("user.address"));
    assert!(msg.contains("zipCode"));
}

#[test]
fn deeper_reference_wins() {
    let shallow = PropertyReferenceError::new("userAddress", TypeName::new("Person"));
    let deep = PropertyReferenceError::new("country", TypeName::new("Address"))
        .with_resolved_path(vec!["user".to_string(), "address".to_string()]);
    assert!(deep.is_deeper_than(&shallow));
    assert!(!shallow.is_deeper_than(&deep));
}

// =============================================================================
// Context
// =============================================================================

#[test]
fn context_merges_missing_fields_only() {
    let err = Error::conversion("\"x\"", Type::Int)
        .with_context(ErrorContext::new().with_segment("AgeIs").with_frame("parsing part"))
        .with_context(
            ErrorContext::new()
                .with_source("findByAgeIs")
                .with_segment("ignored"),
        );
    let context = err.context.clone().unwrap();
    assert_eq!(context.source.as_deref(), Some("findByAgeIs"));
    assert_eq!(context.segment.as_deref(), Some("AgeIs"));
    assert_eq!(context.frames, vec!["parsing part".to_string()]);

    let msg = err.to_string();
    assert!(msg.contains("in 'AgeIs' of 'findByAgeIs'"));
}
