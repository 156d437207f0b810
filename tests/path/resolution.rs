//! Integration tests for PathResolver
//!
//! Tests greedy camel-case matching, delimiters, caching, and diagnostics.

use std::sync::Arc;

use mapline_foundation::{ErrorKind, Type, TypeName};
use mapline_mapping::{FieldShape, MappingContext, TypeRegistry, TypeShape};
use mapline_path::{PathResolver, PropertyPath, ResolverConfig};

fn context() -> Arc<MappingContext> {
    let registry = TypeRegistry::from_shapes([
        TypeShape::new("Person")
            .with_field(FieldShape::id("id", Type::Long))
            .with_field(FieldShape::new("user", Type::structure("User")))
            .with_field(FieldShape::new("userAddress", Type::String))
            .with_field(FieldShape::new("lastname", Type::String))
            .with_field(FieldShape::new("employer", Type::structure("Company")))
            .with_field(FieldShape::new("tags", Type::list(Type::String)))
            .with_field(FieldShape::new(
                "previous",
                Type::map(Type::String, Type::structure("Address")),
            )),
        TypeShape::new("User")
            .with_field(FieldShape::new("name", Type::String))
            .with_field(FieldShape::new("address", Type::structure("Address"))),
        TypeShape::new("Company")
            .with_field(FieldShape::new("name", Type::String))
            .with_field(FieldShape::new("address", Type::structure("Address"))),
        TypeShape::new("Address")
            .with_field(FieldShape::new("city", Type::String))
            .with_field(FieldShape::new("zipCode", Type::String)),
    ])
    .unwrap();
    Arc::new(MappingContext::new(Arc::new(registry)))
}

fn resolver() -> PathResolver {
    PathResolver::new(context())
}

fn person() -> TypeName {
    TypeName::new("Person")
}

fn segments(path: &PropertyPath) -> Vec<String> {
    path.iter().map(|p| p.segment().to_string()).collect()
}

// =============================================================================
// Matching
// =============================================================================

#[test]
fn longest_match_wins() {
    let path = resolver().resolve("userAddress", &person()).unwrap();
    assert_eq!(segments(&path), vec!["userAddress"]);
    assert_eq!(path.leaf_type(), &Type::String);
}

#[test]
fn delimiter_overrides_longest_match() {
    let resolver = resolver();
    for source in ["user_address", "user.address"] {
        let path = resolver.resolve(source, &person()).unwrap();
        assert_eq!(segments(&path), vec!["user", "address"], "source {source}");
    }
}

#[test]
fn backtracks_into_nested_types() {
    let path = resolver().resolve("employerAddressZipCode", &person()).unwrap();
    assert_eq!(path.to_dot_path(), "employer.address.zipCode");
    assert_eq!(path.owning_type(), &person());
    assert_eq!(
        path.leaf_property().owning_type(),
        &TypeName::new("Address")
    );
}

#[test]
fn resolved_head_is_kept_when_tail_fails() {
    let err = resolver().resolve("userAddressCity", &person()).unwrap_err();
    let reference = err.property_reference_error().unwrap();
    assert_eq!(reference.property, "city");
    assert_eq!(reference.resolved_path, vec!["userAddress"]);

    let path = resolver().resolve("user.addressCity", &person()).unwrap();
    assert_eq!(path.to_dot_path(), "user.address.city");
}

#[test]
fn traverses_map_values() {
    let path = resolver().resolve("previousCity", &person()).unwrap();
    assert_eq!(path.to_dot_path(), "previous.city");
    assert!(path.type_info().is_map());
}

// =============================================================================
// Canonical Form and Caching
// =============================================================================

#[test]
fn resolution_is_idempotent_and_cached() {
    let resolver = resolver();
    let first = resolver.resolve("employerAddressCity", &person()).unwrap();
    let second = resolver.resolve("employerAddressCity", &person()).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert!(resolver.cache_stats().hits >= 1);
}

#[test]
fn dot_path_round_trips() {
    let resolver = resolver();
    for source in [
        "employerAddressCity",
        "employer_address_city",
        "employer.addressCity",
    ] {
        let path = resolver.resolve(source, &person()).unwrap();
        let again = resolver.resolve(&path.to_dot_path(), &person()).unwrap();
        assert_eq!(again.as_ref(), path.as_ref());
    }
}

#[test]
fn nested_extension() {
    let resolver = resolver();
    let user = resolver.resolve("user", &person()).unwrap();
    let city = resolver.nested(&user, "address.city").unwrap();
    assert_eq!(city.to_dot_path(), "user.address.city");
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn deepest_failure_is_reported() {
    let err = resolver()
        .resolve("employerAddressCountry", &person())
        .unwrap_err();
    let reference = err.property_reference_error().unwrap();
    assert_eq!(reference.property, "country");
    assert_eq!(reference.type_name, TypeName::new("Address"));
    assert_eq!(reference.resolved_path, vec!["employer", "address"]);
}

#[test]
fn suggestions_for_typos() {
    let err = resolver().resolve("lastnmae", &person()).unwrap_err();
    let reference = err.property_reference_error().unwrap();
    assert_eq!(reference.suggestions, vec!["lastname"]);
    assert!(err.to_string().contains("did you mean 'lastname'"));
}

#[test]
fn leaf_of_simple_type_has_no_properties() {
    let err = resolver().resolve("lastnameLength", &person()).unwrap_err();
    assert!(err.is_resolution_error());
}

#[test]
fn input_validation() {
    let resolver = resolver();
    assert!(resolver.resolve("", &person()).unwrap_err().is_input_error());
    assert!(resolver.resolve("  ", &person()).unwrap_err().is_input_error());
    assert!(matches!(
        resolver.resolve("_user", &person()).unwrap_err().kind,
        ErrorKind::LeadingUnderscore { .. }
    ));
    assert!(
        resolver
            .resolve("lastname", &TypeName::new("Ghost"))
            .unwrap_err()
            .is_mapping_error()
    );
}

#[test]
fn depth_limit() {
    let resolver = PathResolver::with_config(context(), ResolverConfig::default().with_max_depth(2));
    assert!(resolver.resolve("user.address", &person()).is_ok());
    let err = resolver.resolve("user.address.city", &person()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DepthExceeded { limit: 2, .. }));
}

#[test]
fn underscore_segments_require_quoting_anywhere() {
    let resolver = resolver();
    for source in ["user._name", "user__name", "employer.address._city"] {
        let err = resolver.resolve(source, &person()).unwrap_err();
        assert!(err.is_input_error(), "{source}");
        assert!(matches!(err.kind, ErrorKind::LeadingUnderscore { ref property } if property.starts_with('_')));
    }
}

#[test]
fn long_sources_are_elided_in_messages() {
    let source = format!("lastname{}", "Missing".repeat(1_000));
    let err = resolver().resolve(&source, &person()).unwrap_err();
    assert!(!err.to_string().contains(&source));

    let frames = err.context.unwrap().frames;
    assert_eq!(frames.len(), 1);
    assert!(frames[0].len() < 100, "frame is {} bytes", frames[0].len());
    assert!(frames[0].starts_with("resolving 'lastnameMissing"));
    assert!(frames[0].contains("..."));
}

// =============================================================================
// Deep Paths
// =============================================================================

fn chain() -> PathResolver {
    let registry = TypeRegistry::from_shapes([TypeShape::new("Node")
        .with_field(FieldShape::new("node", Type::structure("Node")))
        .with_field(FieldShape::new("name", Type::String))])
    .unwrap();
    PathResolver::new(Arc::new(MappingContext::new(Arc::new(registry))))
}

/// Runs `f` on a thread with the default 2 MiB stack.
fn on_small_stack<T: Send + 'static>(f: impl FnOnce() -> T + Send + 'static) -> T {
    std::thread::Builder::new()
        .stack_size(2 * 1024 * 1024)
        .spawn(f)
        .unwrap()
        .join()
        .unwrap()
}

#[test]
fn camel_case_chain_at_default_depth() {
    let len = on_small_stack(|| {
        let source = format!("node{}Name", "Node".repeat(998));
        chain().resolve(&source, &TypeName::new("Node")).map(|p| p.len())
    });
    assert_eq!(len.unwrap(), 1000);
}

#[test]
fn dotted_chain_at_default_depth() {
    let len = on_small_stack(|| {
        let source = format!("{}name", "node.".repeat(999));
        chain().resolve(&source, &TypeName::new("Node")).map(|p| p.len())
    });
    assert_eq!(len.unwrap(), 1000);
}

#[test]
fn chains_past_default_depth_are_rejected() {
    let (camel, dotted) = on_small_stack(|| {
        let resolver = chain();
        let node = TypeName::new("Node");
        let camel = resolver.resolve(&format!("node{}Name", "Node".repeat(1_500)), &node);
        let dotted = resolver.resolve(&format!("{}name", "node.".repeat(1_500)), &node);
        (camel.map(|p| p.len()), dotted.map(|p| p.len()))
    });
    assert!(matches!(camel.unwrap_err().kind, ErrorKind::DepthExceeded { limit: 1000, .. }));
    assert!(matches!(dotted.unwrap_err().kind, ErrorKind::DepthExceeded { limit: 1000, .. }));
}

#[test]
fn failing_deep_chain_reports_deepest_miss() {
    let err = on_small_stack(|| {
        let source = format!("node{}Nmae", "Node".repeat(500));
        chain().resolve(&source, &TypeName::new("Node")).map(|p| p.len())
    })
    .unwrap_err();
    let reference = err.property_reference_error().unwrap();
    assert_eq!(reference.property, "nmae");
    assert_eq!(reference.resolved_path.len(), 501);
    assert!(reference.suggestions.contains(&"name".to_string()));
}
