//! Repository method names derived end to end: entity discovery, path
//! resolution, query derivation, and the persistent property chain behind
//! each predicate.

use std::sync::Arc;

use mapline::foundation::{Type, TypeName};
use mapline::mapping::{FieldShape, MappingContext, TypeRegistry, TypeShape};
use mapline::path::PathResolver;
use mapline::query::{IgnoreCaseType, PartTree, PartType};

use crate::init_logging;

fn resolver() -> (Arc<MappingContext>, PathResolver) {
    init_logging();
    let registry = TypeRegistry::from_shapes([
        TypeShape::new("Customer")
            .with_field(FieldShape::id("id", Type::Long))
            .with_field(FieldShape::new("firstname", Type::String))
            .with_field(FieldShape::new("lastname", Type::String))
            .with_field(FieldShape::new("age", Type::Int))
            .with_field(FieldShape::new("active", Type::Bool))
            .with_field(FieldShape::new("address", Type::structure("Address")))
            .with_field(FieldShape::new("orders", Type::list(Type::structure("Order")))),
        TypeShape::new("Address")
            .with_field(FieldShape::new("street", Type::String))
            .with_field(FieldShape::new("city", Type::String))
            .with_field(FieldShape::new("zipCode", Type::String)),
        TypeShape::new("Order")
            .with_field(FieldShape::id("id", Type::Long))
            .with_field(FieldShape::new("total", Type::Double)),
    ])
    .unwrap();
    let context = Arc::new(MappingContext::new(Arc::new(registry)));
    let resolver = PathResolver::new(Arc::clone(&context));
    (context, resolver)
}

fn customer() -> TypeName {
    TypeName::new("Customer")
}

// =============================================================================
// Finders
// =============================================================================

#[test]
fn nested_predicate_maps_to_persistent_chain() {
    let (context, resolver) = resolver();
    let tree = PartTree::new("findByAddressZipCodeAndAgeGreaterThan", &customer(), &resolver)
        .unwrap();

    let parts: Vec<_> = tree.parts().collect();
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0].part_type(), PartType::SimpleProperty);
    assert_eq!(parts[1].part_type(), PartType::GreaterThan);

    let chain = resolver.persistent_property_path(parts[0].property()).unwrap();
    assert_eq!(chain.len(), 2);
    assert_eq!(chain.to_dot_path(), "address.zipCode");
    assert_eq!(chain.base_property().name(), "address");
    assert_eq!(chain.leaf_property().owner(), &TypeName::new("Address"));

    assert!(context.has_persistent_entity(&customer()));
    assert!(context.has_persistent_entity(&TypeName::new("Address")));
}

#[test]
fn collection_traversal() {
    let (_, resolver) = resolver();
    let tree = PartTree::new("findDistinctByOrdersTotalLessThan", &customer(), &resolver).unwrap();
    assert!(tree.is_distinct());

    let part = tree.parts().next().unwrap();
    assert_eq!(part.property().to_dot_path(), "orders.total");
    assert!(part.property().is_collection());
    assert_eq!(part.property().leaf_type(), &Type::Double);
}

#[test]
fn limiting_finder_with_sort() {
    let (_, resolver) = resolver();
    let tree = PartTree::new(
        "findTop5ByActiveTrueOrderByLastnameAscAgeDesc",
        &customer(),
        &resolver,
    )
    .unwrap();

    assert_eq!(tree.max_results(), Some(5));
    assert_eq!(tree.parts().next().unwrap().part_type(), PartType::True);
    assert_eq!(tree.sort().to_string(), "lastname: ASC, age: DESC");
}

#[test]
fn ignore_case_everywhere() {
    let (_, resolver) = resolver();
    let tree = PartTree::new(
        "findByFirstnameAndAddressCityAllIgnoreCase",
        &customer(),
        &resolver,
    )
    .unwrap();
    assert!(tree.is_always_ignore_case());
    assert!(tree
        .parts()
        .all(|p| p.ignore_case() == IgnoreCaseType::WhenPossible));
}

// =============================================================================
// Projections
// =============================================================================

#[test]
fn count_exists_and_delete() {
    let (_, resolver) = resolver();
    let count = PartTree::new("countByAddressCity", &customer(), &resolver).unwrap();
    assert!(count.is_count_projection());

    let exists = PartTree::new("existsByLastname", &customer(), &resolver).unwrap();
    assert!(exists.is_exists_projection());

    let delete = PartTree::new("deleteByAgeLessThanEqual", &customer(), &resolver).unwrap();
    assert!(delete.is_delete());
    assert_eq!(
        delete.parts().next().unwrap().part_type(),
        PartType::LessThanEqual
    );
}

// =============================================================================
// Sharing
// =============================================================================

#[test]
fn trees_share_resolved_paths() {
    let (_, resolver) = resolver();
    let a = PartTree::new("findByAddressCity", &customer(), &resolver).unwrap();
    let b = PartTree::new("countByAddressCity", &customer(), &resolver).unwrap();

    let pa = a.parts().next().unwrap().property();
    let pb = b.parts().next().unwrap().property();
    assert!(Arc::ptr_eq(pa, pb));
    assert!(resolver.cache_stats().hits >= 1);
}

#[test]
fn failures_leave_caches_usable() {
    let (_, resolver) = resolver();
    assert!(PartTree::new("findByAddressCountry", &customer(), &resolver).is_err());
    assert!(PartTree::new("findByAddressCity", &customer(), &resolver).is_ok());
}
