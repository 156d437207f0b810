//! Integration tests for Sort derived from OrderBy clauses
//!
//! Tests direction handling and property resolution in order clauses.

use std::sync::Arc;

use mapline_foundation::{Type, TypeName};
use mapline_mapping::{FieldShape, MappingContext, TypeRegistry, TypeShape};
use mapline_path::PathResolver;
use mapline_query::{Direction, Order, PartTree, Sort};

fn resolver() -> PathResolver {
    let registry = TypeRegistry::from_shapes([
        TypeShape::new("Article")
            .with_field(FieldShape::id("id", Type::Long))
            .with_field(FieldShape::new("title", Type::String))
            .with_field(FieldShape::new("published", Type::DateTime))
            .with_field(FieldShape::new("author", Type::structure("Author"))),
        TypeShape::new("Author").with_field(FieldShape::new("lastname", Type::String)),
    ])
    .unwrap();
    PathResolver::new(Arc::new(MappingContext::new(Arc::new(registry))))
}

fn sort_of(method: &str) -> Sort {
    PartTree::new(method, &TypeName::new("Article"), &resolver())
        .unwrap()
        .sort()
        .clone()
}

#[test]
fn multiple_orders_keep_clause_order() {
    let sort = sort_of("findByTitleOrderByPublishedDescAuthorLastnameAsc");
    assert_eq!(
        sort,
        Sort::by_orders([Order::desc("published"), Order::asc("author.lastname")])
    );
}

#[test]
fn missing_direction_defaults_to_ascending() {
    let sort = sort_of("findAllByOrderByTitle");
    assert_eq!(sort, Sort::by(["title"]));
    assert_eq!(sort.to_string(), "title: ASC");
}

#[test]
fn unknown_order_property_fails() {
    let err = PartTree::new(
        "findByTitleOrderByRating",
        &TypeName::new("Article"),
        &resolver(),
    )
    .unwrap_err();
    assert_eq!(err.property_reference_error().unwrap().property, "rating");
    let context = err.context.unwrap();
    assert_eq!(context.segment.as_deref(), Some("Rating"));
    assert_eq!(context.source.as_deref(), Some("findByTitleOrderByRating"));
}

#[test]
fn direction_strings() {
    assert_eq!("ASC".parse::<Direction>().unwrap(), Direction::Asc);
    assert_eq!("desc".parse::<Direction>().unwrap(), Direction::Desc);
    assert!("down".parse::<Direction>().is_err());
}
