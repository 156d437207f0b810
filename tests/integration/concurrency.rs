//! Shared metadata and path caches under concurrent access.

use std::sync::Arc;
use std::thread;

use mapline::foundation::{Type, TypeName};
use mapline::mapping::{FieldShape, MappingContext, TypeRegistry, TypeShape};
use mapline::path::PathResolver;
use mapline::query::PartTree;

use crate::init_logging;

fn resolver() -> Arc<PathResolver> {
    init_logging();
    let registry = TypeRegistry::from_shapes([
        TypeShape::new("Account")
            .with_field(FieldShape::id("id", Type::Long))
            .with_field(FieldShape::new("owner", Type::structure("Holder")))
            .with_field(FieldShape::new("balance", Type::Decimal)),
        TypeShape::new("Holder")
            .with_field(FieldShape::new("name", Type::String))
            .with_field(FieldShape::new("email", Type::String)),
    ])
    .unwrap();
    Arc::new(PathResolver::new(Arc::new(MappingContext::new(Arc::new(
        registry,
    )))))
}

#[test]
fn concurrent_resolution_shares_one_path() {
    let resolver = resolver();
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let resolver = Arc::clone(&resolver);
            thread::spawn(move || {
                resolver
                    .resolve("ownerEmail", &TypeName::new("Account"))
                    .unwrap()
            })
        })
        .collect();

    let paths: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(paths[0].to_dot_path(), "owner.email");
    assert!(paths.iter().all(|p| Arc::ptr_eq(p, &paths[0])));
}

#[test]
fn concurrent_derivation() {
    let resolver = resolver();
    let methods = [
        "findByOwnerName",
        "findByBalanceGreaterThan",
        "countByOwnerEmailIgnoreCase",
        "findFirstByOwnerNameOrderByBalanceDesc",
    ];

    let handles: Vec<_> = methods
        .iter()
        .cycle()
        .take(16)
        .map(|method| {
            let resolver = Arc::clone(&resolver);
            let method = (*method).to_string();
            thread::spawn(move || {
                PartTree::new(&method, &TypeName::new("Account"), &resolver)
                    .unwrap()
                    .to_string()
            })
        })
        .collect();

    let rendered: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for (i, text) in rendered.iter().enumerate() {
        assert_eq!(text, &rendered[i % methods.len()]);
    }
}
