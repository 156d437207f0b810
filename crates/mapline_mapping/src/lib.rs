//! Persistent entity metadata for Mapline.
//!
//! This crate provides:
//! - [`TypeIntrospector`] / [`TypeRegistry`] - Reflective type shapes
//! - [`PropertyFilter`] - Rules deciding which fields are persistent
//! - [`PersistentProperty`] - Metadata of a mapped field
//! - [`PersistentEntity`] - Metadata of a mapped type
//! - [`MappingContext`] - Thread-safe entity discovery and caching

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod alias;
pub mod association;
pub mod config;
pub mod context;
pub mod entity;
pub mod filter;
pub mod property;
pub mod reflect;

pub use alias::Alias;
pub use association::Association;
pub use config::MappingConfig;
pub use context::MappingContext;
pub use entity::{PersistentEntity, PersistentEntityBuilder, PropertyOrder};
pub use filter::{
    ExcludeAnnotated, ExcludeNamed, ExcludeStatic, ExcludeSynthetic, ExcludeTransientModifier,
    ExclusionRule, PropertyFilter,
};
pub use property::PersistentProperty;
pub use reflect::{
    Annotation, FieldModifiers, FieldShape, Reflect, SupertypeRef, TypeIntrospector, TypeRegistry,
    TypeShape,
};
