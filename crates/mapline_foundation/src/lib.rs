//! Core types, values, conversion, and caches for Mapline.
//!
//! This crate provides:
//! - [`Type`] - Semantic type descriptors for mapped properties
//! - [`TypeName`] - Stable identifiers used as cache keys
//! - [`Value`] - Raw stored values handled at the conversion boundary
//! - [`ConversionService`] - Value coercion to requested types
//! - [`Error`] - Rich error types with context
//! - [`ComputeCache`] - Read-mostly caches with compute-if-absent semantics

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cache;
pub mod convert;
pub mod error;
pub mod types;
pub mod value;


pub use cache::{CacheStats, ComputeCache};
pub use convert::{ConversionService, DefaultConversionService, SharedConversionService};
pub use error::{Error, ErrorContext, ErrorKind, PropertyReferenceError, Result};
pub use types::{Type, TypeName};
pub use value::Value;
