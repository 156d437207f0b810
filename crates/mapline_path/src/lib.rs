//! Property path parsing and resolution for Mapline.
//!
//! This crate provides:
//! - [`PropertyPath`] - A resolved, possibly nested property reference
//! - [`PathResolver`] - Greedy camel-case resolution with backtracking and caching
//! - [`PersistentPropertyPath`] - A path expressed as persistent properties
//! - [`ResolverConfig`] - Depth, length, and suggestion limits

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod path;
pub mod persistent;
pub mod resolver;
pub mod splitter;
pub mod suggest;


pub use config::ResolverConfig;
pub use path::{Iter, PropertyPath};
pub use persistent::PersistentPropertyPath;
pub use resolver::PathResolver;
