//! Mapline - Entity metadata, property paths, and query derivation
//!
//! This crate re-exports all layers of the Mapline system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: mapline_query      — Method-name parsing into part trees and sorts
//! Layer 2: mapline_path       — Property path resolution and caching
//! Layer 1: mapline_mapping    — Persistent entities, properties, associations
//! Layer 0: mapline_foundation — Core types (Type, Value, Error, ComputeCache)
//! ```

pub use mapline_foundation as foundation;
pub use mapline_mapping as mapping;
pub use mapline_path as path;
pub use mapline_query as query;
