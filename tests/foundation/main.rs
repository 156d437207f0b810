//! Integration tests for Layer 0: Foundation
//!
//! Tests for core types: Type, Value, Error, conversion, and caches.

mod cache;
mod conversion;
mod errors;
mod types;
