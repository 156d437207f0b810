//! Integration tests for Layer 3: Query
//!
//! Tests for method-name parsing, keywords, and sorting.

mod keywords;
mod sorting;
