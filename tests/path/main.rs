//! Integration tests for Layer 2: Path
//!
//! Tests for property path resolution and persistent property paths.

mod resolution;
