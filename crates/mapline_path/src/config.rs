//! Limits applied by the path resolver.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for a [`PathResolver`](crate::PathResolver).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ResolverConfig {
    /// Maximum number of segments a path may nest.
    pub max_depth: usize,

    /// Maximum length of a source string, in bytes.
    pub max_source_length: usize,

    /// Maximum edit distance for "did you mean" suggestions; 0 disables them.
    pub suggestion_distance: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_depth: 1000,
            max_source_length: 10_000,
            suggestion_distance: 2,
        }
    }
}

impl ResolverConfig {
    /// Creates a configuration with tighter limits for untrusted input.
    #[must_use]
    pub fn restrictive() -> Self {
        Self {
            max_depth: 32,
            max_source_length: 1024,
            suggestion_distance: 2,
        }
    }

    /// Builder method to set the maximum depth.
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Builder method to set the maximum source length.
    #[must_use]
    pub fn with_max_source_length(mut self, length: usize) -> Self {
        self.max_source_length = length;
        self
    }

    /// Builder method to set the suggestion distance.
    #[must_use]
    pub fn with_suggestion_distance(mut self, distance: usize) -> Self {
        self.suggestion_distance = distance;
        self
    }
}
