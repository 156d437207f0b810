//! Parser limits and strictness switches.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for [`PartTree`](crate::PartTree) derivation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParserConfig {
    /// Maximum length of a method name, in bytes.
    pub max_method_name_length: usize,

    /// Require a geospatial leaf type for `Near` and `Within`.
    pub strict_geospatial: bool,

    /// Check `Or`/`And` splits against the entity model and re-join segments
    /// that only resolve together, such as `sizeOrWeight`.
    pub validate_splits: bool,

    /// Most adjacent segments that may be re-joined into one candidate.
    pub max_joined_segments: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_method_name_length: 10_000,
            strict_geospatial: false,
            validate_splits: true,
            max_joined_segments: 8,
        }
    }
}

impl ParserConfig {
    /// Creates a configuration that rejects geospatial keywords on
    /// non-geospatial properties.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            strict_geospatial: true,
            ..Self::default()
        }
    }

    /// Builder method to set the maximum method name length.
    #[must_use]
    pub fn with_max_method_name_length(mut self, length: usize) -> Self {
        self.max_method_name_length = length;
        self
    }

    /// Builder method to toggle geospatial type checks.
    #[must_use]
    pub fn with_strict_geospatial(mut self, strict: bool) -> Self {
        self.strict_geospatial = strict;
        self
    }

    /// Builder method to toggle split validation.
    #[must_use]
    pub fn with_validate_splits(mut self, validate: bool) -> Self {
        self.validate_splits = validate;
        self
    }

    /// Builder method to set how many segments may be re-joined.
    #[must_use]
    pub fn with_max_joined_segments(mut self, segments: usize) -> Self {
        self.max_joined_segments = segments.max(1);
        self
    }
}
