//! Comparison keywords of derived query parts.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use mapline_path::splitter;

/// The comparison a part applies to its property.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PartType {
    /// `Between`: two bounds.
    Between,
    /// `IsNotNull`
    IsNotNull,
    /// `IsNull`
    IsNull,
    /// `LessThan`
    LessThan,
    /// `LessThanEqual`
    LessThanEqual,
    /// `GreaterThan`
    GreaterThan,
    /// `GreaterThanEqual`
    GreaterThanEqual,
    /// `Before`
    Before,
    /// `After`
    After,
    /// `NotLike`
    NotLike,
    /// `Like`
    Like,
    /// `StartingWith`
    StartingWith,
    /// `EndingWith`
    EndingWith,
    /// `IsNotEmpty`
    IsNotEmpty,
    /// `IsEmpty`
    IsEmpty,
    /// `NotContaining`
    NotContaining,
    /// `Containing`
    Containing,
    /// `NotIn`
    NotIn,
    /// `In`
    In,
    /// `Near`: geospatial proximity.
    Near,
    /// `Within`: geospatial containment.
    Within,
    /// `Regex`
    Regex,
    /// `Exists`
    Exists,
    /// `True`
    True,
    /// `False`
    False,
    /// `Not`: inequality.
    NegatingSimpleProperty,
    /// No keyword or `Is`/`Equals`: equality.
    SimpleProperty,
}

impl PartType {
    /// Every type in detection order. Longer keywords sharing a suffix with
    /// shorter ones come first.
    pub const ALL: [Self; 27] = [
        Self::IsNotNull,
        Self::IsNull,
        Self::Between,
        Self::LessThan,
        Self::LessThanEqual,
        Self::GreaterThan,
        Self::GreaterThanEqual,
        Self::Before,
        Self::After,
        Self::NotLike,
        Self::Like,
        Self::StartingWith,
        Self::EndingWith,
        Self::IsNotEmpty,
        Self::IsEmpty,
        Self::NotContaining,
        Self::Containing,
        Self::NotIn,
        Self::In,
        Self::Near,
        Self::Within,
        Self::Regex,
        Self::Exists,
        Self::True,
        Self::False,
        Self::NegatingSimpleProperty,
        Self::SimpleProperty,
    ];

    /// Keywords that select this type, longest first.
    #[must_use]
    pub const fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Between => &["IsBetween", "Between"],
            Self::IsNotNull => &["IsNotNull", "NotNull"],
            Self::IsNull => &["IsNull", "Null"],
            Self::LessThan => &["IsLessThan", "LessThan"],
            Self::LessThanEqual => &["IsLessThanEqual", "LessThanEqual"],
            Self::GreaterThan => &["IsGreaterThan", "GreaterThan"],
            Self::GreaterThanEqual => &["IsGreaterThanEqual", "GreaterThanEqual"],
            Self::Before => &["IsBefore", "Before"],
            Self::After => &["IsAfter", "After"],
            Self::NotLike => &["IsNotLike", "NotLike"],
            Self::Like => &["IsLike", "Like"],
            Self::StartingWith => &["IsStartingWith", "StartingWith", "StartsWith"],
            Self::EndingWith => &["IsEndingWith", "EndingWith", "EndsWith"],
            Self::IsNotEmpty => &["IsNotEmpty", "NotEmpty"],
            Self::IsEmpty => &["IsEmpty", "Empty"],
            Self::NotContaining => &["IsNotContaining", "NotContaining", "NotContains"],
            Self::Containing => &["IsContaining", "Containing", "Contains"],
            Self::NotIn => &["IsNotIn", "NotIn"],
            Self::In => &["IsIn", "In"],
            Self::Near => &["IsNear", "Near"],
            Self::Within => &["IsWithin", "Within"],
            Self::Regex => &["MatchesRegex", "Matches", "Regex"],
            Self::Exists => &["Exists"],
            Self::True => &["IsTrue", "True"],
            Self::False => &["IsFalse", "False"],
            Self::NegatingSimpleProperty => &["IsNot", "Not"],
            Self::SimpleProperty => &["Is", "Equals"],
        }
    }

    /// Number of method arguments the comparison consumes.
    #[must_use]
    pub const fn number_of_arguments(self) -> usize {
        match self {
            Self::Between => 2,
            Self::IsNotNull
            | Self::IsNull
            | Self::IsNotEmpty
            | Self::IsEmpty
            | Self::Exists
            | Self::True
            | Self::False => 0,
            _ => 1,
        }
    }

    /// Returns true for keywords that expect a geospatial property.
    #[must_use]
    pub const fn is_geospatial(self) -> bool {
        matches!(self, Self::Near | Self::Within)
    }

    /// The keyword of this type that ends `raw`, if any.
    #[must_use]
    pub fn matching_keyword(self, raw: &str) -> Option<&'static str> {
        self.keywords().iter().copied().find(|k| raw.ends_with(k))
    }

    /// Detects the type from the keyword suffix of a raw part. Parts without
    /// a recognized suffix compare by equality.
    #[must_use]
    pub fn from_property(raw: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|t| t.matching_keyword(raw).is_some())
            .unwrap_or(Self::SimpleProperty)
    }

    /// Strips this type's keyword suffix and uncapitalizes the rest.
    #[must_use]
    pub fn extract_property(self, raw: &str) -> String {
        let property = self
            .matching_keyword(raw)
            .map_or(raw, |k| &raw[..raw.len() - k.len()]);
        splitter::uncapitalize(property)
    }

    /// Upper-case constant name, such as `GREATER_THAN`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Between => "BETWEEN",
            Self::IsNotNull => "IS_NOT_NULL",
            Self::IsNull => "IS_NULL",
            Self::LessThan => "LESS_THAN",
            Self::LessThanEqual => "LESS_THAN_EQUAL",
            Self::GreaterThan => "GREATER_THAN",
            Self::GreaterThanEqual => "GREATER_THAN_EQUAL",
            Self::Before => "BEFORE",
            Self::After => "AFTER",
            Self::NotLike => "NOT_LIKE",
            Self::Like => "LIKE",
            Self::StartingWith => "STARTING_WITH",
            Self::EndingWith => "ENDING_WITH",
            Self::IsNotEmpty => "IS_NOT_EMPTY",
            Self::IsEmpty => "IS_EMPTY",
            Self::NotContaining => "NOT_CONTAINING",
            Self::Containing => "CONTAINING",
            Self::NotIn => "NOT_IN",
            Self::In => "IN",
            Self::Near => "NEAR",
            Self::Within => "WITHIN",
            Self::Regex => "REGEX",
            Self::Exists => "EXISTS",
            Self::True => "TRUE",
            Self::False => "FALSE",
            Self::NegatingSimpleProperty => "NEGATING_SIMPLE_PROPERTY",
            Self::SimpleProperty => "SIMPLE_PROPERTY",
        }
    }
}

impl fmt::Display for PartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
