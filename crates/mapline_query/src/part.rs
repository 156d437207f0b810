//! A single predicate of a derived query.

use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use mapline_foundation::{Error, ErrorContext, ErrorKind, Result, TypeName};
use mapline_path::{PathResolver, PropertyPath};

use crate::config::ParserConfig;
use crate::keyword::PartType;
use crate::tokenizer;

/// How a part compares string values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum IgnoreCaseType {
    /// Case-sensitive comparison.
    #[default]
    Never,
    /// Case-insensitive; requested on this part.
    Always,
    /// Case-insensitive where the property type allows it; requested for
    /// the whole method.
    WhenPossible,
}

impl fmt::Display for IgnoreCaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Never => "NEVER",
            Self::Always => "ALWAYS",
            Self::WhenPossible => "WHEN_POSSIBLE",
        })
    }
}

/// A property compared by a keyword, such as `AgeGreaterThan`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Part {
    source: String,
    path: Arc<PropertyPath>,
    part_type: PartType,
    ignore_case: IgnoreCaseType,
}

impl Part {
    /// Parses `source` against `domain`.
    ///
    /// `always_ignore_case` is set when the method carried `AllIgnoreCase`.
    ///
    /// # Errors
    ///
    /// - `QuerySyntax` if nothing precedes the keyword
    /// - resolution errors for the property, carrying `source` as the segment
    /// - `KeywordMismatch` for geospatial keywords on other types when
    ///   `strict_geospatial` is on
    pub fn parse(
        source: &str,
        domain: &TypeName,
        resolver: &PathResolver,
        always_ignore_case: bool,
        config: &ParserConfig,
    ) -> Result<Self> {
        let (text, ignore) = tokenizer::strip_ignore_case(source);
        let ignore_case = if ignore {
            IgnoreCaseType::Always
        } else if always_ignore_case {
            IgnoreCaseType::WhenPossible
        } else {
            IgnoreCaseType::Never
        };

        let part_type = PartType::from_property(&text);
        let property = part_type.extract_property(&text);
        if property.is_empty() {
            return Err(Error::query_syntax(
                "predicate",
                format!("missing property before keyword {part_type} in '{source}'"),
            )
            .with_context(ErrorContext::new().with_segment(source)));
        }

        let path = resolver
            .resolve(&property, domain)
            .map_err(|e| e.with_context(ErrorContext::new().with_segment(source)))?;

        if config.strict_geospatial && part_type.is_geospatial() {
            let leaf = path.leaf_property();
            if !leaf.actual_type().is_geospatial() {
                return Err(Error::new(ErrorKind::KeywordMismatch {
                    keyword: part_type.to_string(),
                    property: path.to_dot_path(),
                    actual: leaf.type_info().clone(),
                })
                .with_context(ErrorContext::new().with_segment(source)));
            }
        }

        Ok(Self {
            source: source.to_string(),
            path,
            part_type,
            ignore_case,
        })
    }

    /// The raw text this part was parsed from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The compared property.
    #[must_use]
    pub const fn property(&self) -> &Arc<PropertyPath> {
        &self.path
    }

    /// The comparison.
    #[must_use]
    pub const fn part_type(&self) -> PartType {
        self.part_type
    }

    /// Case handling.
    #[must_use]
    pub const fn ignore_case(&self) -> IgnoreCaseType {
        self.ignore_case
    }

    /// Returns true unless case handling is [`IgnoreCaseType::Never`].
    #[must_use]
    pub const fn should_ignore_case(&self) -> bool {
        !matches!(self.ignore_case, IgnoreCaseType::Never)
    }

    /// Number of method arguments this part consumes.
    #[must_use]
    pub const fn number_of_arguments(&self) -> usize {
        self.part_type.number_of_arguments()
    }
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.path.to_dot_path(),
            self.part_type,
            self.ignore_case
        )
    }
}

/// Parts joined by `And`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrPart {
    children: Vec<Part>,
}

impl OrPart {
    pub(crate) fn new(children: Vec<Part>) -> Self {
        Self { children }
    }

    /// The conjoined parts.
    #[must_use]
    pub fn parts(&self) -> &[Part] {
        &self.children
    }

    /// Iterates over the conjoined parts.
    pub fn iter(&self) -> std::slice::Iter<'_, Part> {
        self.children.iter()
    }

    /// Number of conjoined parts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Returns true if there are no parts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl<'a> IntoIterator for &'a OrPart {
    type Item = &'a Part;
    type IntoIter = std::slice::Iter<'a, Part>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for OrPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.children.iter().enumerate() {
            if i > 0 {
                f.write_str(" and ")?;
            }
            write!(f, "{part}")?;
        }
        Ok(())
    }
}
