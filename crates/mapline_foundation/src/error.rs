//! Error types for the Mapline system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

use crate::types::{Type, TypeName};

/// Result type for Mapline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Mapline operations.
///
/// Errors are cloneable so that a failed entity discovery can be memoized and
/// handed out again on every later lookup.
#[derive(Debug, Clone, Error)]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    ///
    /// Context already present is kept; only missing fields are filled in.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(match self.context.take() {
            Some(existing) => existing.merge(context),
            None => context,
        });
        self
    }

    /// Creates an invalid argument error.
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument(message.into()))
    }

    /// Creates a property reference error.
    #[must_use]
    pub fn property_reference(error: PropertyReferenceError) -> Self {
        Self::new(ErrorKind::PropertyReference(error))
    }

    /// Creates a query syntax error for the named clause.
    #[must_use]
    pub fn query_syntax(clause: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::QuerySyntax {
            clause: clause.into(),
            message: message.into(),
        })
    }

    /// Creates a missing type information error.
    #[must_use]
    pub fn missing_type(type_name: TypeName) -> Self {
        Self::new(ErrorKind::MissingTypeInformation { type_name })
    }

    /// Creates a depth exceeded error.
    #[must_use]
    pub fn depth_exceeded(limit: usize, depth: usize) -> Self {
        Self::new(ErrorKind::DepthExceeded { limit, depth })
    }

    /// Creates a conversion error.
    #[must_use]
    pub fn conversion(value: impl Into<String>, target: Type) -> Self {
        Self::new(ErrorKind::Conversion {
            value: value.into(),
            target,
        })
    }

    /// Returns true for errors raised by argument validation at an API boundary.
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::InvalidArgument(_)
                | ErrorKind::DepthExceeded { .. }
                | ErrorKind::SourceTooLong { .. }
                | ErrorKind::LeadingUnderscore { .. }
        )
    }

    /// Returns true for unresolvable property references.
    #[must_use]
    pub const fn is_resolution_error(&self) -> bool {
        matches!(self.kind, ErrorKind::PropertyReference(_))
    }

    /// Returns true for mapping invariant violations.
    #[must_use]
    pub const fn is_mapping_error(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::DuplicateIdProperty { .. }
                | ErrorKind::DuplicateVersionProperty { .. }
                | ErrorKind::MissingTypeInformation { .. }
                | ErrorKind::UnresolvedTypeParameter { .. }
                | ErrorKind::StrictModeViolation { .. }
                | ErrorKind::MissingIdProperty { .. }
        )
    }

    /// Returns true for structural parse errors in a method name.
    #[must_use]
    pub const fn is_syntax_error(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::QuerySyntax { .. } | ErrorKind::KeywordMismatch { .. }
        )
    }

    /// Returns the property reference details, if this is a resolution error.
    #[must_use]
    pub const fn property_reference_error(&self) -> Option<&PropertyReferenceError> {
        match &self.kind {
            ErrorKind::PropertyReference(error) => Some(error),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(context) = &self.context {
            if !context.is_empty() {
                write!(f, " {context}")?;
            }
        }
        Ok(())
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ErrorKind {
    /// Null, empty, or otherwise malformed argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A path nests deeper than the configured limit.
    #[error(
        "path depth {depth} exceeds the maximum of {limit}; parsing deeper paths is disabled"
    )]
    DepthExceeded {
        /// The configured limit.
        limit: usize,
        /// The depth that was reached.
        depth: usize,
    },

    /// A source string is longer than the configured limit.
    #[error("source length {length} exceeds the maximum of {limit}")]
    SourceTooLong {
        /// The configured limit.
        limit: usize,
        /// The length of the rejected source.
        length: usize,
    },

    /// An unquoted path starts with an underscore.
    #[error(
        "property '{property}' starts with an underscore; quote the path to reference it literally"
    )]
    LeadingUnderscore {
        /// The offending property reference.
        property: String,
    },

    /// A property reference could not be resolved.
    #[error("{0}")]
    PropertyReference(PropertyReferenceError),

    /// A second identifier property was added to an entity.
    #[error(
        "entity {entity} already has identifier property '{existing}'; cannot add '{duplicate}'"
    )]
    DuplicateIdProperty {
        /// The entity under construction.
        entity: TypeName,
        /// The identifier already registered.
        existing: String,
        /// The rejected property.
        duplicate: String,
    },

    /// A second version property was added to an entity.
    #[error(
        "entity {entity} already has version property '{existing}'; cannot add '{duplicate}'"
    )]
    DuplicateVersionProperty {
        /// The entity under construction.
        entity: TypeName,
        /// The version property already registered.
        existing: String,
        /// The rejected property.
        duplicate: String,
    },

    /// No reflective shape is known for a type.
    #[error("no type information available for {type_name}")]
    MissingTypeInformation {
        /// The type that was requested.
        type_name: TypeName,
    },

    /// A field type still refers to a type variable after substitution.
    #[error("property '{property}' of {entity} has unresolved type parameter {parameter}")]
    UnresolvedTypeParameter {
        /// The entity being discovered.
        entity: TypeName,
        /// The property with the unresolved type.
        property: String,
        /// The unbound type variable.
        parameter: String,
    },

    /// Strict mapping rejected a type outside the initial entity set.
    #[error("{type_name} is not part of the initial entity set")]
    StrictModeViolation {
        /// The rejected type.
        type_name: TypeName,
    },

    /// An identifier property was required but the entity has none.
    #[error("entity {entity} has no identifier property")]
    MissingIdProperty {
        /// The entity without an identifier.
        entity: TypeName,
    },

    /// Structural parse error in a method name.
    #[error("invalid {clause} clause: {message}")]
    QuerySyntax {
        /// The clause that is malformed.
        clause: String,
        /// Description of the problem.
        message: String,
    },

    /// A keyword was applied to a property of an unsuitable type.
    #[error("keyword {keyword} cannot be applied to property '{property}' of type {actual}")]
    KeywordMismatch {
        /// The keyword that was used.
        keyword: String,
        /// The property it was applied to.
        property: String,
        /// The property's type.
        actual: Type,
    },

    /// A raw value could not be converted to the requested type.
    #[error("cannot convert {value} to {target}")]
    Conversion {
        /// Rendering of the raw value.
        value: String,
        /// The requested type.
        target: Type,
    },
}

/// Details of an unresolvable property reference.
///
/// Carries enough information for a "did you mean" diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyReferenceError {
    /// The property name that could not be found.
    pub property: String,
    /// The type that was searched.
    pub type_name: TypeName,
    /// Segments successfully resolved before the failure.
    pub resolved_path: Vec<String>,
    /// Existing property names close to the requested one.
    pub suggestions: Vec<String>,
}

impl PropertyReferenceError {
    /// Creates a new property reference error.
    #[must_use]
    pub fn new(property: impl Into<String>, type_name: TypeName) -> Self {
        Self {
            property: property.into(),
            type_name,
            resolved_path: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// Sets the path resolved so far.
    #[must_use]
    pub fn with_resolved_path(mut self, resolved_path: Vec<String>) -> Self {
        self.resolved_path = resolved_path;
        self
    }

    /// Sets the suggested property names.
    #[must_use]
    pub fn with_suggestions(mut self, suggestions: Vec<String>) -> Self {
        self.suggestions = suggestions;
        self
    }

    /// Number of segments resolved before the failure.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.resolved_path.len()
    }

    /// Returns true if this failure happened deeper in the path than `other`.
    #[must_use]
    pub fn is_deeper_than(&self, other: &Self) -> bool {
        self.depth() > other.depth()
    }
}

impl fmt::Display for PropertyReferenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "no property '{}' found for type '{}'",
            self.property,
            self.type_name.simple_name()
        )?;
        if !self.resolved_path.is_empty() {
            write!(f, "; traversed path: {}", self.resolved_path.join("."))?;
        }
        match self.suggestions.as_slice() {
            [] => Ok(()),
            [only] => write!(f, "; did you mean '{only}'?"),
            many => write!(f, "; did you mean one of '{}'?", many.join("', '")),
        }
    }
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// The original input, such as a repository method name.
    pub source: Option<String>,
    /// The segment of the input that was being processed.
    pub segment: Option<String>,
    /// Trail of resolution steps leading to the error.
    pub frames: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the original input.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the segment being processed.
    #[must_use]
    pub fn with_segment(mut self, segment: impl Into<String>) -> Self {
        self.segment = Some(segment.into());
        self
    }

    /// Adds a frame to the resolution trail.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.frames.push(frame.into());
        self
    }

    /// Returns true if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.source.is_none() && self.segment.is_none() && self.frames.is_empty()
    }

    fn merge(mut self, other: Self) -> Self {
        if self.source.is_none() {
            self.source = other.source;
        }
        if self.segment.is_none() {
            self.segment = other.segment;
        }
        self.frames.extend(other.frames);
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(segment) = &self.segment {
            write!(f, "in '{segment}'")?;
            if self.source.is_some() {
                write!(f, " ")?;
            }
        }
        if let Some(source) = &self.source {
            write!(f, "of '{source}'")?;
        }
        for frame in &self.frames {
            write!(f, "\n  in {frame}")?;
        }
        Ok(())
    }
}
