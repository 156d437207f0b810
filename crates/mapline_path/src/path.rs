//! Resolved property paths.

use std::fmt;
use std::sync::Arc;

use mapline_foundation::{Type, TypeName};

use crate::splitter;

/// A resolved, possibly nested property reference such as `address.city`.
///
/// Each segment owns its tail. Paths are immutable and shared through `Arc`;
/// the resolver hands out the same instance for identical inputs.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PropertyPath {
    name: String,
    owning_type: TypeName,
    ty: Type,
    next: Option<Arc<PropertyPath>>,
}

impl PropertyPath {
    pub(crate) fn new(
        name: String,
        owning_type: TypeName,
        ty: Type,
        next: Option<Arc<PropertyPath>>,
    ) -> Self {
        Self {
            name,
            owning_type,
            ty,
            next,
        }
    }

    /// Wraps a raw path so that underscores in it are not treated as
    /// delimiters.
    #[must_use]
    pub fn quote(source: &str) -> String {
        splitter::quote(source)
    }

    /// Name of this segment.
    #[must_use]
    pub fn segment(&self) -> &str {
        &self.name
    }

    /// The type declaring this segment.
    #[must_use]
    pub const fn owning_type(&self) -> &TypeName {
        &self.owning_type
    }

    /// Declared type of this segment.
    #[must_use]
    pub const fn type_info(&self) -> &Type {
        &self.ty
    }

    /// The type the next hop continues with: the component type for
    /// collections and arrays, the value type for maps.
    #[must_use]
    pub fn actual_type(&self) -> &Type {
        self.ty.actual_type()
    }

    /// Returns true if this hop goes through a collection or array.
    #[must_use]
    pub fn is_collection(&self) -> bool {
        self.ty.is_collection_like()
    }

    /// Returns true if another segment follows.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// The following segment; `None` at the leaf.
    #[must_use]
    pub fn next(&self) -> Option<&PropertyPath> {
        self.next.as_deref()
    }

    /// The last segment.
    #[must_use]
    pub fn leaf_property(&self) -> &PropertyPath {
        let mut current = self;
        while let Some(next) = current.next() {
            current = next;
        }
        current
    }

    /// Actual type of the last segment.
    #[must_use]
    pub fn leaf_type(&self) -> &Type {
        self.leaf_property().actual_type()
    }

    /// Iterates over this segment and every following one.
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            current: Some(self),
        }
    }

    /// Number of segments, including this one.
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Always false; a path has at least one segment.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Canonical dotted form, independent of how the source was delimited.
    #[must_use]
    pub fn to_dot_path(&self) -> String {
        self.iter()
            .map(PropertyPath::segment)
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}",
            self.owning_type.simple_name(),
            self.to_dot_path()
        )
    }
}

impl<'a> IntoIterator for &'a PropertyPath {
    type Item = &'a PropertyPath;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the segments of a [`PropertyPath`].
#[derive(Clone, Debug)]
pub struct Iter<'a> {
    current: Option<&'a PropertyPath>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a PropertyPath;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;
        self.current = current.next();
        Some(current)
    }
}
