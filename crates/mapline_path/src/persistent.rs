//! Property paths expressed as chains of persistent properties.

use std::fmt;
use std::sync::Arc;

use mapline_foundation::{Error, Result};
use mapline_mapping::PersistentProperty;

/// The persistent properties traversed by a [`PropertyPath`](crate::PropertyPath).
///
/// Lets persistence modules render a path with store-specific field names
/// instead of property names.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PersistentPropertyPath {
    properties: Vec<Arc<PersistentProperty>>,
}

impl PersistentPropertyPath {
    /// Creates a path from its properties, base first.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `properties` is empty.
    pub fn new(properties: Vec<Arc<PersistentProperty>>) -> Result<Self> {
        if properties.is_empty() {
            return Err(Error::invalid_argument(
                "persistent property path needs at least one property",
            ));
        }
        Ok(Self { properties })
    }

    /// The properties, base first.
    #[must_use]
    pub fn properties(&self) -> &[Arc<PersistentProperty>] {
        &self.properties
    }

    /// The first property.
    #[must_use]
    pub fn base_property(&self) -> &Arc<PersistentProperty> {
        &self.properties[0]
    }

    /// The last property.
    #[must_use]
    pub fn leaf_property(&self) -> &Arc<PersistentProperty> {
        &self.properties[self.properties.len() - 1]
    }

    /// Number of properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Always false; a path has at least one property.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// The path without its leaf, or `None` for a single-property path.
    #[must_use]
    pub fn parent_path(&self) -> Option<Self> {
        if self.properties.len() < 2 {
            return None;
        }
        Some(Self {
            properties: self.properties[..self.properties.len() - 1].to_vec(),
        })
    }

    /// Returns true if this path is a prefix of `other`.
    #[must_use]
    pub fn is_base_path_of(&self, other: &Self) -> bool {
        other.properties.starts_with(&self.properties)
    }

    /// The part of `self` that extends `base`, or `None` if `base` is not a
    /// strict prefix.
    #[must_use]
    pub fn extension_for_base_of(&self, base: &Self) -> Option<Self> {
        if !base.is_base_path_of(self) || base.len() == self.len() {
            return None;
        }
        Some(Self {
            properties: self.properties[base.len()..].to_vec(),
        })
    }

    /// Dotted property names.
    #[must_use]
    pub fn to_dot_path(&self) -> String {
        self.to_path_with(|p| p.name().to_string(), ".")
    }

    /// Renders the path with a custom name for each property. Properties
    /// mapped to an empty name are skipped.
    #[must_use]
    pub fn to_path_with(
        &self,
        mapper: impl Fn(&PersistentProperty) -> String,
        delimiter: &str,
    ) -> String {
        self.properties
            .iter()
            .map(|p| mapper(p))
            .filter(|name| !name.is_empty())
            .collect::<Vec<_>>()
            .join(delimiter)
    }
}

impl fmt::Display for PersistentPropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_dot_path())
    }
}
