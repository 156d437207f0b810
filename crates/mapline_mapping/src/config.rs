//! Configuration for entity discovery.

use mapline_foundation::TypeName;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::entity::PropertyOrder;

/// Configuration for a [`MappingContext`](crate::MappingContext).
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MappingConfig {
    /// Reject types outside the initial entity set.
    pub strict: bool,

    /// Types discovered by `initialize`, and the only ones allowed in strict mode.
    pub initial_entity_set: Vec<TypeName>,

    /// Order in which entities expose their properties.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub property_order: PropertyOrder,

    /// Structured types treated as simple values that never become entities.
    pub simple_types: Vec<TypeName>,

    /// Discover entity-typed properties' types together with their owner.
    pub eager_nested_discovery: bool,
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            strict: false,
            initial_entity_set: Vec::new(),
            property_order: PropertyOrder::Declaration,
            simple_types: Vec::new(),
            eager_nested_discovery: true,
        }
    }
}

impl MappingConfig {
    /// Creates a strict configuration limited to the given types.
    #[must_use]
    pub fn strict<I, T>(types: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TypeName>,
    {
        Self {
            strict: true,
            initial_entity_set: types.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Creates a configuration that discovers entities only on request.
    #[must_use]
    pub fn lazy() -> Self {
        Self {
            eager_nested_discovery: false,
            ..Self::default()
        }
    }

    /// Builder method to enable/disable strict mode.
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Builder method to add a type to the initial entity set.
    #[must_use]
    pub fn with_initial_entity(mut self, name: impl Into<TypeName>) -> Self {
        self.initial_entity_set.push(name.into());
        self
    }

    /// Builder method to set the property order.
    #[must_use]
    pub fn with_property_order(mut self, order: PropertyOrder) -> Self {
        self.property_order = order;
        self
    }

    /// Builder method to register a structured type as simple.
    #[must_use]
    pub fn with_simple_type(mut self, name: impl Into<TypeName>) -> Self {
        self.simple_types.push(name.into());
        self
    }

    /// Builder method to enable/disable eager nested discovery.
    #[must_use]
    pub fn with_eager_nested_discovery(mut self, eager: bool) -> Self {
        self.eager_nested_discovery = eager;
        self
    }

    /// Returns true if `name` may be discovered under this configuration.
    #[must_use]
    pub fn admits(&self, name: &TypeName) -> bool {
        !self.strict || self.initial_entity_set.contains(name)
    }
}
