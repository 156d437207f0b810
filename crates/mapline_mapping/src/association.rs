//! Links between entities.

use std::fmt;
use std::sync::Arc;

use mapline_foundation::TypeName;

use crate::context::MappingContext;
use crate::property::PersistentProperty;

/// A property that references another entity.
///
/// The inverse side is resolved lazily against a [`MappingContext`], so
/// entities referencing each other do not need to be discovered in order.
#[derive(Clone, Debug)]
pub struct Association {
    property: Arc<PersistentProperty>,
    target: TypeName,
}

impl Association {
    /// Creates an association for an entity-typed property.
    ///
    /// Returns `None` if the property does not point at an entity.
    #[must_use]
    pub fn new(property: Arc<PersistentProperty>) -> Option<Self> {
        let target = property.entity_type()?.clone();
        Some(Self { property, target })
    }

    /// The owning property.
    #[must_use]
    pub const fn property(&self) -> &Arc<PersistentProperty> {
        &self.property
    }

    /// The entity the association points at.
    #[must_use]
    pub const fn target_type(&self) -> &TypeName {
        &self.target
    }

    /// Resolves the property on the target entity that maps this association
    /// back to the owner.
    ///
    /// Uses the `MappedBy` name when declared, otherwise the first target
    /// property whose actual type is the owner. Returns `None` if the target
    /// cannot be discovered or has no such property.
    #[must_use]
    pub fn inverse(&self, context: &MappingContext) -> Option<Arc<PersistentProperty>> {
        let target = context.persistent_entity(&self.target).ok()?;
        if let Some(name) = self.property.mapped_by() {
            return target.persistent_property(name).cloned();
        }
        let owner = self.property.owner();
        target
            .properties()
            .iter()
            .find(|p| p.entity_type() == Some(owner) && **p != self.property)
            .cloned()
    }
}

impl fmt::Display for Association {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{} -> {}",
            self.property.owner().simple_name(),
            self.property.name(),
            self.target.simple_name()
        )
    }
}
