//! Persistent property metadata.

use std::fmt;
use std::hash::{Hash, Hasher};

use mapline_foundation::{Type, TypeName};

use crate::reflect::{Annotation, FieldShape};

/// A field of a persistent entity that participates in mapping.
///
/// Equality and hashing use the declaring type and the name, so a field
/// declared once on a generic supertype compares equal across every entity
/// that inherits it.
#[derive(Clone, Debug)]
pub struct PersistentProperty {
    name: String,
    ty: Type,
    owner: TypeName,
    declaring_type: TypeName,
    annotations: Vec<Annotation>,
    is_entity: bool,
}

impl PersistentProperty {
    /// Creates a property.
    ///
    /// `ty` is the declared type after type-parameter substitution. `is_entity`
    /// is true when the actual type is itself mapped as an entity.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        ty: Type,
        owner: TypeName,
        declaring_type: TypeName,
        is_entity: bool,
    ) -> Self {
        Self {
            name: name.into(),
            ty,
            owner,
            declaring_type,
            annotations: Vec::new(),
            is_entity,
        }
    }

    /// Creates a property from a declared field.
    #[must_use]
    pub fn from_field(
        field: &FieldShape,
        ty: Type,
        owner: TypeName,
        declaring_type: TypeName,
        is_entity: bool,
    ) -> Self {
        Self::new(field.name.clone(), ty, owner, declaring_type, is_entity)
            .with_annotations(field.annotations.iter().cloned())
    }

    /// Adds annotations.
    #[must_use]
    pub fn with_annotations(mut self, annotations: impl IntoIterator<Item = Annotation>) -> Self {
        self.annotations.extend(annotations);
        self
    }

    /// Property name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared type.
    #[must_use]
    pub const fn type_info(&self) -> &Type {
        &self.ty
    }

    /// Component type for collections and arrays, value type for maps, the
    /// declared type otherwise.
    #[must_use]
    pub fn actual_type(&self) -> &Type {
        self.ty.actual_type()
    }

    /// The entity this property belongs to.
    #[must_use]
    pub const fn owner(&self) -> &TypeName {
        &self.owner
    }

    /// The type that declares the field; a supertype for inherited fields.
    #[must_use]
    pub const fn declaring_type(&self) -> &TypeName {
        &self.declaring_type
    }

    /// Annotations on the property.
    #[must_use]
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Returns true if the property carries the annotation.
    #[must_use]
    pub fn is_annotated(&self, annotation: &Annotation) -> bool {
        self.annotations.contains(annotation)
    }

    /// Name of the inverse property declared with [`Annotation::MappedBy`].
    #[must_use]
    pub fn mapped_by(&self) -> Option<&str> {
        self.annotations.iter().find_map(|a| match a {
            Annotation::MappedBy(name) => Some(name.as_str()),
            _ => None,
        })
    }

    /// Returns true for the identifier property.
    #[must_use]
    pub fn is_id_property(&self) -> bool {
        self.is_annotated(&Annotation::Id)
    }

    /// Returns true for the version property.
    #[must_use]
    pub fn is_version_property(&self) -> bool {
        self.is_annotated(&Annotation::Version)
    }

    /// Returns true if the property is annotated transient.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        self.is_annotated(&Annotation::Transient)
    }

    /// Returns true for lists, sets, and arrays.
    #[must_use]
    pub fn is_collection_like(&self) -> bool {
        self.ty.is_collection_like()
    }

    /// Returns true for maps.
    #[must_use]
    pub fn is_map(&self) -> bool {
        self.ty.is_map()
    }

    /// Returns true for arrays.
    #[must_use]
    pub fn is_array(&self) -> bool {
        self.ty.is_array()
    }

    /// Returns true if the actual type is a mapped entity.
    #[must_use]
    pub const fn is_entity(&self) -> bool {
        self.is_entity
    }

    /// Returns true if the property points at another entity, directly or
    /// as a collection or map element. `Reference` and `MappedBy` only
    /// steer inverse resolution.
    #[must_use]
    pub const fn is_association(&self) -> bool {
        self.is_entity
    }

    /// The entity type reached through this property.
    #[must_use]
    pub fn entity_type(&self) -> Option<&TypeName> {
        if self.is_entity {
            self.actual_type().struct_name()
        } else {
            None
        }
    }
}

impl PartialEq for PersistentProperty {
    fn eq(&self, other: &Self) -> bool {
        self.declaring_type == other.declaring_type && self.name == other.name
    }
}

impl Eq for PersistentProperty {}

impl Hash for PersistentProperty {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.declaring_type.hash(state);
        self.name.hash(state);
    }
}

impl fmt::Display for PersistentProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}: {}", self.owner.simple_name(), self.name, self.ty)
    }
}
