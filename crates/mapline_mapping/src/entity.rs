//! Persistent entity metadata.
//!
//! A [`PersistentEntity`] is assembled by a [`PersistentEntityBuilder`] during
//! discovery and is immutable once built.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use mapline_foundation::{
    ConversionService, Error, ErrorKind, PropertyReferenceError, Result, TypeName, Value,
};

use crate::alias::Alias;
use crate::association::Association;
use crate::property::PersistentProperty;
use crate::reflect::{Annotation, TypeShape};

/// Order in which an entity exposes its properties.
#[derive(Clone, Copy, Debug, Default)]
pub enum PropertyOrder {
    /// Subclass fields first, then inherited fields, each in declaration order.
    #[default]
    Declaration,
    /// Sorted by name.
    Alphabetical,
    /// Sorted by a user-supplied comparator.
    Custom(fn(&PersistentProperty, &PersistentProperty) -> Ordering),
}

impl PropertyOrder {
    fn sort(self, properties: &mut [Arc<PersistentProperty>]) {
        match self {
            Self::Declaration => {}
            Self::Alphabetical => properties.sort_by(|a, b| a.name().cmp(b.name())),
            Self::Custom(compare) => properties.sort_by(|a, b| compare(a, b)),
        }
    }
}

/// Accumulates properties for an entity under discovery.
#[derive(Debug)]
pub struct PersistentEntityBuilder {
    shape: Arc<TypeShape>,
    alias: Alias,
    properties: Vec<Arc<PersistentProperty>>,
    id_property: Option<Arc<PersistentProperty>>,
    version_property: Option<Arc<PersistentProperty>>,
}

impl PersistentEntityBuilder {
    /// Starts an entity for the given shape.
    #[must_use]
    pub fn new(shape: Arc<TypeShape>) -> Self {
        let alias = Alias::of_optional(shape.alias.clone());
        Self {
            shape,
            alias,
            properties: Vec::new(),
            id_property: None,
            version_property: None,
        }
    }

    /// The entity's type name.
    #[must_use]
    pub fn type_name(&self) -> &TypeName {
        &self.shape.name
    }

    /// Adds a property.
    ///
    /// Adding a property equal to one already present is a no-op.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if the property has no name or belongs to another
    ///   entity
    /// - `DuplicateIdProperty` if an identifier is already registered
    /// - `DuplicateVersionProperty` if a version property is already registered
    pub fn add_persistent_property(&mut self, property: PersistentProperty) -> Result<()> {
        if property.name().is_empty() {
            return Err(Error::invalid_argument(format!(
                "property without a name added to {}",
                self.type_name()
            )));
        }
        if property.owner() != self.type_name() {
            return Err(Error::invalid_argument(format!(
                "property '{}' is owned by {}, not {}",
                property.name(),
                property.owner(),
                self.type_name()
            )));
        }
        if self.properties.iter().any(|p| **p == property) {
            return Ok(());
        }

        if property.is_id_property() {
            if let Some(existing) = &self.id_property {
                return Err(Error::new(ErrorKind::DuplicateIdProperty {
                    entity: self.type_name().clone(),
                    existing: existing.name().to_string(),
                    duplicate: property.name().to_string(),
                }));
            }
        }
        if property.is_version_property() {
            if let Some(existing) = &self.version_property {
                return Err(Error::new(ErrorKind::DuplicateVersionProperty {
                    entity: self.type_name().clone(),
                    existing: existing.name().to_string(),
                    duplicate: property.name().to_string(),
                }));
            }
        }

        let property = Arc::new(property);
        if property.is_id_property() {
            self.id_property = Some(Arc::clone(&property));
        }
        if property.is_version_property() {
            self.version_property = Some(Arc::clone(&property));
        }
        self.properties.push(property);
        Ok(())
    }

    /// Number of properties added so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Returns true if no property was added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Freezes the entity, ordering its properties and collecting associations.
    #[must_use]
    pub fn build(mut self, order: PropertyOrder) -> PersistentEntity {
        order.sort(&mut self.properties);

        let by_name = self
            .properties
            .iter()
            .enumerate()
            .map(|(i, p)| (p.name().to_string(), i))
            .collect();

        let associations = self
            .properties
            .iter()
            .filter(|p| p.is_association())
            .filter_map(|p| Association::new(Arc::clone(p)))
            .collect();

        PersistentEntity {
            shape: self.shape,
            alias: self.alias,
            properties: self.properties,
            by_name,
            id_property: self.id_property,
            version_property: self.version_property,
            associations,
        }
    }
}

/// Mapping metadata of a domain type.
#[derive(Debug)]
pub struct PersistentEntity {
    shape: Arc<TypeShape>,
    alias: Alias,
    properties: Vec<Arc<PersistentProperty>>,
    by_name: HashMap<String, usize>,
    id_property: Option<Arc<PersistentProperty>>,
    version_property: Option<Arc<PersistentProperty>>,
    associations: Vec<Association>,
}

impl PersistentEntity {
    /// The entity's type name.
    #[must_use]
    pub fn type_name(&self) -> &TypeName {
        &self.shape.name
    }

    /// The reflective shape the entity was discovered from.
    #[must_use]
    pub fn shape(&self) -> &TypeShape {
        &self.shape
    }

    /// The alias the entity is stored under.
    #[must_use]
    pub const fn type_alias(&self) -> &Alias {
        &self.alias
    }

    /// The identifier property, if any.
    #[must_use]
    pub fn id_property(&self) -> Option<&Arc<PersistentProperty>> {
        self.id_property.as_ref()
    }

    /// The identifier property.
    ///
    /// # Errors
    ///
    /// Returns `MissingIdProperty` if the entity has no identifier.
    pub fn required_id_property(&self) -> Result<&Arc<PersistentProperty>> {
        self.id_property.as_ref().ok_or_else(|| {
            Error::new(ErrorKind::MissingIdProperty {
                entity: self.type_name().clone(),
            })
        })
    }

    /// Returns true if the entity has an identifier property.
    #[must_use]
    pub const fn has_id_property(&self) -> bool {
        self.id_property.is_some()
    }

    /// The version property, if any.
    #[must_use]
    pub fn version_property(&self) -> Option<&Arc<PersistentProperty>> {
        self.version_property.as_ref()
    }

    /// Returns true if the entity has a version property.
    #[must_use]
    pub const fn has_version_property(&self) -> bool {
        self.version_property.is_some()
    }

    /// Looks up a property by name.
    #[must_use]
    pub fn persistent_property(&self, name: &str) -> Option<&Arc<PersistentProperty>> {
        self.by_name.get(name).map(|&i| &self.properties[i])
    }

    /// Looks up a property by name, failing when absent.
    ///
    /// # Errors
    ///
    /// Returns a property reference error if no property has that name.
    pub fn required_persistent_property(&self, name: &str) -> Result<&Arc<PersistentProperty>> {
        self.persistent_property(name).ok_or_else(|| {
            Error::property_reference(PropertyReferenceError::new(name, self.type_name().clone()))
        })
    }

    /// The first property carrying the annotation.
    #[must_use]
    pub fn persistent_property_with(
        &self,
        annotation: &Annotation,
    ) -> Option<&Arc<PersistentProperty>> {
        self.properties.iter().find(|p| p.is_annotated(annotation))
    }

    /// Properties in the configured order.
    #[must_use]
    pub fn properties(&self) -> &[Arc<PersistentProperty>] {
        &self.properties
    }

    /// Names of the properties, in order.
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().map(|p| p.name())
    }

    /// Associations to other entities.
    #[must_use]
    pub fn associations(&self) -> &[Association] {
        &self.associations
    }

    /// Number of properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Returns true if the entity has no properties.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Converts a raw identifier to the identifier property's type.
    ///
    /// # Errors
    ///
    /// Returns `MissingIdProperty` if the entity has no identifier, or a
    /// conversion error if the value does not fit the identifier's type.
    pub fn convert_identifier(
        &self,
        raw: &Value,
        conversions: &dyn ConversionService,
    ) -> Result<Value> {
        let id = self.required_id_property()?;
        conversions.convert(raw, id.type_info())
    }
}

impl fmt::Display for PersistentEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{", self.type_name().simple_name())?;
        for (i, property) in self.properties.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, " {}: {}", property.name(), property.type_info())?;
        }
        write!(f, " }}")
    }
}
