//! The mapping context: discovery and caching of persistent entities.
//!
//! Entities are discovered on first request from the shapes a
//! [`TypeIntrospector`] provides, then cached for the life of the context.
//! Failed discoveries are cached too, so every later request for the same
//! type reports the same error without rediscovering.

use std::collections::{HashSet, VecDeque};
use std::fmt;
use std::sync::Arc;

use mapline_foundation::{
    CacheStats, ComputeCache, DefaultConversionService, Error, ErrorContext, ErrorKind, Result,
    SharedConversionService, Type, TypeName, Value,
};
use tracing::{debug, trace, warn};

use crate::config::MappingConfig;
use crate::entity::{PersistentEntity, PersistentEntityBuilder};
use crate::filter::PropertyFilter;
use crate::property::PersistentProperty;
use crate::reflect::{Reflect, TypeIntrospector, TypeShape};

type EntityResult = Result<Arc<PersistentEntity>>;

/// Discovers and caches [`PersistentEntity`] metadata.
///
/// Safe to share between threads. Concurrent first requests for the same
/// type run discovery once and observe the same entity.
pub struct MappingContext {
    introspector: Arc<dyn TypeIntrospector>,
    conversions: SharedConversionService,
    filter: PropertyFilter,
    config: MappingConfig,
    entities: ComputeCache<TypeName, EntityResult>,
}

impl MappingContext {
    /// Creates a context with the default configuration, filter, and
    /// conversion service.
    #[must_use]
    pub fn new(introspector: Arc<dyn TypeIntrospector>) -> Self {
        Self {
            introspector,
            conversions: Arc::new(DefaultConversionService::new()),
            filter: PropertyFilter::defaults(),
            config: MappingConfig::default(),
            entities: ComputeCache::new(),
        }
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn with_config(mut self, config: MappingConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the property filter.
    #[must_use]
    pub fn with_filter(mut self, filter: PropertyFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Replaces the conversion service.
    #[must_use]
    pub fn with_conversion_service(mut self, conversions: SharedConversionService) -> Self {
        self.conversions = conversions;
        self
    }

    /// Returns the entity for `name`, discovering it on first request.
    ///
    /// # Errors
    ///
    /// - `MissingTypeInformation` if no shape is known for the type or one of
    ///   its supertypes, or if the type is configured as simple
    /// - `StrictModeViolation` if strict mode rejects the type
    /// - `UnresolvedTypeParameter` if a field type cannot be made concrete
    /// - `DuplicateIdProperty` / `DuplicateVersionProperty` on conflicting
    ///   annotations
    pub fn persistent_entity(&self, name: &TypeName) -> EntityResult {
        if let Some(cached) = self.entities.get(name) {
            trace!(entity = %name, "persistent entity cache hit");
            return cached;
        }

        let mut discovered_here = false;
        let result = self.entities.get_or_insert_with(name.clone(), |name| {
            discovered_here = true;
            self.discover(name)
        });

        if discovered_here {
            match &result {
                Ok(entity) if self.config.eager_nested_discovery => self.discover_nested(entity),
                Ok(_) => {}
                Err(err) => warn!(entity = %name, error = %err, "entity discovery failed"),
            }
        }
        result
    }

    /// Returns the entity of a [`Reflect`] type.
    ///
    /// # Errors
    ///
    /// Same as [`persistent_entity`](Self::persistent_entity).
    pub fn persistent_entity_of<T: Reflect>(&self) -> EntityResult {
        self.persistent_entity(&T::type_name())
    }

    /// Returns true if the type has been discovered successfully.
    #[must_use]
    pub fn has_persistent_entity(&self, name: &TypeName) -> bool {
        self.entities.get(name).is_some_and(|r| r.is_ok())
    }

    /// Snapshot of every successfully discovered entity, ordered by type name.
    #[must_use]
    pub fn persistent_entities(&self) -> Vec<Arc<PersistentEntity>> {
        let mut entities: Vec<_> = self
            .entities
            .values()
            .into_iter()
            .filter_map(std::result::Result::ok)
            .collect();
        entities.sort_by(|a, b| a.type_name().cmp(b.type_name()));
        entities
    }

    /// Discovers the initial entity set and every entity reachable from it.
    ///
    /// # Errors
    ///
    /// Returns the first discovery error encountered.
    pub fn initialize(&self) -> Result<()> {
        let mut queue: VecDeque<TypeName> =
            self.config.initial_entity_set.iter().cloned().collect();
        let mut seen: HashSet<TypeName> = queue.iter().cloned().collect();

        while let Some(name) = queue.pop_front() {
            let entity = self.persistent_entity(&name)?;
            for target in entity.properties().iter().filter_map(|p| p.entity_type()) {
                if seen.insert(target.clone()) {
                    queue.push_back(target.clone());
                }
            }
        }

        debug!(
            entities = self.entities.len(),
            "mapping context initialized"
        );
        Ok(())
    }

    /// Finds the discovered entity stored under the given raw alias value.
    #[must_use]
    pub fn entity_for_alias(&self, raw: &Value) -> Option<Arc<PersistentEntity>> {
        self.persistent_entities()
            .into_iter()
            .find(|e| e.type_alias().matches(raw, self.conversions.as_ref()))
    }

    /// Returns true if values of `ty` carry no nested persistent properties.
    #[must_use]
    pub fn is_simple_type(&self, ty: &Type) -> bool {
        match ty.actual_type() {
            Type::Struct(name) => self.is_simple_name(name),
            Type::Param(_) => false,
            _ => true,
        }
    }

    /// The introspector shapes are read from.
    #[must_use]
    pub fn introspector(&self) -> &Arc<dyn TypeIntrospector> {
        &self.introspector
    }

    /// The conversion service used for aliases and identifiers.
    #[must_use]
    pub fn conversion_service(&self) -> &SharedConversionService {
        &self.conversions
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &MappingConfig {
        &self.config
    }

    /// The active property filter.
    #[must_use]
    pub const fn filter(&self) -> &PropertyFilter {
        &self.filter
    }

    /// Entity cache statistics.
    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.entities.stats()
    }

    fn is_simple_name(&self, name: &TypeName) -> bool {
        self.config.simple_types.contains(name)
    }

    fn is_entity_type(&self, ty: &Type) -> bool {
        ty.actual_type()
            .struct_name()
            .is_some_and(|name| !self.is_simple_name(name))
    }

    fn discover(&self, name: &TypeName) -> EntityResult {
        self.build_entity(name)
            .map(Arc::new)
            .map_err(|e| e.with_context(ErrorContext::new().with_frame(format!("discovering {name}"))))
    }

    fn build_entity(&self, name: &TypeName) -> Result<PersistentEntity> {
        if self.is_simple_name(name) {
            return Err(Error::missing_type(name.clone()));
        }
        if !self.config.admits(name) {
            return Err(Error::new(ErrorKind::StrictModeViolation {
                type_name: name.clone(),
            }));
        }
        let shape = self.shape(name)?;

        let mut builder = PersistentEntityBuilder::new(Arc::clone(&shape));
        let mut declared: HashSet<String> = HashSet::new();
        let mut visited: HashSet<TypeName> = HashSet::from([name.clone()]);
        let mut bindings: Vec<(String, Type)> = Vec::new();
        let mut current = shape;

        loop {
            for field in &current.fields {
                if !declared.insert(field.name.clone()) {
                    trace!(entity = %name, field = %field.name, declared_on = %current.name, "skipping shadowed field");
                    continue;
                }
                if let Some(rule) = self.filter.excluded_by(&current.name, field) {
                    trace!(entity = %name, field = %field.name, rule, "excluding field");
                    continue;
                }

                let ty = field.ty.substitute(&bindings);
                if let Some(parameter) = ty.unresolved_param() {
                    return Err(Error::new(ErrorKind::UnresolvedTypeParameter {
                        entity: name.clone(),
                        property: field.name.clone(),
                        parameter: parameter.to_string(),
                    }));
                }

                let is_entity = self.is_entity_type(&ty);
                builder.add_persistent_property(PersistentProperty::from_field(
                    field,
                    ty,
                    name.clone(),
                    current.name.clone(),
                    is_entity,
                ))?;
            }

            let Some(supertype) = &current.supertype else {
                break;
            };
            if !visited.insert(supertype.name.clone()) {
                trace!(entity = %name, supertype = %supertype.name, "supertype cycle");
                break;
            }
            let parent = self.shape(&supertype.name)?;
            bindings = parent
                .type_params
                .iter()
                .cloned()
                .zip(supertype.args.iter().map(|arg| arg.substitute(&bindings)))
                .collect();
            current = parent;
        }

        let entity = builder.build(self.config.property_order);
        debug!(
            entity = %name,
            properties = entity.len(),
            id = ?entity.id_property().map(|p| p.name()),
            alias = %entity.type_alias(),
            "discovered persistent entity"
        );
        Ok(entity)
    }

    fn discover_nested(&self, entity: &PersistentEntity) {
        for target in entity.properties().iter().filter_map(|p| p.entity_type()) {
            if !self.entities.contains(target) {
                trace!(entity = %entity.type_name(), nested = %target, "discovering nested entity");
                // Failures are memoized under the nested type and surface on
                // its own lookup.
                let _ = self.persistent_entity(target);
            }
        }
    }

    fn shape(&self, name: &TypeName) -> Result<Arc<TypeShape>> {
        self.introspector
            .shape(name)
            .ok_or_else(|| Error::missing_type(name.clone()))
    }
}

impl fmt::Debug for MappingContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MappingContext")
            .field("config", &self.config)
            .field("filter", &self.filter)
            .field("entities", &self.entities)
            .finish_non_exhaustive()
    }
}
