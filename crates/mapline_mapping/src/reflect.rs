//! Reflective type shapes supplied by the host application.
//!
//! Discovery never inspects Rust types directly. Instead a
//! [`TypeIntrospector`] hands out [`TypeShape`]s describing each type's
//! declared fields, their types, and their annotations.

use std::collections::HashMap;
use std::sync::Arc;

use mapline_foundation::{Error, Result, Type, TypeName, Value};

/// Marker attached to a declared field.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Annotation {
    /// The field is the entity identifier.
    Id,
    /// The field carries the optimistic-locking version.
    Version,
    /// The field is not persisted.
    Transient,
    /// The field references another entity rather than embedding it.
    Reference,
    /// Names the property on the target entity that maps this association back.
    MappedBy(String),
    /// Store-specific marker.
    Custom(String),
}

/// Language-level modifiers of a declared field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FieldModifiers {
    /// Class-level rather than instance-level.
    pub is_static: bool,
    /// Generated by the compiler, not written by the user.
    pub is_synthetic: bool,
    /// Declared transient at the language level.
    pub is_transient: bool,
}

/// A declared field of a type.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldShape {
    /// Field name.
    pub name: String,
    /// Declared type, possibly referring to type parameters.
    pub ty: Type,
    /// Annotations on the field.
    pub annotations: Vec<Annotation>,
    /// Language-level modifiers.
    pub modifiers: FieldModifiers,
}

impl FieldShape {
    /// Creates a plain field.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
            annotations: Vec::new(),
            modifiers: FieldModifiers::default(),
        }
    }

    /// Creates a field annotated as the identifier.
    #[must_use]
    pub fn id(name: impl Into<String>, ty: Type) -> Self {
        Self::new(name, ty).with_annotation(Annotation::Id)
    }

    /// Adds an annotation.
    #[must_use]
    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Sets the modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: FieldModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Marks the field static.
    #[must_use]
    pub fn as_static(mut self) -> Self {
        self.modifiers.is_static = true;
        self
    }

    /// Marks the field compiler-generated.
    #[must_use]
    pub fn as_synthetic(mut self) -> Self {
        self.modifiers.is_synthetic = true;
        self
    }

    /// Marks the field transient at the language level.
    #[must_use]
    pub fn as_transient(mut self) -> Self {
        self.modifiers.is_transient = true;
        self
    }

    /// Returns true if the field carries the annotation.
    #[must_use]
    pub fn is_annotated(&self, annotation: &Annotation) -> bool {
        self.annotations.contains(annotation)
    }
}

/// Reference from a type to its supertype, with the supertype's type
/// arguments as seen from the subtype.
#[derive(Clone, Debug, PartialEq)]
pub struct SupertypeRef {
    /// The supertype.
    pub name: TypeName,
    /// Type arguments bound to the supertype's parameters, in order.
    pub args: Vec<Type>,
}

/// Declared shape of a type.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeShape {
    /// Type name.
    pub name: TypeName,
    /// Names of the type's generic parameters.
    pub type_params: Vec<String>,
    /// Direct supertype, if any.
    pub supertype: Option<SupertypeRef>,
    /// Type alias used to tag stored instances.
    pub alias: Option<Value>,
    /// Fields declared directly on this type, in declaration order.
    pub fields: Vec<FieldShape>,
}

impl TypeShape {
    /// Creates an empty shape.
    #[must_use]
    pub fn new(name: impl Into<TypeName>) -> Self {
        Self {
            name: name.into(),
            type_params: Vec::new(),
            supertype: None,
            alias: None,
            fields: Vec::new(),
        }
    }

    /// Declares generic parameters.
    #[must_use]
    pub fn with_type_params<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.type_params = params.into_iter().map(Into::into).collect();
        self
    }

    /// Declares the supertype and its type arguments.
    #[must_use]
    pub fn extends(mut self, name: impl Into<TypeName>, args: Vec<Type>) -> Self {
        self.supertype = Some(SupertypeRef {
            name: name.into(),
            args,
        });
        self
    }

    /// Sets the type alias.
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<Value>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Adds a declared field.
    #[must_use]
    pub fn with_field(mut self, field: FieldShape) -> Self {
        self.fields.push(field);
        self
    }

    /// Returns a declared field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldShape> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Capability to enumerate a type's declared members.
pub trait TypeIntrospector: Send + Sync {
    /// Returns the shape of the named type, if known.
    fn shape(&self, name: &TypeName) -> Option<Arc<TypeShape>>;
}

/// Implemented by domain types that describe their own shape.
pub trait Reflect {
    /// Stable name of the type.
    fn type_name() -> TypeName;

    /// Declared shape of the type.
    fn type_shape() -> TypeShape;
}

/// In-memory [`TypeIntrospector`] populated by registration.
#[derive(Clone, Debug, Default)]
pub struct TypeRegistry {
    shapes: HashMap<TypeName, Arc<TypeShape>>,
}

impl TypeRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a type shape.
    ///
    /// # Errors
    ///
    /// Returns an error if a shape with the same name is already registered.
    pub fn register(&mut self, shape: TypeShape) -> Result<()> {
        if self.shapes.contains_key(&shape.name) {
            return Err(Error::invalid_argument(format!(
                "type shape already registered: {}",
                shape.name
            )));
        }
        self.shapes.insert(shape.name.clone(), Arc::new(shape));
        Ok(())
    }

    /// Registers the shape of a [`Reflect`] type.
    ///
    /// # Errors
    ///
    /// Returns an error if the type is already registered.
    pub fn register_type<T: Reflect>(&mut self) -> Result<()> {
        self.register(T::type_shape())
    }

    /// Builds a registry from a set of shapes.
    ///
    /// # Errors
    ///
    /// Returns an error if two shapes share a name.
    pub fn from_shapes(shapes: impl IntoIterator<Item = TypeShape>) -> Result<Self> {
        let mut registry = Self::new();
        for shape in shapes {
            registry.register(shape)?;
        }
        Ok(registry)
    }

    /// Returns true if a shape is registered under the name.
    #[must_use]
    pub fn contains(&self, name: &TypeName) -> bool {
        self.shapes.contains_key(name)
    }

    /// Number of registered shapes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

impl TypeIntrospector for TypeRegistry {
    fn shape(&self, name: &TypeName) -> Option<Arc<TypeShape>> {
        self.shapes.get(name).cloned()
    }
}
