//! Type descriptors for mapped properties.

use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Stable identifier of a domain type.
///
/// Type names are the keys of every metadata cache, so they are cheap to
/// clone and hash.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TypeName(Arc<str>);

impl TypeName {
    /// Creates a type name.
    #[must_use]
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    /// Returns the full name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the last `::`-separated segment of the name.
    #[must_use]
    pub fn simple_name(&self) -> &str {
        self.0.rsplit("::").next().unwrap_or(&self.0)
    }
}

impl fmt::Debug for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeName({})", self.0)
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for TypeName {
    fn from(name: String) -> Self {
        Self(Arc::from(name))
    }
}

impl AsRef<str> for TypeName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Semantic type descriptor of a property.
///
/// Captures the raw type together with its generic component types so that
/// `list<Foo>` and `set<Bar>` are distinguishable.
#[derive(Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Type {
    /// Boolean.
    Bool,
    /// 32-bit signed integer.
    Int,
    /// 64-bit signed integer.
    Long,
    /// 32-bit floating point.
    Float,
    /// 64-bit floating point.
    Double,
    /// Arbitrary precision decimal.
    Decimal,
    /// Text.
    String,
    /// Single character.
    Char,
    /// Raw bytes.
    Bytes,
    /// Calendar date.
    Date,
    /// Date with time.
    DateTime,
    /// UUID.
    Uuid,
    /// Geospatial point.
    Point,
    /// Geospatial box.
    GeoBox,
    /// Geospatial circle.
    Circle,
    /// Geospatial polygon.
    Polygon,
    /// Geospatial distance.
    Distance,
    /// Enumeration type (never an entity).
    Enum(TypeName),
    /// User-defined structured type.
    Struct(TypeName),
    /// Ordered collection.
    List(Box<Type>),
    /// Unordered collection.
    Set(Box<Type>),
    /// Fixed array.
    Array(Box<Type>),
    /// Map from key type to value type.
    Map(Box<Type>, Box<Type>),
    /// Nullable wrapper.
    Option(Box<Type>),
    /// Unbound type variable of a generic type.
    Param(String),
    /// Untyped.
    Any,
}

impl Type {
    /// Creates a structured type reference.
    #[must_use]
    pub fn structure(name: impl Into<TypeName>) -> Self {
        Self::Struct(name.into())
    }

    /// Creates an enumeration type reference.
    #[must_use]
    pub fn enumeration(name: impl Into<TypeName>) -> Self {
        Self::Enum(name.into())
    }

    /// Creates a list type with the given element type.
    #[must_use]
    pub fn list(element: Type) -> Self {
        Self::List(Box::new(element))
    }

    /// Creates a set type with the given element type.
    #[must_use]
    pub fn set(element: Type) -> Self {
        Self::Set(Box::new(element))
    }

    /// Creates an array type with the given element type.
    #[must_use]
    pub fn array(element: Type) -> Self {
        Self::Array(Box::new(element))
    }

    /// Creates a map type with the given key and value types.
    #[must_use]
    pub fn map(key: Type, value: Type) -> Self {
        Self::Map(Box::new(key), Box::new(value))
    }

    /// Creates an optional type.
    #[must_use]
    pub fn option(inner: Type) -> Self {
        Self::Option(Box::new(inner))
    }

    /// Creates a type variable.
    #[must_use]
    pub fn param(name: impl Into<String>) -> Self {
        Self::Param(name.into())
    }

    /// Returns true for lists, sets, and arrays.
    #[must_use]
    pub fn is_collection_like(&self) -> bool {
        match self {
            Self::List(_) | Self::Set(_) | Self::Array(_) => true,
            Self::Option(inner) => inner.is_collection_like(),
            _ => false,
        }
    }

    /// Returns true for maps.
    #[must_use]
    pub fn is_map(&self) -> bool {
        match self {
            Self::Map(_, _) => true,
            Self::Option(inner) => inner.is_map(),
            _ => false,
        }
    }

    /// Returns true for arrays.
    #[must_use]
    pub fn is_array(&self) -> bool {
        match self {
            Self::Array(_) => true,
            Self::Option(inner) => inner.is_array(),
            _ => false,
        }
    }

    /// Returns true for nullable wrappers.
    #[must_use]
    pub const fn is_option(&self) -> bool {
        matches!(self, Self::Option(_))
    }

    /// Returns true for geospatial shapes.
    #[must_use]
    pub fn is_geospatial(&self) -> bool {
        match self {
            Self::Point | Self::GeoBox | Self::Circle | Self::Polygon | Self::Distance => true,
            Self::Option(inner) => inner.is_geospatial(),
            _ => false,
        }
    }

    /// Returns true for types that carry no nested properties.
    #[must_use]
    pub fn is_simple(&self) -> bool {
        match self {
            Self::Struct(_) | Self::Param(_) => false,
            Self::List(inner) | Self::Set(inner) | Self::Array(inner) | Self::Option(inner) => {
                inner.is_simple()
            }
            Self::Map(_, value) => value.is_simple(),
            _ => true,
        }
    }

    /// Returns the type a path hop continues with.
    ///
    /// - Collections and arrays yield their component type
    /// - Maps yield their value type
    /// - Optional wrappers are unwrapped
    /// - Everything else yields itself
    #[must_use]
    pub fn actual_type(&self) -> &Type {
        match self {
            Self::Option(inner) => inner.actual_type(),
            Self::List(inner) | Self::Set(inner) | Self::Array(inner) | Self::Map(_, inner) => {
                inner.unwrap_option()
            }
            _ => self,
        }
    }

    /// Strips nullable wrappers.
    #[must_use]
    pub fn unwrap_option(&self) -> &Type {
        match self {
            Self::Option(inner) => inner.unwrap_option(),
            _ => self,
        }
    }

    /// Returns the structured type name, if this is a structured type.
    #[must_use]
    pub fn struct_name(&self) -> Option<&TypeName> {
        match self {
            Self::Struct(name) => Some(name),
            _ => None,
        }
    }

    /// Returns the first unbound type variable inside this type.
    #[must_use]
    pub fn unresolved_param(&self) -> Option<&str> {
        match self {
            Self::Param(name) => Some(name),
            Self::List(inner) | Self::Set(inner) | Self::Array(inner) | Self::Option(inner) => {
                inner.unresolved_param()
            }
            Self::Map(key, value) => key.unresolved_param().or_else(|| value.unresolved_param()),
            _ => None,
        }
    }

    /// Replaces type variables with their bound types.
    ///
    /// Variables without a binding are left untouched.
    #[must_use]
    pub fn substitute(&self, bindings: &[(String, Type)]) -> Type {
        match self {
            Self::Param(name) => bindings
                .iter()
                .find(|(param, _)| param == name)
                .map_or_else(|| self.clone(), |(_, bound)| bound.clone()),
            Self::List(inner) => Self::list(inner.substitute(bindings)),
            Self::Set(inner) => Self::set(inner.substitute(bindings)),
            Self::Array(inner) => Self::array(inner.substitute(bindings)),
            Self::Option(inner) => Self::option(inner.substitute(bindings)),
            Self::Map(key, value) => Self::map(key.substitute(bindings), value.substitute(bindings)),
            _ => self.clone(),
        }
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => write!(f, "bool"),
            Self::Int => write!(f, "int"),
            Self::Long => write!(f, "long"),
            Self::Float => write!(f, "float"),
            Self::Double => write!(f, "double"),
            Self::Decimal => write!(f, "decimal"),
            Self::String => write!(f, "string"),
            Self::Char => write!(f, "char"),
            Self::Bytes => write!(f, "bytes"),
            Self::Date => write!(f, "date"),
            Self::DateTime => write!(f, "datetime"),
            Self::Uuid => write!(f, "uuid"),
            Self::Point => write!(f, "point"),
            Self::GeoBox => write!(f, "box"),
            Self::Circle => write!(f, "circle"),
            Self::Polygon => write!(f, "polygon"),
            Self::Distance => write!(f, "distance"),
            Self::Enum(name) | Self::Struct(name) => write!(f, "{name}"),
            Self::List(t) => write!(f, "list<{t:?}>"),
            Self::Set(t) => write!(f, "set<{t:?}>"),
            Self::Array(t) => write!(f, "array<{t:?}>"),
            Self::Map(k, v) => write!(f, "map<{k:?}, {v:?}>"),
            Self::Option(t) => write!(f, "option<{t:?}>"),
            Self::Param(name) => write!(f, "{name}"),
            Self::Any => write!(f, "any"),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
