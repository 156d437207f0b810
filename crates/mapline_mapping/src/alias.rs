//! Type aliases stored alongside entity instances.

use std::fmt;

use mapline_foundation::{ConversionService, Value};

/// The alias an entity is stored under, or none.
///
/// Asking an entity for its alias never fails; entities without one report
/// [`Alias::None`].
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Alias {
    /// No alias is declared.
    #[default]
    None,
    /// The declared alias value.
    Of(Value),
}

impl Alias {
    /// Creates an alias from an optional declared value. `Null` counts as absent.
    #[must_use]
    pub fn of_optional(value: Option<Value>) -> Self {
        match value {
            Some(value) if !value.is_null() => Self::Of(value),
            _ => Self::None,
        }
    }

    /// Returns true if an alias is declared.
    #[must_use]
    pub const fn is_present(&self) -> bool {
        matches!(self, Self::Of(_))
    }

    /// The alias value, if declared.
    #[must_use]
    pub const fn value(&self) -> Option<&Value> {
        match self {
            Self::None => None,
            Self::Of(value) => Some(value),
        }
    }

    /// Returns true if the declared alias equals `value` exactly.
    #[must_use]
    pub fn has_value(&self, value: &Value) -> bool {
        self.value() == Some(value)
    }

    /// Returns true if a raw stored value denotes this alias once converted
    /// to the alias' own type.
    pub fn matches(&self, raw: &Value, conversions: &dyn ConversionService) -> bool {
        let Some(alias) = self.value() else {
            return false;
        };
        if alias == raw {
            return true;
        }
        conversions
            .convert(raw, &alias.value_type())
            .is_ok_and(|converted| converted == *alias)
    }
}

impl From<Value> for Alias {
    fn from(value: Value) -> Self {
        Self::of_optional(Some(value))
    }
}

impl fmt::Display for Alias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "<none>"),
            Self::Of(value) => write!(f, "{value:?}"),
        }
    }
}
