//! Value conversion at the metadata boundary.
//!
//! Conversions are only used when raw stored values meet mapping metadata,
//! such as matching a stored type alias or coercing an identifier.

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::types::Type;
use crate::value::Value;

/// Coerces raw values to requested target types.
pub trait ConversionService: Send + Sync {
    /// Returns true if `value` can be converted to `target`.
    fn can_convert(&self, value: &Value, target: &Type) -> bool;

    /// Converts `value` to `target`.
    ///
    /// # Errors
    ///
    /// Returns a conversion error if the value cannot be represented as the
    /// target type.
    fn convert(&self, value: &Value, target: &Type) -> Result<Value>;
}

/// Conversions between strings, integers, floats, and booleans.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultConversionService;

/// `i64::MIN` as a float; exact.
const I64_FLOAT_START: f64 = -9_223_372_036_854_775_808.0;
/// `i64::MAX + 1` as a float; the first value past the integer range.
const I64_FLOAT_END: f64 = 9_223_372_036_854_775_808.0;

impl DefaultConversionService {
    /// Creates the default conversion service.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn convert_to_integer(value: &Value, target: &Type) -> Result<Value> {
        let converted = match value {
            Value::Int(n) => Some(*n),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            Value::Bool(b) => Some(i64::from(*b)),
            #[allow(clippy::cast_possible_truncation)]
            Value::Float(n) if n.fract() == 0.0 && (I64_FLOAT_START..I64_FLOAT_END).contains(n) => {
                Some(*n as i64)
            }
            _ => None,
        };
        let n = converted.ok_or_else(|| Error::conversion(format!("{value:?}"), target.clone()))?;
        if matches!(target, Type::Int) && i32::try_from(n).is_err() {
            return Err(Error::conversion(format!("{value:?}"), target.clone()));
        }
        Ok(Value::Int(n))
    }

    fn convert_to_float(value: &Value, target: &Type) -> Result<Value> {
        #[allow(clippy::cast_precision_loss)]
        let converted = match value {
            Value::Float(n) => Some(*n),
            Value::Int(n) => Some(*n as f64),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        converted
            .map(Value::Float)
            .ok_or_else(|| Error::conversion(format!("{value:?}"), target.clone()))
    }

    fn convert_to_bool(value: &Value, target: &Type) -> Result<Value> {
        let converted = match value {
            Value::Bool(b) => Some(*b),
            Value::Int(0) => Some(false),
            Value::Int(1) => Some(true),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "on" | "1" => Some(true),
                "false" | "no" | "off" | "0" => Some(false),
                _ => None,
            },
            _ => None,
        };
        converted
            .map(Value::Bool)
            .ok_or_else(|| Error::conversion(format!("{value:?}"), target.clone()))
    }

    fn convert_to_string(value: &Value, target: &Type) -> Result<Value> {
        match value {
            Value::String(_) => Ok(value.clone()),
            Value::Bool(_) | Value::Int(_) | Value::Float(_) => Ok(Value::from(value.to_string())),
            Value::Null | Value::Bytes(_) => {
                Err(Error::conversion(format!("{value:?}"), target.clone()))
            }
        }
    }
}

impl ConversionService for DefaultConversionService {
    fn can_convert(&self, value: &Value, target: &Type) -> bool {
        self.convert(value, target).is_ok()
    }

    fn convert(&self, value: &Value, target: &Type) -> Result<Value> {
        match (value, target) {
            (Value::Null, Type::Option(_) | Type::Any) => Ok(Value::Null),
            (Value::Null, _) => Err(Error::conversion("null", target.clone())),
            (_, Type::Option(inner)) => self.convert(value, inner),
            (_, Type::Any) => Ok(value.clone()),
            (_, Type::Int | Type::Long) => Self::convert_to_integer(value, target),
            (_, Type::Float | Type::Double | Type::Decimal) => Self::convert_to_float(value, target),
            (_, Type::Bool) => Self::convert_to_bool(value, target),
            (_, Type::String | Type::Char | Type::Uuid | Type::Enum(_)) => {
                Self::convert_to_string(value, target)
            }
            (Value::Bytes(_), Type::Bytes) => Ok(value.clone()),
            _ => Err(Error::conversion(format!("{value:?}"), target.clone())),
        }
    }
}

/// Shared handle to a conversion service.
pub type SharedConversionService = Arc<dyn ConversionService>;
