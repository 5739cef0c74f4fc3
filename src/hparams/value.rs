//! Hyperparameter value type

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single hyperparameter (or derived state / report) value.
///
/// Strings are `Cow<'static, str>` so strategy default tables can be
/// declared as constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HyperValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Cow<'static, str>),
}

impl HyperValue {
    /// Borrowed string value, usable in `const` tables.
    pub const fn text(s: &'static str) -> Self {
        HyperValue::Str(Cow::Borrowed(s))
    }

    /// Name of the value kind, as shown in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            HyperValue::Bool(_) => "bool",
            HyperValue::Int(_) => "int",
            HyperValue::Float(_) => "float",
            HyperValue::Str(_) => "string",
        }
    }

    /// Get as float (converts int to float if needed)
    pub fn as_float(&self) -> Option<f64> {
        match self {
            HyperValue::Float(v) => Some(*v),
            HyperValue::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Get as int
    pub fn as_int(&self) -> Option<i64> {
        match self {
            HyperValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            HyperValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            HyperValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Convert `value` to the kind of `self`, for overwriting `self`.
    ///
    /// Kinds must match, except that an int may replace a float.
    pub(crate) fn coerce(&self, key: &str, value: &HyperValue) -> crate::Result<HyperValue> {
        match (self, value) {
            (HyperValue::Float(_), HyperValue::Int(v)) => Ok(HyperValue::Float(*v as f64)),
            (HyperValue::Bool(_), HyperValue::Bool(_))
            | (HyperValue::Int(_), HyperValue::Int(_))
            | (HyperValue::Float(_), HyperValue::Float(_))
            | (HyperValue::Str(_), HyperValue::Str(_)) => Ok(value.clone()),
            _ => Err(crate::ModifierError::TypeMismatch {
                key: key.to_string(),
                expected: self.kind_name(),
                found: value.kind_name(),
            }),
        }
    }
}

impl fmt::Display for HyperValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HyperValue::Bool(v) => write!(f, "{v}"),
            HyperValue::Int(v) => write!(f, "{v}"),
            HyperValue::Float(v) => write!(f, "{v}"),
            HyperValue::Str(s) => write!(f, "{s}"),
        }
    }
}

impl From<f64> for HyperValue {
    fn from(v: f64) -> Self {
        HyperValue::Float(v)
    }
}

impl From<i64> for HyperValue {
    fn from(v: i64) -> Self {
        HyperValue::Int(v)
    }
}

impl From<bool> for HyperValue {
    fn from(v: bool) -> Self {
        HyperValue::Bool(v)
    }
}

impl From<&str> for HyperValue {
    fn from(v: &str) -> Self {
        HyperValue::Str(Cow::Owned(v.to_string()))
    }
}

impl From<String> for HyperValue {
    fn from(v: String) -> Self {
        HyperValue::Str(Cow::Owned(v))
    }
}
