use alloc::string::String;
use core::fmt;

use serde_json::{Map, Value};

use crate::error::DecodeError;
use crate::info::TypeTag;

// -----------------------------------------------------------------------------
// NodeKind

/// The shape of a tree node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl NodeKind {
    /// Classifies `value`.
    pub const fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Bool,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.pad("null"),
            Self::Bool => f.pad("a boolean"),
            Self::Number => f.pad("a number"),
            Self::String => f.pad("a string"),
            Self::Array => f.pad("an array"),
            Self::Object => f.pad("an object"),
        }
    }
}

// -----------------------------------------------------------------------------
// Helpers

/// Returns the entries of an object node, or [`DecodeError::TypeMismatch`].
///
/// # Examples
///
/// ```
/// use mx_marshal::codec::{NodeKind, expect_object};
/// use mx_marshal::error::DecodeError;
/// use mx_marshal::info::TypeTag;
/// use serde_json::json;
///
/// assert!(expect_object(&json!({ "x": 1 }), TypeTag::of::<()>()).is_ok());
///
/// let err = expect_object(&json!([1, 2]), TypeTag::of::<()>()).unwrap_err();
/// assert!(matches!(err, DecodeError::TypeMismatch { found: NodeKind::Array, .. }));
/// ```
pub fn expect_object(value: &Value, expected: TypeTag) -> Result<&Map<String, Value>, DecodeError> {
    match value {
        Value::Object(object) => Ok(object),
        other => Err(DecodeError::TypeMismatch {
            expected,
            found: NodeKind::of(other),
        }),
    }
}

/// `null` and `[]`, the values dropped when nulls are not serialized.
#[inline]
pub(crate) fn is_omissible(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

// -----------------------------------------------------------------------------
// Tests
