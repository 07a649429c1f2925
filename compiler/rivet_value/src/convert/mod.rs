//! Checked extraction of concrete Rust values from the generic channel.

use crate::value::{ObjectRef, StructValue, Value};

/// A Rust type that can be unboxed from a `Value`.
///
/// Extraction is exact: an `Int` never reads as `f64`. Widening, where
/// enabled, is the compiled invoker's job, not this trait's.
pub trait FromValue: Sized {
    /// Type name used in mismatch messages.
    const EXPECTED: &'static str;

    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for Value {
    const EXPECTED: &'static str = "value";

    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

impl FromValue for bool {
    const EXPECTED: &'static str = "bool";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

impl FromValue for i64 {
    const EXPECTED: &'static str = "int";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_int()
    }
}

impl FromValue for f64 {
    const EXPECTED: &'static str = "float";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_float()
    }
}

impl FromValue for char {
    const EXPECTED: &'static str = "char";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Char(c) => Some(*c),
            _ => None,
        }
    }
}

impl FromValue for u8 {
    const EXPECTED: &'static str = "byte";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Byte(b) => Some(*b),
            _ => None,
        }
    }
}

impl FromValue for String {
    const EXPECTED: &'static str = "str";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_owned)
    }
}

impl FromValue for StructValue {
    const EXPECTED: &'static str = "struct";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_struct().cloned()
    }
}

impl FromValue for ObjectRef {
    const EXPECTED: &'static str = "object";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_object().cloned()
    }
}

/// Nullable extraction: `Null` reads as `None`.
impl<T: FromValue> FromValue for Option<T> {
    const EXPECTED: &'static str = T::EXPECTED;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(None),
            other => T::from_value(other).map(Some),
        }
    }
}
