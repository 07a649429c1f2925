//! Runtime values for compiled invokers.
//!
//! # Heap Enforcement
//!
//! Shared immutable payloads (strings) go through `Heap<T>`, whose constructor
//! is private to this module, so they can only be created through the
//! `Value::` factory methods:
//!
//! ```text
//! let s = Value::string("hello");             // OK
//! let s = Value::Str(Heap::new(...));         // ERROR: Heap::new is pub(super)
//! ```
//!
//! # Value vs Reference Kinds
//!
//! - `Struct` holds a value-type instance; cloning copies its fields.
//! - `Object` holds a reference-type instance; cloning aliases it and
//!   equality is identity.

mod composite;
mod heap;

use std::fmt;

use rivet_ir::TypeId;

pub use composite::{ObjectRef, StructValue};
pub use heap::Heap;

/// Generic value passed through an invoker's uniform signature.
#[derive(Clone)]
pub enum Value {
    /// The "no value" sentinel returned by void methods and setters.
    Void,
    /// An absent reference.
    Null,

    // Primitive value types (inline, no heap allocation)
    Bool(bool),
    Int(i64),
    Float(f64),
    Char(char),
    Byte(u8),

    // Reference types
    /// Immutable string.
    Str(Heap<String>),
    /// Instance of a user reference type.
    Object(ObjectRef),

    /// Instance of a user value type, boxed into the generic channel.
    Struct(StructValue),
}

// Factory Methods

impl Value {
    #[inline]
    pub fn int(n: i64) -> Self {
        Value::Int(n)
    }

    /// Create a string value.
    ///
    /// ```text
    /// let s = Value::string("hello");
    /// let s2 = Value::string(format!("value: {}", x));
    /// ```
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    /// Create a new value-type instance.
    #[inline]
    pub fn new_struct(type_id: TypeId, fields: Vec<Value>) -> Self {
        Value::Struct(StructValue::new(type_id, fields))
    }

    /// Allocate a new reference-type instance.
    #[inline]
    pub fn new_object(type_id: TypeId, fields: Vec<Value>) -> Self {
        Value::Object(ObjectRef::new(type_id, fields))
    }
}

// Value Methods

impl Value {
    /// Runtime type of this value, `None` for `Null`.
    pub fn type_id(&self) -> Option<TypeId> {
        match self {
            Value::Void => Some(TypeId::VOID),
            Value::Null => None,
            Value::Bool(_) => Some(TypeId::BOOL),
            Value::Int(_) => Some(TypeId::INT),
            Value::Float(_) => Some(TypeId::FLOAT),
            Value::Char(_) => Some(TypeId::CHAR),
            Value::Byte(_) => Some(TypeId::BYTE),
            Value::Str(_) => Some(TypeId::STR),
            Value::Object(obj) => Some(obj.type_id()),
            Value::Struct(s) => Some(s.type_id()),
        }
    }

    /// Get the type name for error messages.
    ///
    /// User types render as their kind; callers with access to a type table
    /// should prefer the table's name for `Struct` and `Object`.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Void => "void",
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Char(_) => "char",
            Value::Byte(_) => "byte",
            Value::Str(_) => "str",
            Value::Object(_) => "object",
            Value::Struct(_) => "struct",
        }
    }

    #[inline]
    pub fn is_void(&self) -> bool {
        matches!(self, Value::Void)
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn as_struct(&self) -> Option<&StructValue> {
        match self {
            Value::Struct(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_struct_mut(&mut self) -> Option<&mut StructValue> {
        match self {
            Value::Struct(s) => Some(s),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Void, Value::Void) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Byte(a), Value::Byte(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            (Value::Struct(a), Value::Struct(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Void => write!(f, "Void"),
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Float(x) => write!(f, "Float({x})"),
            Value::Char(c) => write!(f, "Char({c:?})"),
            Value::Byte(b) => write!(f, "Byte(0x{b:02x})"),
            Value::Str(s) => write!(f, "Str({:?})", &**s),
            Value::Object(obj) => write!(f, "{obj:?}"),
            Value::Struct(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Char(c)
    }
}

impl From<u8> for Value {
    fn from(b: u8) -> Self {
        Value::Byte(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<StructValue> for Value {
    fn from(s: StructValue) -> Self {
        Value::Struct(s)
    }
}

impl From<ObjectRef> for Value {
    fn from(obj: ObjectRef) -> Self {
        Value::Object(obj)
    }
}
