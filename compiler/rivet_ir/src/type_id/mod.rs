//! Interned type identifier.
//!
//! - `TypeId(u32)` for O(1) equality comparison
//! - Pre-interned primitive types with fixed indices
//! - User types are allocated from `FIRST_USER` upwards by the type table

use std::fmt;

use crate::TypeKind;

/// Interned nominal type identifier.
///
/// # Pre-interned Types
/// Primitive types have fixed indices below `FIRST_USER`:
/// - value types: VOID, BOOL, INT, FLOAT, CHAR, BYTE
/// - reference types: STR, OBJECT (the root of every reference type)
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct TypeId(u32);

impl TypeId {
    /// The "no value" type of void methods and property setters.
    pub const VOID: TypeId = TypeId(0);
    pub const BOOL: TypeId = TypeId(1);
    pub const INT: TypeId = TypeId(2);
    pub const FLOAT: TypeId = TypeId(3);
    pub const CHAR: TypeId = TypeId(4);
    pub const BYTE: TypeId = TypeId(5);
    pub const STR: TypeId = TypeId(6);
    /// Root reference type; every non-void value is assignable to it.
    pub const OBJECT: TypeId = TypeId(7);

    /// First index handed out for user-defined types.
    pub const FIRST_USER: u32 = 8;

    /// All pre-interned primitives in index order.
    pub const PRIMITIVES: [TypeId; 8] = [
        Self::VOID,
        Self::BOOL,
        Self::INT,
        Self::FLOAT,
        Self::CHAR,
        Self::BYTE,
        Self::STR,
        Self::OBJECT,
    ];

    #[inline]
    pub const fn new(index: u32) -> Self {
        TypeId(index)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_primitive(self) -> bool {
        self.0 < Self::FIRST_USER
    }

    #[inline]
    pub const fn is_void(self) -> bool {
        self.0 == Self::VOID.0
    }

    /// Source-level name of a primitive type, `None` for user types.
    pub const fn primitive_name(self) -> Option<&'static str> {
        match self {
            Self::VOID => Some("void"),
            Self::BOOL => Some("bool"),
            Self::INT => Some("int"),
            Self::FLOAT => Some("float"),
            Self::CHAR => Some("char"),
            Self::BYTE => Some("byte"),
            Self::STR => Some("str"),
            Self::OBJECT => Some("object"),
            _ => None,
        }
    }

    /// Value/reference semantics of a primitive type, `None` for user types.
    pub const fn primitive_kind(self) -> Option<TypeKind> {
        match self {
            Self::VOID | Self::BOOL | Self::INT | Self::FLOAT | Self::CHAR | Self::BYTE => {
                Some(TypeKind::Value)
            }
            Self::STR | Self::OBJECT => Some(TypeKind::Reference),
            _ => None,
        }
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.primitive_name() {
            Some(name) => write!(f, "TypeId::{}", name.to_ascii_uppercase()),
            None => write!(f, "TypeId({})", self.0),
        }
    }
}
