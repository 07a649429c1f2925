//! Value vs reference semantics of a nominal type.

use bitflags::bitflags;

/// How instances of a type flow through the generic value channel.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum TypeKind {
    /// Copied on assignment; instance members receive the storage location.
    Value,
    /// Shared by reference; compared by identity.
    Reference,
}

impl TypeKind {
    #[inline]
    pub const fn is_value(self) -> bool {
        matches!(self, Self::Value)
    }

    #[inline]
    pub const fn is_reference(self) -> bool {
        matches!(self, Self::Reference)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Value => "value type",
            Self::Reference => "reference type",
        }
    }
}

bitflags! {
    /// Per-type attributes consulted by the invoker compiler.
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
    pub struct TypeFlags: u8 {
        /// No subtype can override this type's members.
        ///
        /// Value types are always sealed.
        const SEALED = 1 << 0;
        /// Reference type that rejects `null`.
        const NON_NULLABLE = 1 << 1;
    }
}
