//! Member descriptors: resolved, immutable descriptions of callable members.

use std::sync::Arc;

use rivet_ir::{MemberKind, Name, TypeId, TypeKind};

use crate::{MemberBody, ParamList};

/// Override slot of a member: kind, name and exact parameter types.
///
/// An override in a derived type has the same signature as the member it
/// replaces.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Signature {
    pub kind: MemberKind,
    pub name: Name,
    pub params: ParamList,
}

impl Signature {
    pub fn new(kind: MemberKind, name: Name, params: &[TypeId]) -> Self {
        Self {
            kind,
            name,
            params: params.iter().copied().collect(),
        }
    }
}

/// Structural identity of a descriptor, used as the invoker cache key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MemberKey {
    pub declaring_type: TypeId,
    pub is_static: bool,
    pub signature: Signature,
}

/// Inputs for `MemberDescriptor::from_parts`.
pub struct DescriptorParts {
    pub kind: MemberKind,
    pub name: Name,
    pub declaring_type: TypeId,
    pub receiver_kind: TypeKind,
    pub is_static: bool,
    pub params: ParamList,
    /// `TypeId::VOID` for void methods and setters.
    pub return_type: TypeId,
    pub body: MemberBody,
}

/// Resolved description of one callable member.
///
/// Immutable once built. The parameter count is fixed and must match the
/// argument container at every invocation.
#[derive(Debug)]
pub struct MemberDescriptor {
    kind: MemberKind,
    name: Name,
    declaring_type: TypeId,
    receiver_kind: TypeKind,
    is_static: bool,
    params: ParamList,
    return_type: TypeId,
    body: MemberBody,
}

impl MemberDescriptor {
    pub fn from_parts(parts: DescriptorParts) -> Arc<Self> {
        Arc::new(Self {
            kind: parts.kind,
            name: parts.name,
            declaring_type: parts.declaring_type,
            receiver_kind: parts.receiver_kind,
            is_static: parts.is_static,
            params: parts.params,
            return_type: parts.return_type,
            body: parts.body,
        })
    }

    #[inline]
    pub fn kind(&self) -> MemberKind {
        self.kind
    }

    #[inline]
    pub fn name(&self) -> Name {
        self.name
    }

    #[inline]
    pub fn declaring_type(&self) -> TypeId {
        self.declaring_type
    }

    /// Value or reference semantics of the declaring type.
    #[inline]
    pub fn receiver_kind(&self) -> TypeKind {
        self.receiver_kind
    }

    #[inline]
    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub fn params(&self) -> &[TypeId] {
        &self.params
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    #[inline]
    pub fn return_type(&self) -> TypeId {
        self.return_type
    }

    #[inline]
    pub fn returns_void(&self) -> bool {
        self.return_type.is_void()
    }

    pub fn body(&self) -> &MemberBody {
        &self.body
    }

    /// Whether invocations consume a receiver.
    #[inline]
    pub fn takes_receiver(&self) -> bool {
        self.kind.takes_receiver(self.is_static)
    }

    pub fn signature(&self) -> Signature {
        Signature {
            kind: self.kind,
            name: self.name,
            params: self.params.clone(),
        }
    }

    pub fn key(&self) -> MemberKey {
        MemberKey {
            declaring_type: self.declaring_type,
            is_static: self.is_static,
            signature: self.signature(),
        }
    }
}

/// A property: a name, a type, and up to two accessors.
#[derive(Clone, Debug)]
pub struct PropertyInfo {
    pub name: Name,
    pub property_type: TypeId,
    pub getter: Option<Arc<MemberDescriptor>>,
    pub setter: Option<Arc<MemberDescriptor>>,
}

impl PropertyInfo {
    pub fn new(name: Name, property_type: TypeId) -> Self {
        Self {
            name,
            property_type,
            getter: None,
            setter: None,
        }
    }

    #[inline]
    pub fn can_read(&self) -> bool {
        self.getter.is_some()
    }

    #[inline]
    pub fn can_write(&self) -> bool {
        self.setter.is_some()
    }
}
