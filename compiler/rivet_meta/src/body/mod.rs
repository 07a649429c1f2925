//! Member bodies, tagged by calling convention.
//!
//! The body variant fixes how a compiled invoker hands over the receiver:
//! static members and constructors get none, reference-type members get the
//! narrowed object, value-type members get the receiver's storage location.

use std::fmt;
use std::sync::Arc;

use rivet_value::{type_mismatch, FromValue, InvokeResult, MismatchSite, ObjectRef, StructValue, Value};

/// Static method, static accessor or constructor.
pub type StaticFn = dyn Fn(&Args<'_>) -> InvokeResult + Send + Sync;
/// Instance member of a reference type.
pub type ReferenceFn = dyn Fn(&ObjectRef, &Args<'_>) -> InvokeResult + Send + Sync;
/// Instance member of a value type; mutations land in the caller's slot.
pub type ValueFn = dyn Fn(&mut StructValue, &Args<'_>) -> InvokeResult + Send + Sync;

/// The implementation behind a member descriptor.
#[derive(Clone)]
pub enum MemberBody {
    Static(Arc<StaticFn>),
    Constructor(Arc<StaticFn>),
    Reference(Arc<ReferenceFn>),
    Value(Arc<ValueFn>),
}

impl MemberBody {
    pub fn new_static(f: impl Fn(&Args<'_>) -> InvokeResult + Send + Sync + 'static) -> Self {
        MemberBody::Static(Arc::new(f))
    }

    pub fn constructor(f: impl Fn(&Args<'_>) -> InvokeResult + Send + Sync + 'static) -> Self {
        MemberBody::Constructor(Arc::new(f))
    }

    pub fn reference(
        f: impl Fn(&ObjectRef, &Args<'_>) -> InvokeResult + Send + Sync + 'static,
    ) -> Self {
        MemberBody::Reference(Arc::new(f))
    }

    pub fn value(
        f: impl Fn(&mut StructValue, &Args<'_>) -> InvokeResult + Send + Sync + 'static,
    ) -> Self {
        MemberBody::Value(Arc::new(f))
    }

    /// Whether the body consumes no receiver.
    #[inline]
    pub fn is_static(&self) -> bool {
        matches!(self, MemberBody::Static(_))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MemberBody::Static(_) => "static",
            MemberBody::Constructor(_) => "constructor",
            MemberBody::Reference(_) => "reference-receiver",
            MemberBody::Value(_) => "value-receiver",
        }
    }
}

impl fmt::Debug for MemberBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MemberBody::{}", self.as_str())
    }
}

/// Read-only view of the converted arguments handed to a body.
#[derive(Clone, Copy, Debug)]
pub struct Args<'a> {
    values: &'a [Value],
}

impl<'a> Args<'a> {
    #[inline]
    pub fn new(values: &'a [Value]) -> Self {
        Self { values }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn value(&self, index: usize) -> Option<&'a Value> {
        self.values.get(index)
    }

    pub fn as_slice(&self) -> &'a [Value] {
        self.values
    }

    /// Typed argument access.
    ///
    /// Arguments were already checked against the declared parameter types,
    /// so this only fails when a body disagrees with its own descriptor.
    pub fn get<T: FromValue>(&self, index: usize) -> InvokeResult<T> {
        let site = MismatchSite::Argument(index);
        match self.values.get(index) {
            Some(value) => {
                T::from_value(value).ok_or_else(|| type_mismatch(site, T::EXPECTED, value.type_name()))
            }
            None => Err(type_mismatch(site, T::EXPECTED, "nothing")),
        }
    }
}

#[cfg(test)]
mod tests;
