//! Instances of user-defined value and reference types.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use rivet_ir::TypeId;

use super::Value;
use crate::errors::field_type_mismatch;
use crate::{FromValue, InvokeResult};

/// Instance of a user value type.
///
/// Owns its fields: cloning produces an independent copy, which is what
/// by-value argument passing and constructor results rely on. Instance
/// members receive `&mut StructValue` pointing into the caller's storage.
#[derive(Clone, Debug, PartialEq)]
pub struct StructValue {
    type_id: TypeId,
    fields: Vec<Value>,
}

impl StructValue {
    pub fn new(type_id: TypeId, fields: Vec<Value>) -> Self {
        Self { type_id, fields }
    }

    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn fields(&self) -> &[Value] {
        &self.fields
    }

    pub fn field(&self, index: usize) -> Option<&Value> {
        self.fields.get(index)
    }

    pub fn field_mut(&mut self, index: usize) -> Option<&mut Value> {
        self.fields.get_mut(index)
    }

    /// Typed read of a field.
    pub fn get<T: FromValue>(&self, index: usize) -> InvokeResult<T> {
        read_field(self.fields.get(index), index)
    }

    /// Overwrite a field, returning `false` if the index is out of range.
    pub fn set_field(&mut self, index: usize, value: impl Into<Value>) -> bool {
        match self.fields.get_mut(index) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    pub fn into_fields(self) -> Vec<Value> {
        self.fields
    }
}

fn read_field<T: FromValue>(value: Option<&Value>, index: usize) -> InvokeResult<T> {
    match value {
        Some(value) => T::from_value(value)
            .ok_or_else(|| field_type_mismatch(index, T::EXPECTED, value.type_name())),
        None => Err(field_type_mismatch(index, T::EXPECTED, "nothing")),
    }
}

struct ObjectData {
    type_id: TypeId,
    fields: RwLock<Vec<Value>>,
}

/// Handle to an instance of a user reference type.
///
/// Cloning aliases the same instance; equality is identity. Field access is
/// guarded by a `RwLock`, so concurrent calls on one object have exactly the
/// thread-safety of the member bodies that touch it.
#[derive(Clone)]
pub struct ObjectRef(Arc<ObjectData>);

impl ObjectRef {
    pub fn new(type_id: TypeId, fields: Vec<Value>) -> Self {
        ObjectRef(Arc::new(ObjectData {
            type_id,
            fields: RwLock::new(fields),
        }))
    }

    /// Runtime (most-derived) type of the instance.
    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.0.type_id
    }

    /// Reference identity.
    #[inline]
    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub fn field_count(&self) -> usize {
        self.0.fields.read().len()
    }

    /// Copy of a field's current value.
    pub fn field(&self, index: usize) -> Option<Value> {
        self.0.fields.read().get(index).cloned()
    }

    /// Typed read of a field.
    pub fn get<T: FromValue>(&self, index: usize) -> InvokeResult<T> {
        read_field(self.0.fields.read().get(index), index)
    }

    /// Overwrite a field, returning `false` if the index is out of range.
    pub fn set_field(&self, index: usize, value: impl Into<Value>) -> bool {
        match self.0.fields.write().get_mut(index) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    /// Run `f` with shared access to all fields.
    pub fn read_fields<R>(&self, f: impl FnOnce(&[Value]) -> R) -> R {
        f(&self.0.fields.read())
    }

    /// Run `f` with exclusive access to all fields.
    pub fn write_fields<R>(&self, f: impl FnOnce(&mut [Value]) -> R) -> R {
        f(&mut self.0.fields.write())
    }
}

impl fmt::Debug for ObjectRef {
    // Fields are not printed: objects may reference themselves.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Object({:?} @ {:p})", self.0.type_id, Arc::as_ptr(&self.0))
    }
}

#[cfg(test)]
mod tests;
