//! Typed facades over compiled invokers.
//!
//! Thin wrappers that give each member kind its natural call shape and own
//! the kind-specific checks (property capabilities, placeholder receivers).
//! Each facade compiles eagerly, so a facade that exists is callable.

use std::sync::Arc;

use rivet_ir::MemberKind;
use rivet_meta::{MemberDescriptor, PropertyInfo};
use rivet_value::{
    invalid_operation, read_only_property, write_only_property, InvokeResult, Value,
};

use crate::{CompiledInvoker, Receiver, Reflector};

fn expect_kind(descriptor: &MemberDescriptor, kind: MemberKind, facade: &str) -> InvokeResult<()> {
    if descriptor.kind() == kind {
        Ok(())
    } else {
        Err(invalid_operation(format!(
            "{facade} needs a {kind} descriptor, got a {}",
            descriptor.kind()
        )))
    }
}

/// Invokes a method.
#[derive(Clone, Debug)]
pub struct MethodInvoker {
    invoker: Arc<CompiledInvoker>,
}

impl MethodInvoker {
    pub fn new(reflector: &Reflector, descriptor: Arc<MemberDescriptor>) -> InvokeResult<Self> {
        expect_kind(&descriptor, MemberKind::Method, "MethodInvoker")?;
        Ok(Self {
            invoker: reflector.invoker(&descriptor)?,
        })
    }

    /// Call the method. Static methods ignore `receiver`.
    pub fn call(&self, receiver: Receiver<'_>, args: &[Value]) -> InvokeResult {
        let receiver = if self.invoker.descriptor().is_static() {
            Receiver::Absent
        } else {
            receiver
        };
        self.invoker.invoke(receiver, args)
    }

    pub fn call_static(&self, args: &[Value]) -> InvokeResult {
        self.invoker.invoke(Receiver::Absent, args)
    }

    pub fn descriptor(&self) -> &Arc<MemberDescriptor> {
        self.invoker.descriptor()
    }

    pub fn invoker(&self) -> &Arc<CompiledInvoker> {
        &self.invoker
    }
}

/// Invokes a constructor.
#[derive(Clone, Debug)]
pub struct ConstructorInvoker {
    invoker: Arc<CompiledInvoker>,
}

impl ConstructorInvoker {
    pub fn new(reflector: &Reflector, descriptor: Arc<MemberDescriptor>) -> InvokeResult<Self> {
        expect_kind(&descriptor, MemberKind::Constructor, "ConstructorInvoker")?;
        Ok(Self {
            invoker: reflector.invoker(&descriptor)?,
        })
    }

    /// Create a new instance.
    pub fn call(&self, args: &[Value]) -> InvokeResult {
        self.invoker.invoke(Receiver::Absent, args)
    }

    pub fn descriptor(&self) -> &Arc<MemberDescriptor> {
        self.invoker.descriptor()
    }
}

/// Reads and writes a property.
#[derive(Clone, Debug)]
pub struct PropertyInvoker {
    getter: Option<Arc<CompiledInvoker>>,
    setter: Option<Arc<CompiledInvoker>>,
}

impl PropertyInvoker {
    pub fn new(reflector: &Reflector, property: &PropertyInfo) -> InvokeResult<Self> {
        let getter = property
            .getter
            .as_ref()
            .map(|getter| {
                expect_kind(getter, MemberKind::PropertyGet, "PropertyInvoker")?;
                reflector.invoker(getter)
            })
            .transpose()?;
        let setter = property
            .setter
            .as_ref()
            .map(|setter| {
                expect_kind(setter, MemberKind::PropertySet, "PropertyInvoker")?;
                reflector.invoker(setter)
            })
            .transpose()?;
        Ok(Self { getter, setter })
    }

    #[inline]
    pub fn can_read(&self) -> bool {
        self.getter.is_some()
    }

    #[inline]
    pub fn can_write(&self) -> bool {
        self.setter.is_some()
    }

    /// Read the property.
    ///
    /// # Errors
    ///
    /// `InvalidOperation` for a write-only property; otherwise whatever the
    /// getter reports.
    pub fn get(&self, receiver: Receiver<'_>) -> InvokeResult {
        let getter = self.getter.as_ref().ok_or_else(write_only_property)?;
        getter.invoke(accessor_receiver(getter, receiver), &[])
    }

    /// Write the property.
    ///
    /// # Errors
    ///
    /// `InvalidOperation` for a read-only property, before anything is
    /// touched; otherwise whatever the setter reports.
    pub fn set(&self, receiver: Receiver<'_>, value: Value) -> InvokeResult<()> {
        let setter = self.setter.as_ref().ok_or_else(read_only_property)?;
        setter
            .invoke(
                accessor_receiver(setter, receiver),
                std::slice::from_ref(&value),
            )
            .map(|_| ())
    }
}

fn accessor_receiver<'r>(invoker: &CompiledInvoker, receiver: Receiver<'r>) -> Receiver<'r> {
    if invoker.descriptor().is_static() {
        Receiver::Absent
    } else {
        receiver
    }
}
