//! Compiled invokers.
//!
//! A `CompiledInvoker` is the cached product of `compile`: a descriptor plus a
//! fixed plan. `invoke` walks the plan in order:
//!
//! 1. arity check (before anything else)
//! 2. receiver binding
//! 3. argument conversion, all positions, before the body is entered
//! 4. dispatch (direct, or override resolution on the receiver's type)
//! 5. result shaping
//!
//! Errors raised by the body propagate unchanged.

use std::fmt;
use std::sync::Arc;

use rivet_ir::TypeKind;
use rivet_meta::{Args, MemberBody, MemberDescriptor, TypeTable};
use rivet_value::{
    arity_mismatch, invalid_operation, malformed_descriptor, type_mismatch, InvokeResult,
    MismatchSite, ObjectRef, StructValue, Value,
};
use smallvec::SmallVec;

use crate::plan::{ArgStep, DispatchStep, ReceiverStep, ResultStep};
use crate::Receiver;

/// The receiver after binding, borrowed from the caller's handle.
enum Target<'r> {
    None,
    Slot(&'r mut StructValue),
    Object(&'r ObjectRef),
}

/// A member compiled to the uniform `(receiver, args) -> result` shape.
///
/// Immutable and free of per-call state, so one invoker can be shared across
/// threads and called re-entrantly.
pub struct CompiledInvoker {
    pub(crate) descriptor: Arc<MemberDescriptor>,
    pub(crate) table: Arc<TypeTable>,
    /// `Type::member`, for diagnostics.
    pub(crate) display: String,
    pub(crate) receiver: ReceiverStep,
    pub(crate) args: SmallVec<[ArgStep; 4]>,
    pub(crate) widening: bool,
    pub(crate) dispatch: DispatchStep,
    pub(crate) result: ResultStep,
}

impl CompiledInvoker {
    /// Invoke the member.
    ///
    /// # Errors
    ///
    /// - `ArityMismatch` when `args.len()` differs from the parameter count
    /// - `TypeMismatch` for an unacceptable receiver or argument
    /// - whatever the member body raises, unchanged
    pub fn invoke(&self, receiver: Receiver<'_>, args: &[Value]) -> InvokeResult {
        if args.len() != self.args.len() {
            return Err(arity_mismatch(&self.display, self.args.len(), args.len()));
        }

        let mut target = self.bind_receiver(receiver)?;
        let converted = self.convert_args(args)?;
        let args = Args::new(&converted);

        let returned = match &self.dispatch {
            DispatchStep::Direct(body) => self.call(body, &mut target, &args)?,
            DispatchStep::Virtual {
                signature,
                fallback,
            } => {
                let resolved = match &target {
                    Target::Object(obj) => self.table.resolve_override(obj.type_id(), signature),
                    _ => None,
                };
                match resolved {
                    Some(member) => {
                        tracing::trace!(
                            member = %self.display,
                            resolved = self.table.type_name(member.declaring_type()),
                            "virtual dispatch"
                        );
                        self.call(member.body(), &mut target, &args)?
                    }
                    None => self.call(fallback, &mut target, &args)?,
                }
            }
        };

        self.shape_result(returned)
    }

    pub fn descriptor(&self) -> &Arc<MemberDescriptor> {
        &self.descriptor
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.args.len()
    }

    /// Whether the body is chosen by the receiver's runtime type.
    #[inline]
    pub fn is_virtual(&self) -> bool {
        self.dispatch.is_virtual()
    }

    pub fn receiver_step(&self) -> &ReceiverStep {
        &self.receiver
    }

    pub fn arg_steps(&self) -> &[ArgStep] {
        &self.args
    }

    pub fn result_step(&self) -> &ResultStep {
        &self.result
    }

    fn bind_receiver<'r>(&self, receiver: Receiver<'r>) -> InvokeResult<Target<'r>> {
        match self.receiver {
            ReceiverStep::None => Ok(Target::None),
            ReceiverStep::ValueSlot { ty } => match receiver {
                Receiver::Slot(slot) => {
                    if !slot.as_struct().is_some_and(|s| s.type_id() == ty) {
                        let got = self.table.value_type_name(slot);
                        return Err(self.receiver_mismatch(got));
                    }
                    slot.as_struct_mut()
                        .map(Target::Slot)
                        .ok_or_else(|| self.receiver_mismatch("nothing"))
                }
                Receiver::Shared(value) => {
                    let got = format!("{} (not a storage slot)", self.table.value_type_name(value));
                    Err(self.receiver_mismatch(&got))
                }
                Receiver::Absent => Err(self.receiver_mismatch("nothing")),
            },
            ReceiverStep::Reference { ty } => {
                let value: &'r Value = match receiver {
                    Receiver::Shared(value) => value,
                    Receiver::Slot(slot) => slot,
                    Receiver::Absent => return Err(self.receiver_mismatch("nothing")),
                };
                match value {
                    Value::Object(obj) if self.table.is_assignable(obj.type_id(), ty) => {
                        Ok(Target::Object(obj))
                    }
                    other => Err(self.receiver_mismatch(self.table.value_type_name(other))),
                }
            }
        }
    }

    fn convert_args(&self, args: &[Value]) -> InvokeResult<SmallVec<[Value; 4]>> {
        self.args
            .iter()
            .zip(args)
            .enumerate()
            .map(|(index, (step, value))| {
                step.convert(&self.table, value, self.widening).ok_or_else(|| {
                    type_mismatch(
                        MismatchSite::Argument(index),
                        self.table.type_name(step.type_id()),
                        self.table.value_type_name(value),
                    )
                })
            })
            .collect()
    }

    fn call(&self, body: &MemberBody, target: &mut Target<'_>, args: &Args<'_>) -> InvokeResult {
        match (body, target) {
            (MemberBody::Static(f) | MemberBody::Constructor(f), _) => f(args),
            (MemberBody::Reference(f), Target::Object(obj)) => f(*obj, args),
            (MemberBody::Value(f), Target::Slot(slot)) => f(&mut **slot, args),
            (body, _) => Err(malformed_descriptor(
                &self.display,
                &format!("{} body cannot run on this receiver", body.as_str()),
            )),
        }
    }

    fn shape_result(&self, returned: Value) -> InvokeResult {
        match self.result {
            ResultStep::Void => Ok(Value::Void),
            ResultStep::Value => Ok(returned),
            ResultStep::Construct { ty, kind } => {
                let ok = match (&returned, kind) {
                    (Value::Struct(s), TypeKind::Value) => s.type_id() == ty,
                    (Value::Object(obj), TypeKind::Reference) => {
                        self.table.is_assignable(obj.type_id(), ty)
                    }
                    _ => false,
                };
                if ok {
                    Ok(returned)
                } else {
                    Err(invalid_operation(format!(
                        "constructor of {} returned {}",
                        self.table.type_name(ty),
                        self.table.value_type_name(&returned)
                    )))
                }
            }
        }
    }

    #[cold]
    fn receiver_mismatch(&self, got: &str) -> rivet_value::InvokeError {
        type_mismatch(
            MismatchSite::Receiver,
            self.table.type_name(self.descriptor.declaring_type()),
            got,
        )
    }
}

impl fmt::Debug for CompiledInvoker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledInvoker")
            .field("member", &self.display)
            .field("receiver", &self.receiver)
            .field("args", &self.args)
            .field("virtual", &self.is_virtual())
            .field("result", &self.result)
            .finish()
    }
}

#[cfg(test)]
mod tests;
