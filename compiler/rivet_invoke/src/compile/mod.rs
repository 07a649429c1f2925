//! The invoker compiler.
//!
//! One algorithm for all four member kinds: each descriptor is turned into a
//! receiver step, one argument step per parameter, a dispatch step and a
//! result step. Everything that can be decided from the descriptor is
//! decided here, so `invoke` never inspects the descriptor again.

use std::sync::Arc;

use rivet_ir::{MemberKind, TypeKind};
use rivet_meta::{MemberDescriptor, TypeInfo, TypeTable};
use rivet_value::{malformed_descriptor, missing_member, InvokeError, InvokeResult};
use smallvec::SmallVec;

use crate::plan::{ArgStep, DispatchStep, ReceiverStep, ResultStep};
use crate::{CompileOptions, CompiledInvoker};

/// Compile `descriptor` into an invoker.
///
/// # Errors
///
/// - `MissingMember` when the declaring type, a parameter type, or the
///   return type is not registered in `table`
/// - `InvalidOperation` when the body does not match the descriptor's
///   kind, static-ness, or receiver kind
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(member = %table.qualified_name(descriptor), kind = descriptor.kind().as_str())
)]
pub fn compile(
    table: &Arc<TypeTable>,
    descriptor: &Arc<MemberDescriptor>,
    options: CompileOptions,
) -> InvokeResult<CompiledInvoker> {
    let display = table.qualified_name(descriptor);
    let declaring = resolve_types(table, descriptor)?;
    check_shape(descriptor, &declaring, &display)?;

    let receiver = if descriptor.takes_receiver() {
        match declaring.kind() {
            TypeKind::Value => ReceiverStep::ValueSlot { ty: declaring.id() },
            TypeKind::Reference => ReceiverStep::Reference { ty: declaring.id() },
        }
    } else {
        ReceiverStep::None
    };

    let mut args = SmallVec::with_capacity(descriptor.arity());
    for (index, &param) in descriptor.params().iter().enumerate() {
        let step = ArgStep::for_param(table, param).ok_or_else(|| {
            malformed_descriptor(&display, &format!("parameter {index} cannot be void"))
        })?;
        args.push(step);
    }

    let body = descriptor.body().clone();
    let devirtualize = declaring.kind().is_value()
        || (options.devirtualize_sealed && declaring.is_sealed());
    let dispatch = if !descriptor.takes_receiver() || devirtualize {
        DispatchStep::Direct(body)
    } else {
        DispatchStep::Virtual {
            signature: descriptor.signature(),
            fallback: body,
        }
    };

    let result = if descriptor.kind() == MemberKind::Constructor {
        ResultStep::Construct {
            ty: declaring.id(),
            kind: declaring.kind(),
        }
    } else if descriptor.returns_void() {
        ResultStep::Void
    } else {
        ResultStep::Value
    };

    tracing::debug!(
        receiver = ?receiver,
        arity = args.len(),
        is_virtual = dispatch.is_virtual(),
        "compiled invoker"
    );

    Ok(CompiledInvoker {
        descriptor: Arc::clone(descriptor),
        table: Arc::clone(table),
        display,
        receiver,
        args,
        widening: options.conversion.allows_widening(),
        dispatch,
        result,
    })
}

/// Every type the descriptor mentions must be registered.
fn resolve_types(
    table: &TypeTable,
    descriptor: &MemberDescriptor,
) -> InvokeResult<Arc<TypeInfo>> {
    let missing = || -> InvokeError {
        missing_member(
            table.type_name(descriptor.declaring_type()),
            &table.member_display(descriptor.name(), descriptor.params()),
        )
    };

    let declaring = table.get(descriptor.declaring_type()).ok_or_else(missing)?;
    let all_known = descriptor
        .params()
        .iter()
        .chain(std::iter::once(&descriptor.return_type()))
        .all(|&ty| table.contains(ty));
    if all_known {
        Ok(declaring)
    } else {
        Err(missing())
    }
}

/// The body variant must match the calling convention the descriptor
/// declares.
fn check_shape(
    descriptor: &MemberDescriptor,
    declaring: &TypeInfo,
    display: &str,
) -> InvokeResult<()> {
    if descriptor.receiver_kind() != declaring.kind() {
        return Err(malformed_descriptor(
            display,
            &format!(
                "declared as a {} member but the type is a {}",
                descriptor.receiver_kind().as_str(),
                declaring.kind().as_str()
            ),
        ));
    }
    if descriptor.takes_receiver() && declaring.id().is_primitive() {
        return Err(malformed_descriptor(
            display,
            "instance members require a user-defined type",
        ));
    }

    let expected = match (descriptor.kind(), descriptor.is_static(), declaring.kind()) {
        (MemberKind::Constructor, _, _) => "constructor",
        (_, true, _) => "static",
        (_, false, TypeKind::Value) => "value-receiver",
        (_, false, TypeKind::Reference) => "reference-receiver",
    };
    let found = descriptor.body().as_str();
    if found == expected {
        Ok(())
    } else {
        Err(malformed_descriptor(
            display,
            &format!("expected a {expected} body, found {found}"),
        ))
    }
}

#[cfg(test)]
mod tests;
