//! The per-step plan a compiled invoker executes.
//!
//! Every step is selected once, at compile time, from the descriptor:
//!
//! ```text
//! receiver step  ->  arg step × arity  ->  dispatch step  ->  result step
//! ```
//!
//! Executing a plan is a fixed walk over these variants; nothing about the
//! member is looked up again except the override slot of a virtual call.

use rivet_ir::{TypeId, TypeKind};
use rivet_meta::{MemberBody, Signature, TypeTable};
use rivet_value::Value;

/// How the receiver is obtained.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReceiverStep {
    /// Static members and constructors; the receiver is ignored.
    None,
    /// Value-type receiver: `Receiver::Slot` holding a struct of exactly `ty`.
    ValueSlot { ty: TypeId },
    /// Reference-type receiver: an object whose type is assignable to `ty`.
    Reference { ty: TypeId },
}

/// Conversion of one argument to its declared parameter type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArgStep {
    Bool,
    Int,
    Float,
    Char,
    Byte,
    /// `str` is a nullable reference type.
    Str,
    /// Accepts every value except `Void`.
    Object,
    /// Exact value type; the argument is copied.
    Struct(TypeId),
    /// Reference type narrowed by assignability.
    Class { ty: TypeId, nullable: bool },
}

impl ArgStep {
    /// Select the step for a parameter type, `None` for `void` and for
    /// types the table does not know.
    pub fn for_param(table: &TypeTable, ty: TypeId) -> Option<ArgStep> {
        let step = match ty {
            TypeId::VOID => return None,
            TypeId::BOOL => ArgStep::Bool,
            TypeId::INT => ArgStep::Int,
            TypeId::FLOAT => ArgStep::Float,
            TypeId::CHAR => ArgStep::Char,
            TypeId::BYTE => ArgStep::Byte,
            TypeId::STR => ArgStep::Str,
            TypeId::OBJECT => ArgStep::Object,
            _ => {
                let info = table.get(ty)?;
                match info.kind() {
                    TypeKind::Value => ArgStep::Struct(ty),
                    TypeKind::Reference => ArgStep::Class {
                        ty,
                        nullable: info.is_nullable(),
                    },
                }
            }
        };
        Some(step)
    }

    /// The declared parameter type this step converts to.
    pub fn type_id(&self) -> TypeId {
        match self {
            ArgStep::Bool => TypeId::BOOL,
            ArgStep::Int => TypeId::INT,
            ArgStep::Float => TypeId::FLOAT,
            ArgStep::Char => TypeId::CHAR,
            ArgStep::Byte => TypeId::BYTE,
            ArgStep::Str => TypeId::STR,
            ArgStep::Object => TypeId::OBJECT,
            ArgStep::Struct(ty) | ArgStep::Class { ty, .. } => *ty,
        }
    }

    /// Convert `value`, or `None` when it is not acceptable for this step.
    pub fn convert(&self, table: &TypeTable, value: &Value, widening: bool) -> Option<Value> {
        match (self, value) {
            (ArgStep::Bool, Value::Bool(_))
            | (ArgStep::Int, Value::Int(_))
            | (ArgStep::Float, Value::Float(_))
            | (ArgStep::Char, Value::Char(_))
            | (ArgStep::Byte, Value::Byte(_))
            | (ArgStep::Str, Value::Str(_) | Value::Null) => Some(value.clone()),
            (ArgStep::Int, Value::Byte(b)) if widening => Some(Value::Int(i64::from(*b))),
            (ArgStep::Float, Value::Byte(b)) if widening => Some(Value::Float(f64::from(*b))),
            (ArgStep::Float, Value::Int(n)) if widening => widen_int(*n).map(Value::Float),
            (ArgStep::Object, value) => (!value.is_void()).then(|| value.clone()),
            (ArgStep::Struct(ty), Value::Struct(s)) if s.type_id() == *ty => Some(value.clone()),
            (ArgStep::Class { nullable: true, .. }, Value::Null) => Some(Value::Null),
            (ArgStep::Class { ty, .. }, Value::Object(obj))
                if table.is_assignable(obj.type_id(), *ty) =>
            {
                Some(value.clone())
            }
            _ => None,
        }
    }
}

/// `int -> float` without rounding, or `None`.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    reason = "the round trip is checked before the value is used"
)]
fn widen_int(n: i64) -> Option<f64> {
    const EXACT: u64 = 1 << f64::MANTISSA_DIGITS;
    // 2^63: rounding can push large values just outside the i64 range
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;

    let f = n as f64;
    if n.unsigned_abs() <= EXACT {
        return Some(f);
    }
    (f < LIMIT && f as i64 == n).then_some(f)
}

/// How the member body is chosen.
#[derive(Clone, Debug)]
pub enum DispatchStep {
    /// Bound at compile time: static members, constructors, value types,
    /// and sealed reference types.
    Direct(MemberBody),
    /// Resolved against the receiver's runtime type on every call.
    ///
    /// `fallback` is the descriptor's own body, used when the runtime type
    /// chain has no registered member for `signature`.
    Virtual {
        signature: Signature,
        fallback: MemberBody,
    },
}

impl DispatchStep {
    #[inline]
    pub fn is_virtual(&self) -> bool {
        matches!(self, DispatchStep::Virtual { .. })
    }
}

/// How the body's return value is turned into the invocation result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResultStep {
    /// Void methods and setters: always `Value::Void`.
    Void,
    /// The body's value, unchanged.
    Value,
    /// A constructor: the new instance, checked against the declaring type.
    Construct { ty: TypeId, kind: TypeKind },
}
