//! Error types for invoker compilation and invocation.
//!
//! # Structured Error Categories
//!
//! `InvokeErrorKind` carries the typed category; factory functions (e.g.
//! `arity_mismatch()`) are the public constructors and populate both `kind`
//! and `message`. Errors raised by member bodies travel through compiled
//! invokers untouched, so callers see exactly what the member produced.

use std::fmt;

use crate::value::Value;

/// Result of an invocation.
pub type InvokeResult<T = Value> = Result<T, InvokeError>;

/// Where a type mismatch was detected.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MismatchSite {
    Receiver,
    /// Zero-based argument position.
    Argument(usize),
}

impl fmt::Display for MismatchSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Receiver => write!(f, "receiver"),
            Self::Argument(index) => write!(f, "argument {index}"),
        }
    }
}

/// Typed error category.
///
/// Every category except `Raised` is a caller error detected before the
/// member body is entered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvokeErrorKind {
    /// Argument count differs from the declared parameter count.
    ArityMismatch {
        member: String,
        expected: usize,
        got: usize,
    },
    /// A receiver or argument is not convertible to its declared type.
    TypeMismatch {
        site: MismatchSite,
        expected: String,
        got: String,
    },
    /// The operation is not supported by the member (e.g. writing a
    /// read-only property) or the descriptor is malformed.
    InvalidOperation { message: String },
    /// Descriptor resolution failed.
    MissingMember { type_name: String, member: String },
    /// Raised by a member body.
    Raised { message: String },
}

impl fmt::Display for InvokeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ArityMismatch {
                member,
                expected,
                got,
            } => {
                let arg_word = if *expected == 1 {
                    "argument"
                } else {
                    "arguments"
                };
                if member.is_empty() {
                    write!(f, "expected {expected} {arg_word}, got {got}")
                } else {
                    write!(f, "{member} expects {expected} {arg_word}, got {got}")
                }
            }
            Self::TypeMismatch {
                site,
                expected,
                got,
            } => write!(f, "type mismatch for {site}: expected {expected}, got {got}"),
            Self::InvalidOperation { message } | Self::Raised { message } => {
                write!(f, "{message}")
            }
            Self::MissingMember { type_name, member } => {
                write!(f, "cannot find {type_name}::{member}")
            }
        }
    }
}

/// Invocation error.
#[derive(Clone, Debug, PartialEq)]
pub struct InvokeError {
    /// Structured error category.
    pub kind: InvokeErrorKind,
    /// Human-readable error message.
    ///
    /// For factory-created errors, this equals `kind.to_string()`.
    pub message: String,
    /// Value attached by a member body with `raise_with`.
    pub payload: Option<Value>,
}

impl InvokeError {
    /// Create an error from a structured kind.
    fn from_kind(kind: InvokeErrorKind) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            message,
            payload: None,
        }
    }

    /// Error raised by a member body.
    #[cold]
    pub fn raise(message: impl Into<String>) -> Self {
        Self::from_kind(InvokeErrorKind::Raised {
            message: message.into(),
        })
    }

    /// Error raised by a member body, carrying a value for the caller.
    #[cold]
    pub fn raise_with(message: impl Into<String>, payload: Value) -> Self {
        Self::raise(message).with_payload(payload)
    }

    /// Attach a payload value.
    #[must_use]
    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Whether the caller misused the invoker (as opposed to the member failing).
    pub fn is_caller_error(&self) -> bool {
        !matches!(self.kind, InvokeErrorKind::Raised { .. })
    }
}

impl fmt::Display for InvokeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for InvokeError {}

// Factory functions

/// Wrong number of arguments for a member.
#[cold]
pub fn arity_mismatch(member: &str, expected: usize, got: usize) -> InvokeError {
    InvokeError::from_kind(InvokeErrorKind::ArityMismatch {
        member: member.to_string(),
        expected,
        got,
    })
}

/// Receiver or argument of the wrong type.
#[cold]
pub fn type_mismatch(site: MismatchSite, expected: &str, got: &str) -> InvokeError {
    InvokeError::from_kind(InvokeErrorKind::TypeMismatch {
        site,
        expected: expected.to_string(),
        got: got.to_string(),
    })
}

/// Operation not supported by the member.
#[cold]
pub fn invalid_operation(message: impl Into<String>) -> InvokeError {
    InvokeError::from_kind(InvokeErrorKind::InvalidOperation {
        message: message.into(),
    })
}

/// `get` on a property without a getter.
#[cold]
pub fn write_only_property() -> InvokeError {
    invalid_operation("the property is write-only.")
}

/// `set` on a property without a setter.
#[cold]
pub fn read_only_property() -> InvokeError {
    invalid_operation("the property is read-only.")
}

/// Descriptor whose body does not match its declared shape.
#[cold]
pub fn malformed_descriptor(member: &str, reason: &str) -> InvokeError {
    invalid_operation(format!("malformed descriptor for {member}: {reason}"))
}

/// Typed field read that found the wrong kind of value.
#[cold]
pub fn field_type_mismatch(index: usize, expected: &str, got: &str) -> InvokeError {
    invalid_operation(format!("field {index} is not a {expected} (found {got})"))
}

/// Lookup found no member with the requested name and parameter list.
#[cold]
pub fn missing_member(type_name: &str, member: &str) -> InvokeError {
    InvokeError::from_kind(InvokeErrorKind::MissingMember {
        type_name: type_name.to_string(),
        member: member.to_string(),
    })
}
