#![allow(
    clippy::result_large_err,
    reason = "InvokeError is returned on every call path; boxing it would add an allocation per error"
)]
//! Rivet Value - the generic channel every compiled invoker speaks.
//!
//! This crate provides:
//! - The tagged runtime value (`Value`) that arguments and results travel in
//! - Value-type instances (`StructValue`, copied on clone) and reference-type
//!   instances (`ObjectRef`, aliased on clone)
//! - Checked extraction of concrete Rust values (`FromValue`)
//! - Invocation error types (`InvokeError`, `InvokeErrorKind`, `InvokeResult`)
//!
//! # Boxing
//!
//! There is no implicit conversion: a member that wants an `i64` asks for one
//! through `FromValue`, and a mismatch is a typed error, never a panic.

mod convert;
mod errors;
mod value;

pub use convert::FromValue;
pub use errors::{InvokeError, InvokeErrorKind, InvokeResult, MismatchSite};
pub use value::{Heap, ObjectRef, StructValue, Value};

// Re-export error constructors for use by other crates
pub use errors::{
    arity_mismatch, field_type_mismatch, invalid_operation, malformed_descriptor, missing_member,
    read_only_property, type_mismatch, write_only_property,
};
