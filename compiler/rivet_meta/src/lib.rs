#![allow(
    clippy::result_large_err,
    reason = "InvokeError is returned on every call path; boxing it would add an allocation per error"
)]
//! Rivet Meta - runtime type metadata and member descriptors.
//!
//! This crate is the "descriptor source" the invoker compiler consumes:
//! - `TypeTable`: concurrent table of nominal types, assignability and
//!   override resolution
//! - `TypeBuilder`: registers a type together with its members
//! - `MemberBody`: the callable implementation behind a member, tagged by
//!   calling convention
//! - `MemberDescriptor`: resolved, immutable description of one member
//! - Lookup (`find_method`, `find_constructor`, `find_property`): exact
//!   name/parameter matching, no overload resolution
//!
//! # Architecture
//!
//! Types are registered once and never change afterwards. Descriptors are
//! shared as `Arc<MemberDescriptor>` so invoker caches and facades can hold
//! them without copying parameter lists.

mod body;
mod builder;
mod descriptor;
mod lookup;
mod table;

pub use body::{Args, MemberBody, ReferenceFn, StaticFn, ValueFn};
pub use builder::TypeBuilder;
pub use descriptor::{DescriptorParts, MemberDescriptor, MemberKey, PropertyInfo, Signature};
pub use table::{TypeInfo, TypeTable};

/// Inline parameter list; most members take at most four arguments.
pub type ParamList = smallvec::SmallVec<[rivet_ir::TypeId; 4]>;
