//! Rivet IR - identifiers shared by every Rivet crate.
//!
//! This crate contains the small, `Copy` building blocks the rest of the
//! workspace is keyed on:
//! - `Name` for interned identifiers (member names, type names)
//! - `TypeId` for interned nominal types, with pre-interned primitives
//! - `TypeKind` / `TypeFlags` for value vs reference semantics
//! - `MemberKind` for the four callable member shapes
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: Strings → Name(u32), Types → TypeId(u32)
//! - **Cheap Keys**: every type here is `Copy + Eq + Hash` so descriptors and
//!   cache keys compare in O(1) per component.

mod interner;
mod member_kind;
mod name;
mod type_id;
mod type_kind;

pub use interner::{InternError, SharedInterner, StringInterner};
pub use member_kind::MemberKind;
pub use name::Name;
pub use type_id::TypeId;
pub use type_kind::{TypeFlags, TypeKind};
