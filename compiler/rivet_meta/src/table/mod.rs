//! Concurrent table of nominal types.
//!
//! Types are inserted once (through `TypeBuilder::finish`) and read many
//! times. The table answers the questions the invoker compiler asks at
//! compile time and at call time:
//!
//! - Is a type known, and is it a value or reference type?
//! - Is a runtime type assignable to a declared type? (base-chain walk)
//! - Which body overrides a signature for a runtime type? (virtual dispatch)
//!
//! # Design
//!
//! - Dual indexing: `DashMap` by `TypeId` and by interned name
//! - Ids come from an atomic counter, so builders can reserve ids up front
//! - `TypeInfo` is shared as `Arc` so lookups never hold a shard lock while
//!   walking base chains

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use rivet_ir::{MemberKind, Name, SharedInterner, TypeFlags, TypeId, TypeKind};
use rivet_value::Value;
use rustc_hash::FxHashMap;

use crate::{MemberDescriptor, PropertyInfo, Signature, TypeBuilder};

/// A registered type.
#[derive(Debug)]
pub struct TypeInfo {
    pub(crate) id: TypeId,
    pub(crate) name: Name,
    pub(crate) kind: TypeKind,
    pub(crate) flags: TypeFlags,
    /// Direct base type; `None` for value types and for `OBJECT` itself.
    pub(crate) base: Option<TypeId>,
    pub(crate) members: FxHashMap<Signature, Arc<MemberDescriptor>>,
    pub(crate) properties: FxHashMap<Name, PropertyInfo>,
}

impl TypeInfo {
    fn primitive(id: TypeId, name: Name, kind: TypeKind) -> Self {
        let (flags, base) = match kind {
            TypeKind::Value => (TypeFlags::SEALED, None),
            // `str` cannot be subclassed; `object` is the root
            TypeKind::Reference if id == TypeId::STR => (TypeFlags::SEALED, Some(TypeId::OBJECT)),
            TypeKind::Reference => (TypeFlags::empty(), None),
        };
        Self {
            id,
            name,
            kind,
            flags,
            base,
            members: FxHashMap::default(),
            properties: FxHashMap::default(),
        }
    }

    #[inline]
    pub fn id(&self) -> TypeId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> Name {
        self.name
    }

    #[inline]
    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    #[inline]
    pub fn flags(&self) -> TypeFlags {
        self.flags
    }

    #[inline]
    pub fn base(&self) -> Option<TypeId> {
        self.base
    }

    /// No override of this type's members can exist.
    #[inline]
    pub fn is_sealed(&self) -> bool {
        self.kind.is_value() || self.flags.contains(TypeFlags::SEALED)
    }

    /// Whether `Null` is an acceptable value of this type.
    #[inline]
    pub fn is_nullable(&self) -> bool {
        self.kind.is_reference() && !self.flags.contains(TypeFlags::NON_NULLABLE)
    }

    /// Member declared directly on this type.
    pub fn member(&self, signature: &Signature) -> Option<&Arc<MemberDescriptor>> {
        self.members.get(signature)
    }

    /// Property declared directly on this type.
    pub fn property(&self, name: Name) -> Option<&PropertyInfo> {
        self.properties.get(&name)
    }

    pub fn members(&self) -> impl Iterator<Item = &Arc<MemberDescriptor>> {
        self.members.values()
    }

    pub fn properties(&self) -> impl Iterator<Item = &PropertyInfo> {
        self.properties.values()
    }
}

/// Concurrent type table.
///
/// Pre-populated with the primitive types; user types are added with
/// `value_type` / `reference_type` builders.
pub struct TypeTable {
    interner: SharedInterner,
    types: DashMap<TypeId, Arc<TypeInfo>>,
    by_name: DashMap<Name, TypeId>,
    next_id: AtomicU32,
}

impl TypeTable {
    pub fn new() -> Self {
        Self::with_interner(SharedInterner::new())
    }

    /// Create a table that interns names into an existing interner.
    pub fn with_interner(interner: SharedInterner) -> Self {
        let table = Self {
            interner,
            types: DashMap::new(),
            by_name: DashMap::new(),
            next_id: AtomicU32::new(TypeId::FIRST_USER),
        };
        for id in TypeId::PRIMITIVES {
            let (Some(name), Some(kind)) = (id.primitive_name(), id.primitive_kind()) else {
                continue;
            };
            let name = table.interner.intern(name);
            table.by_name.insert(name, id);
            table
                .types
                .insert(id, Arc::new(TypeInfo::primitive(id, name, kind)));
        }
        table
    }

    pub fn interner(&self) -> &SharedInterner {
        &self.interner
    }

    #[inline]
    pub fn intern(&self, s: &str) -> Name {
        self.interner.intern(s)
    }

    /// Start registering a value type.
    ///
    /// Value types are sealed and have no base type.
    pub fn value_type(&self, name: &str) -> TypeBuilder<'_> {
        TypeBuilder::new(self, self.reserve_id(), self.intern(name), TypeKind::Value)
    }

    /// Start registering a reference type deriving from `object`.
    pub fn reference_type(&self, name: &str) -> TypeBuilder<'_> {
        TypeBuilder::new(self, self.reserve_id(), self.intern(name), TypeKind::Reference)
    }

    fn reserve_id(&self) -> TypeId {
        TypeId::new(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Insert a finished type. Fails when the name is already taken.
    pub(crate) fn insert(&self, info: TypeInfo) -> bool {
        match self.by_name.entry(info.name) {
            dashmap::mapref::entry::Entry::Occupied(_) => false,
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(info.id);
                tracing::debug!(
                    ty = self.interner.lookup(info.name),
                    id = info.id.raw(),
                    kind = info.kind.as_str(),
                    members = info.members.len(),
                    "registered type"
                );
                self.types.insert(info.id, Arc::new(info));
                true
            }
        }
    }

    pub fn get(&self, id: TypeId) -> Option<Arc<TypeInfo>> {
        self.types.get(&id).map(|entry| Arc::clone(entry.value()))
    }

    pub fn contains(&self, id: TypeId) -> bool {
        self.types.contains_key(&id)
    }

    pub fn by_name(&self, name: &str) -> Option<TypeId> {
        let name = self.interner.get(name)?;
        self.by_name.get(&name).map(|entry| *entry.value())
    }

    /// Kind of a registered type.
    pub fn kind_of(&self, id: TypeId) -> Option<TypeKind> {
        self.types.get(&id).map(|entry| entry.kind)
    }

    /// Display name of a type, `<unknown>` when it is not registered.
    pub fn type_name(&self, id: TypeId) -> &'static str {
        match self.types.get(&id) {
            Some(info) => self.interner.lookup(info.name),
            None => "<unknown>",
        }
    }

    /// Display name of a value's runtime type.
    ///
    /// Prefers the registered name for structs and objects.
    pub fn value_type_name(&self, value: &Value) -> &'static str {
        match value {
            Value::Struct(_) | Value::Object(_) => match value.type_id() {
                Some(id) if self.contains(id) => self.type_name(id),
                _ => value.type_name(),
            },
            _ => value.type_name(),
        }
    }

    /// Render a member as `name(param, ...)`.
    pub fn member_display(&self, name: Name, params: &[TypeId]) -> String {
        self.display_str(self.interner.lookup(name), params)
    }

    pub(crate) fn display_str(&self, name: &str, params: &[TypeId]) -> String {
        let params: Vec<&str> = params.iter().map(|&ty| self.type_name(ty)).collect();
        format!("{name}({})", params.join(", "))
    }

    /// Render a descriptor as `Type::name`, for arity diagnostics.
    pub fn qualified_name(&self, descriptor: &MemberDescriptor) -> String {
        format!(
            "{}::{}",
            self.type_name(descriptor.declaring_type()),
            self.interner.lookup(descriptor.name())
        )
    }

    /// Whether a value of runtime type `from` can be used where `to` is
    /// declared.
    ///
    /// Value types are only assignable to themselves and to `object`;
    /// reference types are assignable to every type on their base chain.
    pub fn is_assignable(&self, from: TypeId, to: TypeId) -> bool {
        if from == to {
            return true;
        }
        if to == TypeId::OBJECT {
            return !from.is_void() && self.contains(from);
        }
        let mut current = self.get(from).and_then(|info| info.base);
        while let Some(id) = current {
            if id == to {
                return true;
            }
            current = self.get(id).and_then(|info| info.base);
        }
        false
    }

    /// Most-derived instance member for `signature`, starting at
    /// `runtime_type` and walking its base chain.
    pub fn resolve_override(
        &self,
        runtime_type: TypeId,
        signature: &Signature,
    ) -> Option<Arc<MemberDescriptor>> {
        let mut current = Some(runtime_type);
        while let Some(id) = current {
            let info = self.get(id)?;
            if let Some(member) = info.member(signature) {
                if !member.is_static() {
                    return Some(Arc::clone(member));
                }
            }
            current = info.base;
        }
        None
    }

    /// Number of registered types, primitives included.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Default for TypeTable {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TypeTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeTable")
            .field("types", &self.types.len())
            .finish_non_exhaustive()
    }
}

/// Accessor name for a property (`get_X` / `set_X`).
pub(crate) fn accessor_name(kind: MemberKind, property: &str) -> String {
    match kind {
        MemberKind::PropertySet => format!("set_{property}"),
        _ => format!("get_{property}"),
    }
}
