//! Builder for registering a type together with its members.
//!
//! The builder reserves the type's id up front so members can mention their
//! own declaring type (e.g. `Point::Add(Point)`) before the type is inserted.
//! Problems are recorded as they happen and reported once by `finish`.

use std::sync::Arc;

use rivet_ir::{MemberKind, Name, TypeFlags, TypeId, TypeKind};
use rivet_value::{invalid_operation, InvokeError, InvokeResult, ObjectRef, StructValue};
use rustc_hash::FxHashMap;

use crate::table::{accessor_name, TypeInfo};
use crate::{Args, DescriptorParts, MemberBody, MemberDescriptor, PropertyInfo, TypeTable};

/// Registers one type in a `TypeTable`.
///
/// Dropping a builder without calling `finish` registers nothing.
#[must_use = "a TypeBuilder registers nothing until `finish` is called"]
pub struct TypeBuilder<'t> {
    table: &'t TypeTable,
    id: TypeId,
    name: Name,
    kind: TypeKind,
    flags: TypeFlags,
    base: Option<TypeId>,
    members: Vec<Arc<MemberDescriptor>>,
    properties: FxHashMap<Name, PropertyInfo>,
    error: Option<InvokeError>,
}

impl<'t> TypeBuilder<'t> {
    pub(crate) fn new(table: &'t TypeTable, id: TypeId, name: Name, kind: TypeKind) -> Self {
        let (flags, base) = match kind {
            TypeKind::Value => (TypeFlags::SEALED, None),
            TypeKind::Reference => (TypeFlags::empty(), Some(TypeId::OBJECT)),
        };
        Self {
            table,
            id,
            name,
            kind,
            flags,
            base,
            members: Vec::new(),
            properties: FxHashMap::default(),
            error: None,
        }
    }

    /// The id the type will have once registered.
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Derive from another reference type.
    pub fn base(mut self, base: TypeId) -> Self {
        if self.kind.is_value() {
            self.fail(format!("value type {} cannot have a base type", self.type_name()));
        }
        self.base = Some(base);
        self
    }

    pub fn sealed(mut self) -> Self {
        self.flags |= TypeFlags::SEALED;
        self
    }

    /// Reject `null` wherever this type is expected.
    pub fn non_nullable(mut self) -> Self {
        self.flags |= TypeFlags::NON_NULLABLE;
        self
    }

    pub fn constructor(
        self,
        params: &[TypeId],
        body: impl Fn(&Args<'_>) -> InvokeResult + Send + Sync + 'static,
    ) -> Self {
        let return_type = self.id;
        self.member(
            MemberKind::Constructor,
            ".ctor",
            params,
            return_type,
            false,
            MemberBody::constructor(body),
        )
    }

    pub fn static_method(
        self,
        name: &str,
        params: &[TypeId],
        return_type: TypeId,
        body: impl Fn(&Args<'_>) -> InvokeResult + Send + Sync + 'static,
    ) -> Self {
        self.member(
            MemberKind::Method,
            name,
            params,
            return_type,
            true,
            MemberBody::new_static(body),
        )
    }

    /// Instance method of a reference type.
    pub fn ref_method(
        self,
        name: &str,
        params: &[TypeId],
        return_type: TypeId,
        body: impl Fn(&ObjectRef, &Args<'_>) -> InvokeResult + Send + Sync + 'static,
    ) -> Self {
        self.member(
            MemberKind::Method,
            name,
            params,
            return_type,
            false,
            MemberBody::reference(body),
        )
    }

    /// Instance method of a value type; the body mutates the caller's slot.
    pub fn value_method(
        self,
        name: &str,
        params: &[TypeId],
        return_type: TypeId,
        body: impl Fn(&mut StructValue, &Args<'_>) -> InvokeResult + Send + Sync + 'static,
    ) -> Self {
        self.member(
            MemberKind::Method,
            name,
            params,
            return_type,
            false,
            MemberBody::value(body),
        )
    }

    /// Method with an explicit body; static-ness follows the body variant.
    pub fn method(
        self,
        name: &str,
        params: &[TypeId],
        return_type: TypeId,
        body: MemberBody,
    ) -> Self {
        let is_static = body.is_static();
        self.member(MemberKind::Method, name, params, return_type, is_static, body)
    }

    /// Add a getter for `property`, creating the property if needed.
    pub fn getter(self, property: &str, property_type: TypeId, body: MemberBody) -> Self {
        self.accessor(MemberKind::PropertyGet, property, property_type, body)
    }

    /// Add a setter for `property`, creating the property if needed.
    pub fn setter(self, property: &str, property_type: TypeId, body: MemberBody) -> Self {
        self.accessor(MemberKind::PropertySet, property, property_type, body)
    }

    fn accessor(
        mut self,
        kind: MemberKind,
        property: &str,
        property_type: TypeId,
        body: MemberBody,
    ) -> Self {
        let is_static = body.is_static();
        let setter_params = [property_type];
        let (params, return_type): (&[TypeId], TypeId) = match kind {
            MemberKind::PropertySet => (&setter_params, TypeId::VOID),
            _ => (&[], property_type),
        };
        let descriptor = self.descriptor(
            kind,
            &accessor_name(kind, property),
            params,
            return_type,
            is_static,
            body,
        );

        let name = self.table.intern(property);
        let info = self
            .properties
            .entry(name)
            .or_insert_with(|| PropertyInfo::new(name, property_type));
        let conflict = if info.property_type != property_type {
            Some("getter and setter disagree on the property type")
        } else {
            let slot = match kind {
                MemberKind::PropertySet => &mut info.setter,
                _ => &mut info.getter,
            };
            if slot.is_some() {
                Some("accessor declared twice")
            } else {
                *slot = Some(Arc::clone(&descriptor));
                None
            }
        };
        if let Some(reason) = conflict {
            let message = format!("property {}::{property}: {reason}", self.type_name());
            self.fail(message);
        }
        self.members.push(descriptor);
        self
    }

    fn member(
        mut self,
        kind: MemberKind,
        name: &str,
        params: &[TypeId],
        return_type: TypeId,
        is_static: bool,
        body: MemberBody,
    ) -> Self {
        let descriptor = self.descriptor(kind, name, params, return_type, is_static, body);
        self.members.push(descriptor);
        self
    }

    fn descriptor(
        &self,
        kind: MemberKind,
        name: &str,
        params: &[TypeId],
        return_type: TypeId,
        is_static: bool,
        body: MemberBody,
    ) -> Arc<MemberDescriptor> {
        MemberDescriptor::from_parts(DescriptorParts {
            kind,
            name: self.table.intern(name),
            declaring_type: self.id,
            receiver_kind: self.kind,
            is_static,
            params: params.iter().copied().collect(),
            return_type,
            body,
        })
    }

    fn type_name(&self) -> &'static str {
        self.table.interner().lookup(self.name)
    }

    fn fail(&mut self, message: String) {
        if self.error.is_none() {
            self.error = Some(invalid_operation(message));
        }
    }

    fn check_base(&self) -> Result<(), String> {
        let Some(base) = self.base else {
            return Ok(());
        };
        let Some(info) = self.table.get(base) else {
            return Err(format!("base type of {} is not registered", self.type_name()));
        };
        if info.kind().is_value() || base == TypeId::STR {
            return Err(format!(
                "{} cannot derive from {}",
                self.type_name(),
                self.table.type_name(base)
            ));
        }
        if info.flags().contains(TypeFlags::SEALED) {
            return Err(format!(
                "{} cannot derive from sealed type {}",
                self.type_name(),
                self.table.type_name(base)
            ));
        }
        Ok(())
    }

    /// Validate and insert the type.
    ///
    /// # Errors
    ///
    /// `InvalidOperation` for a bad base type, duplicate members,
    /// conflicting property accessors, or a name that is already taken.
    pub fn finish(mut self) -> InvokeResult<TypeId> {
        if let Err(message) = self.check_base() {
            self.fail(message);
        }

        let mut members = FxHashMap::default();
        for descriptor in std::mem::take(&mut self.members) {
            let signature = descriptor.signature();
            if members.contains_key(&signature) {
                let display = self.table.member_display(descriptor.name(), descriptor.params());
                self.fail(format!("duplicate member {}::{display}", self.type_name()));
                continue;
            }
            members.insert(signature, descriptor);
        }

        if let Some(error) = self.error {
            return Err(error);
        }

        let info = TypeInfo {
            id: self.id,
            name: self.name,
            kind: self.kind,
            flags: self.flags,
            base: self.base,
            members,
            properties: self.properties,
        };
        if self.table.insert(info) {
            Ok(self.id)
        } else {
            Err(invalid_operation(format!(
                "type {} is already registered",
                self.table.interner().lookup(self.name)
            )))
        }
    }
}
