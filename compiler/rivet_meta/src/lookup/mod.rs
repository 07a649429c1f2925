//! Descriptor lookup by name and exact parameter list.
//!
//! No overload resolution happens here or anywhere downstream: a lookup
//! either names exactly one member or fails with `MissingMember`. Names that
//! were never interned fail without being interned.

use std::sync::Arc;

use rivet_ir::{MemberKind, TypeId};
use rivet_value::{missing_member, InvokeError, InvokeResult};

use crate::{MemberDescriptor, PropertyInfo, Signature, TypeTable};

impl TypeTable {
    /// Find an instance or static method on `ty` or its bases.
    pub fn find_method(
        &self,
        ty: TypeId,
        name: &str,
        params: &[TypeId],
    ) -> InvokeResult<Arc<MemberDescriptor>> {
        let Some(key) = self.interner().get(name) else {
            return Err(self.missing(ty, name, params));
        };
        let signature = Signature::new(MemberKind::Method, key, params);
        let mut current = Some(ty);
        while let Some(id) = current {
            let Some(info) = self.get(id) else { break };
            if let Some(member) = info.member(&signature) {
                return Ok(Arc::clone(member));
            }
            current = info.base();
        }
        Err(self.missing(ty, name, params))
    }

    /// Find a constructor declared on `ty` itself. Constructors are not inherited.
    pub fn find_constructor(
        &self,
        ty: TypeId,
        params: &[TypeId],
    ) -> InvokeResult<Arc<MemberDescriptor>> {
        let signature = Signature::new(MemberKind::Constructor, self.intern(".ctor"), params);
        self.get(ty)
            .and_then(|info| info.member(&signature).cloned())
            .ok_or_else(|| self.missing(ty, ".ctor", params))
    }

    /// Find a property on `ty` or its bases.
    ///
    /// The most-derived declaration wins; an accessor it leaves out is taken
    /// from the nearest base that declares one with the same property type.
    /// A base declaring a different type ends the walk.
    pub fn find_property(&self, ty: TypeId, name: &str) -> InvokeResult<PropertyInfo> {
        let missing = || missing_member(self.type_name(ty), name);
        let key = self.interner().get(name).ok_or_else(missing)?;

        let mut found: Option<PropertyInfo> = None;
        let mut current = Some(ty);
        while let Some(id) = current {
            let Some(info) = self.get(id) else { break };
            if let Some(declared) = info.property(key) {
                let property = found.get_or_insert_with(|| declared.clone());
                if property.property_type != declared.property_type {
                    break;
                }
                if property.getter.is_none() {
                    property.getter = declared.getter.clone();
                }
                if property.setter.is_none() {
                    property.setter = declared.setter.clone();
                }
                if property.can_read() && property.can_write() {
                    break;
                }
            }
            current = info.base();
        }
        found.ok_or_else(missing)
    }

    #[cold]
    fn missing(&self, ty: TypeId, name: &str, params: &[TypeId]) -> InvokeError {
        missing_member(self.type_name(ty), &self.display_str(name, params))
    }
}
