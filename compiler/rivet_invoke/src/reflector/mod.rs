//! The `Reflector`: a type table, an invoker cache, and the options every
//! invoker is compiled with.

use std::sync::Arc;

use rivet_ir::TypeId;
use rivet_meta::{MemberDescriptor, TypeTable};
use rivet_value::InvokeResult;

use crate::{
    compile, CacheStats, CompileOptions, CompiledInvoker, ConstructorInvoker, ConversionMode,
    InvokerCache, MethodInvoker, PropertyInvoker,
};

/// Entry point for obtaining invokers.
///
/// Cheap to share behind an `Arc`; all methods take `&self`.
#[derive(Debug)]
pub struct Reflector {
    table: Arc<TypeTable>,
    cache: InvokerCache,
    options: CompileOptions,
}

impl Reflector {
    /// Reflector with default options.
    pub fn new(table: Arc<TypeTable>) -> Self {
        Self::builder(table).build()
    }

    pub fn builder(table: Arc<TypeTable>) -> ReflectorBuilder {
        ReflectorBuilder {
            table,
            options: CompileOptions::default(),
        }
    }

    pub fn table(&self) -> &Arc<TypeTable> {
        &self.table
    }

    pub fn options(&self) -> CompileOptions {
        self.options
    }

    pub fn cache(&self) -> &InvokerCache {
        &self.cache
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Cached invoker for `descriptor`, compiled on first use.
    ///
    /// The cache is keyed by `MemberKey`: declaring type, static-ness, kind,
    /// name and parameter types. Return type and body are not part of the
    /// key, so a hand-built descriptor that shares a key with one already
    /// compiled gets the existing invoker. Descriptors from one `TypeTable`
    /// never collide this way, since a type cannot declare a signature twice.
    pub fn invoker(&self, descriptor: &Arc<MemberDescriptor>) -> InvokeResult<Arc<CompiledInvoker>> {
        self.cache.get_or_compile(descriptor.key(), || {
            compile(&self.table, descriptor, self.options)
        })
    }

    /// Look up a method by name and exact parameter types.
    pub fn method(&self, ty: TypeId, name: &str, params: &[TypeId]) -> InvokeResult<MethodInvoker> {
        let descriptor = self.table.find_method(ty, name, params)?;
        MethodInvoker::new(self, descriptor)
    }

    /// Look up a constructor by exact parameter types.
    pub fn constructor(&self, ty: TypeId, params: &[TypeId]) -> InvokeResult<ConstructorInvoker> {
        let descriptor = self.table.find_constructor(ty, params)?;
        ConstructorInvoker::new(self, descriptor)
    }

    pub fn property(&self, ty: TypeId, name: &str) -> InvokeResult<PropertyInvoker> {
        let property = self.table.find_property(ty, name)?;
        PropertyInvoker::new(self, &property)
    }
}

/// Builder for `Reflector`.
#[derive(Debug)]
pub struct ReflectorBuilder {
    table: Arc<TypeTable>,
    options: CompileOptions,
}

impl ReflectorBuilder {
    #[must_use]
    pub fn conversion_mode(mut self, mode: ConversionMode) -> Self {
        self.options.conversion = mode;
        self
    }

    #[must_use]
    pub fn devirtualize_sealed(mut self, enabled: bool) -> Self {
        self.options.devirtualize_sealed = enabled;
        self
    }

    #[must_use]
    pub fn options(mut self, options: CompileOptions) -> Self {
        self.options = options;
        self
    }

    pub fn build(self) -> Reflector {
        tracing::debug!(options = ?self.options, "reflector created");
        Reflector {
            table: self.table,
            cache: InvokerCache::new(),
            options: self.options,
        }
    }
}
