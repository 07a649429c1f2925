//! Per-reflector cache of compiled invokers.
//!
//! Keyed by `MemberKey`, the structural identity of a descriptor. Lookups hit
//! a sharded `DashMap`; on a miss the invoker is compiled outside any lock and
//! inserted only if no other thread got there first. Losing that race wastes
//! one compilation but never yields two live invokers for one key.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use rivet_meta::MemberKey;
use rivet_value::InvokeResult;

use crate::CompiledInvoker;

/// Snapshot of cache counters.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Successful compilations, including ones that lost the insert race.
    pub compiles: u64,
}

/// Concurrent `MemberKey -> CompiledInvoker` cache.
#[derive(Default)]
pub struct InvokerCache {
    invokers: DashMap<MemberKey, Arc<CompiledInvoker>>,
    hits: AtomicU64,
    misses: AtomicU64,
    compiles: AtomicU64,
}

impl InvokerCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &MemberKey) -> Option<Arc<CompiledInvoker>> {
        self.invokers.get(key).map(|entry| Arc::clone(entry.value()))
    }

    /// Return the cached invoker for `key`, compiling it on first use.
    ///
    /// A failed compilation is not cached; the next request retries.
    pub fn get_or_compile(
        &self,
        key: MemberKey,
        compile: impl FnOnce() -> InvokeResult<CompiledInvoker>,
    ) -> InvokeResult<Arc<CompiledInvoker>> {
        if let Some(hit) = self.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(hit);
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(?key, "invoker cache miss");

        let compiled = Arc::new(compile()?);
        self.compiles.fetch_add(1, Ordering::Relaxed);

        match self.invokers.entry(key) {
            Entry::Occupied(existing) => {
                tracing::debug!("invoker compiled concurrently, keeping the first");
                Ok(Arc::clone(existing.get()))
            }
            Entry::Vacant(slot) => {
                tracing::debug!(member = ?compiled, "invoker cached");
                slot.insert(Arc::clone(&compiled));
                Ok(compiled)
            }
        }
    }

    pub fn len(&self) -> usize {
        self.invokers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.invokers.is_empty()
    }

    /// Drop every cached invoker. Counters are kept.
    pub fn clear(&self) {
        self.invokers.clear();
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            compiles: self.compiles.load(Ordering::Relaxed),
        }
    }
}

impl std::fmt::Debug for InvokerCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InvokerCache")
            .field("len", &self.len())
            .field("stats", &self.stats())
            .finish()
    }
}
