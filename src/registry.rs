//! Concurrent handler registry

use crate::error::Result;
use crate::pattern::TagPattern;
use crate::placeholder::{HandlerId, Placeholder};
use dashmap::DashMap;
use std::sync::Arc;

/// One registered handler with its compiled pattern.
///
/// The pattern is owned exclusively by this entry, built once at
/// registration and immutable thereafter, so entries can be shared freely
/// across concurrent resolution calls.
pub struct RegistryEntry {
    /// Compiled matcher for this handler's occurrences
    pub pattern: TagPattern,
    /// The handler itself
    pub handler: Arc<dyn Placeholder>,
}

/// Mapping from handler identity to its registry entry.
///
/// Registration is expected to be rare (startup-time) relative to lookups
/// (request-time), so the map is a read-optimized concurrent `DashMap`:
/// lookups during concurrent registration never observe a partially
/// constructed entry.
#[derive(Default)]
pub struct HandlerRegistry {
    entries: DashMap<HandlerId, Arc<RegistryEntry>>,
}

impl HandlerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Register `handler` keyed by its identity, compiling its tag pattern
    /// from the given delimiters. Idempotent: if the identity is already
    /// present the registry is left unchanged and the freshly compiled
    /// pattern is discarded.
    ///
    /// A tag that cannot be combined with the delimiters into a valid
    /// pattern is a configuration error, surfaced before the map is touched.
    pub fn register(
        &self,
        handler: Arc<dyn Placeholder>,
        start_delimiter: char,
        end_delimiter: char,
    ) -> Result<()> {
        let pattern = TagPattern::compile(handler.tag(), start_delimiter, end_delimiter)?;
        self.entries
            .entry(handler.identity())
            .or_insert_with(|| Arc::new(RegistryEntry { pattern, handler }));
        Ok(())
    }

    /// Look up the entry for `identity`, if registered.
    pub fn lookup(&self, identity: HandlerId) -> Option<Arc<RegistryEntry>> {
        self.entries.get(&identity).map(|e| Arc::clone(e.value()))
    }

    /// Snapshot of all entries. Iteration order is not insertion order but
    /// is stable within the returned snapshot.
    pub fn entries(&self) -> Vec<(HandlerId, Arc<RegistryEntry>)> {
        self.entries
            .iter()
            .map(|e| (*e.key(), Arc::clone(e.value())))
            .collect()
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no handlers are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
