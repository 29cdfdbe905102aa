use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use super::error::RegistryError;
use crate::logging::LogSink;
use crate::types::{ArchitectureKey, BitWidth};

/// Builds an analyzer from the caller's sink, the detected bit width and the
/// ELF flag.
pub type Constructor<A> = Arc<dyn Fn(Arc<dyn LogSink>, BitWidth, bool) -> A + Send + Sync>;

/// Architecture key to constructor table.
///
/// Architecture modules register during start-up through `&mut self`; the
/// factory only ever borrows the registry immutably afterwards.
pub struct AnalyzerRegistry<A> {
    constructors: HashMap<ArchitectureKey, Constructor<A>>,
}

impl<A> AnalyzerRegistry<A> {
    pub fn new() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// Bind `key` to `ctor`. An existing binding is replaced.
    pub fn register(&mut self, key: impl Into<ArchitectureKey>, ctor: Constructor<A>) {
        let key = key.into();
        if self.constructors.insert(key.clone(), ctor).is_some() {
            debug!("Replaced analyzer constructor for processor {}", key);
        }
    }

    pub fn register_fn<F>(&mut self, key: impl Into<ArchitectureKey>, ctor: F)
    where
        F: Fn(Arc<dyn LogSink>, BitWidth, bool) -> A + Send + Sync + 'static,
    {
        self.register(key, Arc::new(ctor));
    }

    /// Like [`register`](Self::register) but refuses to replace a binding.
    pub fn register_unique(
        &mut self,
        key: impl Into<ArchitectureKey>,
        ctor: Constructor<A>,
    ) -> Result<(), RegistryError> {
        match self.constructors.entry(key.into()) {
            Entry::Occupied(entry) => Err(RegistryError::AlreadyRegistered {
                architecture: entry.key().clone(),
            }),
            Entry::Vacant(entry) => {
                entry.insert(ctor);
                Ok(())
            }
        }
    }

    pub fn unregister(&mut self, key: &str) -> Option<Constructor<A>> {
        self.constructors.remove(key)
    }

    pub fn lookup(&self, key: &str) -> Option<Constructor<A>> {
        self.constructors.get(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.constructors.contains_key(key)
    }

    /// Registered keys, sorted.
    pub fn architectures(&self) -> Vec<ArchitectureKey> {
        let mut keys: Vec<ArchitectureKey> = self.constructors.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }
}

impl<A> Default for AnalyzerRegistry<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> fmt::Debug for AnalyzerRegistry<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalyzerRegistry")
            .field("architectures", &self.architectures())
            .finish()
    }
}
