use std::any::Any;
use std::collections::HashMap;
use std::sync::{RwLock, Weak};

use tracing::debug;

use pvt_types::{RegistryId, ScopeId, ScopeToken};

use crate::bucket::Bucket;
use crate::error::{RegistryError, RegistryResult};
use crate::handle::{ObjectKey, TrackedHandle};
use crate::traits::StorageRegistry;

struct TrackedEntry {
    liveness: Weak<dyn Any + Send + Sync>,
    scope: ScopeId,
    bucket: Option<Bucket>,
}

impl TrackedEntry {
    fn is_live(&self) -> bool {
        self.liveness.strong_count() > 0
    }
}

/// In-memory, HashMap-based storage registry.
///
/// Entries are keyed by allocation address behind a `RwLock`. Each entry
/// holds a weak reference to its object; the weak reference both answers
/// liveness and pins the dead allocation's address until the entry is
/// purged, so a key can never ambiguously refer to two objects.
///
/// Buckets are created lazily, on the first `bucket_for` after adoption.
pub struct InMemoryStorageRegistry {
    id: RegistryId,
    entries: RwLock<HashMap<ObjectKey, TrackedEntry>>,
}

impl InMemoryStorageRegistry {
    /// Create a new empty registry with a fresh identity.
    pub fn new() -> Self {
        Self {
            id: RegistryId::mint(),
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Sorted keys of all live entries.
    pub fn live_keys(&self) -> Vec<ObjectKey> {
        let map = self.entries.read().expect("lock poisoned");
        let mut keys: Vec<ObjectKey> = map
            .iter()
            .filter(|(_, entry)| entry.is_live())
            .map(|(key, _)| *key)
            .collect();
        keys.sort();
        keys
    }
}

impl Default for InMemoryStorageRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageRegistry for InMemoryStorageRegistry {
    fn id(&self) -> RegistryId {
        self.id
    }

    fn adopt(&self, token: &ScopeToken, handle: &TrackedHandle) -> RegistryResult<()> {
        if token.registry() != &self.id {
            return Err(RegistryError::ForeignToken {
                token_registry: *token.registry(),
                registry: self.id,
            });
        }
        if !handle.is_live() {
            return Err(RegistryError::ObjectExpired);
        }

        let mut map = self.entries.write().expect("lock poisoned");
        match map.get(&handle.key()) {
            Some(entry) if entry.is_live() => {
                if &entry.scope == token.scope() {
                    Ok(())
                } else {
                    Err(RegistryError::AlreadyBound {
                        existing: entry.scope.clone(),
                        requested: token.scope().clone(),
                    })
                }
            }
            _ => {
                // Vacant, or a stale entry left by a dead object.
                map.insert(
                    handle.key(),
                    TrackedEntry {
                        liveness: handle.liveness(),
                        scope: token.scope().clone(),
                        bucket: None,
                    },
                );
                debug!(key = ?handle.key(), scope = %token.scope(), "object adopted");
                Ok(())
            }
        }
    }

    fn binding_of(&self, handle: &TrackedHandle) -> Option<ScopeId> {
        if !handle.is_live() {
            return None;
        }
        let map = self.entries.read().expect("lock poisoned");
        map.get(&handle.key())
            .filter(|entry| entry.is_live())
            .map(|entry| entry.scope.clone())
    }

    fn bucket_for(&self, handle: &TrackedHandle) -> RegistryResult<Bucket> {
        if !handle.is_live() {
            return Err(RegistryError::ObjectExpired);
        }
        let mut map = self.entries.write().expect("lock poisoned");
        match map.get_mut(&handle.key()) {
            Some(entry) if entry.is_live() => {
                Ok(entry.bucket.get_or_insert_with(Bucket::new).clone())
            }
            Some(_) => {
                // The object died between the liveness check and the lock.
                map.remove(&handle.key());
                Err(RegistryError::ObjectExpired)
            }
            None => Err(RegistryError::NotAdopted),
        }
    }

    fn contains(&self, handle: &TrackedHandle) -> bool {
        if !handle.is_live() {
            return false;
        }
        let map = self.entries.read().expect("lock poisoned");
        map.get(&handle.key()).is_some_and(|entry| entry.is_live())
    }

    fn len(&self) -> usize {
        let map = self.entries.read().expect("lock poisoned");
        map.values().filter(|entry| entry.is_live()).count()
    }

    fn purge(&self) -> usize {
        let mut map = self.entries.write().expect("lock poisoned");
        let before = map.len();
        map.retain(|_, entry| entry.is_live());
        let removed = before - map.len();
        if removed > 0 {
            debug!(removed, "purged dead entries");
        }
        removed
    }
}

impl std::fmt::Debug for InMemoryStorageRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let map = self.entries.read().expect("lock poisoned");
        let live = map.values().filter(|entry| entry.is_live()).count();
        f.debug_struct("InMemoryStorageRegistry")
            .field("id", &self.id)
            .field("live_entries", &live)
            .field("total_entries", &map.len())
            .finish()
    }
}
