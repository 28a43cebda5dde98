use pvt_types::{RegistryId, ScopeId, ScopeToken};

use crate::bucket::Bucket;
use crate::error::RegistryResult;
use crate::handle::TrackedHandle;

/// Weak, identity-keyed registry of objects and their private storage.
///
/// All implementations must satisfy these invariants:
/// - Objects are keyed by allocation identity, never by value. Clones of
///   one `Arc` are one object; equal values in different allocations are
///   different objects.
/// - The registry holds only weak references. Tracking an object never
///   keeps it alive, and entries for dropped objects answer as if absent
///   until they are purged.
/// - An object has at most one binding and at most one bucket. Binding is
///   write-once: rebinding to a different scope fails and leaves existing
///   state untouched.
/// - Bucket creation is get-or-create under one lock; concurrent callers
///   converge on the same bucket.
/// - Foreign tokens and dead objects produce errors, never implicit
///   entries.
pub trait StorageRegistry: Send + Sync {
    /// Identity of this registry instance.
    fn id(&self) -> RegistryId;

    /// Bind an object to the token's scope.
    ///
    /// Idempotent for the scope the object is already bound to. Fails if
    /// the token is foreign, the object is dead, or the object is bound
    /// to a different scope.
    fn adopt(&self, token: &ScopeToken, handle: &TrackedHandle) -> RegistryResult<()>;

    /// The scope the object is bound to, if it is tracked and alive.
    fn binding_of(&self, handle: &TrackedHandle) -> Option<ScopeId>;

    /// Get or lazily create the object's bucket.
    ///
    /// Fails with `NotAdopted` for objects never bound to a scope and
    /// with `ObjectExpired` for dead objects.
    fn bucket_for(&self, handle: &TrackedHandle) -> RegistryResult<Bucket>;

    /// Whether the object has a live entry.
    fn contains(&self, handle: &TrackedHandle) -> bool;

    /// Number of live entries.
    fn len(&self) -> usize;

    /// Returns `true` if there are no live entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop entries whose object has died. Returns how many were removed.
    fn purge(&self) -> usize;
}
