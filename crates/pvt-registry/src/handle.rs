use std::any::Any;
use std::fmt;
use std::sync::{Arc, Weak};

/// Identity key of a tracked object: the address of its shared allocation.
///
/// Keys compare by pointer identity, never by value. Two clones of the
/// same `Arc` share a key; two equal values in different allocations do
/// not. A key alone says nothing about liveness, which is why the
/// registry stores a weak reference alongside it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectKey(usize);

impl ObjectKey {
    /// The key for `object`'s allocation.
    pub fn of<T>(object: &Arc<T>) -> Self {
        Self(Arc::as_ptr(object) as *const () as usize)
    }

    /// The raw address.
    pub fn as_usize(&self) -> usize {
        self.0
    }
}

impl fmt::Debug for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectKey({:#x})", self.0)
    }
}

/// Type-erased, non-owning view of a shared object.
///
/// A handle carries the object's identity key and a weak reference for
/// liveness checks. It never extends the object's lifetime, and it is
/// what the registry trait operates on, which keeps the trait free of
/// type parameters.
#[derive(Clone)]
pub struct TrackedHandle {
    key: ObjectKey,
    liveness: Weak<dyn Any + Send + Sync>,
}

impl TrackedHandle {
    /// Create a handle for a shared object.
    pub fn of<T: Any + Send + Sync>(object: &Arc<T>) -> Self {
        // Method-call clone keeps the receiver concrete; the result
        // unsizes to the erased type at the binding.
        let erased: Arc<dyn Any + Send + Sync> = object.clone();
        Self {
            key: ObjectKey::of(object),
            liveness: Arc::downgrade(&erased),
        }
    }

    /// The identity key of the tracked allocation.
    pub fn key(&self) -> ObjectKey {
        self.key
    }

    /// Whether the tracked object is still alive.
    pub fn is_live(&self) -> bool {
        self.liveness.strong_count() > 0
    }

    pub(crate) fn liveness(&self) -> Weak<dyn Any + Send + Sync> {
        Weak::clone(&self.liveness)
    }
}

impl fmt::Debug for TrackedHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackedHandle")
            .field("key", &self.key)
            .field("live", &self.is_live())
            .finish()
    }
}
