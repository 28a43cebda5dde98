use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::{Arc, RwLock};

use serde_json::Value;

/// Cloneable handle to one object's private field map.
///
/// All clones share the same storage: a field written through one clone
/// is immediately visible through every other. Obtaining a bucket is what
/// the gate authorizes; reads and writes on a bucket already in hand are
/// not re-checked.
///
/// Absent fields read as `None`. Values are JSON-shaped.
#[derive(Clone, Default)]
pub struct Bucket {
    fields: Arc<RwLock<HashMap<String, Value>>>,
}

impl Bucket {
    /// Create a new empty bucket.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a field. Returns `None` for fields never written.
    pub fn get(&self, field: &str) -> Option<Value> {
        self.fields.read().expect("lock poisoned").get(field).cloned()
    }

    /// Write a field, inserting or replacing it.
    pub fn set(&self, field: impl Into<String>, value: Value) {
        self.fields
            .write()
            .expect("lock poisoned")
            .insert(field.into(), value);
    }

    /// Remove a field, returning its previous value.
    pub fn remove(&self, field: &str) -> Option<Value> {
        self.fields.write().expect("lock poisoned").remove(field)
    }

    /// Whether a field has been written.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.read().expect("lock poisoned").contains_key(field)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.read().expect("lock poisoned").len()
    }

    /// Returns `true` if no field has been written.
    pub fn is_empty(&self) -> bool {
        self.fields.read().expect("lock poisoned").is_empty()
    }

    /// Sorted list of field names.
    pub fn field_names(&self) -> Vec<String> {
        let map = self.fields.read().expect("lock poisoned");
        let mut names: Vec<String> = map.keys().cloned().collect();
        names.sort();
        names
    }

    /// Point-in-time copy of all fields.
    pub fn snapshot(&self) -> BTreeMap<String, Value> {
        let map = self.fields.read().expect("lock poisoned");
        map.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }

    /// Remove all fields.
    pub fn clear(&self) {
        self.fields.write().expect("lock poisoned").clear();
    }

    /// Whether two bucket handles refer to the same storage.
    pub fn shares_storage(&self, other: &Bucket) -> bool {
        Arc::ptr_eq(&self.fields, &other.fields)
    }
}

impl fmt::Debug for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bucket")
            .field("field_count", &self.len())
            .finish()
    }
}
