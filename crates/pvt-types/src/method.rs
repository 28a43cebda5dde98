use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::identity::ScopeId;

/// Stable identity of a declared method within a scope.
///
/// Derived with BLAKE3 from the owning scope and the method name, so the
/// same (scope, name) pair always produces the same id, and distinct
/// scopes declaring the same name get distinct ids.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MethodId {
    hash: [u8; 32],
}

impl MethodId {
    /// Derive the id for `name` within `scope`.
    pub fn derive(scope: &ScopeId, name: &str) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"pvt-method-v1:");
        hasher.update(scope.as_bytes());
        hasher.update(b":");
        hasher.update(name.as_bytes());
        Self {
            hash: *hasher.finalize().as_bytes(),
        }
    }

    /// The raw 32-byte hash.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.hash
    }

    /// Full hex-encoded string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.hash)
    }

    /// Short identifier (first 8 hex characters).
    pub fn short_id(&self) -> String {
        format!("mt:{}", hex::encode(&self.hash[..4]))
    }

    /// Parse from a hex string (64 hex characters).
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        let s = s.strip_prefix("mt:").unwrap_or(s);
        let bytes = hex::decode(s).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        if bytes.len() != 32 {
            return Err(TypeError::InvalidLength {
                expected: 32,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self { hash: arr })
    }
}

impl fmt::Debug for MethodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MethodId({})", self.short_id())
    }
}

impl fmt::Display for MethodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_id())
    }
}

/// A method's recorded declaration.
///
/// Declarations are made once, when the defining entity is set up, and are
/// immutable afterwards. At call time the gate consults the recorded
/// `uses_private` flag instead of inspecting anything about the caller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDecl {
    /// Derived identity of the method.
    pub id: MethodId,
    /// Scope the method belongs to.
    pub scope: ScopeId,
    /// Method name as declared.
    pub name: String,
    /// Whether the body accesses private storage.
    pub uses_private: bool,
}

impl MethodDecl {
    /// Record a declaration for `name` within `scope`.
    pub fn new(scope: ScopeId, name: impl Into<String>, uses_private: bool) -> Self {
        let name = name.into();
        let id = MethodId::derive(&scope, &name);
        Self {
            id,
            scope,
            name,
            uses_private,
        }
    }
}
