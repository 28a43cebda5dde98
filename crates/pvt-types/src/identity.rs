use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::TypeError;

/// Identity of one storage registry instance.
///
/// Every registry mints its own `RegistryId` at construction, so several
/// registries can coexist in one process without sharing anything. Tokens
/// record the id of the registry that minted them, and a registry refuses
/// tokens carrying any other id.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RegistryId(Uuid);

impl RegistryId {
    /// Mint a fresh registry identity.
    pub fn mint() -> Self {
        Self(Uuid::now_v7())
    }

    /// The underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Short identifier (first 8 hex characters).
    pub fn short_id(&self) -> String {
        format!("rg:{}", &self.0.simple().to_string()[..8])
    }

    /// Wrap an existing UUID. Use `mint()` for production code.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Debug for RegistryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RegistryId({})", self.short_id())
    }
}

impl fmt::Display for RegistryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_id())
    }
}

/// Nonce-derived identity of one defining scope.
///
/// A `ScopeId` is derived with BLAKE3 from the minting registry, the
/// scope's label, and a fresh 16-byte nonce. The nonce makes every
/// definition distinct: two scopes that happen to share a label never
/// share an identity, so storage cannot alias on names.
///
/// A `ScopeId` is public knowledge. It appears in bindings, declarations,
/// and error messages, and grants nothing by itself; opening storage
/// requires the [`ScopeToken`](crate::token::ScopeToken) minted alongside
/// it.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ScopeId {
    hash: [u8; 32],
}

impl ScopeId {
    /// Derive a fresh scope identity within `registry`.
    ///
    /// Each call produces a distinct id, even for identical labels.
    pub fn mint(registry: &RegistryId, label: &str) -> Self {
        let mut nonce = [0u8; 16];
        rand::Rng::fill(&mut rand::thread_rng(), &mut nonce);
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"pvt-scope-v1:");
        hasher.update(registry.as_uuid().as_bytes());
        hasher.update(b":");
        hasher.update(label.as_bytes());
        hasher.update(b":");
        hasher.update(&nonce);
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
        format!("sc:{}", hex::encode(&self.hash[..4]))
    }

    /// Parse from a hex string (64 hex characters).
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        let s = s.strip_prefix("sc:").unwrap_or(s);
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

    /// Create from a raw 32-byte hash. Use `mint()` for production code.
    pub fn from_raw(hash: [u8; 32]) -> Self {
        Self { hash }
    }
}

impl fmt::Debug for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScopeId({})", self.short_id())
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_id())
    }
}
