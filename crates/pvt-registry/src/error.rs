use pvt_types::{RegistryId, ScopeId};

/// Errors from registry operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RegistryError {
    /// The token was minted by a different registry.
    #[error("foreign token: minted by {token_registry}, this registry is {registry}")]
    ForeignToken {
        token_registry: RegistryId,
        registry: RegistryId,
    },

    /// The object is already bound to a different scope. The existing
    /// binding and bucket are left untouched.
    #[error("object already bound to {existing}, cannot rebind to {requested}")]
    AlreadyBound {
        existing: ScopeId,
        requested: ScopeId,
    },

    /// The object was dropped; nothing can be stored for it.
    #[error("object has been dropped")]
    ObjectExpired,

    /// The object was never adopted by any scope.
    #[error("object was never adopted by a scope")]
    NotAdopted,
}

/// Result alias for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;
