use pvt_registry::RegistryError;
use pvt_types::{DenialReason, ScopeId, TypeError};

/// Errors from gate operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GateError {
    /// The gate refused the access.
    #[error("access denied: {reason}")]
    Denied { reason: DenialReason },

    /// A method was re-declared with a different private-use flag.
    #[error("conflicting declaration for '{method}' in {scope}")]
    DeclarationConflict { scope: ScopeId, method: String },

    /// A label or method name failed validation.
    #[error("name error: {0}")]
    Name(#[from] TypeError),

    /// The registry failed while fetching storage.
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),
}

impl GateError {
    /// The denial reason, when this is a denial.
    pub fn denial_reason(&self) -> Option<&DenialReason> {
        match self {
            Self::Denied { reason } => Some(reason),
            _ => None,
        }
    }

    /// Returns `true` for `Denied`.
    pub fn is_denied(&self) -> bool {
        matches!(self, Self::Denied { .. })
    }
}

/// Result alias for gate operations.
pub type GateResult<T> = Result<T, GateError>;
