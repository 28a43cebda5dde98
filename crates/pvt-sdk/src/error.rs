use pvt_types::DenialReason;
use thiserror::Error;

/// Errors surfaced by the high-level vault API.
#[derive(Debug, Error)]
pub enum VaultError {
    #[error("gate error: {0}")]
    Gate(#[from] pvt_gate::GateError),

    #[error("registry error: {0}")]
    Registry(#[from] pvt_registry::RegistryError),

    #[error("type error: {0}")]
    Types(#[from] pvt_types::TypeError),
}

impl VaultError {
    /// The denial reason, when the failure was an access denial.
    pub fn denial_reason(&self) -> Option<&DenialReason> {
        match self {
            Self::Gate(err) => err.denial_reason(),
            _ => None,
        }
    }

    /// Returns `true` when the failure was an access denial rather
    /// than a usage or state error.
    pub fn is_denied(&self) -> bool {
        self.denial_reason().is_some()
    }
}

pub type VaultResult<T> = Result<T, VaultError>;
