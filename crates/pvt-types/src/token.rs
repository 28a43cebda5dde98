use std::fmt;

use crate::error::TypeError;
use crate::identity::{RegistryId, ScopeId};
use crate::names::validate_scope_label;

/// Unforgeable capability for one defining scope.
///
/// A token is minted exactly once, when the scope is defined, and is the
/// only value that opens the scope's private storage. Possession is the
/// entire credential: the gate never inspects who is calling, only which
/// token is presented.
///
/// Unforgeability is structural. The fields are private, the type has no
/// deserialization impl, and no constructor accepts an existing
/// [`ScopeId`]; every mint derives a fresh id. Knowing a scope's id
/// therefore never yields its token.
///
/// Tokens are `Clone`. A defining entity may hand its capability to code
/// it trusts, and every clone is equivalent. What cannot happen is
/// conjuring a token from public data.
#[derive(Clone, PartialEq, Eq)]
pub struct ScopeToken {
    registry: RegistryId,
    scope: ScopeId,
    label: String,
}

impl ScopeToken {
    /// Mint the capability for a new scope in `registry`.
    ///
    /// Validates the label and derives a fresh [`ScopeId`]. Two mints with
    /// the same label produce unrelated tokens.
    pub fn mint(registry: &RegistryId, label: &str) -> Result<Self, TypeError> {
        validate_scope_label(label)?;
        Ok(Self {
            registry: *registry,
            scope: ScopeId::mint(registry, label),
            label: label.to_string(),
        })
    }

    /// The registry this token belongs to.
    pub fn registry(&self) -> &RegistryId {
        &self.registry
    }

    /// The scope this token opens.
    pub fn scope(&self) -> &ScopeId {
        &self.scope
    }

    /// The label the scope was defined with.
    ///
    /// Labels are diagnostic only; storage identity rests on the scope id.
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Debug for ScopeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScopeToken({}: {})", self.label, self.scope.short_id())
    }
}
