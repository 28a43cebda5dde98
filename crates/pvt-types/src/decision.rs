use std::fmt;

use serde::{Deserialize, Serialize};

use crate::identity::{RegistryId, ScopeId};

/// Why the gate denied an access.
///
/// Every ambiguous situation resolves to one of these; the gate never
/// guesses in favor of the caller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DenialReason {
    /// The presented token was minted by a different registry.
    ForeignRegistry {
        token_registry: RegistryId,
        registry: RegistryId,
    },
    /// The named method was never declared in the token's scope.
    UndeclaredMethod { method: String },
    /// The method is declared but did not opt in to private storage.
    PrivateUseNotDeclared { method: String },
    /// The object is not bound to any scope.
    UnclaimedObject,
    /// The object is bound to a different scope than the token opens.
    ScopeMismatch { bound: ScopeId, presented: ScopeId },
    /// The object was dropped before the access completed.
    ObjectExpired,
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ForeignRegistry {
                token_registry,
                registry,
            } => write!(
                f,
                "token minted by {} cannot open storage in {}",
                token_registry, registry
            ),
            Self::UndeclaredMethod { method } => {
                write!(f, "method '{}' was never declared in this scope", method)
            }
            Self::PrivateUseNotDeclared { method } => {
                write!(f, "method '{}' did not declare private storage use", method)
            }
            Self::UnclaimedObject => write!(f, "object is not bound to any scope"),
            Self::ScopeMismatch { bound, presented } => write!(
                f,
                "object is bound to {}, token presents {}",
                bound, presented
            ),
            Self::ObjectExpired => write!(f, "object was dropped before the access completed"),
        }
    }
}

/// Final verdict of a gate evaluation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessDecision {
    /// The caller may receive the bucket.
    Granted,
    /// The access is refused.
    Denied { reason: DenialReason },
}

impl AccessDecision {
    /// True when the decision grants access.
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }

    /// The denial reason, when denied.
    pub fn denial_reason(&self) -> Option<&DenialReason> {
        match self {
            Self::Granted => None,
            Self::Denied { reason } => Some(reason),
        }
    }
}

impl fmt::Display for AccessDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Granted => write!(f, "granted"),
            Self::Denied { reason } => write!(f, "denied: {}", reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn granted_reports_no_reason() {
        let decision = AccessDecision::Granted;
        assert!(decision.is_granted());
        assert!(decision.denial_reason().is_none());
    }

    #[test]
    fn denied_exposes_its_reason() {
        let decision = AccessDecision::Denied {
            reason: DenialReason::UnclaimedObject,
        };
        assert!(!decision.is_granted());
        assert_eq!(
            decision.denial_reason(),
            Some(&DenialReason::UnclaimedObject)
        );
    }

    #[test]
    fn display_includes_reason_text() {
        let decision = AccessDecision::Denied {
            reason: DenialReason::UndeclaredMethod {
                method: "get_x".to_string(),
            },
        };
        let text = decision.to_string();
        assert!(text.starts_with("denied:"));
        assert!(text.contains("get_x"));
    }

    #[test]
    fn serde_roundtrip() {
        let decision = AccessDecision::Denied {
            reason: DenialReason::PrivateUseNotDeclared {
                method: "poke".to_string(),
            },
        };
        let json = serde_json::to_string(&decision).unwrap();
        let parsed: AccessDecision = serde_json::from_str(&json).unwrap();
        assert_eq!(decision, parsed);
    }
}
