use pvt_registry::RegistryError;
use pvt_types::DenialReason;

use crate::check::{AccessRequest, CheckDecision, GateCheck, GateContext};

/// Resolves the object's scope binding against the presented token.
///
/// Bound objects must be bound to the token's scope. Unbound objects are
/// claimed by constructor accesses (and, under `lazy_adoption`, by
/// declared method accesses); any other access to an unbound object is
/// denied.
///
/// Claiming happens inside this check so the binding read and the bind
/// are one registry operation; concurrent first touches converge on a
/// single binding.
pub struct OwnershipCheck;

impl OwnershipCheck {
    fn claim(&self, request: &AccessRequest<'_>, context: &GateContext<'_>) -> CheckDecision {
        let token = request.provenance.token();
        match context.registry.adopt(token, request.handle) {
            Ok(()) => CheckDecision::Pass,
            Err(RegistryError::AlreadyBound { existing, .. }) => CheckDecision::Deny {
                reason: DenialReason::ScopeMismatch {
                    bound: existing,
                    presented: token.scope().clone(),
                },
            },
            Err(RegistryError::ObjectExpired) => CheckDecision::Deny {
                reason: DenialReason::ObjectExpired,
            },
            Err(RegistryError::ForeignToken {
                token_registry,
                registry,
            }) => CheckDecision::Deny {
                reason: DenialReason::ForeignRegistry {
                    token_registry,
                    registry,
                },
            },
            Err(RegistryError::NotAdopted) => CheckDecision::Deny {
                reason: DenialReason::UnclaimedObject,
            },
        }
    }
}

impl GateCheck for OwnershipCheck {
    fn name(&self) -> &str {
        "ownership"
    }

    fn evaluate(&self, request: &AccessRequest<'_>, context: &GateContext<'_>) -> CheckDecision {
        if !request.handle.is_live() {
            return CheckDecision::Deny {
                reason: DenialReason::ObjectExpired,
            };
        }

        // Permissive mode accepts any existing binding and claims the
        // rest on first touch.
        if context.config.permissive {
            return match context.registry.binding_of(request.handle) {
                Some(_) => CheckDecision::Pass,
                None => self.claim(request, context),
            };
        }

        let token = request.provenance.token();
        match context.registry.binding_of(request.handle) {
            Some(bound) if &bound == token.scope() => CheckDecision::Pass,
            Some(bound) => CheckDecision::Deny {
                reason: DenialReason::ScopeMismatch {
                    bound,
                    presented: token.scope().clone(),
                },
            },
            None if request.provenance.is_constructor() => self.claim(request, context),
            None if context.config.lazy_adoption => self.claim(request, context),
            None => CheckDecision::Deny {
                reason: DenialReason::UnclaimedObject,
            },
        }
    }
}
