use pvt_types::DenialReason;

use crate::check::{AccessRequest, CheckDecision, GateCheck, GateContext};

/// Verifies that the presented token belongs to this gate's registry.
///
/// A token minted by another registry proves nothing here, however valid
/// it is over there. This check runs in every mode, including permissive.
pub struct TokenCheck;

impl GateCheck for TokenCheck {
    fn name(&self) -> &str {
        "token"
    }

    fn evaluate(&self, request: &AccessRequest<'_>, context: &GateContext<'_>) -> CheckDecision {
        let token = request.provenance.token();
        let registry = context.registry.id();
        if token.registry() == &registry {
            CheckDecision::Pass
        } else {
            CheckDecision::Deny {
                reason: DenialReason::ForeignRegistry {
                    token_registry: *token.registry(),
                    registry,
                },
            }
        }
    }
}
