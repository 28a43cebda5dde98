use pvt_types::DenialReason;

use crate::check::{AccessRequest, CheckDecision, GateCheck, GateContext};

/// Verifies the method-level declaration for the access.
///
/// Constructor accesses pass: initialization happens before any method
/// exists to declare. Method accesses must name a method declared in the
/// token's scope with `uses_private = true`; an undeclared name and a
/// declared-without-private name are distinct denials.
pub struct DeclarationCheck;

impl GateCheck for DeclarationCheck {
    fn name(&self) -> &str {
        "declaration"
    }

    fn evaluate(&self, request: &AccessRequest<'_>, context: &GateContext<'_>) -> CheckDecision {
        if context.config.permissive {
            return CheckDecision::Pass;
        }

        let method = match request.provenance.method_name() {
            None => return CheckDecision::Pass,
            Some(name) => name,
        };

        let scope = request.provenance.token().scope();
        match context.declarations.verdict(scope, method) {
            Some(true) => CheckDecision::Pass,
            Some(false) => CheckDecision::Deny {
                reason: DenialReason::PrivateUseNotDeclared {
                    method: method.to_string(),
                },
            },
            None => CheckDecision::Deny {
                reason: DenialReason::UndeclaredMethod {
                    method: method.to_string(),
                },
            },
        }
    }
}
