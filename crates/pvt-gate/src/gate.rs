use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::debug;

use pvt_registry::{Bucket, RegistryError, StorageRegistry, TrackedHandle};
use pvt_types::{AccessDecision, DenialReason, MethodId, Provenance, ScopeToken};

use crate::check::{AccessRequest, CheckDecision, CheckResult, GateCheck, GateContext};
use crate::checks::{DeclarationCheck, OwnershipCheck, TokenCheck};
use crate::config::GateConfig;
use crate::declarations::DeclarationTable;
use crate::error::{GateError, GateResult};

// ---------------------------------------------------------------------------
// AccessOutcome
// ---------------------------------------------------------------------------

/// The outcome of running one access through the full check pipeline.
#[derive(Clone, Debug)]
pub struct AccessOutcome {
    /// The final decision.
    pub decision: AccessDecision,
    /// Per-check results in evaluation order.
    pub check_results: Vec<CheckResult>,
    /// Total wall-clock time for the evaluation.
    pub elapsed: Duration,
}

impl AccessOutcome {
    /// Returns `true` if the access was granted.
    pub fn is_granted(&self) -> bool {
        self.decision.is_granted()
    }

    /// The denial reason, when denied.
    pub fn denial_reason(&self) -> Option<&DenialReason> {
        self.decision.denial_reason()
    }
}

// ---------------------------------------------------------------------------
// AccessGate
// ---------------------------------------------------------------------------

/// The access gate: a fail-fast pipeline of checks in front of one
/// registry.
///
/// The gate is the only path to a bucket. A fresh gate already carries
/// the standard pipeline (token, declaration, ownership); additional
/// checks can only narrow what is granted, never widen it.
pub struct AccessGate {
    registry: Arc<dyn StorageRegistry>,
    declarations: DeclarationTable,
    checks: Vec<Box<dyn GateCheck>>,
    config: GateConfig,
}

impl AccessGate {
    /// Create a gate over `registry` with the standard check pipeline:
    /// token -> declaration -> ownership.
    pub fn new(registry: Arc<dyn StorageRegistry>, config: GateConfig) -> Self {
        let checks: Vec<Box<dyn GateCheck>> = vec![
            Box::new(TokenCheck),
            Box::new(DeclarationCheck),
            Box::new(OwnershipCheck),
        ];
        Self {
            registry,
            declarations: DeclarationTable::new(),
            checks,
            config,
        }
    }

    /// Append a check to the end of the pipeline.
    pub fn add_check(&mut self, check: Box<dyn GateCheck>) {
        self.checks.push(check);
    }

    /// The current configuration.
    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Number of checks in the pipeline.
    pub fn check_count(&self) -> usize {
        self.checks.len()
    }

    /// The registry this gate fronts.
    pub fn registry(&self) -> &dyn StorageRegistry {
        self.registry.as_ref()
    }

    /// The declaration table consulted by the pipeline.
    pub fn declarations(&self) -> &DeclarationTable {
        &self.declarations
    }

    /// Record a method declaration for the token's scope.
    ///
    /// Tokens minted by another registry are refused with the same
    /// reason the token check gives at access time.
    pub fn declare(
        &self,
        token: &ScopeToken,
        name: &str,
        uses_private: bool,
    ) -> GateResult<MethodId> {
        let registry = self.registry.id();
        if token.registry() != &registry {
            return Err(GateError::Denied {
                reason: DenialReason::ForeignRegistry {
                    token_registry: *token.registry(),
                    registry,
                },
            });
        }
        self.declarations.declare(token, name, uses_private)
    }

    /// Evaluate one access through the pipeline.
    ///
    /// The pipeline is fail-fast: the first check that denies stops the
    /// evaluation. Evaluation has one deliberate side effect: a granted
    /// access to an object not yet bound to any scope claims it for the
    /// token's scope (constructor accesses always; method accesses only
    /// under `lazy_adoption` or in permissive mode).
    pub fn evaluate(&self, handle: &TrackedHandle, provenance: Provenance<'_>) -> AccessOutcome {
        let pipeline_start = Instant::now();
        let request = AccessRequest { handle, provenance };
        let context = GateContext {
            registry: self.registry.as_ref(),
            declarations: &self.declarations,
            config: &self.config,
        };

        let mut check_results = Vec::with_capacity(self.checks.len());

        for check in &self.checks {
            let check_start = Instant::now();
            let decision = check.evaluate(&request, &context);
            let elapsed = check_start.elapsed();

            let (passed, reason) = match &decision {
                CheckDecision::Pass => (true, None),
                CheckDecision::Deny { reason } => (false, Some(reason.clone())),
            };

            check_results.push(CheckResult {
                check_name: check.name().to_string(),
                passed,
                reason,
                elapsed,
            });

            // Fail-fast: stop on first denial.
            if let CheckDecision::Deny { reason } = decision {
                debug!(check = check.name(), %reason, "access denied");
                return AccessOutcome {
                    decision: AccessDecision::Denied { reason },
                    check_results,
                    elapsed: pipeline_start.elapsed(),
                };
            }
        }

        AccessOutcome {
            decision: AccessDecision::Granted,
            check_results,
            elapsed: pipeline_start.elapsed(),
        }
    }

    /// Evaluate an access and, when granted, fetch the bucket.
    ///
    /// Denials surface as [`GateError::Denied`] carrying the structured
    /// reason. An object that dies between the evaluation and the fetch
    /// is reported the same way as one that died before it.
    pub fn open(&self, handle: &TrackedHandle, provenance: Provenance<'_>) -> GateResult<Bucket> {
        let outcome = self.evaluate(handle, provenance);
        match outcome.decision {
            AccessDecision::Granted => match self.registry.bucket_for(handle) {
                Ok(bucket) => Ok(bucket),
                Err(RegistryError::ObjectExpired) => Err(GateError::Denied {
                    reason: DenialReason::ObjectExpired,
                }),
                Err(other) => Err(other.into()),
            },
            AccessDecision::Denied { reason } => Err(GateError::Denied { reason }),
        }
    }
}

impl std::fmt::Debug for AccessGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessGate")
            .field("registry", &self.registry.id())
            .field("check_count", &self.check_count())
            .field("config", &self.config)
            .finish()
    }
}
