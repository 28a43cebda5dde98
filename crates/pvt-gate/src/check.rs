use std::time::Duration;

use pvt_registry::{StorageRegistry, TrackedHandle};
use pvt_types::{DenialReason, Provenance};

use crate::config::GateConfig;
use crate::declarations::DeclarationTable;

// ---------------------------------------------------------------------------
// AccessRequest
// ---------------------------------------------------------------------------

/// One access being evaluated: which object, on whose behalf.
#[derive(Clone, Copy, Debug)]
pub struct AccessRequest<'a> {
    /// The object whose private storage is requested.
    pub handle: &'a TrackedHandle,
    /// The origin the caller presents.
    pub provenance: Provenance<'a>,
}

// ---------------------------------------------------------------------------
// CheckDecision
// ---------------------------------------------------------------------------

/// The outcome of a single check evaluation.
///
/// Checks have no error channel and must not panic: every evaluation
/// terminates in a decision, and anything a check cannot establish
/// resolves to a denial.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CheckDecision {
    /// The check passed; proceed to the next check.
    Pass,
    /// The check denied the access.
    Deny { reason: DenialReason },
}

impl CheckDecision {
    /// Returns `true` if the decision is `Pass`.
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    /// Returns `true` if the decision is `Deny`.
    pub fn is_deny(&self) -> bool {
        matches!(self, Self::Deny { .. })
    }
}

// ---------------------------------------------------------------------------
// CheckResult
// ---------------------------------------------------------------------------

/// Recorded result from a completed check evaluation.
#[derive(Clone, Debug)]
pub struct CheckResult {
    /// Name of the check that produced this result.
    pub check_name: String,
    /// Whether the check passed.
    pub passed: bool,
    /// Denial reason (populated when the check denied).
    pub reason: Option<DenialReason>,
    /// Wall-clock time the check took to evaluate.
    pub elapsed: Duration,
}

// ---------------------------------------------------------------------------
// GateContext
// ---------------------------------------------------------------------------

/// Contextual information available to every check.
pub struct GateContext<'a> {
    /// The registry the gate fronts.
    pub registry: &'a dyn StorageRegistry,
    /// Method declarations recorded with this gate.
    pub declarations: &'a DeclarationTable,
    /// The active configuration.
    pub config: &'a GateConfig,
}

// ---------------------------------------------------------------------------
// GateCheck trait
// ---------------------------------------------------------------------------

/// A single entitlement check in the gate pipeline.
///
/// Checks are evaluated in order and the pipeline is fail-fast. Each
/// check receives the request and a shared context and returns a
/// decision.
///
/// The trait is object-safe and `Send + Sync` so checks can be stored in
/// a `Vec<Box<dyn GateCheck>>`.
pub trait GateCheck: Send + Sync {
    /// Short name of this check (e.g., "token", "ownership").
    fn name(&self) -> &str;

    /// Evaluate the request and return a decision.
    fn evaluate(&self, request: &AccessRequest<'_>, context: &GateContext<'_>) -> CheckDecision;
}
