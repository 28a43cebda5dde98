use serde::{Deserialize, Serialize};

/// Configuration for the access gate.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateConfig {
    /// When `true`, the gate waives declaration and ownership checks:
    /// any token of this registry opens any object's bucket, and unbound
    /// objects are claimed on first touch. This trades isolation for
    /// convenience and is meant for embedding and migration scenarios.
    /// The token check still runs; foreign registries stay out.
    pub permissive: bool,
    /// When `true`, a declared method touching an object not yet bound
    /// to any scope claims it for the token's scope instead of being
    /// denied. Constructor accesses always claim unbound objects.
    pub lazy_adoption: bool,
}

impl GateConfig {
    /// The strict configuration: every access must present a matching
    /// token, a private-use declaration, and a matching binding. This is
    /// the default.
    pub fn strict() -> Self {
        Self::default()
    }

    /// A maximally permissive configuration.
    pub fn permissive() -> Self {
        Self {
            permissive: true,
            ..Default::default()
        }
    }

    /// Strict checks, plus claiming of unbound objects by declared
    /// methods.
    pub fn with_lazy_adoption() -> Self {
        Self {
            lazy_adoption: true,
            ..Default::default()
        }
    }
}
