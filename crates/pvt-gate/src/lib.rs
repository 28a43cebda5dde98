//! Entitlement gate for Privault private storage.
//!
//! Every private-storage access passes through the gate before a bucket
//! is handed out. The gate runs a fail-fast pipeline of checks (token,
//! declaration, ownership) against one registry and produces a final
//! grant/deny decision with a full audit trail. Ambiguity always resolves
//! to a denial; the pipeline itself never errors and never panics.
//!
//! Entitlement rests on possession: access is granted to whoever presents
//! the scope's [`ScopeToken`](pvt_types::ScopeToken), not to whoever has
//! a particular name in a call stack. Whether a method uses private
//! storage is declared once, up front, in the [`DeclarationTable`];
//! nothing is inferred at call time.
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use pvt_gate::{AccessGate, GateConfig};
//! use pvt_registry::{InMemoryStorageRegistry, StorageRegistry, TrackedHandle};
//! use pvt_types::{Provenance, ScopeToken};
//! use serde_json::json;
//!
//! let registry = Arc::new(InMemoryStorageRegistry::new());
//! let gate = AccessGate::new(registry.clone(), GateConfig::default());
//!
//! let token = ScopeToken::mint(&registry.id(), "Counter").unwrap();
//! gate.declare(&token, "increment", true).unwrap();
//!
//! let counter = Arc::new(());
//! let handle = TrackedHandle::of(&counter);
//!
//! // The constructing context claims the object and seeds its state.
//! let bucket = gate
//!     .open(&handle, Provenance::Constructor { token: &token })
//!     .unwrap();
//! bucket.set("count", json!(0));
//!
//! // A declared method reads it back through the gate.
//! let bucket = gate
//!     .open(
//!         &handle,
//!         Provenance::Method {
//!             token: &token,
//!             method: "increment",
//!         },
//!     )
//!     .unwrap();
//! assert_eq!(bucket.get("count"), Some(json!(0)));
//! ```

pub mod check;
pub mod checks;
pub mod config;
pub mod declarations;
pub mod error;
pub mod gate;

// Re-exports for convenience.
pub use check::{AccessRequest, CheckDecision, CheckResult, GateCheck, GateContext};
pub use checks::{DeclarationCheck, OwnershipCheck, TokenCheck};
pub use config::GateConfig;
pub use declarations::DeclarationTable;
pub use error::{GateError, GateResult};
pub use gate::{AccessGate, AccessOutcome};
