//! High-level API for Privault.
//!
//! [`Vault`] bundles one storage registry with one access gate and
//! exposes the whole system through `Arc`-level calls: define a scope,
//! declare its methods, construct or adopt objects, and open their
//! private buckets. Applications embedding Privault start here; the
//! `pvt-registry` and `pvt-gate` crates remain available when a caller
//! needs the underlying pieces.
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use pvt_sdk::Vault;
//! use serde_json::json;
//!
//! let vault = Vault::new();
//! let scope = vault.define_scope("Counter").unwrap();
//! vault.declare_method(&scope, "value", true).unwrap();
//!
//! // A constructor claims the object and seeds its private state.
//! let counter = Arc::new(());
//! let bucket = vault.open_constructor(&scope, &counter).unwrap();
//! bucket.set("value", json!(1));
//!
//! // A declared method reads it back through the gate.
//! let bucket = vault.open_method(&scope, "value", &counter).unwrap();
//! assert_eq!(bucket.get("value"), Some(json!(1)));
//! ```

pub mod error;
pub mod vault;

pub use error::{VaultError, VaultResult};
pub use vault::Vault;

// Re-export key types
pub use pvt_gate::{AccessOutcome, GateConfig};
pub use pvt_registry::Bucket;
pub use pvt_types::{AccessDecision, DenialReason, MethodId, RegistryId, ScopeId, ScopeToken};
