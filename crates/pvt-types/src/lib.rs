//! Foundation types for Privault (PVT).
//!
//! This crate provides the identity, capability, and decision types used
//! throughout the Privault system. Every other PVT crate depends on
//! `pvt-types`. Everything here is small, cheap to clone, and free of
//! behavior beyond construction and formatting.
//!
//! # Key Types
//!
//! - [`RegistryId`]: identity of one registry instance (UUID v7)
//! - [`ScopeId`]: nonce-derived identity of one defining scope (BLAKE3)
//! - [`ScopeToken`]: unforgeable capability minted when a scope is defined
//! - [`MethodId`] / [`MethodDecl`]: declared methods and their private-use flag
//! - [`Provenance`]: the call origin presented with each access
//! - [`AccessDecision`] / [`DenialReason`]: the gate's verdict vocabulary

pub mod decision;
pub mod error;
pub mod identity;
pub mod method;
pub mod names;
pub mod provenance;
pub mod token;

pub use decision::{AccessDecision, DenialReason};
pub use error::TypeError;
pub use identity::{RegistryId, ScopeId};
pub use method::{MethodDecl, MethodId};
pub use names::{validate_method_name, validate_scope_label};
pub use provenance::Provenance;
pub use token::ScopeToken;
