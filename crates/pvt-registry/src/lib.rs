//! Identity-keyed private storage for shared objects.
//!
//! This crate tracks objects by allocation identity (which `Arc` they
//! live in, not what they contain) and gives each tracked object at most
//! one scope binding and one field bucket. The registry holds only weak
//! references, so tracking an object never extends its lifetime.
//!
//! The registry is mechanism, not policy. It enforces identity, binding,
//! and liveness rules; deciding who may obtain a bucket is the job of
//! `pvt-gate` in front of it. Several registries can coexist in one
//! process. Each token names the registry that minted it, and a registry
//! refuses foreign tokens.
//!
//! # Key Types
//!
//! - [`ObjectKey`] / [`TrackedHandle`]: allocation identity of a shared object
//! - [`Bucket`]: cloneable handle to one object's private field map
//! - [`StorageRegistry`]: the registry trait
//! - [`InMemoryStorageRegistry`]: `HashMap`-based implementation

pub mod bucket;
pub mod error;
pub mod handle;
pub mod memory;
pub mod traits;

pub use bucket::Bucket;
pub use error::{RegistryError, RegistryResult};
pub use handle::{ObjectKey, TrackedHandle};
pub use memory::InMemoryStorageRegistry;
pub use traits::StorageRegistry;
