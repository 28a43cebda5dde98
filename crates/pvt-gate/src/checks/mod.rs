//! Built-in entitlement checks.
//!
//! The standard pipeline runs them in order: [`TokenCheck`] establishes
//! that the capability belongs to this registry, [`DeclarationCheck`]
//! establishes that the calling method opted in to private storage, and
//! [`OwnershipCheck`] resolves the object's scope binding.

pub mod declaration;
pub mod ownership;
pub mod token;

pub use declaration::DeclarationCheck;
pub use ownership::OwnershipCheck;
pub use token::TokenCheck;
