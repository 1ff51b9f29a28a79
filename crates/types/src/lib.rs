//! Core domain types for lakevault storage vault management.
//!
//! This crate defines the pre-submission representation of a storage vault
//! ([`VaultDefinition`]) and the pure property validation applied before a
//! definition may be submitted to the metadata authority. It has no RPC or
//! runtime dependencies so that both the authority client and test doubles
//! can share the same types.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod validation;
mod vault;

pub use validation::{validate_properties, ValidationError};
pub use vault::{VaultDefinition, VaultId, VaultKind};
