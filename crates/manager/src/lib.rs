//! Storage vault lifecycle management for lakevault.
//!
//! A storage vault is a named, typed reference to a durable storage backend
//! that the compute layer uses to persist and read table data. Vaults are
//! registered with a remote metadata authority — the single writer of vault
//! state and sole arbiter of name uniqueness. This crate provides the
//! [`StorageVaultManager`], which validates a proposed vault definition,
//! submits it, interprets the authority's response, and exposes a
//! consistent, idempotent create/alter contract.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use lakevault_client::{AuthorityClient, ClientConfig};
//! use lakevault_manager::StorageVaultManager;
//! use std::collections::HashMap;
//!
//! let config = ClientConfig::builder()
//!     .with_endpoint("127.0.0.1:20121")
//!     .with_cluster_id("cluster-01")
//!     .build()?;
//! let manager = StorageVaultManager::new(AuthorityClient::new(config));
//!
//! let properties = HashMap::from([
//!     ("type".to_string(), "hdfs".to_string()),
//!     ("path".to_string(), "hdfs://nn1/warehouse".to_string()),
//! ]);
//! let vault_id = manager.create_hdfs_vault("warehouse", properties, false).await?;
//! ```
//!
//! # Contract
//!
//! Each call is one awaited round-trip that ends in exactly one of: an
//! assigned vault id, idempotent-duplicate success, or a single typed
//! [`VaultError`]. The manager never retries on its own — an
//! [`Unavailable`](VaultError::Unavailable) outcome is safe to re-submit
//! because the authority's uniqueness check makes repeated creates
//! idempotent in effect.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod manager;

pub use error::{Result, VaultError};
pub use manager::StorageVaultManager;

// Re-export the domain types callers need to construct definitions.
pub use lakevault_types::{ValidationError, VaultDefinition, VaultId, VaultKind};
