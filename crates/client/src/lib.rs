//! RPC client for the lakevault metadata authority.
//!
//! This crate is the boundary between the storage vault manager and the
//! remote authority that persists vault registrations. It maps one logical
//! request to one logical response over gRPC, keeping transport failures
//! strictly separate from authority status codes, and performing no retries
//! of its own.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use lakevault_client::{AuthorityClient, ClientConfig};
//!
//! let config = ClientConfig::builder()
//!     .with_endpoint("127.0.0.1:20121")
//!     .with_cluster_id("cluster-01")
//!     .build()?;
//!
//! let client = AuthorityClient::new(config);
//! let response = client.alter_storage_vault(request).await?;
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │              AuthorityClient (Public API)           │
//! │        .alter_storage_vault()  │  attribution       │
//! ├─────────────────────────────────────────────────────┤
//! │                 AuthorityChannel                    │
//! │   Lazy connect │ Channel caching │ Timeouts         │
//! ├─────────────────────────────────────────────────────┤
//! │                 Tonic gRPC Client                   │
//! │                  MetaServiceClient                  │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! The [`mock`] module provides a controllable in-process authority used by
//! integration tests across the workspace.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod config;
mod connection;
mod error;
pub mod mock;

pub use client::AuthorityClient;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use connection::AuthorityChannel;
pub use error::{ClientError, Result};
