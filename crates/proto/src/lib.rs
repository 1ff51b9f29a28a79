//! Protobuf types and gRPC service traits for the lakevault metadata authority.
//!
//! This crate provides the wire contract consumed by the authority client:
//! - Generated protobuf types and the `MetaService` client/server traits ([`proto`])
//!
//! # Architecture
//!
//! Kept as a standalone crate so that consumers needing only wire-format
//! types (the authority client, test doubles) avoid pulling in manager
//! internals. Generated code is checked in under `src/generated/` so builds
//! do not require `protoc`; regenerate from `proto/lakevault/meta/v1/meta.proto`
//! when the contract changes.

#![deny(unsafe_code)]
// gRPC services return tonic::Status - standard practice for gRPC error handling
#![allow(clippy::result_large_err)]

/// Generated protobuf types and service traits.
pub mod proto {
    #![allow(clippy::all)]
    #![allow(clippy::pedantic)]
    #![allow(missing_docs)]

    include!("generated/lakevault.meta.v1.rs");
}
