//! Client-side error types for the metadata authority boundary.
//!
//! Provides a strict two-tier split:
//! - **Transport errors**: connection failures, timeouts, gRPC status codes —
//!   the request may or may not have reached the authority.
//! - **Authority status codes** are *not* errors at this layer: a delivered
//!   response is returned whole, and interpreting its code belongs to the
//!   caller. Nothing here conflates the two.
//!
//! Errors carry a retryability classification so callers can implement
//! their own retry policy; this crate performs no retries.

use snafu::{Location, Snafu};
use tonic::Code;

/// Result type alias for authority client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors raised while trying to obtain a response from the authority.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ClientError {
    /// Failed to establish a connection.
    #[snafu(display("Connection error at {location}: {message}"))]
    Connection {
        /// Error description.
        message: String,
        /// Source location.
        #[snafu(implicit)]
        location: Location,
    },

    /// Transport-level error (HTTP/2, TLS).
    #[snafu(display("Transport error at {location}: {source}"))]
    Transport {
        /// Underlying transport error.
        source: tonic::transport::Error,
        /// Source location.
        #[snafu(implicit)]
        location: Location,
    },

    /// gRPC RPC error with status code.
    ///
    /// This is a failure of the RPC itself (unreachable, deadline exceeded,
    /// malformed exchange), never an authority-side `MetaCode` — those
    /// arrive inside a successful response.
    #[snafu(display("RPC error (code={code:?}): {message}"))]
    Rpc {
        /// gRPC status code.
        code: Code,
        /// Error message from the transport or server runtime.
        message: String,
    },

    /// Configuration validation error.
    #[snafu(display("Configuration error: {message}"))]
    Config {
        /// Error description.
        message: String,
    },

    /// Endpoint URL parsing error.
    #[snafu(display("Invalid endpoint '{endpoint}': {message}"))]
    InvalidEndpoint {
        /// The invalid endpoint.
        endpoint: String,
        /// Parse error description.
        message: String,
    },
}

impl ClientError {
    /// Returns true if the error is transient and the operation may be
    /// safely re-submitted.
    ///
    /// Retryable errors:
    /// - `UNAVAILABLE`: authority temporarily unreachable
    /// - `DEADLINE_EXCEEDED`: request timed out (outcome unknown)
    /// - `RESOURCE_EXHAUSTED`: rate limited
    /// - Transport and connection errors (network issues)
    ///
    /// Non-retryable errors:
    /// - `INVALID_ARGUMENT`, `PERMISSION_DENIED`, `UNAUTHENTICATED`
    /// - Configuration and endpoint-parse errors
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport { .. } => true,
            Self::Connection { .. } => true,
            Self::Rpc { code, .. } => matches!(
                code,
                Code::Unavailable | Code::DeadlineExceeded | Code::ResourceExhausted
            ),
            Self::Config { .. } => false,
            Self::InvalidEndpoint { .. } => false,
        }
    }

    /// Returns the gRPC status code if this is an RPC error.
    #[must_use]
    pub fn code(&self) -> Option<Code> {
        match self {
            Self::Rpc { code, .. } => Some(*code),
            _ => None,
        }
    }
}

impl From<tonic::transport::Error> for ClientError {
    fn from(source: tonic::transport::Error) -> Self {
        Self::Transport {
            source,
            location: Location::default(),
        }
    }
}

impl From<tonic::Status> for ClientError {
    fn from(status: tonic::Status) -> Self {
        Self::Rpc {
            code: status.code(),
            message: status.message().to_owned(),
        }
    }
}
