//! Error taxonomy for storage vault operations.
//!
//! Every failed manager call yields exactly one of these kinds; none are
//! swallowed or logged-and-ignored. The taxonomy separates what the caller
//! can do about it:
//! - [`Configuration`](VaultError::Configuration) — fix the input
//! - [`Conflict`](VaultError::Conflict) — pick another name or opt into
//!   the idempotent-create contract
//! - [`Unavailable`](VaultError::Unavailable) — safe to re-invoke; the
//!   original outcome is unknown
//! - [`Authority`](VaultError::Authority) — unrecognized authority-side
//!   failure, surfaced with its raw code for operator diagnosis

use lakevault_client::ClientError;
use snafu::{Location, Snafu};

/// Result type alias for storage vault operations.
pub type Result<T> = std::result::Result<T, VaultError>;

/// Errors raised by the storage vault manager.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum VaultError {
    /// Invalid or missing vault properties, detected locally or by the
    /// authority's mirrored validation.
    #[snafu(display("Invalid storage vault configuration: {message}"))]
    Configuration {
        /// What was wrong with the input.
        message: String,
    },

    /// The vault name is already registered and `if_not_exists` was false.
    #[snafu(display("Storage vault '{name}' already exists"))]
    Conflict {
        /// The duplicate name.
        name: String,
    },

    /// The authority could not be reached or did not answer in time.
    ///
    /// The operation has not been acknowledged; on a timeout its outcome is
    /// unknown. Re-invoking with the same definition is safe because the
    /// authority's uniqueness check makes repeated creates idempotent in
    /// effect.
    #[snafu(display("Metadata authority unavailable at {location}: {source}"))]
    Unavailable {
        /// The underlying client failure.
        source: ClientError,
        /// Source location.
        #[snafu(implicit)]
        location: Location,
    },

    /// An authority status code outside the recognized set.
    #[snafu(display("Metadata authority failure (code={code}): {message}"))]
    Authority {
        /// Raw status code for diagnostics.
        code: i32,
        /// Message from the authority, if any.
        message: String,
    },
}

impl VaultError {
    /// Returns true if re-invoking the operation with the same input may
    /// succeed.
    ///
    /// Only [`Unavailable`](Self::Unavailable) qualifies: the request never
    /// took effect (or its outcome is unknown and a repeat is safe). The
    /// other kinds require changed input or operator attention.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}
