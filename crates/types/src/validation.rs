//! Property validation for storage vault definitions.
//!
//! Validation is pure and local: it checks a raw property map against the
//! requirements of a backend kind and never contacts the metadata authority.
//! The authority mirrors these checks server-side, so passing here does not
//! guarantee acceptance; failing here guarantees rejection without an RPC.
//!
//! ## HDFS requirements
//!
//! - `type` — required, must equal the backend tag (`hdfs`).
//! - `path` — required, non-empty root location.
//! - Any other key is passed through opaquely (backend tuning, credentials).

use std::{collections::HashMap, fmt};

use crate::vault::VaultKind;

/// Property key naming the backend type.
pub const PROPERTY_TYPE: &str = "type";

/// Property key naming the storage root location.
pub const PROPERTY_PATH: &str = "path";

/// Validation error with structured context.
///
/// Contains the property that failed validation and the violated constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The property key that failed validation.
    pub property: String,
    /// Description of the violated constraint.
    pub constraint: String,
}

impl ValidationError {
    fn new(property: &str, constraint: impl Into<String>) -> Self {
        Self {
            property: property.to_string(),
            constraint: constraint.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "property '{}': {}", self.property, self.constraint)
    }
}

impl std::error::Error for ValidationError {}

/// Validates a raw property map against the requirements of `kind`.
///
/// Unknown keys are accepted without interpretation.
///
/// # Errors
///
/// Returns [`ValidationError`] naming the first property that is missing or
/// carries an invalid value.
pub fn validate_properties(
    kind: VaultKind,
    raw: &HashMap<String, String>,
) -> Result<(), ValidationError> {
    match kind {
        VaultKind::Hdfs => validate_hdfs_properties(raw),
    }
}

fn validate_hdfs_properties(raw: &HashMap<String, String>) -> Result<(), ValidationError> {
    let tag = VaultKind::Hdfs.as_str();

    match raw.get(PROPERTY_TYPE) {
        None => return Err(ValidationError::new(PROPERTY_TYPE, "is required")),
        Some(value) if value != tag => {
            return Err(ValidationError::new(
                PROPERTY_TYPE,
                format!("must be '{tag}', got '{value}'"),
            ));
        }
        Some(_) => {}
    }

    match raw.get(PROPERTY_PATH) {
        None => return Err(ValidationError::new(PROPERTY_PATH, "is required")),
        Some(value) if value.is_empty() => {
            return Err(ValidationError::new(PROPERTY_PATH, "must not be empty"))
        }
        Some(_) => {}
    }

    Ok(())
}
