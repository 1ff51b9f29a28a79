//! Storage vault identifiers and the pre-submission vault definition.

use std::{collections::HashMap, fmt, sync::OnceLock};

use serde::{Deserialize, Serialize};

use crate::validation::{validate_properties, ValidationError};

/// Identifier assigned to a storage vault by the metadata authority.
///
/// Wraps the authority's opaque string id with compile-time type safety so
/// it cannot be confused with a vault name. Callers never fabricate one:
/// the only source is a successful registration response.
///
/// # Display
///
/// Formats with a `vault:` prefix: `vault:1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VaultId(String);

impl VaultId {
    /// Creates an identifier from the authority-assigned raw value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the raw identifier string.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }

    /// Consumes the identifier, returning the raw string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<String> for VaultId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<VaultId> for String {
    fn from(id: VaultId) -> Self {
        id.0
    }
}

impl fmt::Display for VaultId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "vault:{}", self.0)
    }
}

/// Storage backend kind a vault points at.
///
/// Fixed at definition construction and immutable afterward. The kind
/// selects which property set [`validate_properties`] enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum VaultKind {
    /// A distributed-filesystem root (HDFS-compatible).
    Hdfs,
}

impl VaultKind {
    /// Returns the backend tag used in the `type` property and on the wire.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            VaultKind::Hdfs => "hdfs",
        }
    }
}

impl fmt::Display for VaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// In-memory representation of a storage vault before and after submission.
///
/// A definition is created by the caller with a name, backend kind, and the
/// `if_not_exists` flag, has backend properties attached via
/// [`attach_properties`](Self::attach_properties), and is then submitted
/// through the manager. The authority-assigned id is written back exactly
/// once via [`assign_vault_id`](Self::assign_vault_id); the [`OnceLock`]
/// makes later mutation unrepresentable.
#[derive(Debug, Clone)]
pub struct VaultDefinition {
    name: String,
    kind: VaultKind,
    if_not_exists: bool,
    properties: HashMap<String, String>,
    vault_id: OnceLock<VaultId>,
}

impl VaultDefinition {
    /// Creates an HDFS-backed vault definition with no properties attached.
    ///
    /// `if_not_exists` selects the idempotent-create contract: when true, a
    /// name that is already registered is treated as success rather than a
    /// conflict.
    pub fn hdfs(name: impl Into<String>, if_not_exists: bool) -> Self {
        Self {
            name: name.into(),
            kind: VaultKind::Hdfs,
            if_not_exists,
            properties: HashMap::new(),
            vault_id: OnceLock::new(),
        }
    }

    /// Returns the vault name.
    ///
    /// May be empty only transiently; an empty name is rejected at
    /// submission time.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the backend kind.
    #[must_use]
    pub fn kind(&self) -> VaultKind {
        self.kind
    }

    /// Returns whether the idempotent-create contract was requested.
    #[must_use]
    pub fn if_not_exists(&self) -> bool {
        self.if_not_exists
    }

    /// Returns the backend properties attached so far.
    #[must_use]
    pub fn properties(&self) -> &HashMap<String, String> {
        &self.properties
    }

    /// Validates `raw` against this definition's backend kind and merges it
    /// into the attached properties.
    ///
    /// Validation is pure and local. On failure nothing is merged; the
    /// definition is left exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when a required key is missing or carries
    /// an invalid value for the backend kind.
    pub fn attach_properties(
        &mut self,
        raw: HashMap<String, String>,
    ) -> Result<(), ValidationError> {
        validate_properties(self.kind, &raw)?;
        self.properties.extend(raw);
        Ok(())
    }

    /// Returns the authority-assigned vault id, if registration succeeded.
    #[must_use]
    pub fn vault_id(&self) -> Option<&VaultId> {
        self.vault_id.get()
    }

    /// Records the authority-assigned vault id.
    ///
    /// Succeeds at most once; returns false if an id was already assigned,
    /// leaving the original untouched.
    pub fn assign_vault_id(&self, id: VaultId) -> bool {
        self.vault_id.set(id).is_ok()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    fn hdfs_properties() -> HashMap<String, String> {
        HashMap::from([
            ("type".to_string(), "hdfs".to_string()),
            ("path".to_string(), "abs/".to_string()),
        ])
    }

    #[test]
    fn hdfs_definition_starts_without_id() {
        let definition = VaultDefinition::hdfs("hdfs", false);
        assert_eq!(definition.name(), "hdfs");
        assert_eq!(definition.kind(), VaultKind::Hdfs);
        assert!(!definition.if_not_exists());
        assert!(definition.vault_id().is_none());
        assert!(definition.properties().is_empty());
    }

    #[test]
    fn attach_properties_merges_validated_input() {
        let mut definition = VaultDefinition::hdfs("hdfs", false);
        definition.attach_properties(hdfs_properties()).unwrap();
        assert_eq!(
            definition.properties().get("path").map(String::as_str),
            Some("abs/")
        );
    }

    #[test]
    fn attach_properties_rejects_without_mutation() {
        let mut definition = VaultDefinition::hdfs("hdfs", false);
        let invalid = HashMap::from([("type".to_string(), "hdfs".to_string())]);
        assert!(definition.attach_properties(invalid).is_err());
        assert!(definition.properties().is_empty());
    }

    #[test]
    fn attach_properties_preserves_opaque_keys() {
        let mut definition = VaultDefinition::hdfs("hdfs", false);
        let mut raw = hdfs_properties();
        raw.insert("hadoop.username".to_string(), "etl".to_string());
        definition.attach_properties(raw).unwrap();
        assert_eq!(
            definition.properties().get("hadoop.username").map(String::as_str),
            Some("etl")
        );
    }

    #[test]
    fn vault_id_assigns_at_most_once() {
        let definition = VaultDefinition::hdfs("hdfs", false);
        assert!(definition.assign_vault_id(VaultId::new("1")));
        assert!(!definition.assign_vault_id(VaultId::new("2")));
        assert_eq!(definition.vault_id(), Some(&VaultId::new("1")));
    }

    #[test]
    fn vault_id_displays_with_prefix() {
        assert_eq!(VaultId::new("17").to_string(), "vault:17");
        assert_eq!(VaultId::new("17").value(), "17");
    }
}
