//! The storage vault manager.
//!
//! Orchestrates one `create`/`alter` call end to end: local validation,
//! request construction, submission through the authority client, response
//! interpretation, and advisory bookkeeping. The metadata authority remains
//! the sole arbiter of name uniqueness; nothing here pre-empts it.

use std::collections::HashMap;

use lakevault_client::AuthorityClient;
use lakevault_proto::proto::{
    AlterStorageVaultRequest, AlterStorageVaultResponse, HdfsVaultParams, MetaCode, VaultOp,
};
use lakevault_types::{
    validation::{PROPERTY_PATH, PROPERTY_TYPE},
    VaultDefinition, VaultId,
};
use parking_lot::Mutex;
use snafu::{ensure, ResultExt};
use tracing::{debug, info, warn};

use crate::error::{
    AuthoritySnafu, ConfigurationSnafu, ConflictSnafu, Result, UnavailableSnafu,
};

/// Manages the lifecycle of storage vaults against the metadata authority.
///
/// Safe to share across tasks; every operation is a single awaited RPC
/// round-trip with no background work. The local name→id registry is an
/// advisory cache only — it is written after definitive `OK` outcomes and
/// must never be trusted over a fresh authority response.
#[derive(Debug)]
pub struct StorageVaultManager {
    client: AuthorityClient,
    registry: Mutex<HashMap<String, VaultId>>,
}

impl StorageVaultManager {
    /// Creates a manager submitting through the given authority client.
    #[must_use]
    pub fn new(client: AuthorityClient) -> Self {
        Self {
            client,
            registry: Mutex::new(HashMap::new()),
        }
    }

    /// Registers a storage vault with the metadata authority.
    ///
    /// Returns the assigned id on registration. When the name is already
    /// registered and the definition asked for `if_not_exists`, the call
    /// succeeds with `None`: the response protocol does not carry the
    /// existing vault's id alongside `ALREADY_EXISTED`.
    ///
    /// The definition's `vault_id` is written only after a definitive `OK`,
    /// so no caller can observe a half-registered vault.
    ///
    /// # Errors
    ///
    /// - [`Configuration`](crate::VaultError::Configuration): empty name or
    ///   invalid properties, rejected locally without an RPC; also
    ///   authority-side `INVALID_ARGUMENT`.
    /// - [`Conflict`](crate::VaultError::Conflict): name taken and
    ///   `if_not_exists` was false.
    /// - [`Unavailable`](crate::VaultError::Unavailable): the authority was
    ///   not reached or did not answer; safe to re-invoke.
    /// - [`Authority`](crate::VaultError::Authority): unrecognized
    ///   authority-side status.
    pub async fn create_vault(&self, definition: &VaultDefinition) -> Result<Option<VaultId>> {
        Self::check_definition(definition)?;

        let request = Self::build_request(VaultOp::CreateHdfsVault, definition);
        let response = self
            .client
            .alter_storage_vault(request)
            .await
            .context(UnavailableSnafu)?;

        self.interpret_create(definition, response)
    }

    /// Convenience entry point: builds an HDFS vault definition and
    /// delegates to [`create_vault`](Self::create_vault).
    pub async fn create_hdfs_vault(
        &self,
        name: &str,
        properties: HashMap<String, String>,
        if_not_exists: bool,
    ) -> Result<Option<VaultId>> {
        let mut definition = VaultDefinition::hdfs(name, if_not_exists);
        definition
            .attach_properties(properties)
            .map_err(|e| ConfigurationSnafu { message: e.to_string() }.build())?;
        self.create_vault(&definition).await
    }

    /// Replaces the backend configuration of an existing HDFS vault.
    ///
    /// Properties are validated the same way as on create: the full backend
    /// configuration is submitted, not a delta. On success the registry
    /// entry is refreshed with the id the authority reports.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`create_vault`](Self::create_vault), except that a
    /// [`Conflict`](crate::VaultError::Conflict) cannot occur; any non-OK
    /// code other than `INVALID_ARGUMENT` (including an unknown vault name)
    /// surfaces as [`Authority`](crate::VaultError::Authority).
    pub async fn alter_hdfs_vault(
        &self,
        name: &str,
        properties: HashMap<String, String>,
    ) -> Result<Option<VaultId>> {
        let mut definition = VaultDefinition::hdfs(name, false);
        definition
            .attach_properties(properties)
            .map_err(|e| ConfigurationSnafu { message: e.to_string() }.build())?;
        Self::check_definition(&definition)?;

        let request = Self::build_request(VaultOp::AlterHdfsVault, &definition);
        let response = self
            .client
            .alter_storage_vault(request)
            .await
            .context(UnavailableSnafu)?;

        let status = response.status.unwrap_or_default();
        match MetaCode::try_from(status.code) {
            Ok(MetaCode::Ok) => {
                let id = response.storage_vault_id.map(VaultId::new);
                if let Some(id) = &id {
                    self.registry.lock().insert(name.to_owned(), id.clone());
                }
                info!(vault = name, "storage vault altered");
                Ok(id)
            }
            Ok(MetaCode::InvalidArgument) => ConfigurationSnafu {
                message: format!("metadata authority rejected the request: {}", status.msg),
            }
            .fail(),
            _ => {
                warn!(vault = name, code = status.code, "storage vault alter failed");
                AuthoritySnafu {
                    code: status.code,
                    message: status.msg,
                }
                .fail()
            }
        }
    }

    /// Advisory lookup of a vault id registered through this manager.
    ///
    /// In-memory cache only: absent entries say nothing about the
    /// authority's state, and a present entry may be stale.
    #[must_use]
    pub fn vault_id(&self, name: &str) -> Option<VaultId> {
        self.registry.lock().get(name).cloned()
    }

    /// Local pre-submission checks; failing here never reaches the wire.
    fn check_definition(definition: &VaultDefinition) -> Result<()> {
        ensure!(
            !definition.name().is_empty(),
            ConfigurationSnafu {
                message: "storage vault name must not be empty",
            }
        );
        lakevault_types::validate_properties(definition.kind(), definition.properties())
            .map_err(|e| ConfigurationSnafu { message: e.to_string() }.build())?;
        Ok(())
    }

    /// Builds the wire request from a validated definition.
    ///
    /// The `type` key is consumed by the message discriminator and `path`
    /// moves to its dedicated field; everything else passes through
    /// opaquely. The cluster id is stamped by the client.
    fn build_request(op: VaultOp, definition: &VaultDefinition) -> AlterStorageVaultRequest {
        let mut properties = definition.properties().clone();
        properties.remove(PROPERTY_TYPE);
        let path = properties.remove(PROPERTY_PATH).unwrap_or_default();

        AlterStorageVaultRequest {
            op: op as i32,
            cluster_id: String::new(),
            hdfs: Some(HdfsVaultParams {
                name: definition.name().to_owned(),
                path,
                properties,
            }),
        }
    }

    fn interpret_create(
        &self,
        definition: &VaultDefinition,
        response: AlterStorageVaultResponse,
    ) -> Result<Option<VaultId>> {
        let status = response.status.unwrap_or_default();
        match MetaCode::try_from(status.code) {
            Ok(MetaCode::Ok) => {
                let Some(raw) = response.storage_vault_id else {
                    return AuthoritySnafu {
                        code: status.code,
                        message: "OK response carried no storage vault id",
                    }
                    .fail();
                };
                let id = VaultId::new(raw);
                self.registry
                    .lock()
                    .insert(definition.name().to_owned(), id.clone());
                definition.assign_vault_id(id.clone());
                info!(vault = definition.name(), id = %id, "storage vault registered");
                Ok(Some(id))
            }
            Ok(MetaCode::AlreadyExisted) => {
                if definition.if_not_exists() {
                    debug!(
                        vault = definition.name(),
                        "storage vault already exists, treated as success"
                    );
                    Ok(None)
                } else {
                    warn!(vault = definition.name(), "storage vault name already registered");
                    ConflictSnafu {
                        name: definition.name().to_owned(),
                    }
                    .fail()
                }
            }
            Ok(MetaCode::InvalidArgument) => ConfigurationSnafu {
                message: format!("metadata authority rejected the request: {}", status.msg),
            }
            .fail(),
            _ => {
                warn!(
                    vault = definition.name(),
                    code = status.code,
                    "storage vault registration failed"
                );
                AuthoritySnafu {
                    code: status.code,
                    message: status.msg,
                }
                .fail()
            }
        }
    }
}
