//! The authority client: one logical request, one logical response.
//!
//! [`AuthorityClient`] is a thin, faithful mapping over the `MetaService`
//! RPC. It performs no retries and interprets no authority status codes —
//! retry policy and response interpretation belong to the caller (the
//! storage vault manager). Its only responsibilities are connection
//! handling, request attribution, and the transport-vs-status error split.

use lakevault_proto::proto::{
    meta_service_client::MetaServiceClient, AlterStorageVaultRequest, AlterStorageVaultResponse,
};
use tracing::debug;

use crate::{config::ClientConfig, connection::AuthorityChannel, error::Result};

/// RPC client for the lakevault metadata authority.
///
/// Cheap to clone; clones share the underlying channel.
#[derive(Debug, Clone)]
pub struct AuthorityClient {
    channel: AuthorityChannel,
}

impl AuthorityClient {
    /// Creates a client from the given configuration.
    ///
    /// No connection is established until the first request.
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        Self {
            channel: AuthorityChannel::new(config),
        }
    }

    /// Returns the client configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        self.channel.config()
    }

    /// Submits a storage vault registration/alteration request.
    ///
    /// The configured cluster id is stamped onto the request before
    /// submission. Exactly one RPC is attempted; on any [`ClientError`]
    /// the authority has not acknowledged the operation and its outcome,
    /// if a timeout occurred, is unknown.
    ///
    /// A delivered response is returned whole, including non-OK authority
    /// status codes — those are not errors at this layer.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`](crate::ClientError) on connection, transport,
    /// or RPC-level failure.
    pub async fn alter_storage_vault(
        &self,
        mut request: AlterStorageVaultRequest,
    ) -> Result<AlterStorageVaultResponse> {
        request.cluster_id = self.config().cluster_id().to_owned();

        let channel = self.channel.get().await?;
        let mut client = MetaServiceClient::new(channel);

        debug!(
            op = request.op().as_str_name(),
            endpoint = self.config().endpoint(),
            "submitting storage vault request"
        );

        let response = client.alter_storage_vault(request).await?;
        Ok(response.into_inner())
    }
}
