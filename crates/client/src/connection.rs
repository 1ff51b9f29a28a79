//! Channel management for the authority endpoint.
//!
//! Wraps a tonic [`Channel`] with lazy connection establishment and
//! thread-safe sharing. The channel is established on first use, not at
//! construction, and is cheap to clone (clones share the underlying HTTP/2
//! connection), so a single cached channel serves all callers.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use snafu::ResultExt;
use tonic::transport::{Channel, Endpoint};

use crate::config::ClientConfig;
use crate::error::{InvalidEndpointSnafu, Result, TransportSnafu};

/// HTTP/2 keep-alive interval for idle connections.
const HTTP2_KEEPALIVE_INTERVAL: Duration = Duration::from_secs(30);

/// HTTP/2 keep-alive timeout.
const HTTP2_KEEPALIVE_TIMEOUT: Duration = Duration::from_secs(10);

/// TCP keepalive interval.
const TCP_KEEPALIVE_INTERVAL: Duration = Duration::from_secs(60);

/// Lazily-connected, shareable channel to the metadata authority.
#[derive(Debug, Clone)]
pub struct AuthorityChannel {
    /// Cached channel, lazily initialized.
    channel: Arc<RwLock<Option<Channel>>>,

    /// Client configuration for connection settings.
    config: ClientConfig,
}

impl AuthorityChannel {
    /// Creates a channel handle without connecting.
    ///
    /// The connection is established on the first call to
    /// [`get`](Self::get).
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        Self {
            channel: Arc::new(RwLock::new(None)),
            config,
        }
    }

    /// Returns a connected channel, establishing the connection if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint cannot be parsed or the connection
    /// cannot be established within the configured connect timeout.
    pub async fn get(&self) -> Result<Channel> {
        {
            let guard = self.channel.read();
            if let Some(channel) = guard.as_ref() {
                return Ok(channel.clone());
            }
        }

        let new_channel = self.connect().await?;

        {
            let mut guard = self.channel.write();
            // Another task may have connected while we were waiting.
            if let Some(channel) = guard.as_ref() {
                return Ok(channel.clone());
            }
            *guard = Some(new_channel.clone());
        }

        Ok(new_channel)
    }

    /// Establishes a new connection with all configured settings applied.
    async fn connect(&self) -> Result<Channel> {
        let uri = self.config.endpoint_uri();
        let endpoint = Endpoint::try_from(uri.clone()).map_err(|e| {
            InvalidEndpointSnafu {
                endpoint: uri,
                message: e.to_string(),
            }
            .build()
        })?;

        let endpoint = self.configure_endpoint(endpoint);
        let channel = endpoint.connect().await.context(TransportSnafu)?;

        Ok(channel)
    }

    /// Applies timeout and keepalive settings to an endpoint.
    fn configure_endpoint(&self, endpoint: Endpoint) -> Endpoint {
        endpoint
            .connect_timeout(self.config.connect_timeout())
            .timeout(self.config.timeout())
            .tcp_nodelay(true)
            .tcp_keepalive(Some(TCP_KEEPALIVE_INTERVAL))
            .http2_keep_alive_interval(HTTP2_KEEPALIVE_INTERVAL)
            .keep_alive_timeout(HTTP2_KEEPALIVE_TIMEOUT)
            .keep_alive_while_idle(true)
    }

    /// Returns a reference to the client configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Clears the cached channel, forcing reconnection on next use.
    pub fn reset(&self) {
        let mut guard = self.channel.write();
        *guard = None;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    fn test_config() -> ClientConfig {
        ClientConfig::builder()
            .with_endpoint("127.0.0.1:20121")
            .with_cluster_id("test-cluster")
            .build()
            .expect("valid test config")
    }

    #[test]
    fn creation_does_not_connect() {
        let channel = AuthorityChannel::new(test_config());
        assert!(channel.channel.read().is_none());
    }

    #[test]
    fn config_accessor_returns_config() {
        let channel = AuthorityChannel::new(test_config());
        assert_eq!(channel.config().cluster_id(), "test-cluster");
    }

    #[test]
    fn reset_on_unconnected_channel_is_noop() {
        let channel = AuthorityChannel::new(test_config());
        channel.reset();
        assert!(channel.channel.read().is_none());
    }

    #[tokio::test]
    async fn get_fails_against_unreachable_endpoint() {
        let config = ClientConfig::builder()
            // Port 1 is unlikely to have a service listening.
            .with_endpoint("127.0.0.1:1")
            .with_cluster_id("test-cluster")
            .with_connect_timeout(Duration::from_millis(100))
            .build()
            .expect("valid config");

        let channel = AuthorityChannel::new(config);
        let result = channel.get().await;
        assert!(result.is_err(), "expected connection to fail");
    }
}
