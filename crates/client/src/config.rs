//! Authority client configuration with builder pattern.
//!
//! Carries the endpoint address of the metadata authority, the stable
//! cluster identifier the authority uses to attribute requests, and the
//! RPC timeouts. Loaded once at process start by the embedding application;
//! this crate only consumes the resulting values.

use std::time::Duration;

use snafu::ensure;

use crate::error::{ConfigSnafu, Result};

/// Default request timeout (30 seconds).
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default connection timeout (5 seconds).
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration for the authority client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Authority endpoint, `host:port` or a full URL.
    pub(crate) endpoint: String,

    /// Stable client identifier attributing requests to a cluster/tenant.
    pub(crate) cluster_id: String,

    /// Request timeout. On expiry the RPC outcome is unknown.
    pub(crate) timeout: Duration,

    /// Connection establishment timeout.
    pub(crate) connect_timeout: Duration,
}

impl ClientConfig {
    /// Creates a new configuration builder.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Returns the configured endpoint as given.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the endpoint as a connectable URI.
    ///
    /// Bare `host:port` addresses are given an `http://` scheme; addresses
    /// that already carry a scheme are passed through unchanged.
    #[must_use]
    pub fn endpoint_uri(&self) -> String {
        if self.endpoint.contains("://") {
            self.endpoint.clone()
        } else {
            format!("http://{}", self.endpoint)
        }
    }

    /// Returns the cluster identifier.
    #[must_use]
    pub fn cluster_id(&self) -> &str {
        &self.cluster_id
    }

    /// Returns the request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the connection timeout.
    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    endpoint: Option<String>,
    cluster_id: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
}

impl ClientConfigBuilder {
    /// Sets the authority endpoint (`host:port` or a full URL).
    #[must_use]
    pub fn with_endpoint<S: Into<String>>(mut self, endpoint: S) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Sets the stable cluster identifier sent with every request.
    #[must_use]
    pub fn with_cluster_id<S: Into<String>>(mut self, cluster_id: S) -> Self {
        self.cluster_id = Some(cluster_id.into());
        self
    }

    /// Sets the request timeout.
    ///
    /// Default: 30 seconds.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection establishment timeout.
    ///
    /// Default: 5 seconds.
    #[must_use]
    pub fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = Some(connect_timeout);
        self
    }

    /// Validates the collected settings and builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Config` when the endpoint or cluster id is
    /// missing/empty, or a timeout is zero.
    pub fn build(self) -> Result<ClientConfig> {
        let endpoint = self.endpoint.unwrap_or_default();
        ensure!(
            !endpoint.is_empty(),
            ConfigSnafu {
                message: "authority endpoint must be set",
            }
        );

        let cluster_id = self.cluster_id.unwrap_or_default();
        ensure!(
            !cluster_id.is_empty(),
            ConfigSnafu {
                message: "cluster id must be set",
            }
        );

        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);
        let connect_timeout = self.connect_timeout.unwrap_or(DEFAULT_CONNECT_TIMEOUT);
        ensure!(
            !timeout.is_zero() && !connect_timeout.is_zero(),
            ConfigSnafu {
                message: "timeouts must be non-zero",
            }
        );

        Ok(ClientConfig {
            endpoint,
            cluster_id,
            timeout,
            connect_timeout,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn build_applies_defaults() {
        let config = ClientConfig::builder()
            .with_endpoint("127.0.0.1:20121")
            .with_cluster_id("cluster-01")
            .build()
            .unwrap();

        assert_eq!(config.endpoint(), "127.0.0.1:20121");
        assert_eq!(config.cluster_id(), "cluster-01");
        assert_eq!(config.timeout(), DEFAULT_TIMEOUT);
        assert_eq!(config.connect_timeout(), DEFAULT_CONNECT_TIMEOUT);
    }

    #[test]
    fn build_rejects_missing_endpoint() {
        let result = ClientConfig::builder().with_cluster_id("cluster-01").build();
        assert!(result.is_err());
    }

    #[test]
    fn build_rejects_missing_cluster_id() {
        let result = ClientConfig::builder().with_endpoint("127.0.0.1:20121").build();
        assert!(result.is_err());
    }

    #[test]
    fn build_rejects_zero_timeout() {
        let result = ClientConfig::builder()
            .with_endpoint("127.0.0.1:20121")
            .with_cluster_id("cluster-01")
            .with_timeout(Duration::ZERO)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn endpoint_uri_prefixes_bare_addresses() {
        let config = ClientConfig::builder()
            .with_endpoint("127.0.0.1:20121")
            .with_cluster_id("cluster-01")
            .build()
            .unwrap();
        assert_eq!(config.endpoint_uri(), "http://127.0.0.1:20121");
    }

    #[test]
    fn endpoint_uri_keeps_explicit_scheme() {
        let config = ClientConfig::builder()
            .with_endpoint("https://meta.internal:443")
            .with_cluster_id("cluster-01")
            .build()
            .unwrap();
        assert_eq!(config.endpoint_uri(), "https://meta.internal:443");
    }
}
