//! Mock metadata authority for integration testing.
//!
//! A controllable implementation of the `MetaService` gRPC service backed
//! by an in-memory set of existing vault names. Just another conforming
//! implementation of the authority's request→response contract, so tests
//! exercise the real client and wire codec against it.
//!
//! # Features
//!
//! - **Evolving name set**: first registration of a name wins, later ones
//!   observe `ALREADY_EXISTED` — the authority's arbiter role in miniature
//! - **Failure injection**: inject `UNAVAILABLE` transport failures or
//!   arbitrary authority status codes for the next N requests
//! - **Request counting and attribution**: verify how many requests arrived
//!   and which cluster id they carried

use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{
        atomic::{AtomicU64, AtomicUsize, Ordering},
        Arc,
    },
};

use lakevault_proto::proto::{
    meta_service_server::{MetaService, MetaServiceServer},
    AlterStorageVaultRequest, AlterStorageVaultResponse, MetaCode, VaultOp, VaultResponseStatus,
};
use parking_lot::{Mutex, RwLock};
use tokio::sync::oneshot;
use tonic::{transport::Server, Request, Response, Status};

/// Shared state for the mock authority.
#[derive(Debug, Default)]
struct MockState {
    /// Registered vaults: name -> assigned id.
    existing: RwLock<HashMap<String, String>>,

    /// Next vault id to assign.
    next_vault_id: AtomicU64,

    /// Number of UNAVAILABLE failures to inject for upcoming requests.
    unavailable_count: AtomicUsize,

    /// Authority status code to return for upcoming requests, with a
    /// remaining-use counter.
    injected_code: Mutex<Option<(MetaCode, usize)>>,

    /// Total requests that reached the service (injected transport
    /// failures excluded).
    request_count: AtomicUsize,

    /// Cluster id carried by the most recent request.
    last_cluster_id: RwLock<Option<String>>,
}

impl MockState {
    fn new() -> Self {
        Self {
            next_vault_id: AtomicU64::new(1),
            ..Default::default()
        }
    }

    /// Checks if an unavailable error should be injected, decrementing the
    /// counter if so.
    fn should_inject_unavailable(&self) -> bool {
        loop {
            let current = self.unavailable_count.load(Ordering::SeqCst);
            if current == 0 {
                return false;
            }
            if self
                .unavailable_count
                .compare_exchange(current, current - 1, Ordering::SeqCst, Ordering::SeqCst)
                .is_ok()
            {
                return true;
            }
        }
    }

    /// Takes one use of the injected status code, if any remain.
    fn take_injected_code(&self) -> Option<MetaCode> {
        let mut guard = self.injected_code.lock();
        let (code, remaining) = guard.as_mut()?;
        let code = *code;
        *remaining -= 1;
        if *remaining == 0 {
            *guard = None;
        }
        Some(code)
    }
}

/// Mock metadata authority serving `MetaService` on an ephemeral port.
pub struct MockAuthority {
    state: Arc<MockState>,
    endpoint: String,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockAuthority {
    /// Starts a mock authority on an ephemeral port.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Connection` if binding fails.
    pub async fn start() -> crate::Result<Self> {
        Self::start_on_port(0).await
    }

    /// Starts a mock authority on a specific port (0 for ephemeral).
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Config` if the port is invalid and
    /// `ClientError::Connection` if binding fails.
    pub async fn start_on_port(port: u16) -> crate::Result<Self> {
        let state = Arc::new(MockState::new());

        let addr: SocketAddr = format!("127.0.0.1:{port}").parse().map_err(|e| {
            crate::error::ClientError::Config {
                message: format!("Invalid port: {e}"),
            }
        })?;

        let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
            crate::error::ConnectionSnafu {
                message: format!("Failed to bind: {e}"),
            }
            .build()
        })?;
        let local_addr = listener.local_addr().map_err(|e| {
            crate::error::ConnectionSnafu {
                message: format!("Failed to get local addr: {e}"),
            }
            .build()
        })?;

        let endpoint = format!("http://{local_addr}");

        let service = MockMetaService {
            state: Arc::clone(&state),
        };

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let incoming = tokio_stream::wrappers::TcpListenerStream::new(listener);
        tokio::spawn(async move {
            let result = Server::builder()
                .add_service(MetaServiceServer::new(service))
                .serve_with_incoming_shutdown(incoming, async {
                    let _ = shutdown_rx.await;
                })
                .await;

            if let Err(e) = result {
                tracing::error!("mock authority error: {}", e);
            }
        });

        Ok(Self {
            state,
            endpoint,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    /// Returns the endpoint URL for connecting to this authority.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Seeds a registered vault, as if created by an earlier client.
    pub fn insert_existing(&self, name: &str, vault_id: &str) {
        let mut existing = self.state.existing.write();
        existing.insert(name.to_string(), vault_id.to_string());
    }

    /// Returns whether a vault name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.state.existing.read().contains_key(name)
    }

    /// Returns the id assigned to a registered vault name.
    #[must_use]
    pub fn vault_id_of(&self, name: &str) -> Option<String> {
        self.state.existing.read().get(name).cloned()
    }

    /// Injects UNAVAILABLE transport failures for the next `count` requests.
    pub fn inject_unavailable(&self, count: usize) {
        self.state.unavailable_count.store(count, Ordering::SeqCst);
    }

    /// Forces the given authority status code for the next `count` requests.
    ///
    /// Responses produced this way carry no vault id.
    pub fn inject_code(&self, code: MetaCode, count: usize) {
        let mut guard = self.state.injected_code.lock();
        *guard = (count > 0).then_some((code, count));
    }

    /// Returns the number of requests that reached the service.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.state.request_count.load(Ordering::SeqCst)
    }

    /// Returns the cluster id carried by the most recent request.
    #[must_use]
    pub fn last_cluster_id(&self) -> Option<String> {
        self.state.last_cluster_id.read().clone()
    }

    /// Resets all state to initial values.
    pub fn reset(&self) {
        self.state.existing.write().clear();
        self.state.next_vault_id.store(1, Ordering::SeqCst);
        self.state.unavailable_count.store(0, Ordering::SeqCst);
        *self.state.injected_code.lock() = None;
        self.state.request_count.store(0, Ordering::SeqCst);
        *self.state.last_cluster_id.write() = None;
    }

    /// Shuts the authority down gracefully.
    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockAuthority {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

struct MockMetaService {
    state: Arc<MockState>,
}

impl MockMetaService {
    fn respond(code: MetaCode, msg: impl Into<String>, vault_id: Option<String>) -> AlterStorageVaultResponse {
        AlterStorageVaultResponse {
            status: Some(VaultResponseStatus {
                code: code as i32,
                msg: msg.into(),
            }),
            storage_vault_id: vault_id,
        }
    }
}

#[tonic::async_trait]
impl MetaService for MockMetaService {
    async fn alter_storage_vault(
        &self,
        request: Request<AlterStorageVaultRequest>,
    ) -> Result<Response<AlterStorageVaultResponse>, Status> {
        if self.state.should_inject_unavailable() {
            return Err(Status::unavailable("injected failure"));
        }

        self.state.request_count.fetch_add(1, Ordering::SeqCst);

        let req = request.into_inner();
        *self.state.last_cluster_id.write() = Some(req.cluster_id.clone());

        if let Some(code) = self.state.take_injected_code() {
            return Ok(Response::new(Self::respond(code, "injected status", None)));
        }

        let op = req.op();
        let Some(hdfs) = req.hdfs else {
            return Ok(Response::new(Self::respond(
                MetaCode::InvalidArgument,
                "hdfs vault params are required",
                None,
            )));
        };

        // Mirror of the client-side checks: the authority validates too.
        if hdfs.name.is_empty() {
            return Ok(Response::new(Self::respond(
                MetaCode::InvalidArgument,
                "storage vault name is required",
                None,
            )));
        }
        if hdfs.path.is_empty() {
            return Ok(Response::new(Self::respond(
                MetaCode::InvalidArgument,
                "storage vault path is required",
                None,
            )));
        }

        let response = match op {
            VaultOp::CreateHdfsVault => {
                let mut existing = self.state.existing.write();
                if existing.contains_key(&hdfs.name) {
                    Self::respond(
                        MetaCode::AlreadyExisted,
                        format!("storage vault '{}' already existed", hdfs.name),
                        None,
                    )
                } else {
                    let id = self.state.next_vault_id.fetch_add(1, Ordering::SeqCst).to_string();
                    existing.insert(hdfs.name, id.clone());
                    Self::respond(MetaCode::Ok, "", Some(id))
                }
            }
            VaultOp::AlterHdfsVault => {
                let existing = self.state.existing.read();
                match existing.get(&hdfs.name) {
                    Some(id) => Self::respond(MetaCode::Ok, "", Some(id.clone())),
                    None => Self::respond(
                        MetaCode::VaultNotFound,
                        format!("storage vault '{}' not found", hdfs.name),
                        None,
                    ),
                }
            }
            VaultOp::Unspecified => Self::respond(
                MetaCode::InvalidArgument,
                "unsupported vault operation",
                None,
            ),
        };

        Ok(Response::new(response))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn injected_code_is_consumed_per_request() {
        let state = MockState::new();
        *state.injected_code.lock() = Some((MetaCode::InternalError, 2));

        assert_eq!(state.take_injected_code(), Some(MetaCode::InternalError));
        assert_eq!(state.take_injected_code(), Some(MetaCode::InternalError));
        assert_eq!(state.take_injected_code(), None);
    }

    #[test]
    fn unavailable_injection_counts_down() {
        let state = MockState::new();
        state.unavailable_count.store(1, Ordering::SeqCst);

        assert!(state.should_inject_unavailable());
        assert!(!state.should_inject_unavailable());
    }

    #[tokio::test]
    async fn seeded_names_survive_reset_boundary_checks() {
        let server = MockAuthority::start().await.unwrap();
        server.insert_existing("hdfs", "9");
        assert!(server.contains("hdfs"));
        assert_eq!(server.vault_id_of("hdfs").as_deref(), Some("9"));

        server.reset();
        assert!(!server.contains("hdfs"));
        assert_eq!(server.request_count(), 0);
    }
}
