//! HTTP server lifecycle
//!
//! An [`HttpServer`] moves through `Idle -> Running -> Stopped` exactly once.
//! `start` binds the listener and returns while serving continues on a
//! spawned task; `stop` drains in-flight requests for at most the given
//! deadline. A stopped server cannot be restarted.

use axum::Router;
use axum_server::{tls_rustls::RustlsConfig, Handle};
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::api::create_router;
use crate::error::{Result, ServerError};
use crate::handler::RequestHandler;

/// Extra time allowed for the serving task to exit once connections are closed
const SHUTDOWN_GRACE: Duration = Duration::from_secs(1);

/// Observable lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerState {
    Idle,
    Running,
    Stopped,
}

/// Certificate and key paths (PEM)
#[derive(Debug, Clone)]
struct TlsFiles {
    cert_file: String,
    key_file: String,
}

enum Lifecycle {
    Idle,
    Running(Running),
    Stopped,
}

struct Running {
    handle: Handle,
    task: JoinHandle<io::Result<()>>,
    local_addr: SocketAddr,
}

/// Document front end serving a fixed set of [`RequestHandler`]s
pub struct HttpServer {
    address: String,
    tls: Option<TlsFiles>,
    router: Router,
    lifecycle: Mutex<Lifecycle>,
}

impl HttpServer {
    /// Create a server for `address` (`host:port`)
    ///
    /// TLS is enabled only when both `cert_file` and `key_file` are non-empty.
    /// Handlers are registered here and cannot be changed afterwards.
    pub fn new(
        address: impl Into<String>,
        cert_file: impl Into<String>,
        key_file: impl Into<String>,
        handlers: Vec<Arc<dyn RequestHandler>>,
    ) -> Result<Self> {
        let address = address.into();
        let cert_file = cert_file.into();
        let key_file = key_file.into();

        let tls = match (cert_file.is_empty(), key_file.is_empty()) {
            (false, false) => Some(TlsFiles { cert_file, key_file }),
            (true, true) => None,
            _ => {
                warn!(
                    address = %address,
                    "Only one of certificate and key supplied; serving plain HTTP"
                );
                None
            }
        };

        let router = create_router(&handlers)?;

        Ok(Self {
            address,
            tls,
            router,
            lifecycle: Mutex::new(Lifecycle::Idle),
        })
    }

    /// Bind the listener and begin serving in the background
    ///
    /// Returns the bound address once the listener is established. Bind and
    /// TLS failures leave the server idle.
    pub async fn start(&self) -> Result<SocketAddr> {
        let mut lifecycle = self.lifecycle.lock().await;
        match *lifecycle {
            Lifecycle::Idle => {}
            Lifecycle::Running(_) => return Err(ServerError::AlreadyStarted),
            Lifecycle::Stopped => return Err(ServerError::AlreadyStopped),
        }

        let addr = self.resolve_address().await?;
        let handle = Handle::new();
        let app = self.router.clone().into_make_service();

        let task = match &self.tls {
            Some(tls) => {
                install_crypto_provider();
                let config = RustlsConfig::from_pem_file(&tls.cert_file, &tls.key_file)
                    .await
                    .map_err(ServerError::Tls)?;
                tokio::spawn(
                    axum_server::bind_rustls(addr, config)
                        .handle(handle.clone())
                        .serve(app),
                )
            }
            None => tokio::spawn(axum_server::bind(addr).handle(handle.clone()).serve(app)),
        };

        let Some(local_addr) = handle.listening().await else {
            let source = match task.await {
                Ok(Err(e)) => e,
                Ok(Ok(())) => io::Error::other("listener closed before binding"),
                Err(e) => io::Error::other(e),
            };
            return Err(ServerError::Bind {
                address: self.address.clone(),
                source,
            });
        };

        info!(
            addr = %local_addr,
            tls = self.tls.is_some(),
            "Document server listening"
        );

        *lifecycle = Lifecycle::Running(Running {
            handle,
            task,
            local_addr,
        });

        Ok(local_addr)
    }

    /// Stop accepting connections and drain in-flight requests
    ///
    /// Connections still open when `deadline` elapses are closed.
    pub async fn stop(&self, deadline: Duration) -> Result<()> {
        let mut lifecycle = self.lifecycle.lock().await;
        let running = match std::mem::replace(&mut *lifecycle, Lifecycle::Stopped) {
            Lifecycle::Running(running) => running,
            Lifecycle::Idle => {
                *lifecycle = Lifecycle::Idle;
                return Err(ServerError::NotStarted);
            }
            Lifecycle::Stopped => return Err(ServerError::AlreadyStopped),
        };

        info!(
            addr = %running.local_addr,
            connections = running.handle.connection_count(),
            deadline_ms = deadline.as_millis() as u64,
            "Stopping document server"
        );

        running.handle.graceful_shutdown(Some(deadline));

        let mut task = running.task;
        match tokio::time::timeout(deadline.saturating_add(SHUTDOWN_GRACE), &mut task).await {
            Ok(Ok(Ok(()))) => {
                info!(addr = %running.local_addr, "Document server stopped");
                Ok(())
            }
            Ok(Ok(Err(e))) => Err(ServerError::Serve(e)),
            Ok(Err(e)) => Err(ServerError::Shutdown(e.to_string())),
            Err(_) => {
                task.abort();
                Err(ServerError::Shutdown("serving task did not exit in time".into()))
            }
        }
    }

    /// Current lifecycle state
    pub async fn state(&self) -> ServerState {
        match *self.lifecycle.lock().await {
            Lifecycle::Idle => ServerState::Idle,
            Lifecycle::Running(_) => ServerState::Running,
            Lifecycle::Stopped => ServerState::Stopped,
        }
    }

    /// Bound address while running
    pub async fn local_addr(&self) -> Option<SocketAddr> {
        match &*self.lifecycle.lock().await {
            Lifecycle::Running(running) => Some(running.local_addr),
            _ => None,
        }
    }

    /// Configured listen address
    pub fn address(&self) -> &str {
        &self.address
    }

    async fn resolve_address(&self) -> Result<SocketAddr> {
        let invalid = |reason: String| ServerError::InvalidAddress {
            address: self.address.clone(),
            reason,
        };

        tokio::net::lookup_host(self.address.as_str())
            .await
            .map_err(|e| invalid(e.to_string()))?
            .next()
            .ok_or_else(|| invalid("no addresses resolved".into()))
    }
}

/// Select aws-lc-rs as the process-wide rustls provider
///
/// The HTTP client links ring as well, and rustls refuses to pick between
/// two compiled-in providers. An already installed provider is kept.
fn install_crypto_provider() {
    if rustls::crypto::aws_lc_rs::default_provider()
        .install_default()
        .is_err()
    {
        debug!("rustls crypto provider already installed");
    }
}

impl Drop for HttpServer {
    fn drop(&mut self) {
        if let Lifecycle::Running(running) = self.lifecycle.get_mut() {
            warn!(addr = %running.local_addr, "Server dropped while running; closing listener");
            running.handle.shutdown();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idle_server() -> HttpServer {
        HttpServer::new("127.0.0.1:0", "", "", Vec::new()).unwrap()
    }

    #[tokio::test]
    async fn test_lifecycle_transitions() {
        let server = idle_server();
        assert_eq!(server.state().await, ServerState::Idle);
        assert!(server.local_addr().await.is_none());

        let addr = server.start().await.unwrap();
        assert_ne!(addr.port(), 0);
        assert_eq!(server.state().await, ServerState::Running);
        assert_eq!(server.local_addr().await, Some(addr));

        server.stop(Duration::from_secs(1)).await.unwrap();
        assert_eq!(server.state().await, ServerState::Stopped);
        assert!(server.local_addr().await.is_none());
    }

    #[tokio::test]
    async fn test_stop_without_deadline() {
        let server = idle_server();
        server.start().await.unwrap();

        server.stop(Duration::MAX).await.unwrap();
        assert_eq!(server.state().await, ServerState::Stopped);
    }

    #[tokio::test]
    async fn test_double_start_fails() {
        let server = idle_server();
        server.start().await.unwrap();

        assert!(matches!(server.start().await, Err(ServerError::AlreadyStarted)));
        assert_eq!(server.state().await, ServerState::Running);

        server.stop(Duration::from_secs(1)).await.unwrap();
    }

    #[tokio::test]
    async fn test_stop_before_start_fails() {
        let server = idle_server();

        assert!(matches!(
            server.stop(Duration::from_secs(1)).await,
            Err(ServerError::NotStarted)
        ));
        assert_eq!(server.state().await, ServerState::Idle);
    }

    #[tokio::test]
    async fn test_double_stop_fails() {
        let server = idle_server();
        server.start().await.unwrap();
        server.stop(Duration::from_secs(1)).await.unwrap();

        assert!(matches!(
            server.stop(Duration::from_secs(1)).await,
            Err(ServerError::AlreadyStopped)
        ));
    }

    #[tokio::test]
    async fn test_restart_after_stop_fails() {
        let server = idle_server();
        server.start().await.unwrap();
        server.stop(Duration::from_secs(1)).await.unwrap();

        assert!(matches!(server.start().await, Err(ServerError::AlreadyStopped)));
    }

    #[tokio::test]
    async fn test_concurrent_start_single_winner() {
        let server = Arc::new(idle_server());

        let (a, b) = tokio::join!(server.start(), server.start());
        assert_eq!(a.is_ok() as u8 + b.is_ok() as u8, 1);

        server.stop(Duration::from_secs(1)).await.unwrap();
    }

    #[tokio::test]
    async fn test_bind_conflict_leaves_server_idle() {
        let first = idle_server();
        let addr = first.start().await.unwrap();

        let second = HttpServer::new(addr.to_string(), "", "", Vec::new()).unwrap();
        assert!(matches!(second.start().await, Err(ServerError::Bind { .. })));
        assert_eq!(second.state().await, ServerState::Idle);

        first.stop(Duration::from_secs(1)).await.unwrap();
    }

    #[tokio::test]
    async fn test_unresolvable_address() {
        let server = HttpServer::new("not an address", "", "", Vec::new()).unwrap();
        assert!(matches!(
            server.start().await,
            Err(ServerError::InvalidAddress { .. })
        ));
    }

    #[tokio::test]
    async fn test_missing_tls_material() {
        let dir = tempfile::tempdir().unwrap();
        let cert = dir.path().join("cert.pem");
        let key = dir.path().join("key.pem");

        let server = HttpServer::new(
            "127.0.0.1:0",
            cert.to_string_lossy(),
            key.to_string_lossy(),
            Vec::new(),
        )
        .unwrap();

        assert!(matches!(server.start().await, Err(ServerError::Tls(_))));
        assert_eq!(server.state().await, ServerState::Idle);
    }

    #[test]
    fn test_partial_tls_config_serves_plain() {
        let server = HttpServer::new("127.0.0.1:0", "cert.pem", "", Vec::new()).unwrap();
        assert!(server.tls.is_none());
    }
}
