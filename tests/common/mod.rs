//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use ecommerce_bootstrap::lifecycle::{Bootstrap, Shutdown};
use ecommerce_bootstrap::report::MemorySink;
use tokio::net::TcpListener;

/// A bootstrap serving on an ephemeral loopback port.
pub struct RunningService {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub handle: tokio::task::JoinHandle<()>,
}

impl RunningService {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn stop(self) {
        self.shutdown.trigger();
        let _ = tokio::time::timeout(Duration::from_secs(5), self.handle).await;
    }
}

/// Serve `bootstrap` on 127.0.0.1 with an OS-assigned port.
///
/// The bootstrap keeps its configured port for the probe bodies; only the
/// listener is ephemeral.
pub async fn spawn(bootstrap: Bootstrap) -> RunningService {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    let handle = tokio::spawn(async move {
        let _ = bootstrap.serve(listener, rx).await;
    });

    RunningService {
        addr,
        shutdown,
        handle,
    }
}

/// Sink that keeps reports for assertions.
pub fn memory_sink() -> Arc<MemorySink> {
    Arc::new(MemorySink::new())
}

/// Client that never routes loopback traffic through a proxy.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}
