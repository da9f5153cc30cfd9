//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    body::Body,
    extract::Request,
    http::{header, HeaderMap, StatusCode},
    response::Response,
    Router,
};
use tokio::net::TcpListener;

use context_vault::{HttpServer, Shutdown, VaultConfig};

pub const SERVICE_KEY: &str = "test-service-role-key";

/// A request as seen by the mock store.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("store received non-JSON body")
    }
}

/// What the mock store answers with.
#[derive(Debug, Clone)]
pub struct StoreReply {
    pub status: u16,
    pub location: Option<String>,
    pub body: String,
}

impl StoreReply {
    pub fn redirect(status: u16, location: &str) -> Self {
        Self {
            status,
            location: Some(location.to_string()),
            body: String::new(),
        }
    }
}

impl From<(u16, String)> for StoreReply {
    fn from((status, body): (u16, String)) -> Self {
        Self {
            status,
            location: None,
            body,
        }
    }
}

/// Handle to a running mock table store.
#[derive(Clone)]
pub struct MockStore {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockStore {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

/// Start a programmable mock store on an ephemeral port.
///
/// Every request is recorded, then answered with whatever `respond` returns.
pub async fn start_mock_store<F, R>(respond: F) -> MockStore
where
    F: Fn(&RecordedRequest) -> R + Send + Sync + 'static,
    R: Into<StoreReply>,
{
    let requests = Arc::new(Mutex::new(Vec::new()));
    let respond = Arc::new(respond);

    let recorded = requests.clone();
    let handler = move |request: Request| {
        let recorded = recorded.clone();
        let respond = respond.clone();
        async move {
            let (parts, body) = request.into_parts();
            let bytes = axum::body::to_bytes(body, usize::MAX)
                .await
                .unwrap_or_default();
            let request = RecordedRequest {
                method: parts.method.to_string(),
                path: parts.uri.path().to_string(),
                query: parts.uri.query().map(str::to_string),
                headers: parts.headers,
                body: String::from_utf8_lossy(&bytes).into_owned(),
            };

            let reply: StoreReply = respond(&request).into();
            recorded.lock().unwrap().push(request);

            let mut response = Response::builder()
                .status(StatusCode::from_u16(reply.status).unwrap())
                .header(header::CONTENT_TYPE, "application/json");
            if let Some(location) = reply.location {
                response = response.header(header::LOCATION, location);
            }
            response.body(Body::from(reply.body)).unwrap()
        }
    };

    let app = Router::new().fallback(handler);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockStore { addr, requests }
}

/// An address nothing is listening on.
pub async fn closed_address() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

pub fn test_config(store_url: &str) -> VaultConfig {
    let mut config = VaultConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.upstream.base_url = store_url.to_string();
    config.upstream.service_key = SERVICE_KEY.to_string();
    config
}

/// A vault instance serving on an ephemeral port; stops when dropped.
pub struct TestVault {
    pub addr: SocketAddr,
    shutdown: Shutdown,
}

impl TestVault {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for TestVault {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

pub async fn start_vault(config: VaultConfig) -> TestVault {
    let server = HttpServer::new(config).expect("failed to build server");
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    TestVault { addr, shutdown }
}
