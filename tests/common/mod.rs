//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use genai_proxy::config::{Deployment, GatewayConfig, MissingKeyPolicy};
use genai_proxy::{GatewayServer, Shutdown};
use secrecy::SecretString;
use serde_json::Value;
use tokio::net::TcpListener;

pub const TEST_KEY: &str = "sk-test-key";

/// One request observed by the mock upstream.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub path: String,
    pub authorization: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct MockState {
    status: u16,
    body: &'static str,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

/// A fake upstream API that answers every request with a fixed reply.
pub struct MockUpstream {
    pub addr: SocketAddr,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockUpstream {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

async fn record(
    State(state): State<MockState>,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    state.calls.lock().unwrap().push(RecordedCall {
        path: uri.path().to_string(),
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    });

    (
        StatusCode::from_u16(state.status).unwrap(),
        [(header::CONTENT_TYPE, "application/json")],
        state.body,
    )
        .into_response()
}

/// Start a mock upstream on an ephemeral port.
pub async fn start_mock_upstream(status: u16, body: &'static str) -> MockUpstream {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let calls = Arc::new(Mutex::new(Vec::new()));

    let app = Router::new().fallback(record).with_state(MockState {
        status,
        body,
        calls: calls.clone(),
    });
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockUpstream { addr, calls }
}

/// An address nothing listens on.
pub async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Gateway config pointed at `base_url` with a credential and no throttle.
pub fn test_config(base_url: String, deployment: Deployment) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.deployment = deployment;
    config.listener.host = "127.0.0.1".into();
    config.listener.port = Some(0);
    config.upstream.base_url = base_url;
    config.upstream.api_key = Some(SecretString::new(TEST_KEY.to_string()));
    config.upstream.missing_key_policy = MissingKeyPolicy::Strict;
    config.throttle.enabled = false;
    config
}

/// A running gateway; dropping the handle leaves the server running until
/// `shutdown.trigger()`.
pub struct Gateway {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
}

impl Gateway {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

pub async fn start_gateway(config: GatewayConfig) -> Gateway {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let server = GatewayServer::new(config);
    let rx = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    Gateway { addr, shutdown }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
