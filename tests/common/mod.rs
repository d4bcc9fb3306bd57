//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use compute_gateway::config::{BackendConfig, GatewayConfig};
use compute_gateway::{BackendClient, HttpServer, Shutdown};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tower::ServiceExt;

/// A request as seen by the stub backend.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Handle to a running stub backend.
#[derive(Clone)]
pub struct StubBackend {
    pub addr: SocketAddr,
    calls: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubBackend {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

/// Start a programmable backend on an ephemeral port. `handler` maps each
/// request to `(status, body)`.
pub async fn start_stub_backend<F>(handler: F) -> StubBackend
where
    F: Fn(&RecordedRequest) -> (u16, String) + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let stub = StubBackend {
        addr: listener.local_addr().unwrap(),
        calls: Arc::new(AtomicUsize::new(0)),
        requests: Arc::new(Mutex::new(Vec::new())),
    };
    let handler = Arc::new(handler);
    let state = stub.clone();

    tokio::spawn(async move {
        while let Ok((socket, _)) = listener.accept().await {
            let handler = handler.clone();
            let state = state.clone();
            tokio::spawn(async move {
                serve_one(socket, handler.as_ref(), &state).await;
            });
        }
    });

    stub
}

/// Backend answering `/process`, `/health` and `/stats` like the real
/// compute service.
pub async fn start_healthy_backend() -> StubBackend {
    start_stub_backend(|req| match req.path.as_str() {
        "/process" => (200, r#"{"result":6}"#.into()),
        "/health" => (200, r#"{"status":"healthy","uptime":42,"version":"0.1.0"}"#.into()),
        "/stats" => (
            200,
            r#"{"requests_processed":3,"uptime_seconds":42,"cpu_cores":8}"#.into(),
        ),
        _ => (404, "not found".into()),
    })
    .await
}

/// Backend failing every call with `status`.
pub async fn start_failing_backend(status: u16) -> StubBackend {
    start_stub_backend(move |_| (status, "backend exploded".into())).await
}

/// URL of a port with nothing listening on it.
pub async fn unreachable_backend_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

async fn serve_one<F>(mut socket: TcpStream, handler: &F, state: &StubBackend)
where
    F: Fn(&RecordedRequest) -> (u16, String),
{
    let Some(request) = read_request(&mut socket).await else {
        return;
    };
    state.calls.fetch_add(1, Ordering::SeqCst);
    state.requests.lock().unwrap().push(request.clone());

    let (status, body) = handler(&request);
    let status = StatusCode::from_u16(status).expect("stub status must be a valid HTTP code");
    let status_text = format!(
        "{} {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown")
    );

    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status_text,
        body.len(),
        body
    );
    let _ = socket.write_all(response.as_bytes()).await;
    let _ = socket.shutdown().await;
}

async fn read_request(socket: &mut TcpStream) -> Option<RecordedRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).into_owned();
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next()?.split_whitespace();
    let method = request_line.next()?.to_string();
    let path = request_line.next()?.to_string();

    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .collect();

    let content_length = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let end = (header_end + content_length).min(buf.len());
    let body = String::from_utf8_lossy(&buf[header_end..end]).into_owned();

    Some(RecordedRequest {
        method,
        path,
        headers,
        body,
    })
}

/// Gateway router pointed at `backend_url`, driven in-process.
pub fn gateway_router(backend_url: &str) -> Router {
    let mut config = GatewayConfig::default();
    config.backend = BackendConfig {
        base_url: backend_url.to_string(),
    };
    gateway_router_with(config)
}

/// Gateway router built from `config`, driven in-process.
pub fn gateway_router_with(config: GatewayConfig) -> Router {
    let backend = BackendClient::new(&config.backend).unwrap();
    HttpServer::with_backend(config, backend).router()
}

/// Send one request through the router and decode the JSON body.
pub async fn call(
    router: Router,
    request: Request<Body>,
) -> (StatusCode, axum::http::HeaderMap, serde_json::Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, headers, body)
}

pub fn get(path: &str) -> Request<Body> {
    Request::builder().uri(path).body(Body::empty()).unwrap()
}

pub fn post_json(path: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Run a full gateway server on an ephemeral port.
pub async fn start_gateway(backend_url: &str) -> (SocketAddr, Shutdown) {
    let mut config = GatewayConfig::default();
    config.backend.base_url = backend_url.to_string();
    start_gateway_with(config).await
}

/// Run a full gateway server with `config` on an ephemeral port.
pub async fn start_gateway_with(config: GatewayConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let server = HttpServer::new(config).unwrap();
    let rx = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    (addr, shutdown)
}
