#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{HeaderMap, Request, StatusCode},
    response::IntoResponse,
    routing::post,
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use gentle_reflect::{
    app,
    config::UpstreamConfig,
    reflection::ReflectionService,
    upstream::{ChatCompletionRequest, CompletionTransport, TransportError, UpstreamResponse},
    AppState,
};

pub const TEST_CREDENTIAL: &str = "test-gateway-key";
pub const BODY_LIMIT: usize = 64 * 1024;

/// In-process transport returning one fixed response and counting calls
pub struct CountingTransport {
    response: UpstreamResponse,
    calls: AtomicUsize,
}

impl CountingTransport {
    pub fn new(status: u16, body: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            response: UpstreamResponse::new(status, body),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn completing(text: &str) -> Arc<Self> {
        Self::new(200, completion_body(text).to_string())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionTransport for CountingTransport {
    async fn send(
        &self,
        _credential: &str,
        _request: &ChatCompletionRequest,
    ) -> Result<UpstreamResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.response.clone())
    }
}

pub fn completion_body(text: &str) -> Value {
    json!({ "choices": [{ "message": { "role": "assistant", "content": text } }] })
}

pub fn test_app(transport: Arc<CountingTransport>, credential: Option<&str>) -> Router {
    let upstream = UpstreamConfig {
        api_key: credential.map(str::to_string),
        ..UpstreamConfig::default()
    };
    let service = ReflectionService::new(&upstream, transport);
    app(AppState::new(service), BODY_LIMIT)
}

pub fn json_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Origin", "http://localhost:5173")
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

/// Drive the router once and decode the JSON body (Null when empty)
pub async fn send(app: Router, request: Request<Body>) -> Result<(StatusCode, HeaderMap, Value)> {
    let response = app.oneshot(request).await?;
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await?.to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).context("response body is not JSON")?
    };
    Ok((status, headers, body))
}

/// What the fake gateway saw
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub authorization: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct GatewayState {
    status: StatusCode,
    body: String,
    delay: Duration,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

/// Local stand-in for the chat-completion gateway, bound to a free port
pub struct FakeGateway {
    pub endpoint: String,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

impl FakeGateway {
    pub async fn start(status: u16, body: impl Into<String>) -> Result<Self> {
        Self::start_with_delay(status, body, Duration::ZERO).await
    }

    pub async fn start_with_delay(status: u16, body: impl Into<String>, delay: Duration) -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let seen = Arc::new(Mutex::new(Vec::new()));
        let state = GatewayState {
            status: StatusCode::from_u16(status)?,
            body: body.into(),
            delay,
            seen: seen.clone(),
        };

        let router = Router::new()
            .route("/v1/chat/completions", post(gateway_completion))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .with_context(|| format!("failed to bind fake gateway on {}", port))?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Ok(Self {
            endpoint: format!("http://127.0.0.1:{}/v1/chat/completions", port),
            seen,
        })
    }

    pub fn requests(&self) -> Vec<SeenRequest> {
        self.seen.lock().map(|seen| seen.clone()).unwrap_or_default()
    }
}

async fn gateway_completion(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let seen = SeenRequest {
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    };
    if let Ok(mut all) = state.seen.lock() {
        all.push(seen);
    }

    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }

    (
        state.status,
        [("content-type", "application/json")],
        state.body.clone(),
    )
}
