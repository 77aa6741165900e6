//! Common test utilities: a scripted provider and request helpers.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use analyzer_llms::{Error, GenerateRequest, GenerateResponse, Headers, Provider};
use analyzer_server::{AppState, ServerConfig, Variant, build_app};
use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

pub const MODEL: &str = "test/model";

/// What the fake provider answers with.
#[derive(Clone)]
pub enum Reply {
    Text(String),
    ApiError(u16, Value),
    Transport(String),
    /// Wait until cancelled
    Hang,
}

pub struct FakeProvider {
    reply: Reply,
    calls: AtomicUsize,
    last: Mutex<Option<GenerateRequest>>,
}

impl FakeProvider {
    pub fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        })
    }

    pub fn text(text: &str) -> Arc<Self> {
        Self::new(Reply::Text(text.to_string()))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> GenerateRequest {
        self.last
            .lock()
            .unwrap()
            .clone()
            .expect("provider was not called")
    }
}

#[async_trait]
impl Provider for FakeProvider {
    fn provider_id(&self) -> &str {
        "fake"
    }

    fn model(&self) -> &str {
        MODEL
    }

    fn build_headers(&self, _custom_headers: Option<&Headers>) -> Headers {
        Headers::new()
    }

    async fn generate(
        &self,
        request: GenerateRequest,
        cancel: &CancellationToken,
    ) -> analyzer_llms::Result<GenerateResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some(request);

        match &self.reply {
            Reply::Text(text) => Ok(GenerateResponse {
                content: text.clone(),
                ..Default::default()
            }),
            Reply::ApiError(status, payload) => Err(Error::api(*status, payload.clone())),
            Reply::Transport(msg) => Err(Error::Other(msg.clone())),
            Reply::Hang => {
                cancel.cancelled().await;
                Err(Error::Cancelled)
            }
        }
    }
}

pub fn config(variant: Variant, extra: &[(&str, &str)]) -> ServerConfig {
    let mut pairs: Vec<(String, String)> = vec![("AZURE_AI_KEY".into(), "test-key".into())];
    pairs.extend(extra.iter().map(|(k, v)| (k.to_string(), v.to_string())));
    let config = ServerConfig::from_lookup(move |name| {
        pairs.iter().find(|(k, _)| k == name).map(|(_, v)| v.clone())
    })
    .unwrap();
    ServerConfig { variant, ..config }
}

pub fn app_with(variant: Variant, provider: Arc<FakeProvider>) -> (Router, Arc<AppState>) {
    let state = AppState::new(config(variant, &[]), provider);
    (build_app(state.clone()), state)
}

pub fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}
