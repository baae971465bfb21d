//! In-process stand-in for the Gemini `generateContent` endpoint.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// A request as the fake endpoint saw it.
#[derive(Debug, Clone)]
pub struct Captured {
    pub call: String,
    pub api_key: Option<String>,
    pub body: Value,
}

struct FakeState {
    status: StatusCode,
    reply: Value,
    hits: AtomicUsize,
    captured: Mutex<Vec<Captured>>,
}

pub struct FakeGemini {
    pub base_url: String,
    state: Arc<FakeState>,
    _handle: tokio::task::JoinHandle<()>,
}

impl FakeGemini {
    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }

    pub fn captured(&self) -> Vec<Captured> {
        self.state.captured.lock().unwrap().clone()
    }
}

/// Wrap model text in a `generateContent` response envelope.
pub fn envelope(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    })
}

async fn generate(
    State(state): State<Arc<FakeState>>,
    Path(call): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.hits.fetch_add(1, Ordering::SeqCst);
    state.captured.lock().unwrap().push(Captured {
        call,
        api_key: headers
            .get("x-goog-api-key")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body,
    });
    (state.status, Json(state.reply.clone()))
}

/// Spawn the fake endpoint on a random port, always answering with `reply`.
pub async fn spawn_fake_gemini(status: StatusCode, reply: Value) -> FakeGemini {
    let state = Arc::new(FakeState {
        status,
        reply,
        hits: AtomicUsize::new(0),
        captured: Mutex::new(Vec::new()),
    });
    let app = Router::new()
        .route("/models/{call}", post(generate))
        .with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    FakeGemini {
        base_url: format!("http://{addr}"),
        state,
        _handle: handle,
    }
}
