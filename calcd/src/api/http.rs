//! Axum router for the MCP HTTP/JSON-RPC transport.
//! Routes: `POST /mcp` (JSON-RPC requests), `GET /healthz` (liveness),
//! `GET /metrics` (counters), `GET /chat` (WebSocket chat relay).

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use mcp_core::{error_codes, JsonRpcMessage, Protocol};
use serde_json::{json, Value};
use tracing::debug;

use crate::api::metrics::Metrics;
use crate::api::ws::{chat_handler, ChatHub};

/// Shared state threaded through all axum handlers
#[derive(Clone)]
pub struct AppState {
    pub protocol: Arc<Protocol>,
    pub metrics: Arc<Metrics>,
    pub chat: ChatHub,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/mcp", post(handle_mcp))
        .route("/healthz", get(handle_healthz))
        .route("/metrics", get(handle_metrics))
        .route("/chat", get(chat_handler))
        .with_state(state)
}

async fn handle_healthz() -> impl IntoResponse {
    Json(json!({"status": "ok", "service": "calcd"}))
}

async fn handle_metrics(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.metrics.snapshot())
}

async fn handle_mcp(State(state): State<AppState>, body: String) -> axum::response::Response {
    let started = Instant::now();

    let raw: Value = match serde_json::from_str(&body) {
        Ok(v) => v,
        Err(_) => {
            state.metrics.record_request(elapsed_us(started));
            return json_rpc_error(error_codes::PARSE_ERROR, "Parse error");
        }
    };

    let message: JsonRpcMessage = match serde_json::from_value(raw) {
        Ok(m) => m,
        Err(e) => {
            state.metrics.record_request(elapsed_us(started));
            return json_rpc_error(
                error_codes::INVALID_REQUEST,
                &format!("Invalid request: {e}"),
            );
        }
    };

    state.metrics.record_tool_calls(count_tool_calls(&message));
    debug!("Received message: {:?}", message);

    let response = state.protocol.handle_message(message).await;
    state.metrics.record_request(elapsed_us(started));

    match response {
        Some(response) => {
            state.metrics.record_tool_errors(count_errors(&response));
            (StatusCode::OK, Json(response)).into_response()
        }
        // Notifications (and all-notification batches) get no body
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

fn elapsed_us(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX)
}

fn count_tool_calls(message: &JsonRpcMessage) -> u64 {
    match message {
        JsonRpcMessage::Request(req) if req.method == "tools/call" => 1,
        JsonRpcMessage::Batch(batch) => batch.iter().map(count_tool_calls).sum(),
        _ => 0,
    }
}

/// Counts protocol errors and tool payloads flagged `isError`
fn count_errors(message: &JsonRpcMessage) -> u64 {
    match message {
        JsonRpcMessage::Response(resp) => {
            if resp.error.is_some() {
                return 1;
            }
            let is_error = resp
                .result
                .as_ref()
                .and_then(|r| r.get("isError"))
                .and_then(Value::as_bool)
                .unwrap_or(false);
            u64::from(is_error)
        }
        JsonRpcMessage::Batch(batch) => batch.iter().map(count_errors).sum(),
        _ => 0,
    }
}

/// Produces a JSON-RPC error response without a request ID (id: null)
fn json_rpc_error(code: i32, message: &str) -> axum::response::Response {
    let body = json!({
        "jsonrpc": "2.0",
        "id": null,
        "error": { "code": code, "message": message }
    });
    (StatusCode::OK, Json(body)).into_response()
}
