//! Dialogflow webhook HTTP server

use super::dialogflow::{DialogflowRequest, FulfillmentEnvelope};
use agendai_application::{HandleIntentInput, HandleIntentUseCase};
use axum::Json;
use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use serde::Serialize;
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind HTTP listener on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    #[error("HTTP server error: {0}")]
    Serve(#[from] std::io::Error),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Shared state of the webhook routes
pub struct WebhookState {
    use_case: Arc<HandleIntentUseCase>,
    default_language: String,
    shutdown: CancellationToken,
}

impl WebhookState {
    pub fn new(use_case: Arc<HandleIntentUseCase>) -> Self {
        Self {
            use_case,
            default_language: agendai_domain::WebhookRequest::DEFAULT_LANGUAGE_CODE.to_string(),
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_default_language(mut self, code: impl Into<String>) -> Self {
        self.default_language = code.into();
        self
    }

    /// Cancelling this token stops the server and every in-flight request.
    pub fn with_shutdown(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }
}

pub fn router(state: Arc<WebhookState>) -> Router {
    Router::new()
        .route("/webhook", post(webhook_handler))
        .route("/healthz", get(healthz_handler))
        .with_state(state)
}

/// Bind `addr` and serve until the state's shutdown token is cancelled.
pub async fn serve(state: Arc<WebhookState>, addr: SocketAddr) -> Result<(), ServerError> {
    info!(%addr, "Binding webhook server");
    let shutdown = state.shutdown.clone();
    let app = router(state);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    info!(%addr, "Webhook server ready to accept connections");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(ServerError::Serve)
}

/// `POST /webhook`
///
/// Anything but a non-empty JSON object is rejected with 400. Every accepted
/// request is answered with 200 and a fulfillment envelope, carrying the
/// localized fallback text when handling failed.
pub async fn webhook_handler(State(state): State<Arc<WebhookState>>, body: Bytes) -> Response {
    let payload = match parse_body(&body) {
        Ok(payload) => payload,
        Err(error) => {
            warn!(%error, bytes = body.len(), "Rejecting webhook request without a JSON body");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "No JSON data received".to_string(),
                }),
            )
                .into_response();
        }
    };

    let request = payload.into_request(&state.default_language);
    info!(
        session = %request.session_id,
        intent = %request.intent_name,
        language = %request.language_code,
        "Received webhook request"
    );

    let input = HandleIntentInput::new(request, chrono::Local::now().naive_local());
    let reply = state
        .use_case
        .respond(input, state.shutdown.child_token())
        .await;

    Json(FulfillmentEnvelope::from(reply)).into_response()
}

fn parse_body(body: &[u8]) -> Result<DialogflowRequest, String> {
    match serde_json::from_slice::<Value>(body).map_err(|e| e.to_string())? {
        Value::Object(map) if !map.is_empty() => {
            serde_json::from_value(Value::Object(map)).map_err(|e| e.to_string())
        }
        Value::Object(_) => Err("empty JSON object".to_string()),
        other => Err(format!("expected a JSON object, got {}", json_kind(&other))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// `GET /healthz`
pub async fn healthz_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
