//! Greeting routes backed by payloads.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    response::Response,
    routing::get,
};
use payload_core::{Payload, status};
use serde::Deserialize;
use serde_json::{Value, json};

use super::state::AppState;
use crate::error::ApiError;

const GREETING_WRAPPER: &str = "greeting";
const GREETING_VIEW: &str = "greeting";

pub fn create_greeting_router() -> Router<Arc<AppState>> {
    Router::new()
        // wrapped output plus messages
        .route("/api/greeting", get(greeting))
        // bare output
        .route("/api/greeting/raw", get(raw_greeting))
        .route("/api/greeting/view", get(greeting_view))
}

#[derive(Debug, Deserialize)]
struct GreetingQuery {
    name: Option<String>,
}

async fn greeting(
    State(state): State<Arc<AppState>>,
    Query(query): Query<GreetingQuery>,
) -> Result<Response, ApiError> {
    let payload = greeting_payload(query.name);
    state.responder.json_response(&payload)
}

async fn raw_greeting(
    State(state): State<Arc<AppState>>,
    Query(query): Query<GreetingQuery>,
) -> Result<Response, ApiError> {
    let mut payload = Payload::new();
    payload
        .set_status(status::OK)
        .set_output(greeting_output(query.name.as_deref().unwrap_or("world")), None);

    state.responder.json_response(&payload)
}

async fn greeting_view(
    State(state): State<Arc<AppState>>,
    Query(query): Query<GreetingQuery>,
) -> Result<Response, ApiError> {
    let payload = greeting_payload(query.name);
    state
        .responder
        .view_response_with_key(GREETING_VIEW, &payload, &state.view_data_key)
}

fn greeting_payload(name: Option<String>) -> Payload {
    let mut payload = Payload::new();

    match name.filter(|name| !name.trim().is_empty()) {
        Some(name) => payload
            .set_status(status::OK)
            .set_output(greeting_output(&name), Some(GREETING_WRAPPER))
            .set_messages([format!("greeted {name}")]),
        None => payload
            .set_status(status::UNPROCESSABLE_ENTITY)
            .set_output(Value::Null, Some(GREETING_WRAPPER))
            .set_messages(["name is required"]),
    };

    payload
}

fn greeting_output(name: &str) -> Value {
    json!({
        "name": name,
        "text": format!("Hello, {name}!"),
    })
}
