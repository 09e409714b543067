//! HTTP routes.

pub mod greeting;
pub mod health;
pub mod state;

use std::sync::Arc;

use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use greeting::create_greeting_router;
pub use health::create_health_router;
pub use state::AppState;

use crate::config::ServerConfig;

pub fn create_router(config: &ServerConfig) -> Router {
    let state = Arc::new(AppState::new(config));

    let router = Router::new()
        .merge(create_health_router())
        .merge(create_greeting_router())
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if config.allow_any_origin {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}
