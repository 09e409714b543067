//! Axum integration for payload responses.

pub mod api;
pub mod config;
pub mod error;
pub mod responder;
pub mod views;

pub use api::{AppState, create_router};
pub use config::{ServerConfig, ViewConfig};
pub use error::ApiError;
pub use responder::{AxumResponder, AxumResponseFactory};
pub use views::{TemplateViews, ViewError, ViewRenderer};
