use std::sync::Arc;

use axum::{
    Json,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use payload_core::{PayloadResponder, ResponseFactory};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::ApiError;
use crate::views::ViewRenderer;

pub type AxumResponder = PayloadResponder<AxumResponseFactory>;

/// Builds axum responses: JSON bodies directly, views through a [`ViewRenderer`].
#[derive(Clone)]
pub struct AxumResponseFactory {
    views: Arc<dyn ViewRenderer>,
}

impl AxumResponseFactory {
    pub fn new(views: Arc<dyn ViewRenderer>) -> Self {
        Self { views }
    }
}

impl ResponseFactory for AxumResponseFactory {
    type Response = Response;
    type Error = ApiError;

    fn json(&self, body: Value, status: u16) -> Result<Response, ApiError> {
        let status = status_code(status)?;
        Ok((status, Json(body)).into_response())
    }

    fn view(
        &self,
        view: &str,
        data: Map<String, Value>,
        status: u16,
    ) -> Result<Response, ApiError> {
        let status = status_code(status)?;
        let html = self.views.render(view, &data)?;
        debug!(view, bytes = html.len(), "view rendered");

        Ok((status, Html(html)).into_response())
    }
}

fn status_code(status: u16) -> Result<StatusCode, ApiError> {
    StatusCode::from_u16(status).map_err(|_| ApiError::InvalidStatus(status))
}
