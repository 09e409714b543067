//! Shared application state.

use std::sync::Arc;

use payload_core::PayloadResponder;
use tracing::info;

use crate::config::ServerConfig;
use crate::responder::{AxumResponder, AxumResponseFactory};
use crate::views::TemplateViews;

#[derive(Clone)]
pub struct AppState {
    pub responder: AxumResponder,
    /// Key handlers use when exposing payload output to views.
    pub view_data_key: String,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> Self {
        let views = TemplateViews::from_config(&config.views);
        info!(count = views.len(), "view templates loaded");

        Self {
            responder: PayloadResponder::new(AxumResponseFactory::new(Arc::new(views))),
            view_data_key: config.view_data_key.clone(),
        }
    }
}
