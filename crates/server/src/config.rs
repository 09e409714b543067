use std::net::SocketAddr;
use std::path::Path;

use anyhow::Context;
use payload_core::DEFAULT_VIEW_DATA_KEY;
use serde::Deserialize;
use tracing::info;

type Result<T> = anyhow::Result<T>;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
    /// Key the payload output is exposed under in view data.
    #[serde(default = "default_view_data_key")]
    pub view_data_key: String,
    #[serde(default)]
    pub allow_any_origin: bool,
    #[serde(default = "default_views")]
    pub views: Vec<ViewConfig>,
}

impl ServerConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("failed to deserialize server config")
    }

    /// Loads `path` when it exists, otherwise falls back to the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            info!(path = %path.display(), "loading server config");
            Self::from_file(path)
        } else {
            info!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            view_data_key: default_view_data_key(),
            allow_any_origin: false,
            views: default_views(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ViewConfig {
    pub name: String,
    pub template: String,
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 3000))
}

fn default_view_data_key() -> String {
    DEFAULT_VIEW_DATA_KEY.to_string()
}

fn default_views() -> Vec<ViewConfig> {
    vec![ViewConfig {
        name: "greeting".to_string(),
        template: "<h1>{{ payload.text }}</h1>".to_string(),
    }]
}

#[cfg(test)]
mod tests {
    use super::{ServerConfig, ViewConfig};

    #[test]
    fn test_parse_config() {
        let raw = r#"
bind_addr = "0.0.0.0:8080"
view_data_key = "page"
allow_any_origin = true

[[views]]
name = "profile"
template = "<p>{{ page.name }}</p>"
"#;

        let config = ServerConfig::from_str(raw).expect("config should parse");
        assert_eq!(config.bind_addr.to_string(), "0.0.0.0:8080");
        assert_eq!(config.view_data_key, "page");
        assert!(config.allow_any_origin);
        assert_eq!(
            config.views,
            vec![ViewConfig {
                name: "profile".to_string(),
                template: "<p>{{ page.name }}</p>".to_string(),
            }]
        );
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config = ServerConfig::from_str("").expect("empty config should parse");

        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:3000");
        assert_eq!(config.view_data_key, "payload");
        assert!(!config.allow_any_origin);
        assert_eq!(config.views.len(), 1);
        assert_eq!(config.views[0].name, "greeting");
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = ServerConfig::load_or_default("does-not-exist/payload-server.toml")
            .expect("missing config falls back");

        assert_eq!(config.view_data_key, "payload");
    }

    #[test]
    fn invalid_bind_addr_is_rejected() {
        let err = ServerConfig::from_str(r#"bind_addr = "nowhere""#)
            .expect_err("bind address must be host:port");

        assert!(err.to_string().contains("server config"));
    }
}
