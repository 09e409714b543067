//! View rendering used by the axum response factory.

use std::collections::HashMap;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::config::ViewConfig;

#[derive(Debug, Error)]
pub enum ViewError {
    #[error("view not found: {0}")]
    NotFound(String),

    #[error("failed to encode view data: {0}")]
    Encode(#[from] serde_json::Error),
}

pub trait ViewRenderer: Send + Sync {
    fn render(&self, view: &str, data: &Map<String, Value>) -> Result<String, ViewError>;
}

/// Named templates with `{{ key }}` or `{{ key.field }}` placeholders.
///
/// Strings are inserted as-is, other values as JSON text, and missing or
/// null values as nothing. Everything inserted is HTML-escaped.
#[derive(Debug, Clone, Default)]
pub struct TemplateViews {
    templates: HashMap<String, String>,
}

impl TemplateViews {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(views: &[ViewConfig]) -> Self {
        let templates = views
            .iter()
            .map(|view| (view.name.clone(), view.template.clone()))
            .collect();
        Self { templates }
    }

    pub fn with_template(mut self, name: impl Into<String>, template: impl Into<String>) -> Self {
        self.templates.insert(name.into(), template.into());
        self
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl ViewRenderer for TemplateViews {
    fn render(&self, view: &str, data: &Map<String, Value>) -> Result<String, ViewError> {
        let template = self
            .templates
            .get(view)
            .ok_or_else(|| ViewError::NotFound(view.to_string()))?;

        render_template(template, data)
    }
}

fn render_template(template: &str, data: &Map<String, Value>) -> Result<String, ViewError> {
    let mut rendered = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        rendered.push_str(&rest[..start]);

        let inner = &rest[start + 2..];
        let Some(end) = inner.find("}}") else {
            // Unclosed placeholder, keep the text verbatim.
            rendered.push_str(&rest[start..]);
            return Ok(rendered);
        };

        match lookup(data, inner[..end].trim()) {
            None | Some(Value::Null) => {}
            Some(Value::String(text)) => push_escaped(&mut rendered, text),
            Some(other) => push_escaped(&mut rendered, &serde_json::to_string(other)?),
        }

        rest = &inner[end + 2..];
    }

    rendered.push_str(rest);
    Ok(rendered)
}

fn lookup<'a>(data: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let root = data.get(segments.next()?)?;
    segments.try_fold(root, |value, segment| value.get(segment))
}

fn push_escaped(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
}
