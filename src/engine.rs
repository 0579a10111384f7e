//! Template engine seam
//!
//! Components never talk to minijinja directly. Rendering goes through the
//! `TemplateEngine` trait so the renderer only needs a `render(id, context)`
//! capability, and tests can swap in templates held in memory.

use std::path::Path;

use minijinja::{Environment, ErrorKind, Template};
use serde_json::Value;

/// Errors raised by the template store while fetching or rendering
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("template not found: {0}")]
    NotFound(String),

    #[error("failed to load template {template}: {message}")]
    Syntax { template: String, message: String },

    #[error("failed to render {template}: {message}")]
    Render { template: String, message: String },
}

/// A named-template store that can render with a JSON context
pub trait TemplateEngine: Send + Sync {
    /// Render the template addressed by `template` with `context`
    fn render(&self, template: &str, context: &Value) -> Result<String, EngineError>;

    /// Fetch and compile `template` without rendering it
    fn load(&self, template: &str) -> Result<(), EngineError>;

    /// Human-readable engine name for startup output
    fn engine_name(&self) -> &str;
}

/// Jinja2 templates via minijinja
///
/// Templates ending in `.html` are auto-escaped, so field values coming from
/// components are escaped here rather than by the component layer.
pub struct JinjaEngine {
    env: Environment<'static>,
}

impl JinjaEngine {
    /// Engine loading templates lazily from `dir`
    pub fn new(dir: impl AsRef<Path>) -> Self {
        let mut env = Environment::new();
        env.set_loader(minijinja::path_loader(dir.as_ref().to_path_buf()));

        Self { env }
    }

    /// Engine holding the given `(name, source)` pairs in memory
    #[cfg(test)]
    pub fn from_sources<I, N, S>(sources: I) -> Result<Self, EngineError>
    where
        I: IntoIterator<Item = (N, S)>,
        N: Into<String>,
        S: Into<String>,
    {
        let mut env = Environment::new();
        for (name, source) in sources {
            let name = name.into();
            env.add_template_owned(name.clone(), source.into())
                .map_err(|e| EngineError::Syntax {
                    template: name,
                    message: e.to_string(),
                })?;
        }

        Ok(Self { env })
    }

    fn template(&self, template: &str) -> Result<Template<'_, '_>, EngineError> {
        self.env.get_template(template).map_err(|e| match e.kind() {
            ErrorKind::TemplateNotFound => EngineError::NotFound(template.to_string()),
            _ => EngineError::Syntax {
                template: template.to_string(),
                message: e.to_string(),
            },
        })
    }
}

impl TemplateEngine for JinjaEngine {
    fn render(&self, template: &str, context: &Value) -> Result<String, EngineError> {
        self.template(template)?.render(context).map_err(|e| EngineError::Render {
            template: template.to_string(),
            message: e.to_string(),
        })
    }

    fn load(&self, template: &str) -> Result<(), EngineError> {
        self.template(template).map(|_| ())
    }

    fn engine_name(&self) -> &str {
        "jinja2"
    }
}
