//! Component binding and rendering
//!
//! A component is a serializable struct paired with a template. The template
//! identifier is derived from the component's source location the first time
//! the type is seen and then cached for the life of the process:
//!
//! ```text
//! src/components/counter/mod.rs   ->  components/counter/counter.html
//! src/components/table/rows.rs    ->  components/table/table.html
//! src/pages/about.html            ->  pages/about.html
//! ```
//!
//! `Renderer` holds the single template engine. It is set once at startup;
//! rendering before that is a configuration error.

use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::engine::{EngineError, TemplateEngine};

/// Path segment that source locations are resolved against
pub const SOURCE_ROOT: &str = "src";

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

/// A component type whose template cannot be located
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindingError {
    #[error(
        "could not derive a template path for {component} from '{location}'; \
         set Component::TEMPLATE or define the component under src/"
    )]
    Unresolvable {
        component: &'static str,
        location: String,
    },
}

/// Renderer used before (or configured more than once during) startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("template engine not set; call Renderer::set_engine() at application startup")]
    EngineUnset,

    #[error("template engine already set; Renderer::set_engine() may only be called once")]
    EngineAlreadySet,
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    Binding(#[from] BindingError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("failed to build render context for {component}")]
    Context {
        component: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{component} must serialize to a map of fields")]
    NotAMap { component: &'static str },
}

// ─────────────────────────────────────────────────────────────────────────────
// Component contract
// ─────────────────────────────────────────────────────────────────────────────

/// A typed record that renders to an HTML fragment
///
/// Implementors normally set `SOURCE = file!()` and let the template path be
/// derived. `TEMPLATE` skips derivation entirely.
pub trait Component: Serialize + 'static {
    /// Name used in errors and startup output
    const NAME: &'static str;

    /// Source file that declares the component
    const SOURCE: &'static str;

    /// Explicit template identifier
    const TEMPLATE: Option<&'static str> = None;
}

/// Trusted HTML produced by a render
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Markup(String);

impl Markup {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Markup> for String {
    fn from(markup: Markup) -> Self {
        markup.0
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Template path resolution
// ─────────────────────────────────────────────────────────────────────────────

/// Derive a template identifier from a source location
///
/// Everything after the last `src` segment is kept, so absolute paths such
/// as `~/.cargo/registry/src/<index>/<crate>/src/...` anchor on the crate's
/// own source root. Paths shaped `components/<name>/...` collapse to
/// `components/<name>/<name>.html`.
pub fn resolve_template_path(
    component: &'static str,
    location: &str,
) -> Result<String, BindingError> {
    let normalized = location.replace('\\', "/");
    let parts: Vec<&str> = normalized.split('/').collect();

    let rest = parts
        .iter()
        .rposition(|part| *part == SOURCE_ROOT)
        .map(|idx| &parts[idx + 1..])
        .filter(|rest| !rest.is_empty())
        .ok_or_else(|| BindingError::Unresolvable {
            component,
            location: location.to_string(),
        })?;

    if rest.len() >= 3 && rest[0] == "components" {
        let dir = rest[1];
        return Ok(format!("components/{dir}/{dir}.html"));
    }

    Ok(rest.join("/"))
}

type BindingTable = RwLock<HashMap<TypeId, Arc<str>>>;

fn bindings() -> &'static BindingTable {
    static BINDINGS: OnceLock<BindingTable> = OnceLock::new();
    BINDINGS.get_or_init(Default::default)
}

/// Template identifier for `C`, resolved on first use and cached per type
pub fn template_id<C: Component>() -> Result<Arc<str>, BindingError> {
    let key = TypeId::of::<C>();

    if let Some(id) = bindings()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&key)
    {
        return Ok(Arc::clone(id));
    }

    let resolved: Arc<str> = match C::TEMPLATE {
        Some(template) => template.into(),
        None => resolve_template_path(C::NAME, C::SOURCE)?.into(),
    };

    let mut table = bindings().write().unwrap_or_else(PoisonError::into_inner);
    // Another thread may have won the race; keep whichever landed first
    let id = table.entry(key).or_insert(resolved);
    Ok(Arc::clone(id))
}

/// A component type and the template it resolved to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub component: &'static str,
    pub template: Arc<str>,
}

/// Resolve `C` eagerly so a broken binding fails at startup, not on first request
pub fn register<C: Component>() -> Result<Binding, BindingError> {
    let template = template_id::<C>()?;
    tracing::debug!(component = C::NAME, template = %template, "Component registered");

    Ok(Binding {
        component: C::NAME,
        template,
    })
}

/// Flatten a component's fields into a context map, then apply `extra` on top
pub fn context<C: Component>(
    component: &C,
    extra: Map<String, Value>,
) -> Result<Map<String, Value>, RenderError> {
    let value = serde_json::to_value(component).map_err(|source| RenderError::Context {
        component: C::NAME,
        source,
    })?;

    let Value::Object(mut fields) = value else {
        return Err(RenderError::NotAMap { component: C::NAME });
    };

    fields.extend(extra);
    Ok(fields)
}

// ─────────────────────────────────────────────────────────────────────────────
// Renderer
// ─────────────────────────────────────────────────────────────────────────────

/// Owner of the shared template engine
#[derive(Default)]
pub struct Renderer {
    engine: OnceLock<Arc<dyn TemplateEngine>>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renderer with its engine already set
    #[cfg(test)]
    pub fn with_engine(engine: Arc<dyn TemplateEngine>) -> Self {
        let renderer = Self::new();
        // Freshly created, so the cell is empty
        let _ = renderer.engine.set(engine);
        renderer
    }

    /// Install the template engine. Call exactly once during startup.
    pub fn set_engine(&self, engine: Arc<dyn TemplateEngine>) -> Result<(), ConfigError> {
        let name = engine.engine_name().to_string();
        self.engine
            .set(engine)
            .map_err(|_| ConfigError::EngineAlreadySet)?;
        tracing::debug!(engine = %name, "Template engine set");
        Ok(())
    }

    pub fn engine(&self) -> Result<&Arc<dyn TemplateEngine>, ConfigError> {
        self.engine.get().ok_or(ConfigError::EngineUnset)
    }

    /// Load every bound template once so a missing or broken file stops
    /// startup instead of failing the first request
    pub fn check(&self, bindings: &[Binding]) -> Result<(), RenderError> {
        let engine = self.engine()?;
        for binding in bindings {
            engine.load(&binding.template)?;
        }
        Ok(())
    }

    /// Render one component with `extra` merged over its own fields
    pub fn render<C: Component>(
        &self,
        component: &C,
        extra: Map<String, Value>,
    ) -> Result<Markup, RenderError> {
        let engine = self.engine()?;
        let template = template_id::<C>()?;
        let context = context(component, extra)?;

        let html = engine.render(&template, &Value::Object(context))?;
        Ok(Markup(html))
    }

    /// Render with no extra context
    pub fn html<C: Component>(&self, component: &C) -> Result<Markup, RenderError> {
        self.render(component, Map::new())
    }

    /// Component fields plus its rendered fragment under `html`,
    /// for page templates that place components by name
    pub fn props<C: Component>(&self, component: &C) -> Result<Value, RenderError> {
        let html = self.html(component)?;
        let mut props = context(component, Map::new())?;
        props.insert("html".to_string(), Value::String(html.into_string()));
        Ok(Value::Object(props))
    }

    /// Render a full page template that is not bound to a component
    pub fn render_page(&self, template: &str, context: &Value) -> Result<Markup, RenderError> {
        let engine = self.engine()?;
        Ok(Markup(engine.render(template, context)?))
    }
}
