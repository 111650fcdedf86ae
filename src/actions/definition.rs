//! Action definitions and the renderer trait.

use std::sync::Arc;

use super::schema::ArgumentSchema;
use crate::lifecycle::events::RenderFrame;

/// Error type renderers may return; any error converts into it with `?`.
pub type RenderError = Box<dyn std::error::Error + Send + Sync>;

/// Rendering collaborator: turns a frame into a visual component.
///
/// Called once per accepted fragment with whatever has resolved so far, and
/// once more with `is_final == true`. Failures are not retried.
pub trait Renderer: Send + Sync {
    fn render(&self, frame: &RenderFrame) -> Result<(), RenderError>;
}

impl<F> Renderer for F
where
    F: Fn(&RenderFrame) -> Result<(), RenderError> + Send + Sync,
{
    fn render(&self, frame: &RenderFrame) -> Result<(), RenderError> {
        self(frame)
    }
}

/// A named, agent-invocable action with its schema and renderer.
#[derive(Clone)]
pub struct ActionDefinition {
    name: String,
    description: Option<String>,
    schema: ArgumentSchema,
    requires_response: bool,
    renderer: Arc<dyn Renderer>,
}

impl ActionDefinition {
    /// Create a definition from a closure renderer.
    pub fn new<F>(name: impl Into<String>, schema: ArgumentSchema, renderer: F) -> Self
    where
        F: Fn(&RenderFrame) -> Result<(), RenderError> + Send + Sync + 'static,
    {
        Self::with_renderer(name, schema, Arc::new(renderer))
    }

    /// Create a definition from a shared renderer.
    pub fn with_renderer(
        name: impl Into<String>,
        schema: ArgumentSchema,
        renderer: Arc<dyn Renderer>,
    ) -> Self {
        Self {
            name: name.into(),
            description: None,
            schema,
            requires_response: false,
            renderer,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Mark that the rendered component reports a user decision back.
    pub fn requires_response(mut self, requires: bool) -> Self {
        self.requires_response = requires;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description_text(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn schema(&self) -> &ArgumentSchema {
        &self.schema
    }

    pub fn needs_response(&self) -> bool {
        self.requires_response
    }

    pub fn renderer(&self) -> &Arc<dyn Renderer> {
        &self.renderer
    }

    /// Tool declaration for the agent runtime: name, description, JSON Schema.
    pub fn tool_declaration(&self) -> serde_json::Value {
        serde_json::json!({
            "name": self.name,
            "description": self.description.clone().unwrap_or_default(),
            "parameters": self.schema.to_json_schema(),
        })
    }
}

impl std::fmt::Debug for ActionDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionDefinition")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("schema", &self.schema)
            .field("requires_response", &self.requires_response)
            .finish()
    }
}
