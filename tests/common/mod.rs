//! Shared test helpers: a recording renderer and registry fixtures.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use actionview::actions::{ActionDefinition, ActionRegistry, ArgumentSchema, RenderError, Renderer};
use actionview::lifecycle::RenderFrame;

pub const PRODUCT_ACTION: &str = "analyze_product_marketing";

/// A renderer that records every frame it receives, optionally failing.
#[derive(Default)]
pub struct RecordingRenderer {
    frames: Mutex<Vec<RenderFrame>>,
    fail_with: Option<String>,
}

impl RecordingRenderer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            frames: Mutex::new(Vec::new()),
            fail_with: Some(message.to_string()),
        })
    }

    pub fn frames(&self) -> Vec<RenderFrame> {
        self.frames.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.frames.lock().unwrap().len()
    }
}

impl Renderer for RecordingRenderer {
    fn render(&self, frame: &RenderFrame) -> Result<(), RenderError> {
        self.frames.lock().unwrap().push(frame.clone());
        match &self.fail_with {
            Some(message) => Err(message.clone().into()),
            None => Ok(()),
        }
    }
}

/// Schema of the product marketing analysis component.
pub fn product_schema() -> ArgumentSchema {
    ArgumentSchema::object()
        .string("productName", "Name of the product", true)
        .string("productLink", "Link to the product page", false)
        .string("imageUrl", "Product image", false)
        .string("description", "Product description", false)
        .delimited_list("manipulativeTactics", "Suspected tactics", true)
        .string("userQuestion", "Question for the user", false)
        .build()
}

/// Registry holding the product action bound to `renderer`.
pub fn product_registry(renderer: Arc<RecordingRenderer>) -> Arc<ActionRegistry> {
    let registry = Arc::new(ActionRegistry::new());
    registry.register(
        ActionDefinition::with_renderer(PRODUCT_ACTION, product_schema(), renderer)
            .description("Flag manipulative marketing tactics")
            .requires_response(true),
    );
    registry
}
