//! Render lifecycle controller.
//!
//! One controller belongs to one conversation turn. It applies tool-call
//! fragments in arrival order, resolves arguments, calls the action's renderer
//! and relays user responses back to the agent runtime. Dropping the
//! controller drops every invocation it tracks.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};

use super::events::{RenderFrame, ResponseSink, ToolCallEvent, UserResponse};
use super::invocation::Invocation;
use super::stream::DriveSummary;
use super::types::{InvocationId, InvocationStatus};
use crate::actions::registry::ActionRegistry;
use crate::actions::resolver::resolve_for;
use crate::config::ActionViewConfig;
use crate::error::ActionError;

/// What a fragment did to its invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// The renderer was called; `conditions` are recoverable warnings.
    Rendered {
        status: InvocationStatus,
        conditions: Vec<ActionError>,
    },
    /// State advanced without rendering (progressive rendering disabled).
    Buffered { status: InvocationStatus },
    /// The invocation had already completed; the fragment was dropped.
    Discarded,
}

/// Per-turn state machine driving renderers from tool-call fragments.
pub struct LifecycleController {
    registry: Arc<ActionRegistry>,
    config: ActionViewConfig,
    response_sink: Option<Arc<dyn ResponseSink>>,
    invocations: HashMap<InvocationId, Invocation>,
}

impl LifecycleController {
    /// Create a controller using the global configuration.
    pub fn new(registry: Arc<ActionRegistry>) -> Self {
        Self::with_config(registry, ActionViewConfig::global().clone())
    }

    pub fn with_config(registry: Arc<ActionRegistry>, config: ActionViewConfig) -> Self {
        Self {
            registry,
            config,
            response_sink: None,
            invocations: HashMap::new(),
        }
    }

    /// Forward user responses to `sink`.
    pub fn with_response_sink(mut self, sink: Arc<dyn ResponseSink>) -> Self {
        self.response_sink = Some(sink);
        self
    }

    pub fn config(&self) -> &ActionViewConfig {
        &self.config
    }

    /// Apply one tool-call fragment.
    ///
    /// Errors are non-fatal: `ActionNotFound` means the call should fall back
    /// to text rendering and is not tracked; `RenderFailure` means the
    /// invocation is now complete with an error attached.
    pub fn handle(&mut self, event: ToolCallEvent) -> Result<Transition, ActionError> {
        let ToolCallEvent {
            invocation_id,
            action_name,
            fragment,
            is_final,
        } = event;

        if let Some(existing) = self.invocations.get(&invocation_id) {
            if existing.status().is_settled() {
                warn!(
                    invocation_id = %invocation_id,
                    action = %action_name,
                    status = %existing.status(),
                    "Discarding fragment for settled invocation"
                );
                return Ok(Transition::Discarded);
            }
            if existing.action_name() != action_name {
                warn!(
                    invocation_id = %invocation_id,
                    expected = %existing.action_name(),
                    got = %action_name,
                    "Fragment names a different action; keeping the original"
                );
            }
        } else {
            let definition = self.registry.lookup(&action_name).map_err(|e| {
                debug!(invocation_id = %invocation_id, action = %action_name, "No renderer registered");
                e
            })?;
            debug!(invocation_id = %invocation_id, action = %action_name, "Tracking new invocation");
            self.invocations.insert(
                invocation_id.clone(),
                Invocation::new(invocation_id.clone(), definition),
            );
        }

        let invocation = self
            .invocations
            .get_mut(&invocation_id)
            .ok_or_else(|| ActionError::InvocationNotFound(invocation_id.clone()))?;

        invocation.merge(&fragment);
        let definition = invocation.definition().clone();
        let resolution = resolve_for(
            definition.name(),
            definition.schema(),
            invocation.raw_arguments(),
            is_final,
            &self.config.resolve_options(),
        );

        let status = if is_final {
            invocation.complete(resolution.conditions.clone());
            InvocationStatus::Complete
        } else {
            invocation.advance(InvocationStatus::Partial);
            InvocationStatus::Partial
        };

        if !is_final && !self.config.progressive_render {
            return Ok(Transition::Buffered { status });
        }

        for condition in &resolution.conditions {
            warn!(invocation_id = %invocation_id, error = %condition, "Argument condition");
        }

        let frame = RenderFrame {
            invocation_id: invocation_id.clone(),
            action_name: definition.name().to_string(),
            arguments: resolution.arguments,
            is_final,
            status,
            warnings: resolution.conditions.iter().map(ToString::to_string).collect(),
        };

        match definition.renderer().render(&frame) {
            Ok(()) => Ok(Transition::Rendered {
                status,
                conditions: resolution.conditions,
            }),
            Err(e) => {
                let message = e.to_string();
                warn!(
                    invocation_id = %invocation_id,
                    action = %definition.name(),
                    error = %message,
                    "Renderer failed; marking invocation complete"
                );
                invocation.fail_render(message.clone());
                Err(ActionError::RenderFailure {
                    action: definition.name().to_string(),
                    invocation_id,
                    message,
                })
            }
        }
    }

    /// Apply a batch of events in order.
    pub fn handle_all(&mut self, events: impl IntoIterator<Item = ToolCallEvent>) -> DriveSummary {
        let mut summary = DriveSummary::default();
        for event in events {
            let action_name = event.action_name.clone();
            summary.record(action_name, self.handle(event));
        }
        summary
    }

    /// Record a user decision and forward it to the agent runtime.
    ///
    /// Accepted once, and only after the invocation completed without a
    /// render error.
    pub fn report_response(
        &mut self,
        invocation_id: &str,
        value: serde_json::Value,
    ) -> Result<UserResponse, ActionError> {
        let invocation = self
            .invocations
            .get_mut(invocation_id)
            .ok_or_else(|| ActionError::InvocationNotFound(invocation_id.to_string()))?;

        match invocation.status() {
            InvocationStatus::Complete if invocation.render_error().is_none() => {}
            InvocationStatus::Complete => {
                return Err(ActionError::InvalidState(format!(
                    "invocation {invocation_id} failed to render"
                )));
            }
            InvocationStatus::Responded => {
                return Err(ActionError::InvalidState(format!(
                    "invocation {invocation_id} already has a response"
                )));
            }
            other => {
                return Err(ActionError::InvalidState(format!(
                    "invocation {invocation_id} is {other}, not complete"
                )));
            }
        }

        invocation.respond(value.clone());
        let response = UserResponse {
            invocation_id: invocation_id.to_string(),
            action_name: invocation.action_name().to_string(),
            value,
            responded_at: Utc::now(),
        };
        debug!(invocation_id = %invocation_id, action = %response.action_name, "User responded");

        if let Some(sink) = &self.response_sink {
            sink.forward(response.clone());
        }
        Ok(response)
    }

    pub fn status(&self, invocation_id: &str) -> Option<InvocationStatus> {
        self.invocations.get(invocation_id).map(Invocation::status)
    }

    pub fn invocation(&self, invocation_id: &str) -> Option<&Invocation> {
        self.invocations.get(invocation_id)
    }

    /// Invocations still waiting for a user decision.
    pub fn awaiting_response(&self) -> Vec<&Invocation> {
        self.invocations
            .values()
            .filter(|inv| {
                inv.status() == InvocationStatus::Complete
                    && inv.render_error().is_none()
                    && inv.definition().needs_response()
            })
            .collect()
    }

    /// Drop one invocation. Returns whether it was tracked.
    pub fn cancel(&mut self, invocation_id: &str) -> bool {
        let removed = self.invocations.remove(invocation_id).is_some();
        if removed {
            debug!(invocation_id = %invocation_id, "Invocation dropped");
        }
        removed
    }

    /// End the conversation turn, dropping every invocation. Returns how many
    /// were dropped.
    pub fn end_turn(&mut self) -> usize {
        let dropped = self.invocations.len();
        self.invocations.clear();
        dropped
    }

    pub fn len(&self) -> usize {
        self.invocations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.invocations.is_empty()
    }
}

impl std::fmt::Debug for LifecycleController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LifecycleController")
            .field("config", &self.config)
            .field("invocations", &self.invocations.len())
            .field("response_sink", &self.response_sink.as_ref().map(|_| ".."))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::definition::ActionDefinition;
    use crate::actions::schema::ArgumentSchema;
    use serde_json::json;
    use std::sync::Mutex;

    fn setup(frames: Arc<Mutex<Vec<RenderFrame>>>) -> LifecycleController {
        let registry = Arc::new(ActionRegistry::new());
        let schema = ArgumentSchema::object()
            .delimited_list("tactics", "Tactics", true)
            .build();
        registry.register(ActionDefinition::new("flag", schema, move |frame| {
            frames.lock().unwrap().push(frame.clone());
            Ok(())
        }));
        LifecycleController::with_config(registry, ActionViewConfig::default())
    }

    #[test]
    fn partial_then_final_renders_twice() {
        let frames = Arc::new(Mutex::new(Vec::new()));
        let mut controller = setup(frames.clone());

        let first = controller
            .handle(ToolCallEvent::partial("c1", "flag", json!({ "tactics": "A" })))
            .unwrap();
        let last = controller
            .handle(ToolCallEvent::last("c1", "flag", json!({ "tactics": "A|B" })))
            .unwrap();

        assert!(matches!(first, Transition::Rendered { status: InvocationStatus::Partial, .. }));
        assert!(matches!(last, Transition::Rendered { status: InvocationStatus::Complete, .. }));
        let frames = frames.lock().unwrap();
        assert_eq!(frames.len(), 2);
        assert!(!frames[0].is_final);
        assert_eq!(frames[1].arguments.get_list("tactics").unwrap(), ["A", "B"]);
    }

    #[test]
    fn late_fragment_is_discarded() {
        let frames = Arc::new(Mutex::new(Vec::new()));
        let mut controller = setup(frames.clone());
        controller
            .handle(ToolCallEvent::last("c1", "flag", json!({ "tactics": "A|B" })))
            .unwrap();

        let late = controller
            .handle(ToolCallEvent::partial("c1", "flag", json!({ "tactics": "A" })))
            .unwrap();

        assert_eq!(late, Transition::Discarded);
        assert_eq!(controller.status("c1"), Some(InvocationStatus::Complete));
        assert_eq!(frames.lock().unwrap().len(), 1);
    }

    #[test]
    fn buffered_when_progressive_render_is_off() {
        let frames = Arc::new(Mutex::new(Vec::new()));
        let mut controller = setup(frames.clone());
        controller.config.progressive_render = false;

        let partial = controller
            .handle(ToolCallEvent::partial("c1", "flag", json!({ "tactics": "A" })))
            .unwrap();
        controller
            .handle(ToolCallEvent::last("c1", "flag", json!({ "tactics": "A|B" })))
            .unwrap();

        assert_eq!(partial, Transition::Buffered { status: InvocationStatus::Partial });
        assert_eq!(frames.lock().unwrap().len(), 1);
    }

    #[test]
    fn response_requires_completion() {
        let frames = Arc::new(Mutex::new(Vec::new()));
        let mut controller = setup(frames);
        controller
            .handle(ToolCallEvent::partial("c1", "flag", json!({})))
            .unwrap();

        let err = controller.report_response("c1", json!("yes")).unwrap_err();

        assert!(matches!(err, ActionError::InvalidState(_)));
        assert!(matches!(
            controller.report_response("nope", json!(1)),
            Err(ActionError::InvocationNotFound(_))
        ));
    }

    #[test]
    fn cancel_and_end_turn_drop_invocations() {
        let frames = Arc::new(Mutex::new(Vec::new()));
        let mut controller = setup(frames);
        for id in ["c1", "c2", "c3"] {
            controller
                .handle(ToolCallEvent::partial(id, "flag", json!({})))
                .unwrap();
        }

        assert!(controller.cancel("c1"));
        assert!(!controller.cancel("c1"));
        assert_eq!(controller.end_turn(), 2);
        assert!(controller.is_empty());
    }
}
