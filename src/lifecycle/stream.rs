//! Drive a controller from an async stream of tool-call events.
//!
//! The controller itself is synchronous; waiting for the next fragment lives
//! here, on the agent runtime's side of the boundary.

use futures::{Stream, StreamExt};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio_stream::wrappers::UnboundedReceiverStream;

use super::controller::{LifecycleController, Transition};
use super::events::ToolCallEvent;
use crate::error::ActionError;

/// Tally of what happened while applying a batch or stream of events.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DriveSummary {
    pub events: usize,
    pub rendered: usize,
    pub buffered: usize,
    pub discarded: usize,
    /// Action names with no registered renderer, in arrival order.
    pub unhandled: Vec<String>,
    /// Render failures and other errors returned by the controller.
    pub failures: Vec<ActionError>,
    /// Recoverable argument conditions reported alongside renders.
    pub warnings: Vec<ActionError>,
}

impl DriveSummary {
    pub(crate) fn record(&mut self, action_name: String, outcome: Result<Transition, ActionError>) {
        self.events += 1;
        match outcome {
            Ok(Transition::Rendered { conditions, .. }) => {
                self.rendered += 1;
                self.warnings.extend(conditions);
            }
            Ok(Transition::Buffered { .. }) => self.buffered += 1,
            Ok(Transition::Discarded) => self.discarded += 1,
            Err(ActionError::ActionNotFound(_)) => self.unhandled.push(action_name),
            Err(e) => self.failures.push(e),
        }
    }

    /// Whether every event was rendered or buffered without failure.
    pub fn is_clean(&self) -> bool {
        self.unhandled.is_empty() && self.failures.is_empty() && self.warnings.is_empty()
    }
}

/// Apply every event of `events` in arrival order.
pub async fn drive<S>(controller: &mut LifecycleController, events: S) -> DriveSummary
where
    S: Stream<Item = ToolCallEvent>,
{
    let mut summary = DriveSummary::default();
    futures::pin_mut!(events);
    while let Some(event) = events.next().await {
        let action_name = event.action_name.clone();
        summary.record(action_name, controller.handle(event));
    }
    tracing::debug!(
        events = summary.events,
        rendered = summary.rendered,
        unhandled = summary.unhandled.len(),
        failures = summary.failures.len(),
        "Event stream drained"
    );
    summary
}

/// Apply events from a channel until every sender is dropped.
pub async fn drive_channel(
    controller: &mut LifecycleController,
    receiver: UnboundedReceiver<ToolCallEvent>,
) -> DriveSummary {
    drive(controller, UnboundedReceiverStream::new(receiver)).await
}
