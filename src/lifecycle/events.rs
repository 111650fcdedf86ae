//! Events crossing the core's boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::types::{InvocationId, InvocationStatus};
use crate::actions::arguments::ResolvedArguments;

/// A tool-call fragment delivered by the agent runtime.
///
/// Fragments for one invocation arrive in order. Each fragment carries the
/// latest raw value for the arguments it mentions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCallEvent {
    pub invocation_id: InvocationId,
    pub action_name: String,
    #[serde(default, alias = "argumentFragment")]
    pub fragment: serde_json::Value,
    #[serde(default)]
    pub is_final: bool,
}

impl ToolCallEvent {
    /// A fragment with more to follow.
    pub fn partial(
        invocation_id: impl Into<InvocationId>,
        action_name: impl Into<String>,
        fragment: serde_json::Value,
    ) -> Self {
        Self {
            invocation_id: invocation_id.into(),
            action_name: action_name.into(),
            fragment,
            is_final: false,
        }
    }

    /// The last fragment of an invocation.
    pub fn last(
        invocation_id: impl Into<InvocationId>,
        action_name: impl Into<String>,
        fragment: serde_json::Value,
    ) -> Self {
        Self {
            is_final: true,
            ..Self::partial(invocation_id, action_name, fragment)
        }
    }
}

/// What a renderer receives on each state change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderFrame {
    pub invocation_id: InvocationId,
    pub action_name: String,
    /// Arguments known so far; complete when `is_final`.
    pub arguments: ResolvedArguments,
    pub is_final: bool,
    pub status: InvocationStatus,
    /// Human-readable warnings (missing or undecodable arguments).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// A user decision reported by a rendered component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub invocation_id: InvocationId,
    pub action_name: String,
    pub value: serde_json::Value,
    pub responded_at: DateTime<Utc>,
}

/// Receives user responses on behalf of the agent runtime.
pub trait ResponseSink: Send + Sync {
    fn forward(&self, response: UserResponse);
}

impl<F> ResponseSink for F
where
    F: Fn(UserResponse) + Send + Sync,
{
    fn forward(&self, response: UserResponse) {
        self(response)
    }
}

/// Forwards responses over a tokio channel to an async agent runtime.
#[derive(Debug, Clone)]
pub struct ChannelSink(pub tokio::sync::mpsc::UnboundedSender<UserResponse>);

impl ResponseSink for ChannelSink {
    fn forward(&self, response: UserResponse) {
        let invocation_id = response.invocation_id.clone();
        if self.0.send(response).is_err() {
            tracing::warn!(
                invocation_id = %invocation_id,
                "Agent runtime dropped the response channel"
            );
        }
    }
}
