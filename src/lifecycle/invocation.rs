//! One tracked action invocation.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::types::{InvocationId, InvocationStatus};
use crate::actions::definition::ActionDefinition;
use crate::error::ActionError;

/// A single agent call of an action, from first fragment to user response.
///
/// The definition is captured when the invocation is created, so a later
/// re-registration of the same name does not change an in-flight call.
#[derive(Debug, Clone)]
pub struct Invocation {
    id: InvocationId,
    definition: Arc<ActionDefinition>,
    raw: Value,
    status: InvocationStatus,
    response: Option<Value>,
    render_error: Option<String>,
    warnings: Vec<ActionError>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Invocation {
    pub fn new(id: impl Into<InvocationId>, definition: Arc<ActionDefinition>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            definition,
            raw: Value::Object(serde_json::Map::new()),
            status: InvocationStatus::Pending,
            response: None,
            render_error: None,
            warnings: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn action_name(&self) -> &str {
        self.definition.name()
    }

    pub fn definition(&self) -> &Arc<ActionDefinition> {
        &self.definition
    }

    pub fn status(&self) -> InvocationStatus {
        self.status
    }

    /// Raw argument buffer (always a JSON object).
    pub fn raw_arguments(&self) -> &Value {
        &self.raw
    }

    pub fn response(&self) -> Option<&Value> {
        self.response.as_ref()
    }

    pub fn render_error(&self) -> Option<&str> {
        self.render_error.as_deref()
    }

    /// Conditions recorded when the invocation completed.
    pub fn warnings(&self) -> &[ActionError] {
        &self.warnings
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Merge a fragment into the raw buffer.
    ///
    /// Keys in the fragment replace older raw values; keys that are absent or
    /// `null` keep what the buffer already holds. A fragment given as JSON text
    /// is parsed first; text that does not parse yet is skipped.
    pub(crate) fn merge(&mut self, fragment: &Value) {
        let parsed;
        let fragment = match fragment {
            Value::String(text) => match serde_json::from_str::<Value>(text) {
                Ok(value) => {
                    parsed = value;
                    &parsed
                }
                Err(e) => {
                    tracing::debug!(
                        invocation_id = %self.id,
                        error = %e,
                        "Skipping fragment text that is not valid JSON yet"
                    );
                    return;
                }
            },
            other => other,
        };

        let incoming = match fragment {
            Value::Object(incoming) => incoming,
            Value::Null => return,
            other => {
                tracing::warn!(
                    invocation_id = %self.id,
                    fragment = %other,
                    "Ignoring fragment that is not an object"
                );
                return;
            }
        };

        if let Value::Object(buffer) = &mut self.raw {
            for (key, value) in incoming {
                if !value.is_null() {
                    buffer.insert(key.clone(), value.clone());
                }
            }
        }
        self.touch();
    }

    /// Move forward to `status`. Never moves backwards.
    pub(crate) fn advance(&mut self, status: InvocationStatus) {
        if status > self.status {
            self.status = status;
            self.touch();
        }
    }

    pub(crate) fn complete(&mut self, warnings: Vec<ActionError>) {
        self.warnings = warnings;
        self.advance(InvocationStatus::Complete);
    }

    pub(crate) fn fail_render(&mut self, message: String) {
        self.render_error = Some(message);
        self.advance(InvocationStatus::Complete);
    }

    pub(crate) fn respond(&mut self, value: Value) {
        self.response = Some(value);
        self.advance(InvocationStatus::Responded);
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
