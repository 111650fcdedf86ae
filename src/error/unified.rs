//! Condition classification and degradation hints.

use serde::{Deserialize, Serialize};

/// Broad condition category for routing fallback logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionCategory {
    Dispatch,
    Arguments,
    Render,
    Lifecycle,
    Configuration,
}

/// What the conversation should show instead of crashing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fallback {
    /// No renderer is registered; show the call as plain text.
    DefaultTextRendering,
    /// Render what exists and surface a recoverable warning.
    ShowWarning,
    /// Drop the offending argument, keep the rest.
    OmitArgument,
    /// The component failed; show a fallback message in its place.
    ShowFallbackMessage,
    None,
}
