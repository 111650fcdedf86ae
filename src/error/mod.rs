//! Error types for actionview.

pub mod unified;

pub use unified::{ConditionCategory, Fallback};

use thiserror::Error;

/// Conditions raised while dispatching, resolving and rendering actions.
///
/// None of these are fatal to the process. Most of them are reported next to
/// a successful result (see [`crate::actions::Resolution`]) rather than
/// returned as a failure.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ActionError {
    #[error("Action not found: {0}")]
    ActionNotFound(String),

    #[error("Missing required argument '{argument}' for action '{action}'")]
    MissingArgument { action: String, argument: String },

    #[error("Cannot decode argument '{argument}' as {expected}: {message}")]
    Decode {
        argument: String,
        expected: String,
        message: String,
    },

    #[error("Render failed for action '{action}' (invocation {invocation_id}): {message}")]
    RenderFailure {
        action: String,
        invocation_id: String,
        message: String,
    },

    #[error("Invocation not found: {0}")]
    InvocationNotFound(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ActionError {
    /// Create a decode error for an argument.
    pub fn decode(
        argument: impl Into<String>,
        expected: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Decode {
            argument: argument.into(),
            expected: expected.into(),
            message: message.into(),
        }
    }

    /// Classify this error into a category.
    pub fn category(&self) -> ConditionCategory {
        match self {
            Self::ActionNotFound(_) => ConditionCategory::Dispatch,
            Self::MissingArgument { .. } | Self::Decode { .. } => ConditionCategory::Arguments,
            Self::RenderFailure { .. } => ConditionCategory::Render,
            Self::InvocationNotFound(_) | Self::InvalidState(_) => ConditionCategory::Lifecycle,
            Self::Configuration(_) => ConditionCategory::Configuration,
        }
    }

    /// How the surrounding conversation should degrade.
    pub fn fallback(&self) -> Fallback {
        match self {
            Self::ActionNotFound(_) => Fallback::DefaultTextRendering,
            Self::MissingArgument { .. } => Fallback::ShowWarning,
            Self::Decode { .. } => Fallback::OmitArgument,
            Self::RenderFailure { .. } => Fallback::ShowFallbackMessage,
            Self::InvocationNotFound(_) | Self::InvalidState(_) | Self::Configuration(_) => {
                Fallback::None
            }
        }
    }

    /// Whether this condition should stop the process. Always `false`.
    pub fn is_fatal(&self) -> bool {
        false
    }

    /// Whether this is a warning that accompanies an otherwise usable result.
    pub fn is_warning(&self) -> bool {
        matches!(self.category(), ConditionCategory::Arguments)
    }
}

impl From<toml::de::Error> for ActionError {
    fn from(e: toml::de::Error) -> Self {
        Self::Configuration(e.to_string())
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, ActionError>;
