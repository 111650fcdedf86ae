//! Convenience re-exports for common use.

pub use crate::actions::{
    ActionDefinition, ActionManifest, ActionRegistry, ArgumentKind, ArgumentSchema, ArgumentSpec,
    RenderError, Renderer, ResolvedArguments,
};
pub use crate::config::ActionViewConfig;
pub use crate::error::{ActionError, Result};
pub use crate::lifecycle::{
    InvocationStatus, LifecycleController, RenderFrame, ResponseSink, ToolCallEvent, Transition,
    UserResponse,
};
