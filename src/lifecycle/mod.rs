//! Render lifecycle: invocations, their state machine and event plumbing.

pub mod controller;
pub mod events;
pub mod invocation;
pub mod stream;
pub mod types;

pub use controller::{LifecycleController, Transition};
pub use events::{ChannelSink, RenderFrame, ResponseSink, ToolCallEvent, UserResponse};
pub use invocation::Invocation;
pub use stream::{drive, drive_channel, DriveSummary};
pub use types::{new_invocation_id, InvocationId, InvocationStatus};
