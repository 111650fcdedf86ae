//! actionview: action dispatch for agent-rendered UI components
//!
//! An agent calls a named action with structured arguments; the client
//! renders a purpose-built component for it. This crate owns the contract in
//! between: a registry of action definitions, resolution of raw (possibly
//! partial) argument payloads against each action's schema, and a per-turn
//! lifecycle that calls renderers as fragments arrive and relays the user's
//! decision back to the agent.
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use actionview::prelude::*;
//!
//! let registry = Arc::new(ActionRegistry::new());
//! let schema = ArgumentSchema::object()
//!     .string("productName", "Product name", true)
//!     .delimited_list("manipulativeTactics", "Suspected tactics", true)
//!     .build();
//! registry.register(ActionDefinition::new("analyze_product_marketing", schema, |frame| {
//!     println!("{} -> {}", frame.status, frame.arguments.to_value());
//!     Ok(())
//! }));
//!
//! let mut turn = LifecycleController::with_config(registry, ActionViewConfig::default());
//! turn.handle(ToolCallEvent::last(
//!     "call_1",
//!     "analyze_product_marketing",
//!     serde_json::json!({ "productName": "Echo Dot", "manipulativeTactics": "Scarcity|Urgency" }),
//! ))?;
//! assert_eq!(turn.status("call_1"), Some(InvocationStatus::Complete));
//! # Ok::<(), actionview::error::ActionError>(())
//! ```

pub mod actions;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod prelude;

#[cfg(feature = "cli")]
pub mod cli;
