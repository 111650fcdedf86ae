//! Actions: definitions, schemas, the registry and argument resolution.

pub mod arguments;
pub mod definition;
pub mod manifest;
pub mod registry;
pub mod resolver;
pub mod schema;

pub use arguments::ResolvedArguments;
pub use definition::{ActionDefinition, RenderError, Renderer};
pub use manifest::ActionManifest;
pub use registry::ActionRegistry;
pub use resolver::{decode_delimited, resolve, resolve_with, Resolution, ResolveOptions};
pub use schema::{ArgumentKind, ArgumentSchema, ArgumentSpec};
