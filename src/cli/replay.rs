//! CLI handlers for replaying events and printing schemas.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use crate::actions::{ActionManifest, ActionRegistry, RenderError, Renderer};
use crate::config::ActionViewConfig;
use crate::lifecycle::{drive, LifecycleController, RenderFrame, ToolCallEvent};

use super::{ReplayArgs, SchemaArgs};

/// Prints each frame as one JSON line on stdout.
struct JsonLinesRenderer;

impl Renderer for JsonLinesRenderer {
    fn render(&self, frame: &RenderFrame) -> Result<(), RenderError> {
        let line = serde_json::to_string(frame)?;
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{line}")?;
        Ok(())
    }
}

/// Parse a JSONL event log. Blank lines are skipped.
pub fn read_events(path: &Path) -> Result<Vec<ToolCallEvent>, Box<dyn std::error::Error>> {
    let raw = std::fs::read_to_string(path)?;
    raw.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str::<ToolCallEvent>(line).map_err(|e| -> Box<dyn std::error::Error> {
                format!("{}:{}: {e}", path.display(), index + 1).into()
            })
        })
        .collect()
}

/// Handle `actionview replay`.
pub async fn handle_replay(
    args: ReplayArgs,
    config: ActionViewConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let manifest = ActionManifest::from_file(&args.manifest)?;
    let registry = ActionRegistry::global();
    let names = manifest.register_all(&registry, &config, Arc::new(JsonLinesRenderer));
    tracing::info!(actions = ?names, "Registered actions from manifest");

    let events = read_events(&args.events)?;

    let mut config = config;
    if args.final_only {
        config.progressive_render = false;
    }
    let mut controller = LifecycleController::with_config(registry, config);
    let summary = drive(&mut controller, futures::stream::iter(events)).await;

    eprintln!(
        "events: {}  rendered: {}  buffered: {}  discarded: {}",
        summary.events, summary.rendered, summary.buffered, summary.discarded
    );
    for name in &summary.unhandled {
        eprintln!("  no renderer for '{name}' (shown as text)");
    }
    for warning in &summary.warnings {
        eprintln!("  warning: {warning}");
    }
    for failure in &summary.failures {
        eprintln!("  failed: {failure}");
    }
    Ok(())
}

/// Handle `actionview schema`.
pub fn handle_schema(
    args: SchemaArgs,
    config: &ActionViewConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let manifest = ActionManifest::from_file(&args.manifest)?;
    let declarations: Vec<serde_json::Value> = manifest
        .definitions(config, Arc::new(JsonLinesRenderer))
        .iter()
        .map(|definition| definition.tool_declaration())
        .collect();
    println!("{}", serde_json::to_string_pretty(&declarations)?);
    Ok(())
}
