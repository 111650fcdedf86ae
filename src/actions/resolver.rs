//! Resolve raw argument payloads against an [`ArgumentSchema`].
//!
//! Resolution never fails as a whole. Each declared argument either resolves,
//! is omitted because it is not known yet, or is omitted with a condition
//! (`MissingArgument` on a final payload, `Decode` when the raw value cannot be
//! coerced). Unknown keys are ignored.

use serde_json::Value;

use super::arguments::ResolvedArguments;
use super::schema::{ArgumentKind, ArgumentSchema, ArgumentSpec};
use crate::error::ActionError;

/// Knobs for coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Accept `"42"` for numbers, `"true"` for booleans, and scalars for strings.
    pub coerce_scalars: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            coerce_scalars: true,
        }
    }
}

/// Result of resolving one payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    pub arguments: ResolvedArguments,
    /// `MissingArgument` and `Decode` conditions, in schema order.
    pub conditions: Vec<ActionError>,
}

impl Resolution {
    /// Whether every declared argument resolved cleanly.
    pub fn is_clean(&self) -> bool {
        self.conditions.is_empty()
    }
}

/// Resolve with default options.
pub fn resolve(schema: &ArgumentSchema, raw_payload: &Value, is_final: bool) -> Resolution {
    resolve_with(schema, raw_payload, is_final, &ResolveOptions::default())
}

/// Resolve a raw payload against `schema`.
///
/// `action` is only used to label `MissingArgument` conditions.
pub fn resolve_for(
    action: &str,
    schema: &ArgumentSchema,
    raw_payload: &Value,
    is_final: bool,
    options: &ResolveOptions,
) -> Resolution {
    let mut resolution = Resolution::default();

    let parsed;
    let payload = match raw_payload {
        Value::String(text) => match parse_payload_text(text) {
            Ok(value) => {
                parsed = value;
                &parsed
            }
            Err(condition) => {
                resolution.conditions.push(condition);
                return finish_missing(action, schema, is_final, resolution);
            }
        },
        other => other,
    };

    let object = match payload {
        Value::Object(object) => object,
        Value::Null => {
            return finish_missing(action, schema, is_final, resolution);
        }
        other => {
            resolution.conditions.push(ActionError::decode(
                "*",
                "object",
                format!("payload is {}", json_type_name(other)),
            ));
            return finish_missing(action, schema, is_final, resolution);
        }
    };

    for spec in schema.iter() {
        match object.get(&spec.name) {
            None | Some(Value::Null) => {
                if is_final && spec.required {
                    resolution.conditions.push(missing_argument(action, spec));
                }
            }
            Some(raw) => match decode(spec, raw, options) {
                Ok(value) => resolution.arguments.insert(spec.name.clone(), value),
                Err(condition) => {
                    tracing::debug!(
                        argument = %spec.name,
                        kind = %spec.kind,
                        error = %condition,
                        "Omitting argument that failed to decode"
                    );
                    resolution.conditions.push(condition);
                }
            },
        }
    }

    resolution
}

/// Resolve a raw payload against `schema` with explicit options.
pub fn resolve_with(
    schema: &ArgumentSchema,
    raw_payload: &Value,
    is_final: bool,
    options: &ResolveOptions,
) -> Resolution {
    resolve_for("", schema, raw_payload, is_final, options)
}

/// Split `raw` on `delimiter`, trim each segment and drop empty ones.
///
/// Order and duplicates are preserved. An empty delimiter does not split.
pub fn decode_delimited(raw: &str, delimiter: &str) -> Vec<String> {
    if delimiter.is_empty() {
        let trimmed = raw.trim();
        return if trimmed.is_empty() {
            Vec::new()
        } else {
            vec![trimmed.to_string()]
        };
    }
    raw.split(delimiter)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

fn finish_missing(
    action: &str,
    schema: &ArgumentSchema,
    is_final: bool,
    mut resolution: Resolution,
) -> Resolution {
    if is_final {
        resolution.conditions.extend(
            schema
                .iter()
                .filter(|spec| spec.required)
                .map(|spec| missing_argument(action, spec)),
        );
    }
    resolution
}

fn missing_argument(action: &str, spec: &ArgumentSpec) -> ActionError {
    ActionError::MissingArgument {
        action: action.to_string(),
        argument: spec.name.clone(),
    }
}

fn parse_payload_text(text: &str) -> Result<Value, ActionError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(trimmed)
        .map_err(|e| ActionError::decode("*", "object", format!("payload is not JSON: {e}")))
}

fn decode(spec: &ArgumentSpec, raw: &Value, options: &ResolveOptions) -> Result<Value, ActionError> {
    let mismatch = || {
        ActionError::decode(
            spec.name.clone(),
            spec.kind.to_string(),
            format!("got {}", json_type_name(raw)),
        )
    };

    match (&spec.kind, raw) {
        (ArgumentKind::String, Value::String(_)) => Ok(raw.clone()),
        (ArgumentKind::String, Value::Number(n)) if options.coerce_scalars => {
            Ok(Value::String(n.to_string()))
        }
        (ArgumentKind::String, Value::Bool(b)) if options.coerce_scalars => {
            Ok(Value::String(b.to_string()))
        }

        (ArgumentKind::Number, Value::Number(_)) => Ok(raw.clone()),
        (ArgumentKind::Number, Value::String(text)) if options.coerce_scalars => {
            let text = text.trim();
            text.parse::<i64>()
                .map(serde_json::Number::from)
                .ok()
                .or_else(|| text.parse::<f64>().ok().and_then(serde_json::Number::from_f64))
                .map(Value::Number)
                .ok_or_else(mismatch)
        }

        (ArgumentKind::Boolean, Value::Bool(_)) => Ok(raw.clone()),
        (ArgumentKind::Boolean, Value::String(text)) if options.coerce_scalars => {
            match text.trim().to_ascii_lowercase().as_str() {
                "true" => Ok(Value::Bool(true)),
                "false" => Ok(Value::Bool(false)),
                _ => Err(mismatch()),
            }
        }

        (ArgumentKind::DelimitedList { delimiter }, Value::String(text)) => Ok(Value::Array(
            decode_delimited(text, delimiter)
                .into_iter()
                .map(Value::String)
                .collect(),
        )),
        // Already decoded upstream: pass through verbatim, but only if it is a list of strings.
        (ArgumentKind::DelimitedList { .. }, Value::Array(items)) => {
            if items.iter().all(Value::is_string) {
                Ok(raw.clone())
            } else {
                Err(ActionError::decode(
                    spec.name.clone(),
                    spec.kind.to_string(),
                    "list contains non-string items",
                ))
            }
        }

        (ArgumentKind::Object, Value::Object(_)) => Ok(raw.clone()),
        (ArgumentKind::Object, Value::String(text)) => {
            match serde_json::from_str::<Value>(text.trim()) {
                Ok(value @ Value::Object(_)) => Ok(value),
                _ => Err(mismatch()),
            }
        }

        _ => Err(mismatch()),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
