//! Tests for argument resolution.

mod common;

use pretty_assertions::assert_eq;
use serde_json::json;

use actionview::actions::resolver::resolve_for;
use actionview::actions::{resolve, resolve_with, ArgumentSchema, ResolveOptions};
use actionview::error::{ActionError, Fallback};

use common::product_schema;

#[test]
fn tactics_are_split_trimmed_and_filtered() {
    let schema = ArgumentSchema::object()
        .delimited_list("tactics", "Tactics", true)
        .build();

    let resolution = resolve(&schema, &json!({ "tactics": "A|B | |C" }), true);

    assert_eq!(resolution.arguments.to_value(), json!({ "tactics": ["A", "B", "C"] }));
}

#[test]
fn resolving_twice_is_identical() {
    let raw = json!({
        "productName": "Echo Dot",
        "manipulativeTactics": "Scarcity | Urgency|Scarcity",
        "unknown": 1,
    });

    let first = resolve(&product_schema(), &raw, true);
    let second = resolve(&product_schema(), &raw, true);

    assert_eq!(first, second);
    assert_eq!(
        first.arguments.get_list("manipulativeTactics").unwrap(),
        ["Scarcity", "Urgency", "Scarcity"]
    );
}

#[test]
fn resolving_resolved_output_is_stable() {
    let raw = json!({ "productName": "Echo Dot", "manipulativeTactics": "A|B" });

    let once = resolve(&product_schema(), &raw, true);
    let twice = resolve(&product_schema(), &once.arguments.to_value(), true);

    assert_eq!(once, twice);
}

#[test]
fn final_payload_reports_every_missing_required_argument() {
    let resolution = resolve_for(
        "analyze_product_marketing",
        &product_schema(),
        &json!({ "description": "Smart speaker" }),
        true,
        &ResolveOptions::default(),
    );

    let missing: Vec<String> = resolution
        .conditions
        .iter()
        .map(|c| match c {
            ActionError::MissingArgument { argument, .. } => argument.clone(),
            other => panic!("unexpected condition {other}"),
        })
        .collect();
    assert_eq!(missing, ["productName", "manipulativeTactics"]);
    assert_eq!(resolution.arguments.get_str("description").unwrap(), "Smart speaker");
}

#[test]
fn decode_error_omits_only_the_bad_argument() {
    let schema = ArgumentSchema::object()
        .string("title", "", true)
        .boolean("confirmRequired", "", false)
        .build();

    let resolution = resolve_with(
        &schema,
        &json!({ "title": "Proceed?", "confirmRequired": "perhaps" }),
        true,
        &ResolveOptions::default(),
    );

    assert_eq!(resolution.arguments.to_value(), json!({ "title": "Proceed?" }));
    assert_eq!(resolution.conditions.len(), 1);
    assert_eq!(resolution.conditions[0].fallback(), Fallback::OmitArgument);
}

#[test]
fn custom_delimiter_is_honoured() {
    let schema = ArgumentSchema::object()
        .delimited_list_with("tags", "", ",", false)
        .build();

    let resolution = resolve(&schema, &json!({ "tags": "a, b,,c|d" }), false);

    assert_eq!(resolution.arguments.get_list("tags").unwrap(), ["a", "b", "c|d"]);
}
