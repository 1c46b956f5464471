//! Pattern-matched callbacks over a simulated host: `Match` row outputs and
//! `All` grouped aggregation.

use dict_dispatch::prelude::*;
use dict_dispatch::TestHost;
use serde_json::json;

fn dropdown(index: i32) -> PatternId {
    pattern_id([("type", "dynamic-dropdown".into()), ("index", index.into())])
}

fn row_output(index: i32) -> PatternId {
    pattern_id([("type", "dynamic-output".into()), ("index", index.into())])
}

#[test]
fn match_wildcard_routes_one_row() {
    // Registered over wildcards; fired with the concrete ids the host
    // resolved for row 1.
    let mut host = TestHost::new();
    host.keyed_callback(
        DependencySpec::new()
            .output(Output::new(
                pattern_id([
                    ("type", "dynamic-output".into()),
                    ("index", Wildcard::Match.into()),
                ]),
                "children",
            ))
            .input(Input::new(
                pattern_id([
                    ("type", "dynamic-dropdown".into()),
                    ("index", Wildcard::Match.into()),
                ]),
                "value",
            )),
        CallbackOptions::new().allow_missing(false),
        |_ctx, inputs, _states| {
            // The one pattern key tells the handler which row fired.
            let (id, _property) = inputs.pattern_keys()[0];
            let id = id.clone();
            let value = inputs.pattern_get(&id, "value").cloned().unwrap_or(json!(null));

            let index = match id.get("index") {
                Some(IdFragment::Number(n)) => n.clone(),
                _ => return Err(anyhow::anyhow!("row id without an index").into()),
            };
            let mut out = CallbackMap::new();
            out.pattern_set(
                pattern_id([
                    ("type", "dynamic-output".into()),
                    ("index", IdFragment::Number(index.clone())),
                ]),
                "children",
                json!(format!("Dropdown {index} = {}", value.as_str().unwrap_or(""))),
            );
            Ok(out)
        },
    );

    assert!(host.spec(0).inputs[0].id.has_wildcard());

    let ctx = CallbackContext::builder()
        .input(dropdown(1), "value")
        .single_output(row_output(1), "children")
        .triggered(PropKey::encode(&dropdown(1).into(), "value"))
        .build();

    let response = host.fire(0, &ctx, vec![json!("MTL")]).unwrap();
    assert_eq!(
        response,
        CallbackResponse::Single(Update::Value(json!("Dropdown 1 = MTL")))
    );
}

#[test]
fn all_wildcard_aggregates_every_match() {
    // One grouped input slot carrying every dropdown's value at once.
    let mut host = TestHost::new();
    host.keyed_callback(
        DependencySpec::new()
            .output(Output::new("dropdown-container-output", "children"))
            .input(Input::new(
                pattern_id([
                    ("type", "filter-dropdown".into()),
                    ("index", Wildcard::All.into()),
                ]),
                "value",
            )),
        CallbackOptions::default(),
        |_ctx, inputs, _states| {
            let mut lines: Vec<String> = inputs
                .pattern_keys()
                .into_iter()
                .filter(|(id, _)| {
                    matches!(id.get("type"), Some(IdFragment::Str(t)) if t == "filter-dropdown")
                })
                .map(|(id, property)| {
                    let value = inputs.pattern_get(id, property).cloned().unwrap_or(json!(null));
                    format!("Dropdown {} = {value}", id.get("index").map(ToString::to_string).unwrap_or_default())
                })
                .collect();
            lines.sort();

            let mut out = CallbackMap::new();
            out.insert("dropdown-container-output.children", json!(lines));
            Ok(out)
        },
    );

    let ctx = CallbackContext::builder()
        .input_group([
            (
                ComponentId::from(pattern_id([
                    ("type", "filter-dropdown".into()),
                    ("index", 0.into()),
                ])),
                "value".to_string(),
            ),
            (
                ComponentId::from(pattern_id([
                    ("type", "filter-dropdown".into()),
                    ("index", 1.into()),
                ])),
                "value".to_string(),
            ),
        ])
        .single_output("dropdown-container-output", "children")
        .build();

    let response = host.fire(0, &ctx, vec![json!(["LA", "MTL"])]).unwrap();
    assert_eq!(
        response,
        CallbackResponse::Single(Update::Value(json!([
            "Dropdown 0 = \"LA\"",
            "Dropdown 1 = \"MTL\"",
        ])))
    );
}

#[test]
fn grouped_slot_rejects_non_list_values() {
    let mut host = TestHost::new();
    host.keyed_callback(
        DependencySpec::new()
            .output(Output::new("out", "children"))
            .input(Input::new(
                pattern_id([("type", "row".into()), ("index", Wildcard::All.into())]),
                "value",
            )),
        CallbackOptions::default(),
        |_ctx, _inputs, _states| Ok(CallbackMap::new()),
    );

    let ctx = CallbackContext::builder()
        .input_group([(
            ComponentId::from(pattern_id([("type", "row".into()), ("index", 0.into())])),
            "value".to_string(),
        )])
        .single_output("out", "children")
        .build();

    let err = host.fire(0, &ctx, vec![json!("not a list")]).unwrap_err();
    assert!(matches!(err, CallbackError::GroupedValue { expected: 1 }));
}

#[test]
fn grouped_match_output_round_trips() {
    // An All output group: the handler fills some rows, the rest no-update.
    let mut host = TestHost::new();
    host.keyed_callback(
        DependencySpec::new()
            .output(Output::new(
                pattern_id([
                    ("type", "dynamic-output".into()),
                    ("index", Wildcard::All.into()),
                ]),
                "children",
            ))
            .input(Input::new("refresh", "n_clicks")),
        CallbackOptions::default(),
        |_ctx, _inputs, _states| {
            let mut out = CallbackMap::new();
            out.pattern_set(row_output(0), "children", json!("row zero"));
            Ok(out)
        },
    );

    let ctx = CallbackContext::builder()
        .input("refresh", "n_clicks")
        .output_group([
            (ComponentId::from(row_output(0)), "children".to_string()),
            (ComponentId::from(row_output(1)), "children".to_string()),
        ])
        .build();

    let response = host.fire(0, &ctx, vec![json!(3)]).unwrap();
    assert_eq!(
        response,
        CallbackResponse::Multi(vec![OutputValue::Many(vec![
            Update::Value(json!("row zero")),
            Update::NoUpdate,
        ])])
    );
}
