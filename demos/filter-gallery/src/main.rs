//! Filter gallery - pattern-matched dict-dispatch example
//!
//! A row of dynamically added filter dropdowns. Two callbacks:
//! - a `Match` callback that rewrites one row's label when its dropdown
//!   changes, registered once and fired with whatever concrete row the host
//!   resolved;
//! - an `All` callback that aggregates every dropdown's value into a summary
//!   line, receiving the whole group as one flattened map.
//!
//! The simulated host fires the callbacks the way a framework would as the
//! user adds rows and picks cities.

use anyhow::Result;
use dict_dispatch::prelude::*;
use dict_dispatch::TestHost;
use serde_json::json;

fn dropdown(index: i64) -> PatternId {
    pattern_id([("type", "filter-dropdown".into()), ("index", index.into())])
}

fn row_label(index: i64) -> PatternId {
    pattern_id([("type", "filter-label".into()), ("index", index.into())])
}

fn register(host: &mut TestHost) {
    // Per-row label: Output/Input over MATCH-wildcard ids.
    host.keyed_callback(
        DependencySpec::new()
            .output(Output::new(
                pattern_id([
                    ("type", "filter-label".into()),
                    ("index", Wildcard::Match.into()),
                ]),
                "children",
            ))
            .input(Input::new(
                pattern_id([
                    ("type", "filter-dropdown".into()),
                    ("index", Wildcard::Match.into()),
                ]),
                "value",
            )),
        CallbackOptions::new().allow_missing(false),
        |_ctx, inputs, _states| {
            let (id, property) = match inputs.pattern_keys().first() {
                Some(&(id, property)) => (id.clone(), property.to_string()),
                None => return Err(CallbackError::PreventUpdate),
            };
            let value = inputs.pattern_get(&id, &property).cloned().unwrap_or(json!(null));
            let index = id.get("index").map(ToString::to_string).unwrap_or_default();

            let mut out = CallbackMap::new();
            out.pattern_set(
                pattern_id([
                    ("type", "filter-label".into()),
                    ("index", id.get("index").cloned().unwrap_or_else(|| 0.into())),
                ]),
                "children",
                json!(format!("Dropdown {index} = {value}")),
            );
            Ok(out)
        },
    );

    // Summary: one grouped input over every dropdown.
    host.keyed_callback(
        DependencySpec::new()
            .output(Output::new("gallery-summary", "children"))
            .input(Input::new(
                pattern_id([
                    ("type", "filter-dropdown".into()),
                    ("index", Wildcard::All.into()),
                ]),
                "value",
            )),
        CallbackOptions::default(),
        |_ctx, inputs, _states| {
            let mut picked: Vec<String> = inputs
                .pattern_keys()
                .into_iter()
                .filter_map(|(id, property)| {
                    inputs
                        .pattern_get(id, property)
                        .and_then(|v| v.as_str())
                        .map(|city| format!("{}:{city}", id.get("index").map(ToString::to_string).unwrap_or_default()))
                })
                .collect();
            picked.sort();

            let mut out = CallbackMap::new();
            out.insert("gallery-summary.children", json!(picked.join(" | ")));
            Ok(out)
        },
    );
}

/// Fire the row callback for one concrete row, as the host would.
fn pick_city(host: &TestHost, index: i64, city: &str) -> Result<CallbackResponse> {
    let ctx = CallbackContext::builder()
        .input(dropdown(index), "value")
        .single_output(row_label(index), "children")
        .triggered(PropKey::encode(&dropdown(index).into(), "value"))
        .build();
    Ok(host.fire(0, &ctx, vec![json!(city)])?)
}

/// Fire the summary callback with every dropdown's current value.
fn summarize(host: &TestHost, selections: &[Option<&str>]) -> Result<CallbackResponse> {
    let group: Vec<(ComponentId, String)> = (0..selections.len() as i64)
        .map(|index| (ComponentId::from(dropdown(index)), "value".to_string()))
        .collect();
    let values: Vec<_> = selections
        .iter()
        .map(|city| city.map(|c| json!(c)).unwrap_or(json!(null)))
        .collect();

    let ctx = CallbackContext::builder()
        .input_group(group)
        .single_output("gallery-summary", "children")
        .build();
    Ok(host.fire(1, &ctx, vec![json!(values)])?)
}

fn show(label: &str, response: &CallbackResponse) {
    match response {
        CallbackResponse::Single(Update::Value(v)) => println!("{label}: {v}"),
        CallbackResponse::Single(Update::NoUpdate) => println!("{label}: (unchanged)"),
        CallbackResponse::Multi(_) => println!("{label}: (list)"),
    }
}

fn main() -> Result<()> {
    let mut host = TestHost::new();
    register(&mut host);

    // User adds two rows, then picks cities one at a time.
    show("row 0", &pick_city(&host, 0, "LA")?);
    show("summary", &summarize(&host, &[Some("LA"), None])?);

    show("row 1", &pick_city(&host, 1, "MTL")?);
    show("summary", &summarize(&host, &[Some("LA"), Some("MTL")])?);

    Ok(())
}
