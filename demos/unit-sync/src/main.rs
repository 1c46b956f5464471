//! Unit sync - Minimal dict-dispatch example
//!
//! Two temperature fields kept in sync: editing either one recomputes the
//! other. One callback owns both fields as inputs AND outputs, and uses the
//! context's `triggered` bookkeeping to know which side the user edited —
//! the other side is the only key it writes, so the edited field gets a
//! no-update and keeps the user's text.
//!
//! There is no real dispatcher here; the simulated host fires the callback
//! the way a framework would after each edit.

use anyhow::Result;
use dict_dispatch::prelude::*;
use dict_dispatch::TestHost;
use serde_json::json;

fn c_to_f(c: f64) -> f64 {
    c * 9.0 / 5.0 + 32.0
}

fn f_to_c(f: f64) -> f64 {
    (f - 32.0) * 5.0 / 9.0
}

fn register(host: &mut TestHost) {
    host.keyed_callback(
        DependencySpec::new()
            .output(Output::new("celsius", "value"))
            .output(Output::new("fahrenheit", "value"))
            .input(Input::new("celsius", "value"))
            .input(Input::new("fahrenheit", "value")),
        CallbackOptions::default(),
        |ctx, inputs, _states| {
            let mut out = CallbackMap::new();
            match ctx.triggered_key() {
                Some(key) if *key == PropKey::from("celsius.value") => {
                    if let Some(c) = inputs.get("celsius.value").and_then(|v| v.as_f64()) {
                        out.insert("fahrenheit.value", json!(c_to_f(c)));
                    }
                }
                Some(_) => {
                    if let Some(f) = inputs.get("fahrenheit.value").and_then(|v| v.as_f64()) {
                        out.insert("celsius.value", json!(f_to_c(f)));
                    }
                }
                // Initial call: nothing edited, nothing to write back.
                None => return Err(CallbackError::PreventUpdate),
            }
            Ok(out)
        },
    );
}

/// Fire the sync callback the way the host would after one edit.
fn edit(host: &TestHost, field: &str, value: f64) -> Result<CallbackResponse> {
    let ctx = CallbackContext::builder()
        .input("celsius", "value")
        .input("fahrenheit", "value")
        .output("celsius", "value")
        .output("fahrenheit", "value")
        .triggered(format!("{field}.value"))
        .build();

    let (c, f) = if field == "celsius" {
        (json!(value), json!(null))
    } else {
        (json!(null), json!(value))
    };
    Ok(host.fire(0, &ctx, vec![c, f])?)
}

fn describe(response: &CallbackResponse) -> String {
    let values = match response {
        CallbackResponse::Multi(values) => values,
        CallbackResponse::Single(_) => return "unexpected single response".to_string(),
    };
    let fields = ["celsius", "fahrenheit"];
    values
        .iter()
        .zip(fields)
        .map(|(value, field)| match value {
            OutputValue::One(Update::Value(v)) => format!("{field} -> {v}"),
            _ => format!("{field} -> (unchanged)"),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn main() -> Result<()> {
    let mut host = TestHost::new();
    register(&mut host);

    println!("edit celsius to 25:");
    println!("  {}", describe(&edit(&host, "celsius", 25.0)?));

    println!("edit fahrenheit to 32:");
    println!("  {}", describe(&edit(&host, "fahrenheit", 32.0)?));

    println!("edit celsius to -40:");
    println!("  {}", describe(&edit(&host, "celsius", -40.0)?));

    Ok(())
}
