//! End-to-end flows over a simulated host: plain-id callbacks under every
//! flag combination, plus the failure modes the flags control.

use dict_dispatch::prelude::*;
use dict_dispatch::TestHost;
use serde_json::json;

fn two_output_host(options: CallbackOptions) -> TestHost {
    let mut host = TestHost::new();
    host.keyed_callback(
        DependencySpec::new()
            .output(Output::new("output-1", "children"))
            .output(Output::new("output-2", "children"))
            .input(Input::new("input1", "value"))
            .state(State::new("input2", "value")),
        options,
        |_ctx, inputs, states| {
            let mut out = CallbackMap::new();
            out.insert(
                "output-1.children",
                inputs.get("input1.value").cloned().unwrap_or(json!(null)),
            );
            out.insert(
                "output-2.children",
                states.get("input2.value").cloned().unwrap_or(json!(null)),
            );
            Ok(out)
        },
    );
    host
}

#[test]
fn simple_callback_runs_under_every_flag_combination() {
    for strict in [true, false] {
        for allow_missing in [true, false] {
            let options = CallbackOptions::new().strict(strict).allow_missing(allow_missing);
            let host = two_output_host(options);
            let ctx = host.static_context(0);

            let response = host
                .fire(0, &ctx, vec![json!("hello world"), json!("state")])
                .unwrap();

            assert_eq!(
                response,
                CallbackResponse::Multi(vec![
                    OutputValue::One(Update::Value(json!("hello world"))),
                    OutputValue::One(Update::Value(json!("state"))),
                ]),
                "strict={strict} allow_missing={allow_missing}"
            );
        }
    }
}

#[test]
fn extra_output_keys_permitted_when_not_strict() {
    let mut host = TestHost::new();
    host.keyed_callback(
        DependencySpec::new()
            .output(Output::new("output-1", "children"))
            .input(Input::new("input1", "value")),
        CallbackOptions::default(),
        |_ctx, inputs, _states| {
            let mut out = CallbackMap::new();
            out.insert(
                "output-1.children",
                inputs.get("input1.value").cloned().unwrap_or(json!(null)),
            );
            out.insert("output-3.children", json!("Another Value"));
            Ok(out)
        },
    );

    let ctx = host.static_context(0);
    let response = host.fire(0, &ctx, vec![json!("typed")]).unwrap();
    assert_eq!(response, CallbackResponse::Single(Update::Value(json!("typed"))));
}

#[test]
fn strict_rejects_extra_output_keys() {
    let mut host = TestHost::new();
    host.keyed_callback(
        DependencySpec::new()
            .output(Output::new("output-1", "children"))
            .input(Input::new("input1", "value")),
        CallbackOptions::new().strict(true),
        |_ctx, _inputs, _states| {
            let mut out = CallbackMap::new();
            out.insert("output-1.children", json!("fine"));
            out.insert("output-3.children", json!("Another Value"));
            Ok(out)
        },
    );

    let err = host
        .fire(0, &host.static_context(0), vec![json!("typed")])
        .unwrap_err();
    match err {
        CallbackError::UnexpectedKeys(keys) => {
            assert_eq!(keys, vec!["output-3.children".to_string()]);
        }
        other => panic!("expected UnexpectedKeys, got {other:?}"),
    }
}

#[test]
fn missing_output_key_is_an_error_when_not_allowed() {
    let options = CallbackOptions::new().allow_missing(false);
    let mut host = TestHost::new();
    host.keyed_callback(
        DependencySpec::new()
            .output(Output::new("output-1", "children"))
            .output(Output::new("output-2", "children"))
            .input(Input::new("input1", "value")),
        options,
        |_ctx, inputs, _states| {
            let mut out = CallbackMap::new();
            out.insert(
                "output-1.children",
                inputs.get("input1.value").cloned().unwrap_or(json!(null)),
            );
            Ok(out)
        },
    );

    let err = host
        .fire(0, &host.static_context(0), vec![json!("typed")])
        .unwrap_err();
    match err {
        CallbackError::MissingKey(key) => assert_eq!(key.to_string(), "output-2.children"),
        other => panic!("expected MissingKey, got {other:?}"),
    }
}

#[test]
fn missing_output_key_becomes_no_update_by_default() {
    let mut host = TestHost::new();
    host.keyed_callback(
        DependencySpec::new()
            .output(Output::new("output-1", "children"))
            .output(Output::new("output-2", "children"))
            .input(Input::new("input1", "value")),
        CallbackOptions::default(),
        |_ctx, inputs, _states| {
            let mut out = CallbackMap::new();
            out.insert(
                "output-1.children",
                inputs.get("input1.value").cloned().unwrap_or(json!(null)),
            );
            Ok(out)
        },
    );

    let response = host
        .fire(0, &host.static_context(0), vec![json!("typed")])
        .unwrap();
    assert_eq!(
        response,
        CallbackResponse::Multi(vec![
            OutputValue::One(Update::Value(json!("typed"))),
            OutputValue::One(Update::NoUpdate),
        ])
    );
}

#[test]
fn prevent_update_leaves_all_outputs_alone() {
    let mut host = TestHost::new();
    host.keyed_callback(
        DependencySpec::new()
            .output(Output::new("output-1", "children"))
            .input(Input::new("input1", "value")),
        CallbackOptions::default(),
        |_ctx, inputs, _states| {
            match inputs.get("input1.value") {
                Some(v) if !v.is_null() => {
                    let mut out = CallbackMap::new();
                    out.insert("output-1.children", v.clone());
                    Ok(out)
                }
                // Nothing typed yet; skip the firing entirely.
                _ => Err(CallbackError::PreventUpdate),
            }
        },
    );

    let ctx = host.static_context(0);
    let err = host.fire(0, &ctx, vec![json!(null)]).unwrap_err();
    assert!(err.is_prevent_update());

    let ok = host.fire(0, &ctx, vec![json!("later")]).unwrap();
    assert_eq!(ok, CallbackResponse::Single(Update::Value(json!("later"))));
}

#[test]
fn prevent_initial_call_is_forwarded_to_the_host() {
    let mut host = TestHost::new();
    host.keyed_callback(
        DependencySpec::new()
            .output(Output::new("out", "children"))
            .input(Input::new("in", "value")),
        CallbackOptions::new().prevent_initial_call(true),
        |_ctx, _inputs, _states| Ok(CallbackMap::new()),
    );
    host.keyed_callback(
        DependencySpec::new()
            .output(Output::new("out2", "children"))
            .input(Input::new("in", "value")),
        CallbackOptions::default(),
        |_ctx, _inputs, _states| Ok(CallbackMap::new()),
    );

    assert_eq!(host.options(0).prevent_initial_call, Some(true));
    assert_eq!(host.options(1).prevent_initial_call, None);
}

#[test]
fn chained_callbacks_compose_through_their_maps() {
    // Two registrations where the first one's output feeds the second one's
    // input, driven by hand the way a dispatcher would.
    let mut host = TestHost::new();
    host.keyed_callback(
        DependencySpec::new()
            .output(Output::new("cities", "options"))
            .input(Input::new("country", "value")),
        CallbackOptions::default(),
        |_ctx, inputs, _states| {
            let mut out = CallbackMap::new();
            let options = match inputs.get("country.value").and_then(|v| v.as_str()) {
                Some("Canada") => json!(["Montreal", "Toronto"]),
                _ => json!([]),
            };
            out.insert("cities.options", options);
            Ok(out)
        },
    );
    host.keyed_callback(
        DependencySpec::new()
            .output(Output::new("cities", "value"))
            .input(Input::new("cities", "options")),
        CallbackOptions::default(),
        |_ctx, inputs, _states| {
            let mut out = CallbackMap::new();
            let first = inputs
                .get("cities.options")
                .and_then(|v| v.as_array())
                .and_then(|a| a.first())
                .cloned()
                .unwrap_or(json!(null));
            out.insert("cities.value", first);
            Ok(out)
        },
    );

    let first = host
        .fire(0, &host.static_context(0), vec![json!("Canada")])
        .unwrap();
    let options = match first {
        CallbackResponse::Single(Update::Value(v)) => v,
        other => panic!("expected a bare value, got {other:?}"),
    };

    let second = host.fire(1, &host.static_context(1), vec![options]).unwrap();
    assert_eq!(
        second,
        CallbackResponse::Single(Update::Value(json!("Montreal")))
    );
}
