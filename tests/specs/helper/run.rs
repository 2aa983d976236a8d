//! Helper run specs
//!
//! `ph run` pushes one notification through the helper pool and prints
//! the helper's output, or the untouched payload when the helper fails.

use crate::prelude::*;
use serde_json::json;

#[test]
fn legacy_helper_output_is_printed() {
    let sandbox = Sandbox::new();
    sandbox.legacy_helper(
        "foo",
        r#"printf '{"notification":{"sound":"hello"}}' > "$2""#,
    );

    sandbox
        .ph()
        .args(&["run", "--app", "_foo", "--payload", r#""hello""#])
        .passes()
        .stdout_eq("{\"notification\":{\"sound\":\"hello\"}}\n");
    assert!(sandbox.cache_files().is_empty());
}

#[test]
fn helper_reads_payload_from_input_file() {
    let sandbox = Sandbox::new();
    sandbox.legacy_helper(
        "echo",
        r#"printf '{"message":' > "$2"; cat "$1" >> "$2"; printf '}' >> "$2""#,
    );

    sandbox
        .ph()
        .args(&["run", "--app", "_echo", "--payload", r#"{"k":[1,2]}"#])
        .passes()
        .stdout_json(json!({"message": {"k": [1, 2]}}));
}

#[test]
fn failing_helper_yields_payload_untouched() {
    let sandbox = Sandbox::new();
    sandbox.legacy_helper("broken", "echo oops >&2; exit 3");

    sandbox
        .ph()
        .args(&["run", "--app", "_broken", "--payload", r#"{"a":1}"#])
        .passes()
        .stdout_json(json!({"message": {"a": 1}}));
    assert!(sandbox.cache_files().is_empty());
}

#[test]
fn missing_legacy_helper_yields_payload_untouched() {
    let sandbox = Sandbox::new();
    sandbox
        .ph()
        .args(&["run", "--app", "_nothing", "--payload", r#"{"a":1}"#])
        .passes()
        .stdout_json(json!({"message": {"a": 1}}));
}

#[test]
fn slow_helper_is_stopped() {
    let sandbox = Sandbox::new();
    sandbox.legacy_helper("slow", "exec sleep 30");

    let start = std::time::Instant::now();
    sandbox
        .ph()
        .env("PH_HELPER_TIMEOUT_MS", SPEC_HELPER_TIMEOUT_MS)
        .args(&["run", "--app", "_slow", "--payload", r#""p""#])
        .passes()
        .stdout_json(json!({"message": "p"}));
    assert!(start.elapsed() < std::time::Duration::from_secs(20));
    assert!(sandbox.cache_files().is_empty());
}

#[test]
fn click_helper_runs_with_its_app_id() {
    let sandbox = Sandbox::new();
    sandbox.click_helper(
        "com.example.test_helper",
        r#"printf '{"message":"%s"}' "$APP_ID" > "$2""#,
    );

    sandbox
        .ph()
        .args(&["run", "--app", "com.example.test_test-app", "--payload", "{}"])
        .passes()
        .stdout_json(json!({"message": "com.example.test_helper"}));
}

#[test]
fn click_app_without_helper_yields_payload_untouched() {
    let sandbox = Sandbox::new();
    sandbox
        .ph()
        .args(&["run", "--app", "com.example.other_app", "--payload", "[1]"])
        .passes()
        .stdout_json(json!({"message": [1]}));
}
