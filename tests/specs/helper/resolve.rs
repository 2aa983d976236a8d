//! Helper resolution specs
//!
//! `ph helper` reports which executable would handle an app.

use crate::prelude::*;

#[test]
fn legacy_helper_lives_in_legacy_dir() {
    let sandbox = Sandbox::new();
    let expected = format!(
        "helper: -\nexec: {}\n",
        sandbox.legacy_dir().join("some-app").display()
    );
    sandbox
        .ph()
        .args(&["helper", "_some-app"])
        .passes()
        .stdout_eq(&expected);
}

#[test]
fn click_helper_comes_from_hook_file() {
    let sandbox = Sandbox::new();
    sandbox.click_helper("com.example.test_helper", "exit 0");
    let exec = std::fs::canonicalize(sandbox.hook_dir())
        .unwrap()
        .join("com.example.test_helper.sh");

    sandbox
        .ph()
        .args(&["helper", "com.example.test_test-app_1"])
        .passes()
        .stdout_eq(&format!(
            "helper: com.example.test_helper\nexec: {}\n",
            exec.display()
        ));
}

#[test]
fn click_app_without_helper_fails() {
    let sandbox = Sandbox::new();
    sandbox
        .ph()
        .args(&["helper", "com.example.other_app"])
        .fails()
        .stderr_has("no helper found for com.example.other_app");
}
