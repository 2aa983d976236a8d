//! CLI error handling specs
//!
//! Verify error messages for invalid commands and arguments.

use crate::prelude::*;

#[test]
fn unknown_subcommand_fails() {
    cli().args(&["frobnicate"]).fails().stderr_has("unrecognized");
}

#[test]
fn run_rejects_invalid_app_id() {
    let sandbox = Sandbox::new();
    sandbox
        .ph()
        .args(&["run", "--app", "no-underscore-here"])
        .fails()
        .stderr_has("invalid application id");
}

#[test]
fn helper_rejects_unknown_kind() {
    let sandbox = Sandbox::new();
    sandbox
        .ph()
        .args(&["helper", "_app", "--kind", "bogus"])
        .fails()
        .stderr_has("no launcher for kind bogus");
}

#[test]
fn run_with_missing_payload_file_fails() {
    let sandbox = Sandbox::new();
    sandbox
        .ph()
        .args(&["run", "--app", "_app", "--payload-file", "/no/such/file"])
        .fails()
        .stderr_has("can't read payload file");
}
