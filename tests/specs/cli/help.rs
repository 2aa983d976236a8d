//! CLI help output specs
//!
//! Verify help text displays for all commands.

use crate::prelude::*;

#[test]
fn ph_no_args_shows_usage_and_exits_zero() {
    cli().passes().stdout_has("Usage:");
}

#[test]
fn ph_help_lists_commands() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("run")
        .stdout_has("helper");
}

#[test]
fn ph_run_help_shows_options() {
    cli()
        .args(&["run", "--help"])
        .passes()
        .stdout_has("--app")
        .stdout_has("--payload-file");
}

#[test]
fn ph_helper_help_shows_usage() {
    cli()
        .args(&["helper", "--help"])
        .passes()
        .stdout_has("Usage:");
}

#[test]
fn ph_version_prints_name() {
    cli().args(&["--version"]).passes().stdout_has("ph");
}
