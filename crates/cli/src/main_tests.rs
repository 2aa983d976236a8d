// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::error::ErrorKind;
use clap::FromArgMatches;
use std::path::PathBuf;

use super::{cli_command, format_error, Cli, Commands};

fn parse(args: &[&str]) -> Cli {
    let matches = cli_command().try_get_matches_from(args).unwrap();
    Cli::from_arg_matches(&matches).unwrap()
}

#[test]
fn version_long() {
    let err = cli_command()
        .try_get_matches_from(["ph", "--version"])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DisplayVersion);
}

#[test]
fn no_subcommand_parses() {
    assert!(parse(&["ph"]).command.is_none());
}

#[test]
fn run_with_inline_payload() {
    let cli = parse(&[
        "ph",
        "run",
        "--app",
        "com.example.test_app_1",
        "--id",
        "n-1",
        "--payload",
        r#"{"a":1}"#,
    ]);
    let Some(Commands::Run(args)) = cli.command else {
        panic!("expected run command");
    };
    assert_eq!(args.app, "com.example.test_app_1");
    assert_eq!(args.id, "n-1");
    assert_eq!(args.payload.as_deref(), Some(r#"{"a":1}"#));
    assert_eq!(args.kind, None);
}

#[test]
fn run_with_payload_file_and_kind() {
    let cli = parse(&[
        "ph",
        "run",
        "--app",
        "_legacy",
        "--kind",
        "legacy",
        "--payload-file",
        "/tmp/p.json",
    ]);
    let Some(Commands::Run(args)) = cli.command else {
        panic!("expected run command");
    };
    assert_eq!(args.kind.as_deref(), Some("legacy"));
    assert_eq!(args.payload_file, Some(PathBuf::from("/tmp/p.json")));
}

#[test]
fn run_payload_sources_conflict() {
    let err = cli_command()
        .try_get_matches_from([
            "ph",
            "run",
            "--app",
            "_x",
            "--payload",
            "a",
            "--payload-file",
            "b",
        ])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
}

#[test]
fn run_requires_app() {
    let err = cli_command()
        .try_get_matches_from(["ph", "run"])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
}

#[test]
fn helper_takes_positional_app() {
    let cli = parse(&["ph", "helper", "com.example.test_app"]);
    let Some(Commands::Helper(args)) = cli.command else {
        panic!("expected helper command");
    };
    assert_eq!(args.app, "com.example.test_app");
}

#[test]
fn format_error_skips_redundant_chain() {
    let inner = std::io::Error::other("disk full");
    let err = anyhow::Error::new(inner).context("write failed: disk full");
    assert_eq!(format_error(&err), "write failed: disk full");
}

#[test]
fn format_error_keeps_new_causes() {
    let inner = std::io::Error::other("disk full");
    let err = anyhow::Error::new(inner).context("write failed");
    assert_eq!(
        format_error(&err),
        "write failed\n\nCaused by:\n    0: disk full"
    );
}
