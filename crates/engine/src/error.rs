// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the helper pool

use ph_adapters::LauncherError;
use ph_core::{AppId, HelperKind};
use thiserror::Error;

/// Per-job failures. The pool turns these into opaque results.
#[derive(Debug, Error)]
pub enum HelperError {
    #[error("no launcher for kind {0}")]
    NoLauncherForKind(HelperKind),
    #[error("no helper found for {0}")]
    HelperNotFound(AppId),
    #[error("can't create temp file: {0}")]
    TempFile(#[source] std::io::Error),
    #[error("can't launch helper: {0}")]
    Launch(#[source] LauncherError),
    #[error("can't read output: {0}")]
    OutputRead(#[source] std::io::Error),
    #[error("can't parse output: {0}")]
    OutputParse(#[source] serde_json::Error),
}

/// Pool setup and usage errors, surfaced to the caller
#[derive(Debug, Error)]
pub enum PoolError {
    #[error("failed to install observer for {kind}: {source}")]
    ObserverInstall {
        kind: HelperKind,
        #[source]
        source: LauncherError,
    },
    #[error("failed to remove observer for {kind}: {source}")]
    ObserverRemove {
        kind: HelperKind,
        #[source]
        source: LauncherError,
    },
    #[error("helper pool is not running")]
    NotRunning,
    #[error("helper pool already started")]
    AlreadyStarted,
}
