// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod helper;
pub mod run;

use ph_core::{AppId, HelperKind};

/// `--kind` if given, else click for click apps and legacy otherwise
pub fn resolve_kind(kind: Option<&str>, app: &AppId) -> HelperKind {
    match kind {
        Some(kind) => HelperKind::new(kind),
        None if app.is_click() => HelperKind::click(),
        None => HelperKind::legacy(),
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
