// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the adapters crate.

use std::path::PathBuf;

const DEFAULT_LEGACY_HELPER_DIR: &str = "/usr/lib/ubuntu-push-client/legacy-helpers";

/// Directory holding legacy helpers: PH_LEGACY_HELPER_DIR > system default.
pub fn legacy_helper_dir() -> PathBuf {
    std::env::var("PH_LEGACY_HELPER_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_LEGACY_HELPER_DIR))
}

/// Root of the helper registry: PH_DATA_DIR > XDG data dir > ~/.local/share,
/// with `ubuntu-push-client` appended.
pub fn helper_data_root() -> PathBuf {
    let base = std::env::var("PH_DATA_DIR")
        .map(PathBuf::from)
        .ok()
        .or_else(dirs::data_dir)
        .unwrap_or_else(|| PathBuf::from(".local/share"));
    base.join("ubuntu-push-client")
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
