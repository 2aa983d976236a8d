// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the engine crate.

use std::path::PathBuf;
use std::time::Duration;

/// Concurrency ceiling override
pub fn max_helpers() -> Option<usize> {
    parse_var("PH_MAX_HELPERS")
}

/// Input channel capacity override
pub fn input_buffer() -> Option<usize> {
    parse_var("PH_INPUT_BUFFER")
}

/// Forced-stop timeout override
pub fn helper_timeout() -> Option<Duration> {
    parse_var::<u64>("PH_HELPER_TIMEOUT_MS").map(Duration::from_millis)
}

/// Root for helper temp files: PH_CACHE_DIR > XDG cache dir > /tmp
pub fn cache_root() -> PathBuf {
    std::env::var("PH_CACHE_DIR")
        .map(PathBuf::from)
        .ok()
        .or_else(dirs::cache_dir)
        .unwrap_or_else(std::env::temp_dir)
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(var = name, value = raw.as_str(), "ignoring unparsable setting");
            None
        }
    }
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
