// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pool configuration

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_MAX_RUNNING: usize = 5;
pub const DEFAULT_INPUT_BUFFER: usize = 10;
pub const DEFAULT_MAX_RUNTIME: Duration = Duration::from_secs(5);

/// Tunables for a [`crate::HelperPool`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    /// Global ceiling on concurrently running helpers
    pub max_running: usize,
    /// Capacity of the job input channel
    pub input_buffer: usize,
    /// How long a helper may run before it is forcibly stopped
    pub max_runtime: Duration,
    /// Root under which per-package temp directories are created
    pub cache_root: PathBuf,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_running: DEFAULT_MAX_RUNNING,
            input_buffer: DEFAULT_INPUT_BUFFER,
            max_runtime: DEFAULT_MAX_RUNTIME,
            cache_root: std::env::temp_dir(),
        }
    }
}

impl PoolConfig {
    /// Defaults overridden by `PH_*` environment variables
    pub fn from_env() -> Self {
        Self {
            max_running: crate::env::max_helpers()
                .filter(|n| *n > 0)
                .unwrap_or(DEFAULT_MAX_RUNNING),
            input_buffer: crate::env::input_buffer()
                .filter(|n| *n > 0)
                .unwrap_or(DEFAULT_INPUT_BUFFER),
            max_runtime: crate::env::helper_timeout().unwrap_or(DEFAULT_MAX_RUNTIME),
            cache_root: crate::env::cache_root(),
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
