// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Helper pool: runs notification helpers with bounded concurrency

mod backlog;
mod config;
mod dispatch;
pub mod env;
mod error;
mod pool;
pub mod tempfiles;

pub use config::{PoolConfig, DEFAULT_INPUT_BUFFER, DEFAULT_MAX_RUNNING, DEFAULT_MAX_RUNTIME};
pub use error::{HelperError, PoolError};
pub use pool::{default_launchers, HelperPool};
pub use tempfiles::TempFiles;
