// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters that find, start and stop helper processes

mod env;
pub mod finder;
pub mod launcher;
pub mod traced;

pub use finder::HelperFinder;
pub use launcher::{
    ClickLauncher, DoneFn, HelperInfo, HelperLauncher, LauncherError, LegacyLauncher,
};
pub use traced::TracedLauncher;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use launcher::{FakeLauncher, LauncherCall};
