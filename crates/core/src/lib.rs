// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ph-core: domain types for the push helper pipeline

pub mod app_id;
pub mod id;
pub mod input;
pub mod output;

pub use app_id::{AppId, AppIdError};
pub use id::{HelperKind, HelperUid, InstanceId};
pub use input::{HelperInput, HelperResult};
pub use output::{Card, EmblemCounter, HelperOutput, Notification, Vibration};
