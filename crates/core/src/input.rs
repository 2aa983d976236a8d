// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Helper job requests and results

use crate::app_id::AppId;
use crate::output::HelperOutput;
use serde::{Deserialize, Serialize};

/// A notification payload addressed to an app, waiting for its helper
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelperInput {
    pub app: AppId,
    pub notification_id: String,
    /// Opaque bytes handed verbatim to the helper
    pub payload: Vec<u8>,
}

impl HelperInput {
    pub fn new(
        app: AppId,
        notification_id: impl Into<String>,
        payload: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            app,
            notification_id: notification_id.into(),
            payload: payload.into(),
        }
    }
}

/// The outcome of one helper job, handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelperResult {
    pub input: HelperInput,
    pub output: HelperOutput,
}

impl HelperResult {
    /// A result for a job whose helper produced nothing usable: the original
    /// payload is delivered as the message, with no presentation.
    pub fn opaque(input: HelperInput) -> Self {
        let output = HelperOutput::opaque(input.payload.clone());
        Self { input, output }
    }
}

#[cfg(test)]
#[path = "input_tests.rs"]
mod tests;
