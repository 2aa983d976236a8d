// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced launcher wrapper for consistent observability

use crate::launcher::{DoneFn, HelperInfo, HelperLauncher, LauncherError};
use async_trait::async_trait;
use ph_core::{AppId, InstanceId};
use std::path::Path;
use tracing::Instrument;

/// Wrapper that adds tracing to any HelperLauncher
#[derive(Clone)]
pub struct TracedLauncher<L> {
    kind: &'static str,
    inner: L,
}

impl<L> TracedLauncher<L> {
    /// `kind` names the launcher in every span and log line
    pub fn new(kind: &'static str, inner: L) -> Self {
        Self { kind, inner }
    }

    pub fn inner(&self) -> &L {
        &self.inner
    }
}

#[async_trait]
impl<L: HelperLauncher> HelperLauncher for TracedLauncher<L> {
    fn helper_info(&self, app: &AppId) -> Option<HelperInfo> {
        let result = self.inner.helper_info(app);
        match &result {
            Some(info) => tracing::trace!(
                kind = self.kind,
                %app,
                helper = info.app_id.as_str(),
                exec = %info.exec.display(),
                "resolved helper"
            ),
            None => tracing::debug!(kind = self.kind, %app, "no helper"),
        }
        result
    }

    fn install_observer(&self, done: DoneFn) -> Result<(), LauncherError> {
        let result = self.inner.install_observer(done);
        match &result {
            Ok(()) => tracing::debug!(kind = self.kind, "observer installed"),
            Err(e) => tracing::error!(kind = self.kind, error = %e, "observer install failed"),
        }
        result
    }

    fn remove_observer(&self) -> Result<(), LauncherError> {
        let result = self.inner.remove_observer();
        match &result {
            Ok(()) => tracing::debug!(kind = self.kind, "observer removed"),
            Err(e) => tracing::error!(kind = self.kind, error = %e, "observer remove failed"),
        }
        result
    }

    async fn launch(
        &self,
        helper: &HelperInfo,
        input: &Path,
        output: &Path,
    ) -> Result<InstanceId, LauncherError> {
        let span = tracing::info_span!(
            "helper.launch",
            kind = self.kind,
            helper = helper.app_id.as_str(),
            exec = %helper.exec.display()
        );
        async {
            tracing::debug!(input = %input.display(), output = %output.display(), "starting");
            let start = std::time::Instant::now();
            let result = self.inner.launch(helper, input, output).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(id) => tracing::info!(instance = %id, elapsed_ms, "helper launched"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "launch failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn stop(&self, helper: &HelperInfo, instance: &InstanceId) -> Result<(), LauncherError> {
        let result = self.inner.stop(helper, instance).await;
        tracing::info_span!("helper.stop", kind = self.kind, %instance).in_scope(|| {
            match &result {
                Ok(()) => tracing::info!("stopped"),
                Err(e) => tracing::warn!(error = %e, "stop failed"),
            }
        });
        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
