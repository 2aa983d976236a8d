// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Launcher for legacy (non-click) applications.
//!
//! Legacy helpers live in a fixed directory, named after the application,
//! and are run directly as `helper <input> <output>`.

use super::process::Supervisor;
use super::{DoneFn, HelperInfo, HelperLauncher, LauncherError};
use async_trait::async_trait;
use ph_core::{AppId, InstanceId};
use std::path::{Path, PathBuf};
use tokio::process::Command;

#[derive(Clone)]
pub struct LegacyLauncher {
    helper_dir: PathBuf,
    supervisor: Supervisor,
}

impl LegacyLauncher {
    pub fn new(helper_dir: impl Into<PathBuf>) -> Self {
        Self {
            helper_dir: helper_dir.into(),
            supervisor: Supervisor::default(),
        }
    }

    /// Launcher using PH_LEGACY_HELPER_DIR or the system helper directory
    pub fn from_env() -> Self {
        Self::new(crate::env::legacy_helper_dir())
    }
}

#[async_trait]
impl HelperLauncher for LegacyLauncher {
    fn helper_info(&self, app: &AppId) -> Option<HelperInfo> {
        Some(HelperInfo::new("", self.helper_dir.join(app.application())))
    }

    fn install_observer(&self, done: DoneFn) -> Result<(), LauncherError> {
        self.supervisor.observer.install(done)
    }

    fn remove_observer(&self) -> Result<(), LauncherError> {
        self.supervisor.observer.remove()
    }

    async fn launch(
        &self,
        helper: &HelperInfo,
        input: &Path,
        output: &Path,
    ) -> Result<InstanceId, LauncherError> {
        let mut cmd = Command::new(&helper.exec);
        cmd.arg(input).arg(output);
        self.supervisor.spawn("legacy", cmd)
    }

    async fn stop(&self, _helper: &HelperInfo, instance: &InstanceId) -> Result<(), LauncherError> {
        self.supervisor.kill(instance)
    }
}

#[cfg(test)]
#[path = "legacy_tests.rs"]
mod tests;
