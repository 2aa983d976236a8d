// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Launcher for click-packaged applications.
//!
//! Helpers are looked up in the helper registry (see [`HelperFinder`]) and run
//! as `exec <input> <output>` with `APP_ID` set to the helper's app id.

use super::process::Supervisor;
use super::{DoneFn, HelperInfo, HelperLauncher, LauncherError};
use crate::finder::HelperFinder;
use async_trait::async_trait;
use ph_core::{AppId, InstanceId};
use std::path::Path;
use std::sync::Arc;
use tokio::process::Command;

#[derive(Clone)]
pub struct ClickLauncher {
    finder: Arc<HelperFinder>,
    supervisor: Supervisor,
}

impl ClickLauncher {
    pub fn new(finder: HelperFinder) -> Self {
        Self {
            finder: Arc::new(finder),
            supervisor: Supervisor::default(),
        }
    }

    /// Launcher using the helper registry under PH_DATA_DIR or the XDG data dir
    pub fn from_env() -> Self {
        Self::new(HelperFinder::from_env())
    }
}

#[async_trait]
impl HelperLauncher for ClickLauncher {
    fn helper_info(&self, app: &AppId) -> Option<HelperInfo> {
        self.finder.helper(app)
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
        cmd.arg(input).arg(output).env("APP_ID", &helper.app_id);
        self.supervisor.spawn("click", cmd)
    }

    async fn stop(&self, _helper: &HelperInfo, instance: &InstanceId) -> Result<(), LauncherError> {
        self.supervisor.kill(instance)
    }
}

#[cfg(test)]
#[path = "click_tests.rs"]
mod tests;
