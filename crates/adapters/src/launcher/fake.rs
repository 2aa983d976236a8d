// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake helper launcher for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{DoneFn, HelperInfo, HelperLauncher, LauncherError, ObserverSlot};
use async_trait::async_trait;
use parking_lot::Mutex;
use ph_core::{AppId, InstanceId};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Recorded launcher call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LauncherCall {
    Launch {
        app_id: String,
        exec: PathBuf,
        input: PathBuf,
        output: PathBuf,
    },
    Stop {
        app_id: String,
        instance: InstanceId,
    },
}

#[derive(Default)]
struct FakeLauncherState {
    calls: Vec<LauncherCall>,
    next_id: u64,
    without_helper: HashSet<String>,
    output: Option<Vec<u8>>,
    launch_error: Option<String>,
    stop_error: Option<String>,
    install_error: Option<String>,
    remove_error: Option<String>,
    remove_output: bool,
    complete_on_launch: bool,
    complete_on_stop: bool,
    installs: usize,
    removes: usize,
}

/// Fake launcher for testing
///
/// Every app resolves to helper `<base>-helper` with exec `bar` unless
/// marked with [`FakeLauncher::without_helper`]. Instance ids count up from
/// `0`. Helpers only finish when told to, via [`FakeLauncher::complete`] or
/// the `complete_on_*` switches.
#[derive(Clone, Default)]
pub struct FakeLauncher {
    inner: Arc<Mutex<FakeLauncherState>>,
    observer: ObserverSlot,
}

impl FakeLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<LauncherCall> {
        self.inner.lock().calls.clone()
    }

    /// Recorded launches only
    pub fn launches(&self) -> Vec<LauncherCall> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, LauncherCall::Launch { .. }))
            .collect()
    }

    /// Wait until at least `n` calls were recorded, or give up after 5s
    pub async fn wait_for_calls(&self, n: usize) -> Vec<LauncherCall> {
        let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
        loop {
            let calls = self.calls();
            if calls.len() >= n || tokio::time::Instant::now() >= deadline {
                return calls;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }

    /// Apps (by base) that resolve to no helper
    pub fn without_helper(&self, base: &str) {
        self.inner.lock().without_helper.insert(base.to_string());
    }

    /// Contents written to the output file on every launch
    pub fn set_output(&self, output: impl Into<Vec<u8>>) {
        self.inner.lock().output = Some(output.into());
    }

    pub fn set_launch_error(&self, msg: Option<&str>) {
        self.inner.lock().launch_error = msg.map(str::to_string);
    }

    pub fn set_stop_error(&self, msg: Option<&str>) {
        self.inner.lock().stop_error = msg.map(str::to_string);
    }

    pub fn set_install_error(&self, msg: Option<&str>) {
        self.inner.lock().install_error = msg.map(str::to_string);
    }

    pub fn set_remove_error(&self, msg: Option<&str>) {
        self.inner.lock().remove_error = msg.map(str::to_string);
    }

    /// Delete the output file on launch, as a helper that cleans up after
    /// itself would
    pub fn set_remove_output(&self, on: bool) {
        self.inner.lock().remove_output = on;
    }

    /// Finish each helper as soon as it is launched
    pub fn set_complete_on_launch(&self, on: bool) {
        self.inner.lock().complete_on_launch = on;
    }

    /// Finish a helper when it is stopped
    pub fn set_complete_on_stop(&self, on: bool) {
        self.inner.lock().complete_on_stop = on;
    }

    /// Report a helper as finished. Returns whether an observer saw it.
    pub fn complete(&self, instance: &InstanceId) -> bool {
        self.observer.notify(instance.clone())
    }

    pub fn observer_installed(&self) -> bool {
        self.observer.is_installed()
    }

    /// Successful observer installs so far
    pub fn installs(&self) -> usize {
        self.inner.lock().installs
    }

    /// Successful observer removals so far
    pub fn removes(&self) -> usize {
        self.inner.lock().removes
    }
}

#[async_trait]
impl HelperLauncher for FakeLauncher {
    fn helper_info(&self, app: &AppId) -> Option<HelperInfo> {
        let base = app.base();
        if self.inner.lock().without_helper.contains(&base) {
            return None;
        }
        Some(HelperInfo::new(format!("{base}-helper"), "bar"))
    }

    fn install_observer(&self, done: DoneFn) -> Result<(), LauncherError> {
        if let Some(msg) = self.inner.lock().install_error.clone() {
            return Err(LauncherError::ObserverInstall(msg));
        }
        self.observer.install(done)?;
        self.inner.lock().installs += 1;
        Ok(())
    }

    fn remove_observer(&self) -> Result<(), LauncherError> {
        if let Some(msg) = self.inner.lock().remove_error.clone() {
            return Err(LauncherError::ObserverRemove(msg));
        }
        self.observer.remove()?;
        self.inner.lock().removes += 1;
        Ok(())
    }

    async fn launch(
        &self,
        helper: &HelperInfo,
        input: &Path,
        output: &Path,
    ) -> Result<InstanceId, LauncherError> {
        let (instance, canned, remove_output, complete) = {
            let mut inner = self.inner.lock();
            inner.calls.push(LauncherCall::Launch {
                app_id: helper.app_id.clone(),
                exec: helper.exec.clone(),
                input: input.to_path_buf(),
                output: output.to_path_buf(),
            });
            if let Some(msg) = inner.launch_error.clone() {
                return Err(LauncherError::LaunchFailed(msg));
            }
            let instance = InstanceId::new(inner.next_id.to_string());
            inner.next_id += 1;
            (
                instance,
                inner.output.clone(),
                inner.remove_output,
                inner.complete_on_launch,
            )
        };

        if let Some(canned) = canned {
            std::fs::write(output, canned)
                .map_err(|e| LauncherError::LaunchFailed(e.to_string()))?;
        }
        if remove_output {
            std::fs::remove_file(output)
                .map_err(|e| LauncherError::LaunchFailed(e.to_string()))?;
        }
        if complete {
            self.observer.notify(instance.clone());
        }
        Ok(instance)
    }

    async fn stop(&self, helper: &HelperInfo, instance: &InstanceId) -> Result<(), LauncherError> {
        let complete = {
            let mut inner = self.inner.lock();
            inner.calls.push(LauncherCall::Stop {
                app_id: helper.app_id.clone(),
                instance: instance.clone(),
            });
            if let Some(msg) = inner.stop_error.clone() {
                return Err(LauncherError::StopFailed(msg));
            }
            inner.complete_on_stop
        };
        if complete {
            self.observer.notify(instance.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
