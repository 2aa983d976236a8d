// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Helper launcher backends
//!
//! A launcher knows, for one kind of application, how to find an app's
//! helper, start it with an input and an output file, stop it, and report
//! when it has finished. Completion is reported through an observer
//! callback that the launcher invokes from its own tasks.

mod click;
mod legacy;
mod process;

pub use click::ClickLauncher;
pub use legacy::LegacyLauncher;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeLauncher, LauncherCall};

use async_trait::async_trait;
use parking_lot::Mutex;
use ph_core::{AppId, InstanceId};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Errors from launcher operations
#[derive(Debug, Error)]
pub enum LauncherError {
    #[error("can't install observer: {0}")]
    ObserverInstall(String),
    #[error("can't remove observer: {0}")]
    ObserverRemove(String),
    #[error("can't launch helper: {0}")]
    LaunchFailed(String),
    #[error("can't stop helper: {0}")]
    StopFailed(String),
}

/// Completion callback, invoked with the instance id of a finished helper
pub type DoneFn = Arc<dyn Fn(InstanceId) + Send + Sync>;

/// A resolved helper: the identity to launch it as, and its executable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelperInfo {
    /// Helper app id; empty for legacy helpers
    pub app_id: String,
    pub exec: PathBuf,
}

impl HelperInfo {
    pub fn new(app_id: impl Into<String>, exec: impl Into<PathBuf>) -> Self {
        Self {
            app_id: app_id.into(),
            exec: exec.into(),
        }
    }
}

/// Backend that starts and stops helpers for one kind of application
#[async_trait]
pub trait HelperLauncher: Send + Sync + 'static {
    /// Resolve the helper for an app. `None` means the app has no helper.
    fn helper_info(&self, app: &AppId) -> Option<HelperInfo>;

    /// Register the completion callback. Called once per pool start.
    fn install_observer(&self, done: DoneFn) -> Result<(), LauncherError>;

    /// Drop the completion callback. Called once per pool stop.
    fn remove_observer(&self) -> Result<(), LauncherError>;

    /// Start a helper with its input and output files.
    ///
    /// Returns an id unique among this launcher's running helpers; the
    /// observer is later invoked with the same id.
    async fn launch(
        &self,
        helper: &HelperInfo,
        input: &Path,
        output: &Path,
    ) -> Result<InstanceId, LauncherError>;

    /// Forcefully stop a running helper
    async fn stop(&self, helper: &HelperInfo, instance: &InstanceId) -> Result<(), LauncherError>;
}

/// Holder for an installed observer, shared with the tasks that report
/// completion.
#[derive(Clone, Default)]
pub(crate) struct ObserverSlot {
    inner: Arc<Mutex<Option<DoneFn>>>,
}

impl ObserverSlot {
    pub(crate) fn install(&self, done: DoneFn) -> Result<(), LauncherError> {
        let mut slot = self.inner.lock();
        if slot.is_some() {
            return Err(LauncherError::ObserverInstall(
                "observer already installed".to_string(),
            ));
        }
        *slot = Some(done);
        Ok(())
    }

    pub(crate) fn remove(&self) -> Result<(), LauncherError> {
        match self.inner.lock().take() {
            Some(_) => Ok(()),
            None => Err(LauncherError::ObserverRemove(
                "no observer installed".to_string(),
            )),
        }
    }

    pub(crate) fn is_installed(&self) -> bool {
        self.inner.lock().is_some()
    }

    /// Invoke the observer, if any. Returns whether one was called.
    pub(crate) fn notify(&self, instance: InstanceId) -> bool {
        // Clone out so the callback runs without the lock held
        let done = self.inner.lock().clone();
        match done {
            Some(done) => {
                done(instance);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
