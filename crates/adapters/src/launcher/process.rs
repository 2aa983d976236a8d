// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Child-process supervision shared by the process-backed launchers.
//!
//! Each spawned helper gets a watcher task that owns the `Child`, drains its
//! stdout/stderr, waits for it to exit (or kills it on request), and then
//! reports the instance id through the launcher's observer.

use super::{LauncherError, ObserverSlot};
use parking_lot::Mutex;
use ph_core::InstanceId;
use std::collections::HashMap;
use std::process::{ExitStatus, Stdio};
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};
use tokio::sync::oneshot;

#[derive(Clone, Default)]
pub(crate) struct Supervisor {
    /// Kill switches for running children, keyed by instance id
    children: Arc<Mutex<HashMap<InstanceId, oneshot::Sender<()>>>>,
    pub(crate) observer: ObserverSlot,
}

impl Supervisor {
    /// Spawn `cmd` and start watching it.
    ///
    /// `label` names the launcher in log lines. The instance id is the
    /// child's pid in base 36.
    pub(crate) fn spawn(
        &self,
        label: &'static str,
        mut cmd: Command,
    ) -> Result<InstanceId, LauncherError> {
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = cmd
            .spawn()
            .map_err(|e| LauncherError::LaunchFailed(e.to_string()))?;
        let pid = child
            .id()
            .ok_or_else(|| LauncherError::LaunchFailed("helper exited immediately".to_string()))?;
        let instance = InstanceId::new(base36(pid));

        let (kill_tx, kill_rx) = oneshot::channel();
        self.children.lock().insert(instance.clone(), kill_tx);

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let supervisor = self.clone();
        let id = instance.clone();
        tokio::spawn(async move {
            let out = tokio::spawn(drain(stdout));
            let err = tokio::spawn(drain(stderr));
            let status = wait_or_kill(&mut child, kill_rx).await;
            let out = out.await.unwrap_or_default();
            let err = err.await.unwrap_or_default();
            supervisor.exited(label, id, status, &out, &err);
        });

        Ok(instance)
    }

    /// Kill a running child.
    pub(crate) fn kill(&self, instance: &InstanceId) -> Result<(), LauncherError> {
        let kill_tx = self
            .children
            .lock()
            .remove(instance)
            .ok_or_else(|| LauncherError::StopFailed(format!("no running helper {instance}")))?;
        kill_tx
            .send(())
            .map_err(|_| LauncherError::StopFailed(format!("helper {instance} already exited")))
    }

    fn exited(
        &self,
        label: &str,
        instance: InstanceId,
        status: std::io::Result<ExitStatus>,
        stdout: &[u8],
        stderr: &[u8],
    ) {
        self.children.lock().remove(&instance);
        match status {
            Ok(status) if status.success() => {
                tracing::debug!(launcher = label, %instance, "helper finished");
            }
            Ok(status) => {
                tracing::error!(
                    launcher = label,
                    %instance,
                    %status,
                    stdout = %String::from_utf8_lossy(stdout),
                    stderr = %String::from_utf8_lossy(stderr),
                    "{label} helper failed"
                );
            }
            Err(e) => {
                tracing::error!(launcher = label, %instance, error = %e, "waiting for helper failed");
            }
        }
        if !self.observer.notify(instance.clone()) {
            tracing::debug!(launcher = label, %instance, "no observer for finished helper");
        }
    }
}

async fn wait_or_kill(
    child: &mut Child,
    mut kill_rx: oneshot::Receiver<()>,
) -> std::io::Result<ExitStatus> {
    tokio::select! {
        status = child.wait() => status,
        Ok(()) = &mut kill_rx => {
            child.start_kill()?;
            child.wait().await
        }
    }
}

async fn drain<R: AsyncRead + Unpin>(pipe: Option<R>) -> Vec<u8> {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        let _ = pipe.read_to_end(&mut buf).await;
    }
    buf
}

fn base36(mut n: u32) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;
