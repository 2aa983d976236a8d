// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The pool's dispatch loop.
//!
//! One task owns the running-set and the backlog. It takes new jobs from the
//! input channel and completion notices from the launcher observers, and is
//! the only writer of both structures. The per-helper bookkeeping map is
//! shared with the forced-stop timers.

use crate::backlog::Backlog;
use crate::config::PoolConfig;
use crate::error::HelperError;
use crate::tempfiles::TempFiles;
use parking_lot::Mutex;
use ph_adapters::{HelperInfo, HelperLauncher};
use ph_core::{HelperInput, HelperKind, HelperOutput, HelperResult, HelperUid};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub(crate) type Launchers = HashMap<HelperKind, Arc<dyn HelperLauncher>>;

/// A job as it travels through the pool
#[derive(Debug)]
pub(crate) struct Job {
    pub kind: HelperKind,
    pub input: HelperInput,
}

/// Bookkeeping for one running helper
struct HelperArgs {
    job: Job,
    info: HelperInfo,
    files: TempFiles,
    timer: Option<JoinHandle<()>>,
    forced_stop: bool,
}

/// A successful launch, before it is tracked
struct Launched {
    uid: HelperUid,
    launcher: Arc<dyn HelperLauncher>,
    info: HelperInfo,
    files: TempFiles,
}

pub(crate) struct Dispatcher {
    launchers: Arc<Launchers>,
    config: PoolConfig,
    args: Arc<Mutex<HashMap<HelperUid, HelperArgs>>>,
    /// Base ids of apps holding a slot
    running: HashSet<String>,
    backlog: Backlog<Job>,
    results: mpsc::Sender<HelperResult>,
}

impl Dispatcher {
    pub(crate) fn new(
        launchers: Arc<Launchers>,
        config: PoolConfig,
        results: mpsc::Sender<HelperResult>,
    ) -> Self {
        Self {
            launchers,
            config,
            args: Arc::new(Mutex::new(HashMap::new())),
            running: HashSet::new(),
            backlog: Backlog::default(),
            results,
        }
    }

    /// Run until the input channel closes
    pub(crate) async fn run(
        mut self,
        mut jobs: mpsc::Receiver<Job>,
        mut done: mpsc::UnboundedReceiver<HelperUid>,
    ) {
        loop {
            tokio::select! {
                job = jobs.recv() => match job {
                    Some(job) => self.handle_job(job).await,
                    None => break,
                },
                Some(uid) = done.recv() => self.handle_done_event(uid).await,
            }
        }
        let pending = self.backlog.shrink();
        if pending > 0 {
            tracing::warn!(pending, "dropping backlogged helper jobs");
        }
        tracing::debug!(
            running = self.running.len(),
            "helper pool dispatcher exiting"
        );
    }

    async fn handle_job(&mut self, job: Job) {
        let base = job.input.app.base();
        let ceiling = self.config.max_running.max(1);
        if self.running.len() >= ceiling || self.running.contains(&base) {
            let size = self.backlog.push(job);
            tracing::debug!("helper input backlog has grown to {size} entries.");
            return;
        }
        if self.try_one(job).await {
            self.running.insert(base);
        }
    }

    async fn handle_done_event(&mut self, uid: HelperUid) {
        let Some(freed) = self.handle_done(&uid).await else {
            return;
        };
        self.running.remove(&freed);
        if self.backlog.is_empty() {
            return;
        }

        let mut from = 0;
        while let Some((idx, job)) = self
            .backlog
            .take_first(from, |job| !self.running.contains(&job.input.app.base()))
        {
            from = idx + 1;
            let base = job.input.app.base();
            if self.try_one(job).await {
                self.running.insert(base);
                break;
            }
        }
        let live = self.backlog.shrink();
        tracing::debug!("helper input backlog has shrunk to {live} entries.");
    }

    /// Launch a job, or emit its opaque result. Returns whether it launched.
    async fn try_one(&mut self, job: Job) -> bool {
        match self.launch(&job).await {
            Ok(launched) => {
                self.track(job, launched);
                true
            }
            Err(e) => {
                tracing::error!(
                    kind = %job.kind,
                    app = %job.input.app,
                    error = %e,
                    "unable to run helper"
                );
                self.emit(HelperResult::opaque(job.input)).await;
                false
            }
        }
    }

    async fn launch(&self, job: &Job) -> Result<Launched, HelperError> {
        let app = &job.input.app;
        let launcher = self
            .launchers
            .get(&job.kind)
            .cloned()
            .ok_or_else(|| HelperError::NoLauncherForKind(job.kind.clone()))?;
        let info = launcher
            .helper_info(app)
            .ok_or_else(|| HelperError::HelperNotFound(app.clone()))?;
        let files = TempFiles::create(&self.config.cache_root, app, &job.input.payload)
            .map_err(HelperError::TempFile)?;

        match launcher.launch(&info, &files.input, &files.output).await {
            Ok(instance) => Ok(Launched {
                uid: HelperUid::new(job.kind.clone(), instance),
                launcher,
                info,
                files,
            }),
            Err(e) => {
                files.remove();
                Err(HelperError::Launch(e))
            }
        }
    }

    /// Record a launched helper and arm its forced-stop timer
    fn track(&self, job: Job, launched: Launched) {
        let Launched {
            uid,
            launcher,
            info,
            files,
        } = launched;
        tracing::debug!(%uid, app = %job.input.app, "helper running");
        self.args.lock().insert(
            uid.clone(),
            HelperArgs {
                job,
                info,
                files,
                timer: None,
                forced_stop: false,
            },
        );

        let timer = tokio::spawn(force_stop_after(
            self.config.max_runtime,
            Arc::clone(&self.args),
            launcher,
            uid.clone(),
        ));
        match self.args.lock().get_mut(&uid) {
            Some(args) => args.timer = Some(timer),
            None => timer.abort(),
        }
    }

    /// Collect a finished helper. Returns the base id of the app it ran for,
    /// or `None` if the uid is unknown.
    async fn handle_done(&mut self, uid: &HelperUid) -> Option<String> {
        let removed = self.args.lock().remove(uid);
        let Some(args) = removed else {
            tracing::debug!(%uid, "completion for unknown helper");
            return None;
        };
        if let Some(timer) = &args.timer {
            timer.abort();
        }

        let HelperArgs {
            job,
            files,
            forced_stop,
            ..
        } = args;
        let base = job.input.app.base();
        let result = if forced_stop {
            HelperResult::opaque(job.input)
        } else {
            match read_output(&files.output) {
                Ok(output) => HelperResult {
                    input: job.input,
                    output,
                },
                Err(e) => {
                    tracing::error!(%uid, app = %job.input.app, error = %e, "bad helper output");
                    HelperResult::opaque(job.input)
                }
            }
        };
        files.remove();
        self.emit(result).await;
        Some(base)
    }

    async fn emit(&self, result: HelperResult) {
        if self.results.send(result).await.is_err() {
            tracing::debug!("helper result dropped, no consumer");
        }
    }
}

fn read_output(path: &Path) -> Result<HelperOutput, HelperError> {
    let data = std::fs::read(path).map_err(HelperError::OutputRead)?;
    HelperOutput::from_slice(&data).map_err(HelperError::OutputParse)
}

async fn force_stop_after(
    max_runtime: std::time::Duration,
    args: Arc<Mutex<HashMap<HelperUid, HelperArgs>>>,
    launcher: Arc<dyn HelperLauncher>,
    uid: HelperUid,
) {
    tokio::time::sleep(max_runtime).await;
    let info = {
        let mut args = args.lock();
        let Some(entry) = args.get_mut(&uid) else {
            return;
        };
        entry.forced_stop = true;
        entry.info.clone()
    };
    tracing::warn!(%uid, timeout_ms = max_runtime.as_millis() as u64, "helper timed out, stopping");
    if let Err(e) = launcher.stop(&info, uid.instance()).await {
        tracing::error!(%uid, error = %e, "unable to forcefully stop helper");
    }
}
