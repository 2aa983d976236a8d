// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Kind-partitioned helper pool.
//!
//! Jobs are routed to a launcher by kind. At most `max_running` helpers run
//! at once, and never two for the same app; everything else waits in the
//! backlog. Every job yields exactly one [`HelperResult`].

use crate::config::PoolConfig;
use crate::dispatch::{Dispatcher, Job, Launchers};
use crate::error::PoolError;
use parking_lot::Mutex;
use ph_adapters::{ClickLauncher, HelperLauncher, LegacyLauncher, TracedLauncher};
use ph_core::{HelperInput, HelperKind, HelperResult, HelperUid};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

enum PoolState {
    Idle,
    Running {
        jobs: mpsc::Sender<Job>,
        dispatcher: JoinHandle<()>,
    },
    Stopped,
}

pub struct HelperPool {
    launchers: Arc<Launchers>,
    config: PoolConfig,
    state: Mutex<PoolState>,
}

impl HelperPool {
    pub fn new(
        launchers: HashMap<HelperKind, Arc<dyn HelperLauncher>>,
        config: PoolConfig,
    ) -> Self {
        Self {
            launchers: Arc::new(launchers),
            config,
            state: Mutex::new(PoolState::Idle),
        }
    }

    /// Install the launcher observers and start dispatching.
    ///
    /// Must be called from within a tokio runtime. Results arrive on the
    /// returned channel, which holds at most one undelivered result.
    pub fn start(&self) -> Result<mpsc::Receiver<HelperResult>, PoolError> {
        let mut state = self.state.lock();
        if !matches!(*state, PoolState::Idle) {
            return Err(PoolError::AlreadyStarted);
        }

        let (done_tx, done_rx) = mpsc::unbounded_channel::<HelperUid>();
        let mut installed: Vec<&dyn HelperLauncher> = Vec::new();
        for (kind, launcher) in self.launchers.iter() {
            let done_tx = done_tx.clone();
            let observer_kind = kind.clone();
            let result = launcher.install_observer(Arc::new(move |instance| {
                let _ = done_tx.send(HelperUid::new(observer_kind.clone(), instance));
            }));
            if let Err(source) = result {
                for launcher in installed {
                    let _ = launcher.remove_observer();
                }
                return Err(PoolError::ObserverInstall {
                    kind: kind.clone(),
                    source,
                });
            }
            installed.push(launcher.as_ref());
        }

        let (jobs_tx, jobs_rx) = mpsc::channel(self.config.input_buffer.max(1));
        let (results_tx, results_rx) = mpsc::channel(1);
        let dispatcher =
            Dispatcher::new(Arc::clone(&self.launchers), self.config.clone(), results_tx);
        let dispatcher = tokio::spawn(dispatcher.run(jobs_rx, done_rx));

        tracing::info!(
            kinds = self.launchers.len(),
            max_running = self.config.max_running,
            "helper pool started"
        );
        *state = PoolState::Running {
            jobs: jobs_tx,
            dispatcher,
        };
        Ok(results_rx)
    }

    /// Submit a job. Waits only while the input buffer is full.
    pub async fn run(&self, kind: HelperKind, input: HelperInput) -> Result<(), PoolError> {
        let jobs = match &*self.state.lock() {
            PoolState::Running { jobs, .. } => jobs.clone(),
            _ => return Err(PoolError::NotRunning),
        };
        jobs.send(Job { kind, input })
            .await
            .map_err(|_| PoolError::NotRunning)
    }

    /// Stop accepting jobs, wait for the dispatcher to exit and remove the
    /// observers. Helpers still running are left alone.
    pub async fn stop(&self) -> Result<(), PoolError> {
        let (jobs, dispatcher) = {
            let mut state = self.state.lock();
            match std::mem::replace(&mut *state, PoolState::Stopped) {
                PoolState::Running { jobs, dispatcher } => (jobs, dispatcher),
                other => {
                    *state = other;
                    return Err(PoolError::NotRunning);
                }
            }
        };
        drop(jobs);
        if let Err(e) = dispatcher.await {
            tracing::error!(error = %e, "helper pool dispatcher failed");
        }

        let mut first_error = None;
        for (kind, launcher) in self.launchers.iter() {
            if let Err(source) = launcher.remove_observer() {
                tracing::error!(%kind, error = %source, "failed to remove observer");
                first_error.get_or_insert(PoolError::ObserverRemove {
                    kind: kind.clone(),
                    source,
                });
            }
        }
        tracing::info!("helper pool stopped");
        first_error.map_or(Ok(()), Err)
    }
}

/// The production launchers: `click` and `legacy`, configured from the
/// environment and wrapped with tracing
pub fn default_launchers() -> HashMap<HelperKind, Arc<dyn HelperLauncher>> {
    let mut launchers: HashMap<HelperKind, Arc<dyn HelperLauncher>> = HashMap::new();
    launchers.insert(
        HelperKind::click(),
        Arc::new(TracedLauncher::new("click", ClickLauncher::from_env())),
    );
    launchers.insert(
        HelperKind::legacy(),
        Arc::new(TracedLauncher::new("legacy", LegacyLauncher::from_env())),
    );
    launchers
}

#[cfg(test)]
#[path = "pool_tests.rs"]
mod tests;
