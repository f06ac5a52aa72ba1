//! Run Polling
//!
//! Follows a running backup run: refreshes its status and logs on fixed
//! intervals and fetches the final file list once the run leaves the running
//! state. Fetch failures are logged and polling continues; the most recent
//! successful response always wins.
//!
//! Polling stops when the run settles, when the update receiver is dropped,
//! or when the future returned by [`RunPoller::watch`] is dropped.

use crate::config::PollConfig;
use crate::error::ApiError;
use crate::run::{BackupRun, BackupRunLog};
use crate::types::{FileRecord, RunId};
use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Backend access needed to follow a run.
#[async_trait]
pub trait RunSource: Send + Sync {
    async fn fetch_run(&self, id: RunId) -> Result<BackupRun, ApiError>;
    async fn fetch_files(&self, id: RunId) -> Result<Vec<FileRecord>, ApiError>;
    async fn fetch_logs(&self, id: RunId) -> Result<Vec<BackupRunLog>, ApiError>;
}

/// Update emitted while following a run.
#[derive(Debug, Clone, PartialEq)]
pub enum PollUpdate {
    Run(BackupRun),
    Logs(Vec<BackupRunLog>),
    Files(Vec<FileRecord>),
}

/// Status and log poller for a single run.
pub struct RunPoller<S> {
    source: S,
    status_interval: Duration,
    log_interval: Duration,
}

impl<S: RunSource> RunPoller<S> {
    pub fn new(source: S, config: &PollConfig) -> Self {
        Self {
            source,
            status_interval: config.status_interval(),
            log_interval: config.log_interval(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Follow `run` until it is no longer running.
    ///
    /// `known_logs` is the number of log lines the caller already shows; a log
    /// update is only sent when the backend returns more than that. Returns the
    /// last run record seen.
    pub async fn watch(
        &self,
        run: BackupRun,
        known_logs: usize,
        updates: mpsc::Sender<PollUpdate>,
    ) -> Result<BackupRun, ApiError> {
        let id = run.id;
        let mut current = run;
        if !current.status.is_active() {
            debug!(run_id = id, status = %current.status, "Run not active, nothing to poll");
            return Ok(current);
        }
        info!(run_id = id, "Polling backup run");

        let mut status_tick = interval(self.status_interval);
        status_tick.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut log_tick = interval(self.log_interval);
        log_tick.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // the first tick of an interval fires immediately
        status_tick.tick().await;
        log_tick.tick().await;

        let mut log_count = known_logs;
        loop {
            tokio::select! {
                _ = status_tick.tick() => {
                    match self.source.fetch_run(id).await {
                        Ok(latest) => {
                            current = latest;
                            if updates.send(PollUpdate::Run(current.clone())).await.is_err() {
                                debug!(run_id = id, "Update receiver dropped, stopping poll");
                                return Ok(current);
                            }
                            if !current.status.is_active() {
                                info!(run_id = id, status = %current.status, "Backup run finished");
                                self.send_final_files(id, &updates).await;
                                return Ok(current);
                            }
                        }
                        Err(e) => warn!(run_id = id, "Error refreshing run status: {}", e),
                    }
                }
                _ = log_tick.tick() => {
                    match self.source.fetch_logs(id).await {
                        Ok(logs) if logs.len() > log_count => {
                            log_count = logs.len();
                            if updates.send(PollUpdate::Logs(logs)).await.is_err() {
                                debug!(run_id = id, "Update receiver dropped, stopping poll");
                                return Ok(current);
                            }
                        }
                        Ok(_) => {}
                        Err(e) => warn!(run_id = id, "Error loading new logs: {}", e),
                    }
                }
            }
        }
    }

    async fn send_final_files(&self, id: RunId, updates: &mpsc::Sender<PollUpdate>) {
        match self.source.fetch_files(id).await {
            Ok(files) => {
                debug!(run_id = id, files = files.len(), "Loaded final file list");
                // receiver may already be gone; nothing left to do either way
                let _ = updates.send(PollUpdate::Files(files)).await;
            }
            Err(e) => warn!(run_id = id, "Error loading final file list: {}", e),
        }
    }
}
