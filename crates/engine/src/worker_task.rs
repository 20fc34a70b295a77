// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Task that owns one [`AppWorker`] and drains its request queue.

use std::time::Instant;

use lc_core::{AppName, Clock};
use lc_storage::ConfigStore;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::request::LogRequest;
use crate::worker::AppWorker;

/// Dispatcher-side handle to a running worker task.
pub(crate) struct WorkerHandle {
    tx: mpsc::Sender<LogRequest>,
    join: JoinHandle<()>,
    /// When the dispatcher last routed a request here
    pub(crate) last_routed: Instant,
}

impl WorkerHandle {
    /// Spawn a task running `worker` with a queue of `capacity` requests.
    pub(crate) fn spawn<S, C>(worker: AppWorker<S, C>, capacity: usize, now: Instant) -> Self
    where
        S: ConfigStore,
        C: Clock,
    {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let join = tokio::spawn(run(worker, rx));
        Self {
            tx,
            join,
            last_routed: now,
        }
    }

    /// Queue a request, waiting for space when the queue is full.
    ///
    /// Hands the request back if the task has gone away.
    pub(crate) async fn send(&self, request: LogRequest) -> Result<(), LogRequest> {
        self.tx.send(request).await.map_err(|e| e.0)
    }

    /// Close the queue and wait for the task to drain it and close its file.
    pub(crate) async fn stop(self) {
        drop(self.tx);
        if let Err(e) = self.join.await {
            tracing::error!(error = %e, "worker task failed");
        }
    }
}

async fn run<S: ConfigStore, C: Clock>(
    mut worker: AppWorker<S, C>,
    mut rx: mpsc::Receiver<LogRequest>,
) {
    let app: AppName = worker.app().clone();
    debug!(%app, "worker started");

    // Created outside the loop so request traffic does not reset it
    let mut housekeeping = tokio::time::interval(worker.housekeeping_interval());
    housekeeping.set_missed_tick_behavior(MissedTickBehavior::Delay);
    housekeeping.tick().await;

    loop {
        tokio::select! {
            request = rx.recv() => {
                let Some(mut request) = request else { break };
                let items = std::mem::take(&mut request.items);
                let response = worker.handle(&request.token, items);
                request.respond(response);
            }
            _ = housekeeping.tick() => worker.tick(),
        }
    }

    worker.shutdown();
    info!(%app, "worker stopped");
}
