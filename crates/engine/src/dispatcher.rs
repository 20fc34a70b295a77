// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Routes batches to per-application workers.
//!
//! The dispatcher loop is the only owner of the appname -> worker table.
//! Callers talk to it through a cloneable [`DispatcherHandle`]; each batch
//! carries a oneshot reply slot that the worker fulfils.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use lc_core::{AppName, Clock, LogItem, LogResponse};
use lc_storage::ConfigStore;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::config::DispatcherConfig;
use crate::request::LogRequest;
use crate::worker::AppWorker;
use crate::worker_task::WorkerHandle;

enum Command {
    Submit(LogRequest),
    WorkerCount(oneshot::Sender<usize>),
    Shutdown(oneshot::Sender<()>),
}

/// Cloneable entry point into a running dispatcher.
#[derive(Clone)]
pub struct DispatcherHandle {
    tx: mpsc::UnboundedSender<Command>,
}

impl DispatcherHandle {
    /// Submit a validated batch and wait for the worker's verdict.
    ///
    /// Returns "Logger unavailable" if the dispatcher or worker is gone.
    pub async fn submit(
        &self,
        app: AppName,
        token: impl Into<String>,
        items: Vec<LogItem>,
    ) -> LogResponse {
        let (request, reply) = LogRequest::new(app, token, items);
        if self.tx.send(Command::Submit(request)).is_err() {
            return LogResponse::unavailable();
        }
        reply.await.unwrap_or_else(|_| LogResponse::unavailable())
    }

    /// Number of live workers, or zero once the dispatcher has stopped.
    pub async fn worker_count(&self) -> usize {
        let (tx, rx) = oneshot::channel();
        if self.tx.send(Command::WorkerCount(tx)).is_err() {
            return 0;
        }
        rx.await.unwrap_or(0)
    }

    /// Stop the dispatcher after every worker has drained and closed its file.
    pub async fn shutdown(&self) {
        let (tx, rx) = oneshot::channel();
        if self.tx.send(Command::Shutdown(tx)).is_ok() {
            let _ = rx.await;
        }
    }
}

/// Start a dispatcher task.
pub fn spawn<S, C>(
    store: Arc<S>,
    clock: C,
    config: DispatcherConfig,
) -> (DispatcherHandle, JoinHandle<()>)
where
    S: ConfigStore,
    C: Clock,
{
    let (tx, rx) = mpsc::unbounded_channel();
    let dispatcher = Dispatcher {
        store,
        clock,
        config,
        workers: HashMap::new(),
    };
    let join = tokio::spawn(dispatcher.run(rx));
    (DispatcherHandle { tx }, join)
}

struct Dispatcher<S, C> {
    store: Arc<S>,
    clock: C,
    config: DispatcherConfig,
    workers: HashMap<AppName, WorkerHandle>,
}

impl<S: ConfigStore, C: Clock> Dispatcher<S, C> {
    async fn run(mut self, mut rx: mpsc::UnboundedReceiver<Command>) {
        let mut sweep = tokio::time::interval(self.config.sweep_interval);
        sweep.set_missed_tick_behavior(MissedTickBehavior::Delay);
        sweep.tick().await;

        loop {
            tokio::select! {
                command = rx.recv() => match command {
                    Some(Command::Submit(request)) => self.route(request).await,
                    Some(Command::WorkerCount(reply)) => {
                        let _ = reply.send(self.workers.len());
                    }
                    Some(Command::Shutdown(reply)) => {
                        self.stop_all().await;
                        let _ = reply.send(());
                        break;
                    }
                    None => {
                        self.stop_all().await;
                        break;
                    }
                },
                _ = sweep.tick(), if self.config.idle_timeout.is_some() => {
                    self.evict_idle().await;
                }
            }
        }

        // Anything still queued is dropped; callers see "Logger unavailable"
        rx.close();
        info!("dispatcher stopped");
    }

    async fn route(&mut self, request: LogRequest) {
        let now = self.clock.now();
        let app = request.app.clone();
        debug!(%app, items = request.items.len(), "routing batch");

        let handle = match self.workers.entry(app.clone()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                info!(%app, "starting worker");
                let worker = AppWorker::new(
                    app.clone(),
                    Arc::clone(&self.store),
                    self.clock.clone(),
                    self.config.worker.clone(),
                );
                entry.insert(WorkerHandle::spawn(worker, self.config.queue_capacity, now))
            }
        };
        handle.last_routed = now;

        let sent = handle.send(request).await;
        if let Err(request) = sent {
            warn!(%app, "worker task gone, discarding it");
            if let Some(handle) = self.workers.remove(&app) {
                handle.stop().await;
            }
            request.respond(LogResponse::unavailable());
        }
    }

    async fn evict_idle(&mut self) {
        let Some(timeout) = self.config.idle_timeout else {
            return;
        };
        let now = self.clock.now();
        let idle: Vec<AppName> = self
            .workers
            .iter()
            .filter(|(_, handle)| now.saturating_duration_since(handle.last_routed) >= timeout)
            .map(|(app, _)| app.clone())
            .collect();

        for app in idle {
            if let Some(handle) = self.workers.remove(&app) {
                info!(%app, "evicting idle worker");
                handle.stop().await;
            }
        }
    }

    async fn stop_all(&mut self) {
        if !self.workers.is_empty() {
            info!(workers = self.workers.len(), "stopping workers");
        }
        for (_, handle) in self.workers.drain() {
            handle.stop().await;
        }
    }
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;
