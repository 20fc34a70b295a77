// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon lifecycle management: startup and shutdown.

use std::fs::File;
use std::io::Write;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use fs2::FileExt;
use lc_core::SystemClock;
use lc_engine::{DispatcherConfig, DispatcherHandle};
use lc_storage::DirConfigStore;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::env;

/// Name of the lock/PID file inside the log root
pub const LOCK_FILE_NAME: &str = ".lcd.lock";

/// Daemon configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory of `<appname>.json` config records
    pub config_dir: PathBuf,
    /// Root under which each application's log directory lives
    pub log_root: PathBuf,
    pub listen_addr: SocketAddr,
    /// Daemon's own log file; stdout when `None`
    pub daemon_log: Option<PathBuf>,
    /// Path to lock/PID file
    pub lock_path: PathBuf,
    pub dispatcher: DispatcherConfig,
}

impl Config {
    /// Build a configuration with default engine tunables.
    pub fn new(config_dir: PathBuf, log_root: PathBuf, listen_addr: SocketAddr) -> Self {
        Self {
            lock_path: log_root.join(LOCK_FILE_NAME),
            dispatcher: DispatcherConfig::new(&log_root),
            daemon_log: None,
            config_dir,
            log_root,
            listen_addr,
        }
    }

    /// Load configuration from the environment.
    pub fn load() -> Result<Self, LifecycleError> {
        let mut config = Self::new(env::config_dir(), env::log_dir(), env::listen_addr()?);
        config.daemon_log = env::daemon_log();

        let worker = &mut config.dispatcher.worker;
        worker.config_cache_interval = env::config_cache_interval();
        worker.flush_interval = env::flush_interval();
        worker.rotate_interval = env::rotate_interval();
        config.dispatcher.queue_capacity = env::queue_capacity();
        config.dispatcher.idle_timeout = env::worker_idle_timeout();

        Ok(config)
    }
}

/// Daemon state during operation.
pub struct DaemonState {
    pub config: Config,
    // NOTE(lifetime): Held to maintain exclusive file lock; released on drop
    #[allow(dead_code)]
    lock_file: File,
    pub dispatcher: DispatcherHandle,
    dispatcher_task: JoinHandle<()>,
}

/// Result of daemon startup: the running state plus the bound listener.
pub struct StartupResult {
    pub daemon: DaemonState,
    /// The TCP listener to serve HTTP on
    pub listener: TcpListener,
}

impl DaemonState {
    /// Stop the dispatcher; returns once every log file is flushed and closed.
    pub async fn shutdown(self) {
        info!("Shutting down dispatcher...");
        self.dispatcher.shutdown().await;
        if let Err(e) = self.dispatcher_task.await {
            error!(error = %e, "dispatcher task failed");
        }
        // Best-effort; the lock itself is released when the file drops
        let _ = std::fs::remove_file(&self.config.lock_path);
        info!("Daemon shutdown complete");
    }
}

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Required directory missing or not a directory: {0}")]
    MissingDirectory(PathBuf),

    #[error("Failed to acquire lock: daemon already running?")]
    LockFailed(#[source] std::io::Error),

    #[error("Invalid listen address {0:?}: {1}")]
    BadListenAddr(String, #[source] std::net::AddrParseError),

    #[error("Failed to bind {0}: {1}")]
    BindFailed(SocketAddr, std::io::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Start the daemon: validate directories, take the lock, bind, spawn the
/// dispatcher.
pub async fn startup(config: &Config) -> Result<StartupResult, LifecycleError> {
    // 1. Both directories must already exist; nothing is created at the root
    require_directory(&config.config_dir)?;
    require_directory(&config.log_root)?;

    // 2. Acquire lock file FIRST - two daemons must never share log files.
    // Open without truncating so a running daemon's PID survives a failed attempt.
    let mut lock_file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(&config.lock_path)?;
    lock_file
        .try_lock_exclusive()
        .map_err(LifecycleError::LockFailed)?;
    lock_file.set_len(0)?;
    writeln!(lock_file, "{}", std::process::id())?;

    // 3. Bind (LAST - only after all validation passes)
    let listener = TcpListener::bind(config.listen_addr)
        .await
        .map_err(|e| LifecycleError::BindFailed(config.listen_addr, e))?;

    // 4. Spawn the dispatcher
    let store = Arc::new(DirConfigStore::new(&config.config_dir));
    let (dispatcher, dispatcher_task) =
        lc_engine::spawn(store, SystemClock, config.dispatcher.clone());

    info!(
        config_dir = %config.config_dir.display(),
        log_root = %config.log_root.display(),
        "daemon started"
    );

    Ok(StartupResult {
        daemon: DaemonState {
            config: config.clone(),
            lock_file,
            dispatcher,
            dispatcher_task,
        },
        listener,
    })
}

fn require_directory(path: &Path) -> Result<(), LifecycleError> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(LifecycleError::MissingDirectory(path.to_owned()))
    }
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
