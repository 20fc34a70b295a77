// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tunables for workers and the dispatcher.

use std::path::PathBuf;
use std::time::Duration;

/// How long a loaded config is trusted before it is re-read
pub const CONFIG_CACHE_INTERVAL: Duration = Duration::from_secs(60);

/// Minimum age of the first unsynced write before the file is synced
pub const FLUSH_INTERVAL: Duration = Duration::from_secs(30);

/// Age at which a log file is closed and a new one started
pub const ROTATE_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

/// How often an idle worker wakes to flush and rotate
pub const HOUSEKEEPING_INTERVAL: Duration = Duration::from_secs(5);

/// Per-worker inbound queue capacity
pub const QUEUE_CAPACITY: usize = 100;

/// Workers not routed a request for this long are evicted
pub const IDLE_TIMEOUT: Duration = Duration::from_secs(60 * 60);

/// How often the dispatcher looks for idle workers
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Settings shared by every application worker.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Root directory; each application's `dir` is resolved under it
    pub log_root: PathBuf,
    pub config_cache_interval: Duration,
    pub flush_interval: Duration,
    pub rotate_interval: Duration,
    pub housekeeping_interval: Duration,
}

impl WorkerConfig {
    pub fn new(log_root: impl Into<PathBuf>) -> Self {
        Self {
            log_root: log_root.into(),
            config_cache_interval: CONFIG_CACHE_INTERVAL,
            flush_interval: FLUSH_INTERVAL,
            rotate_interval: ROTATE_INTERVAL,
            housekeeping_interval: HOUSEKEEPING_INTERVAL,
        }
    }
}

/// Settings for the dispatcher and the workers it spawns.
#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    pub worker: WorkerConfig,
    pub queue_capacity: usize,
    /// `None` keeps every worker for the life of the process
    pub idle_timeout: Option<Duration>,
    pub sweep_interval: Duration,
}

impl DispatcherConfig {
    pub fn new(log_root: impl Into<PathBuf>) -> Self {
        Self {
            worker: WorkerConfig::new(log_root),
            queue_capacity: QUEUE_CAPACITY,
            idle_timeout: Some(IDLE_TIMEOUT),
            sweep_interval: SWEEP_INTERVAL,
        }
    }
}
