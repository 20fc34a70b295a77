// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the daemon crate.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use lc_engine::config::{
    CONFIG_CACHE_INTERVAL, FLUSH_INTERVAL, IDLE_TIMEOUT, QUEUE_CAPACITY, ROTATE_INTERVAL,
};

use crate::lifecycle::LifecycleError;

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";

/// Per-application config records: LC_CONFIG_DIR > ./config
pub fn config_dir() -> PathBuf {
    path_var("LC_CONFIG_DIR").unwrap_or_else(|| PathBuf::from("config"))
}

/// Root of per-application log directories: LC_LOG_DIR > ./logs
pub fn log_dir() -> PathBuf {
    path_var("LC_LOG_DIR").unwrap_or_else(|| PathBuf::from("logs"))
}

/// Daemon's own log file; stdout when unset
pub fn daemon_log() -> Option<PathBuf> {
    path_var("LC_DAEMON_LOG")
}

/// HTTP listen address: LC_LISTEN_ADDR > 0.0.0.0:8080
pub fn listen_addr() -> Result<SocketAddr, LifecycleError> {
    let raw = std::env::var("LC_LISTEN_ADDR")
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
    raw.parse()
        .map_err(|e| LifecycleError::BadListenAddr(raw, e))
}

pub fn config_cache_interval() -> Duration {
    secs_var("LC_CONFIG_CACHE_SECS").unwrap_or(CONFIG_CACHE_INTERVAL)
}

pub fn flush_interval() -> Duration {
    secs_var("LC_FLUSH_SECS").unwrap_or(FLUSH_INTERVAL)
}

pub fn rotate_interval() -> Duration {
    secs_var("LC_ROTATE_SECS").unwrap_or(ROTATE_INTERVAL)
}

pub fn queue_capacity() -> usize {
    std::env::var("LC_QUEUE_CAPACITY")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .filter(|&n| n > 0)
        .unwrap_or(QUEUE_CAPACITY)
}

/// Idle eviction timeout; `LC_WORKER_IDLE_SECS=0` disables eviction
pub fn worker_idle_timeout() -> Option<Duration> {
    match std::env::var("LC_WORKER_IDLE_SECS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
    {
        Some(0) => None,
        Some(secs) => Some(Duration::from_secs(secs)),
        None => Some(IDLE_TIMEOUT),
    }
}

fn path_var(name: &str) -> Option<PathBuf> {
    std::env::var_os(name)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

fn secs_var(name: &str) -> Option<Duration> {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_secs)
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
