// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-application worker state machine.
//!
//! An [`AppWorker`] handles one batch at a time for exactly one application.
//! It owns the cached config, the authentication check and the application's
//! [`LogFile`]. Nothing else touches this state, so no locking is needed.
//!
//! Two independent state machines live here:
//! - config: `Unconfigured <-> Configured`, driven by the refresh gate
//! - file: `Closed -> Open -> Closed`, driven by rotation, errors and close

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use lc_core::{AppName, Clock, LogItem, LogResponse, LoggerConfig};
use lc_storage::{ensure_directory, ConfigStore, LogFile};
use sha2::{Digest, Sha256};
use tracing::{debug, error, info, warn};

use crate::config::WorkerConfig;

/// State and behaviour of one application's logger.
pub struct AppWorker<S, C> {
    app: AppName,
    store: Arc<S>,
    clock: C,
    settings: WorkerConfig,
    /// Last successfully loaded config; kept when a reload fails
    config: Option<LoggerConfig>,
    configured: bool,
    last_config_check: Option<Instant>,
    /// Resolved, existing log directory
    log_dir: Option<PathBuf>,
    log: LogFile,
}

impl<S: ConfigStore, C: Clock> AppWorker<S, C> {
    /// A fresh, unconfigured worker with no open file.
    pub fn new(app: AppName, store: Arc<S>, clock: C, settings: WorkerConfig) -> Self {
        Self::with_log_file(app, store, clock, settings, LogFile::new())
    }

    pub fn with_log_file(
        app: AppName,
        store: Arc<S>,
        clock: C,
        settings: WorkerConfig,
        log: LogFile,
    ) -> Self {
        Self {
            app,
            store,
            clock,
            settings,
            config: None,
            configured: false,
            last_config_check: None,
            log_dir: None,
            log,
        }
    }

    pub fn app(&self) -> &AppName {
        &self.app
    }

    pub fn is_configured(&self) -> bool {
        self.configured
    }

    pub fn config(&self) -> Option<&LoggerConfig> {
        self.config.as_ref()
    }

    pub fn log_dir(&self) -> Option<&Path> {
        self.log_dir.as_deref()
    }

    /// Path of the currently open log file, if any.
    pub fn log_path(&self) -> Option<&Path> {
        self.log.path()
    }

    pub fn needs_flush(&self) -> bool {
        self.log.needs_flush()
    }

    pub fn housekeeping_interval(&self) -> Duration {
        self.settings.housekeeping_interval
    }

    /// Process one batch to completion.
    pub fn handle(&mut self, token: &str, items: Vec<LogItem>) -> LogResponse {
        let now = self.clock.now();
        self.refresh_config(now);

        if !self.configured {
            debug!(app = %self.app, "rejecting batch, logger not configured");
            return LogResponse::not_configured();
        }

        let secret = self.config.as_ref().map(|c| c.secret.as_str()).unwrap_or("");
        if !token_matches(secret, token) {
            warn!(app = %self.app, "invalid token");
            return LogResponse::invalid_token();
        }

        self.housekeeping(now);

        if items.is_empty() {
            return LogResponse::ok();
        }

        if !self.log.is_open() {
            let Some(dir) = self.log_dir.clone() else {
                return LogResponse::not_configured();
            };
            match self.log.open(&dir, self.clock.utc_now(), now) {
                Ok(path) => info!(app = %self.app, path = %path.display(), "created log file"),
                Err(e) => {
                    error!(app = %self.app, error = %e, "could not create log file");
                    return LogResponse::create_failed();
                }
            }
        }

        let count = items.len();
        for (index, mut item) in items.into_iter().enumerate() {
            item.stamp(self.clock.utc_now());
            if let Err(e) = self.log.write_item(&item, self.clock.now()) {
                error!(
                    app = %self.app,
                    error = %e,
                    written = index,
                    batch = count,
                    "could not write log item, abandoning batch"
                );
                self.log.close();
                return LogResponse::write_failed();
            }
        }

        debug!(app = %self.app, items = count, "wrote batch");
        LogResponse::ok()
    }

    /// Flush and rotate without a request.
    pub fn tick(&mut self) {
        let now = self.clock.now();
        self.housekeeping(now);
    }

    /// Close the log file (syncing first).
    pub fn shutdown(&mut self) {
        if self.log.is_open() {
            info!(app = %self.app, "closing log file");
        }
        self.log.close();
    }

    /// Reload the config if it was never loaded or the cache interval has
    /// elapsed since the last check.
    fn refresh_config(&mut self, now: Instant) {
        let due = match self.last_config_check {
            None => true,
            Some(at) => now.saturating_duration_since(at) >= self.settings.config_cache_interval,
        };
        if !due {
            return;
        }
        self.last_config_check = Some(now);

        let config = match self.store.load(&self.app) {
            Ok(config) => config,
            Err(e) => {
                warn!(app = %self.app, error = %e, "logger not configured");
                self.configured = false;
                return;
            }
        };

        // `dir` must name one directory directly under the log root
        let dir = match AppName::parse(config.dir.as_str()) {
            Ok(name) => self.settings.log_root.join(name.as_str()),
            Err(e) => {
                warn!(app = %self.app, dir = %config.dir, error = %e, "rejecting config dir");
                self.configured = false;
                return;
            }
        };
        self.config = Some(config);

        if self.log_dir.as_deref() == Some(dir.as_path()) {
            self.configured = true;
            return;
        }

        self.log.close();
        self.log_dir = None;
        match ensure_directory(&dir) {
            Ok(()) => {
                info!(app = %self.app, dir = %dir.display(), "logger configured");
                self.log_dir = Some(dir);
                self.configured = true;
            }
            Err(e) => {
                warn!(app = %self.app, error = %e, "could not prepare log directory");
                self.configured = false;
            }
        }
    }

    fn housekeeping(&mut self, now: Instant) {
        if self.log.rotate_if_due(now, self.settings.rotate_interval) {
            info!(app = %self.app, "rotated log file");
        }
        if let Err(e) = self.log.flush_if_due(now, self.settings.flush_interval) {
            warn!(app = %self.app, error = %e, "failed to flush log file, reopening on next write");
        }
    }
}

/// Compare a presented token with the configured secret.
///
/// Digests are compared so the time taken does not depend on how much of
/// the token matches. An empty secret matches nothing.
fn token_matches(secret: &str, token: &str) -> bool {
    if secret.is_empty() {
        return false;
    }
    Sha256::digest(secret.as_bytes()) == Sha256::digest(token.as_bytes())
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod tests;
