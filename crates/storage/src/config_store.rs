// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-application configuration records.
//!
//! Each application has one JSON record at `<config_dir>/<appname>.json`.
//! The store performs no caching; workers decide how often to reload.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use lc_core::{AppName, LoggerConfig};
use thiserror::Error;

/// Errors that can occur loading a config record
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no config for {app}: {path} does not exist")]
    NotFound { app: String, path: PathBuf },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Source of per-application logger configuration.
pub trait ConfigStore: Send + Sync + 'static {
    /// Load the current record for `app`, with `dir` defaulted.
    fn load(&self, app: &AppName) -> Result<LoggerConfig, ConfigError>;
}

/// Config store reading `<dir>/<appname>.json` files.
#[derive(Debug, Clone)]
pub struct DirConfigStore {
    dir: PathBuf,
}

impl DirConfigStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Build the path of an application's record.
    ///
    /// Structure: `{config_dir}/{appname}.json`
    pub fn record_path(&self, app: &AppName) -> PathBuf {
        self.dir.join(format!("{}.json", app))
    }
}

impl ConfigStore for DirConfigStore {
    fn load(&self, app: &AppName) -> Result<LoggerConfig, ConfigError> {
        let path = self.record_path(app);
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ConfigError::NotFound {
                    app: app.to_string(),
                    path,
                });
            }
            Err(source) => return Err(ConfigError::Io { path, source }),
        };

        let config: LoggerConfig = serde_json::from_reader(BufReader::new(file))
            .map_err(|source| ConfigError::Parse {
                path: path.clone(),
                source,
            })?;
        Ok(config.with_defaults(app))
    }
}

#[cfg(test)]
#[path = "config_store_tests.rs"]
mod tests;
