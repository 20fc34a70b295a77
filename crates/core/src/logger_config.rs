// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-application logger configuration record.

use serde::{Deserialize, Serialize};

use crate::app_name::AppName;

/// Configuration for one application's logger, stored as
/// `<config_dir>/<appname>.json`.
///
/// Unknown fields are ignored so operators can annotate records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerConfig {
    /// Informational application label.
    #[serde(default)]
    pub app: String,
    /// Destination subdirectory under the log root.
    ///
    /// Must be a single directory name; separators and `.`/`..` are refused
    /// when the config is applied.
    #[serde(default)]
    pub dir: String,
    /// Bearer token that requests must present.
    #[serde(default)]
    pub secret: String,
}

impl LoggerConfig {
    /// Fill in defaults that depend on the application name.
    pub fn with_defaults(mut self, app: &AppName) -> Self {
        if self.dir.is_empty() {
            self.dir = app.as_str().to_string();
        }
        self
    }
}

#[cfg(test)]
#[path = "logger_config_tests.rs"]
mod tests;
