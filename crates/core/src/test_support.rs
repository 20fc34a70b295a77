// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::{AppName, LogItem};

// ── Factories ───────────────────────────────────────────────────────────────

/// Parse an application name, panicking on invalid input.
#[allow(clippy::expect_used)]
pub fn app(name: &str) -> AppName {
    AppName::parse(name).expect("valid test app name")
}

/// Build a batch of message-only items.
pub fn items(messages: &[&str]) -> Vec<LogItem> {
    messages.iter().map(|m| LogItem::new(*m)).collect()
}

// ── Filesystem fixtures ─────────────────────────────────────────────────────

/// Write `<config_dir>/<app>.json` with the given raw JSON body.
#[allow(clippy::expect_used)]
pub fn write_config(config_dir: &Path, app: &str, json: &str) -> PathBuf {
    let path = config_dir.join(format!("{app}.json"));
    fs::write(&path, json).expect("write test config");
    path
}

/// List the `.log` files in `dir`, sorted by name (oldest first).
pub fn log_files(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut files: Vec<PathBuf> = entries
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "log"))
        .collect();
    files.sort();
    files
}

/// Read every JSON line from every log file in `dir`, oldest file first.
#[allow(clippy::expect_used)]
pub fn read_lines(dir: &Path) -> Vec<serde_json::Value> {
    log_files(dir)
        .iter()
        .flat_map(|path| {
            let content = fs::read_to_string(path).expect("read log file");
            content
                .lines()
                .map(|line| serde_json::from_str(line).expect("log line is JSON"))
                .collect::<Vec<_>>()
        })
        .collect()
}
