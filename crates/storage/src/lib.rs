// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Storage layer for the log collector: config records and log files

mod config_store;
mod log_file;

pub use config_store::{ConfigError, ConfigStore, DirConfigStore};
pub use log_file::{
    ensure_directory, log_file_path, LogFile, LogFileError, LogSink, SinkOpener,
};
