// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! lc-core: Core types for the log collector

pub mod app_name;
pub mod clock;
pub mod log_item;
pub mod logger_config;
pub mod response;
pub mod time_fmt;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use app_name::{AppName, AppNameError};
pub use clock::{Clock, FakeClock, SystemClock};
pub use log_item::{LogBatch, LogItem};
pub use logger_config::LoggerConfig;
pub use response::{LogResponse, StatusKind};
pub use time_fmt::{format_file_stamp, format_servertime};
