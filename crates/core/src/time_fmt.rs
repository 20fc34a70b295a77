// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Timestamp formats written to disk.

use chrono::{DateTime, SecondsFormat, Utc};

/// Format a `servertime` value: RFC3339, UTC, millisecond precision.
///
/// Example: `2026-01-30T08:14:09.123Z`
pub fn format_servertime(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Format the stem of a log file name: UTC, second precision.
///
/// Example: `20260130T081409Z`
pub fn format_file_stamp(at: DateTime<Utc>) -> String {
    at.format("%Y%m%dT%H%M%SZ").to_string()
}

#[cfg(test)]
#[path = "time_fmt_tests.rs"]
mod tests;
