// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Log Collector Daemon library
//!
//! Startup, configuration and the HTTP boundary, shared by the `lcd` binary
//! and integration tests.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod env;
pub mod lifecycle;
pub mod listener;

pub use lifecycle::{startup, Config, DaemonState, LifecycleError, StartupResult};
pub use listener::{router, serve, MAX_BODY_BYTES};
