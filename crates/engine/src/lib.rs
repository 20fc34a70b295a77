// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Log collector engine: per-application workers and the dispatcher that
//! routes batches to them.

pub mod config;
mod dispatcher;
mod request;
mod worker;
mod worker_task;

pub use config::{DispatcherConfig, WorkerConfig};
pub use dispatcher::{spawn, DispatcherHandle};
pub use request::LogRequest;
pub use worker::AppWorker;
