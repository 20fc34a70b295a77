// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Log batch message passed from the dispatcher to a worker.

use lc_core::{AppName, LogItem, LogResponse};
use tokio::sync::oneshot;

/// One validated batch for one application, not yet authenticated.
///
/// Carries a single-use reply slot that is fulfilled exactly once, by
/// [`LogRequest::respond`]. If the request is dropped unanswered the caller
/// observes a closed channel instead.
#[derive(Debug)]
pub struct LogRequest {
    pub app: AppName,
    pub token: String,
    pub items: Vec<LogItem>,
    reply: oneshot::Sender<LogResponse>,
}

impl LogRequest {
    /// Create a request and the receiver its response will arrive on.
    pub fn new(
        app: AppName,
        token: impl Into<String>,
        items: Vec<LogItem>,
    ) -> (Self, oneshot::Receiver<LogResponse>) {
        let (reply, rx) = oneshot::channel();
        let request = Self {
            app,
            token: token.into(),
            items,
            reply,
        };
        (request, rx)
    }

    /// Deliver the response, consuming the request.
    ///
    /// A caller that stopped waiting is not an error; the response is
    /// discarded.
    pub fn respond(self, response: LogResponse) {
        if self.reply.send(response).is_err() {
            tracing::debug!(app = %self.app, "caller went away before reply");
        }
    }
}
