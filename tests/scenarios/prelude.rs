//! Test harness for end-to-end scenarios.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::Request;
use axum::Router;
use http_body_util::BodyExt;
use lc_core::test_support::{log_files, read_lines, write_config};
use lc_core::FakeClock;
use lc_engine::{DispatcherConfig, DispatcherHandle};
use lc_storage::DirConfigStore;
use tempfile::TempDir;
use tower::ServiceExt;

/// A running collector over temporary directories and a fake clock.
pub struct Collector {
    config_dir: TempDir,
    log_root: TempDir,
    pub clock: FakeClock,
    pub dispatcher: DispatcherHandle,
    router: Router,
}

impl Collector {
    pub fn start() -> Self {
        let config_dir = tempfile::tempdir().unwrap();
        let log_root = tempfile::tempdir().unwrap();
        let clock = FakeClock::new();
        let store = Arc::new(DirConfigStore::new(config_dir.path()));
        let (dispatcher, _join) = lc_engine::spawn(
            store,
            clock.clone(),
            DispatcherConfig::new(log_root.path()),
        );
        let router = lc_daemon::router(dispatcher.clone());
        Self {
            config_dir,
            log_root,
            clock,
            dispatcher,
            router,
        }
    }

    /// Write `<config_dir>/<app>.json`.
    pub fn configure(&self, app: &str, json: &str) -> &Self {
        write_config(self.config_dir.path(), app, json);
        self
    }

    pub fn app_dir(&self, dir: &str) -> PathBuf {
        self.log_root.path().join(dir)
    }

    pub fn advance(&self, secs: u64) {
        self.clock.advance(Duration::from_secs(secs));
    }

    /// POST a JSON body to `/loglevel/<app>` with a bearer token.
    pub async fn post(&self, app: &str, token: &str, body: &str) -> Reply {
        let request = Request::post(format!("/loglevel/{app}"))
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status().as_u16();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        Reply {
            status,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }

    /// POST a batch of plain messages.
    pub async fn log(&self, app: &str, token: &str, messages: &[&str]) -> Reply {
        let logs: Vec<serde_json::Value> = messages
            .iter()
            .map(|m| serde_json::json!({ "message": m, "level": "info" }))
            .collect();
        let body = serde_json::json!({ "logs": logs }).to_string();
        self.post(app, token, &body).await
    }

    pub fn lines(&self, dir: &str) -> Vec<serde_json::Value> {
        read_lines(&self.app_dir(dir))
    }

    pub fn files(&self, dir: &str) -> Vec<PathBuf> {
        log_files(&self.app_dir(dir))
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub body: String,
}

impl Reply {
    pub fn is(&self, status: u16, body: &str) -> bool {
        self.status == status && self.body == body
    }
}
