// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Append-only JSONL log file for one application.
//!
//! A [`LogFile`] owns at most one open file at a time. Files are named by
//! their UTC creation time (`<dir>/20260130T081409Z.log`), each line is one
//! JSON-encoded item, and nothing is ever rewritten.
//!
//! Durability is decoupled from writes: lines go straight to the OS on
//! `write_item`, and `flush_if_due` syncs them to stable storage once the
//! oldest unsynced write is older than the flush interval.
//!
//! Any failed write or sync abandons the handle. The next write opens a
//! fresh file instead of retrying a handle in an unknown state.

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use lc_core::{format_file_stamp, LogItem};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur in log file operations
#[derive(Debug, Error)]
pub enum LogFileError {
    #[error("{0} exists and is not a directory")]
    NotADirectory(PathBuf),
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("no log file is open")]
    NotOpen,
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to sync {path}: {source}")]
    Sync {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Destination for log lines that can be synced to stable storage.
pub trait LogSink: Write + Send {
    fn sync(&mut self) -> io::Result<()>;
}

impl LogSink for File {
    fn sync(&mut self) -> io::Result<()> {
        self.sync_all()
    }
}

/// Opens the sink for a new log file path.
pub type SinkOpener = Arc<dyn Fn(&Path) -> io::Result<Box<dyn LogSink>> + Send + Sync>;

fn open_append(path: &Path) -> io::Result<Box<dyn LogSink>> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(Box::new(file))
}

/// Create `path` (and parents) if absent.
///
/// Fails if `path` exists but is not a directory.
pub fn ensure_directory(path: &Path) -> Result<(), LogFileError> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(LogFileError::NotADirectory(path.to_owned())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(path).map_err(|source| LogFileError::CreateDir {
                path: path.to_owned(),
                source,
            })
        }
        Err(source) => Err(LogFileError::CreateDir {
            path: path.to_owned(),
            source,
        }),
    }
}

/// Build the path of a log file created at `at`.
///
/// Structure: `{dir}/{YYYYMMDDTHHMMSSZ}.log`
pub fn log_file_path(dir: &Path, at: DateTime<Utc>) -> PathBuf {
    dir.join(format!("{}.log", format_file_stamp(at)))
}

struct OpenLog {
    sink: Box<dyn LogSink>,
    path: PathBuf,
    created_at: Instant,
}

/// Lifecycle of the single active log file of one application.
pub struct LogFile {
    open: Option<OpenLog>,
    opener: SinkOpener,
    /// Unsynced data has been written since the last successful sync
    needs_flush: bool,
    /// Time of the first write since the last successful sync
    last_write_at: Option<Instant>,
}

impl LogFile {
    /// A closed log file that opens real files in append mode.
    pub fn new() -> Self {
        Self::with_opener(Arc::new(open_append))
    }

    /// A closed log file that opens sinks through `opener`.
    pub fn with_opener(opener: SinkOpener) -> Self {
        Self {
            open: None,
            opener,
            needs_flush: false,
            last_write_at: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Path of the currently open file.
    pub fn path(&self) -> Option<&Path> {
        self.open.as_ref().map(|o| o.path.as_path())
    }

    /// When the currently open file was created.
    pub fn created_at(&self) -> Option<Instant> {
        self.open.as_ref().map(|o| o.created_at)
    }

    pub fn needs_flush(&self) -> bool {
        self.needs_flush
    }

    /// Open a new file in `dir` named after `utc_now`.
    ///
    /// Any file that is still open is closed first.
    pub fn open(
        &mut self,
        dir: &Path,
        utc_now: DateTime<Utc>,
        now: Instant,
    ) -> Result<&Path, LogFileError> {
        self.close();
        let path = log_file_path(dir, utc_now);
        let sink = (self.opener)(&path).map_err(|source| LogFileError::Open {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), "opened log file");
        let open = self.open.insert(OpenLog {
            sink,
            path,
            created_at: now,
        });
        Ok(&open.path)
    }

    /// Append one item as a single JSON line.
    ///
    /// On a write error the handle is discarded without syncing and the
    /// error is returned; the caller must reopen before writing again.
    pub fn write_item(&mut self, item: &LogItem, now: Instant) -> Result<(), LogFileError> {
        let Some(open) = self.open.as_mut() else {
            return Err(LogFileError::NotOpen);
        };
        let mut line = serde_json::to_vec(item)?;
        line.push(b'\n');
        if let Err(source) = open.sink.write_all(&line).and_then(|()| open.sink.flush()) {
            let path = open.path.clone();
            self.discard();
            return Err(LogFileError::Write { path, source });
        }
        self.needs_flush = true;
        self.last_write_at.get_or_insert(now);
        Ok(())
    }

    /// Sync to stable storage if dirty and the first unsynced write is at
    /// least `interval` old.
    ///
    /// Returns whether a sync happened. A failed sync discards the handle.
    pub fn flush_if_due(&mut self, now: Instant, interval: Duration) -> Result<bool, LogFileError> {
        if !self.needs_flush {
            return Ok(false);
        }
        let due = self
            .last_write_at
            .is_some_and(|at| now.saturating_duration_since(at) >= interval);
        if !due {
            return Ok(false);
        }
        self.sync().map(|()| true)
    }

    /// Close the open file if it is at least `interval` old.
    ///
    /// The file is synced before it is released. Returns whether a file was
    /// closed.
    pub fn rotate_if_due(&mut self, now: Instant, interval: Duration) -> bool {
        let due = self
            .created_at()
            .is_some_and(|at| now.saturating_duration_since(at) >= interval);
        if due {
            if let Some(path) = self.path() {
                debug!(path = %path.display(), "rotating log file");
            }
            self.close();
        }
        due
    }

    /// Sync and release the open file, if any.
    ///
    /// Errors are logged, never returned.
    pub fn close(&mut self) {
        if self.open.is_none() {
            return;
        }
        if let Err(e) = self.sync() {
            warn!(error = %e, "failed to sync log file on close");
        }
        if let Some(open) = self.open.take() {
            debug!(path = %open.path.display(), "closed log file");
        }
    }

    fn sync(&mut self) -> Result<(), LogFileError> {
        let Some(open) = self.open.as_mut() else {
            return Ok(());
        };
        if !self.needs_flush {
            return Ok(());
        }
        match open.sink.sync() {
            Ok(()) => {
                self.needs_flush = false;
                self.last_write_at = None;
                Ok(())
            }
            Err(source) => {
                let path = open.path.clone();
                self.discard();
                Err(LogFileError::Sync { path, source })
            }
        }
    }

    /// Drop the handle without syncing.
    fn discard(&mut self) {
        self.open = None;
        self.needs_flush = false;
        self.last_write_at = None;
    }
}

impl Default for LogFile {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for LogFile {
    fn drop(&mut self) {
        self.close();
    }
}

impl fmt::Debug for LogFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogFile")
            .field("path", &self.path())
            .field("needs_flush", &self.needs_flush)
            .field("last_write_at", &self.last_write_at)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "log_file_tests.rs"]
mod tests;
