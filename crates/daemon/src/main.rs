// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Log Collector Daemon (lcd)
//!
//! HTTP server that accepts loglevel batches and appends them to
//! per-application log files.
//!
//! Architecture:
//! - HTTP server: axum, validates requests and submits batches
//! - Dispatcher task: routes batches to one worker task per application

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

use std::io::Write;
use std::path::Path;

use lc_daemon::lifecycle::{self, Config, LifecycleError, StartupResult};
use lc_daemon::listener;
use tokio::signal::unix::{signal, SignalKind};
use tracing::{error, info};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Handle info flags before any config/lock acquisition
    if let Some(arg) = std::env::args().nth(1) {
        match arg.as_str() {
            "--version" | "-V" | "-v" => {
                println!("lcd {VERSION}");
                return Ok(());
            }
            "--help" | "-h" | "help" => {
                println!("lcd {VERSION}");
                println!("Log Collector Daemon - accepts loglevel batches over HTTP and writes per-application log files");
                println!();
                println!("USAGE:");
                println!("    lcd");
                println!();
                println!("Configuration is read from the environment:");
                println!("    LC_CONFIG_DIR          per-application config records (default ./config)");
                println!("    LC_LOG_DIR             root of application log directories (default ./logs)");
                println!("    LC_LISTEN_ADDR         listen address (default 0.0.0.0:8080)");
                println!("    LC_DAEMON_LOG          daemon log file (default stdout)");
                println!("    LC_CONFIG_CACHE_SECS   config cache interval (default 60)");
                println!("    LC_FLUSH_SECS          flush interval (default 30)");
                println!("    LC_ROTATE_SECS         log file rotation age (default 86400)");
                println!("    LC_QUEUE_CAPACITY      per-application queue size (default 100)");
                println!("    LC_WORKER_IDLE_SECS    idle worker eviction, 0 disables (default 3600)");
                println!("    RUST_LOG               log filter (default info)");
                println!();
                println!("OPTIONS:");
                println!("    -h, --help       Print help information");
                println!("    -v, --version    Print version information");
                return Ok(());
            }
            _ => {
                eprintln!("error: unexpected argument '{arg}'");
                eprintln!("Usage: lcd [--help | --version]");
                std::process::exit(1);
            }
        }
    }

    let config = Config::load()?;

    // Write startup marker to log (before tracing setup, so it leads the attempt)
    if let Some(path) = &config.daemon_log {
        write_startup_marker(path)?;
    }

    let log_guard = setup_logging(&config)?;

    info!(version = VERSION, "Starting log collector daemon");

    let StartupResult {
        daemon,
        listener: tcp,
    } = match lifecycle::startup(&config).await {
        Ok(r) => r,
        Err(LifecycleError::LockFailed(_)) => {
            let pid = std::fs::read_to_string(&config.lock_path)
                .unwrap_or_default()
                .trim()
                .to_string();
            eprintln!(
                "lcd is already running for log root {}",
                config.log_root.display()
            );
            if !pid.is_empty() {
                eprintln!("  pid: {pid}");
            }
            std::process::exit(1);
        }
        Err(e) => {
            // Write error synchronously (tracing is non-blocking and may not flush in time)
            if let Some(path) = &config.daemon_log {
                write_startup_error(path, &e);
            }
            error!("Failed to start daemon: {}", e);
            drop(log_guard);
            return Err(e.into());
        }
    };

    // Set up signal handlers
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;
    let shutdown = async move {
        tokio::select! {
            _ = sigterm.recv() => info!("Received SIGTERM, shutting down..."),
            _ = sigint.recv() => info!("Received SIGINT, shutting down..."),
        }
    };

    info!("Daemon ready, listening on {}", tcp.local_addr()?);

    // Signal ready for a supervising parent process
    println!("READY");

    if let Err(e) = listener::serve(tcp, daemon.dispatcher.clone(), shutdown).await {
        error!(error = %e, "HTTP server failed");
    }

    // HTTP server has drained; now flush and close every log file
    daemon.shutdown().await;
    info!("Daemon stopped");
    Ok(())
}

/// Startup marker prefix written to the daemon log before anything else.
/// Full format: "--- lcd: starting (pid: 12345) ---"
pub const STARTUP_MARKER_PREFIX: &str = "--- lcd: starting (pid: ";

/// Append the startup marker to the daemon log file
fn write_startup_marker(log_path: &Path) -> Result<(), LifecycleError> {
    if let Some(parent) = log_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)?;
    writeln!(file, "{}{}) ---", STARTUP_MARKER_PREFIX, std::process::id())?;

    Ok(())
}

/// Write startup error synchronously to the daemon log file.
fn write_startup_error(log_path: &Path, error: &LifecycleError) {
    let Ok(mut file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
    else {
        return;
    };
    let _ = writeln!(file, "ERROR Failed to start daemon: {}", error);
}

fn setup_logging(
    config: &Config,
) -> Result<tracing_appender::non_blocking::WorkerGuard, LifecycleError> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let (non_blocking, guard) = match &config.daemon_log {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let file_name = path.file_name().ok_or_else(|| {
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("LC_DAEMON_LOG has no file name: {}", path.display()),
                )
            })?;
            std::fs::create_dir_all(dir)?;
            tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name))
        }
        None => tracing_appender::non_blocking(std::io::stdout()),
    };

    // Set up subscriber with env filter
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(non_blocking))
        .init();

    Ok(guard)
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
