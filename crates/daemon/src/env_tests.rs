// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;

const VARS: &[&str] = &[
    "LC_CONFIG_DIR",
    "LC_LOG_DIR",
    "LC_DAEMON_LOG",
    "LC_LISTEN_ADDR",
    "LC_CONFIG_CACHE_SECS",
    "LC_FLUSH_SECS",
    "LC_ROTATE_SECS",
    "LC_QUEUE_CAPACITY",
    "LC_WORKER_IDLE_SECS",
];

fn clear() {
    for var in VARS {
        std::env::remove_var(var);
    }
}

#[test]
#[serial]
fn defaults_when_unset() {
    clear();

    assert_eq!(config_dir(), PathBuf::from("config"));
    assert_eq!(log_dir(), PathBuf::from("logs"));
    assert_eq!(daemon_log(), None);
    assert_eq!(listen_addr().unwrap(), "0.0.0.0:8080".parse().unwrap());
    assert_eq!(config_cache_interval(), Duration::from_secs(60));
    assert_eq!(flush_interval(), Duration::from_secs(30));
    assert_eq!(rotate_interval(), Duration::from_secs(86400));
    assert_eq!(queue_capacity(), 100);
    assert_eq!(worker_idle_timeout(), Some(Duration::from_secs(3600)));
}

#[test]
#[serial]
fn paths_from_env() {
    clear();
    std::env::set_var("LC_CONFIG_DIR", "/etc/lc");
    std::env::set_var("LC_LOG_DIR", "/var/log/lc");
    std::env::set_var("LC_DAEMON_LOG", "/var/log/lcd.log");

    assert_eq!(config_dir(), PathBuf::from("/etc/lc"));
    assert_eq!(log_dir(), PathBuf::from("/var/log/lc"));
    assert_eq!(daemon_log(), Some(PathBuf::from("/var/log/lcd.log")));
    clear();
}

#[test]
#[serial]
fn empty_path_falls_back_to_default() {
    clear();
    std::env::set_var("LC_LOG_DIR", "");

    assert_eq!(log_dir(), PathBuf::from("logs"));
    clear();
}

#[test]
#[serial]
fn listen_addr_from_env() {
    clear();
    std::env::set_var("LC_LISTEN_ADDR", "127.0.0.1:9000");

    assert_eq!(listen_addr().unwrap(), "127.0.0.1:9000".parse().unwrap());
    clear();
}

#[test]
#[serial]
fn invalid_listen_addr_is_an_error() {
    clear();
    std::env::set_var("LC_LISTEN_ADDR", "localhost");

    let err = listen_addr().unwrap_err();

    assert!(matches!(err, LifecycleError::BadListenAddr(ref raw, _) if raw == "localhost"));
    clear();
}

#[test]
#[serial]
fn intervals_from_env() {
    clear();
    std::env::set_var("LC_CONFIG_CACHE_SECS", "5");
    std::env::set_var("LC_FLUSH_SECS", "1");
    std::env::set_var("LC_ROTATE_SECS", "3600");
    std::env::set_var("LC_QUEUE_CAPACITY", "8");

    assert_eq!(config_cache_interval(), Duration::from_secs(5));
    assert_eq!(flush_interval(), Duration::from_secs(1));
    assert_eq!(rotate_interval(), Duration::from_secs(3600));
    assert_eq!(queue_capacity(), 8);
    clear();
}

#[test]
#[serial]
fn invalid_numbers_fall_back_to_defaults() {
    clear();
    std::env::set_var("LC_FLUSH_SECS", "soon");
    std::env::set_var("LC_QUEUE_CAPACITY", "0");
    std::env::set_var("LC_WORKER_IDLE_SECS", "-1");

    assert_eq!(flush_interval(), Duration::from_secs(30));
    assert_eq!(queue_capacity(), 100);
    assert_eq!(worker_idle_timeout(), Some(Duration::from_secs(3600)));
    clear();
}

#[test]
#[serial]
fn zero_idle_timeout_disables_eviction() {
    clear();
    std::env::set_var("LC_WORKER_IDLE_SECS", "0");
    assert_eq!(worker_idle_timeout(), None);

    std::env::set_var("LC_WORKER_IDLE_SECS", "600");
    assert_eq!(worker_idle_timeout(), Some(Duration::from_secs(600)));
    clear();
}
