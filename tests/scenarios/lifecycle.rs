//! Daemon startup, serving over TCP and graceful shutdown.

use std::net::SocketAddr;

use lc_core::test_support::{read_lines, write_config};
use lc_daemon::{startup, Config, LifecycleError, StartupResult};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::oneshot;

/// Send one HTTP/1.1 request and return the raw response.
async fn raw_post(addr: SocketAddr, path: &str, token: &str, body: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let request = format!(
        "POST {path} HTTP/1.1\r\n\
         Host: localhost\r\n\
         Content-Type: application/json\r\n\
         Authorization: Bearer {token}\r\n\
         Content-Length: {}\r\n\
         Connection: close\r\n\
         \r\n\
         {body}",
        body.len()
    );
    stream.write_all(request.as_bytes()).await.unwrap();
    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();
    response
}

#[tokio::test]
async fn serves_over_tcp_and_flushes_on_shutdown() {
    let config_dir = tempfile::tempdir().unwrap();
    let log_root = tempfile::tempdir().unwrap();
    write_config(config_dir.path(), "demo", r#"{"secret":"abc"}"#);
    let config = Config::new(
        config_dir.path().to_owned(),
        log_root.path().to_owned(),
        "127.0.0.1:0".parse().unwrap(),
    );

    let StartupResult { daemon, listener } = startup(&config).await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let server = tokio::spawn(lc_daemon::serve(
        listener,
        daemon.dispatcher.clone(),
        async move {
            let _ = stop_rx.await;
        },
    ));

    let ok = raw_post(addr, "/loglevel/demo", "abc", r#"{"logs":[{"message":"over tcp"}]}"#).await;
    let denied = raw_post(addr, "/loglevel/demo", "nope", r#"{"logs":[{"message":"x"}]}"#).await;

    assert!(ok.starts_with("HTTP/1.1 200"), "{ok}");
    assert!(ok.ends_with("OK"), "{ok}");
    assert!(denied.starts_with("HTTP/1.1 401"), "{denied}");
    assert!(denied.ends_with("Invalid token"), "{denied}");

    stop_tx.send(()).unwrap();
    server.await.unwrap().unwrap();
    daemon.shutdown().await;

    let lines = read_lines(&log_root.path().join("demo"));
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["message"], "over tcp");
    assert!(!config.lock_path.exists());
}

#[tokio::test]
async fn refuses_to_share_a_log_root() {
    let config_dir = tempfile::tempdir().unwrap();
    let log_root = tempfile::tempdir().unwrap();
    let config = Config::new(
        config_dir.path().to_owned(),
        log_root.path().to_owned(),
        "127.0.0.1:0".parse().unwrap(),
    );
    let first = startup(&config).await.unwrap();

    let second = startup(&config).await;

    assert!(matches!(second, Err(LifecycleError::LockFailed(_))));
    first.daemon.shutdown().await;
}
