//! Ingesting batches through the HTTP boundary.

use crate::prelude::*;

#[tokio::test]
async fn configured_app_accepts_batch() {
    let lc = Collector::start();
    lc.configure("demo", r#"{"app":"Demo","secret":"abc"}"#);

    let reply = lc.log("demo", "abc", &["hello"]).await;

    assert!(reply.is(200, "OK"), "{reply:?}");
    let lines = lc.lines("demo");
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["message"], "hello");
    assert_eq!(lines[0]["level"], "info");
    assert_eq!(lines[0]["servertime"], "2026-01-30T08:14:09.000Z");
    assert_eq!(
        lc.files("demo"),
        vec![lc.app_dir("demo").join("20260130T081409Z.log")]
    );
}

#[tokio::test]
async fn wrong_token_is_rejected_without_writing() {
    let lc = Collector::start();
    lc.configure("demo", r#"{"secret":"abc"}"#);

    let reply = lc.log("demo", "wrong", &["hello"]).await;

    assert!(reply.is(401, "Invalid token"), "{reply:?}");
    assert!(lc.files("demo").is_empty());
}

#[tokio::test]
async fn unknown_app_is_not_found() {
    let lc = Collector::start();

    let reply = lc.log("ghost", "anything", &["boo"]).await;

    assert!(reply.is(404, "Logger not configured"), "{reply:?}");
    assert!(!lc.app_dir("ghost").exists());
}

#[tokio::test]
async fn obstructed_directory_recovers_after_cache_interval() {
    let lc = Collector::start();
    lc.configure("flaky", r#"{"secret":"abc"}"#);
    std::fs::write(lc.app_dir("flaky"), "not a directory").unwrap();

    let first = lc.log("flaky", "abc", &["one"]).await;
    std::fs::remove_file(lc.app_dir("flaky")).unwrap();
    lc.advance(59);
    let cached = lc.log("flaky", "abc", &["two"]).await;
    lc.advance(1);
    let reloaded = lc.log("flaky", "abc", &["three"]).await;

    assert!(first.is(404, "Logger not configured"), "{first:?}");
    assert!(cached.is(404, "Logger not configured"), "{cached:?}");
    assert!(reloaded.is(200, "OK"), "{reloaded:?}");
    let lines = lc.lines("flaky");
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["message"], "three");
}

#[tokio::test]
async fn secret_change_takes_effect_after_cache_interval() {
    let lc = Collector::start();
    lc.configure("demo", r#"{"secret":"old"}"#);
    assert!(lc.log("demo", "old", &["a"]).await.is(200, "OK"));

    lc.configure("demo", r#"{"secret":"new"}"#);
    assert!(lc.log("demo", "new", &["b"]).await.is(401, "Invalid token"));

    lc.advance(60);
    assert!(lc.log("demo", "new", &["c"]).await.is(200, "OK"));
    assert!(lc.log("demo", "old", &["d"]).await.is(401, "Invalid token"));

    let messages: Vec<_> = lc.lines("demo").iter().map(|l| l["message"].clone()).collect();
    assert_eq!(messages, ["a", "c"]);
}

#[tokio::test]
async fn apps_write_to_their_configured_directories() {
    let lc = Collector::start();
    lc.configure("web", r#"{"dir":"frontend","secret":"w"}"#);
    lc.configure("mobile", r#"{"dir":"mobile","secret":"m"}"#);

    assert!(lc.log("web", "w", &["web 1"]).await.is(200, "OK"));
    assert!(lc.log("mobile", "m", &["mobile 1"]).await.is(200, "OK"));
    assert!(lc.log("mobile", "w", &["cross"]).await.is(401, "Invalid token"));

    assert_eq!(lc.lines("frontend").len(), 1);
    assert_eq!(lc.lines("mobile").len(), 1);
    assert!(!lc.app_dir("web").exists());
    assert_eq!(lc.dispatcher.worker_count().await, 2);
}

#[tokio::test]
async fn file_rotates_daily() {
    let lc = Collector::start();
    lc.configure("demo", r#"{"secret":"abc"}"#);

    assert!(lc.log("demo", "abc", &["monday"]).await.is(200, "OK"));
    lc.advance(24 * 60 * 60);
    assert!(lc.log("demo", "abc", &["tuesday"]).await.is(200, "OK"));

    let files = lc.files("demo");
    assert_eq!(files.len(), 2);
    assert!(files[1].ends_with("20260131T081409Z.log"));
    let first = std::fs::read_to_string(&files[0]).unwrap();
    assert!(first.contains("monday") && !first.contains("tuesday"));
}

#[tokio::test]
async fn client_servertime_is_overwritten() {
    let lc = Collector::start();
    lc.configure("demo", r#"{"secret":"abc"}"#);

    let reply = lc
        .post(
            "demo",
            "abc",
            r#"{"logs":[{"message":"x","servertime":"1999-01-01T00:00:00Z","windowid":"w7"}]}"#,
        )
        .await;

    assert!(reply.is(200, "OK"), "{reply:?}");
    let lines = lc.lines("demo");
    assert_eq!(lines[0]["servertime"], "2026-01-30T08:14:09.000Z");
    assert_eq!(lines[0]["windowid"], "w7");
}

#[tokio::test]
async fn malformed_body_never_reaches_a_worker() {
    let lc = Collector::start();
    lc.configure("demo", r#"{"secret":"abc"}"#);

    let reply = lc.post("demo", "abc", r#"{"logs":[{"msg":"typo"}]}"#).await;

    assert!(reply.is(400, "JSON with unknown fields"), "{reply:?}");
    assert_eq!(lc.dispatcher.worker_count().await, 0);
}
