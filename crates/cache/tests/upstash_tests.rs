use httpmock::Method::POST;
use httpmock::MockServer;
use repomirror_cache::{CacheError, CacheMirror, KvCache, UpstashCache};
use repomirror_core::Repository;
use serde_json::json;
use std::net::TcpListener;
use std::sync::Arc;

const TOKEN: &str = "upstash-test-token";

fn can_bind_localhost() -> bool {
    TcpListener::bind("127.0.0.1:0").is_ok()
}

#[tokio::test]
async fn set_posts_command_array_with_bearer_token() {
    if !can_bind_localhost() {
        eprintln!("Skipping httpmock tests: cannot bind to localhost");
        return;
    }

    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/")
            .header("authorization", format!("Bearer {TOKEN}"))
            .json_body(json!(["SET", "utility", "{\"name\":\"utility\"}"]));
        then.status(200).json_body(json!({"result": "OK"}));
    });

    let cache = UpstashCache::new(&server.base_url(), TOKEN).unwrap();
    cache.set("utility", "{\"name\":\"utility\"}").await.unwrap();
    mock.assert();
}

#[tokio::test]
async fn get_returns_string_or_none() {
    if !can_bind_localhost() {
        eprintln!("Skipping httpmock tests: cannot bind to localhost");
        return;
    }

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).json_body(json!(["GET", "present"]));
        then.status(200).json_body(json!({"result": "value"}));
    });
    server.mock(|when, then| {
        when.method(POST).json_body(json!(["GET", "absent"]));
        then.status(200).json_body(json!({"result": null}));
    });

    let cache = UpstashCache::new(&server.base_url(), TOKEN).unwrap();
    assert_eq!(cache.get("present").await.unwrap().as_deref(), Some("value"));
    assert_eq!(cache.get("absent").await.unwrap(), None);
}

#[tokio::test]
async fn command_error_is_surfaced() {
    if !can_bind_localhost() {
        eprintln!("Skipping httpmock tests: cannot bind to localhost");
        return;
    }

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST);
        then.status(400).json_body(json!({
            "error": "WRONGTYPE Operation against a key holding the wrong kind of value"
        }));
    });

    let cache = UpstashCache::new(&server.base_url(), TOKEN).unwrap();
    let err = cache.hset("k", "f", "v").await.unwrap_err();
    match err {
        CacheError::Command(msg) => assert!(msg.starts_with("WRONGTYPE")),
        other => panic!("expected command error, got {other:?}"),
    }
}

#[tokio::test]
async fn unauthorized_without_error_body_is_status_error() {
    if !can_bind_localhost() {
        eprintln!("Skipping httpmock tests: cannot bind to localhost");
        return;
    }

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST);
        then.status(401).body("Unauthorized");
    });

    let cache = UpstashCache::new(&server.base_url(), "wrong").unwrap();
    let err = cache.get("k").await.unwrap_err();
    assert!(matches!(err, CacheError::Status { status: 401, .. }));
}

#[tokio::test]
async fn mirror_writes_name_index_through_upstash() {
    if !can_bind_localhost() {
        eprintln!("Skipping httpmock tests: cannot bind to localhost");
        return;
    }

    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .json_body(json!(["HSET", "currentRepos", "repos", "[\"a\",\"b\"]"]));
        then.status(200).json_body(json!({"result": 1}));
    });

    let repo = |name: &str| Repository {
        id: Some(1),
        repo_id: 1,
        name: name.to_string(),
        description: None,
        html_url: format!("https://github.com/permalik/{name}"),
        homepage: None,
        tag: None,
        created_at: None,
        updated_at: None,
    };

    let cache = Arc::new(UpstashCache::new(&server.base_url(), TOKEN).unwrap());
    let mirror = CacheMirror::new(cache, 1);
    mirror
        .write_name_index(&[repo("a"), repo("b")])
        .await
        .unwrap();
    mock.assert();
}

#[tokio::test]
async fn del_sends_every_key_and_returns_count() {
    if !can_bind_localhost() {
        eprintln!("Skipping httpmock tests: cannot bind to localhost");
        return;
    }

    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .header("authorization", format!("Bearer {TOKEN}"))
            .json_body(json!(["DEL", "gone", "also-gone"]));
        then.status(200).json_body(json!({"result": 1}));
    });

    let cache = UpstashCache::new(&server.base_url(), TOKEN).unwrap();
    assert_eq!(cache.del(&["gone", "also-gone"]).await.unwrap(), 1);
    // No keys means no request.
    assert_eq!(cache.del(&[]).await.unwrap(), 0);
    mock.assert_hits(1);
}
