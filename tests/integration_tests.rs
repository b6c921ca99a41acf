use asl_connection_hooks::app::run;
use httpmock::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

const ASTDB: &str = "\
;Generated node list
2000|WB6NIL|ASL Public Hub|Los Angeles, CA
54321|K1ABC|Home Node|Boston, MA
garbage line without id
12345|W1AW|Club Repeater|Newington, CT
";

struct Fixture {
    _dir: TempDir,
    config: PathBuf,
}

/// Writes astdb.txt plus a config.toml whose `[pushover]` points at `api_url`.
fn fixture(api_url: &str, pushover_enabled: bool, policy: &str) -> Fixture {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("astdb.txt");
    std::fs::write(&db, ASTDB).unwrap();

    let config = dir.path().join("config.toml");
    let content = format!(
        r#"
[nodes]
personal_nodes = [54321]
private_nodes = [1998]
blocked_nodes = [666, 54321666]

[paths]
node_db = "{db}"

[pushover]
enabled = {enabled}
api_token = "test-token"
user_key = "test-user"
api_url = "{api_url}"

[policy]
{policy}

[asterisk]
binary = "true"
"#,
        db = db.display(),
        enabled = pushover_enabled,
        api_url = api_url,
        policy = policy,
    );
    std::fs::write(&config, content).unwrap();

    Fixture { _dir: dir, config }
}

fn argv(fx: &Fixture, status: &str, local: &str, remote: &str) -> Vec<String> {
    vec![
        "asl-connection-hooks".to_string(),
        status.to_string(),
        local.to_string(),
        remote.to_string(),
        "--config".to_string(),
        fx.config.display().to_string(),
    ]
}

#[tokio::test]
async fn test_personal_connect_sends_one_notification() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/1/messages.json")
            .x_www_form_urlencoded_tuple("token", "test-token")
            .x_www_form_urlencoded_tuple("user", "test-user")
            .body_contains("54321")
            .body_contains("connect")
            .body_contains("personal");
        then.status(200)
            .json_body(serde_json::json!({"status": 1, "request": "req-1"}));
    });

    let fx = fixture(&server.url("/1/messages.json"), true, "");
    let code = run(argv(&fx, "1", "12345", "54321")).await;

    assert_eq!(code, 0);
    api_mock.assert_hits(1);
}

#[tokio::test]
async fn test_message_uses_node_database() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/1/messages.json")
            .body_contains("WB6NIL")
            .body_contains("W1AW");
        then.status(200);
    });

    let fx = fixture(&server.url("/1/messages.json"), true, "");
    let code = run(argv(&fx, "0", "12345", "2000")).await;

    assert_eq!(code, 0);
    api_mock.assert_hits(1);
}

#[tokio::test]
async fn test_disabled_notifications_make_no_call() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST);
        then.status(200);
    });

    let fx = fixture(&server.url("/1/messages.json"), false, "");
    let mut remotes = vec!["54321", "2000", "1998"];
    // 封鎖節點會執行 `true` 代替 asterisk
    if cfg!(unix) {
        remotes.push("666");
    }
    for remote in remotes {
        assert_eq!(run(argv(&fx, "1", "12345", remote)).await, 0);
    }

    api_mock.assert_hits(0);
}

#[tokio::test]
async fn test_unset_credential_variables_make_no_call() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST);
        then.status(200);
    });

    std::env::remove_var("ASL_HOOKS_IT_UNSET_TOKEN");
    let fx = fixture(&server.url("/1/messages.json"), true, "");
    let content = std::fs::read_to_string(&fx.config)
        .unwrap()
        .replace("\"test-token\"", "\"${ASL_HOOKS_IT_UNSET_TOKEN}\"");
    std::fs::write(&fx.config, content).unwrap();

    let code = run(argv(&fx, "1", "12345", "54321")).await;

    assert_eq!(code, 0);
    api_mock.assert_hits(0);
}

#[tokio::test]
async fn test_missing_argument_fails_fast() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST);
        then.status(200);
    });

    let fx = fixture(&server.url("/1/messages.json"), true, "");
    let mut args = argv(&fx, "1", "12345", "54321");
    args.remove(3);

    let code = run(args).await;

    assert_ne!(code, 0);
    api_mock.assert_hits(0);
}

#[tokio::test]
async fn test_non_numeric_node_is_usage_error() {
    let code = run(["asl-connection-hooks", "1", "12345", "W1AW"]).await;
    assert_eq!(code, 2);
}

#[tokio::test]
async fn test_invalid_status_is_usage_error() {
    let code = run([
        "asl-connection-hooks",
        "5",
        "12345",
        "54321",
        "--config",
        "/definitely/not/here.toml",
    ])
    .await;
    assert_eq!(code, 2);
}

#[tokio::test]
async fn test_missing_config_exits_non_zero() {
    let code = run([
        "asl-connection-hooks",
        "1",
        "12345",
        "54321",
        "--config",
        "/definitely/not/here.toml",
    ])
    .await;
    assert_eq!(code, 1);
}

#[tokio::test]
async fn test_malformed_config_exits_non_zero() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST);
        then.status(200);
    });

    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "[nodes\nblocked_nodes = [").unwrap();

    let code = run([
        "asl-connection-hooks".to_string(),
        "1".to_string(),
        "12345".to_string(),
        "666".to_string(),
        "--config".to_string(),
        config.display().to_string(),
    ])
    .await;

    assert_eq!(code, 1);
    api_mock.assert_hits(0);
}

#[cfg(unix)]
#[tokio::test]
async fn test_blocked_node_announced() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/1/messages.json")
            .body_contains("666")
            .body_contains("blocked");
        then.status(200);
    });

    let fx = fixture(&server.url("/1/messages.json"), true, "announce_blocked = true");
    let code = run(argv(&fx, "1", "12345", "666")).await;

    assert_eq!(code, 0);
    api_mock.assert_hits(1);
}

#[cfg(unix)]
#[tokio::test]
async fn test_blocked_node_not_announced() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST);
        then.status(200);
    });

    let fx = fixture(&server.url("/1/messages.json"), true, "announce_blocked = false");
    let code = run(argv(&fx, "1", "12345", "666")).await;

    assert_eq!(code, 0);
    api_mock.assert_hits(0);
}

#[tokio::test]
async fn test_pushover_failure_does_not_change_exit_status() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/1/messages.json");
        then.status(500).body("internal error");
    });

    let fx = fixture(&server.url("/1/messages.json"), true, "");
    let code = run(argv(&fx, "1", "12345", "2000")).await;

    assert_eq!(code, 0);
    api_mock.assert_hits(1);
}

#[tokio::test]
async fn test_unreadable_database_still_notifies() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/1/messages.json")
            .body_contains("%28unknown%29");
        then.status(200);
    });

    let fx = fixture(&server.url("/1/messages.json"), true, "");
    let content = std::fs::read_to_string(&fx.config).unwrap();
    let db_line = content
        .lines()
        .find(|l| l.starts_with("node_db"))
        .unwrap()
        .to_string();
    std::fs::write(
        &fx.config,
        content.replace(&db_line, "node_db = \"/definitely/not/astdb.txt\""),
    )
    .unwrap();

    let code = run(argv(&fx, "1", "12345", "2000")).await;

    assert_eq!(code, 0);
    api_mock.assert_hits(1);
}
