//! Full-flow test: REST enumeration through the fetch engine to files on
//! disk, against a mock platform server.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use tempfile::TempDir;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

use emoji_dl::{Config, DiscordEnumerator, DumpStats, EmojiDumper};

const BODY: &[u8] = b"fake image bytes";

/// Mock the platform REST API: identity, 3 guilds with 2, 0, and 5 emojis.
async fn mock_platform(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/users/@me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "42",
            "username": "tester",
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/users/@me/guilds"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "id": "1", "name": "Alpha Team" },
            { "id": "2", "name": "Quiet Corner" },
            { "id": "3", "name": "Gamma Guild" },
        ])))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/guilds/1/emojis"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "id": "100", "name": "smile", "animated": false },
            { "id": "101", "name": "party", "animated": true },
        ])))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/guilds/2/emojis"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/guilds/3/emojis"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "id": "300", "name": "wave", "animated": false },
            { "id": "301", "name": "think", "animated": false },
            { "id": "302", "name": "dance", "animated": true },
            { "id": "303", "name": "sleep", "animated": false },
            { "id": "304", "name": "fire", "animated": false },
        ])))
        .mount(server)
        .await;

    // CDN side of the same mock server
    Mock::given(method("GET"))
        .and(path_regex(r"^/emojis/.*$"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(BODY))
        .mount(server)
        .await;
}

fn enumerator_for(server: &MockServer) -> DiscordEnumerator {
    DiscordEnumerator::new("test-token".to_string())
        .unwrap()
        .with_api_base(server.uri())
        .with_cdn_base(server.uri())
}

async fn run_dump(server: &MockServer, output_dir: &std::path::Path) -> DumpStats {
    let mut config = Config::default();
    config.dump.output_dir = output_dir.to_path_buf();
    let mut enumerator = enumerator_for(server);
    let mut dumper = EmojiDumper::new(config).unwrap();
    dumper.dump(&mut enumerator, false).await.unwrap()
}

async fn cdn_request_count(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|request| request.url.path().starts_with("/emojis/"))
        .count()
}

#[tokio::test]
async fn dump_writes_every_enumerated_emoji_then_skips_on_rerun() {
    let server = MockServer::start().await;
    mock_platform(&server).await;
    let temp = TempDir::new().unwrap();

    let stats = run_dump(&server, temp.path()).await;

    assert_eq!(stats.total_units, 7);
    assert_eq!(stats.guild_count, 3);
    assert_eq!(stats.downloaded, 7);
    assert_eq!(stats.skipped, 0);
    assert_eq!(stats.failed, 0);
    assert_eq!(cdn_request_count(&server).await, 7);

    let mut files: Vec<String> = std::fs::read_dir(temp.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    files.sort();
    assert_eq!(
        files,
        [
            "alpha-team.party.gif",
            "alpha-team.smile.png",
            "gamma-guild.dance.gif",
            "gamma-guild.fire.png",
            "gamma-guild.sleep.png",
            "gamma-guild.think.png",
            "gamma-guild.wave.png",
        ]
    );
    for file in &files {
        assert_eq!(std::fs::read(temp.path().join(file)).unwrap(), BODY);
    }

    // identical rerun: everything on disk already, no CDN traffic
    let stats = run_dump(&server, temp.path()).await;
    assert_eq!(stats.skipped, 7);
    assert_eq!(stats.downloaded, 0);
    assert_eq!(stats.bytes_downloaded, 0);
    assert_eq!(cdn_request_count(&server).await, 7);
}

#[tokio::test]
async fn bad_credentials_fail_before_any_fetch_work() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/@me"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    let temp = TempDir::new().unwrap();

    let mut config = Config::default();
    config.dump.output_dir = temp.path().to_path_buf();
    let mut enumerator = enumerator_for(&server);
    let mut dumper = EmojiDumper::new(config).unwrap();

    let err = dumper.dump(&mut enumerator, false).await.unwrap_err();
    assert!(matches!(err, emoji_dl::Error::Enumeration(_)));
    assert_eq!(
        std::fs::read_dir(temp.path()).unwrap().count(),
        0,
        "a failed enumeration must leave no partial fetch work"
    );
}
