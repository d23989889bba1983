mod common;

use assert_cmd::Command;
use common::{serve_once, split_request};
use predicates::prelude::*;
use std::fs::write;
use tempfile::{tempdir, NamedTempFile};

fn markdown_file(contents: &str) -> NamedTempFile {
    let file = tempfile::Builder::new()
        .suffix(".md")
        .tempfile()
        .expect("Creating temp markdown file failed");
    write(file.path(), contents).expect("Writing temp markdown failed");
    file
}

fn clipper() -> Command {
    let mut cmd = Command::cargo_bin("notion-clipper").expect("Binary exists");
    cmd.env_remove("NOTION_TOKEN").env_remove("NOTION_DATABASE_ID");
    cmd
}

#[test]
fn convert_prints_notion_block_json() {
    let input = markdown_file("# Title\n\n- **one**\n```\nlet x = 1;\n```\n");

    let output = clipper()
        .arg("convert")
        .arg(input.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let blocks: serde_json::Value =
        serde_json::from_slice(&output).expect("convert should print JSON");
    let blocks = blocks.as_array().expect("array of blocks");
    assert_eq!(blocks.len(), 3);
    assert_eq!(blocks[0]["type"], "heading_1");
    assert_eq!(blocks[1]["type"], "bulleted_list_item");
    assert_eq!(
        blocks[1]["bulleted_list_item"]["rich_text"][0]["annotations"]["bold"],
        true
    );
    assert_eq!(blocks[2]["code"]["rich_text"][0]["text"]["content"], "let x = 1;");
}

#[test]
fn convert_fails_for_missing_input() {
    clipper()
        .arg("convert")
        .arg("/definitely/not/here.md")
        .assert()
        .failure();
}

#[test]
fn config_set_show_clear_round_trip() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("store.json");

    clipper()
        .args(["config", "set", "--token", "secret_abcdefgh1234", "--database-id", "db-42"])
        .arg("--store")
        .arg(&store)
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved Notion config"));

    clipper()
        .args(["config", "show", "--store"])
        .arg(&store)
        .assert()
        .success()
        .stdout(
            predicate::str::contains("database_id: db-42")
                .and(predicate::str::contains("1234"))
                .and(predicate::str::contains("secret_abcdefgh").not()),
        );

    clipper()
        .args(["config", "clear", "--store"])
        .arg(&store)
        .assert()
        .success();

    clipper()
        .args(["config", "show", "--store"])
        .arg(&store)
        .assert()
        .success()
        .stdout(predicate::str::contains("No Notion config stored"));
}

#[test]
fn config_uses_store_path_from_settings_file() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("nested").join("store.json");
    let settings = dir.path().join("settings.yaml");
    write(&settings, format!("store_path: \"{}\"\n", store.display())).unwrap();

    clipper()
        .args(["config", "set", "--token", "secret_abcdefgh1234", "--database-id", "db-7"])
        .arg("--settings")
        .arg(&settings)
        .assert()
        .success();

    let stored = std::fs::read_to_string(&store).expect("store written at store_path");
    assert!(stored.contains("db-7"));

    clipper()
        .args(["config", "show", "--settings"])
        .arg(&settings)
        .assert()
        .success()
        .stdout(predicate::str::contains("database_id: db-7"));
}

#[test]
fn save_without_credentials_reports_failure() {
    let dir = tempdir().unwrap();
    let input = markdown_file("# Article\n\nBody text");

    clipper()
        .arg("save")
        .arg(input.path())
        .arg("--store")
        .arg(dir.path().join("store.json"))
        .assert()
        .failure()
        .stdout(
            predicate::str::contains(r#""success":false"#)
                .and(predicate::str::contains("Notion configuration is required")),
        );
}

#[tokio::test(flavor = "multi_thread")]
async fn save_posts_page_to_configured_api() {
    let (base_url, server) = serve_once("200 OK", r#"{"object":"page","id":"page-xyz"}"#).await;

    let settings = NamedTempFile::new().expect("temp settings");
    write(settings.path(), format!("api:\n  base_url: \"{base_url}\"\n")).unwrap();
    let input = markdown_file("# Saved Title\n\nHello _world_");
    let dir = tempdir().unwrap();

    let settings_path = settings.path().to_path_buf();
    let input_path = input.path().to_path_buf();
    let store_path = dir.path().join("store.json");
    let assert = tokio::task::spawn_blocking(move || {
        clipper()
            .arg("save")
            .arg(&input_path)
            .arg("--settings")
            .arg(&settings_path)
            .arg("--store")
            .arg(&store_path)
            .args(["--author", "Jane Doe"])
            .env("NOTION_TOKEN", "env-token")
            .env("NOTION_DATABASE_ID", "env-db")
            .assert()
    })
    .await
    .expect("command task");

    assert
        .success()
        .stdout(predicate::str::contains(r#"{"success":true,"pageId":"page-xyz"}"#));

    let raw = server.await.expect("server task");
    let (head, body) = split_request(&raw);
    assert!(head.contains("authorization: bearer env-token"));
    let body: serde_json::Value = serde_json::from_str(&body).expect("JSON body");
    assert_eq!(body["parent"]["database_id"], "env-db");
    assert_eq!(
        body["properties"]["Title"]["title"][0]["text"]["content"],
        "Saved Title"
    );
    assert_eq!(
        body["properties"]["Author"]["rich_text"][0]["text"]["content"],
        "Jane Doe"
    );
}

use std::sync::{Arc, Mutex};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{layer::Context, Layer, Registry};

/// Custom Layer to collect emitted event messages.
struct EventCollector {
    events: Arc<Mutex<Vec<String>>>,
}

impl<S> Layer<S> for EventCollector
where
    S: tracing::Subscriber,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        use std::fmt::Write as FmtWrite;
        let mut msg = String::new();
        let _ = write!(&mut msg, "{:?}", event);
        self.events.lock().unwrap().push(msg);
    }
}

#[tokio::test]
async fn emits_trace_initialised_event() {
    let events = Arc::new(Mutex::new(Vec::new()));
    let collector = EventCollector {
        events: events.clone(),
    };
    let subscriber = Registry::default().with(collector);
    let _guard = tracing::subscriber::set_default(subscriber);

    use notion_clipper::cli::{run, Cli, Commands};

    // A missing input file still runs far enough to emit the startup event.
    let cli = Cli {
        command: Commands::Convert {
            input: std::path::PathBuf::from("dummy.md"),
            pretty: false,
        },
    };

    let _ = run(cli).await;

    let event_msgs = events.lock().unwrap();
    assert!(
        event_msgs.iter().any(|msg| msg.contains("trace_initialised")),
        "Expected a 'trace_initialised' trace event, got: {:?}",
        event_msgs
    );
}

#[tokio::test]
async fn convert_logs_input_size_in_bytes() {
    let events = Arc::new(Mutex::new(Vec::new()));
    let collector = EventCollector {
        events: events.clone(),
    };
    let subscriber = Registry::default().with(collector);
    let _guard = tracing::subscriber::set_default(subscriber);

    use notion_clipper::cli::{run, Cli, Commands};

    // "é" is two bytes, so the byte count differs from the character count.
    let input = markdown_file("# Café");
    let cli = Cli {
        command: Commands::Convert {
            input: input.path().to_path_buf(),
            pretty: false,
        },
    };
    run(cli).await.expect("convert succeeds");

    let event_msgs = events.lock().unwrap();
    assert!(
        event_msgs.iter().any(|msg| msg.contains("input_bytes: 7")),
        "Expected an input_bytes field, got: {:?}",
        event_msgs
    );
    assert!(event_msgs.iter().all(|msg| !msg.contains("input_chars")));
}
