use assert_cmd::Command;
use httpmock::MockServer;
use predicates::str::contains;
use std::io::Write;
use tempfile::NamedTempFile;

fn password_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("tmp file");
    file.write_all(contents.as_bytes()).expect("write password");
    file
}

fn cli() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("blogdesk-cli"));
    cmd.env_remove("BLOGDESK_API_URL")
        .env_remove("BLOGDESK_CONFIG_FILE")
        .env_remove("BLOGDESK_PASSWORD")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn analytics_works_end_to_end() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("GET").path("/analysis/analytics");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"total":42}"#);
    });

    let assert = cli()
        .env("BLOGDESK_API_URL", server.base_url())
        .arg("analytics")
        .assert()
        .success();

    let output = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(output.contains("\"total\": 42"));
    mock.assert();
}

#[test]
fn posts_list_pages_filtered_results() {
    let server = MockServer::start();
    let posts: Vec<_> = (1..=8)
        .map(|id| {
            serde_json::json!({
                "id": id,
                "title": format!("Rust tip {id}"),
                "description": "<p>body</p>",
                "category": "Tech",
            })
        })
        .collect();
    server.mock(|when, then| {
        when.method("GET").path("/posts/getAll");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(serde_json::Value::Array(posts));
    });
    server.mock(|when, then| {
        when.method("GET").path("/analysis/analytics");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"total":8}"#);
    });
    server.mock(|when, then| {
        when.method("GET").path("/category/getAll");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"[{"name":"Tech"}]"#);
    });

    let assert = cli()
        .env("BLOGDESK_API_URL", server.base_url())
        .args(["posts", "list", "--search", "RUST", "--page", "2"])
        .assert()
        .success();

    let output = String::from_utf8_lossy(&assert.get_output().stdout);
    let view: serde_json::Value = serde_json::from_str(&output).expect("json output");
    assert_eq!(view["page"], 2);
    assert_eq!(view["page_count"], 2);
    assert_eq!(view["filtered"], 8);
    assert_eq!(view["items"].as_array().map(Vec::len), Some(2));
    assert_eq!(view["items"][0]["id"], 7);
}

#[test]
fn sign_in_reads_password_file() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("POST")
            .path("/auth/log")
            .json_body(serde_json::json!({"username": "ada", "password": "secret"}));
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"ok":true}"#);
    });

    let password = password_file("secret\n");
    cli()
        .env("BLOGDESK_API_URL", server.base_url())
        .args(["auth", "sign-in", "--username", "ada", "--password-file"])
        .arg(password.path())
        .assert()
        .success();
    mock.assert();
}

#[test]
fn failed_delete_surfaces_fixed_message() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("GET").path("/posts/getID/3");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"id":3,"title":"T","description":"D","category":"C"}"#);
    });
    server.mock(|when, then| {
        when.method("DELETE").path("/posts/delpost/3");
        then.status(500);
    });

    cli()
        .env("BLOGDESK_API_URL", server.base_url())
        .args(["posts", "delete", "3"])
        .assert()
        .failure()
        .stderr(contains("Failed to delete the post."));
}

#[test]
fn missing_api_url_fails_fast() {
    cli()
        .arg("analytics")
        .assert()
        .failure()
        .stderr(contains("api.base_url"));
}

#[test]
fn config_file_supplies_api_url() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("GET").path("/category/getAll");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"[{"name":"Tech"},{"name":"Food"}]"#);
    });

    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("tmp config");
    writeln!(file, "[api]\nbase_url = \"{}\"", server.base_url()).expect("write config");

    let assert = cli()
        .arg("--config-file")
        .arg(file.path())
        .args(["categories", "list"])
        .assert()
        .success();

    let output = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(output.contains("\"Food\""));
    mock.assert();
}
