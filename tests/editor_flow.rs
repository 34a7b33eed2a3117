use std::sync::Arc;

use blogdesk::api_types::{Category, EntityId, Post};
use blogdesk::application::editor::{EditorHost, EditorSession, EditorStatus};
use blogdesk::application::gateway::Gateway;
use blogdesk::config::ApiSettings;
use blogdesk::infra::http::HttpGateway;
use httpmock::MockServer;
use serde_json::json;

fn gateway(server: &MockServer) -> Arc<dyn Gateway> {
    let base = url::Url::parse(&server.base_url()).expect("base url");
    Arc::new(HttpGateway::new(&ApiSettings::new(base)).expect("gateway"))
}

#[tokio::test]
async fn edits_coalesce_into_one_update() {
    let server = MockServer::start();
    let load = server.mock(|when, then| {
        when.method("GET").path("/category/getcategory/5");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"id":"5","name":"Old"}"#);
    });
    let save = server.mock(|when, then| {
        when.method("PUT")
            .path("/category/updatecategory/5")
            .json_body(json!({"id": "5", "name": "New"}));
        then.status(200)
            .header("content-type", "application/json")
            .body("{}");
    });

    let mut session: EditorSession<Category> =
        EditorSession::new(gateway(&server), EntityId::from("5"));
    session.load().await.expect("load");
    assert_eq!(session.status(), EditorStatus::Ready);

    session.edit_field("name", json!("Newer")).expect("edit");
    session.edit_field("name", json!("New")).expect("edit");
    session.submit().await.expect("submit");

    assert_eq!(session.status(), EditorStatus::Ready);
    assert!(session.saved());
    assert_eq!(session.entity().map(|c| c.name.as_str()), Some("New"));
    load.assert();
    save.assert();
}

#[tokio::test]
async fn rejected_update_keeps_draft_for_retry() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("GET").path("/posts/getID/2");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"id":2,"title":"T","description":"D","category":"C"}"#);
    });
    server.mock(|when, then| {
        when.method("PUT").path("/posts/updatepost/2");
        then.status(500);
    });

    let mut session: EditorSession<Post> =
        EditorSession::new(gateway(&server), EntityId::from(2));
    session.load().await.expect("load");
    session.edit_field("title", json!("Draft")).expect("edit");
    session.submit().await.expect("submit");

    assert_eq!(session.status(), EditorStatus::Error);
    assert_eq!(session.error_message(), Some("Failed to update the post."));
    assert_eq!(session.entity().map(|p| p.title.as_str()), Some("Draft"));
    assert!(!session.saved());
}

#[tokio::test]
async fn deleted_record_is_terminal() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("GET").path("/posts/getID/8");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"id":8,"title":"T","description":"D","category":"C"}"#);
    });
    let delete = server.mock(|when, then| {
        when.method("DELETE").path("/posts/delpost/8");
        then.status(200);
    });

    let mut session: EditorSession<Post> =
        EditorSession::new(gateway(&server), EntityId::from(8));
    session.load().await.expect("load");
    session.delete().await.expect("delete");

    assert_eq!(session.status(), EditorStatus::Deleted);
    assert!(session.entity().is_none());
    assert!(session.edit_field("title", json!("x")).is_err());
    assert!(session.submit().await.is_err());
    delete.assert();
}

#[tokio::test]
async fn host_drops_session_on_blank_identifier() {
    let server = MockServer::start();
    let load = server.mock(|when, then| {
        when.method("GET").path("/posts/getID/1");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"id":1,"title":"T","description":"D","category":"C"}"#);
    });

    let mut host: EditorHost<Post> = EditorHost::new(gateway(&server));
    host.select("1").await;
    assert_eq!(
        host.session().map(EditorSession::status),
        Some(EditorStatus::Ready)
    );

    host.select("  ").await;
    assert!(host.session().is_none());
    load.assert();
}
