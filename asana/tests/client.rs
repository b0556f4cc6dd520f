#![expect(clippy::unwrap_used)]

use chimera_asana::AsanaClient;
use chimera_asana::AsanaError;
use chimera_asana::NewTask;
use chimera_asana::TASK_OPT_FIELDS;
use pretty_assertions::assert_eq;
use serde_json::Value;
use serde_json::json;
use wiremock::Mock;
use wiremock::MockServer;
use wiremock::ResponseTemplate;
use wiremock::matchers::header;
use wiremock::matchers::method;
use wiremock::matchers::path;
use wiremock::matchers::query_param;

fn data(body: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "data": body }))
}

#[tokio::test]
async fn sends_bearer_token_and_unwraps_envelope() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/me"))
        .and(header("authorization", "Bearer secret-token"))
        .respond_with(data(
            json!({"gid": "42", "name": "Ada", "email": "ada@example.com"}),
        ))
        .expect(1)
        .mount(&server)
        .await;

    let client = AsanaClient::with_base_url("secret-token", &server.uri());
    let me = client.current_user().await.unwrap();

    assert_eq!(me.gid, "42");
    assert_eq!(me.name, "Ada");
    assert_eq!(me.email.as_deref(), Some("ada@example.com"));
}

#[tokio::test]
async fn list_projects_filters_archived() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects"))
        .and(query_param("workspace", "ws-1"))
        .and(query_param("archived", "false"))
        .respond_with(data(json!([
            {"gid": "p1", "name": "Backend"},
            {"gid": "p2", "name": "Frontend"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = AsanaClient::with_base_url("t", &server.uri());
    let projects = client.list_projects("ws-1").await.unwrap();

    assert_eq!(projects.len(), 2);
    assert_eq!(projects[0].name, "Backend");
}

#[tokio::test]
async fn list_tasks_requests_field_projection() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tasks"))
        .and(query_param("workspace", "ws-1"))
        .and(query_param("assignee", "42"))
        .and(query_param("opt_fields", TASK_OPT_FIELDS))
        .respond_with(data(json!([
            {"gid": "t1", "name": "ship it", "completed": false}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = AsanaClient::with_base_url("t", &server.uri());
    let tasks = client
        .list_tasks("ws-1", "42", TASK_OPT_FIELDS)
        .await
        .unwrap();

    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].gid, "t1");
}

#[tokio::test]
async fn create_task_sends_data_envelope_and_omits_absent_fields() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/tasks"))
        .respond_with(data(json!({"gid": "t9", "name": "new", "completed": false})))
        .expect(1)
        .mount(&server)
        .await;

    let client = AsanaClient::with_base_url("t", &server.uri());
    let created = client
        .create_task(&NewTask {
            name: "new".to_string(),
            workspace: "ws-1".to_string(),
            notes: String::new(),
            projects: Some(vec!["p1".to_string()]),
            due_on: None,
        })
        .await
        .unwrap();
    assert_eq!(created.gid, "t9");

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(
        body,
        json!({
            "data": {
                "name": "new",
                "workspace": "ws-1",
                "notes": "",
                "projects": ["p1"]
            }
        })
    );
}

#[tokio::test]
async fn update_task_passes_body_through() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/tasks/t1"))
        .respond_with(data(json!({"gid": "t1", "name": "renamed", "completed": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client = AsanaClient::with_base_url("t", &server.uri());
    let updated = client
        .update_task("t1", &json!({"name": "renamed", "completed": true}))
        .await
        .unwrap();
    assert!(updated.completed);

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["data"]["name"], "renamed");
    assert_eq!(body["data"]["completed"], true);
}

#[tokio::test]
async fn delete_task_succeeds_on_empty_data() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/tasks/t1"))
        .respond_with(data(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = AsanaClient::with_base_url("t", &server.uri());
    client.delete_task("t1").await.unwrap();
}

#[tokio::test]
async fn upstream_rejection_surfaces_first_error_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/me"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"errors": [{"message": "Not Authorized"}]})),
        )
        .mount(&server)
        .await;

    let client = AsanaClient::with_base_url("bad", &server.uri());
    let err = client.current_user().await.unwrap_err();

    assert!(err.is_auth_failure());
    match err {
        AsanaError::Api { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "Not Authorized");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_success_body_is_a_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/workspaces"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = AsanaClient::with_base_url("t", &server.uri());
    let err = client.list_workspaces().await.unwrap_err();
    assert!(matches!(err, AsanaError::Parse(_)));
}
