//! Integration tests for the Tasklink HTTP client

use serde_json::json;
use tasklink_http::client::{ApiClientBuilder, error::ClientError};
use tasklink_http::types::{LoginRequest, SignupRequest, TaskCreate};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn task_body(id: &str, title: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "description": "",
        "completed": false,
        "priority": "low",
        "due_date": null,
        "tags": [],
        "user_id": "u1",
        "created_at": "2026-01-01T00:00:00Z",
        "updated_at": "2026-01-01T00:00:00Z",
    })
}

#[tokio::test]
async fn builder_requires_base_url() {
    let result = ApiClientBuilder::new().build_public();
    assert!(matches!(result, Err(ClientError::Configuration(_))));
}

#[tokio::test]
async fn login_returns_token_and_user() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({
            "email": "x@example.com",
            "password": "hunter2",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "a.b.c",
            "user": {"user_id": "u1", "email": "x@example.com"},
        })))
        .mount(&mock_server)
        .await;

    let client = ApiClientBuilder::new()
        .base_url(mock_server.uri())
        .build_public()
        .unwrap();

    let response = client
        .login(LoginRequest {
            email: "x@example.com".to_string(),
            password: "hunter2".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(response.token, "a.b.c");
    assert_eq!(response.refresh_token, None);
    assert_eq!(response.user.unwrap().user_id, "u1");
}

#[tokio::test]
async fn login_failure_surfaces_the_detail_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"detail": "Invalid credentials"})),
        )
        .mount(&mock_server)
        .await;

    let client = ApiClientBuilder::new()
        .base_url(mock_server.uri())
        .build_public()
        .unwrap();

    let err = client
        .login(LoginRequest {
            email: "x@example.com".to_string(),
            password: "wrong".to_string(),
        })
        .await
        .unwrap_err();

    match err {
        ClientError::BadRequest(message) => assert_eq!(message, "Invalid credentials"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn signup_omits_absent_name() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/signup"))
        .and(body_json(json!({
            "email": "new@example.com",
            "password": "hunter2",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "a.b.c"})))
        .mount(&mock_server)
        .await;

    let client = ApiClientBuilder::new()
        .base_url(mock_server.uri())
        .build_public()
        .unwrap();

    let response = client
        .signup(SignupRequest {
            email: "new@example.com".to_string(),
            password: "hunter2".to_string(),
            name: None,
        })
        .await
        .unwrap();
    assert_eq!(response.token, "a.b.c");
}

#[tokio::test]
async fn authenticated_requests_carry_the_bearer_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tasks"))
        .and(header("authorization", "Bearer a.b.c"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let client = ApiClientBuilder::new()
        .base_url(mock_server.uri())
        .build_authenticated("a.b.c")
        .unwrap();

    let tasks = client.list_tasks().await.unwrap();
    assert!(tasks.is_empty());
}

#[tokio::test]
async fn refresh_uses_the_refresh_token_as_bearer() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .and(header("authorization", "Bearer refresh.r.1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"access_token": "new.a.t"})),
        )
        .mount(&mock_server)
        .await;

    let client = ApiClientBuilder::new()
        .base_url(mock_server.uri())
        .build_public()
        .unwrap();

    let response = client.refresh("refresh.r.1").await.unwrap();
    assert_eq!(response.access_token, "new.a.t");
    assert_eq!(response.refresh_token, None);
}

#[tokio::test]
async fn task_list_envelopes_normalize_identically() {
    for body in [
        json!([task_body("t1", "one"), task_body("t2", "two")]),
        json!({"tasks": [task_body("t1", "one"), task_body("t2", "two")]}),
        json!({"data": {"tasks": [task_body("t1", "one"), task_body("t2", "two")]}}),
        json!({"data": [task_body("t1", "one"), task_body("t2", "two")]}),
    ] {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tasks"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&mock_server)
            .await;

        let client = ApiClientBuilder::new()
            .base_url(mock_server.uri())
            .build_authenticated("a.b.c")
            .unwrap();

        let tasks = client.list_tasks().await.unwrap();
        let ids: Vec<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["t1", "t2"]);
    }
}

#[tokio::test]
async fn create_task_round_trips() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/tasks"))
        .and(body_json(json!({"title": "buy milk"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(task_body("t9", "buy milk")))
        .mount(&mock_server)
        .await;

    let client = ApiClientBuilder::new()
        .base_url(mock_server.uri())
        .build_authenticated("a.b.c")
        .unwrap();

    let task = client
        .create_task(TaskCreate {
            title: "buy milk".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(task.id, "t9");
    assert_eq!(task.title, "buy milk");
}

#[tokio::test]
async fn delete_task_accepts_an_empty_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/tasks/t1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let client = ApiClientBuilder::new()
        .base_url(mock_server.uri())
        .build_authenticated("a.b.c")
        .unwrap();

    client.delete_task("t1").await.unwrap();
}

#[tokio::test]
async fn unauthorized_maps_to_authentication_failed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tasks"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&mock_server)
        .await;

    let client = ApiClientBuilder::new()
        .base_url(mock_server.uri())
        .build_authenticated("stale.b.c")
        .unwrap();

    let err = client.list_tasks().await.unwrap_err();
    assert!(err.is_auth_expired());
    assert!(matches!(err, ClientError::AuthenticationFailed(_)));
}

#[tokio::test]
async fn server_errors_keep_their_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tasks"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&mock_server)
        .await;

    let client = ApiClientBuilder::new()
        .base_url(mock_server.uri())
        .build_authenticated("a.b.c")
        .unwrap();

    let err = client.list_tasks().await.unwrap_err();
    assert_eq!(err.status(), Some(503));
    assert!(!err.is_auth_expired());
}

#[tokio::test]
async fn chat_carries_the_conversation_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_json(json!({"message": "hi", "conversation_id": "c1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": "hello!",
            "conversation_id": "c1",
        })))
        .mount(&mock_server)
        .await;

    let client = ApiClientBuilder::new()
        .base_url(mock_server.uri())
        .build_authenticated("a.b.c")
        .unwrap();

    let response = client
        .send_chat(tasklink_http::types::ChatRequest {
            message: "hi".to_string(),
            conversation_id: Some("c1".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(response.response, "hello!");
    assert_eq!(response.conversation_id, "c1");
}
