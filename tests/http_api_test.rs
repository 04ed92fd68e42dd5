//! Chat and document API tests against a real HTTP server, using wiremock.
//!
//! These exercise `ReqwestHttpClient` end to end: JSON bodies, the streamed
//! answer body, multipart uploads and the 404 branches.

use std::sync::Arc;
use std::time::Duration;

use ragchat::adapters::ReqwestHttpClient;
use ragchat::api::{ChatApi, DocumentApi, UploadRequest};
use ragchat::error::ApiError;
use ragchat::models::{ChatRequest, IngestRequest};
use ragchat::sse::{pump, ChatEvent, StreamDispatcher};
use uuid::Uuid;
use wiremock::matchers::{body_json, body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DOC_ID: &str = "7f1c2a9e-2f7e-4c55-9d36-0a4a1f6b8e11";

fn doc_id() -> Uuid {
    Uuid::parse_str(DOC_ID).unwrap()
}

fn clients(server: &MockServer) -> (ChatApi<ReqwestHttpClient>, DocumentApi<ReqwestHttpClient>) {
    let http = Arc::new(ReqwestHttpClient::with_connect_timeout(Duration::from_secs(5)).unwrap());
    (
        ChatApi::with_shared_client(server.uri(), Arc::clone(&http)),
        DocumentApi::with_shared_client(server.uri(), http),
    )
}

#[tokio::test]
async fn test_stream_posts_question_and_yields_events() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat/stream"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(serde_json::json!({
            "question": "how many days?",
            "conversationId": "c-1"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "text/event-stream")
                .set_body_string("event: conversationId\ndata:c-2\n\ndata:20 \n\ndata:days\n\n"),
        )
        .mount(&server)
        .await;

    let (chat, _) = clients(&server);
    let body = chat
        .stream(&ChatRequest::new("how many days?", "c-1"))
        .await
        .unwrap();

    let mut dispatcher = StreamDispatcher::new("c-1");
    let mut sink: Vec<ChatEvent> = Vec::new();
    pump(body, &mut dispatcher, &mut sink).await.unwrap();

    assert_eq!(
        sink,
        vec![
            ChatEvent::ConversationId("c-2".to_string()),
            ChatEvent::Token("20 ".to_string()),
            ChatEvent::Token("days".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_stream_error_status_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat/stream"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let (chat, _) = clients(&server);
    let result = chat.stream(&ChatRequest::new("q", "c-1")).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_sessions_and_history() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/chat/sessions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"conversationId": "c-1", "title": "Leave", "createdAt": "2026-03-01T08:00:00"}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/chat/history"))
        .and(query_param("conversationId", "c 1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"role": "user", "content": "hi"}
        ])))
        .mount(&server)
        .await;

    let (chat, _) = clients(&server);

    let sessions = chat.sessions().await.unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].conversation_id, "c-1");

    let history = chat.history("c 1").await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].content, "hi");
}

#[tokio::test]
async fn test_sessions_error_status_is_empty_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/chat/sessions"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let (chat, _) = clients(&server);
    assert!(chat.sessions().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_session() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/chat/sessions/c-1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let (chat, _) = clients(&server);
    chat.delete_session("c-1").await.unwrap();
}

#[tokio::test]
async fn test_document_crud() {
    let server = MockServer::start().await;
    let doc_path = format!("/api/documents/{}", DOC_ID);

    Mock::given(method("POST"))
        .and(path("/api/documents"))
        .and(body_json(serde_json::json!({
            "title": "Leave policy",
            "content": "20 days",
            "category": null
        })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(serde_json::json!({"message": "created", "documentId": DOC_ID})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(doc_path.clone()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "documentId": DOC_ID,
            "title": "Leave policy",
            "content": "20 days",
            "category": null,
            "chunkCount": 1
        })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(doc_path.clone()))
        .and(body_json(serde_json::json!({
            "title": "Leave policy",
            "content": "25 days",
            "category": "hr"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"message": "updated", "documentId": DOC_ID})),
        )
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(doc_path))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let (_, documents) = clients(&server);

    let created = documents
        .create(&IngestRequest::new("Leave policy", "20 days", Some(" ")))
        .await
        .unwrap();
    assert_eq!(created.document_id, doc_id());

    let fetched = documents.get(doc_id()).await.unwrap().unwrap();
    assert_eq!(fetched.content, "20 days");

    let updated = documents
        .update(doc_id(), &IngestRequest::new("Leave policy", "25 days", Some("hr")))
        .await
        .unwrap();
    assert!(updated.is_some());

    assert!(documents.delete(doc_id()).await.unwrap());
}

#[tokio::test]
async fn test_missing_document_is_none_not_error() {
    let server = MockServer::start().await;
    Mock::given(wiremock::matchers::path_regex("^/api/documents/.+$"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let (_, documents) = clients(&server);

    assert!(documents.get(doc_id()).await.unwrap().is_none());
    assert!(documents
        .update(doc_id(), &IngestRequest::new("t", "c", None))
        .await
        .unwrap()
        .is_none());
    assert!(!documents.delete(doc_id()).await.unwrap());
}

#[tokio::test]
async fn test_upload_sends_multipart() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/documents/upload"))
        .and(body_string_contains("name=\"title\""))
        .and(body_string_contains("Handbook"))
        .and(body_string_contains("filename=\"handbook.md\""))
        .and(body_string_contains("# Handbook body"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(serde_json::json!({"message": "uploaded", "documentId": DOC_ID})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (_, documents) = clients(&server);
    let request = UploadRequest::new("Handbook", None, "handbook.md", "# Handbook body");

    let created = documents.upload(request).await.unwrap();
    assert_eq!(created.document_id, doc_id());
}

#[tokio::test]
async fn test_validation_fails_before_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let (_, documents) = clients(&server);

    let err = documents
        .create(&IngestRequest::new("  ", "content", None))
        .await
        .unwrap_err();
    assert!(err.is_validation());

    let err = documents
        .upload(UploadRequest::new("", None, "a.txt", "x"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
}

#[tokio::test]
async fn test_server_error_carries_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/documents"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database down"))
        .mount(&server)
        .await;

    let (_, documents) = clients(&server);

    match documents.list().await {
        Err(ApiError::Status { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "database down");
        }
        other => panic!("unexpected: {:?}", other),
    }
}
