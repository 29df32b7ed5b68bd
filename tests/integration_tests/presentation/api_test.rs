#[path = "../../common/mod.rs"]
mod common;

use std::sync::Arc;

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use claimdesk::application::services::{
    ChatGraph, ClaimBatchProcessor, ClaimIngestionService, VectorStoreAdapter,
};
use claimdesk::domain::ChatMessage;
use claimdesk::infrastructure::archive::ZipArchiveExtractor;
use claimdesk::infrastructure::llm::{MockEmbedder, MockLlmClient};
use claimdesk::infrastructure::observability::REQUEST_ID_HEADER;
use claimdesk::infrastructure::persistence::InMemoryVectorStore;
use claimdesk::infrastructure::text_processing::MockFileLoader;
use claimdesk::presentation::{AppState, Settings, create_router};

use common::{fake_pdf, zip_bytes};

const BOUNDARY: &str = "claimdesk-test-boundary-5c1e9a";

struct TestApp {
    router: axum::Router,
    store: Arc<InMemoryVectorStore>,
}

fn create_test_app(llm: MockLlmClient) -> TestApp {
    let store = Arc::new(InMemoryVectorStore::new());
    let llm = Arc::new(llm);
    let index = Arc::new(VectorStoreAdapter::new(
        Arc::new(MockEmbedder),
        Arc::clone(&store),
    ));

    let batch_processor = ClaimBatchProcessor::new(
        Arc::new(MockFileLoader),
        Arc::new(ZipArchiveExtractor::new()),
        Arc::clone(&llm),
    );

    let state = AppState {
        ingestion_service: Arc::new(ClaimIngestionService::new(
            batch_processor,
            Arc::clone(&index),
        )),
        chat_graph: Arc::new(ChatGraph::new(llm, index, 2)),
        settings: Settings::default(),
    };

    TestApp {
        router: create_router(state),
        store,
    }
}

fn multipart_body(parts: &[(&str, &str, Vec<u8>)]) -> Vec<u8> {
    let mut body = Vec::new();
    for (field, file_name, data) in parts {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn process_claim_request(uri: &str, parts: &[(&str, &str, Vec<u8>)]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap()
}

fn chat_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/chat")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn given_health_request_when_called_then_returns_healthy() {
    let app = create_test_app(MockLlmClient::new());

    let response = app
        .router
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["status"], "healthy");
}

#[tokio::test]
async fn given_request_id_header_when_called_then_it_is_echoed() {
    let app = create_test_app(MockLlmClient::new());

    let response = app
        .router
        .oneshot(
            Request::builder()
                .uri("/health")
                .header(REQUEST_ID_HEADER, "req-42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.headers()[REQUEST_ID_HEADER], "req-42");
}

#[tokio::test]
async fn given_one_invoice_and_policy_when_processing_claim_then_one_document_is_stored() {
    let app = create_test_app(MockLlmClient::new());
    let archive = zip_bytes(&[("invoice.pdf", fake_pdf("Cust omer Name: Mock Customer\nTotal 900"))]);

    let response = app
        .router
        .oneshot(process_claim_request(
            "/process_claim/",
            &[
                ("invoice_file", "invoices.zip", archive),
                ("policy_file", "policy.pdf", fake_pdf("Meals up to 1000")),
            ],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["documents_stored"], 1);
    assert_eq!(body["failed_adjudications"], 0);
    assert_eq!(body["skipped_files"], serde_json::json!([]));

    let documents = app.store.documents().await;
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0].metadata.status, "accept");
    assert_eq!(documents[0].metadata.employee_name, "Mock Customer");
    assert_eq!(documents[0].metadata.invoice_id, "INV-0001");
}

#[tokio::test]
async fn given_corrupt_invoice_when_processing_claim_then_it_is_reported_as_skipped() {
    let app = create_test_app(MockLlmClient::new().with_json_reply("not json at all"));
    let archive = zip_bytes(&[
        ("a.pdf", fake_pdf("Bus ticket 60")),
        ("b.pdf", b"garbage".to_vec()),
    ]);

    let response = app
        .router
        .oneshot(process_claim_request(
            "/process_claim",
            &[
                ("invoice_file", "invoices.zip", archive),
                ("policy_file", "policy.pdf", fake_pdf("Travel covered")),
            ],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["documents_stored"], 0);
    assert_eq!(body["failed_adjudications"], 1);
    assert_eq!(body["skipped_files"][0]["file_name"], "b.pdf");
    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn given_missing_policy_when_processing_claim_then_returns_bad_request() {
    let app = create_test_app(MockLlmClient::new());
    let archive = zip_bytes(&[("a.pdf", fake_pdf("Bus ticket 60"))]);

    let response = app
        .router
        .oneshot(process_claim_request(
            "/process_claim",
            &[("invoice_file", "invoices.zip", archive)],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("policy_file"));
}

#[tokio::test]
async fn given_invalid_archive_when_processing_claim_then_returns_server_error() {
    let app = create_test_app(MockLlmClient::new());

    let response = app
        .router
        .oneshot(process_claim_request(
            "/process_claim",
            &[
                ("invoice_file", "invoices.zip", b"not a zip".to_vec()),
                ("policy_file", "policy.pdf", fake_pdf("Policy")),
            ],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_body(response).await["success"], false);
}

#[tokio::test]
async fn given_query_when_chatting_then_returns_success() {
    let app = create_test_app(
        MockLlmClient::new().with_chat_reply(ChatMessage::assistant("No claims found.")),
    );

    let response = app
        .router
        .oneshot(chat_request(serde_json::json!({
            "query": "Which claims were rejected?",
            "metadata_filter": {"status": "reject"}
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["response"], "No claims found.");
    assert!(body.get("details").is_none());
}

#[tokio::test]
async fn given_empty_query_when_chatting_then_returns_bad_request() {
    let app = create_test_app(MockLlmClient::new());

    let response = app
        .router
        .oneshot(chat_request(serde_json::json!({"query": "  "})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["status"], "error");
}

#[tokio::test]
async fn given_chat_without_final_answer_when_chatting_then_reports_error_status() {
    let call = ChatMessage::assistant_with_tools(
        "",
        vec![claimdesk::domain::ToolCall {
            id: "call_1".to_string(),
            name: "retrieve".to_string(),
            arguments: r#"{"query": "claims"}"#.to_string(),
        }],
    );
    let app = create_test_app(
        MockLlmClient::new()
            .with_chat_reply(call.clone())
            .with_chat_reply(call),
    );

    let response = app
        .router
        .oneshot(chat_request(serde_json::json!({"query": "claims?"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["response"], "No response generated by the chatbot");
}
