mod common;

use std::time::Duration;

use common::{StubResponse, StubServer};
use doc_intake::{
    api::{ApiClient, ApiError, Payload},
    config::AppConfig,
    domain::Category,
    preview::PreviewRegistry,
    session::IntakeSession,
    upload::UploadFile,
};
use reqwest::Client;
use serde_json::json;

const RECEIPTS: &str = r#"{"pos_receipts":[{"pos_id":1,"filename":"a.jpg"},{"pos_id":2,"filename":"b.jpg"}]}"#;

fn session_for(config: &AppConfig) -> IntakeSession {
    let client = ApiClient::new(Client::new(), &config.api, config.features);
    IntakeSession::new(client, PreviewRegistry::new())
}

fn batch() -> Vec<UploadFile> {
    vec![
        UploadFile::new("a.jpg", "image/jpeg", b"first image".to_vec()),
        UploadFile::new("b.jpg", "image/jpeg", b"second image".to_vec()),
    ]
}

#[tokio::test]
async fn two_file_batch_then_removals() {
    let server = StubServer::start(vec![StubResponse::json(200, RECEIPTS)]).await;
    let mut session = session_for(&server.config(&[]));

    session.submit(&batch()).await.unwrap();

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.method, "POST");
    assert_eq!(request.path, "/categorize");
    assert!(request
        .content_type
        .as_deref()
        .unwrap_or_default()
        .starts_with("multipart/form-data"));
    let body = request.body_text();
    assert_eq!(body.matches("name=\"files\"").count(), 2);
    let a = body.find("filename=\"a.jpg\"").unwrap();
    let b = body.find("filename=\"b.jpg\"").unwrap();
    assert!(a < b);
    assert!(body.contains("first image"));

    let urls = session.file_urls().unwrap();
    assert_eq!(urls.len(), 2);
    assert!(urls.get("a.jpg").is_some());
    assert_eq!(session.previews().live(), 2);

    session.remove_item(Category::PosReceipts, 1);
    assert_eq!(
        serde_json::to_value(session.result()).unwrap(),
        json!({"pos_receipts": [{"pos_id": 2, "filename": "b.jpg"}]})
    );
    session.remove_item(Category::PosReceipts, 2);
    assert_eq!(serde_json::to_value(session.result()).unwrap(), json!({}));
}

#[tokio::test]
async fn server_error_is_retried_until_success() {
    let server = StubServer::start(vec![
        StubResponse::json(503, r#"{"detail":"busy"}"#),
        StubResponse::json(200, RECEIPTS),
    ])
    .await;
    let mut session = session_for(&server.config(&[]));

    let result = session.submit(&batch()).await.unwrap();
    assert_eq!(result.total_items(), 2);
    assert_eq!(server.requests().len(), 2);
}

#[tokio::test]
async fn client_error_is_not_retried_and_keeps_previous_state() {
    let server = StubServer::start(vec![
        StubResponse::json(200, RECEIPTS),
        StubResponse::json(404, r#"{"detail":"missing"}"#),
        StubResponse::json(200, r#"{}"#),
    ])
    .await;
    let mut session = session_for(&server.config(&[]));

    session.submit(&batch()).await.unwrap();
    let before = session.result().clone();
    let handle = session.file_urls().unwrap().get("a.jpg").cloned().unwrap();

    let err = session
        .submit(&[UploadFile::new("c.jpg", "image/jpeg", b"c".to_vec())])
        .await
        .unwrap_err();

    assert_eq!(err, ApiError::Http { status: 404 });
    assert_eq!(err.user_message(), "Service not found");
    assert_eq!(server.requests().len(), 2);
    assert_eq!(session.result(), &before);
    assert_eq!(session.file_urls().unwrap().get("a.jpg"), Some(&handle));
    assert!(session.previews().resolve(&handle).is_some());
}

#[tokio::test]
async fn new_batch_releases_previous_previews() {
    let server = StubServer::start(vec![
        StubResponse::json(200, RECEIPTS),
        StubResponse::json(200, r#"{"facturas":[{"factura_id":1,"filename":"c.jpg"}]}"#),
    ])
    .await;
    let mut session = session_for(&server.config(&[]));

    session.submit(&batch()).await.unwrap();
    let stale = session.file_urls().unwrap().get("a.jpg").cloned().unwrap();

    session
        .submit(&[UploadFile::new("c.jpg", "image/jpeg", b"c".to_vec())])
        .await
        .unwrap();

    assert!(session.previews().resolve(&stale).is_none());
    assert_eq!(session.previews().live(), 1);
    assert!(session.result().pos_receipts.is_none());
    assert_eq!(session.result().total_items(), 1);
}

#[tokio::test]
async fn slow_attempt_times_out_and_is_retried() {
    let server = StubServer::start(vec![
        StubResponse::json(200, r#"{}"#).delayed(Duration::from_secs(3)),
        StubResponse::json(200, RECEIPTS),
    ])
    .await;
    let mut session = session_for(&server.config(&[("API_TIMEOUT", "200")]));

    let result = session.submit(&batch()).await.unwrap();
    assert_eq!(result.total_items(), 2);
    assert_eq!(server.requests().len(), 2);
}

#[tokio::test]
async fn exhausted_retries_surface_the_last_error() {
    let server = StubServer::start(vec![
        StubResponse::json(500, r#"{}"#),
        StubResponse::json(502, r#"{}"#),
    ])
    .await;
    let mut session = session_for(&server.config(&[("API_RETRY_ATTEMPTS", "2")]));

    let err = session.submit(&batch()).await.unwrap_err();
    assert_eq!(err, ApiError::Http { status: 502 });
    assert_eq!(err.user_message(), "Server error - please try again later");
    assert_eq!(server.requests().len(), 2);
    assert!(session.result().is_empty());
    assert!(session.file_urls().is_none());
}

#[tokio::test]
async fn disabled_retry_makes_one_attempt() {
    let server = StubServer::start(vec![
        StubResponse::json(500, r#"{}"#),
        StubResponse::json(200, RECEIPTS),
    ])
    .await;
    let mut session = session_for(&server.config(&[("ENABLE_RETRY", "false")]));

    assert!(session.submit(&batch()).await.is_err());
    assert_eq!(server.requests().len(), 1);
}

#[tokio::test]
async fn truncated_body_is_retried() {
    let server = StubServer::start(vec![
        StubResponse::json(200, r#"{"pos_receipts":[{"pos_id":1,"#),
        StubResponse::json(200, r#"{"pos_receipts":[{"pos_id":1,"filename":"a.jpg"}]}"#),
    ])
    .await;
    let mut session = session_for(&server.config(&[]));

    let result = session.submit(&batch()).await.unwrap();
    assert_eq!(result.total_items(), 1);
    assert_eq!(server.requests().len(), 2);
    assert_eq!(session.file_urls().unwrap().len(), 2);
}

#[tokio::test]
async fn non_json_body_is_a_decode_error_once_retries_run_out() {
    let server = StubServer::start(vec![
        StubResponse::json(200, "<html>oops</html>"),
        StubResponse::json(200, "<html>still oops</html>"),
    ])
    .await;
    let mut session = session_for(&server.config(&[("API_RETRY_ATTEMPTS", "2")]));

    let err = session.submit(&batch()).await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)), "{err:?}");
    assert_eq!(server.requests().len(), 2);
    assert!(session.result().is_empty());
}

#[tokio::test]
async fn get_retries_server_errors_and_decodes_the_body() {
    let server = StubServer::start(vec![
        StubResponse::json(503, r#"{"detail":"warming up"}"#),
        StubResponse::json(200, r#"{"status":"ok","categories":9}"#),
    ])
    .await;
    let config = server.config(&[]);
    let client = ApiClient::new(Client::new(), &config.api, config.features);

    let body: serde_json::Value = client
        .get(&config.api.endpoint_url("/health"))
        .await
        .unwrap();

    assert_eq!(body, json!({"status": "ok", "categories": 9}));
    let requests = server.requests();
    assert_eq!(requests.len(), 2);
    for request in &requests {
        assert_eq!(request.method, "GET");
        assert_eq!(request.path, "/health");
        assert!(request.body.is_empty());
    }
}

#[tokio::test]
async fn json_payload_is_posted_as_json() {
    let server = StubServer::start(vec![StubResponse::json(200, r#"{"accepted":true}"#)]).await;
    let config = server.config(&[]);
    let client = ApiClient::new(Client::new(), &config.api, config.features);

    let body: serde_json::Value = client
        .post(
            &config.api.endpoint_url("/feedback"),
            Payload::Json(json!({"category": "pos_receipts", "id": 7})),
        )
        .await
        .unwrap();

    assert_eq!(body, json!({"accepted": true}));
    let request = &server.requests()[0];
    assert_eq!(request.method, "POST");
    assert!(request
        .content_type
        .as_deref()
        .unwrap_or_default()
        .starts_with("application/json"));
    let sent: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
    assert_eq!(sent, json!({"category": "pos_receipts", "id": 7}));
}

#[tokio::test]
async fn unreachable_endpoint_is_a_network_error() {
    let config = AppConfig::from_lookup(|key| match key {
        "API_BASE_URL" => Some("http://127.0.0.1:9".to_string()),
        "API_RETRY_ATTEMPTS" => Some("1".to_string()),
        _ => None,
    })
    .unwrap();
    let mut session = session_for(&config);

    let err = session.submit(&batch()).await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)), "{err:?}");
    assert_eq!(err.user_message(), "Network error - please check your connection");
}

#[tokio::test]
async fn ping_reports_status_with_a_single_head_request() {
    let server = StubServer::start(vec![StubResponse::json(405, "")]).await;
    let config = server.config(&[]);
    let client = ApiClient::new(Client::new(), &config.api, config.features);

    let status = client.ping().await.unwrap();
    assert_eq!(status.as_u16(), 405);
    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "HEAD");
    assert_eq!(requests[0].path, "/categorize");
}
