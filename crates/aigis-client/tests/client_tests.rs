//! Integration tests for the API client against a mock service.

use aigis_client::{ApiClient, ClientConfig, ClientError};
use aigis_models::{normalize, JobKind, JobStatus};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(ClientConfig {
        base_url: server.uri(),
    })
    .expect("client")
}

#[tokio::test]
async fn list_jobs_accepts_array_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jobs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "a", "url": "https://youtu.be/a", "status": "processing", "progress": 40, "created_at": 100},
        ])))
        .mount(&server)
        .await;

    let payload = client_for(&server).list_jobs(JobKind::Clip).await.unwrap();
    let records = normalize(JobKind::Clip, payload);

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, "a");
    assert_eq!(records[0].status, JobStatus::Processing);
}

#[tokio::test]
async fn list_jobs_accepts_map_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/generate/jobs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "g1": {"id": "g1", "topic": "space", "status": "pending"},
            "g2": {"id": "g2", "topic": "ocean", "status": "completed", "output_url": "/out/g2.mp4"},
        })))
        .mount(&server)
        .await;

    let payload = client_for(&server)
        .list_jobs(JobKind::Generate)
        .await
        .unwrap();
    let records = normalize(JobKind::Generate, payload);

    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.kind == JobKind::Generate));
}

#[tokio::test]
async fn create_clip_job_posts_url_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/jobs"))
        .and(body_json(json!({"url": "https://youtu.be/abc"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"job_id": "j-1", "status": "queued"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let created = client_for(&server)
        .create_job(JobKind::Clip, "https://youtu.be/abc")
        .await
        .unwrap();
    assert_eq!(created.job_id, "j-1");
}

#[tokio::test]
async fn create_generate_job_posts_topic_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate"))
        .and(body_json(json!({"topic": "deep sea"})))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({"job_id": "g-1", "status": "queued"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let created = client_for(&server)
        .create_job(JobKind::Generate, "deep sea")
        .await
        .unwrap();
    assert_eq!(created.job_id, "g-1");
}

#[tokio::test]
async fn create_job_surfaces_server_error_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"error": "topic too short"})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .create_job(JobKind::Generate, "x")
        .await
        .unwrap_err();

    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "topic too short");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn create_job_falls_back_to_generic_message_on_unparsable_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/jobs"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>boom</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .create_job(JobKind::Clip, "https://youtu.be/abc")
        .await
        .unwrap_err();

    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "request failed with status 500");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn create_job_accepts_fastapi_detail_bodies() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({"detail": "topic cannot be empty"})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .create_job(JobKind::Generate, " ")
        .await
        .unwrap_err();
    assert_eq!(err.user_message(), "topic cannot be empty");
}
