use std::time::Duration;

use podcast_client::{ApiError, Backend, BackendSettings, ReqwestBackend, GENERIC_SUBMIT_ERROR};
use podcast_core::{JobState, LogEntry, ResultSet, Step};
use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn backend_for(server: &MockServer) -> ReqwestBackend {
    let base = Url::parse(&server.uri()).unwrap();
    ReqwestBackend::new(BackendSettings::new(base)).unwrap()
}

#[tokio::test]
async fn start_job_posts_url_as_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/process"))
        .and(body_json(json!({ "url": "https://example.com/ep.mp3" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "status": "accepted", "message": "Processing started." })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    backend
        .start_job("https://example.com/ep.mp3")
        .await
        .expect("start ok");
}

#[tokio::test]
async fn start_job_surfaces_detail_of_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/process"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "detail": "unsupported host" })),
        )
        .mount(&server)
        .await;

    let err = backend_for(&server)
        .start_job("https://example.com/ep.mp3")
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ApiError::Rejected {
            status: 400,
            detail: "unsupported host".to_string(),
        }
    );
    assert_eq!(err.to_string(), "unsupported host");
}

#[tokio::test]
async fn start_job_joins_validation_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/process"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "detail": [
                { "loc": ["body", "url"], "msg": "URL scheme should be 'http' or 'https'", "type": "url_scheme" },
                { "loc": ["body"], "msg": "second problem", "type": "value_error" }
            ]
        })))
        .mount(&server)
        .await;

    let err = backend_for(&server)
        .start_job("https://example.com/ep.mp3")
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "URL scheme should be 'http' or 'https'; second problem"
    );
}

#[tokio::test]
async fn start_job_without_detail_uses_generic_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/process"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let err = backend_for(&server)
        .start_job("https://example.com/ep.mp3")
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ApiError::Rejected {
            status: 500,
            detail: GENERIC_SUBMIT_ERROR.to_string(),
        }
    );
}

#[tokio::test]
async fn start_job_reports_unreachable_backend() {
    let server = MockServer::start().await;
    let backend = backend_for(&server);
    drop(server);

    let err = backend
        .start_job("https://example.com/ep.mp3")
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Transport(_)), "got {err:?}");
}

#[tokio::test]
async fn status_maps_wire_record() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "state": "running",
            "step": "transcription",
            "error": null,
            "logs": [
                { "time": 1700000000000i64, "level": "info", "message": "Downloading" },
                { "time": "2024-01-01T00:00:01.500000", "level": "info", "message": "Transcribing", "stage": "transcription" },
                { "time": "garbage", "level": "warning", "message": "odd time" }
            ]
        })))
        .mount(&server)
        .await;

    let record = backend_for(&server).fetch_status().await.expect("status ok");

    assert_eq!(record.state, JobState::Running);
    assert_eq!(record.step, Some(Step::Transcription));
    assert_eq!(record.error, None);
    assert_eq!(
        record.logs,
        vec![
            LogEntry {
                time_ms: Some(1_700_000_000_000),
                level: "info".to_string(),
                message: "Downloading".to_string(),
                stage: None,
            },
            LogEntry {
                time_ms: Some(1_704_067_201_500),
                level: "info".to_string(),
                message: "Transcribing".to_string(),
                stage: Some("transcription".to_string()),
            },
            LogEntry {
                time_ms: None,
                level: "warning".to_string(),
                message: "odd time".to_string(),
                stage: None,
            },
        ]
    );
}

#[tokio::test]
async fn status_tolerates_missing_optional_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "state": "idle" })))
        .mount(&server)
        .await;

    let record = backend_for(&server).fetch_status().await.expect("status ok");

    assert_eq!(record.state, JobState::Idle);
    assert_eq!(record.step, None);
    assert!(record.logs.is_empty());
}

#[tokio::test]
async fn status_http_failure_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let err = backend_for(&server).fetch_status().await.unwrap_err();
    assert_eq!(err, ApiError::Status { status: 502 });
}

#[tokio::test]
async fn status_with_invalid_json_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy</html>"))
        .mount(&server)
        .await;

    let err = backend_for(&server).fetch_status().await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn status_times_out_on_slow_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({ "state": "running" })),
        )
        .mount(&server)
        .await;

    let settings = BackendSettings {
        request_timeout: Duration::from_millis(50),
        ..BackendSettings::new(Url::parse(&server.uri()).unwrap())
    };
    let backend = ReqwestBackend::new(settings).unwrap();

    let err = backend.fetch_status().await.unwrap_err();
    assert!(matches!(err, ApiError::Timeout(_)), "got {err:?}");
}

#[tokio::test]
async fn results_are_mapped_to_result_set() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/results"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "transcript_markdown": "# T",
            "summary_markdown": "# S",
            "thread_markdown": "# X"
        })))
        .mount(&server)
        .await;

    let results = backend_for(&server).fetch_results().await.expect("results ok");

    assert_eq!(
        results,
        ResultSet {
            transcript: "# T".to_string(),
            summary: "# S".to_string(),
            thread: "# X".to_string(),
        }
    );
}

#[tokio::test]
async fn results_failure_carries_raw_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/results"))
        .respond_with(ResponseTemplate::new(400).set_body_string("Results are not available."))
        .mount(&server)
        .await;

    let err = backend_for(&server).fetch_results().await.unwrap_err();

    assert_eq!(
        err,
        ApiError::Results {
            status: 400,
            body: "Results are not available.".to_string(),
        }
    );
    assert_eq!(err.to_string(), "Results are not available.");
}

#[tokio::test]
async fn base_url_with_path_prefix_is_preserved() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "state": "completed" })))
        .mount(&server)
        .await;

    let base = Url::parse(&format!("{}/api", server.uri())).unwrap();
    let backend = ReqwestBackend::new(BackendSettings::new(base)).unwrap();

    assert_eq!(backend.base_url().path(), "/api/");
    let record = backend.fetch_status().await.expect("status ok");
    assert_eq!(record.state, JobState::Completed);
}
