use lizzy_review::providers::mock::fixture;
use lizzy_review::{AnalysisError, AnalysisRequest, AnalysisService, Config, HttpAnalysisClient};
use wiremock::matchers::{header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> HttpAnalysisClient {
    let config = Config {
        endpoint: format!("{}/analyze", server.uri()),
        request_timeout_secs: 10,
        connect_timeout_secs: 5,
        ..Default::default()
    };
    HttpAnalysisClient::new(&config).unwrap()
}

fn request_with_audio(dir: &std::path::Path) -> AnalysisRequest {
    let audio = dir.join("interview.wav");
    std::fs::write(&audio, b"RIFF....WAVEfmt fake audio").unwrap();
    AnalysisRequest {
        audio_path: audio,
        candidate_name: "Harry".to_string(),
        role: "Software Engineer".to_string(),
    }
}

#[tokio::test]
async fn posts_multipart_fields_and_returns_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .and(header_exists("content-type"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixture()))
        .expect(1)
        .mount(&server)
        .await;

    let td = tempfile::tempdir().unwrap();
    let result = client_for(&server).analyze(&request_with_audio(td.path())).await.unwrap();
    assert_eq!(result["final_fraud_score"], 29);

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    let content_type = received[0]
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("multipart/form-data"), "{content_type}");
    let body = String::from_utf8_lossy(&received[0].body).to_string();
    assert!(body.contains(r#"name="audio_file"; filename="interview.wav""#));
    assert!(body.to_ascii_lowercase().contains("content-type: audio/wav"));
    assert!(body.contains(r#"name="candidate_name""#));
    assert!(body.contains(r#"name="role""#));
    assert!(body.contains("Software Engineer"));
    assert!(body.contains("fake audio"));
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(ResponseTemplate::new(503).set_body_string("model warming up"))
        .mount(&server)
        .await;

    let td = tempfile::tempdir().unwrap();
    let err = client_for(&server).analyze(&request_with_audio(td.path())).await.unwrap_err();
    match err {
        AnalysisError::Status { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "model warming up");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn non_json_body_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let td = tempfile::tempdir().unwrap();
    let err = client_for(&server).analyze(&request_with_audio(td.path())).await.unwrap_err();
    assert!(matches!(err, AnalysisError::InvalidBody(_)));
}

#[tokio::test]
async fn json_array_body_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([1, 2])))
        .mount(&server)
        .await;

    let td = tempfile::tempdir().unwrap();
    let err = client_for(&server).analyze(&request_with_audio(td.path())).await.unwrap_err();
    assert!(matches!(err, AnalysisError::InvalidBody(_)));
}

#[tokio::test]
async fn unreachable_service_is_a_transport_error() {
    let config = Config {
        // reserved port on localhost; nothing listens there
        endpoint: "http://127.0.0.1:9/analyze".to_string(),
        request_timeout_secs: 10,
        connect_timeout_secs: 5,
        ..Default::default()
    };
    let td = tempfile::tempdir().unwrap();
    let client = HttpAnalysisClient::new(&config).unwrap();
    let err = client.analyze(&request_with_audio(td.path())).await.unwrap_err();
    assert!(matches!(err, AnalysisError::Transport(_)));
}

#[tokio::test]
async fn missing_audio_fails_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let request = AnalysisRequest {
        audio_path: "/no/such/recording.mp3".into(),
        candidate_name: "Harry".into(),
        role: "SWE".into(),
    };
    let err = client_for(&server).analyze(&request).await.unwrap_err();
    assert!(matches!(err, AnalysisError::AudioRead { .. }));
}

#[tokio::test]
async fn large_recording_is_uploaded_intact() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixture()))
        .mount(&server)
        .await;

    let td = tempfile::tempdir().unwrap();
    let audio = td.path().join("long-interview.mp3");
    let payload: Vec<u8> = (0..4 * 1024 * 1024u32).map(|i| (i % 251) as u8).collect();
    std::fs::write(&audio, &payload).unwrap();
    let request = AnalysisRequest {
        audio_path: audio,
        candidate_name: "Harry".into(),
        role: "Software Engineer".into(),
    };

    client_for(&server).analyze(&request).await.unwrap();

    let received = server.received_requests().await.unwrap();
    let body = &received[0].body;
    let start = body
        .windows(16)
        .position(|w| w == &payload[..16])
        .expect("audio part present");
    assert_eq!(&body[start..start + payload.len()], payload.as_slice());
}
