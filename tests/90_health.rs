mod common;

use anyhow::Result;
use axum::{body::Body, http::Request, http::StatusCode};

use common::{send, test_app, CountingTransport, TEST_CREDENTIAL};

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let transport = CountingTransport::completing("unused");
    let app = test_app(transport.clone(), Some(TEST_CREDENTIAL));

    let (status, _, body) = send(app, get("/health")).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["credential_configured"], true);
    assert!(body["timestamp"].is_string());
    // Liveness never touches the gateway
    assert_eq!(transport.calls(), 0);
    Ok(())
}

#[tokio::test]
async fn health_reports_missing_credential() -> Result<()> {
    let app = test_app(CountingTransport::completing("unused"), None);

    let (status, _, body) = send(app, get("/health")).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["credential_configured"], false);
    Ok(())
}

#[tokio::test]
async fn root_lists_endpoints() -> Result<()> {
    let app = test_app(CountingTransport::completing("unused"), Some(TEST_CREDENTIAL));

    let (status, _, body) = send(app, get("/")).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "gentle-reflect");
    assert!(body["endpoints"]["reflect"].as_str().unwrap_or_default().contains("/gentle-ai"));
    Ok(())
}
