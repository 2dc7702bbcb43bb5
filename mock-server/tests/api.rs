use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, EchoReport, StatusBody};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

// --- echo ---

#[tokio::test]
async fn echo_reports_query_string_verbatim() {
    let resp = app()
        .oneshot(Request::builder().uri("/echo?b=2&a=1").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let report: EchoReport = body_json(resp).await;
    assert_eq!(report.method, "GET");
    assert_eq!(report.path, "/echo");
    assert_eq!(report.query.as_deref(), Some("b=2&a=1"));
    assert!(report.body.is_none());
}

#[tokio::test]
async fn echo_returns_json_body_and_content_type() {
    let resp = app()
        .oneshot(json_request("POST", "/echo", r#"{"a":1}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let report: EchoReport = body_json(resp).await;
    assert_eq!(report.method, "POST");
    assert_eq!(report.content_type.as_deref(), Some("application/json"));
    assert_eq!(report.body, Some(serde_json::json!({"a": 1})));
}

#[tokio::test]
async fn echo_accepts_nested_route_segments() {
    let resp = app()
        .oneshot(json_request("PATCH", "/echo/users/7/", "{}"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let report: EchoReport = body_json(resp).await;
    assert_eq!(report.method, "PATCH");
    assert_eq!(report.path, "/echo/users/7/");
}

#[tokio::test]
async fn echo_timestamps_use_both_layouts() {
    let resp = app()
        .oneshot(Request::builder().method("DELETE").uri("/echo").body(String::new()).unwrap())
        .await
        .unwrap();

    let report: EchoReport = body_json(resp).await;
    assert_eq!(report.received_at.len(), 19);
    assert_eq!(&report.received_at[10..11], " ");
    assert_eq!(&report.acknowledged_at[10..11], "T");
}

// --- status ---

#[tokio::test]
async fn status_route_returns_requested_code() {
    for code in [200u16, 202, 400, 404, 409, 500] {
        let resp = app()
            .oneshot(Request::builder().uri(format!("/status/{code}")).body(String::new()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status().as_u16(), code);
        let body: StatusBody = body_json(resp).await;
        assert_eq!(body.code, code);
    }
}

#[tokio::test]
async fn status_route_rejects_non_numeric_code() {
    let resp = app()
        .oneshot(Request::builder().uri("/status/teapot").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- garbage / empty ---

#[tokio::test]
async fn garbage_route_returns_non_json_body() {
    let resp = app()
        .oneshot(Request::builder().uri("/garbage/200").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = body_bytes(resp).await;
    assert!(serde_json::from_slice::<serde_json::Value>(&bytes).is_err());
}

#[tokio::test]
async fn empty_route_returns_no_body() {
    let resp = app()
        .oneshot(Request::builder().uri("/empty/202").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::ACCEPTED);
    assert!(body_bytes(resp).await.is_empty());
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let resp = app()
        .oneshot(Request::builder().uri("/todos").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
