use axum::{
    body::Bytes,
    extract::Path,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    routing::any,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use uuid::Uuid;

/// Timestamp layouts the echo report uses for its two time fields.
pub const STANDARD: &str = "%Y-%m-%d %H:%M:%S";
pub const STANDARD_T: &str = "%Y-%m-%dT%H:%M:%S";

/// What the server saw: returned by every `/echo` route.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EchoReport {
    pub request_id: Uuid,
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub content_type: Option<String>,
    pub body: Option<serde_json::Value>,
    pub received_at: String,
    pub acknowledged_at: String,
}

/// Body sent by `/status/{code}`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StatusBody {
    pub code: u16,
    pub message: String,
}

pub fn app() -> Router {
    Router::new()
        .route("/echo", any(echo))
        .route("/echo/{*rest}", any(echo))
        .route("/status/{code}", any(status))
        .route("/garbage/{code}", any(garbage))
        .route("/empty/{code}", any(empty))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn echo(method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> Json<EchoReport> {
    let now = chrono::Utc::now().naive_utc();
    // Non-JSON bodies are echoed back as a JSON string.
    let body = if body.is_empty() {
        None
    } else {
        Some(
            serde_json::from_slice(&body)
                .unwrap_or_else(|_| serde_json::Value::String(String::from_utf8_lossy(&body).into_owned())),
        )
    };
    let report = EchoReport {
        request_id: Uuid::new_v4(),
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        content_type: headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body,
        received_at: now.format(STANDARD).to_string(),
        acknowledged_at: now.format(STANDARD_T).to_string(),
    };
    tracing::debug!(method = %report.method, path = %report.path, "echo");
    Json(report)
}

fn status_code(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

async fn status(Path(code): Path<u16>) -> (StatusCode, Json<StatusBody>) {
    let status = status_code(code);
    let body = StatusBody {
        code: status.as_u16(),
        message: status.canonical_reason().unwrap_or("unknown").to_string(),
    };
    (status, Json(body))
}

async fn garbage(Path(code): Path<u16>) -> (StatusCode, &'static str) {
    (status_code(code), "<html>definitely not json</html>")
}

async fn empty(Path(code): Path<u16>) -> StatusCode {
    status_code(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_code_falls_back_for_invalid_codes() {
        assert_eq!(status_code(404), StatusCode::NOT_FOUND);
        assert_eq!(status_code(42), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn echo_report_roundtrips_through_json() {
        let report = EchoReport {
            request_id: Uuid::nil(),
            method: "GET".to_string(),
            path: "/echo".to_string(),
            query: Some("q=1".to_string()),
            content_type: None,
            body: None,
            received_at: "2024-05-01 12:00:00".to_string(),
            acknowledged_at: "2024-05-01T12:00:00".to_string(),
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["request_id"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(json["query"], "q=1");
        let back: EchoReport = serde_json::from_value(json).unwrap();
        assert_eq!(back.received_at, report.received_at);
    }

    #[test]
    fn timestamp_layouts_differ_only_in_separator() {
        let at = chrono::NaiveDate::from_ymd_opt(2024, 5, 1)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .unwrap();
        assert_eq!(at.format(STANDARD).to_string(), "2024-05-01 12:00:00");
        assert_eq!(at.format(STANDARD_T).to_string(), "2024-05-01T12:00:00");
    }
}
