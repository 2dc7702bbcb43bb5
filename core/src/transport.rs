//! The network boundary.
//!
//! The core never opens sockets itself. A [`Transport`] takes a finished
//! [`HttpRequest`] and returns whatever came back. [`ReqwestTransport`] is
//! the stock implementation; hosts that do their own I/O can skip the trait
//! and feed an [`HttpResponse`] straight into [`classify`](crate::classify).

use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// The request never produced a response (connection refused, timeout, ...).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("transport failure: {0}")]
pub struct TransportError(pub String);

impl TransportError {
    pub fn new(message: impl std::fmt::Display) -> Self {
        Self(message.to_string())
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// [`Transport`] backed by a `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

fn to_reqwest(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Patch => reqwest::Method::PATCH,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let (method, url, headers, body) = request.into_parts();

        let mut builder = self.client.request(to_reqwest(method), url.as_str());
        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(TransportError::new)?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();

        let body = match response.bytes().await {
            Ok(bytes) => Some(bytes.to_vec()),
            Err(e) => {
                warn!(target: "request_core::transport", %url, status, error = %e, "failed to read response body");
                None
            }
        };

        Ok(HttpResponse { status, headers, body })
    }
}
