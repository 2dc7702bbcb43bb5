//! One request/response cycle: build, send, classify.
//!
//! # Design
//! `Dispatcher` owns nothing but a shared transport and a default
//! [`AddressingMode`], so clones are cheap and calls never interfere. A
//! request can fail in two places and the return type keeps them apart: the
//! outer `Result` is the build step, the inner [`Outcome`] is the response.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};

use crate::builder::{AddressingMode, RequestBuilder};
use crate::classify::classify;
use crate::error::{BuildError, Outcome};
use crate::http::{Headers, HttpMethod, HttpRequest, HttpResponse};
use crate::params::{BodyParams, QueryParams, RouteParams};
use crate::transport::Transport;

const CONTENT_TYPE: &str = "Content-Type";
const APPLICATION_JSON: &str = "application/json";

/// Everything a caller supplies for one request.
#[derive(Debug, Clone)]
pub struct ApiCall {
    method: HttpMethod,
    url: String,
    body: Option<BodyParams>,
    query: Option<QueryParams>,
    route: Option<RouteParams>,
    headers: Option<Headers>,
    token: String,
    addressing: Option<AddressingMode>,
}

impl ApiCall {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            body: None,
            query: None,
            route: None,
            headers: None,
            token: String::new(),
            addressing: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, url)
    }

    pub fn put(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, url)
    }

    pub fn patch(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Patch, url)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, url)
    }

    pub fn body(mut self, body: BodyParams) -> Self {
        self.body = Some(body);
        self
    }

    pub fn query(mut self, query: QueryParams) -> Self {
        self.query = Some(query);
        self
    }

    pub fn route(mut self, route: RouteParams) -> Self {
        self.route = Some(route);
        self
    }

    pub fn headers(mut self, headers: Headers) -> Self {
        self.headers = Some(headers);
        self
    }

    /// Carried with the call; not attached to the outgoing request.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = token.into();
        self
    }

    /// Override the dispatcher's addressing mode for this call only.
    pub fn addressing(mut self, mode: AddressingMode) -> Self {
        self.addressing = Some(mode);
        self
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Sends [`ApiCall`]s over a [`Transport`].
#[derive(Clone)]
pub struct Dispatcher {
    transport: Arc<dyn Transport>,
    addressing: AddressingMode,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("addressing", &self.addressing)
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self::from_arc(Arc::new(transport))
    }

    pub fn from_arc(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            addressing: AddressingMode::default(),
        }
    }

    /// Default addressing for GET, PATCH and DELETE calls.
    pub fn with_addressing(mut self, mode: AddressingMode) -> Self {
        self.addressing = mode;
        self
    }

    /// Build the descriptor `call` would send, with the JSON content type set.
    pub fn build(&self, call: &ApiCall) -> Result<HttpRequest, BuildError> {
        let mut headers: Headers = call
            .headers
            .iter()
            .flatten()
            .filter(|(name, _)| !name.eq_ignore_ascii_case(CONTENT_TYPE))
            .cloned()
            .collect();
        headers.push((CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string()));

        let builder = RequestBuilder::new(call.addressing.unwrap_or(self.addressing));
        let query = call.query.as_ref();
        let route = call.route.as_ref();
        let body = call.body.as_ref();

        match call.method {
            HttpMethod::Get => builder.build_get(&call.url, query, route, &headers),
            HttpMethod::Patch => builder.build_patch(&call.url, query, route, &headers),
            HttpMethod::Delete => builder.build_delete(&call.url, query, route, &headers),
            HttpMethod::Post => builder.build_post(&call.url, body, &headers),
            HttpMethod::Put => builder.build_put(&call.url, body, query, &headers),
        }
    }

    /// Build `call`, send it and classify the response as `T`.
    pub async fn request<T: DeserializeOwned>(&self, call: ApiCall) -> Result<Outcome<T>, BuildError> {
        let request = self.build(&call)?;

        debug!(
            target: "request_core::dispatch",
            method = %request.method(),
            url = request.url(),
            body = request.body().unwrap_or("No content."),
            has_token = !call.token.is_empty(),
            "sending request"
        );
        trace!(target: "request_core::dispatch", headers = ?request.headers(), "request headers");

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(target: "request_core::dispatch", url = call.url(), error = %e, "transport failed");
                HttpResponse::absent(0)
            }
        };

        let outcome = classify(&response);
        debug!(
            target: "request_core::dispatch",
            status = response.status,
            success = outcome.is_ok(),
            "request finished"
        );
        Ok(outcome)
    }

    /// Run [`request`](Self::request) on the current tokio runtime and hand
    /// the result to `completion`, which is called exactly once.
    ///
    /// Must be called from within a tokio runtime.
    pub fn request_with<T, F>(&self, call: ApiCall, completion: F) -> JoinHandle<()>
    where
        T: DeserializeOwned + Send + 'static,
        F: FnOnce(Result<Outcome<T>, BuildError>) + Send + 'static,
    {
        let dispatcher = self.clone();
        tokio::spawn(async move {
            let result = dispatcher.request::<T>(call).await;
            completion(result);
        })
    }
}
