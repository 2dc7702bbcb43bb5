//! Stateless request construction.
//!
//! # Design
//! Verbs split by addressing style rather than by semantics. GET, PATCH and
//! DELETE address a resource either with a query string or with positional
//! route segments, chosen by [`AddressingMode`]. POST and PUT always carry a
//! JSON body built from [`BodyParams`], with omitted fields dropped.
//!
//! Every builder checks that the assembled string parses as an absolute URL
//! but stores the assembled string itself, so the descriptor shows exactly
//! what was interpolated.

use tracing::trace;

use crate::error::BuildError;
use crate::http::{HttpMethod, HttpRequest};
use crate::params::{BodyParams, QueryParams, RouteParams};
use crate::route;

/// How GET, PATCH and DELETE requests place their parameters in the URL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AddressingMode {
    /// Append `?k=v&...` when query parameters are supplied.
    #[default]
    Query,
    /// Append `/` and substitute route parameters into `{i}` placeholders.
    RoutePath,
}

/// Builds immutable [`HttpRequest`] descriptors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestBuilder {
    addressing: AddressingMode,
}

impl RequestBuilder {
    pub fn new(addressing: AddressingMode) -> Self {
        Self { addressing }
    }

    pub fn addressing(&self) -> AddressingMode {
        self.addressing
    }

    pub fn build_get(
        &self,
        base_url: &str,
        query: Option<&QueryParams>,
        route: Option<&RouteParams>,
        headers: &[(String, String)],
    ) -> Result<HttpRequest, BuildError> {
        self.build_addressed(HttpMethod::Get, base_url, query, route, headers)
    }

    pub fn build_patch(
        &self,
        base_url: &str,
        query: Option<&QueryParams>,
        route: Option<&RouteParams>,
        headers: &[(String, String)],
    ) -> Result<HttpRequest, BuildError> {
        self.build_addressed(HttpMethod::Patch, base_url, query, route, headers)
    }

    pub fn build_delete(
        &self,
        base_url: &str,
        query: Option<&QueryParams>,
        route: Option<&RouteParams>,
        headers: &[(String, String)],
    ) -> Result<HttpRequest, BuildError> {
        self.build_addressed(HttpMethod::Delete, base_url, query, route, headers)
    }

    pub fn build_post(
        &self,
        base_url: &str,
        body: Option<&BodyParams>,
        headers: &[(String, String)],
    ) -> Result<HttpRequest, BuildError> {
        build_with_body(HttpMethod::Post, base_url.to_string(), body, headers)
    }

    /// PUT appends the query string whenever one is given, independent of
    /// the addressing mode.
    pub fn build_put(
        &self,
        base_url: &str,
        body: Option<&BodyParams>,
        query: Option<&QueryParams>,
        headers: &[(String, String)],
    ) -> Result<HttpRequest, BuildError> {
        let mut url = base_url.to_string();
        if let Some(query) = query {
            url.push_str(&query.to_query_string());
        }
        build_with_body(HttpMethod::Put, url, body, headers)
    }

    fn build_addressed(
        &self,
        method: HttpMethod,
        base_url: &str,
        query: Option<&QueryParams>,
        route: Option<&RouteParams>,
        headers: &[(String, String)],
    ) -> Result<HttpRequest, BuildError> {
        let url = match (self.addressing, query) {
            (AddressingMode::Query, Some(query)) => format!("{base_url}{}", query.to_query_string()),
            _ => {
                let template = format!("{base_url}/");
                match route {
                    Some(route) => route::resolve(&template, route.as_slice()),
                    None => template,
                }
            }
        };
        validate(&url)?;
        trace!(target: "request_core::builder", %method, %url, "built request");
        Ok(HttpRequest::new(method, url, headers.to_vec(), None))
    }
}

fn build_with_body(
    method: HttpMethod,
    url: String,
    body: Option<&BodyParams>,
    headers: &[(String, String)],
) -> Result<HttpRequest, BuildError> {
    validate(&url)?;
    let body = body.ok_or(BuildError::MissingBody(method))?;
    let payload = body.to_json()?;
    trace!(target: "request_core::builder", %method, %url, "built request with body");
    Ok(HttpRequest::new(method, url, headers.to_vec(), Some(payload)))
}

fn validate(url: &str) -> Result<(), BuildError> {
    url::Url::parse(url).map(|_| ()).map_err(|source| BuildError::InvalidUrl {
        url: url.to_string(),
        source,
    })
}
