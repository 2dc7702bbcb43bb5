//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The
//! builder produces `HttpRequest` values and the classifier consumes
//! `HttpResponse` values; neither touches the network. Executing the request
//! is the job of a [`Transport`](crate::transport::Transport) or of the host.
//!
//! `HttpRequest` is immutable once built: its fields are private and a
//! transport takes it by value through [`HttpRequest::into_parts`].

use std::fmt;

/// Header list attached to a request or response, kept in caller order.
pub type Headers = Vec<(String, String)>;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    /// Upper-case verb as it appears on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
///
/// Built by [`RequestBuilder`](crate::builder::RequestBuilder). The URL is
/// the assembled string exactly as the builder produced it, after it has been
/// checked to parse as an absolute URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    method: HttpMethod,
    url: String,
    headers: Headers,
    body: Option<String>,
}

impl HttpRequest {
    pub(crate) fn new(method: HttpMethod, url: String, headers: Headers, body: Option<String>) -> Self {
        Self {
            method,
            url,
            headers,
            body,
        }
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// First header value whose name matches `name` case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Serialized JSON body, present only for POST and PUT.
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    pub fn into_parts(self) -> (HttpMethod, String, Headers, Option<String>) {
        (self.method, self.url, self.headers, self.body)
    }
}

/// An HTTP response described as plain data.
///
/// `body` is `None` when the transport produced no data at all, which covers
/// both transport failures and responses whose body could not be read. An
/// empty but successfully read body is `Some(vec![])`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Headers,
    pub body: Option<Vec<u8>>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Some(body.into()),
        }
    }

    /// A response that carried no payload.
    pub fn absent(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: None,
        }
    }
}
