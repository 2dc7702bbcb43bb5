//! Error types for request building and response classification.
//!
//! # Design
//! Two channels, never merged. [`BuildError`] means no request was formed and
//! nothing reached the transport. [`ApiError`] is the closed set of outcomes
//! for a request that was sent; the classifier only ever produces a handful
//! of its variants, the rest exist for callers that map their own server
//! conventions onto the same type.

use thiserror::Error;

/// User-facing text for every failure the server did not explain.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong, check your connection, and try again";

/// Result of one dispatched request.
pub type Outcome<T> = Result<T, ApiError>;

/// Response-time failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The payload could not be decoded into the requested shape.
    #[error("response could not be decoded")]
    Undecodable,

    #[error("invalid token")]
    InvalidToken,

    /// The server returned 500.
    #[error("internal server error")]
    InternalServerError,

    /// The server returned 400.
    #[error("bad request")]
    BadRequest,

    #[error("invalid info: {0}")]
    InvalidInfo(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("not found: {0}")]
    NotFound(String),

    /// Free-form message, shown to the user as-is.
    #[error("{0}")]
    Custom(String),

    #[error("empty response")]
    Empty,
}

impl ApiError {
    /// `Custom` carrying [`GENERIC_FAILURE_MESSAGE`].
    pub fn generic() -> Self {
        ApiError::Custom(GENERIC_FAILURE_MESSAGE.to_string())
    }

    /// Text suitable for showing to an end user.
    ///
    /// Variants with a payload show it; the rest fall back to the generic
    /// message so no internal detail leaks.
    pub fn message(&self) -> &str {
        match self {
            ApiError::InvalidInfo(msg)
            | ApiError::Conflict(msg)
            | ApiError::NotFound(msg)
            | ApiError::Custom(msg) => msg,
            _ => GENERIC_FAILURE_MESSAGE,
        }
    }
}

/// Construction-time failures: the request descriptor could not be formed.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The assembled URL string is not a valid absolute URL.
    #[error("invalid url {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// POST and PUT require body parameters, even if every field is omitted.
    #[error("body parameters are required for {0}")]
    MissingBody(crate::http::HttpMethod),

    /// A value passed to `BodyParams::from_serialize` is not a JSON object.
    #[error("body parameters must serialize to a JSON object")]
    BodyNotAnObject,

    /// A body value could not be converted to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}
