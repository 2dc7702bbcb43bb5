//! Maps a raw transport outcome to a typed [`Outcome`].
//!
//! # Design
//! Decoding happens before the status code is looked at. A body that does
//! not fit the requested shape is `Undecodable` whatever the status, and a
//! body that does fit is thrown away on every non-success status. Only 400
//! and 500 get their own variants; everything else the server says is
//! reported with the generic message so server detail never reaches the user.

use serde::de::DeserializeOwned;
use tracing::trace;

use crate::error::{ApiError, Outcome};
use crate::http::HttpResponse;

/// Classify `response`, decoding its body as `T`.
pub fn classify<T: DeserializeOwned>(response: &HttpResponse) -> Outcome<T> {
    let Some(body) = response.body.as_deref() else {
        trace!(target: "request_core::classify", status = response.status, "no payload");
        return Err(ApiError::generic());
    };

    let value: T = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(e) => {
            trace!(target: "request_core::classify", status = response.status, error = %e, "payload did not decode");
            return Err(ApiError::Undecodable);
        }
    };

    match response.status {
        200 | 202 => Ok(value),
        400 => Err(ApiError::BadRequest),
        500 => Err(ApiError::InternalServerError),
        status => {
            trace!(target: "request_core::classify", status, "unclassified status");
            Err(ApiError::generic())
        }
    }
}
