//! Client-side request building and response classification.
//!
//! # Overview
//! Builds `HttpRequest` descriptors from loosely typed parameters and turns
//! raw `(status, payload)` pairs into typed outcomes. The network sits
//! behind the [`Transport`] trait, so a host can either hand a transport to
//! the [`Dispatcher`] or execute descriptors itself and call [`classify`].
//!
//! # Design
//! - [`RequestBuilder`] is a `Copy` value carrying the [`AddressingMode`];
//!   there is no process-wide configuration.
//! - GET, PATCH and DELETE address by query string or route segments. POST
//!   and PUT always send a JSON object built from [`BodyParams`].
//! - [`classify`] decodes first and inspects the status second.
//! - Build failures ([`BuildError`]) and response failures ([`ApiError`])
//!   are separate channels.

pub mod builder;
pub mod classify;
pub mod dates;
pub mod dispatch;
pub mod error;
pub mod http;
pub mod params;
pub mod route;
pub mod transport;

pub use builder::{AddressingMode, RequestBuilder};
pub use classify::classify;
pub use dispatch::{ApiCall, Dispatcher};
pub use error::{ApiError, BuildError, Outcome, GENERIC_FAILURE_MESSAGE};
pub use http::{Headers, HttpMethod, HttpRequest, HttpResponse};
pub use params::{BodyParams, Field, QueryParams, RouteParams};
pub use transport::{ReqwestTransport, Transport, TransportError};
