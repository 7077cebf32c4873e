use bytes::Bytes;
use reqwest::{
    Method, StatusCode,
    header::{self, HeaderMap, HeaderValue},
};

use crate::airship_api::error::{ApiError, ErrorKind};

/// A request to the Airship API, described as plain data.
///
/// Built by [`AirshipClient`](crate::airship_api::client::AirshipClient) and
/// handed to a [`Transport`](crate::airship_api::transport::Transport), which
/// resolves `path` against its base URL.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    /// Path relative to the base URL, including the query string.
    pub path: String,
    pub headers: HeaderMap,
    pub body: Option<Bytes>,
}

impl Request {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Attaches an already encoded JSON document as the request body.
    pub fn with_json_body(mut self, body: Vec<u8>) -> Self {
        self.headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        self.body = Some(Bytes::from(body));
        self
    }
}

/// A completed HTTP exchange as returned by the transport, whatever its status.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl Response {
    /// The `Content-Type` header, if present and valid text.
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(header::CONTENT_TYPE)
            .and_then(|hv| hv.to_str().ok())
    }

    /// The body as text, if it is valid UTF-8.
    pub fn text(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }
}

/// The value carried by a successful response.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// A body declared as JSON and decoded.
    Json(serde_json::Value),
    /// Any other body, passed through untouched.
    Raw(Bytes),
}

impl Body {
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Body::Json(value) => Some(value),
            Body::Raw(_) => None,
        }
    }

    pub fn into_json(self) -> Option<serde_json::Value> {
        match self {
            Body::Json(value) => Some(value),
            Body::Raw(_) => None,
        }
    }

    /// Applies `f` to a decoded body and leaves raw bodies alone.
    pub fn map_json(self, f: impl FnOnce(serde_json::Value) -> serde_json::Value) -> Self {
        match self {
            Body::Json(value) => Body::Json(f(value)),
            raw @ Body::Raw(_) => raw,
        }
    }
}

/// The single result of classifying a [`Response`].
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// 2xx status. `None` when the server sent no body.
    Success(Option<Body>),
    /// Any other status, with the response exactly as received.
    Failure(ErrorKind, Response),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// Turns a failure into the matching [`ApiError`].
    pub fn into_result(self) -> Result<Option<Body>, ApiError> {
        match self {
            Outcome::Success(body) => Ok(body),
            Outcome::Failure(kind, response) => Err(ApiError::from_failure(kind, response)),
        }
    }
}
