use reqwest::StatusCode;

use crate::airship_api::{transport::TransportError, types::Response};

/// Which failure a non-2xx status stands for.
///
/// `NotFound` is the 404 specialization of `ClientError`; it is reported on
/// its own so callers can tell "already gone" apart from a generic failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    ClientError,
}

/// Maps a status code to its error kind, or `None` for the 2xx success range.
pub fn translate_error(status: StatusCode) -> Option<ErrorKind> {
    if status.is_success() {
        None
    } else if status == StatusCode::NOT_FOUND {
        Some(ErrorKind::NotFound)
    } else {
        Some(ErrorKind::ClientError)
    }
}

/// Errors returned by every Airship API operation.
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("Resource not found: '{}' with body: '{}'", .0.status, String::from_utf8_lossy(&.0.body))]
    NotFound(Response),

    #[error("Unexpected response status: '{}' with body: '{}'", .0.status, String::from_utf8_lossy(&.0.body))]
    ClientError(Response),

    #[error("Transport error")]
    Transport(#[from] TransportError),

    #[error("Request payload could not be encoded as JSON")]
    InvalidPayload(#[source] serde_json::Error),
}

impl ApiError {
    pub fn from_failure(kind: ErrorKind, response: Response) -> Self {
        match kind {
            ErrorKind::NotFound => ApiError::NotFound(response),
            ErrorKind::ClientError => ApiError::ClientError(response),
        }
    }

    /// The taxonomy kind, `None` for failures that never reached a response.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            ApiError::NotFound(_) => Some(ErrorKind::NotFound),
            ApiError::ClientError(_) => Some(ErrorKind::ClientError),
            ApiError::Transport(_) | ApiError::InvalidPayload(_) => None,
        }
    }

    /// The response that caused the error, untouched.
    pub fn response(&self) -> Option<&Response> {
        match self {
            ApiError::NotFound(response) | ApiError::ClientError(response) => Some(response),
            ApiError::Transport(_) | ApiError::InvalidPayload(_) => None,
        }
    }

    pub fn into_response(self) -> Option<Response> {
        match self {
            ApiError::NotFound(response) | ApiError::ClientError(response) => Some(response),
            ApiError::Transport(_) | ApiError::InvalidPayload(_) => None,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        self.response().map(|r| r.status)
    }
}
