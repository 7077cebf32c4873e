use std::future::Future;
use std::time::Duration;

use crate::airship_api::types::{Request, Response};

/// Sends a [`Request`] and hands back the [`Response`], whatever its status.
///
/// Implementations only fail on transport problems (timeouts, refused
/// connections, ...). HTTP error statuses are data, not errors.
pub trait Transport: Send + Sync {
    fn send(&self, request: Request) -> impl Future<Output = Result<Response, TransportError>> + Send;
}

/// Errors raised below the HTTP layer.
#[derive(thiserror::Error, Debug)]
pub enum TransportError {
    #[error("Request timed out")]
    Timeout,

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Invalid request URL '{0}'")]
    InvalidUrl(String),

    #[error("HTTP transport error")]
    Other(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// [`Transport`] backed by a [`reqwest::Client`] and a fixed base URL.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    base_url: String,
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::from_client(base_url, client))
    }

    pub fn from_client(base_url: &str, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: Request) -> Result<Response, TransportError> {
        let url = format!("{}{}", self.base_url, request.path);
        let url = reqwest::Url::parse(&url).map_err(|_| TransportError::InvalidUrl(url.clone()))?;

        let mut builder = self
            .client
            .request(request.method, url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(map_reqwest_error)?;
        log::trace!("Received response: {:?}", response);

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(map_reqwest_error)?;
        Ok(Response {
            status,
            headers,
            body,
        })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connection(err.to_string())
    } else {
        TransportError::Other(Box::new(err))
    }
}
