//! A very tiny client for the Urban Airship push notification API.
//!
//! Thin wrappers around the most common API tasks: registering device tokens
//! and APIDs, pushing and broadcasting messages, tag management and feedback.
//! Every response goes through [`ResponseClassifier`]: 2xx statuses succeed
//! (JSON bodies decoded), 404 becomes [`ApiError::NotFound`] and any other
//! status [`ApiError::ClientError`], both carrying the response as received.

pub mod airship_api;

pub use airship_api::{
    API_BASE_URL,
    builder::{AirshipClientBuilder, ClientBuildError},
    classifier::{JsonDecoder, ResponseClassifier, is_json_content_type},
    client::AirshipClient,
    credentials::{Credentials, CredentialsError},
    error::{ApiError, ErrorKind, translate_error},
    pagination::normalize,
    transport::{ReqwestTransport, Transport, TransportError},
    types::{Body, Outcome, Request, Response},
};
