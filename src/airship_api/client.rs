use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use reqwest::{
    Method,
    header::{self, HeaderValue},
};
use serde::Serialize;
use serde_json::Value;

use crate::airship_api::{
    classifier::ResponseClassifier,
    credentials::{Credentials, CredentialsError},
    error::ApiError,
    pagination, paths,
    transport::Transport,
    types::{Body, Request},
};

/// Client for the Airship push notification API.
///
/// Every operation builds a [`Request`], sends it through the transport and
/// classifies the response. Mutations resolve to `()`, reads to the response
/// body; every non-2xx status becomes an [`ApiError`] that carries the
/// response as received.
#[derive(Debug, Clone)]
pub struct AirshipClient<T: Transport> {
    transport: T,
    authorization: HeaderValue,
    classifier: ResponseClassifier,
}

impl<T: Transport> AirshipClient<T> {
    pub fn new(transport: T, credentials: &Credentials) -> Result<Self, CredentialsError> {
        Ok(Self {
            transport,
            authorization: credentials.authorization()?,
            classifier: ResponseClassifier::default(),
        })
    }

    /// Replaces the classifier, e.g. to decode JSON bodies differently.
    pub fn with_classifier(mut self, classifier: ResponseClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Registers a device token, optionally with a payload such as an alias or tags.
    pub async fn register_device_token(&self, device_token: &str, payload: Option<&Value>) -> Result<(), ApiError> {
        self.put(paths::device_token(device_token), payload).await
    }

    /// Information on a device token. A token the service does not know is `ApiError::NotFound`.
    pub async fn device_token(&self, device_token: &str) -> Result<Option<Body>, ApiError> {
        self.get(paths::device_token(device_token)).await
    }

    pub async fn delete_device_token(&self, device_token: &str) -> Result<(), ApiError> {
        self.delete(paths::device_token(device_token)).await
    }

    /// One page of registered device tokens. `next_page` in the body is the number of the next page.
    pub async fn device_tokens(&self, page: Option<u32>) -> Result<Option<Body>, ApiError> {
        self.get_page(paths::device_tokens_page(page)).await
    }

    /// Registers an Android APID, optionally with a payload.
    pub async fn register_apid(&self, apid: &str, payload: Option<&Value>) -> Result<(), ApiError> {
        self.put(paths::apid(apid), payload).await
    }

    pub async fn apid(&self, apid: &str) -> Result<Option<Body>, ApiError> {
        self.get(paths::apid(apid)).await
    }

    pub async fn delete_apid(&self, apid: &str) -> Result<(), ApiError> {
        self.delete(paths::apid(apid)).await
    }

    /// One page of registered APIDs. `next_page` in the body is the number of the next page.
    pub async fn apids(&self, page: Option<u32>) -> Result<Option<Body>, ApiError> {
        self.get_page(paths::apids_page(page)).await
    }

    pub async fn push(&self, payload: &Value) -> Result<(), ApiError> {
        self.post(paths::PUSH.to_string(), payload).await
    }

    /// Pushes several messages in one request; the payloads are sent as a JSON array.
    pub async fn batch_push(&self, payloads: &[Value]) -> Result<(), ApiError> {
        self.post(paths::BATCH_PUSH.to_string(), &payloads).await
    }

    pub async fn broadcast(&self, payload: &Value) -> Result<(), ApiError> {
        self.post(paths::BROADCAST.to_string(), payload).await
    }

    /// Device tokens that became inactive since the given time, useful for pruning a database.
    pub async fn feedback<Tz: TimeZone>(&self, since: DateTime<Tz>) -> Result<Option<Body>, ApiError> {
        let since = since
            .with_timezone(&Utc)
            .to_rfc3339_opts(SecondsFormat::Secs, true);
        self.get(paths::feedback(&since)).await
    }

    /// All tags known to the service.
    pub async fn tags(&self) -> Result<Option<Body>, ApiError> {
        self.get(paths::tag("")).await
    }

    /// Creates a tag that is not associated with any device.
    pub async fn add_tag(&self, name: &str) -> Result<(), ApiError> {
        self.put(paths::tag(name), None).await
    }

    /// Removes a tag. A tag that was already removed is `ApiError::NotFound`.
    pub async fn remove_tag(&self, name: &str) -> Result<(), ApiError> {
        self.delete(paths::tag(name)).await
    }

    /// Adds or removes device tokens on a tag, e.g. `{"device_tokens": {"add": [...]}}`.
    pub async fn modify_device_tokens_on_tag(&self, name: &str, payload: &Value) -> Result<(), ApiError> {
        self.post(paths::tag(name), payload).await
    }

    pub async fn device_tags(&self, device_token: &str) -> Result<Option<Body>, ApiError> {
        self.get(paths::device_tag(device_token, "")).await
    }

    pub async fn add_tag_to_device(&self, device_token: &str, tag_name: &str) -> Result<(), ApiError> {
        self.put(paths::device_tag(device_token, tag_name), None).await
    }

    pub async fn remove_tag_from_device(&self, device_token: &str, tag_name: &str) -> Result<(), ApiError> {
        self.delete(paths::device_tag(device_token, tag_name)).await
    }

    async fn get(&self, path: String) -> Result<Option<Body>, ApiError> {
        self.execute(Request::new(Method::GET, path)).await
    }

    async fn get_page(&self, path: String) -> Result<Option<Body>, ApiError> {
        let body = self.get(path).await?;
        Ok(body.map(|b| b.map_json(pagination::normalize)))
    }

    /// Blank payloads (absent, `null`, `{}` or `[]`) are sent without a body.
    async fn put(&self, path: String, payload: Option<&Value>) -> Result<(), ApiError> {
        let mut request = Request::new(Method::PUT, path);
        if let Some(payload) = payload.filter(|p| !is_blank(p)) {
            request = request.with_json_body(encode(payload)?);
        }
        self.execute(request).await.map(drop)
    }

    async fn post(&self, path: String, payload: &impl Serialize) -> Result<(), ApiError> {
        let request = Request::new(Method::POST, path).with_json_body(encode(payload)?);
        self.execute(request).await.map(drop)
    }

    async fn delete(&self, path: String) -> Result<(), ApiError> {
        self.execute(Request::new(Method::DELETE, path)).await.map(drop)
    }

    async fn execute(&self, mut request: Request) -> Result<Option<Body>, ApiError> {
        request
            .headers
            .insert(header::AUTHORIZATION, self.authorization.clone());
        let method = request.method.clone();
        let path = request.path.clone();
        log::trace!("Sending request: {:?}", request);

        let response = self.transport.send(request).await?;
        log::debug!("{} {} responded with '{}'", method, path, response.status);

        self.classifier.classify(response).into_result()
    }
}

fn encode(payload: &impl Serialize) -> Result<Vec<u8>, ApiError> {
    serde_json::to_vec(payload).map_err(ApiError::InvalidPayload)
}

fn is_blank(payload: &Value) -> bool {
    match payload {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}
