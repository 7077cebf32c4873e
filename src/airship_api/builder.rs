use std::time::Duration;

use crate::airship_api::{
    API_BASE_URL,
    client::AirshipClient,
    credentials::{Credentials, CredentialsError},
    transport::ReqwestTransport,
};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configures an [`AirshipClient`] talking HTTP through reqwest.
pub struct AirshipClientBuilder {
    credentials: Credentials,
    base_url: String,
    timeout: Duration,
}

impl AirshipClientBuilder {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            base_url: API_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Overrides the API host, e.g. for a proxy or a test server.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Validates the configuration and returns a client ready to be used.
    pub fn build(self) -> Result<AirshipClient<ReqwestTransport>, ClientBuildError> {
        let url = reqwest::Url::parse(&self.base_url).map_err(|e| ClientBuildError::InvalidBaseUrl {
            base_url: self.base_url.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ClientBuildError::InvalidBaseUrl {
                base_url: self.base_url,
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }
        log::debug!(
            "Building client for '{}' as '{}' with timeout {:?}",
            self.base_url,
            self.credentials.application_key(),
            self.timeout
        );
        let transport = ReqwestTransport::new(&self.base_url, self.timeout)?;
        Ok(AirshipClient::new(transport, &self.credentials)?)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ClientBuildError {
    #[error("Invalid base URL '{base_url}': {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
    #[error("Error with credentials")]
    CredentialsError(#[from] CredentialsError),
    #[error("Could not set up HTTP client")]
    HttpError(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn credentials() -> Credentials {
        Credentials::new("app key", "app master secret")
    }

    #[test]
    fn defaults_to_airship_host() {
        let client = AirshipClientBuilder::new(credentials()).build().unwrap();
        assert_eq!(client.transport().base_url(), "https://go.urbanairship.com");
    }

    #[test]
    fn custom_base_url() {
        let client = AirshipClientBuilder::new(credentials())
            .base_url("http://localhost:8080/")
            .timeout(Duration::from_secs(1))
            .build()
            .unwrap();
        assert_eq!(client.transport().base_url(), "http://localhost:8080");
    }

    #[rstest]
    #[case("not a url")]
    #[case("ftp://go.urbanairship.com")]
    #[case("")]
    fn invalid_base_url(#[case] base_url: &str) {
        let result = AirshipClientBuilder::new(credentials()).base_url(base_url).build();
        assert_matches!(result, Err(ClientBuildError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn empty_application_key() {
        let result = AirshipClientBuilder::new(Credentials::new("", "secret")).build();
        assert_matches!(
            result,
            Err(ClientBuildError::CredentialsError(CredentialsError::MissingApplicationKey))
        );
    }
}
