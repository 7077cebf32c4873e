use std::fmt;

use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::header::HeaderValue;

/// Application key and master secret of an Airship application.
#[derive(Clone)]
pub struct Credentials {
    application_key: String,
    application_master_secret: String,
}

impl Credentials {
    pub fn new(application_key: impl Into<String>, application_master_secret: impl Into<String>) -> Self {
        Self {
            application_key: application_key.into(),
            application_master_secret: application_master_secret.into(),
        }
    }

    pub fn application_key(&self) -> &str {
        &self.application_key
    }

    pub fn application_master_secret(&self) -> &str {
        &self.application_master_secret
    }

    /// The `Authorization: Basic ...` value for these credentials, marked sensitive.
    pub fn authorization(&self) -> Result<HeaderValue, CredentialsError> {
        if self.application_key.is_empty() {
            return Err(CredentialsError::MissingApplicationKey);
        }
        let encoded = STANDARD.encode(format!(
            "{}:{}",
            self.application_key, self.application_master_secret
        ));
        // base64 output is always visible ASCII
        let mut value = HeaderValue::try_from(format!("Basic {encoded}"))
            .expect("basic auth value is a valid header");
        value.set_sensitive(true);
        Ok(value)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("application_key", &self.application_key)
            .field("application_master_secret", &"<redacted>")
            .finish()
    }
}

#[derive(thiserror::Error, Debug)]
pub enum CredentialsError {
    #[error("Application key must not be empty")]
    MissingApplicationKey,
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;

    #[test]
    fn builds_basic_auth_header() {
        let credentials = Credentials::new("app key", "app master secret");
        let header = credentials.authorization().unwrap();
        assert_eq!(header.to_str().unwrap(), "Basic YXBwIGtleTphcHAgbWFzdGVyIHNlY3JldA==");
        assert!(header.is_sensitive());
    }

    #[test]
    fn non_ascii_credentials_still_build_header() {
        let credentials = Credentials::new("clé", "sécret\n");
        let header = credentials.authorization().unwrap();
        assert!(header.to_str().unwrap().starts_with("Basic "));
    }

    #[test]
    fn rejects_empty_key() {
        let credentials = Credentials::new("", "secret");
        assert_matches!(credentials.authorization(), Err(CredentialsError::MissingApplicationKey));
    }

    #[test]
    fn debug_output_hides_secret() {
        let credentials = Credentials::new("app key", "app master secret");
        let debug = format!("{:?}", credentials);
        assert!(debug.contains("app key"));
        assert!(!debug.contains("app master secret"));
    }
}
