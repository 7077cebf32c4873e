use std::sync::LazyLock;

use regex::Regex;

use crate::airship_api::{
    error::translate_error,
    types::{Body, Outcome, Response},
};

/// Decodes a JSON document. Injected into [`ResponseClassifier`].
pub type JsonDecoder = fn(&str) -> serde_json::Result<serde_json::Value>;

/// `.../json` as well as vendor types such as `application/vnd.urbanairship+json`.
static JSON_CONTENT_TYPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\bjson$|application/.*json)").expect("static regex is valid")
});

/// Decides the [`Outcome`] of a response: success or failure, decoded or raw body.
#[derive(Debug, Clone, Copy)]
pub struct ResponseClassifier {
    decode: JsonDecoder,
}

impl Default for ResponseClassifier {
    fn default() -> Self {
        Self::with_decoder(decode_json)
    }
}

fn decode_json(text: &str) -> serde_json::Result<serde_json::Value> {
    serde_json::from_str(text)
}

impl ResponseClassifier {
    pub fn with_decoder(decode: JsonDecoder) -> Self {
        Self { decode }
    }

    /// Classifies a completed response.
    ///
    /// Any 2xx status is a success. A non-empty textual body declared as
    /// JSON is decoded; everything else, including JSON the decoder rejects,
    /// is passed through as [`Body::Raw`]. Other statuses are failures that
    /// carry the response unchanged.
    pub fn classify(&self, response: Response) -> Outcome {
        if let Some(kind) = translate_error(response.status) {
            return Outcome::Failure(kind, response);
        }
        if response.body.is_empty() {
            return Outcome::Success(None);
        }
        if is_json_content_type(response.content_type()) {
            if let Some(text) = response.text() {
                match (self.decode)(text) {
                    Ok(value) => return Outcome::Success(Some(Body::Json(value))),
                    Err(e) => {
                        log::debug!("Body declared as JSON did not decode, passing it through: {e}")
                    }
                }
            }
        }
        Outcome::Success(Some(Body::Raw(response.body)))
    }
}

/// Whether a `Content-Type` value names a JSON document. A missing header is not JSON.
pub fn is_json_content_type(content_type: Option<&str>) -> bool {
    content_type.is_some_and(|ct| JSON_CONTENT_TYPE.is_match(ct))
}
