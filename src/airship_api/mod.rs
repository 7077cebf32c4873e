pub mod builder;
pub mod classifier;
pub mod client;
pub mod credentials;
pub mod error;
pub mod pagination;
pub mod transport;
pub mod types;

pub const API_BASE_URL: &str = "https://go.urbanairship.com";

/// Endpoint paths, relative to the base URL.
mod paths {
    use urlencoding::encode;

    pub const PUSH: &str = "/api/push/";
    pub const BATCH_PUSH: &str = "/api/push/batch/";
    pub const BROADCAST: &str = "/api/push/broadcast/";

    pub fn device_token(device_token: &str) -> String {
        format!("/api/device_tokens/{}", encode(device_token))
    }

    pub fn device_tokens_page(page: Option<u32>) -> String {
        format!("/api/device_tokens/?page={}", page_param(page))
    }

    pub fn apid(apid: &str) -> String {
        format!("/api/apids/{}", encode(apid))
    }

    pub fn apids_page(page: Option<u32>) -> String {
        format!("/api/apids/?page={}", page_param(page))
    }

    /// `since` must already be an ISO-8601 timestamp.
    pub fn feedback(since: &str) -> String {
        format!("/api/device_tokens/feedback/?since={}", encode(since))
    }

    /// An empty name addresses the tag collection.
    pub fn tag(name: &str) -> String {
        format!("/api/tags/{}", encode(name))
    }

    /// An empty tag name addresses the device's tag collection.
    pub fn device_tag(device_token: &str, tag_name: &str) -> String {
        format!("{}/tags/{}", self::device_token(device_token), encode(tag_name))
    }

    fn page_param(page: Option<u32>) -> String {
        page.map(|p| p.to_string()).unwrap_or_default()
    }
}
