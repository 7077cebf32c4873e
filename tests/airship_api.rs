use assert_matches::assert_matches;
use bytes::Bytes;
use chrono::DateTime;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path, query_param},
};
use zeppelin::{AirshipClient, AirshipClientBuilder, ApiError, Body, Credentials, ReqwestTransport};

const AUTHORIZATION: &str = "Basic YXBwIGtleTphcHAgbWFzdGVyIHNlY3JldA==";

fn client(server: &MockServer) -> AirshipClient<ReqwestTransport> {
    AirshipClientBuilder::new(Credentials::new("app key", "app master secret"))
        .base_url(server.uri())
        .build()
        .unwrap()
}

#[tokio::test]
async fn register_device_token_with_payload() {
    let server = MockServer::start().await;
    let payload = json!({ "alias": "CapnKernul" });
    Mock::given(method("PUT"))
        .and(path("/api/device_tokens/CAFEBABE"))
        .and(header("authorization", AUTHORIZATION))
        .and(header("content-type", "application/json"))
        .and(body_json(&payload))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .register_device_token("CAFEBABE", Some(&payload))
        .await
        .unwrap();
}

#[tokio::test]
async fn registration_failure_keeps_status() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/device_tokens/CAFEBABE"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let error = client(&server)
        .register_device_token("CAFEBABE", None)
        .await
        .unwrap_err();

    assert_matches!(error, ApiError::ClientError(response) => {
        assert_eq!(response.status.as_u16(), 500);
        assert_eq!(response.body, Bytes::from_static(b"boom"));
    });
}

#[tokio::test]
async fn device_token_decodes_vendor_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/device_tokens/CAFEBABE"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(r#"{"foo":"bar"}"#, "application/vnd.urbanairship+json"),
        )
        .mount(&server)
        .await;

    let body = client(&server).device_token("CAFEBABE").await.unwrap();

    assert_eq!(body, Some(Body::Json(json!({ "foo": "bar" }))));
}

#[tokio::test]
async fn not_found_keeps_headers_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/tags/cats.pajamas"))
        .respond_with(
            ResponseTemplate::new(404)
                .insert_header("X-Reason", "because")
                .set_body_string("keep looking"),
        )
        .mount(&server)
        .await;

    let error = client(&server).remove_tag("cats.pajamas").await.unwrap_err();

    assert_matches!(error, ApiError::NotFound(response) => {
        assert_eq!(response.headers.get("x-reason").unwrap(), "because");
        assert_eq!(response.body, Bytes::from_static(b"keep looking"));
    });
}

#[tokio::test]
async fn feedback_sends_iso8601_since() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/device_tokens/feedback/"))
        .and(query_param("since", "1970-01-01T00:00:00Z"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "device_token": "CAFEBABE", "marked_inactive_on": "2009-06-22 10:05:00", "alias": null }
        ])))
        .mount(&server)
        .await;

    let body = client(&server)
        .feedback(DateTime::from_timestamp(0, 0).unwrap())
        .await
        .unwrap()
        .and_then(Body::into_json)
        .unwrap();

    assert_eq!(body[0]["device_token"], "CAFEBABE");
}

#[tokio::test]
async fn device_tokens_normalizes_next_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/device_tokens/"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "device_tokens": [],
            "next_page": format!("{}/api/device_tokens/?page=4&limit=5000", server.uri())
        })))
        .mount(&server)
        .await;

    let body = client(&server)
        .device_tokens(Some(3))
        .await
        .unwrap()
        .and_then(Body::into_json)
        .unwrap();

    assert_eq!(body["next_page"], json!(4));
}

#[tokio::test]
async fn batch_push_posts_json_array() {
    let server = MockServer::start().await;
    let messages = vec![
        json!({ "device_tokens": ["CAFEBABE"], "aps": { "alert": "one" } }),
        json!({ "device_tokens": [], "aps": { "alert": "two" } }),
    ];
    Mock::given(method("POST"))
        .and(path("/api/push/batch/"))
        .and(body_json(&messages))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client(&server).batch_push(&messages).await.unwrap();
}

#[tokio::test]
async fn plain_text_success_body_is_raw() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tags/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<hello>world</hello>", "text/xml"))
        .mount(&server)
        .await;

    let body = client(&server).tags().await.unwrap();

    assert_eq!(body, Some(Body::Raw(Bytes::from_static(b"<hello>world</hello>"))));
}
