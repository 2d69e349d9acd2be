//! Integration tests for `HyperClient` and the request pipeline using wiremock.

use std::time::Duration;

use assert2::{check, let_assert};
use b2brouter::{
    ApiErrorKind, ApiResource, ClientConfig, Error, HttpClient, HyperClient, Method, Params,
    Request, RequestOptions, to_params,
};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path, query_param},
};

fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig::builder()
        .api_key("test-key")
        .api_version("2025-10-13")
        .api_base(server.uri())
        .build()
        .expect("config")
}

fn resource_for(server: &MockServer) -> ApiResource<HyperClient> {
    ApiResource::new(HyperClient::new(), config_for(server))
}

fn params(value: serde_json::Value) -> Params {
    to_params(&value).expect("params")
}

#[tokio::test]
async fn test_raw_transport_returns_error_statuses() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("nope"))
        .mount(&mock_server)
        .await;

    let client = HyperClient::new();
    let url = url::Url::parse(&format!("{}/missing", mock_server.uri())).expect("url");
    let request = Request::builder(Method::Get, url).build();

    let response = client.execute(request).await.expect("response");

    assert_eq!(response.status(), 404);
    assert_eq!(&response.body()[..], b"nope");
}

#[tokio::test]
async fn test_json_get_sends_auth_headers_and_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/accounts/42/invoices"))
        .and(header("X-B2B-API-Key", "test-key"))
        .and(header("X-B2B-API-Version", "2025-10-13"))
        .and(header("Accept", "application/json"))
        .and(query_param("state", "sent"))
        .and(query_param("limit", "25"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "invoices": [] })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let resource = resource_for(&mock_server);
    let value = resource
        .request(
            Method::Get,
            "/accounts/42/invoices",
            &params(json!({ "state": "sent", "limit": 25 })),
            &RequestOptions::default(),
        )
        .await
        .expect("value");

    check!(value == json!({ "invoices": [] }));
}

#[tokio::test]
async fn test_json_post_sends_body() {
    let mock_server = MockServer::start().await;
    let payload = json!({ "invoice": { "number": "INV-1", "currency": "EUR" } });

    Mock::given(method("POST"))
        .and(path("/accounts/42/invoices"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(&payload))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 7 })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let resource = resource_for(&mock_server);
    let value = resource
        .request(
            Method::Post,
            "accounts/42/invoices",
            &params(payload),
            &RequestOptions::default(),
        )
        .await
        .expect("value");

    check!(value["id"] == 7);
}

#[tokio::test]
async fn test_api_base_path_prefix_is_kept() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/invoices/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 3 })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = ClientConfig::builder()
        .api_key("test-key")
        .api_base(format!("{}/api/v1/", mock_server.uri()))
        .build()
        .expect("config");
    let resource = ApiResource::new(HyperClient::new(), config);

    let value = resource
        .request(
            Method::Get,
            "/invoices/3",
            &Params::new(),
            &RequestOptions::default(),
        )
        .await
        .expect("value");

    check!(value["id"] == 3);
}

#[tokio::test]
async fn test_empty_success_body_is_empty_object() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/invoices/9"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let resource = resource_for(&mock_server);
    let value = resource
        .request(
            Method::Delete,
            "/invoices/9",
            &Params::new(),
            &RequestOptions::default(),
        )
        .await
        .expect("value");

    check!(value == json!({}));
}

#[tokio::test]
async fn test_not_found_is_classified_with_message() {
    let mock_server = MockServer::start().await;
    let body = json!({ "error": { "message": "Invoice not found" } });

    Mock::given(method("GET"))
        .and(path("/invoices/404"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(&body)
                .insert_header("X-Request-Id", "req-1"),
        )
        .mount(&mock_server)
        .await;

    let resource = resource_for(&mock_server);
    let result = resource
        .request(
            Method::Get,
            "/invoices/404",
            &Params::new(),
            &RequestOptions::default(),
        )
        .await;

    let_assert!(Err(Error::Api(api)) = result);
    check!(api.kind() == ApiErrorKind::NotFound);
    check!(api.status() == 404);
    check!(api.message() == "Invoice not found");
    check!(api.json_body() == Some(&body));
    check!(api.header("x-request-id") == Some("req-1"));
}

#[tokio::test]
async fn test_unprocessable_entity_is_invalid_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/accounts/42/invoices"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({ "message": "Number is taken" })),
        )
        .mount(&mock_server)
        .await;

    let resource = resource_for(&mock_server);
    let err = resource
        .request(
            Method::Post,
            "/accounts/42/invoices",
            &Params::new(),
            &RequestOptions::default(),
        )
        .await
        .expect_err("422");

    check!(err.kind() == Some(ApiErrorKind::InvalidRequest));
    check!(err.status() == Some(422));
    check!(err.to_string() == "invalid request (HTTP 422): Number is taken");
}

#[tokio::test]
async fn test_binary_download_returns_raw_bytes() {
    let mock_server = MockServer::start().await;
    let pdf = b"%PDF-1.7\n\x00\x01binary".to_vec();

    Mock::given(method("GET"))
        .and(path("/invoices/5/as/pdf.invoice"))
        .and(header("Accept", "pdf.invoice"))
        .and(header("X-B2B-API-Key", "test-key"))
        .and(query_param("lang", "es"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(pdf.clone(), "application/pdf"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let resource = resource_for(&mock_server);
    let bytes = resource
        .request_binary(
            Method::Get,
            "/invoices/5/as/pdf.invoice",
            "pdf.invoice",
            &params(json!({ "lang": "es" })),
            &RequestOptions::default(),
        )
        .await
        .expect("bytes");

    check!(&bytes[..] == pdf.as_slice());
}

#[tokio::test]
async fn test_binary_download_error_is_classified() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/invoices/5/as/pdf.invoice"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
        .mount(&mock_server)
        .await;

    let resource = resource_for(&mock_server);
    let err = resource
        .request_binary(
            Method::Get,
            "/invoices/5/as/pdf.invoice",
            "pdf.invoice",
            &Params::new(),
            &RequestOptions::default(),
        )
        .await
        .expect_err("401");

    let_assert!(Some(api) = err.api_error());
    check!(api.kind() == ApiErrorKind::Authentication);
    check!(api.message() == "bad key");
    check!(api.json_body().is_none());
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/invoices/1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "id": 1 }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let config = ClientConfig::builder()
        .api_key("test-key")
        .api_base(mock_server.uri())
        .timeout(Duration::from_millis(100))
        .build()
        .expect("config");
    let resource = ApiResource::new(HyperClient::new(), config);

    let err = resource
        .request(
            Method::Get,
            "/invoices/1",
            &Params::new(),
            &RequestOptions::default(),
        )
        .await
        .expect_err("timeout");

    check!(err.is_timeout());
    check!(err.is_transport());
    check!(err.api_error().is_none());
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let config = ClientConfig::builder()
        .api_key("test-key")
        .api_base(format!("http://{addr}"))
        .build()
        .expect("config");
    let resource = ApiResource::new(HyperClient::new(), config);

    let err = resource
        .request(
            Method::Get,
            "/invoices/1",
            &Params::new(),
            &RequestOptions::default(),
        )
        .await
        .expect_err("refused");

    check!(err.is_connection());
    check!(err.status().is_none());
}

#[tokio::test]
async fn test_logging_layer_keeps_pipeline_behavior() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/invoices/1"))
        .and(header("X-B2B-API-Key", "test-key"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({ "error": "forbidden" })))
        .mount(&mock_server)
        .await;

    let client = HyperClient::builder().with_debug_logging().build();
    let resource = ApiResource::new(client, config_for(&mock_server));

    let err = resource
        .request(
            Method::Get,
            "/invoices/1",
            &Params::new(),
            &RequestOptions::default(),
        )
        .await
        .expect_err("403");

    check!(err.kind() == Some(ApiErrorKind::Permission));
    check!(err.api_error().map(b2brouter::ApiError::message) == Some("forbidden"));
}
