//! Endpoint service tests against a wiremock server.

use assert2::{check, let_assert};
use b2brouter::{
    ApiErrorKind, B2BRouterClient, ClientConfig, DocumentFormat, Error, HyperClient, Params,
    to_params,
};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path, query_param},
};

fn client_for(server: &MockServer) -> B2BRouterClient {
    let config = ClientConfig::builder()
        .api_key("test-key")
        .api_base(server.uri())
        .build()
        .expect("config");
    B2BRouterClient::with_transport(config, HyperClient::new())
}

fn params(value: serde_json::Value) -> Params {
    to_params(&value).expect("params")
}

#[tokio::test]
async fn invoices_create_posts_to_account() {
    let mock_server = MockServer::start().await;
    let payload = json!({
        "invoice": { "number": "INV-2025-0001", "currency": "EUR" },
        "send_after_import": false
    });

    Mock::given(method("POST"))
        .and(path("/accounts/211162/invoices"))
        .and(body_json(&payload))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({ "id": 77, "number": "INV-2025-0001", "state": "new" })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let invoice = client
        .invoices()
        .create("211162", &params(payload))
        .await
        .expect("invoice");

    check!(invoice["id"] == 77);
    check!(invoice["state"] == "new");
}

#[tokio::test]
async fn invoices_crud_paths() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/invoices/77"))
        .and(query_param("include", "lines"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 77 })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/invoices/77"))
        .and(body_json(json!({ "invoice": { "extra_info": "paid" } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 77 })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/invoices/77"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/invoices/send_invoice/77"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "state": "sent" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let invoices = client.invoices();

    let retrieved = invoices
        .retrieve(77, &params(json!({ "include": "lines" })))
        .await
        .expect("retrieve");
    check!(retrieved["id"] == 77);

    invoices
        .update(77, &params(json!({ "invoice": { "extra_info": "paid" } })))
        .await
        .expect("update");

    let deleted = invoices.delete(77).await.expect("delete");
    check!(deleted == json!({}));

    let sent = invoices.send(77).await.expect("send");
    check!(sent["state"] == "sent");
}

#[tokio::test]
async fn invoices_list_encodes_nested_filters() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/accounts/211162/invoices"))
        .and(query_param("filter[state]", "sent"))
        .and(query_param("archived", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "invoices": [] })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let list = client
        .invoices()
        .list(
            211_162,
            &params(json!({ "filter": { "state": "sent" }, "archived": false })),
        )
        .await
        .expect("list");

    check!(list["invoices"] == json!([]));
}

#[tokio::test]
async fn invoices_download_formats() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/invoices/77/as/pdf.invoice"))
        .and(header("Accept", "pdf.invoice"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(b"%PDF".to_vec(), "application/pdf"))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/invoices/77/as/xml.ubl.invoice.bis3"))
        .and(header("Accept", "xml.ubl.invoice.bis3"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(b"<Invoice/>".to_vec(), "application/xml"))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/invoices/77/as/xml.facturae.3.2.2"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({ "error": "Format not available for this invoice" })),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let invoices = client.invoices();

    let pdf = invoices
        .download_pdf(77, &Params::new())
        .await
        .expect("pdf");
    check!(&pdf[..] == b"%PDF");

    let ubl = invoices
        .download_as(77, DocumentFormat::UblBis3, &Params::new())
        .await
        .expect("ubl");
    check!(&ubl[..] == b"<Invoice/>");

    let err = invoices
        .download_as(77, "xml.facturae.3.2.2", &Params::new())
        .await
        .expect_err("facturae");
    check!(err.is_not_found());
    let_assert!(Error::Api(api) = err);
    check!(api.message() == "Format not available for this invoice");
}

#[tokio::test]
async fn ids_are_escaped_as_single_segment() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/contacts/a%2Fb"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "a/b" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let contact = client.contacts().retrieve("a/b").await.expect("contact");

    check!(contact["id"] == "a/b");
}

#[tokio::test]
async fn contacts_endpoints() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/accounts/211162/contacts"))
        .and(body_json(json!({ "contact": { "name": "Acme Corporation" } })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 5 })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/accounts/211162/contacts"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "contacts": [] })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/contacts/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 5 })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/contacts/5"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "Invalid API key" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let contacts = client.contacts();

    let created = contacts
        .create(
            "211162",
            &params(json!({ "contact": { "name": "Acme Corporation" } })),
        )
        .await
        .expect("create");
    check!(created["id"] == 5);

    let list = contacts
        .list("211162", &params(json!({ "limit": 10 })))
        .await
        .expect("list");
    check!(list["contacts"] == json!([]));

    contacts
        .update(5, &params(json!({ "contact": { "city": "Madrid" } })))
        .await
        .expect("update");

    let err = contacts.delete(5).await.expect_err("401");
    check!(err.kind() == Some(ApiErrorKind::Authentication));
    check!(err.to_string() == "authentication failed (HTTP 401): Invalid API key");
}
