//! Integration tests for `StorefrontClient::fetch_featured_products`.
//!
//! Uses `wiremock` to stand up a local GraphQL endpoint for each test so no
//! real network traffic is made. Covers the happy path, request shape, the
//! revalidation window, and every failure kind the client surfaces.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shelfshop_catalog::{CatalogClient, CatalogError, StorefrontClient};

const GRAPHQL_PATH: &str = "/api/2024-10/graphql.json";

/// Builds a client against the mock server: 5-second timeout, caching disabled.
fn test_client(server: &MockServer) -> StorefrontClient {
    test_client_with(server, 5, 0)
}

fn test_client_with(server: &MockServer, timeout_secs: u64, revalidate_secs: u64) -> StorefrontClient {
    StorefrontClient::with_endpoint(
        &format!("{}{GRAPHQL_PATH}", server.uri()),
        "test-token",
        timeout_secs,
        "shelfshop-test/0.1",
        revalidate_secs,
    )
    .expect("failed to build test StorefrontClient")
}

fn node(id: &str, title: &str) -> serde_json::Value {
    json!({
        "node": {
            "id": id,
            "title": title,
            "handle": title.to_lowercase().replace(' ', "-"),
            "productType": "",
            "tags": ["oak"],
            "description": "",
            "featuredImage": null,
            "images": { "edges": [] },
            "priceRange": { "minVariantPrice": { "amount": "99.0", "currencyCode": "USD" } }
        }
    })
}

fn products_body(nodes: &[serde_json::Value]) -> serde_json::Value {
    json!({ "data": { "products": { "edges": nodes } } })
}

// ---------------------------------------------------------------------------
// Happy paths
// ---------------------------------------------------------------------------

#[tokio::test]
async fn returns_normalized_products_in_source_order() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(products_body(&[
            node("gid://shopify/Product/3", "Corner Shelf"),
            node("gid://shopify/Product/1", "Closet Tower"),
            node("gid://shopify/Product/2", "Spice Rack"),
        ])))
        .mount(&server)
        .await;

    let products = test_client(&server)
        .fetch_featured_products(12)
        .await
        .expect("fetch should succeed");

    let ids: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "gid://shopify/Product/3",
            "gid://shopify/Product/1",
            "gid://shopify/Product/2"
        ]
    );
    assert_eq!(products[0].handle, "corner-shelf");
    assert_eq!(products[0].product_type, "Shelving");
    assert!(products[0].price.is_some());
}

#[tokio::test]
async fn sends_token_header_and_first_variable() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(header("X-Shopify-Storefront-Access-Token", "test-token"))
        .and(header("content-type", "application/json"))
        .and(body_partial_json(json!({ "variables": { "first": 6 } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(products_body(&[])))
        .expect(1)
        .mount(&server)
        .await;

    let products = test_client(&server)
        .fetch_featured_products(6)
        .await
        .expect("fetch should succeed");
    assert!(products.is_empty());

    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 1);
    assert!(
        !requests[0].url.as_str().contains("test-token"),
        "token must not appear in the URL"
    );
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).expect("json body");
    assert!(body["query"]
        .as_str()
        .expect("query string")
        .contains("sortKey: UPDATED_AT, reverse: true"));
}

#[tokio::test]
async fn truncates_to_requested_count() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(products_body(&[
            node("1", "A"),
            node("2", "B"),
            node("3", "C"),
        ])))
        .mount(&server)
        .await;

    let products = test_client(&server)
        .fetch_featured_products(2)
        .await
        .expect("fetch should succeed");
    assert_eq!(products.len(), 2);
    assert_eq!(products[1].id, "2");
}

async fn protocol_error_for_errors_payload(errors: serde_json::Value) -> CatalogError {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "products": { "edges": [node("1", "A")] } },
            "errors": errors
        })))
        .mount(&server)
        .await;

    test_client(&server)
        .fetch_featured_products(12)
        .await
        .expect_err("any errors payload should fail")
}

#[tokio::test]
async fn empty_errors_array_is_protocol_error() {
    let err = protocol_error_for_errors_payload(json!([])).await;
    assert!(
        matches!(err, CatalogError::Protocol { ref errors } if errors == "[]"),
        "expected Protocol, got: {err:?}"
    );
}

#[tokio::test]
async fn string_errors_payload_is_protocol_error() {
    let err = protocol_error_for_errors_payload(json!("Throttled")).await;
    assert!(
        matches!(err, CatalogError::Protocol { ref errors } if errors == "\"Throttled\""),
        "expected Protocol, got: {err:?}"
    );
}

#[tokio::test]
async fn object_errors_payload_is_protocol_error() {
    let err = protocol_error_for_errors_payload(json!({ "message": "bad" })).await;
    assert!(
        matches!(err, CatalogError::Protocol { ref errors } if errors.contains("\"message\":\"bad\"")),
        "expected Protocol, got: {err:?}"
    );
}

#[tokio::test]
async fn null_errors_is_not_a_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "products": { "edges": [node("1", "A")] } },
            "errors": null
        })))
        .mount(&server)
        .await;

    let products = test_client(&server)
        .fetch_featured_products(12)
        .await
        .expect("null errors should be ignored");
    assert_eq!(products.len(), 1);
}

// ---------------------------------------------------------------------------
// Revalidation window
// ---------------------------------------------------------------------------

#[tokio::test]
async fn reuses_result_inside_revalidation_window() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(products_body(&[node("1", "A")])))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client_with(&server, 5, 60);
    let first = client.fetch_featured_products(12).await.expect("first fetch");
    let second = client.fetch_featured_products(12).await.expect("second fetch");
    assert_eq!(first, second);
}

#[tokio::test]
async fn does_not_cache_failures() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .expect(2)
        .mount(&server)
        .await;

    let client = test_client_with(&server, 5, 60);
    assert!(client.fetch_featured_products(12).await.is_err());
    assert!(client.fetch_featured_products(12).await.is_err());
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn non_success_status_is_transport_error_with_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid API key or access token"))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .fetch_featured_products(12)
        .await
        .expect_err("401 should fail");

    assert_eq!(err.status(), Some(401));
    assert!(
        matches!(err, CatalogError::Transport { status: 401, ref body } if body.contains("Invalid API key")),
        "expected Transport(401), got: {err:?}"
    );
}

#[tokio::test]
async fn graphql_errors_are_protocol_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errors": [{ "message": "Throttled", "extensions": { "code": "THROTTLED" } }]
        })))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .fetch_featured_products(12)
        .await
        .expect_err("GraphQL errors should fail");

    assert!(
        matches!(err, CatalogError::Protocol { ref errors } if errors.contains("THROTTLED")),
        "expected Protocol, got: {err:?}"
    );
}

#[tokio::test]
async fn slow_response_is_timeout_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(products_body(&[]))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let err = test_client_with(&server, 1, 0)
        .fetch_featured_products(12)
        .await
        .expect_err("delayed response should time out");

    assert!(
        matches!(err, CatalogError::Timeout { timeout_secs: 1 }),
        "expected Timeout, got: {err:?}"
    );
}

#[tokio::test]
async fn malformed_body_is_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .fetch_featured_products(12)
        .await
        .expect_err("HTML body should fail");

    assert!(
        matches!(err, CatalogError::Deserialize { .. }),
        "expected Deserialize, got: {err:?}"
    );
}

// ---------------------------------------------------------------------------
// Catalog wrapper
// ---------------------------------------------------------------------------

#[tokio::test]
async fn live_catalog_delegates_to_storefront() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(products_body(&[node("1", "A")])))
        .mount(&server)
        .await;

    let catalog = CatalogClient::live(test_client(&server));
    assert!(catalog.is_configured());
    let products = catalog.fetch_featured_products(12).await.expect("fetch");
    assert_eq!(products.len(), 1);
}
