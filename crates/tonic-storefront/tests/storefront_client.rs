//! Integration tests for `StorefrontClient`.
//!
//! Uses `wiremock` to stand up a local GraphQL endpoint for each test so no
//! real network traffic is made. Covers catalog reads, cart queries and
//! mutations, and every error variant `execute` can produce.

use serde_json::json;
use wiremock::matchers::{body_partial_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tonic_storefront::{CartLineInput, CartLineUpdate, StorefrontClient, StorefrontError};

const GRAPHQL_PATH: &str = "/api/2024-01/graphql.json";

fn test_client(server: &MockServer) -> StorefrontClient {
    StorefrontClient::with_endpoint(
        "test-token",
        5,
        "tonic-test/0.1",
        &format!("{}{GRAPHQL_PATH}", server.uri()),
    )
    .expect("failed to build test StorefrontClient")
}

fn product_node(handle: &str, tags: &[&str], product_type: &str) -> serde_json::Value {
    json!({
        "id": format!("gid://shopify/Product/{handle}"),
        "handle": handle,
        "title": "Sacred Geometry I",
        "description": "A study in fundamental geometric relationships.",
        "tags": tags,
        "productType": product_type,
        "createdAt": "2025-05-01T12:00:00Z",
        "priceRange": {
            "minVariantPrice": { "amount": "45.0", "currencyCode": "USD" },
            "maxVariantPrice": { "amount": "45.0", "currencyCode": "USD" }
        },
        "compareAtPriceRange": {
            "minVariantPrice": { "amount": "0.0", "currencyCode": "USD" }
        },
        "featuredImage": null,
        "images": { "edges": [] },
        "variants": { "edges": [ { "node": {
            "id": format!("gid://shopify/ProductVariant/{handle}-1"),
            "title": "8×10",
            "availableForSale": true,
            "price": { "amount": "45.0", "currencyCode": "USD" },
            "compareAtPrice": null,
            "selectedOptions": [ { "name": "Size", "value": "8×10" } ]
        } } ] },
        "options": [ { "name": "Size", "values": ["8×10"] } ]
    })
}

fn cart_node(id: &str, lines: &[(&str, u32)]) -> serde_json::Value {
    let edges: Vec<_> = lines
        .iter()
        .map(|(line_id, quantity)| {
            json!({ "node": {
                "id": line_id,
                "quantity": quantity,
                "merchandise": {
                    "id": "gid://shopify/ProductVariant/1",
                    "title": "M / Black",
                    "price": { "amount": "38.0", "currencyCode": "USD" },
                    "product": {
                        "title": "Frequency Tee",
                        "handle": "frequency-tee",
                        "featuredImage": null
                    },
                    "selectedOptions": [
                        { "name": "Size", "value": "M" },
                        { "name": "Color", "value": "Black" }
                    ]
                }
            } })
        })
        .collect();
    let total: u32 = lines.iter().map(|(_, q)| q).sum();
    json!({
        "id": id,
        "checkoutUrl": format!("https://studio.example.com/cart/c/{id}"),
        "totalQuantity": total,
        "cost": {
            "subtotalAmount": { "amount": format!("{}.0", 38 * total), "currencyCode": "USD" },
            "totalAmount": { "amount": format!("{}.0", 38 * total), "currencyCode": "USD" }
        },
        "lines": { "edges": edges }
    })
}

// ---------------------------------------------------------------------------
// Request shape
// ---------------------------------------------------------------------------

#[tokio::test]
async fn requests_send_token_header_and_variables() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(header("X-Shopify-Storefront-Access-Token", "test-token"))
        .and(header("content-type", "application/json"))
        .and(body_string_contains("query GetAllProducts"))
        .and(body_partial_json(json!({ "variables": { "first": 50 } })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": { "products": { "edges": [] } } })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let products = test_client(&server).list_products(50).await;
    assert!(products.is_ok(), "expected Ok, got: {products:?}");
    assert!(products.unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_products_parses_nested_connections() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_string_contains("GetAllProducts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "products": { "edges": [
                { "node": product_node("sacred-geometry-i", &["prints"], "Print") },
                { "node": product_node("geometric-hoodie", &[], "Hoodie") }
            ] } }
        })))
        .mount(&server)
        .await;

    let products = test_client(&server).list_products(50).await.unwrap();
    assert_eq!(products.len(), 2);
    assert_eq!(products[0].handle, "sacred-geometry-i");
    assert_eq!(products[0].variants.len(), 1);
    assert_eq!(products[1].product_type, "Hoodie");
}

#[tokio::test]
async fn product_by_handle_returns_product() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_string_contains("GetProductByHandle"))
        .and(body_partial_json(json!({ "variables": { "handle": "portal-series" } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "product": product_node("portal-series", &["prints"], "Print") }
        })))
        .mount(&server)
        .await;

    let product = test_client(&server)
        .product_by_handle("portal-series")
        .await
        .unwrap()
        .expect("product should be present");
    assert_eq!(product.handle, "portal-series");
}

#[tokio::test]
async fn product_by_handle_returns_none_for_null_product() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "product": null } })))
        .mount(&server)
        .await;

    let product = test_client(&server).product_by_handle("missing").await.unwrap();
    assert!(product.is_none());
}

#[tokio::test]
async fn collection_products_returns_collection_and_products() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_string_contains("GetProductsByCollection"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "collection": {
                "id": "gid://shopify/Collection/1",
                "handle": "editions",
                "title": "Editions",
                "description": "Prints and objects",
                "image": null,
                "products": { "edges": [
                    { "node": product_node("sacred-geometry-i", &["prints"], "Print") }
                ] }
            } }
        })))
        .mount(&server)
        .await;

    let result = test_client(&server)
        .collection_products("editions", 50)
        .await
        .unwrap()
        .expect("collection should be present");
    assert_eq!(result.collection.handle, "editions");
    assert_eq!(result.products.len(), 1);
}

#[tokio::test]
async fn list_collections_parses_nodes() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_string_contains("GetAllCollections"))
        .and(body_partial_json(json!({ "variables": { "first": 20 } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "collections": { "edges": [
                { "node": {
                    "id": "gid://shopify/Collection/1",
                    "handle": "originals",
                    "title": "Originals",
                    "description": "",
                    "image": { "url": "https://cdn.example.com/o.jpg", "altText": null, "width": null, "height": null }
                } }
            ] } }
        })))
        .mount(&server)
        .await;

    let collections = test_client(&server).list_collections(20).await.unwrap();
    assert_eq!(collections.len(), 1);
    assert_eq!(collections[0].title, "Originals");
    assert!(collections[0].image.is_some());
}

// ---------------------------------------------------------------------------
// Cart
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_cart_returns_empty_cart() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_string_contains("CreateCart"))
        .and(body_partial_json(json!({ "variables": { "lines": [] } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "cartCreate": { "cart": cart_node("cart-1", &[]), "userErrors": [] } }
        })))
        .mount(&server)
        .await;

    let mutation = test_client(&server).create_cart().await.unwrap();
    assert!(!mutation.is_rejected());
    let cart = mutation.cart.expect("cart should be present");
    assert_eq!(cart.id, "cart-1");
    assert!(cart.is_empty());
}

#[tokio::test]
async fn get_cart_returns_none_when_cart_expired() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_string_contains("GetCart"))
        .and(body_partial_json(json!({ "variables": { "cartId": "old-cart" } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "cart": null } })))
        .mount(&server)
        .await;

    let cart = test_client(&server).get_cart("old-cart").await.unwrap();
    assert!(cart.is_none());
}

#[tokio::test]
async fn add_lines_sends_merchandise_and_returns_snapshot() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_string_contains("AddToCart"))
        .and(body_partial_json(json!({ "variables": {
            "cartId": "cart-1",
            "lines": [ { "merchandiseId": "gid://shopify/ProductVariant/1", "quantity": 2 } ]
        } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "cartLinesAdd": { "cart": cart_node("cart-1", &[("line-1", 2)]), "userErrors": [] } }
        })))
        .mount(&server)
        .await;

    let mutation = test_client(&server)
        .add_lines(
            "cart-1",
            &[CartLineInput {
                merchandise_id: "gid://shopify/ProductVariant/1".to_string(),
                quantity: 2,
            }],
        )
        .await
        .unwrap();
    let cart = mutation.cart.unwrap();
    assert_eq!(cart.total_quantity, 2);
    assert_eq!(cart.lines[0].merchandise.options_label(), "M / Black");
    assert_eq!(cart.cost.subtotal.amount.to_string(), "76.0");
}

#[tokio::test]
async fn update_lines_surfaces_user_errors() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_string_contains("UpdateCartLine"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "cartLinesUpdate": {
                "cart": cart_node("cart-1", &[("line-1", 1)]),
                "userErrors": [ { "field": ["lines", "0", "quantity"], "message": "Only 1 left" } ]
            } }
        })))
        .mount(&server)
        .await;

    let mutation = test_client(&server)
        .update_lines(
            "cart-1",
            &[CartLineUpdate {
                id: "line-1".to_string(),
                quantity: 5,
            }],
        )
        .await
        .unwrap();
    assert!(mutation.is_rejected());
    assert_eq!(mutation.user_errors[0].message, "Only 1 left");
    assert_eq!(mutation.user_errors[0].field, vec!["lines", "0", "quantity"]);
}

#[tokio::test]
async fn remove_lines_sends_line_ids() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_string_contains("RemoveFromCart"))
        .and(body_partial_json(json!({ "variables": { "cartId": "cart-1", "lineIds": ["line-1"] } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "cartLinesRemove": { "cart": cart_node("cart-1", &[]), "userErrors": [] } }
        })))
        .mount(&server)
        .await;

    let mutation = test_client(&server)
        .remove_lines("cart-1", &["line-1".to_string()])
        .await
        .unwrap();
    assert!(mutation.cart.unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn non_2xx_status_is_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = test_client(&server).list_products(50).await;
    assert!(
        matches!(result, Err(StorefrontError::UnexpectedStatus { status: 401, .. })),
        "expected UnexpectedStatus(401), got: {result:?}"
    );
}

#[tokio::test]
async fn graphql_errors_are_surfaced() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errors": [ { "message": "Field 'bogus' doesn't exist on type 'Product'" } ]
        })))
        .mount(&server)
        .await;

    let result = test_client(&server).list_products(50).await;
    match result {
        Err(StorefrontError::GraphQl {
            operation,
            messages,
        }) => {
            assert_eq!(operation, "GetAllProducts");
            assert_eq!(messages.len(), 1);
        }
        other => panic!("expected GraphQl error, got: {other:?}"),
    }
}

#[tokio::test]
async fn null_data_is_missing_data() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": null })))
        .mount(&server)
        .await;

    let result = test_client(&server).get_cart("cart-1").await;
    assert!(
        matches!(result, Err(StorefrontError::MissingData { operation: "GetCart" })),
        "expected MissingData, got: {result:?}"
    );
}

#[tokio::test]
async fn non_json_body_is_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let result = test_client(&server).list_products(50).await;
    assert!(
        matches!(result, Err(StorefrontError::Deserialize { .. })),
        "expected Deserialize, got: {result:?}"
    );
}

#[tokio::test]
async fn unexpected_data_shape_fails_closed() {
    let server = MockServer::start().await;

    // `handle` missing from the product node.
    let mut node = product_node("x", &[], "");
    node.as_object_mut().unwrap().remove("handle");

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": { "products": { "edges": [ { "node": node } ] } } })),
        )
        .mount(&server)
        .await;

    let result = test_client(&server).list_products(50).await;
    match result {
        Err(StorefrontError::Deserialize { context, .. }) => {
            assert!(context.contains("GetAllProducts"), "context: {context}");
        }
        other => panic!("expected Deserialize, got: {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_server_is_http_error() {
    // Nothing listens on port 1; the connection is refused.
    let client = StorefrontClient::with_endpoint(
        "test-token",
        5,
        "tonic-test/0.1",
        "http://127.0.0.1:1/api/2024-01/graphql.json",
    )
    .unwrap();

    let result = client.list_products(50).await;
    assert!(
        matches!(result, Err(StorefrontError::Http(_))),
        "expected Http error, got: {result:?}"
    );
}
