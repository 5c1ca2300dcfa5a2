//! Integration tests using mock HTTP server
//!
//! Tests the full flow: view-model → HTTP client → JSON decoding → paging

use catalog_pager::connectivity::{ConnectivityObserver, ReachabilityChannel};
use catalog_pager::http::{HttpClient, HttpClientConfig};
use catalog_pager::{Phase, ProductListViewModel};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn catalog(ids: impl IntoIterator<Item = i64>) -> Value {
    let products: Vec<Value> = ids
        .into_iter()
        .map(|id| {
            json!({
                "id": id,
                "title": format!("Product {id}"),
                "price": id as f64 * 1.5,
                "description": "Lorem ipsum",
                "category": "electronics",
                "image": format!("https://example.com/{id}.jpg"),
                "rating": {"rate": 4.1, "count": id * 10}
            })
        })
        .collect();
    Value::Array(products)
}

async fn mount_page(server: &MockServer, limit: u32, body: Value) {
    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param("limit", limit.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

fn view_model_for(server: &MockServer) -> ProductListViewModel {
    let config = HttpClientConfig::builder()
        .base_url(server.uri())
        .token("integration-token")
        .build();
    let client = HttpClient::with_config(config).unwrap();
    ProductListViewModel::new(Arc::new(client), 7)
}

// ============================================================================
// Paging Tests
// ============================================================================

#[tokio::test]
async fn test_paging_until_exhausted() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, 7, catalog(1..=7)).await;
    mount_page(&mock_server, 14, catalog(1..=14)).await;
    mount_page(&mock_server, 28, catalog(1..=20)).await;

    let view_model = view_model_for(&mock_server);

    view_model.load_initial_products().unwrap().await.unwrap();
    assert_eq!(view_model.product_count(), 7);
    assert_eq!(view_model.phase(), Phase::Loaded);

    while let Some(task) = view_model.load_more_products_if_possible() {
        task.await.unwrap();
    }

    assert_eq!(view_model.phase(), Phase::Exhausted);
    assert_eq!(view_model.page_index(), 3);

    let ids: Vec<i64> = view_model.products().iter().map(|p| p.id()).collect();
    assert_eq!(ids, (1..=20).collect::<Vec<_>>());

    let product = view_model.product(3).unwrap();
    assert_eq!(product.title(), "Product 3");
    assert_eq!(product.price(), 4.5);
    assert_eq!(product.rating().map(|r| r.count), Some(30));
}

#[tokio::test]
async fn test_requests_carry_auth_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .and(header("Authorization", "Bearer integration-token"))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(catalog(1..=2)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let view_model = view_model_for(&mock_server);
    view_model.load_initial_products().unwrap().await.unwrap();

    assert_eq!(view_model.product_count(), 2);
    assert_eq!(view_model.phase(), Phase::Exhausted);
}

#[tokio::test]
async fn test_nullable_fields_end_to_end() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        7,
        json!([
            {"id": 1, "title": null, "price": null, "rating": {"rate": 3.0}},
            {"id": 2}
        ]),
    )
    .await;

    let view_model = view_model_for(&mock_server);
    view_model.load_initial_products().unwrap().await.unwrap();

    let products = view_model.products();
    assert_eq!(products.len(), 2);
    assert_eq!(products[0].title(), "N/A");
    assert_eq!(products[0].price(), 0.0);
    assert!(products[0].rating().is_none());
}

// ============================================================================
// Failure Tests
// ============================================================================

#[tokio::test]
async fn test_server_error_then_reconnect_retry() {
    let mock_server = MockServer::start().await;

    // First call fails, every later call succeeds
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, 7, catalog(1..=7)).await;

    let view_model = view_model_for(&mock_server);
    let channel = Arc::new(ReachabilityChannel::new(false));
    let observer = ConnectivityObserver::new(channel.clone());
    view_model.bind_connectivity(&observer);

    view_model.load_initial_products().unwrap().await.unwrap();
    assert_eq!(view_model.phase(), Phase::Failed);
    assert_eq!(view_model.product_count(), 0);

    channel.notify(true);

    let loaded = tokio::time::timeout(Duration::from_secs(5), async {
        while view_model.phase() != Phase::Loaded {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await;
    assert!(loaded.is_ok(), "reload never completed");
    assert_eq!(view_model.product_count(), 7);

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
}

#[tokio::test]
async fn test_malformed_page_keeps_previous_products() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, 7, catalog(1..=7)).await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param("limit", "14"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[{\"id\": 1},"))
        .mount(&mock_server)
        .await;

    let view_model = view_model_for(&mock_server);
    view_model.load_initial_products().unwrap().await.unwrap();
    view_model
        .load_more_products_if_possible()
        .unwrap()
        .await
        .unwrap();

    assert_eq!(view_model.phase(), Phase::Failed);
    assert_eq!(view_model.product_count(), 7);
    assert!(view_model.has_more());
}
