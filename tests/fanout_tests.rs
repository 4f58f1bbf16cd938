//! Integration tests for parent/child fan-out.
//!
//! These tests verify that parents never count against the row budget, that
//! listing stops as soon as the budget is spent, and that children reachable
//! from several parents are emitted once per parent.

use std::time::Duration;

use serde_json::json;
use shopify_tables::engine::{
    fan_out, ChildLister, CollectingSink, CollectionKind, CollectionLister, Parent,
    ProductParents, StopReason,
};
use shopify_tables::rest::resources::{Product, ProductListParams, Variant, VariantListParams};
use shopify_tables::rest::ResourceError;
use shopify_tables::{ApiBaseUrl, ConnectionConfig, CredentialDefaults, RestClient, RetryPolicy};
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API: &str = "/admin/api/2025-10";

/// Creates a REST client pointed at the mock server.
fn create_test_client(server: &MockServer) -> RestClient {
    let config = ConnectionConfig::builder()
        .token("shpat_test")
        .shop_name("test-shop")
        .api_base_url(ApiBaseUrl::new(server.uri()).unwrap())
        .retry(RetryPolicy::no_retry())
        .build();
    let credentials = config.resolve(&CredentialDefaults::default()).unwrap();
    RestClient::new(&credentials, &config).unwrap()
}

async fn mount_json(server: &MockServer, url_path: String, body: serde_json::Value, times: u64) {
    Mock::given(method("GET"))
        .and(path(url_path))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(times)
        .mount(server)
        .await;
}

fn variants(product_id: u64, ids: &[u64]) -> serde_json::Value {
    let variants: Vec<_> = ids
        .iter()
        .map(|id| json!({ "id": id, "product_id": product_id, "title": format!("Variant {id}") }))
        .collect();
    json!({ "variants": variants })
}

// ============================================================================
// Product Variants
// ============================================================================

#[tokio::test]
async fn test_budget_three_over_two_parents_with_two_children() {
    let server = MockServer::start().await;

    // A second parent page exists but must never be requested.
    Mock::given(method("GET"))
        .and(path(format!("{API}/products.json")))
        .and(query_param("page_info", "more-products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "products": [] })))
        .expect(0)
        .mount(&server)
        .await;

    let link = format!(
        "<{}{API}/products.json?limit=250&page_info=more-products>; rel=\"next\"",
        server.uri()
    );
    Mock::given(method("GET"))
        .and(path(format!("{API}/products.json")))
        .and(query_param("limit", "250"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "products": [{ "id": 1 }, { "id": 2 }] }))
                .insert_header("Link", link.as_str()),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("{API}/products/1/variants.json")))
        .and(query_param("limit", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(variants(1, &[11, 12])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("{API}/products/2/variants.json")))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(variants(2, &[21, 22])))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let params = VariantListParams::default();
    let mut sink = CollectingSink::with_budget(Some(3));

    let outcome = fan_out(
        &ProductParents::new(&client),
        |parent| ChildLister::<Variant>::for_parent(&client, parent, &params),
        &mut sink,
        &CancellationToken::new(),
    )
    .await
    .unwrap();

    let pairs: Vec<(Option<u64>, Option<u64>)> = sink
        .items()
        .iter()
        .map(|pair| (pair.parent.id(), pair.child.id))
        .collect();
    assert_eq!(
        pairs,
        vec![(Some(1), Some(11)), (Some(1), Some(12)), (Some(2), Some(21))]
    );
    assert_eq!(outcome.emitted, 3);
    assert_eq!(outcome.stop, StopReason::BudgetReached);
}

#[tokio::test]
async fn test_parent_without_id_is_skipped() {
    let server = MockServer::start().await;

    mount_json(
        &server,
        format!("{API}/products.json"),
        json!({ "products": [{ "title": "no id" }, { "id": 7 }] }),
        1,
    )
    .await;
    mount_json(&server, format!("{API}/products/7/variants.json"), variants(7, &[70]), 1).await;

    let client = create_test_client(&server);
    let params = VariantListParams::default();
    let mut sink = CollectingSink::unbounded();

    let outcome = fan_out(
        &ProductParents::new(&client),
        |parent| ChildLister::<Variant>::for_parent(&client, parent, &params),
        &mut sink,
        &CancellationToken::new(),
    )
    .await
    .unwrap();

    assert_eq!(outcome.emitted, 1);
    assert_eq!(outcome.stop, StopReason::Exhausted);
}

#[tokio::test]
async fn test_child_failure_aborts_and_keeps_earlier_pairs() {
    let server = MockServer::start().await;

    mount_json(
        &server,
        format!("{API}/products.json"),
        json!({ "products": [{ "id": 1 }, { "id": 2 }, { "id": 3 }] }),
        1,
    )
    .await;
    mount_json(&server, format!("{API}/products/1/variants.json"), variants(1, &[11]), 1).await;

    Mock::given(method("GET"))
        .and(path(format!("{API}/products/2/variants.json")))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "errors": "Not Found" })))
        .expect(1)
        .mount(&server)
        .await;

    mount_json(&server, format!("{API}/products/3/variants.json"), variants(3, &[31]), 0).await;

    let client = create_test_client(&server);
    let params = VariantListParams::default();
    let mut sink = CollectingSink::unbounded();

    let result = fan_out(
        &ProductParents::new(&client),
        |parent| ChildLister::<Variant>::for_parent(&client, parent, &params),
        &mut sink,
        &CancellationToken::new(),
    )
    .await;

    assert!(matches!(result, Err(ResourceError::NotFound { .. })));
    assert_eq!(sink.items().len(), 1);
}

// ============================================================================
// Collection Products
// ============================================================================

#[tokio::test]
async fn test_collections_chain_custom_then_smart_without_dedup() {
    let server = MockServer::start().await;

    mount_json(
        &server,
        format!("{API}/custom_collections.json"),
        json!({ "custom_collections": [{ "id": 100, "title": "Summer" }] }),
        1,
    )
    .await;
    mount_json(
        &server,
        format!("{API}/smart_collections.json"),
        json!({ "smart_collections": [{ "id": 200, "title": "On Sale" }] }),
        1,
    )
    .await;

    let shared = json!({ "products": [{ "id": 5, "title": "Beach Towel" }] });
    mount_json(&server, format!("{API}/collections/100/products.json"), shared.clone(), 1).await;
    mount_json(&server, format!("{API}/collections/200/products.json"), shared, 1).await;

    let client = create_test_client(&server);
    let params = ProductListParams::default();
    let mut sink = CollectingSink::unbounded();

    let outcome = fan_out(
        &CollectionLister::new(&client),
        |parent| ChildLister::<Product>::for_parent(&client, parent, &params),
        &mut sink,
        &CancellationToken::new(),
    )
    .await
    .unwrap();

    assert_eq!(outcome.emitted, 2);

    let kinds: Vec<CollectionKind> = sink
        .items()
        .iter()
        .filter_map(|pair| match &pair.parent {
            Parent::Collection(collection) => Some(collection.kind),
            Parent::Product(_) => None,
        })
        .collect();
    assert_eq!(kinds, vec![CollectionKind::Custom, CollectionKind::Smart]);
    assert!(sink.items().iter().all(|pair| pair.child.id == Some(5)));
}

#[tokio::test]
async fn test_cancel_between_parents_stops_fan_out() {
    let server = MockServer::start().await;

    mount_json(
        &server,
        format!("{API}/products.json"),
        json!({ "products": [{ "id": 1 }, { "id": 2 }] }),
        1,
    )
    .await;

    Mock::given(method("GET"))
        .and(path(format!("{API}/products/1/variants.json")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(variants(1, &[11]))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;
    mount_json(&server, format!("{API}/products/2/variants.json"), variants(2, &[21]), 0).await;

    let client = create_test_client(&server);
    let params = VariantListParams::default();
    let mut sink = CollectingSink::unbounded();
    let cancel = CancellationToken::new();

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let outcome = fan_out(
        &ProductParents::new(&client),
        |parent| ChildLister::<Variant>::for_parent(&client, parent, &params),
        &mut sink,
        &cancel,
    )
    .await
    .unwrap();

    assert_eq!(outcome.stop, StopReason::Cancelled);
    assert!(sink.items().is_empty());
}
