//! Integration tests for the table surface.
//!
//! These tests drive [`list_rows`] and [`get_row`] end to end against a mock
//! Admin API and check the extra columns each table adds.

use serde_json::{json, Value};
use shopify_tables::engine::{CollectingSink, StopReason};
use shopify_tables::{
    get_row, list_rows, ApiBaseUrl, Connection, ConnectionConfig, CredentialDefaults, Error,
    RetryPolicy, Table, TableError, TableOptions,
};
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API: &str = "/admin/api/2025-10";

/// Creates a connection pointed at the mock server.
fn create_test_connection(server: &MockServer) -> Connection {
    let config = ConnectionConfig::builder()
        .token("shpat_test")
        .shop_name("test-shop")
        .api_base_url(ApiBaseUrl::new(server.uri()).unwrap())
        .retry(RetryPolicy::no_retry())
        .build();
    Connection::with_defaults("shopify", config, CredentialDefaults::default())
}

async fn mount_json(server: &MockServer, url_path: String, body: Value, times: u64) {
    Mock::given(method("GET"))
        .and(path(url_path))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(times)
        .mount(server)
        .await;
}

async fn mount_shop(server: &MockServer) {
    mount_json(
        server,
        format!("{API}/shop.json"),
        json!({ "shop": { "name": "Snowdevil" } }),
        1,
    )
    .await;
}

// ============================================================================
// Listing
// ============================================================================

#[tokio::test]
async fn test_order_rows_request_any_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{API}/orders.json")))
        .and(query_param("status", "any"))
        .and(query_param("limit", "250"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "orders": [
                { "id": 1, "name": "#1001", "financial_status": "paid" },
                { "id": 2, "name": "#1002", "financial_status": "refunded" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let connection = create_test_connection(&server);
    let mut sink = CollectingSink::unbounded();

    let outcome = list_rows(
        &connection,
        Table::Order,
        &TableOptions::default(),
        &mut sink,
        &CancellationToken::new(),
    )
    .await
    .unwrap();

    assert_eq!(outcome.emitted, 2);
    let rows = sink.into_items();
    assert_eq!(rows[1]["name"], "#1002");
    assert!(rows[0].get("shop_name").is_none());
}

#[tokio::test]
async fn test_custom_collection_rows_carry_shop_name_and_metafields() {
    let server = MockServer::start().await;

    mount_shop(&server).await;
    mount_json(
        &server,
        format!("{API}/custom_collections.json"),
        json!({ "custom_collections": [
            { "id": 100, "title": "Summer" },
            { "id": 101, "title": "Winter" }
        ] }),
        1,
    )
    .await;
    mount_json(
        &server,
        format!("{API}/collections/100/metafields.json"),
        json!({ "metafields": [{ "id": 9, "namespace": "custom", "key": "season", "value": "hot" }] }),
        1,
    )
    .await;
    mount_json(
        &server,
        format!("{API}/collections/101/metafields.json"),
        json!({ "metafields": [] }),
        1,
    )
    .await;

    let connection = create_test_connection(&server);
    let mut sink = CollectingSink::unbounded();
    let options = TableOptions {
        metafields: true,
        ..Default::default()
    };

    list_rows(
        &connection,
        Table::CustomCollection,
        &options,
        &mut sink,
        &CancellationToken::new(),
    )
    .await
    .unwrap();

    let rows = sink.into_items();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|row| row["shop_name"] == "Snowdevil"));
    assert_eq!(rows[0]["metafields"][0]["key"], "season");
    assert_eq!(rows[1]["metafields"], json!([]));
}

#[tokio::test]
async fn test_metafields_are_only_fetched_for_emitted_rows() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{API}/products.json")))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "products": [{ "id": 1, "title": "Towel" }]
        })))
        .expect(1)
        .mount(&server)
        .await;
    mount_json(
        &server,
        format!("{API}/products/1/metafields.json"),
        json!({ "metafields": [] }),
        1,
    )
    .await;

    let connection = create_test_connection(&server);
    let mut sink = CollectingSink::with_budget(Some(1));
    let options = TableOptions {
        metafields: true,
        ..Default::default()
    };

    let outcome = list_rows(
        &connection,
        Table::Product,
        &options,
        &mut sink,
        &CancellationToken::new(),
    )
    .await
    .unwrap();

    assert_eq!(outcome.stop, StopReason::BudgetReached);
    assert_eq!(sink.items()[0]["title"], "Towel");
}

#[tokio::test]
async fn test_collection_product_rows_name_their_collection() {
    let server = MockServer::start().await;

    mount_shop(&server).await;
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
        json!({ "smart_collections": [] }),
        1,
    )
    .await;
    mount_json(
        &server,
        format!("{API}/collections/100/products.json"),
        json!({ "products": [{ "id": 5, "title": "Beach Towel", "vendor": "Acme" }] }),
        1,
    )
    .await;

    let connection = create_test_connection(&server);
    let mut sink = CollectingSink::unbounded();

    list_rows(
        &connection,
        Table::CollectionProduct,
        &TableOptions::default(),
        &mut sink,
        &CancellationToken::new(),
    )
    .await
    .unwrap();

    let rows = sink.into_items();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["collection_id"], 100);
    assert_eq!(rows[0]["collection_title"], "Summer");
    assert_eq!(rows[0]["product_id"], 5);
    assert_eq!(rows[0]["product_title"], "Beach Towel");
    assert_eq!(rows[0]["vendor"], "Acme");
    assert_eq!(rows[0]["shop_name"], "Snowdevil");
}

#[tokio::test]
async fn test_zero_budget_makes_no_remote_call() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let connection = create_test_connection(&server);
    let mut sink = CollectingSink::with_budget(Some(0));

    let outcome = list_rows(
        &connection,
        Table::SmartCollection,
        &TableOptions::default(),
        &mut sink,
        &CancellationToken::new(),
    )
    .await
    .unwrap();

    assert_eq!(outcome.stop, StopReason::BudgetReached);
}

// ============================================================================
// Get by Id
// ============================================================================

#[tokio::test]
async fn test_get_row_returns_theme() {
    let server = MockServer::start().await;

    mount_json(
        &server,
        format!("{API}/themes/828155753.json"),
        json!({ "theme": { "id": 828_155_753, "name": "Comfort", "role": "main" } }),
        1,
    )
    .await;

    let connection = create_test_connection(&server);
    let row = get_row(&connection, Table::Theme, 828_155_753, &TableOptions::default())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(row["name"], "Comfort");
    assert_eq!(row["role"], "main");
}

#[tokio::test]
async fn test_get_row_not_found_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{API}/customers/42.json")))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "errors": "Not Found" })))
        .expect(1)
        .mount(&server)
        .await;

    let connection = create_test_connection(&server);
    let row = get_row(&connection, Table::Customer, 42, &TableOptions::default())
        .await
        .unwrap();

    assert!(row.is_none());
}

#[tokio::test]
async fn test_get_row_without_key_column_fails_fast() {
    let server = MockServer::start().await;
    let connection = create_test_connection(&server);

    let result = get_row(
        &connection,
        Table::CollectionProduct,
        1,
        &TableOptions::default(),
    )
    .await;

    assert!(matches!(
        result,
        Err(Error::Table(TableError::NoKeyColumn {
            table: "shopify_collection_product"
        }))
    ));
}
