//! Table surface for the query host.
//!
//! Each [`Table`] maps onto one listing strategy of the engine:
//!
//! | Table | Listing |
//! |-------|---------|
//! | `shopify_order` | `orders` with `status=any` |
//! | `shopify_product` | `products` |
//! | `shopify_product_variant` | variants fanned out under every product |
//! | `shopify_custom_collection` | `custom_collections` |
//! | `shopify_smart_collection` | `smart_collections` |
//! | `shopify_collection_product` | products fanned out under every collection |
//! | `shopify_customer` | `customers` |
//! | `shopify_theme` | `themes`, one unpaginated response |
//! | `shopify_draft_order` | `draft_orders` |
//!
//! Rows are JSON objects holding the resource's fields. Collection tables
//! add a `shop_name` column, and the metafield-owning tables add a
//! `metafields` column when [`TableOptions::metafields`] is set.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio_util::sync::CancellationToken;

use crate::classify::DEFAULT_NOT_FOUND_PATTERNS;
use crate::clients::{PaginationInfo, RestClient};
use crate::connection::Connection;
use crate::engine::{
    fan_out, get_by_id, list_all, ChildLister, CollectingSink, CollectionLister, ListOutcome,
    PageSource, Parent, ParentChild, ProductParents, ResourceLister, RowSink,
};
use crate::error::{Error, TableError};
use crate::rest::resources::{
    CustomCollection, Customer, DraftOrder, Metafield, MetafieldListParams, Order, Product,
    ProductListParams, SmartCollection, Theme, Variant, VariantListParams,
};
use crate::rest::{PageRequest, ResourceError, ResourceResponse, RestResource};

/// A queryable table.
///
/// ```rust
/// use shopify_tables::Table;
///
/// let table: Table = "shopify_product_variant".parse().unwrap();
/// assert_eq!(table, Table::ProductVariant);
/// assert_eq!(table.to_string(), "shopify_product_variant");
/// assert!("shopify_orders".parse::<Table>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    /// `shopify_order`
    Order,
    /// `shopify_product`
    Product,
    /// `shopify_product_variant`
    ProductVariant,
    /// `shopify_custom_collection`
    CustomCollection,
    /// `shopify_smart_collection`
    SmartCollection,
    /// `shopify_collection_product`
    CollectionProduct,
    /// `shopify_customer`
    Customer,
    /// `shopify_theme`
    Theme,
    /// `shopify_draft_order`
    DraftOrder,
}

impl Table {
    /// Every table, in registration order.
    pub const ALL: [Self; 9] = [
        Self::Order,
        Self::Product,
        Self::ProductVariant,
        Self::CustomCollection,
        Self::SmartCollection,
        Self::CollectionProduct,
        Self::Customer,
        Self::Theme,
        Self::DraftOrder,
    ];

    /// The table name as seen by the query host.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Order => "shopify_order",
            Self::Product => "shopify_product",
            Self::ProductVariant => "shopify_product_variant",
            Self::CustomCollection => "shopify_custom_collection",
            Self::SmartCollection => "shopify_smart_collection",
            Self::CollectionProduct => "shopify_collection_product",
            Self::Customer => "shopify_customer",
            Self::Theme => "shopify_theme",
            Self::DraftOrder => "shopify_draft_order",
        }
    }

    /// Whether rows carry the memoized `shop_name` column.
    #[must_use]
    pub const fn has_shop_name(self) -> bool {
        matches!(
            self,
            Self::CustomCollection | Self::SmartCollection | Self::CollectionProduct
        )
    }

    /// Whether rows can carry a `metafields` column.
    #[must_use]
    pub const fn has_metafields(self) -> bool {
        matches!(
            self,
            Self::Product | Self::Customer | Self::CustomCollection | Self::SmartCollection
        )
    }

    /// Whether rows can be fetched by `id`.
    #[must_use]
    pub const fn has_key_column(self) -> bool {
        !matches!(self, Self::CollectionProduct)
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Table {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|table| table.name() == s)
            .ok_or_else(|| TableError::UnknownTable { name: s.to_string() })
    }
}

/// Per-query options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableOptions {
    /// Fetch each row's metafields into a `metafields` column. Costs one
    /// extra listing per row; ignored by tables without metafields.
    pub metafields: bool,

    /// Error message fragments that turn a failed lookup by id into an
    /// empty result.
    pub not_found_patterns: Vec<String>,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            metafields: false,
            not_found_patterns: DEFAULT_NOT_FOUND_PATTERNS
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

/// Something that can be written as one table row.
trait TableRow {
    fn to_row(&self) -> Result<Map<String, Value>, serde_json::Error>;

    /// Parent id name and id under which the item's metafields are listed.
    fn metafield_owner(&self) -> Option<(&'static str, u64)> {
        None
    }
}

fn object_row<T: Serialize>(item: &T) -> Result<Map<String, Value>, serde_json::Error> {
    match serde_json::to_value(item)? {
        Value::Object(row) => Ok(row),
        _ => Err(<serde_json::Error as serde::ser::Error>::custom(
            "row is not a JSON object",
        )),
    }
}

macro_rules! table_row {
    ($ty:ty) => {
        impl TableRow for $ty {
            fn to_row(&self) -> Result<Map<String, Value>, serde_json::Error> {
                object_row(self)
            }
        }
    };
    ($ty:ty, owner = $id_name:literal) => {
        impl TableRow for $ty {
            fn to_row(&self) -> Result<Map<String, Value>, serde_json::Error> {
                object_row(self)
            }

            fn metafield_owner(&self) -> Option<(&'static str, u64)> {
                self.id.map(|id| ($id_name, id))
            }
        }
    };
}

table_row!(Order);
table_row!(Theme);
table_row!(DraftOrder);
table_row!(Product, owner = "product_id");
table_row!(Customer, owner = "customer_id");
table_row!(CustomCollection, owner = "collection_id");
table_row!(SmartCollection, owner = "collection_id");
table_row!(Variant);

impl TableRow for ParentChild<Variant> {
    fn to_row(&self) -> Result<Map<String, Value>, serde_json::Error> {
        object_row(&self.child)
    }
}

impl TableRow for ParentChild<Product> {
    fn to_row(&self) -> Result<Map<String, Value>, serde_json::Error> {
        let mut row = object_row(&self.child)?;
        let (collection_id, collection_title) = match &self.parent {
            Parent::Collection(collection) => (collection.id, collection.title.clone()),
            Parent::Product(_) => (None, None),
        };

        row.insert("collection_id".to_string(), Value::from(collection_id));
        row.insert("collection_title".to_string(), Value::from(collection_title));
        row.insert("product_id".to_string(), Value::from(self.child.id));
        row.insert(
            "product_title".to_string(),
            Value::from(self.child.title.clone()),
        );
        Ok(row)
    }
}

/// An item together with its metafields.
struct Hydrated<T> {
    item: T,
    metafields: Vec<Metafield>,
}

impl<T: TableRow> TableRow for Hydrated<T> {
    fn to_row(&self) -> Result<Map<String, Value>, serde_json::Error> {
        let mut row = self.item.to_row()?;
        row.insert("metafields".to_string(), serde_json::to_value(&self.metafields)?);
        Ok(row)
    }
}

async fn list_metafields(
    client: &RestClient,
    owner: (&'static str, u64),
    cancel: &CancellationToken,
) -> Result<Vec<Metafield>, ResourceError> {
    let params = MetafieldListParams::default();
    let (id_name, id) = owner;
    let source = ChildLister::<Metafield>::new(client, id_name, id, &params);

    let mut sink = CollectingSink::unbounded();
    list_all(&source, &mut sink, cancel).await?;
    Ok(sink.into_items())
}

/// Wraps a source so every item of a page arrives with its metafields.
///
/// The engine asks for at most the remaining row budget per page, so no
/// metafields are fetched for items that would not be emitted.
struct WithMetafields<'a, S> {
    inner: S,
    client: &'a RestClient,
    cancel: &'a CancellationToken,
}

impl<S> PageSource for WithMetafields<'_, S>
where
    S: PageSource,
    S::Item: TableRow,
{
    type Item = Hydrated<S::Item>;

    fn resource(&self) -> &'static str {
        self.inner.resource()
    }

    async fn fetch_page(
        &self,
        page: &PageRequest,
    ) -> Result<ResourceResponse<Vec<Self::Item>>, ResourceError> {
        let (items, next_page_info) = self.inner.fetch_page(page).await?.into_parts();

        let mut hydrated = Vec::with_capacity(items.len());
        for item in items {
            if self.cancel.is_cancelled() {
                break;
            }
            let metafields = match item.metafield_owner() {
                Some(owner) => list_metafields(self.client, owner, self.cancel).await?,
                None => Vec::new(),
            };
            hydrated.push(Hydrated { item, metafields });
        }

        let pagination = PaginationInfo {
            prev_page_info: None,
            next_page_info,
        };
        Ok(ResourceResponse::new(hydrated, pagination, None, None))
    }
}

/// Converts items to rows, adds the `shop_name` column and forwards them.
///
/// A row that cannot be encoded stops the listing; the error is reported by
/// [`RowWriter::finish`].
struct RowWriter<'k, K> {
    table: Table,
    sink: &'k mut K,
    shop_name: Option<String>,
    error: Option<serde_json::Error>,
}

impl<'k, K: RowSink<Value>> RowWriter<'k, K> {
    fn new(table: Table, sink: &'k mut K, shop_name: Option<String>) -> Self {
        Self {
            table,
            sink,
            shop_name,
            error: None,
        }
    }

    fn finish(self, outcome: Result<ListOutcome, ResourceError>) -> Result<ListOutcome, Error> {
        let outcome = outcome?;
        match self.error {
            Some(error) => Err(row_error(self.table, &error).into()),
            None => Ok(outcome),
        }
    }
}

impl<T: TableRow, K: RowSink<Value>> RowSink<T> for RowWriter<'_, K> {
    fn accept(&mut self, item: T) {
        if self.error.is_some() {
            return;
        }
        match item.to_row() {
            Ok(row) => self.sink.accept(finish_row(row, self.shop_name.as_deref())),
            Err(error) => self.error = Some(error),
        }
    }

    fn rows_remaining(&self) -> Option<u64> {
        if self.error.is_some() {
            return Some(0);
        }
        self.sink.rows_remaining()
    }
}

fn finish_row(mut row: Map<String, Value>, shop_name: Option<&str>) -> Value {
    if let Some(shop_name) = shop_name {
        row.insert("shop_name".to_string(), Value::from(shop_name));
    }
    Value::Object(row)
}

fn row_error(table: Table, error: &serde_json::Error) -> ResourceError {
    tracing::error!(
        component = "tables",
        operation = "to_row",
        table = table.name(),
        error = %error,
        "failed to encode row"
    );
    ResourceError::Deserialization {
        resource: table.name(),
        key: "row".to_string(),
        message: error.to_string(),
    }
}

async fn list_resource<R, K>(
    client: &RestClient,
    metafields: bool,
    sink: &mut RowWriter<'_, K>,
    cancel: &CancellationToken,
) -> Result<ListOutcome, ResourceError>
where
    R: RestResource + TableRow,
    K: RowSink<Value>,
{
    let source = ResourceLister::<R>::with_defaults(client);
    if metafields {
        let source = WithMetafields {
            inner: source,
            client,
            cancel,
        };
        list_all(&source, sink, cancel).await
    } else {
        list_all(&source, sink, cancel).await
    }
}

/// Streams the rows of `table` into `sink` until the listing is exhausted,
/// the sink's budget is spent, or `cancel` fires.
///
/// # Errors
///
/// Returns [`Error::Config`] or [`Error::Client`] if the connection cannot
/// be resolved, and [`Error::Resource`] for the first failed remote call.
/// Rows emitted before a failure stay in the sink.
///
/// ```rust,ignore
/// use shopify_tables::engine::CollectingSink;
/// use shopify_tables::{list_rows, Table, TableOptions};
/// use tokio_util::sync::CancellationToken;
///
/// let mut sink = CollectingSink::with_budget(Some(5));
/// list_rows(&connection, Table::Order, &TableOptions::default(), &mut sink, &CancellationToken::new()).await?;
/// ```
pub async fn list_rows<K: RowSink<Value>>(
    conn: &Connection,
    table: Table,
    options: &TableOptions,
    sink: &mut K,
    cancel: &CancellationToken,
) -> Result<ListOutcome, Error> {
    let client = conn.client()?;
    let shop_name = if table.has_shop_name() && sink.rows_remaining() != Some(0) {
        Some(conn.shop_name().await?)
    } else {
        None
    };
    let metafields = options.metafields && table.has_metafields();

    tracing::debug!(
        component = "tables",
        operation = "list_rows",
        connection = conn.name(),
        table = table.name(),
        metafields,
        "listing rows"
    );

    let mut writer = RowWriter::new(table, sink, shop_name);
    let outcome = match table {
        Table::Order => list_resource::<Order, _>(&client, false, &mut writer, cancel).await,
        Table::Product => list_resource::<Product, _>(&client, metafields, &mut writer, cancel).await,
        Table::CustomCollection => {
            list_resource::<CustomCollection, _>(&client, metafields, &mut writer, cancel).await
        }
        Table::SmartCollection => {
            list_resource::<SmartCollection, _>(&client, metafields, &mut writer, cancel).await
        }
        Table::Customer => list_resource::<Customer, _>(&client, metafields, &mut writer, cancel).await,
        Table::Theme => list_resource::<Theme, _>(&client, false, &mut writer, cancel).await,
        Table::DraftOrder => list_resource::<DraftOrder, _>(&client, false, &mut writer, cancel).await,
        Table::ProductVariant => {
            let params = VariantListParams::default();
            fan_out(
                &ProductParents::new(&client),
                |parent| ChildLister::<Variant>::for_parent(&client, parent, &params),
                &mut writer,
                cancel,
            )
            .await
        }
        Table::CollectionProduct => {
            let params = ProductListParams::default();
            fan_out(
                &CollectionLister::new(&client),
                |parent| ChildLister::<Product>::for_parent(&client, parent, &params),
                &mut writer,
                cancel,
            )
            .await
        }
    };

    writer.finish(outcome)
}

async fn get_resource<R>(
    client: &RestClient,
    table: Table,
    id: u64,
    options: &TableOptions,
) -> Result<Option<Map<String, Value>>, ResourceError>
where
    R: RestResource<Id = u64> + TableRow,
{
    let patterns: Vec<&str> = options.not_found_patterns.iter().map(String::as_str).collect();
    let Some(item) = get_by_id::<R>(client, id, &patterns).await? else {
        return Ok(None);
    };

    let owner = item.metafield_owner().filter(|_| options.metafields && table.has_metafields());
    let row = match owner {
        Some(owner) => {
            let metafields = list_metafields(client, owner, &CancellationToken::new()).await?;
            Hydrated { item, metafields }.to_row()
        }
        None => item.to_row(),
    };

    row.map(Some).map_err(|e| row_error(table, &e))
}

/// Fetches the row of `table` whose `id` column equals `id`.
///
/// Returns `Ok(None)` for id `0` without a remote call, and when the remote
/// failure matches one of [`TableOptions::not_found_patterns`].
///
/// # Errors
///
/// Returns [`TableError::NoKeyColumn`] for tables without an `id` key,
/// and [`Error`] for configuration or unsuppressed remote failures.
pub async fn get_row(
    conn: &Connection,
    table: Table,
    id: u64,
    options: &TableOptions,
) -> Result<Option<Value>, Error> {
    if !table.has_key_column() {
        return Err(TableError::NoKeyColumn { table: table.name() }.into());
    }

    let client = conn.client()?;
    let row = match table {
        Table::Order => get_resource::<Order>(&client, table, id, options).await?,
        Table::Product => get_resource::<Product>(&client, table, id, options).await?,
        Table::ProductVariant => get_resource::<Variant>(&client, table, id, options).await?,
        Table::CustomCollection => {
            get_resource::<CustomCollection>(&client, table, id, options).await?
        }
        Table::SmartCollection => {
            get_resource::<SmartCollection>(&client, table, id, options).await?
        }
        Table::Customer => get_resource::<Customer>(&client, table, id, options).await?,
        Table::Theme => get_resource::<Theme>(&client, table, id, options).await?,
        Table::DraftOrder => get_resource::<DraftOrder>(&client, table, id, options).await?,
        Table::CollectionProduct => None,
    };

    let Some(row) = row else {
        return Ok(None);
    };
    let shop_name = if table.has_shop_name() {
        Some(conn.shop_name().await?)
    } else {
        None
    };
    Ok(Some(finish_row(row, shop_name.as_deref())))
}
