//! Order resource implementation.
//!
//! Orders are listed with `status=any` by default so that open, closed and
//! cancelled orders are all returned. Shopify's own default is `open`.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_tables::rest::{PageRequest, RestResource};
//! use shopify_tables::rest::resources::v2025_10::Order;
//!
//! let page = Order::list_page(&client, &Order::default_list_params(), &PageRequest::first(50)).await?;
//! for order in page.iter() {
//!     println!("{:?} {:?}", order.name, order.total_price);
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::rest::{ResourceOperation, ResourcePath, RestResource};

/// Status filter accepted by the order listing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Open orders only (the API default).
    #[default]
    Open,
    /// Closed orders only.
    Closed,
    /// Cancelled orders only.
    Cancelled,
    /// Orders of any status.
    Any,
}

/// An order placed in a Shopify store.
///
/// Prices are kept as the decimal strings the API returns. Nested
/// structures (line items, addresses, refunds) are kept as raw JSON.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Order {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub contact_email: Option<String>,
    pub phone: Option<String>,
    pub number: Option<u64>,
    pub order_number: Option<u64>,
    pub token: Option<String>,
    pub cart_token: Option<String>,
    pub checkout_id: Option<u64>,
    pub checkout_token: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub closed_at: Option<DateTime<Utc>>,
    pub processed_at: Option<DateTime<Utc>>,
    pub cancel_reason: Option<String>,
    pub currency: Option<String>,
    pub total_price: Option<String>,
    pub current_total_price: Option<String>,
    pub subtotal_price: Option<String>,
    pub total_discounts: Option<String>,
    pub total_line_items_price: Option<String>,
    pub total_tax: Option<String>,
    pub total_weight: Option<u64>,
    pub taxes_included: Option<bool>,
    pub financial_status: Option<String>,
    pub fulfillment_status: Option<String>,
    pub confirmed: Option<bool>,
    pub test: Option<bool>,
    pub buyer_accepts_marketing: Option<bool>,
    pub browser_ip: Option<String>,
    pub customer_locale: Option<String>,
    pub landing_site: Option<String>,
    pub landing_site_ref: Option<String>,
    pub referring_site: Option<String>,
    pub source_name: Option<String>,
    pub source_identifier: Option<String>,
    pub source_url: Option<String>,
    pub reference: Option<String>,
    pub note: Option<String>,
    pub tags: Option<String>,
    pub app_id: Option<u64>,
    pub device_id: Option<u64>,
    pub location_id: Option<u64>,
    pub user_id: Option<u64>,
    pub order_status_url: Option<String>,
    pub processing_method: Option<String>,
    pub gateway: Option<String>,
    pub payment_gateway_names: Option<Vec<String>>,
    pub customer: Option<Value>,
    pub billing_address: Option<Value>,
    pub shipping_address: Option<Value>,
    pub client_details: Option<Value>,
    pub discount_codes: Option<Value>,
    pub note_attributes: Option<Value>,
    pub line_items: Option<Value>,
    pub shipping_lines: Option<Value>,
    pub tax_lines: Option<Value>,
    pub fulfillments: Option<Value>,
    pub refunds: Option<Value>,
    pub total_price_set: Option<Value>,
}

impl RestResource for Order {
    type Id = u64;
    type AllParams = OrderListParams;

    const NAME: &'static str = "Order";
    const KEY: &'static str = "order";
    const PLURAL: &'static str = "orders";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(ResourceOperation::Find, &["id"], "orders/{id}"),
        ResourcePath::new(ResourceOperation::All, &[], "orders"),
    ];

    fn get_id(&self) -> Option<Self::Id> {
        self.id
    }

    fn default_list_params() -> Self::AllParams {
        OrderListParams {
            status: Some(OrderStatus::Any),
            ..Default::default()
        }
    }
}

/// Filters for the first page of an order listing.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct OrderListParams {
    /// Return only orders with the given IDs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ids: Option<Vec<u64>>,

    /// Filter by order status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,

    /// Filter by financial status, e.g. `paid` or `refunded`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub financial_status: Option<String>,

    /// Filter by fulfillment status, e.g. `shipped` or `unfulfilled`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fulfillment_status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at_min: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at_max: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at_min: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at_max: Option<DateTime<Utc>>,

    /// Comma-separated list of fields to include in the response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<String>,
}
