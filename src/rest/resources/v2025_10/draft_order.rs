//! Draft order resource implementation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::rest::{ResourceOperation, ResourcePath, RestResource};

/// The status of a draft order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DraftOrderStatus {
    /// Created but no invoice sent.
    Open,
    /// Invoice sent to the customer.
    InvoiceSent,
    /// Converted into an order.
    Completed,
}

/// A draft order: an order created by a merchant on behalf of a customer.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct DraftOrder {
    pub id: Option<u64>,

    /// The order created from this draft, once completed.
    pub order_id: Option<u64>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub note: Option<String>,
    pub tags: Option<String>,
    pub currency: Option<String>,
    pub status: Option<DraftOrderStatus>,
    pub invoice_url: Option<String>,
    pub invoice_sent_at: Option<DateTime<Utc>>,
    pub taxes_included: Option<bool>,
    pub tax_exempt: Option<bool>,
    pub total_price: Option<String>,
    pub subtotal_price: Option<String>,
    pub total_tax: Option<String>,
    pub use_customer_default_address: Option<bool>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub customer: Option<Value>,
    pub billing_address: Option<Value>,
    pub shipping_address: Option<Value>,
    pub note_attributes: Option<Value>,
    pub line_items: Option<Value>,
    pub shipping_line: Option<Value>,
    pub tax_lines: Option<Value>,
    pub applied_discount: Option<Value>,
}

impl RestResource for DraftOrder {
    type Id = u64;
    type AllParams = DraftOrderListParams;

    const NAME: &'static str = "DraftOrder";
    const KEY: &'static str = "draft_order";
    const PLURAL: &'static str = "draft_orders";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(ResourceOperation::Find, &["id"], "draft_orders/{id}"),
        ResourcePath::new(ResourceOperation::All, &[], "draft_orders"),
    ];

    fn get_id(&self) -> Option<Self::Id> {
        self.id
    }
}

/// Filters for the first page of a draft order listing.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct DraftOrderListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ids: Option<Vec<u64>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<DraftOrderStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at_min: Option<DateTime<Utc>>,

    /// Comma-separated list of fields to include in the response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<String>,
}
