//! Variant resource implementation.
//!
//! Variants are listed only as children of a product
//! (`products/{product_id}/variants`); a single variant can be fetched
//! standalone via `variants/{id}`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::rest::{ResourceOperation, ResourcePath, RestResource};

/// The unit of measurement for variant weight.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Kg,
    G,
    Lb,
    Oz,
}

/// A product variant in a Shopify store.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Variant {
    pub id: Option<u64>,

    /// The ID of the product this variant belongs to.
    pub product_id: Option<u64>,

    pub title: Option<String>,
    pub sku: Option<String>,
    pub barcode: Option<String>,
    pub position: Option<i64>,
    pub price: Option<String>,
    pub compare_at_price: Option<String>,
    pub option1: Option<String>,
    pub option2: Option<String>,
    pub option3: Option<String>,
    pub grams: Option<i64>,
    pub weight: Option<f64>,
    pub weight_unit: Option<WeightUnit>,

    /// `deny` or `continue` when out of stock.
    pub inventory_policy: Option<String>,
    pub inventory_management: Option<String>,
    pub inventory_item_id: Option<u64>,
    pub inventory_quantity: Option<i64>,
    pub old_inventory_quantity: Option<i64>,
    pub fulfillment_service: Option<String>,
    pub taxable: Option<bool>,
    pub tax_code: Option<String>,
    pub requires_shipping: Option<bool>,
    pub image_id: Option<u64>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub admin_graphql_api_id: Option<String>,
}

impl RestResource for Variant {
    type Id = u64;
    type AllParams = VariantListParams;

    const NAME: &'static str = "Variant";
    const KEY: &'static str = "variant";
    const PLURAL: &'static str = "variants";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(ResourceOperation::Find, &["id"], "variants/{id}"),
        ResourcePath::new(
            ResourceOperation::All,
            &["product_id"],
            "products/{product_id}/variants",
        ),
    ];

    fn get_id(&self) -> Option<Self::Id> {
        self.id
    }
}

/// Filters for the first page of a variant listing.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct VariantListParams {
    /// Restrict results to after the specified ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since_id: Option<u64>,

    /// Comma-separated list of fields to include in the response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<String>,
}
