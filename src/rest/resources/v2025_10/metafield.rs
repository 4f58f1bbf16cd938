//! Metafield resource implementation.
//!
//! Metafields are only listed through their owner. Each owner kind has its
//! own nested path, and [`RestResource::list_page_with_parent`] selects it
//! from the parent id name:
//!
//! | Owner | Parent id name | Path |
//! |-------|----------------|------|
//! | product | `product_id` | `products/{product_id}/metafields` |
//! | customer | `customer_id` | `customers/{customer_id}/metafields` |
//! | collection | `collection_id` | `collections/{collection_id}/metafields` |

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::rest::{ResourceOperation, ResourcePath, RestResource};

/// A piece of custom data attached to a resource.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Metafield {
    pub id: Option<u64>,
    pub namespace: Option<String>,
    pub key: Option<String>,

    /// Stored value; a string for most types, a number or boolean for some.
    pub value: Option<Value>,

    /// The metafield type, e.g. `single_line_text_field`.
    #[serde(rename = "type")]
    pub metafield_type: Option<String>,
    pub description: Option<String>,
    pub owner_id: Option<u64>,
    pub owner_resource: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub admin_graphql_api_id: Option<String>,
}

impl RestResource for Metafield {
    type Id = u64;
    type AllParams = MetafieldListParams;

    const NAME: &'static str = "Metafield";
    const KEY: &'static str = "metafield";
    const PLURAL: &'static str = "metafields";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(ResourceOperation::Find, &["id"], "metafields/{id}"),
        ResourcePath::new(
            ResourceOperation::All,
            &["product_id"],
            "products/{product_id}/metafields",
        ),
        ResourcePath::new(
            ResourceOperation::All,
            &["customer_id"],
            "customers/{customer_id}/metafields",
        ),
        ResourcePath::new(
            ResourceOperation::All,
            &["collection_id"],
            "collections/{collection_id}/metafields",
        ),
    ];

    fn get_id(&self) -> Option<Self::Id> {
        self.id
    }
}

/// Filters for the first page of a metafield listing.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct MetafieldListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    /// Comma-separated list of fields to include in the response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<String>,
}
