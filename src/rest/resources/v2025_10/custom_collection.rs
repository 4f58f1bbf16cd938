//! Custom collection resource implementation.
//!
//! Custom collections hold a hand-picked set of products. Their members are
//! listed through [`Product`](super::Product) with a `collection_id`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::rest::{ResourceOperation, ResourcePath, RestResource};

use super::collection::CollectionListParams;

/// A manually curated collection of products.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CustomCollection {
    pub id: Option<u64>,
    pub title: Option<String>,

    /// The URL-friendly name of the collection.
    pub handle: Option<String>,

    /// The description of the collection in HTML format.
    pub body_html: Option<String>,

    /// How products are ordered, e.g. `manual` or `best-selling`.
    pub sort_order: Option<String>,

    pub template_suffix: Option<String>,
    pub published: Option<bool>,
    pub published_at: Option<DateTime<Utc>>,
    pub published_scope: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
    pub admin_graphql_api_id: Option<String>,
    pub image: Option<Value>,
}

impl RestResource for CustomCollection {
    type Id = u64;
    type AllParams = CollectionListParams;

    const NAME: &'static str = "CustomCollection";
    const KEY: &'static str = "custom_collection";
    const PLURAL: &'static str = "custom_collections";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(ResourceOperation::Find, &["id"], "custom_collections/{id}"),
        ResourcePath::new(ResourceOperation::All, &[], "custom_collections"),
    ];

    fn get_id(&self) -> Option<Self::Id> {
        self.id
    }
}
