//! Behavior shared by custom and smart collections.
//!
//! Both collection kinds expose their members through the same
//! `collections/{collection_id}/products` endpoint, so anything that only
//! needs a collection's identity works against [`Collection`] and does not
//! care which kind it holds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::custom_collection::CustomCollection;
use super::smart_collection::SmartCollection;

/// Identity of a collection, independent of its kind.
pub trait Collection: Send + Sync {
    /// Returns the collection id, if set.
    fn collection_id(&self) -> Option<u64>;

    /// Returns the collection title, if set.
    fn collection_title(&self) -> Option<&str>;
}

impl Collection for CustomCollection {
    fn collection_id(&self) -> Option<u64> {
        self.id
    }

    fn collection_title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}

impl Collection for SmartCollection {
    fn collection_id(&self) -> Option<u64> {
        self.id
    }

    fn collection_title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}

/// Filters for the first page of a custom or smart collection listing.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct CollectionListParams {
    /// Return only collections with the given IDs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ids: Option<Vec<u64>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,

    /// Return only collections that contain this product.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at_min: Option<DateTime<Utc>>,

    /// Valid values: `published`, `unpublished`, `any`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_status: Option<String>,

    /// Comma-separated list of fields to include in the response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn describe<C: Collection>(collection: &C) -> String {
        format!(
            "{}:{}",
            collection.collection_id().unwrap_or_default(),
            collection.collection_title().unwrap_or("")
        )
    }

    #[test]
    fn test_both_kinds_expose_identity() {
        let custom = CustomCollection {
            id: Some(1),
            title: Some("Summer".to_string()),
            ..Default::default()
        };
        let smart = SmartCollection {
            id: Some(2),
            title: Some("On Sale".to_string()),
            ..Default::default()
        };

        assert_eq!(describe(&custom), "1:Summer");
        assert_eq!(describe(&smart), "2:On Sale");
    }

    #[test]
    fn test_list_params_omit_unset_filters() {
        let params = CollectionListParams {
            product_id: Some(632_910_392),
            ..Default::default()
        };
        let json = serde_json::to_value(&params).unwrap();

        assert_eq!(json, serde_json::json!({"product_id": 632_910_392_u64}));
    }
}
