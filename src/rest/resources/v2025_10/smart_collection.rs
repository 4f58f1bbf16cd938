//! Smart collection resource implementation.
//!
//! Smart collections select their products by rules (`rules` plus
//! `disjunctive`). The rules are kept as raw JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::rest::{ResourceOperation, ResourcePath, RestResource};

use super::collection::CollectionListParams;

/// A rule-based collection of products.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SmartCollection {
    pub id: Option<u64>,
    pub title: Option<String>,
    pub handle: Option<String>,
    pub body_html: Option<String>,
    pub sort_order: Option<String>,
    pub template_suffix: Option<String>,
    pub published: Option<bool>,
    pub published_at: Option<DateTime<Utc>>,
    pub published_scope: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
    pub admin_graphql_api_id: Option<String>,
    pub image: Option<Value>,

    /// Conditions a product must satisfy, e.g.
    /// `{"column": "tag", "relation": "equals", "condition": "sale"}`.
    pub rules: Option<Value>,

    /// `true` if a product needs to match any rule, `false` for all rules.
    pub disjunctive: Option<bool>,
}

impl RestResource for SmartCollection {
    type Id = u64;
    type AllParams = CollectionListParams;

    const NAME: &'static str = "SmartCollection";
    const KEY: &'static str = "smart_collection";
    const PLURAL: &'static str = "smart_collections";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(ResourceOperation::Find, &["id"], "smart_collections/{id}"),
        ResourcePath::new(ResourceOperation::All, &[], "smart_collections"),
    ];

    fn get_id(&self) -> Option<Self::Id> {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smart_collection_keeps_rules() {
        let json = r#"{
            "id": 1063001322,
            "title": "Macbooks",
            "handle": "macbooks",
            "disjunctive": false,
            "rules": [{"column": "vendor", "relation": "equals", "condition": "Apple"}]
        }"#;

        let collection: SmartCollection = serde_json::from_str(json).unwrap();

        assert_eq!(collection.id, Some(1_063_001_322));
        assert_eq!(collection.disjunctive, Some(false));
        assert_eq!(collection.rules.unwrap()[0]["condition"], "Apple");
    }
}
