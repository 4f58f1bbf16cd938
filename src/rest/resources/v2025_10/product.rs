//! Product resource implementation.
//!
//! Products are listed either store-wide (`products`) or as the members of
//! one collection (`collections/{collection_id}/products`). The collection
//! path is picked automatically when a `collection_id` is supplied through
//! [`RestResource::list_page_with_parent`].
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_tables::rest::{PageRequest, RestResource};
//! use shopify_tables::rest::resources::v2025_10::{Product, ProductListParams, ProductStatus};
//!
//! let params = ProductListParams {
//!     status: Some(ProductStatus::Active),
//!     ..Default::default()
//! };
//! let page = Product::list_page(&client, &params, &PageRequest::first(50)).await?;
//!
//! let members = Product::list_page_with_parent(
//!     &client, "collection_id", 841564295, &ProductListParams::default(), &PageRequest::first(250),
//! ).await?;
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::rest::{ResourceOperation, ResourcePath, RestResource};

/// The status of a product.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    /// The product is active and visible to customers.
    #[default]
    Active,
    /// The product is archived and not visible to customers.
    Archived,
    /// The product is a draft and not visible to customers.
    Draft,
}

/// A product in a Shopify store.
///
/// Options, variants and images are kept as the raw JSON the API returns.
/// For per-variant rows use [`Variant`](super::Variant).
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Product {
    /// The unique identifier of the product.
    pub id: Option<u64>,

    /// The name of the product.
    pub title: Option<String>,

    /// The description of the product in HTML format.
    pub body_html: Option<String>,

    /// The name of the product's vendor.
    pub vendor: Option<String>,

    /// A categorization for the product.
    pub product_type: Option<String>,

    /// The URL-friendly name of the product.
    pub handle: Option<String>,

    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub published_at: Option<DateTime<Utc>>,

    /// Where the product is published: `web` or `global`.
    pub published_scope: Option<String>,

    /// Whether the product is active, archived, or draft.
    pub status: Option<ProductStatus>,

    /// A comma-separated list of tags.
    pub tags: Option<String>,

    /// The suffix of the Liquid template used for the product page.
    pub template_suffix: Option<String>,

    pub metafields_global_title_tag: Option<String>,
    pub metafields_global_description_tag: Option<String>,

    /// The admin GraphQL API ID for this product.
    pub admin_graphql_api_id: Option<String>,

    pub options: Option<Value>,
    pub variants: Option<Value>,
    pub images: Option<Value>,
    pub image: Option<Value>,
}

impl RestResource for Product {
    type Id = u64;
    type AllParams = ProductListParams;

    const NAME: &'static str = "Product";
    const KEY: &'static str = "product";
    const PLURAL: &'static str = "products";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(ResourceOperation::Find, &["id"], "products/{id}"),
        ResourcePath::new(ResourceOperation::All, &[], "products"),
        ResourcePath::new(
            ResourceOperation::All,
            &["collection_id"],
            "collections/{collection_id}/products",
        ),
    ];

    fn get_id(&self) -> Option<Self::Id> {
        self.id
    }
}

/// Filters for the first page of a product listing.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ProductListParams {
    /// Return only products with the given IDs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ids: Option<Vec<u64>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at_min: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at_min: Option<DateTime<Utc>>,

    /// Valid values: `published`, `unpublished`, `any`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProductStatus>,

    /// Comma-separated list of fields to include in the response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::get_path;

    #[test]
    fn test_product_deserialization_from_api_response() {
        let json = r#"{
            "id": 788032119674292922,
            "title": "Example T-Shirt",
            "vendor": "Acme",
            "product_type": "Shirts",
            "handle": "example-t-shirt",
            "created_at": "2024-01-15T10:30:00Z",
            "status": "active",
            "tags": "cotton, summer",
            "template_suffix": null,
            "variants": [{"id": 39072856, "price": "19.99"}],
            "options": [{"name": "Size", "values": ["Small", "Large"]}],
            "images": [],
            "image": null
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();

        assert_eq!(product.id, Some(788_032_119_674_292_922));
        assert_eq!(product.title.as_deref(), Some("Example T-Shirt"));
        assert_eq!(product.status, Some(ProductStatus::Active));
        assert!(product.created_at.is_some());
        assert_eq!(product.variants.unwrap()[0]["price"], "19.99");
        assert_eq!(product.options.unwrap()[0]["values"][1], "Large");
        assert!(product.image.is_none());
    }

    #[test]
    fn test_product_list_params_skip_unset_filters() {
        let params = ProductListParams {
            ids: Some(vec![123, 456]),
            vendor: Some("Acme".to_string()),
            status: Some(ProductStatus::Draft),
            ..Default::default()
        };

        let json = serde_json::to_value(&params).unwrap();

        assert_eq!(json["ids"], serde_json::json!([123, 456]));
        assert_eq!(json["vendor"], "Acme");
        assert_eq!(json["status"], "draft");
        assert!(json.get("title").is_none());
        assert!(json.get("created_at_min").is_none());
    }

    #[test]
    fn test_collection_member_path_is_preferred_with_collection_id() {
        let path = get_path(Product::PATHS, ResourceOperation::All, &["collection_id"]).unwrap();
        assert_eq!(path.template, "collections/{collection_id}/products");

        let path = get_path(Product::PATHS, ResourceOperation::All, &[]).unwrap();
        assert_eq!(path.template, "products");
    }
}
