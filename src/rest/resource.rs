//! Read-only REST resource trait.
//!
//! A resource declares its names and path templates; the trait supplies
//! `find`, `list_page` and `list_page_with_parent` on top of [`RestClient`].
//!
//! # Implementing a Resource
//!
//! ```rust,ignore
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! pub struct Product {
//!     pub id: Option<u64>,
//!     pub title: Option<String>,
//! }
//!
//! impl RestResource for Product {
//!     type Id = u64;
//!     type AllParams = ProductListParams;
//!
//!     const NAME: &'static str = "Product";
//!     const KEY: &'static str = "product";
//!     const PLURAL: &'static str = "products";
//!     const PATHS: &'static [ResourcePath] = &[
//!         ResourcePath::new(ResourceOperation::Find, &["id"], "products/{id}"),
//!         ResourcePath::new(ResourceOperation::All, &[], "products"),
//!     ];
//!
//!     fn get_id(&self) -> Option<Self::Id> {
//!         self.id
//!     }
//! }
//! ```
//!
//! # Page requests
//!
//! The first request of a listing carries the resource's filter parameters
//! plus `limit`. Follow-up requests carry only `limit` and the opaque
//! `page_info` cursor, because Shopify rejects filters alongside a cursor.

use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::clients::RestClient;
use crate::rest::{build_path, get_path, ResourceError, ResourceOperation, ResourcePath, ResourceResponse};

/// Largest page the Admin REST API serves.
pub const MAX_PAGE_SIZE: u32 = 250;

/// One page request: the page size and, after the first page, the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    limit: u32,
    page_info: Option<String>,
}

impl PageRequest {
    /// The first page of a listing. `limit` is clamped to `1..=250`.
    #[must_use]
    pub fn first(limit: u32) -> Self {
        Self {
            limit: limit.clamp(1, MAX_PAGE_SIZE),
            page_info: None,
        }
    }

    /// A follow-up page. The cursor is passed through unmodified.
    #[must_use]
    pub fn after(limit: u32, page_info: impl Into<String>) -> Self {
        Self {
            limit: limit.clamp(1, MAX_PAGE_SIZE),
            page_info: Some(page_info.into()),
        }
    }

    /// Returns the requested page size.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Returns the cursor, if this is not the first page.
    #[must_use]
    pub fn page_info(&self) -> Option<&str> {
        self.page_info.as_deref()
    }
}

/// A read-only Admin REST resource.
#[allow(async_fn_in_trait)]
pub trait RestResource: Serialize + DeserializeOwned + Clone + Send + Sync + Sized {
    /// The identifier type.
    type Id: Display + Clone + Send + Sync;

    /// Filter parameters sent with the first page of a listing.
    type AllParams: Serialize + Default + Send + Sync;

    /// Type name used in errors and logs.
    const NAME: &'static str;

    /// Body key of a single-resource response.
    const KEY: &'static str;

    /// Body key of a list response.
    const PLURAL: &'static str;

    /// Path templates for each supported operation.
    const PATHS: &'static [ResourcePath];

    /// `false` for endpoints that return everything in one response and
    /// accept neither `limit` nor `page_info`.
    const PAGINATED: bool = true;

    /// Returns the resource id, if set.
    fn get_id(&self) -> Option<Self::Id>;

    /// Parameters used when a listing is started without explicit ones.
    #[must_use]
    fn default_list_params() -> Self::AllParams {
        Self::AllParams::default()
    }

    /// Fetches one resource by id.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] for a 404 and other variants for
    /// transport or decoding failures.
    async fn find(client: &RestClient, id: &Self::Id) -> Result<ResourceResponse<Self>, ResourceError> {
        let id_value = id.to_string();
        let mut ids: HashMap<&str, String> = HashMap::new();
        ids.insert("id", id_value.clone());

        let path = resolve_path::<Self>(ResourceOperation::Find, &ids)?;
        let response = client
            .get(&path, BTreeMap::new())
            .await
            .map_err(|e| ResourceError::from_rest(e, Self::NAME, Some(&id_value)))?;

        ResourceResponse::from_http_response(response, Self::NAME, Self::KEY)
    }

    /// Fetches one page of the top-level listing.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] for path, transport or decoding failures.
    async fn list_page(
        client: &RestClient,
        params: &Self::AllParams,
        page: &PageRequest,
    ) -> Result<ResourceResponse<Vec<Self>>, ResourceError> {
        let ids: HashMap<&str, String> = HashMap::new();
        fetch_page::<Self>(client, &ids, params, page).await
    }

    /// Fetches one page of the listing nested under a parent, e.g.
    /// `products/{product_id}/variants`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::PathResolutionFailed`] if no template takes
    /// `parent_id_name`, [`ResourceError::NotFound`] if the parent does not
    /// exist, and other variants for transport or decoding failures.
    async fn list_page_with_parent<P: Display + Send + Sync>(
        client: &RestClient,
        parent_id_name: &str,
        parent_id: P,
        params: &Self::AllParams,
        page: &PageRequest,
    ) -> Result<ResourceResponse<Vec<Self>>, ResourceError> {
        let mut ids: HashMap<&str, String> = HashMap::new();
        ids.insert(parent_id_name, parent_id.to_string());
        fetch_page::<Self>(client, &ids, params, page).await
    }
}

fn resolve_path<R: RestResource>(
    operation: ResourceOperation,
    ids: &HashMap<&str, String>,
) -> Result<String, ResourceError> {
    let available_ids: Vec<&str> = ids.keys().copied().collect();
    let path = get_path(R::PATHS, operation, &available_ids).ok_or(
        ResourceError::PathResolutionFailed {
            resource: R::NAME,
            operation: operation.as_str(),
        },
    )?;

    Ok(build_path(path.template, ids))
}

async fn fetch_page<R: RestResource>(
    client: &RestClient,
    ids: &HashMap<&str, String>,
    params: &R::AllParams,
    page: &PageRequest,
) -> Result<ResourceResponse<Vec<R>>, ResourceError> {
    let path = resolve_path::<R>(ResourceOperation::All, ids)?;
    let query = page_query::<R>(params, page)?;

    let response = client
        .get(&path, query)
        .await
        .map_err(|e| ResourceError::from_rest(e, R::NAME, None))?;

    ResourceResponse::from_http_response(response, R::NAME, R::PLURAL)
}

fn page_query<R: RestResource>(
    params: &R::AllParams,
    page: &PageRequest,
) -> Result<BTreeMap<String, String>, ResourceError> {
    if !R::PAGINATED {
        return serialize_to_query::<R, _>(params);
    }

    let mut query = match page.page_info() {
        Some(cursor) => BTreeMap::from([("page_info".to_string(), cursor.to_string())]),
        None => serialize_to_query::<R, _>(params)?,
    };
    query.insert("limit".to_string(), page.limit().to_string());
    Ok(query)
}

fn serialize_to_query<R: RestResource, T: Serialize>(
    params: &T,
) -> Result<BTreeMap<String, String>, ResourceError> {
    let value = serde_json::to_value(params).map_err(|e| ResourceError::InvalidParams {
        resource: R::NAME,
        message: e.to_string(),
    })?;

    let mut query = BTreeMap::new();

    if let Value::Object(map) = value {
        for (key, val) in map {
            match val {
                Value::Null => {}
                Value::String(s) => {
                    query.insert(key, s);
                }
                Value::Number(n) => {
                    query.insert(key, n.to_string());
                }
                Value::Bool(b) => {
                    query.insert(key, b.to_string());
                }
                Value::Array(arr) => {
                    let values: Vec<String> = arr
                        .iter()
                        .filter_map(|v| match v {
                            Value::String(s) => Some(s.clone()),
                            Value::Number(n) => Some(n.to_string()),
                            _ => None,
                        })
                        .collect();
                    if !values.is_empty() {
                        query.insert(key, values.join(","));
                    }
                }
                Value::Object(_) => {
                    query.insert(key, val.to_string());
                }
            }
        }
    }

    Ok(query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct MockOrder {
        id: Option<u64>,
    }

    #[derive(Debug, Clone, Serialize, Default)]
    struct MockOrderParams {
        #[serde(skip_serializing_if = "Option::is_none")]
        status: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        ids: Option<Vec<u64>>,
    }

    impl RestResource for MockOrder {
        type Id = u64;
        type AllParams = MockOrderParams;

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
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct MockTheme {
        id: Option<u64>,
    }

    impl RestResource for MockTheme {
        type Id = u64;
        type AllParams = ();

        const NAME: &'static str = "Theme";
        const KEY: &'static str = "theme";
        const PLURAL: &'static str = "themes";
        const PATHS: &'static [ResourcePath] =
            &[ResourcePath::new(ResourceOperation::All, &[], "themes")];
        const PAGINATED: bool = false;

        fn get_id(&self) -> Option<Self::Id> {
            self.id
        }
    }

    #[test]
    fn test_page_request_clamps_limit() {
        assert_eq!(PageRequest::first(1_000).limit(), 250);
        assert_eq!(PageRequest::first(0).limit(), 1);
        assert_eq!(PageRequest::after(10, "abc").page_info(), Some("abc"));
    }

    #[test]
    fn test_first_page_query_carries_filters_and_limit() {
        let params = MockOrderParams {
            status: Some("any".to_string()),
            ids: Some(vec![1, 2]),
        };
        let query = page_query::<MockOrder>(&params, &PageRequest::first(50)).unwrap();

        assert_eq!(query.get("status"), Some(&"any".to_string()));
        assert_eq!(query.get("ids"), Some(&"1,2".to_string()));
        assert_eq!(query.get("limit"), Some(&"50".to_string()));
        assert!(!query.contains_key("page_info"));
    }

    #[test]
    fn test_follow_up_query_drops_filters() {
        let params = MockOrderParams {
            status: Some("any".to_string()),
            ids: None,
        };
        let query = page_query::<MockOrder>(&params, &PageRequest::after(250, "cursor-2")).unwrap();

        assert_eq!(query.len(), 2);
        assert_eq!(query.get("page_info"), Some(&"cursor-2".to_string()));
        assert_eq!(query.get("limit"), Some(&"250".to_string()));
    }

    #[test]
    fn test_unpaginated_query_has_no_limit() {
        let query = page_query::<MockTheme>(&(), &PageRequest::first(5)).unwrap();
        assert!(query.is_empty());
    }

    #[test]
    fn test_resolve_path_reports_missing_template() {
        let mut ids = HashMap::new();
        ids.insert("product_id", "1".to_string());

        let result = resolve_path::<MockTheme>(ResourceOperation::Find, &ids);
        assert!(matches!(
            result,
            Err(ResourceError::PathResolutionFailed {
                resource: "Theme",
                operation: "find"
            })
        ));
    }
}
