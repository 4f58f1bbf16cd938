//! Read requests against the Admin API.
//!
//! Only `GET` is modelled; every call this crate makes is a read.

use std::collections::BTreeMap;

/// A `GET` request relative to the client's versioned base path.
///
/// ```rust
/// use shopify_tables::clients::HttpRequest;
///
/// let request = HttpRequest::builder("products.json")
///     .query_param("limit", "250")
///     .build();
/// assert_eq!(request.path, "products.json");
/// assert_eq!(request.query.get("limit").map(String::as_str), Some("250"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    /// The path relative to the base path, including the `.json` suffix.
    pub path: String,
    /// Query parameters, kept sorted so request URLs are stable.
    pub query: BTreeMap<String, String>,
    /// Additional headers to send with this request only.
    pub extra_headers: BTreeMap<String, String>,
}

impl HttpRequest {
    /// Creates a new builder for the given path.
    #[must_use]
    pub fn builder(path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(path)
    }
}

/// Builder for [`HttpRequest`].
#[derive(Debug)]
pub struct HttpRequestBuilder {
    path: String,
    query: BTreeMap<String, String>,
    extra_headers: BTreeMap<String, String>,
}

impl HttpRequestBuilder {
    fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: BTreeMap::new(),
            extra_headers: BTreeMap::new(),
        }
    }

    /// Replaces all query parameters.
    #[must_use]
    pub fn query(mut self, query: impl IntoIterator<Item = (String, String)>) -> Self {
        self.query = query.into_iter().collect();
        self
    }

    /// Adds a single query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Adds a single extra header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.insert(key.into(), value.into());
        self
    }

    /// Builds the [`HttpRequest`].
    #[must_use]
    pub fn build(self) -> HttpRequest {
        HttpRequest {
            path: self.path,
            query: self.query,
            extra_headers: self.extra_headers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_creates_plain_request() {
        let request = HttpRequest::builder("shop.json").build();

        assert_eq!(request.path, "shop.json");
        assert!(request.query.is_empty());
        assert!(request.extra_headers.is_empty());
    }

    #[test]
    fn test_query_param_overrides_earlier_value() {
        let request = HttpRequest::builder("orders.json")
            .query_param("limit", "50")
            .query_param("status", "any")
            .query_param("limit", "10")
            .build();

        assert_eq!(request.query.len(), 2);
        assert_eq!(request.query.get("limit"), Some(&"10".to_string()));
    }

    #[test]
    fn test_query_replaces_all_params() {
        let request = HttpRequest::builder("products.json")
            .query_param("status", "active")
            .query(vec![("page_info".to_string(), "abc".to_string())])
            .build();

        assert_eq!(request.query.len(), 1);
        assert_eq!(request.query.get("page_info"), Some(&"abc".to_string()));
    }

    #[test]
    fn test_builder_with_extra_headers() {
        let request = HttpRequest::builder("products.json")
            .header("X-Custom-Header", "custom-value")
            .build();

        assert_eq!(
            request.extra_headers.get("X-Custom-Header"),
            Some(&"custom-value".to_string())
        );
    }
}
