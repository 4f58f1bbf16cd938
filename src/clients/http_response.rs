//! Parsed Admin API responses.

use std::collections::HashMap;

/// Rate limit state from the `X-Shopify-Shop-Api-Call-Limit` header.
///
/// The header format is `X/Y`: requests currently in the leaky bucket and
/// the bucket size.
///
/// ```rust
/// use shopify_tables::clients::ApiCallLimit;
///
/// let limit = ApiCallLimit::parse("40/80").unwrap();
/// assert_eq!(limit.request_count, 40);
/// assert_eq!(limit.bucket_size, 80);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ApiCallLimit {
    /// Requests currently counted against the bucket.
    pub request_count: u32,
    /// The maximum number of requests the bucket holds.
    pub bucket_size: u32,
}

impl ApiCallLimit {
    /// Parses the header value, returning `None` when it is malformed.
    #[must_use]
    pub fn parse(header_value: &str) -> Option<Self> {
        let (count, size) = header_value.trim().split_once('/')?;

        Some(Self {
            request_count: count.parse().ok()?,
            bucket_size: size.parse().ok()?,
        })
    }

    /// Returns `true` when the bucket has no room left.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.request_count >= self.bucket_size
    }
}

/// Cursor information parsed from the `Link` header.
///
/// Shopify paginates REST listings with an opaque `page_info` value carried
/// in the `rel="next"` and `rel="previous"` link URLs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PaginationInfo {
    /// The `page_info` value for the previous page, if any.
    pub prev_page_info: Option<String>,
    /// The `page_info` value for the next page, if any.
    pub next_page_info: Option<String>,
}

impl PaginationInfo {
    /// Parses a header of the form `<url>; rel="next", <url>; rel="previous"`.
    #[must_use]
    pub fn parse_link_header(header_value: &str) -> Self {
        let mut result = Self::default();

        for link in header_value.split(',') {
            let mut parts = link.split(';').map(str::trim);

            let url = parts
                .next()
                .map(|s| s.trim_start_matches('<').trim_end_matches('>'));
            let rel = parts.find_map(|part| {
                part.strip_prefix("rel=")
                    .map(|value| value.trim_matches('"'))
            });

            let (Some(url), Some(rel)) = (url, rel) else {
                continue;
            };
            let Some(page_info) = Self::extract_page_info(url) else {
                continue;
            };

            match rel {
                "next" => result.next_page_info = Some(page_info),
                "previous" => result.prev_page_info = Some(page_info),
                _ => {}
            }
        }

        result
    }

    fn extract_page_info(url: &str) -> Option<String> {
        let (_, query) = url.split_once('?')?;

        query.split('&').find_map(|param| {
            param
                .split_once('=')
                .filter(|(key, _)| *key == "page_info")
                .map(|(_, value)| value.to_string())
        })
    }
}

/// A response from the Admin API with Shopify headers already parsed.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers keyed by lowercase name.
    pub headers: HashMap<String, Vec<String>>,
    /// The parsed response body.
    pub body: serde_json::Value,
    /// Cursors from the `Link` header.
    pub pagination: PaginationInfo,
    /// Rate limit information.
    pub api_call_limit: Option<ApiCallLimit>,
    /// Seconds to wait before retrying (from `Retry-After`).
    pub retry_request_after: Option<f64>,
}

impl HttpResponse {
    /// Creates a response, parsing `Link`, `X-Shopify-Shop-Api-Call-Limit`
    /// and `Retry-After`.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: serde_json::Value) -> Self {
        let first = |name: &str| headers.get(name).and_then(|values| values.first());

        let pagination = first("link")
            .map(|link| PaginationInfo::parse_link_header(link))
            .unwrap_or_default();
        let api_call_limit = first("x-shopify-shop-api-call-limit")
            .and_then(|value| ApiCallLimit::parse(value));
        let retry_request_after = first("retry-after")
            .and_then(|value| value.trim().parse::<f64>().ok())
            .filter(|secs| secs.is_finite() && *secs >= 0.0);

        Self {
            code,
            headers,
            body,
            pagination,
            api_call_limit,
            retry_request_after,
        }
    }

    /// Returns `true` if the status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the `X-Request-Id` header value, if present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.header("x-request-id")
    }

    /// Returns the `X-Shopify-API-Deprecated-Reason` header value, if present.
    #[must_use]
    pub fn deprecation_reason(&self) -> Option<&str> {
        self.header("x-shopify-api-deprecated-reason")
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Serializes the error fields of the body into a JSON message.
    ///
    /// Picks `errors`, `error` and `error_description` and appends an
    /// `error_reference` built from the request id.
    #[must_use]
    pub fn serialize_error(&self) -> String {
        let mut error_body = serde_json::Map::new();

        for key in ["errors", "error"] {
            if let Some(value) = self.body.get(key) {
                error_body.insert(key.to_string(), value.clone());
            }
        }
        if self.body.get("error").is_some() {
            if let Some(desc) = self.body.get("error_description") {
                error_body.insert("error_description".to_string(), desc.clone());
            }
        }

        if let Some(request_id) = self.request_id() {
            error_body.insert(
                "error_reference".to_string(),
                serde_json::json!(format!(
                    "If you report this error, please include this id: {request_id}."
                )),
            );
        }

        serde_json::to_string(&error_body).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn headers(pairs: &[(&str, &str)]) -> HashMap<String, Vec<String>> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), vec![(*v).to_string()]))
            .collect()
    }

    #[test]
    fn test_is_ok_only_for_2xx() {
        assert!(HttpResponse::new(200, HashMap::new(), json!({})).is_ok());
        assert!(HttpResponse::new(299, HashMap::new(), json!({})).is_ok());
        assert!(!HttpResponse::new(404, HashMap::new(), json!({})).is_ok());
        assert!(!HttpResponse::new(429, HashMap::new(), json!({})).is_ok());
        assert!(!HttpResponse::new(500, HashMap::new(), json!({})).is_ok());
    }

    #[test]
    fn test_api_call_limit_parsing() {
        let limit = ApiCallLimit::parse("39/40").unwrap();
        assert_eq!(limit.request_count, 39);
        assert!(!limit.is_exhausted());
        assert!(ApiCallLimit::parse("40/40").unwrap().is_exhausted());

        assert!(ApiCallLimit::parse("invalid").is_none());
        assert!(ApiCallLimit::parse("40").is_none());
        assert!(ApiCallLimit::parse("40/").is_none());
        assert!(ApiCallLimit::parse("abc/def").is_none());
    }

    #[test]
    fn test_link_header_parsing() {
        let link = r#"<https://shop.myshopify.com/admin/api/2025-10/products.json?limit=250&page_info=abc123>; rel="next", <https://shop.myshopify.com/admin/api/2025-10/products.json?page_info=xyz789>; rel="previous""#;
        let info = PaginationInfo::parse_link_header(link);
        assert_eq!(info.next_page_info, Some("abc123".to_string()));
        assert_eq!(info.prev_page_info, Some("xyz789".to_string()));

        let link = r#"<https://shop.myshopify.com/admin/api/2025-10/products.json?page_info=xyz789>; rel="previous""#;
        let info = PaginationInfo::parse_link_header(link);
        assert!(info.next_page_info.is_none());
    }

    #[test]
    fn test_link_header_without_page_info_is_ignored() {
        let info = PaginationInfo::parse_link_header(
            r#"<https://shop.myshopify.com/admin/api/2025-10/products.json>; rel="next""#,
        );
        assert_eq!(info, PaginationInfo::default());
    }

    #[test]
    fn test_new_parses_shopify_headers() {
        let response = HttpResponse::new(
            429,
            headers(&[
                ("retry-after", "2.0"),
                ("x-shopify-shop-api-call-limit", "40/40"),
                ("x-request-id", "req-42"),
            ]),
            json!({}),
        );

        assert!((response.retry_request_after.unwrap() - 2.0).abs() < f64::EPSILON);
        assert_eq!(response.api_call_limit.unwrap().bucket_size, 40);
        assert_eq!(response.request_id(), Some("req-42"));
        assert!(response.pagination.next_page_info.is_none());
    }

    #[test]
    fn test_negative_retry_after_is_ignored() {
        let response = HttpResponse::new(429, headers(&[("retry-after", "-1")]), json!({}));
        assert!(response.retry_request_after.is_none());
    }

    #[test]
    fn test_serialize_error_keeps_errors_and_reference() {
        let response = HttpResponse::new(
            404,
            headers(&[("x-request-id", "abc")]),
            json!({"errors": "Not Found", "other": 1}),
        );
        let message = response.serialize_error();

        assert!(message.contains(r#""errors":"Not Found""#));
        assert!(message.contains("please include this id: abc"));
        assert!(!message.contains("other"));
    }

    #[test]
    fn test_deprecation_reason_extraction() {
        let response = HttpResponse::new(
            200,
            headers(&[("x-shopify-api-deprecated-reason", "Use GraphQL")]),
            json!({}),
        );
        assert_eq!(response.deprecation_reason(), Some("Use GraphQL"));
    }
}
