//! Response wrapper for resource reads.
//!
//! [`ResourceResponse<T>`] pairs decoded data with the page cursor, rate
//! limit and request id of the response it came from. It derefs to `T`:
//!
//! ```rust,ignore
//! let page = Product::list_page(&client, &ProductListParams::default(), &PageRequest::first(50)).await?;
//! for product in page.iter() {
//!     println!("{:?}", product.title);
//! }
//! if let Some(cursor) = page.next_page_info() {
//!     // pass `cursor` unmodified into the next request
//! }
//! ```

use std::ops::Deref;

use serde::de::DeserializeOwned;

use crate::clients::{ApiCallLimit, HttpResponse, PaginationInfo};
use crate::rest::ResourceError;

/// Decoded data plus response metadata.
#[derive(Debug, Clone)]
pub struct ResourceResponse<T> {
    data: T,
    pagination: PaginationInfo,
    rate_limit: Option<ApiCallLimit>,
    request_id: Option<String>,
}

impl<T> ResourceResponse<T> {
    /// Creates a response from its parts.
    #[must_use]
    pub const fn new(
        data: T,
        pagination: PaginationInfo,
        rate_limit: Option<ApiCallLimit>,
        request_id: Option<String>,
    ) -> Self {
        Self {
            data,
            pagination,
            rate_limit,
            request_id,
        }
    }

    /// Consumes the response and returns the data.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.data
    }

    /// Consumes the response, returning the data and the next-page cursor.
    #[must_use]
    pub fn into_parts(self) -> (T, Option<String>) {
        (self.data, self.pagination.next_page_info)
    }

    /// Returns `true` if the server announced a following page.
    #[must_use]
    pub const fn has_next_page(&self) -> bool {
        self.pagination.next_page_info.is_some()
    }

    /// Returns the opaque cursor for the next page.
    #[must_use]
    pub fn next_page_info(&self) -> Option<&str> {
        self.pagination.next_page_info.as_deref()
    }

    /// Returns the opaque cursor for the previous page.
    #[must_use]
    pub fn prev_page_info(&self) -> Option<&str> {
        self.pagination.prev_page_info.as_deref()
    }

    /// Returns the rate limit state reported with this response.
    #[must_use]
    pub const fn rate_limit(&self) -> Option<&ApiCallLimit> {
        self.rate_limit.as_ref()
    }

    /// Returns the `X-Request-Id` of this response.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    /// Transforms the data, keeping the metadata.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> ResourceResponse<U>
    where
        F: FnOnce(T) -> U,
    {
        ResourceResponse {
            data: f(self.data),
            pagination: self.pagination,
            rate_limit: self.rate_limit,
            request_id: self.request_id,
        }
    }
}

impl<T: DeserializeOwned> ResourceResponse<T> {
    /// Decodes `body[key]` of `response` into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Deserialization`] if `key` is absent or does
    /// not decode into `T`.
    pub fn from_http_response(
        response: HttpResponse,
        resource: &'static str,
        key: &str,
    ) -> Result<Self, ResourceError> {
        let request_id = response.request_id().map(ToString::to_string);
        let HttpResponse {
            mut body,
            pagination,
            api_call_limit,
            ..
        } = response;

        let data_value = body
            .get_mut(key)
            .map(serde_json::Value::take)
            .ok_or_else(|| ResourceError::Deserialization {
                resource,
                key: key.to_string(),
                message: "missing key in response body".to_string(),
            })?;

        let data: T =
            serde_json::from_value(data_value).map_err(|e| ResourceError::Deserialization {
                resource,
                key: key.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            data,
            pagination,
            rate_limit: api_call_limit,
            request_id,
        })
    }
}

impl<T> Deref for ResourceResponse<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

// Verify ResourceResponse is Send + Sync when T is Send + Sync
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceResponse<Vec<String>>>();
};
