//! Page sources: one remote page fetch per call.

use crate::clients::RestClient;
use crate::rest::{PageRequest, ResourceError, ResourceResponse, RestResource};

/// Something that can fetch one page of items for a [`PageRequest`].
///
/// The engine owns the cursor and the page size; a source only performs
/// the fetch.
#[allow(async_fn_in_trait)]
pub trait PageSource {
    /// The decoded item type.
    type Item;

    /// Name used in log events.
    fn resource(&self) -> &'static str;

    /// Fetches the page described by `page`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the remote call fails.
    async fn fetch_page(
        &self,
        page: &PageRequest,
    ) -> Result<ResourceResponse<Vec<Self::Item>>, ResourceError>;
}

/// Lists a top-level resource, e.g. `orders` or `customers`.
pub struct ResourceLister<'a, R: RestResource> {
    client: &'a RestClient,
    params: R::AllParams,
}

impl<'a, R: RestResource> ResourceLister<'a, R> {
    /// Lists with `params` on the first page.
    pub const fn new(client: &'a RestClient, params: R::AllParams) -> Self {
        Self { client, params }
    }

    /// Lists with the resource's default parameters.
    pub fn with_defaults(client: &'a RestClient) -> Self {
        Self::new(client, R::default_list_params())
    }
}

impl<R: RestResource> PageSource for ResourceLister<'_, R> {
    type Item = R;

    fn resource(&self) -> &'static str {
        R::NAME
    }

    async fn fetch_page(&self, page: &PageRequest) -> Result<ResourceResponse<Vec<R>>, ResourceError> {
        R::list_page(self.client, &self.params, page).await
    }
}

/// Lists a resource nested under one parent, e.g. a product's variants.
pub struct ChildLister<'a, R: RestResource> {
    client: &'a RestClient,
    parent_id_name: &'static str,
    parent_id: u64,
    params: &'a R::AllParams,
}

impl<'a, R: RestResource> ChildLister<'a, R> {
    /// Lists `R` under the parent identified by `parent_id_name = parent_id`.
    pub const fn new(
        client: &'a RestClient,
        parent_id_name: &'static str,
        parent_id: u64,
        params: &'a R::AllParams,
    ) -> Self {
        Self {
            client,
            parent_id_name,
            parent_id,
            params,
        }
    }

    /// Returns the parent id.
    #[must_use]
    pub const fn parent_id(&self) -> u64 {
        self.parent_id
    }
}

impl<R: RestResource> PageSource for ChildLister<'_, R> {
    type Item = R;

    fn resource(&self) -> &'static str {
        R::NAME
    }

    async fn fetch_page(&self, page: &PageRequest) -> Result<ResourceResponse<Vec<R>>, ResourceError> {
        R::list_page_with_parent(self.client, self.parent_id_name, self.parent_id, self.params, page)
            .await
    }
}
