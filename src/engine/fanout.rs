//! Parent/child fan-out.
//!
//! [`fan_out`] pages through a parent listing and, for each parent, lists
//! its children through a factory, emitting one [`ParentChild`] per child.
//! The sink's budget counts emitted pairs only; parents are never counted.
//! The same child under two parents is emitted twice.
//!
//! Parents are a closed set, modelled by [`Parent`]:
//!
//! - [`Parent::Product`]: children are listed under `product_id`
//! - [`Parent::Collection`]: children are listed under `collection_id`

use tokio_util::sync::CancellationToken;

use crate::clients::RestClient;
use crate::engine::pagination::{fetch_or_cancel, next_page_size};
use crate::engine::{list_all, ChildLister, ListOutcome, PageSource, ResourceLister, RowSink, StopReason};
use crate::rest::resources::{Collection, CollectionListParams, CustomCollection, Product, SmartCollection};
use crate::rest::{PageRequest, ResourceError, ResourceResponse, RestResource, MAX_PAGE_SIZE};

/// Which kind of collection a [`CollectionRef`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionKind {
    /// Listed from `custom_collections`.
    Custom,
    /// Listed from `smart_collections`.
    Smart,
}

/// Identity of a custom or smart collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionRef {
    /// The collection id.
    pub id: Option<u64>,
    /// The collection title.
    pub title: Option<String>,
    /// Whether the collection is custom or smart.
    pub kind: CollectionKind,
}

impl CollectionRef {
    fn from_collection<C: Collection>(collection: &C, kind: CollectionKind) -> Self {
        Self {
            id: collection.collection_id(),
            title: collection.collection_title().map(ToString::to_string),
            kind,
        }
    }
}

/// A parent item whose children can be listed.
#[derive(Debug, Clone, PartialEq)]
pub enum Parent {
    /// A product; children are its variants.
    Product(Product),
    /// A custom or smart collection; children are its products.
    Collection(CollectionRef),
}

impl Parent {
    /// The parent's id, if the API returned one.
    #[must_use]
    pub const fn id(&self) -> Option<u64> {
        match self {
            Self::Product(product) => product.id,
            Self::Collection(collection) => collection.id,
        }
    }

    /// The path placeholder children are listed under.
    #[must_use]
    pub const fn id_name(&self) -> &'static str {
        match self {
            Self::Product(_) => "product_id",
            Self::Collection(_) => "collection_id",
        }
    }
}

/// One child together with the parent it was listed under.
#[derive(Debug, Clone, PartialEq)]
pub struct ParentChild<C> {
    /// The parent the child was listed under.
    pub parent: Parent,
    /// The child item.
    pub child: C,
}

impl<'a, R: RestResource> ChildLister<'a, R> {
    /// Lists `R` under `parent`. Returns `None` if the parent has no id.
    #[must_use]
    pub fn for_parent(client: &'a RestClient, parent: &Parent, params: &'a R::AllParams) -> Option<Self> {
        parent
            .id()
            .map(|id| Self::new(client, parent.id_name(), id, params))
    }
}

/// Lists every product as a [`Parent`].
pub struct ProductParents<'a> {
    inner: ResourceLister<'a, Product>,
}

impl<'a> ProductParents<'a> {
    /// Creates a product parent listing on `client`.
    #[must_use]
    pub fn new(client: &'a RestClient) -> Self {
        Self {
            inner: ResourceLister::with_defaults(client),
        }
    }
}

impl PageSource for ProductParents<'_> {
    type Item = Parent;

    fn resource(&self) -> &'static str {
        Product::NAME
    }

    async fn fetch_page(&self, page: &PageRequest) -> Result<ResourceResponse<Vec<Parent>>, ResourceError> {
        let response = self.inner.fetch_page(page).await?;
        Ok(response.map(|products| products.into_iter().map(Parent::Product).collect()))
    }
}

/// Lists custom collections, then smart collections, as [`Parent`]s.
///
/// The two listings are chained behind one cursor: a cursor is prefixed
/// with the phase it belongs to, and the end of the custom phase hands out
/// a cursor that starts the smart phase.
pub struct CollectionLister<'a> {
    client: &'a RestClient,
    params: CollectionListParams,
}

const CUSTOM_PHASE: &str = "custom:";
const SMART_PHASE: &str = "smart:";

impl<'a> CollectionLister<'a> {
    /// Creates a collection parent listing on `client`, starting with
    /// custom collections.
    #[must_use]
    pub fn new(client: &'a RestClient) -> Self {
        Self {
            client,
            params: CollectionListParams::default(),
        }
    }

    async fn fetch_phase<C: RestResource<AllParams = CollectionListParams> + Collection>(
        &self,
        kind: CollectionKind,
        limit: u32,
        page_info: Option<&str>,
    ) -> Result<(Vec<Parent>, Option<String>), ResourceError> {
        let request = match page_info {
            Some(cursor) if !cursor.is_empty() => PageRequest::after(limit, cursor),
            _ => PageRequest::first(limit),
        };
        let (collections, next) = C::list_page(self.client, &self.params, &request)
            .await?
            .into_parts();

        let parents = collections
            .iter()
            .map(|c| Parent::Collection(CollectionRef::from_collection(c, kind)))
            .collect();
        Ok((parents, next))
    }
}

impl PageSource for CollectionLister<'_> {
    type Item = Parent;

    fn resource(&self) -> &'static str {
        "Collection"
    }

    async fn fetch_page(&self, page: &PageRequest) -> Result<ResourceResponse<Vec<Parent>>, ResourceError> {
        let cursor = page.page_info();

        let (items, next) = match cursor.and_then(|c| c.strip_prefix(SMART_PHASE)) {
            Some(smart_cursor) => {
                let (items, next) = self
                    .fetch_phase::<SmartCollection>(CollectionKind::Smart, page.limit(), Some(smart_cursor))
                    .await?;
                (items, next.map(|c| format!("{SMART_PHASE}{c}")))
            }
            None => {
                let custom_cursor = cursor.and_then(|c| c.strip_prefix(CUSTOM_PHASE));
                let (items, next) = self
                    .fetch_phase::<CustomCollection>(CollectionKind::Custom, page.limit(), custom_cursor)
                    .await?;
                let next = next.map_or_else(
                    || SMART_PHASE.to_string(),
                    |c| format!("{CUSTOM_PHASE}{c}"),
                );
                (items, Some(next))
            }
        };

        Ok(ResourceResponse::new(
            items,
            crate::clients::PaginationInfo {
                prev_page_info: None,
                next_page_info: next,
            },
            None,
            None,
        ))
    }
}

/// Lists the children of every parent of `parents` into `sink`.
///
/// `children` builds the child source for one parent; returning `None`
/// skips that parent. Parents are fetched in full pages and never count
/// against the sink's budget. Once the budget is spent no further parent
/// or child page is requested.
///
/// # Errors
///
/// The first parent or child fetch error aborts the whole fan-out and is
/// returned unchanged. Pairs emitted before it stay in the sink.
pub async fn fan_out<P, C, F, K>(
    parents: &P,
    mut children: F,
    sink: &mut K,
    cancel: &CancellationToken,
) -> Result<ListOutcome, ResourceError>
where
    P: PageSource<Item = Parent>,
    C: PageSource,
    F: FnMut(&Parent) -> Option<C>,
    K: RowSink<ParentChild<C::Item>>,
{
    let mut outcome = ListOutcome::default();
    let mut cursor: Option<String> = None;

    loop {
        if next_page_size(sink.rows_remaining()).is_none() {
            return Ok(outcome.stopped(StopReason::BudgetReached));
        }

        let request = match cursor.take() {
            Some(page_info) => PageRequest::after(MAX_PAGE_SIZE, page_info),
            None => PageRequest::first(MAX_PAGE_SIZE),
        };
        let Some(page) = fetch_or_cancel(parents, &request, cancel).await? else {
            return Ok(outcome.stopped(StopReason::Cancelled));
        };
        outcome.pages += 1;

        let (parent_items, next_page_info) = page.into_parts();
        for parent in parent_items {
            if cancel.is_cancelled() {
                return Ok(outcome.stopped(StopReason::Cancelled));
            }

            let Some(child_source) = children(&parent) else {
                tracing::debug!(
                    component = "engine",
                    operation = "fan_out",
                    resource = parents.resource(),
                    "skipping parent without id"
                );
                continue;
            };

            let mut pairs = PairSink {
                parent: &parent,
                inner: &mut *sink,
            };
            let child_outcome = list_all(&child_source, &mut pairs, cancel).await?;
            outcome.absorb(child_outcome);

            match child_outcome.stop {
                StopReason::Exhausted => {}
                StopReason::BudgetReached | StopReason::Cancelled => {
                    tracing::debug!(
                        component = "engine",
                        operation = "fan_out",
                        resource = child_source.resource(),
                        emitted = outcome.emitted,
                        "fan-out stopped"
                    );
                    return Ok(outcome.stopped(child_outcome.stop));
                }
            }
        }

        match next_page_info {
            Some(page_info) => cursor = Some(page_info),
            None => return Ok(outcome.stopped(StopReason::Exhausted)),
        }
    }
}

/// Pairs each child with the current parent.
struct PairSink<'p, 's, K> {
    parent: &'p Parent,
    inner: &'s mut K,
}

impl<C, K> RowSink<C> for PairSink<'_, '_, K>
where
    K: RowSink<ParentChild<C>>,
{
    fn accept(&mut self, child: C) {
        self.inner.accept(ParentChild {
            parent: self.parent.clone(),
            child,
        });
    }

    fn rows_remaining(&self) -> Option<u64> {
        self.inner.rows_remaining()
    }
}
