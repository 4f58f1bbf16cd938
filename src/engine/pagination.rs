//! Cursor-following list engine.
//!
//! [`list_all`] drives a [`PageSource`] until one of:
//!
//! - the last page has been emitted (no `next` cursor)
//! - the sink's row budget reaches zero, possibly mid-page
//! - the cancellation token fires
//! - a page fetch fails, in which case the error is returned and the items
//!   of earlier pages stay in the sink
//!
//! Every page asks for `min(remaining budget, 250)` items. Rate-limited
//! fetches are retried by the transport; the engine never retries.

use tokio_util::sync::CancellationToken;

use crate::engine::{PageSource, RowSink};
use crate::rest::{PageRequest, ResourceError, ResourceResponse, MAX_PAGE_SIZE};

/// Why a listing stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StopReason {
    /// Every page was read.
    #[default]
    Exhausted,
    /// The sink's row budget reached zero.
    BudgetReached,
    /// The cancellation token fired.
    Cancelled,
}

/// Summary of one finished listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListOutcome {
    /// Items handed to the sink.
    pub emitted: u64,
    /// Remote page fetches that completed.
    pub pages: u32,
    /// Why the listing stopped.
    pub stop: StopReason,
}

impl ListOutcome {
    pub(crate) const fn stopped(mut self, stop: StopReason) -> Self {
        self.stop = stop;
        self
    }

    pub(crate) fn absorb(&mut self, other: Self) {
        self.emitted += other.emitted;
        self.pages += other.pages;
    }
}

/// Page size for the next request given the sink's remaining budget, or
/// `None` once the budget is spent.
pub(crate) fn next_page_size(remaining: Option<u64>) -> Option<u32> {
    match remaining {
        Some(0) => None,
        Some(rows) => Some(u32::try_from(rows).map_or(MAX_PAGE_SIZE, |r| r.min(MAX_PAGE_SIZE))),
        None => Some(MAX_PAGE_SIZE),
    }
}

/// Fetches one page unless `cancel` fires first. Returns `Ok(None)` when
/// cancelled; an in-flight request, including a retry backoff, is dropped.
pub(crate) async fn fetch_or_cancel<S: PageSource>(
    source: &S,
    request: &PageRequest,
    cancel: &CancellationToken,
) -> Result<Option<ResourceResponse<Vec<S::Item>>>, ResourceError> {
    if cancel.is_cancelled() {
        return Ok(None);
    }

    tokio::select! {
        biased;
        () = cancel.cancelled() => Ok(None),
        result = source.fetch_page(request) => match result {
            Ok(page) => Ok(Some(page)),
            Err(error) => {
                tracing::error!(
                    component = "engine",
                    operation = "list_page",
                    resource = source.resource(),
                    error = %error,
                    "page fetch failed"
                );
                Err(error)
            }
        },
    }
}

/// Lists every item of `source` into `sink`.
///
/// # Errors
///
/// Returns the first page fetch error unchanged. Items from pages fetched
/// before the failure have already been handed to the sink.
///
/// # Example
///
/// ```rust,ignore
/// use shopify_tables::engine::{list_all, CollectingSink, ResourceLister};
/// use shopify_tables::rest::resources::Order;
/// use tokio_util::sync::CancellationToken;
///
/// let source = ResourceLister::<Order>::with_defaults(&client);
/// let mut sink = CollectingSink::with_budget(Some(10));
/// let outcome = list_all(&source, &mut sink, &CancellationToken::new()).await?;
/// assert!(outcome.emitted <= 10);
/// ```
pub async fn list_all<S, K>(
    source: &S,
    sink: &mut K,
    cancel: &CancellationToken,
) -> Result<ListOutcome, ResourceError>
where
    S: PageSource,
    K: RowSink<S::Item>,
{
    let mut outcome = ListOutcome::default();
    let mut cursor: Option<String> = None;

    loop {
        let Some(limit) = next_page_size(sink.rows_remaining()) else {
            return Ok(outcome.stopped(StopReason::BudgetReached));
        };

        let request = match cursor.take() {
            Some(page_info) => PageRequest::after(limit, page_info),
            None => PageRequest::first(limit),
        };

        let Some(page) = fetch_or_cancel(source, &request, cancel).await? else {
            tracing::debug!(
                component = "engine",
                operation = "list_all",
                resource = source.resource(),
                emitted = outcome.emitted,
                "listing cancelled"
            );
            return Ok(outcome.stopped(StopReason::Cancelled));
        };
        outcome.pages += 1;

        let (items, next_page_info) = page.into_parts();
        for item in items {
            sink.accept(item);
            outcome.emitted += 1;

            if sink.rows_remaining() == Some(0) {
                tracing::debug!(
                    component = "engine",
                    operation = "list_all",
                    resource = source.resource(),
                    emitted = outcome.emitted,
                    pages = outcome.pages,
                    "row budget reached"
                );
                return Ok(outcome.stopped(StopReason::BudgetReached));
            }
        }

        match next_page_info {
            Some(page_info) => cursor = Some(page_info),
            None => return Ok(outcome.stopped(StopReason::Exhausted)),
        }
    }
}
