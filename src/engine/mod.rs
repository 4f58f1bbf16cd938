//! Resource retrieval engine.
//!
//! - [`list_all`]: cursor-following listing under a row budget
//! - [`fan_out`]: parent/child listing emitting [`ParentChild`] pairs
//! - [`get_by_id`]: single lookup with not-found suppression
//! - [`Memo`]: single-flight per-key memoization
//!
//! Everything here is sequential within one call. Pages and parents are
//! never fetched in parallel, so items reach the sink in server order.
//! External cancellation goes through a
//! [`CancellationToken`](tokio_util::sync::CancellationToken), checked
//! before every page fetch and every parent.

mod fanout;
mod lookup;
mod memo;
mod pagination;
mod sink;
mod source;

pub use fanout::{
    fan_out, CollectionKind, CollectionLister, CollectionRef, Parent, ParentChild, ProductParents,
};
pub use lookup::get_by_id;
pub use memo::Memo;
pub use pagination::{list_all, ListOutcome, StopReason};
pub use sink::{CollectingSink, MapSink, RowSink};
pub use source::{ChildLister, PageSource, ResourceLister};
