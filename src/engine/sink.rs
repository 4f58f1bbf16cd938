//! Row sinks: the engine's only output.
//!
//! The engine pushes one item at a time through [`RowSink::accept`] and
//! polls [`RowSink::rows_remaining`] after every item and before every page
//! fetch. `Some(0)` stops the listing; `None` means no budget.

/// Receiver of listed items.
pub trait RowSink<T> {
    /// Accepts one item, in server order.
    fn accept(&mut self, item: T);

    /// Remaining row budget, or `None` when unbounded.
    fn rows_remaining(&self) -> Option<u64>;
}

/// Collects items into a `Vec`, optionally bounded by a row budget.
///
/// ```rust
/// use shopify_tables::engine::{CollectingSink, RowSink};
///
/// let mut sink = CollectingSink::with_budget(Some(2));
/// sink.accept("a");
/// assert_eq!(sink.rows_remaining(), Some(1));
/// sink.accept("b");
/// assert_eq!(sink.rows_remaining(), Some(0));
/// assert_eq!(sink.into_items(), vec!["a", "b"]);
/// ```
#[derive(Debug, Clone)]
pub struct CollectingSink<T> {
    items: Vec<T>,
    budget: Option<u64>,
}

impl<T> CollectingSink<T> {
    /// Creates a sink without a budget.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            items: Vec::new(),
            budget: None,
        }
    }

    /// Creates a sink that stops the listing after `budget` items.
    #[must_use]
    pub const fn with_budget(budget: Option<u64>) -> Self {
        Self {
            items: Vec::new(),
            budget,
        }
    }

    /// Returns the items collected so far.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consumes the sink and returns the collected items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

impl<T> Default for CollectingSink<T> {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl<T> RowSink<T> for CollectingSink<T> {
    fn accept(&mut self, item: T) {
        self.items.push(item);
    }

    fn rows_remaining(&self) -> Option<u64> {
        self.budget
            .map(|budget| budget.saturating_sub(self.items.len() as u64))
    }
}

/// Transforms each item before handing it to an inner sink. The budget is
/// the inner sink's.
pub struct MapSink<'a, S, F> {
    inner: &'a mut S,
    f: F,
}

impl<'a, S, F> MapSink<'a, S, F> {
    /// Wraps `inner`, applying `f` to every accepted item.
    pub fn new(inner: &'a mut S, f: F) -> Self {
        Self { inner, f }
    }
}

impl<T, U, S, F> RowSink<T> for MapSink<'_, S, F>
where
    S: RowSink<U>,
    F: FnMut(T) -> U,
{
    fn accept(&mut self, item: T) {
        let mapped = (self.f)(item);
        self.inner.accept(mapped);
    }

    fn rows_remaining(&self) -> Option<u64> {
        self.inner.rows_remaining()
    }
}
