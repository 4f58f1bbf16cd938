//! Single-flight memoization.
//!
//! [`Memo`] computes a value at most once per key. Concurrent callers for
//! the same key wait for the one computation in flight and receive its
//! result. A failed computation is not stored, so the next caller starts
//! over.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::OnceCell;

/// Per-key once-only cache.
///
/// ```rust
/// use shopify_tables::engine::Memo;
///
/// # tokio_test::block_on(async {
/// let memo: Memo<&str, u32> = Memo::new();
/// let value = memo
///     .get_or_try_init("answer", || async { Ok::<_, std::io::Error>(42) })
///     .await
///     .unwrap();
/// assert_eq!(value, 42);
/// assert_eq!(memo.get(&"answer"), Some(42));
/// # });
/// ```
#[derive(Debug)]
pub struct Memo<K, V> {
    cells: Mutex<HashMap<K, Arc<OnceCell<V>>>>,
}

impl<K, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self {
            cells: Mutex::new(HashMap::new()),
        }
    }
}

impl<K, V> Memo<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Creates an empty memo.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn cell(&self, key: &K) -> Arc<OnceCell<V>> {
        let mut cells = self.cells.lock().unwrap_or_else(PoisonError::into_inner);
        cells.entry(key.clone()).or_default().clone()
    }

    /// Returns the value for `key`, running `compute` if no value is stored
    /// and no other caller is computing it.
    ///
    /// The map lock is released before `compute` runs.
    ///
    /// # Errors
    ///
    /// Returns the error of this caller's own `compute`.
    pub async fn get_or_try_init<F, Fut, E>(&self, key: K, compute: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        let cell = self.cell(&key);
        cell.get_or_try_init(compute).await.cloned()
    }

    /// Returns the stored value for `key`, if any.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<V> {
        let cells = self.cells.lock().unwrap_or_else(PoisonError::into_inner);
        cells.get(key).and_then(|cell| cell.get().cloned())
    }

    /// Forgets the value for `key`.
    pub fn invalidate(&self, key: &K) {
        let mut cells = self.cells.lock().unwrap_or_else(PoisonError::into_inner);
        cells.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_concurrent_callers_share_one_computation() {
        let memo: Memo<&'static str, String> = Memo::new();
        let calls = AtomicUsize::new(0);

        let compute = || async {
            calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            Ok::<_, String>("Snowdevil".to_string())
        };

        let (a, b, c, d) = tokio::join!(
            memo.get_or_try_init("shop_name", compute),
            memo.get_or_try_init("shop_name", compute),
            memo.get_or_try_init("shop_name", compute),
            memo.get_or_try_init("shop_name", compute),
        );

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        for value in [a, b, c, d] {
            assert_eq!(value.unwrap(), "Snowdevil");
        }
    }

    #[tokio::test]
    async fn test_failure_is_not_cached() {
        let memo: Memo<u8, u32> = Memo::new();

        let first = memo.get_or_try_init(1, || async { Err::<u32, _>("down") }).await;
        assert_eq!(first, Err("down"));
        assert_eq!(memo.get(&1), None);

        let second = memo.get_or_try_init(1, || async { Ok::<_, &str>(7) }).await;
        assert_eq!(second, Ok(7));
    }

    #[tokio::test]
    async fn test_keys_are_independent_and_invalidate_forgets() {
        let memo: Memo<u8, u32> = Memo::new();
        memo.get_or_try_init(1, || async { Ok::<_, ()>(10) }).await.unwrap();
        memo.get_or_try_init(2, || async { Ok::<_, ()>(20) }).await.unwrap();

        assert_eq!(memo.get(&1), Some(10));
        assert_eq!(memo.get(&2), Some(20));

        memo.invalidate(&1);
        assert_eq!(memo.get(&1), None);

        let recomputed = memo.get_or_try_init(1, || async { Ok::<_, ()>(11) }).await;
        assert_eq!(recomputed, Ok(11));
    }
}
