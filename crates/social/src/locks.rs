use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::OwnedMutexGuard;

/// Async locks keyed by a pair of ids.
///
/// The record store has no uniqueness constraints we control, so the
/// check-then-insert operations in the linker serialize per key to keep
/// concurrent callers from both passing the existence check.
#[derive(Default)]
pub struct PairLocks {
    inner: Mutex<HashMap<(String, String), Arc<tokio::sync::Mutex<()>>>>,
}

impl PairLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock on the (a, b) key exactly as given.
    pub async fn lock(&self, a: &str, b: &str) -> OwnedMutexGuard<()> {
        self.lock_key((a.to_string(), b.to_string())).await
    }

    /// Lock on the unordered {a, b} key: both orderings contend on the
    /// same mutex, matching the symmetric friendship relation.
    pub async fn lock_unordered(&self, a: &str, b: &str) -> OwnedMutexGuard<()> {
        let key = if a <= b {
            (a.to_string(), b.to_string())
        } else {
            (b.to_string(), a.to_string())
        };
        self.lock_key(key).await
    }

    async fn lock_key(&self, key: (String, String)) -> OwnedMutexGuard<()> {
        let mutex = {
            let mut map = self.inner.lock().expect("pair lock map poisoned");
            let mutex = Arc::clone(
                map.entry(key)
                    .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(()))),
            );
            // An entry only the map references has no holder and no waiter;
            // sweep those so the map does not grow with every distinct pair.
            map.retain(|_, m| Arc::strong_count(m) > 1);
            mutex
        };
        mutex.lock_owned().await
    }

    #[cfg(test)]
    fn key_count(&self) -> usize {
        self.inner.lock().expect("pair lock map poisoned").len()
    }
}
