//! Per-match-id async locks.

use riftfetch_core::MatchId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

#[derive(Debug, Default)]
struct Slot {
    mutex: Arc<AsyncMutex<()>>,
    /// Holders plus waiters, including waiters whose `lock` is still pending.
    users: usize,
}

/// Serializes work on the same match id while leaving distinct ids independent.
///
/// Entries are created on demand and removed when the last holder or waiter
/// goes away, cancelled waiters included, so the table only ever holds ids
/// that are in flight.
#[derive(Debug, Default)]
pub struct KeyedLocks {
    slots: Mutex<HashMap<MatchId, Slot>>,
}

/// Held while working on one id.
pub struct KeyGuard<'a> {
    owner: &'a KeyedLocks,
    key: MatchId,
    guard: Option<OwnedMutexGuard<()>>,
}

impl KeyedLocks {
    pub fn new() -> Self {
        Self::default()
    }

    fn slots(&self) -> MutexGuard<'_, HashMap<MatchId, Slot>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Wait for exclusive access to `key`.
    pub async fn lock(&self, key: &MatchId) -> KeyGuard<'_> {
        let mutex = {
            let mut slots = self.slots();
            let slot = slots.entry(key.clone()).or_default();
            slot.users += 1;
            Arc::clone(&slot.mutex)
        };

        // Registered before waiting: dropping this future releases the claim.
        let mut held = KeyGuard {
            owner: self,
            key: key.clone(),
            guard: None,
        };
        held.guard = Some(mutex.lock_owned().await);
        held
    }

    /// Number of ids currently held or awaited.
    pub fn in_flight(&self) -> usize {
        self.slots().len()
    }
}

impl Drop for KeyGuard<'_> {
    fn drop(&mut self) {
        drop(self.guard.take());
        let mut slots = self.owner.slots();
        if let Some(slot) = slots.get_mut(&self.key) {
            slot.users = slot.users.saturating_sub(1);
            if slot.users == 0 {
                slots.remove(&self.key);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::task::Poll;
    use std::time::Duration;

    fn id(raw: &str) -> MatchId {
        MatchId::new(raw).unwrap()
    }

    #[tokio::test]
    async fn test_entries_removed_after_release() {
        let locks = KeyedLocks::new();
        {
            let _a = locks.lock(&id("EUW1_1")).await;
            let _b = locks.lock(&id("EUW1_2")).await;
            assert_eq!(locks.in_flight(), 2);
        }
        assert_eq!(locks.in_flight(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_same_key_is_exclusive() {
        let locks = Arc::new(KeyedLocks::new());
        let active = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..5 {
            let locks = Arc::clone(&locks);
            let active = Arc::clone(&active);
            let peak = Arc::clone(&peak);
            handles.push(tokio::spawn(async move {
                let _guard = locks.lock(&id("EUW1_1")).await;
                let now = active.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(10)).await;
                active.fetch_sub(1, Ordering::SeqCst);
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(peak.load(Ordering::SeqCst), 1);
        assert_eq!(locks.in_flight(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_distinct_keys_do_not_block() {
        let locks = KeyedLocks::new();
        let _held = locks.lock(&id("EUW1_1")).await;
        let other = tokio::time::timeout(Duration::from_millis(1), locks.lock(&id("EUW1_2"))).await;
        assert!(other.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_waiter_cancelled_before_holder_leaves() {
        let locks = KeyedLocks::new();
        let holder = locks.lock(&id("EUW1_1")).await;

        let waited =
            tokio::time::timeout(Duration::from_millis(5), locks.lock(&id("EUW1_1"))).await;
        assert!(waited.is_err());
        assert_eq!(locks.in_flight(), 1);

        drop(holder);
        assert_eq!(locks.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_waiter_cancelled_after_holder_leaves() {
        let locks = KeyedLocks::new();
        let holder = locks.lock(&id("EUW1_1")).await;

        let waiter_id = id("EUW1_1");
        let mut waiter = Box::pin(locks.lock(&waiter_id));
        assert!(matches!(futures::poll!(waiter.as_mut()), Poll::Pending));

        drop(holder);
        assert_eq!(locks.in_flight(), 1);

        drop(waiter);
        assert_eq!(locks.in_flight(), 0);

        // The id is usable again afterwards.
        let _again = locks.lock(&id("EUW1_1")).await;
        assert_eq!(locks.in_flight(), 1);
    }
}
