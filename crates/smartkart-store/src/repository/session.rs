//! # Session Repository
//!
//! Keeps each client's [`Session`] (cart + last invoice) keyed by session id.
//!
//! ## Thread Safety
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session Locking                                      │
//! │                                                                         │
//! │  std Mutex<HashMap<id, Slot>>   held only to find/create a slot        │
//! │            │                                                            │
//! │            ▼                                                            │
//! │  Arc<tokio Mutex<Session>>      one per session, held by a handler     │
//! │                                 for its whole read-modify-write        │
//! │                                                                         │
//! │  Two requests for the same session run one after the other:            │
//! │  no lost cart updates, no checkout snapshot taken mid-change.          │
//! │  Requests for different sessions never wait on each other.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The state is updated in place under the session lock, so "read at the
//! start, write at the end" of a request is the lock/unlock pair.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use smartkart_core::Session;
use tracing::debug;

/// Shared, individually locked session state.
pub type SessionHandle = Arc<tokio::sync::Mutex<Session>>;

/// Default idle lifetime of a session.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Key-value store of sessions keyed by client identity.
pub trait SessionStore: Send + Sync {
    /// Returns the session for `session_id`, creating an empty one if the
    /// id is unknown.
    fn session(&self, session_id: &str) -> SessionHandle;

    /// Returns the session for `session_id` if it exists. Never creates one.
    fn find(&self, session_id: &str) -> Option<SessionHandle>;
}

#[derive(Debug)]
struct Slot {
    handle: SessionHandle,
    last_access: Instant,
}

/// In-process session store.
///
/// Sessions idle for longer than the TTL are dropped the next time a new
/// session is created, unless a request is still holding them.
#[derive(Debug)]
pub struct MemorySessionStore {
    slots: Mutex<HashMap<String, Slot>>,
    ttl: Duration,
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        MemorySessionStore::new(DEFAULT_SESSION_TTL)
    }
}

impl MemorySessionStore {
    pub fn new(ttl: Duration) -> Self {
        MemorySessionStore {
            slots: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    fn slots(&self) -> MutexGuard<'_, HashMap<String, Slot>> {
        // A panic while holding this lock cannot leave a slot half-written
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Drops idle sessions that no request is holding.
    fn purge_expired(slots: &mut HashMap<String, Slot>, ttl: Duration, now: Instant) {
        let before = slots.len();
        slots.retain(|_, slot| {
            let idle = now.saturating_duration_since(slot.last_access);
            idle < ttl || Arc::strong_count(&slot.handle) > 1
        });

        let purged = before - slots.len();
        if purged > 0 {
            debug!(purged, remaining = slots.len(), "Purged idle sessions");
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn session(&self, session_id: &str) -> SessionHandle {
        let now = Instant::now();
        let mut slots = self.slots();

        if let Some(slot) = slots.get_mut(session_id) {
            slot.last_access = now;
            return slot.handle.clone();
        }

        Self::purge_expired(&mut slots, self.ttl, now);

        let handle = SessionHandle::default();
        slots.insert(
            session_id.to_string(),
            Slot {
                handle: handle.clone(),
                last_access: now,
            },
        );
        debug!(session = %session_id, live = slots.len(), "Created session");
        handle
    }

    fn find(&self, session_id: &str) -> Option<SessionHandle> {
        let mut slots = self.slots();
        let slot = slots.get_mut(session_id)?;
        slot.last_access = Instant::now();
        Some(slot.handle.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use smartkart_core::{Money, Product, Weight, WeightValidator};

    fn tomato_line() -> smartkart_core::CartItem {
        let tomatoes = Product::variable_weight(
            "V1",
            "Tomatoes",
            "Vegetables",
            "Aisle 1",
            Money::from_paise(4000),
        );
        WeightValidator::default()
            .validate(&tomatoes, Weight::from_grams(500), Utc::now())
            .unwrap()
    }

    fn live(store: &MemorySessionStore) -> usize {
        store.slots().len()
    }

    #[tokio::test]
    async fn test_same_id_shares_state() {
        let store = MemorySessionStore::default();

        store.session("a").lock().await.cart.add(tomato_line()).unwrap();

        let again = store.session("a");
        assert_eq!(again.lock().await.cart.item_count(), 1);
        assert_eq!(live(&store), 1);
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let store = MemorySessionStore::default();

        store.session("a").lock().await.cart.add(tomato_line()).unwrap();

        assert!(store.session("b").lock().await.cart.is_empty());
        assert_eq!(live(&store), 2);
        assert!(store.find("a").is_some());
        assert!(store.find("c").is_none());
    }

    #[tokio::test]
    async fn test_find_does_not_create() {
        let store = MemorySessionStore::default();

        assert!(store.find("ghost").is_none());
        assert_eq!(live(&store), 0);

        store.session("real").lock().await.cart.add(tomato_line()).unwrap();
        let found = store.find("real").unwrap();
        assert_eq!(found.lock().await.cart.item_count(), 1);
        assert_eq!(live(&store), 1);
    }

    #[tokio::test]
    async fn test_concurrent_adds_are_not_lost() {
        let store = Arc::new(MemorySessionStore::default());

        let mut tasks = Vec::new();
        for _ in 0..32 {
            let store = store.clone();
            tasks.push(tokio::spawn(async move {
                let handle = store.session("shared");
                let mut session = handle.lock().await;
                tokio::task::yield_now().await;
                session.cart.add(tomato_line()).unwrap();
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        assert_eq!(store.session("shared").lock().await.cart.item_count(), 32);
    }

    #[tokio::test]
    async fn test_idle_sessions_are_purged() {
        let store = MemorySessionStore::new(Duration::ZERO);

        drop(store.session("old"));
        let _new = store.session("new");

        assert!(store.find("old").is_none());
        assert!(store.find("new").is_some());
    }

    #[tokio::test]
    async fn test_held_sessions_survive_purge() {
        let store = MemorySessionStore::new(Duration::ZERO);

        let held = store.session("held");
        let _other = store.session("other");

        assert!(store.find("held").is_some());
        drop(held);
    }
}
