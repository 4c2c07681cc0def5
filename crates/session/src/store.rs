//! Persisted key-value session store.
//!
//! Mirrors browser local storage: string keys, string values, synchronous
//! access, and change notifications that fire only in *other* tabs.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::StoreError;
use crate::notify::{Broadcaster, Subscription};

/// Synchronous local key-value collaborator.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// Changes made through *other* handles to the same storage.
    ///
    /// Stores that cannot observe foreign writes return `None`.
    fn subscribe(&self) -> Option<StorageSubscription> {
        None
    }
}

impl<S> SessionStore for Arc<S>
where
    S: SessionStore + ?Sized,
{
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }

    fn subscribe(&self) -> Option<StorageSubscription> {
        (**self).subscribe()
    }
}

/// Handle identity of one tab/window sharing a store.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct TabId(u64);

impl core::fmt::Display for TabId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "tab-{}", self.0)
    }
}

/// One write to the shared storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEvent {
    pub key: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub origin: TabId,
}

/// Storage notifications for one tab.
///
/// The tab's own writes are never delivered. Foreign writes queue until
/// drained.
#[derive(Debug)]
pub struct StorageSubscription {
    tab: TabId,
    inner: Subscription<StorageEvent>,
}

impl StorageSubscription {
    pub fn tab(&self) -> TabId {
        self.tab
    }

    /// Foreign events received since the last call.
    pub fn drain(&self) -> Vec<StorageEvent> {
        self.inner.drain()
    }
}

#[derive(Debug, Default)]
struct SharedStorage {
    data: Mutex<HashMap<String, String>>,
    events: Broadcaster<StorageEvent>,
    next_tab: AtomicU64,
}

/// Shared in-memory storage with per-tab handles.
///
/// Every handle from [`InMemorySessionStore::open_tab`] sees the same data;
/// writes notify subscribers of the other handles.
#[derive(Debug, Clone)]
pub struct InMemorySessionStore {
    shared: Arc<SharedStorage>,
    tab: TabId,
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        let shared = Arc::new(SharedStorage::default());
        let tab = TabId(shared.next_tab.fetch_add(1, Ordering::Relaxed));
        Self { shared, tab }
    }

    /// Another handle onto the same storage, as a second browser tab would be.
    pub fn open_tab(&self) -> Self {
        let tab = TabId(self.shared.next_tab.fetch_add(1, Ordering::Relaxed));
        Self {
            shared: Arc::clone(&self.shared),
            tab,
        }
    }

    pub fn tab_id(&self) -> TabId {
        self.tab
    }

    fn write(&self, key: &str, value: Option<&str>) -> Result<(), StoreError> {
        let old_value = {
            let mut data = self.shared.data.lock().map_err(|_| StoreError::Poisoned)?;
            match value {
                Some(v) => data.insert(key.to_string(), v.to_string()),
                None => data.remove(key),
            }
        };

        if old_value.as_deref() == value {
            return Ok(());
        }

        self.shared.events.publish(StorageEvent {
            key: key.to_string(),
            old_value,
            new_value: value.map(str::to_string),
            origin: self.tab,
        });
        Ok(())
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let data = self.shared.data.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(data.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.write(key, Some(value))
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.write(key, None)
    }

    fn subscribe(&self) -> Option<StorageSubscription> {
        let tab = self.tab;
        Some(StorageSubscription {
            tab,
            inner: self.shared.events.subscribe_where(move |event: &StorageEvent| event.origin != tab),
        })
    }
}
