use crate::base::cookieerror::CookieError;
use crate::cookies::backend::CookieBackend;
use crate::cookies::canonicalcookie::CanonicalCookie;
use crate::cookies::identity::derive_key;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use time::OffsetDateTime;

/// A stored cookie plus the sequence number of its slot's first write.
#[derive(Debug, Clone)]
struct Slot {
    seq: u64,
    cookie: CanonicalCookie,
}

/// In-memory cookie backend.
/// Modeled after Chromium's `net::CookieMonster`, keyed by identity key.
///
/// Cheap to clone; clones share the same cookie map.
#[derive(Clone)]
pub struct CookieMonster {
    // Store: Map<IdentityKey, Slot>
    // Using DashMap for high concurrency.
    store: Arc<DashMap<String, Slot>>,
    next_seq: Arc<AtomicU64>,
}

impl Default for CookieMonster {
    fn default() -> Self {
        Self::new()
    }
}

impl CookieMonster {
    pub fn new() -> Self {
        Self {
            store: Arc::new(DashMap::new()),
            next_seq: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn set_canonical_cookie(&self, cookie: CanonicalCookie) {
        let key = derive_key(&cookie);

        // Replacing keeps the slot's position so saves stay stable.
        match self.store.entry(key) {
            Entry::Occupied(mut slot) => slot.get_mut().cookie = cookie,
            Entry::Vacant(slot) => {
                slot.insert(Slot {
                    seq: self.next_seq.fetch_add(1, Ordering::Relaxed),
                    cookie,
                });
            }
        }
    }

    /// Get total cookie count.
    pub fn total_cookie_count(&self) -> usize {
        self.store.len()
    }

    /// Snapshot of all cookies in slot order.
    pub fn iter_all_cookies(&self) -> impl Iterator<Item = CanonicalCookie> {
        let mut slots: Vec<Slot> = self.store.iter().map(|e| e.value().clone()).collect();
        slots.sort_by_key(|s| s.seq);
        slots.into_iter().map(|s| s.cookie)
    }
}

impl CookieBackend for CookieMonster {
    fn prepare(&self) -> Result<(), CookieError> {
        tracing::debug!("in-memory cookie backend ready");
        Ok(())
    }

    fn insert(&self, cookie: CanonicalCookie) -> Result<(), CookieError> {
        self.set_canonical_cookie(cookie);
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<CanonicalCookie>, CookieError> {
        Ok(self.store.get(key).map(|slot| slot.cookie.clone()))
    }

    fn remove(&self, key: &str) -> Result<bool, CookieError> {
        Ok(self.store.remove(key).is_some())
    }

    fn list_all(&self) -> Result<Vec<CanonicalCookie>, CookieError> {
        Ok(self.iter_all_cookies().collect())
    }

    fn clear(&self) -> Result<(), CookieError> {
        self.store.clear();
        Ok(())
    }

    fn remove_expired(&self, now: OffsetDateTime) -> Result<usize, CookieError> {
        let before = self.store.len();
        self.store.retain(|_, slot| !slot.cookie.is_expired(now));
        Ok(before.saturating_sub(self.store.len()))
    }

    fn len(&self) -> Result<usize, CookieError> {
        Ok(self.total_cookie_count())
    }
}
