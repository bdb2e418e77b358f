//! Storage backends for [`PersistentCookieStore`](crate::cookies::persistent::PersistentCookieStore).
//!
//! A backend owns the live cookie set. The store drives it through this trait
//! and handles file loading, saving and lifecycle on top.
//!
//! Implementations must keep at most one record per
//! [identity key](crate::cookies::identity::derive_key): inserting a cookie
//! whose key is already present replaces the old record.
//!
//! Reference implementations:
//! - [`CookieMonster`](crate::cookies::monster::CookieMonster): in-memory map
//! - [`SqliteCookieBackend`](crate::cookies::sqlitestore::SqliteCookieBackend):
//!   embedded SQLite database (feature `sqlite`)

use crate::base::cookieerror::CookieError;
use crate::cookies::canonicalcookie::CanonicalCookie;
use time::OffsetDateTime;

/// Storage capability set required by the cookie store.
///
/// Methods take `&self`; backends synchronize internally so fetch workers can
/// insert concurrently.
pub trait CookieBackend: Send + Sync {
    /// Allocate or open backend resources.
    ///
    /// Called once by `start()`, before any cookies are loaded.
    fn prepare(&self) -> Result<(), CookieError>;

    /// Insert a cookie, replacing any record with the same identity key.
    fn insert(&self, cookie: CanonicalCookie) -> Result<(), CookieError>;

    /// Insert a batch of decoded cookies. Returns how many were inserted.
    ///
    /// Later cookies in the batch replace earlier ones with the same key.
    fn insert_all(&self, cookies: Vec<CanonicalCookie>) -> Result<usize, CookieError> {
        let mut count = 0;
        for cookie in cookies {
            self.insert(cookie)?;
            count += 1;
        }
        Ok(count)
    }

    /// Look up a cookie by identity key.
    fn get(&self, key: &str) -> Result<Option<CanonicalCookie>, CookieError>;

    /// Remove the cookie with this identity key. Returns whether one existed.
    fn remove(&self, key: &str) -> Result<bool, CookieError>;

    /// All current cookies, in the order their slots were first written.
    fn list_all(&self) -> Result<Vec<CanonicalCookie>, CookieError>;

    /// Remove every cookie.
    fn clear(&self) -> Result<(), CookieError>;

    /// Remove cookies that expired before `now`. Returns how many were removed.
    fn remove_expired(&self, now: OffsetDateTime) -> Result<usize, CookieError>;

    /// Number of stored cookies.
    fn len(&self) -> Result<usize, CookieError> {
        Ok(self.list_all()?.len())
    }
}
