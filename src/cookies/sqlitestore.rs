//! SQLite-backed cookie backend.
//!
//! One row per identity key. The connection is opened by
//! [`prepare`](CookieBackend::prepare); every other operation fails with
//! [`CookieError::BackendNotPrepared`] until then.
//!
//! Row order (`rowid`) is the order in which each slot was first written;
//! replacing a cookie updates its row in place.

use crate::base::cookieerror::CookieError;
use crate::cookies::backend::CookieBackend;
use crate::cookies::canonicalcookie::CanonicalCookie;
use crate::cookies::identity::derive_key;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};
use time::OffsetDateTime;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS cookies (
    identity_key TEXT PRIMARY KEY NOT NULL,
    name TEXT NOT NULL,
    value TEXT NOT NULL,
    domain TEXT NOT NULL,
    path TEXT NOT NULL,
    creation_utc INTEGER NOT NULL,
    expires_utc INTEGER,
    is_secure INTEGER NOT NULL,
    is_httponly INTEGER NOT NULL,
    domain_specified INTEGER NOT NULL
);";

const UPSERT: &str = "INSERT INTO cookies
    (identity_key, name, value, domain, path, creation_utc, expires_utc, is_secure, is_httponly, domain_specified)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
    ON CONFLICT(identity_key) DO UPDATE SET
        name = excluded.name,
        value = excluded.value,
        domain = excluded.domain,
        path = excluded.path,
        creation_utc = excluded.creation_utc,
        expires_utc = excluded.expires_utc,
        is_secure = excluded.is_secure,
        is_httponly = excluded.is_httponly,
        domain_specified = excluded.domain_specified";

const SELECT_COLUMNS: &str =
    "SELECT name, value, domain, path, creation_utc, expires_utc, is_secure, is_httponly, domain_specified FROM cookies";

/// Embedded-database cookie backend.
pub struct SqliteCookieBackend {
    /// Database file (None = private in-memory database).
    path: Option<PathBuf>,
    conn: Mutex<Option<Connection>>,
}

impl SqliteCookieBackend {
    /// Backend stored in the database file at `path`, opened by `prepare()`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            conn: Mutex::new(None),
        }
    }

    /// Backend using a private in-memory database.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            conn: Mutex::new(None),
        }
    }

    pub fn is_prepared(&self) -> bool {
        self.conn
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    fn with_conn<T>(
        &self,
        f: impl FnOnce(&mut Connection) -> rusqlite::Result<T>,
    ) -> Result<T, CookieError> {
        let mut guard = self.conn.lock().unwrap_or_else(PoisonError::into_inner);
        let conn = guard.as_mut().ok_or(CookieError::BackendNotPrepared)?;
        Ok(f(conn)?)
    }
}

fn upsert(conn: &Connection, cookie: &CanonicalCookie) -> rusqlite::Result<usize> {
    conn.execute(
        UPSERT,
        params![
            derive_key(cookie),
            cookie.name,
            cookie.value,
            cookie.domain,
            cookie.path,
            cookie.creation_time.unix_timestamp(),
            cookie.expiration_time.map(|t| t.unix_timestamp()),
            cookie.secure,
            cookie.http_only,
            cookie.domain_attribute_specified,
        ],
    )
}

fn row_to_cookie(row: &Row<'_>) -> rusqlite::Result<CanonicalCookie> {
    let creation: i64 = row.get(4)?;
    let expires: Option<i64> = row.get(5)?;

    let mut cookie = CanonicalCookie::new(
        row.get::<_, String>(0)?,
        row.get::<_, String>(1)?,
        row.get::<_, String>(2)?,
    )
    .with_path(row.get::<_, String>(3)?)
    .with_expiration(expires.and_then(|s| OffsetDateTime::from_unix_timestamp(s).ok()))
    .with_secure(row.get(6)?)
    .with_http_only(row.get(7)?)
    .with_domain_attribute_specified(row.get(8)?);

    if let Ok(created) = OffsetDateTime::from_unix_timestamp(creation) {
        cookie.creation_time = created;
    }
    Ok(cookie)
}

impl CookieBackend for SqliteCookieBackend {
    fn prepare(&self) -> Result<(), CookieError> {
        let mut guard = self.conn.lock().unwrap_or_else(PoisonError::into_inner);
        if guard.is_some() {
            return Ok(());
        }

        let conn = match &self.path {
            Some(path) => Connection::open(path)?,
            None => Connection::open_in_memory()?,
        };
        conn.execute_batch(SCHEMA)?;

        tracing::debug!(path = ?self.path, "sqlite cookie backend opened");
        *guard = Some(conn);
        Ok(())
    }

    fn insert(&self, cookie: CanonicalCookie) -> Result<(), CookieError> {
        self.with_conn(|conn| upsert(conn, &cookie).map(|_| ()))
    }

    /// Loads the whole batch in one transaction.
    fn insert_all(&self, cookies: Vec<CanonicalCookie>) -> Result<usize, CookieError> {
        self.with_conn(|conn| {
            let tx = conn.transaction()?;
            for cookie in &cookies {
                upsert(&tx, cookie)?;
            }
            tx.commit()?;
            Ok(cookies.len())
        })
    }

    fn get(&self, key: &str) -> Result<Option<CanonicalCookie>, CookieError> {
        self.with_conn(|conn| {
            conn.query_row(
                &format!("{} WHERE identity_key = ?1", SELECT_COLUMNS),
                [key],
                row_to_cookie,
            )
            .optional()
        })
    }

    fn remove(&self, key: &str) -> Result<bool, CookieError> {
        self.with_conn(|conn| {
            conn.execute("DELETE FROM cookies WHERE identity_key = ?1", [key])
                .map(|n| n > 0)
        })
    }

    fn list_all(&self) -> Result<Vec<CanonicalCookie>, CookieError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!("{} ORDER BY rowid", SELECT_COLUMNS))?;
            let rows = stmt.query_map([], row_to_cookie)?;
            rows.collect()
        })
    }

    fn clear(&self) -> Result<(), CookieError> {
        self.with_conn(|conn| conn.execute("DELETE FROM cookies", []).map(|_| ()))
    }

    fn remove_expired(&self, now: OffsetDateTime) -> Result<usize, CookieError> {
        // Stored expirations are whole seconds; anything at or before a
        // fractional `now` has already passed.
        let threshold = if now.nanosecond() > 0 {
            now.unix_timestamp() + 1
        } else {
            now.unix_timestamp()
        };

        self.with_conn(|conn| {
            conn.execute(
                "DELETE FROM cookies WHERE expires_utc IS NOT NULL AND expires_utc < ?1",
                [threshold],
            )
        })
    }

    fn len(&self) -> Result<usize, CookieError> {
        self.with_conn(|conn| {
            conn.query_row("SELECT COUNT(*) FROM cookies", [], |row| row.get::<_, i64>(0))
                .map(|n| n as usize)
        })
    }
}
