//! Persistent cookie storage for crawlers.
//!
//! This module provides:
//!
//! - **Model**: [`CanonicalCookie`](canonicalcookie::CanonicalCookie) and its
//!   [identity key](identity::derive_key)
//! - **Codec**: Netscape `cookies.txt` read/write ([`netscape`])
//! - **Backends**: in-memory [`CookieMonster`](monster::CookieMonster) and
//!   SQLite `SqliteCookieBackend` (feature `sqlite`), both behind
//!   [`CookieBackend`](backend::CookieBackend)
//! - **Store**: [`PersistentCookieStore`](persistent::PersistentCookieStore)
//!   with load-at-start, save-on-request and checkpoint participation
//!
//! # Architecture
//!
//! | Component | Type | Responsibility |
//! |-----------|------|----------------|
//! | Cookie jar | [`CookieMonster`](monster::CookieMonster) | Concurrent in-memory map |
//! | Disk store | `SqliteCookieBackend` | Embedded database |
//! | Persistence | [`PersistentCookieStore`](persistent::PersistentCookieStore) | Lifecycle, files, checkpoints |
//!
//! # Load and save Netscape files
//!
//! ```rust,no_run
//! use crawlcookies::cookies::config::CookieStoreConfig;
//! use crawlcookies::cookies::monster::CookieMonster;
//! use crawlcookies::cookies::persistent::PersistentCookieStore;
//!
//! let store = PersistentCookieStore::new(
//!     CookieMonster::new(),
//!     CookieStoreConfig::new().with_save_path("cookies.txt"),
//! );
//! let report = store.load_cookies("seed-cookies.txt")?;
//! println!("Loaded {} cookies, skipped {} lines", report.loaded, report.skipped.len());
//! store.save_cookies()?;
//! # Ok::<(), crawlcookies::base::cookieerror::CookieError>(())
//! ```
//!
//! # File format
//!
//! Seven TAB-separated fields per line: domain, cross-subdomain flag, path,
//! secure flag, expiration (Unix seconds, `-1` for session cookies), name and
//! value. Lines starting with `#` and blank lines are ignored. The format is
//! the one curl and wget read with `--cookie`/`--load-cookies`.

pub mod backend;
pub mod canonicalcookie;
pub mod checkpoint;
pub mod config;
pub mod identity;
pub mod monster;
pub mod netscape;
pub mod persistent;
#[cfg(feature = "sqlite")]
pub mod sqlitestore;

pub use backend::CookieBackend;
pub use canonicalcookie::CanonicalCookie;
pub use checkpoint::{Checkpoint, Checkpointable};
pub use config::{CookieStoreConfig, ErrorPolicy};
pub use monster::CookieMonster;
pub use netscape::CrossSubdomainPolicy;
pub use persistent::{LifecycleState, LoadReport, PersistentCookieStore, SaveOutcome};
#[cfg(feature = "sqlite")]
pub use sqlitestore::SqliteCookieBackend;
