//! # crawlcookies
//!
//! Persistent cookie storage for web crawlers.
//!
//! `crawlcookies` keeps the cookies a crawl collects in a pluggable backend,
//! seeds them from a Netscape `cookies.txt` file at startup, writes them back
//! on request, and snapshots them into crawl checkpoints so a resumed crawl
//! picks up its sessions.
//!
//! ## Features
//!
//! - **Netscape format**: curl/wget compatible read and write, tolerant of
//!   malformed lines
//! - **Backends**: concurrent in-memory map or embedded SQLite (`sqlite`
//!   feature, on by default)
//! - **Lifecycle**: idempotent start/stop with load-at-start
//! - **Checkpoints**: save into and recover from checkpoint directories
//! - **Set-Cookie ingestion**: store cookies straight from response headers
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use crawlcookies::cookies::{CanonicalCookie, CookieMonster, CookieStoreConfig, PersistentCookieStore};
//!
//! let store = PersistentCookieStore::new(
//!     CookieMonster::new(),
//!     CookieStoreConfig::new()
//!         .with_load_path("seed.txt")
//!         .with_save_path("cookies.txt"),
//! );
//! store.start()?;
//! store.add_cookie(CanonicalCookie::new("sid", "abc", "example.com"))?;
//! store.save_cookies()?;
//! store.stop();
//! # Ok::<(), crawlcookies::base::cookieerror::CookieError>(())
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Error types and IO context helpers
//! - [`cookies`] - Cookie model, codec, backends and the persistent store

pub mod base;
pub mod cookies;
