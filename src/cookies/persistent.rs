//! Cookie persistence - a backend-agnostic store with Netscape file
//! load/save, lifecycle and checkpointing.
//!
//! [`PersistentCookieStore`] wraps any [`CookieBackend`] and provides:
//! - the cookie-store operations an HTTP client uses (add, list, clear),
//! - `load_cookies(path)` / `save_cookies()` in Netscape `cookies.txt` format,
//! - `start()` / `stop()`: cookies from the configured load file are in the
//!   backend before `start()` returns,
//! - [`Checkpointable`]: checkpoints write `cookies.txt` into the checkpoint
//!   directory and recovery loads it back on the next start.
//!
//! `stop()` does not save. Callers that want a final flush call
//! `save_cookies()` (or rely on a checkpoint) themselves.
//!
//! # Example
//! ```no_run
//! use crawlcookies::cookies::config::CookieStoreConfig;
//! use crawlcookies::cookies::monster::CookieMonster;
//! use crawlcookies::cookies::persistent::PersistentCookieStore;
//!
//! let config = CookieStoreConfig::new()
//!     .with_load_path("/crawl/seed-cookies.txt")
//!     .with_save_path("/crawl/cookies.txt");
//! let store = PersistentCookieStore::new(CookieMonster::new(), config);
//!
//! store.start()?;
//! // ... crawl ...
//! store.save_cookies()?;
//! store.stop();
//! # Ok::<(), crawlcookies::base::cookieerror::CookieError>(())
//! ```

use crate::base::context::IoResultExt;
use crate::base::cookieerror::CookieError;
use crate::cookies::backend::CookieBackend;
use crate::cookies::canonicalcookie::CanonicalCookie;
use crate::cookies::checkpoint::{Checkpoint, Checkpointable};
use crate::cookies::config::{CookieStoreConfig, ErrorPolicy};
use crate::cookies::identity::{derive_key, derive_key_parts};
use crate::cookies::netscape::{self, EncodeOptions, EncodeStats, SkippedLine};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use time::OffsetDateTime;
use url::Url;

/// Lifecycle states: `Stopped → Starting → Running → Stopped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Stopped,
    Starting,
    Running,
}

/// Result of loading a cookies file.
#[derive(Debug)]
pub struct LoadReport {
    pub path: PathBuf,
    /// Cookies handed to the backend.
    pub loaded: usize,
    /// Lines dropped as malformed.
    pub skipped: Vec<SkippedLine>,
    /// IO failure absorbed under [`ErrorPolicy::Lenient`].
    pub failure: Option<CookieError>,
}

impl LoadReport {
    fn empty(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            loaded: 0,
            skipped: Vec::new(),
            failure: None,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.failure.is_none()
    }
}

/// Result of a save request.
#[derive(Debug)]
pub enum SaveOutcome {
    /// No destination configured; nothing was touched.
    Skipped,
    Written { path: PathBuf, stats: EncodeStats },
    /// Write failed and was absorbed under [`ErrorPolicy::Lenient`].
    Failed { path: PathBuf, error: CookieError },
}

/// Cookie store that persists a [`CookieBackend`] to Netscape cookie files.
pub struct PersistentCookieStore<B: CookieBackend> {
    backend: B,
    config: CookieStoreConfig,
    state: Mutex<LifecycleState>,
    /// Checkpoint file to load on the next start, ahead of `config.load_path`.
    recovery_path: Mutex<Option<PathBuf>>,
}

impl<B: CookieBackend> PersistentCookieStore<B> {
    pub fn new(backend: B, config: CookieStoreConfig) -> Self {
        Self {
            backend,
            config,
            state: Mutex::new(LifecycleState::Stopped),
            recovery_path: Mutex::new(None),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> &CookieStoreConfig {
        &self.config
    }

    fn lock_state(&self) -> MutexGuard<'_, LifecycleState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> LifecycleState {
        *self.lock_state()
    }

    pub fn is_running(&self) -> bool {
        self.state() == LifecycleState::Running
    }

    /// Prepare the backend and load the configured cookies file.
    ///
    /// No-op when already starting or running. On failure the store returns
    /// to `Stopped` and the error is returned.
    pub fn start(&self) -> Result<(), CookieError> {
        {
            let mut state = self.lock_state();
            if *state != LifecycleState::Stopped {
                return Ok(());
            }
            *state = LifecycleState::Starting;
        }

        let result = self.prepare_and_load();

        let mut state = self.lock_state();
        match result {
            Ok(()) => {
                // A stop() while starting wins.
                if *state == LifecycleState::Starting {
                    *state = LifecycleState::Running;
                    tracing::info!("cookie store running");
                }
                Ok(())
            }
            Err(e) => {
                *state = LifecycleState::Stopped;
                tracing::error!(error = %e, "cookie store failed to start");
                Err(e)
            }
        }
    }

    fn prepare_and_load(&self) -> Result<(), CookieError> {
        self.backend.prepare()?;

        let recovery = self
            .recovery_path
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        let configured = self
            .config
            .load_path
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty());
        if let Some(path) = recovery.as_deref().or(configured) {
            let report = self.load_cookies(path)?;
            tracing::info!(
                path = %report.path.display(),
                loaded = report.loaded,
                skipped = report.skipped.len(),
                "cookies loaded"
            );
        }
        Ok(())
    }

    /// Mark the store stopped. Does not save cookies.
    pub fn stop(&self) {
        let mut state = self.lock_state();
        if *state != LifecycleState::Stopped {
            tracing::info!("cookie store stopped");
        }
        *state = LifecycleState::Stopped;
    }

    /// Insert or replace a cookie.
    ///
    /// An already-expired cookie is not stored; it evicts the record in its
    /// slot instead, which is how servers delete cookies.
    pub fn add_cookie(&self, cookie: CanonicalCookie) -> Result<(), CookieError> {
        if cookie.is_expired(OffsetDateTime::now_utc()) {
            let removed = self.backend.remove(&derive_key(&cookie))?;
            tracing::debug!(
                domain = %cookie.domain,
                name = %cookie.name,
                removed,
                "expired cookie, clearing its slot"
            );
            return Ok(());
        }
        self.backend.insert(cookie)
    }

    /// Parse a `Set-Cookie` header seen on a response for `url` and store it.
    ///
    /// Returns `false` when the header does not parse.
    pub fn add_set_cookie(&self, url: &Url, header: &str) -> Result<bool, CookieError> {
        match CanonicalCookie::from_set_cookie(url, header) {
            Some(cookie) => self.add_cookie(cookie).map(|_| true),
            None => Ok(false),
        }
    }

    /// Look up the cookie occupying the `(name, domain, path)` slot.
    pub fn get_cookie(
        &self,
        name: &str,
        domain: &str,
        path: &str,
    ) -> Result<Option<CanonicalCookie>, CookieError> {
        self.backend
            .get(&derive_key_parts(name, domain, path))
    }

    /// Remove the cookie occupying the same slot as `cookie`.
    pub fn remove_cookie(&self, cookie: &CanonicalCookie) -> Result<bool, CookieError> {
        self.backend.remove(&derive_key(cookie))
    }

    /// All current cookies.
    pub fn cookies(&self) -> Result<Vec<CanonicalCookie>, CookieError> {
        self.backend.list_all()
    }

    pub fn clear(&self) -> Result<(), CookieError> {
        self.backend.clear()
    }

    /// Remove cookies that expired before `now`. Returns how many were removed.
    pub fn clear_expired(&self, now: OffsetDateTime) -> Result<usize, CookieError> {
        self.backend.remove_expired(now)
    }

    /// Load a Netscape cookies file into the backend.
    ///
    /// Malformed lines are skipped and listed in the report. IO failures are
    /// returned under [`ErrorPolicy::Strict`]; under `Lenient` they are logged
    /// and the cookies read before the failure are still loaded. Backend
    /// failures are always returned.
    pub fn load_cookies(&self, path: impl AsRef<Path>) -> Result<LoadReport, CookieError> {
        let path = path.as_ref();

        let file = match File::open(path).load_context(path) {
            Ok(file) => file,
            Err(e) => return self.absorb_load_failure(LoadReport::empty(path), e),
        };
        let decoded = netscape::decode(BufReader::new(file));

        let mut report = LoadReport::empty(path);
        report.skipped = decoded.skipped;

        if let Some(io_error) = decoded.io_error {
            let e = CookieError::load_failed(path, io_error);
            if self.config.error_policy == ErrorPolicy::Strict {
                tracing::warn!(path = %path.display(), error = %e, "cookie load aborted");
                return Err(e);
            }
            tracing::warn!(
                path = %path.display(),
                error = %e,
                parsed = decoded.cookies.len(),
                "cookie file read stopped early, keeping cookies parsed so far"
            );
            report.failure = Some(e);
        }

        report.loaded = self.backend.insert_all(decoded.cookies)?;
        tracing::debug!(
            path = %path.display(),
            loaded = report.loaded,
            skipped = report.skipped.len(),
            "cookie file loaded"
        );
        Ok(report)
    }

    fn absorb_load_failure(
        &self,
        mut report: LoadReport,
        e: CookieError,
    ) -> Result<LoadReport, CookieError> {
        tracing::warn!(path = %report.path.display(), error = %e, "unable to load cookies");
        match self.config.error_policy {
            ErrorPolicy::Strict => Err(e),
            ErrorPolicy::Lenient => {
                report.failure = Some(e);
                Ok(report)
            }
        }
    }

    /// Save to the configured destination. No-op when none is configured;
    /// an empty path counts as none.
    pub fn save_cookies(&self) -> Result<SaveOutcome, CookieError> {
        match &self.config.save_path {
            Some(path) if !path.as_os_str().is_empty() => self.save_cookies_to(path),
            _ => {
                tracing::debug!("no cookie save path configured, skipping save");
                Ok(SaveOutcome::Skipped)
            }
        }
    }

    /// Write all current cookies to `path`, flushed to disk before returning.
    ///
    /// Write failures are logged; they are returned under
    /// [`ErrorPolicy::Strict`] and reported as [`SaveOutcome::Failed`] otherwise.
    pub fn save_cookies_to(&self, path: impl AsRef<Path>) -> Result<SaveOutcome, CookieError> {
        let path = path.as_ref();

        match self.write_cookies_file(path) {
            Ok(stats) => Ok(SaveOutcome::Written {
                path: path.to_path_buf(),
                stats,
            }),
            Err(e @ CookieError::SaveFailed { .. }) => match self.config.error_policy {
                ErrorPolicy::Strict => Err(e),
                ErrorPolicy::Lenient => Ok(SaveOutcome::Failed {
                    path: path.to_path_buf(),
                    error: e,
                }),
            },
            Err(e) => Err(e),
        }
    }

    fn write_cookies_file(&self, path: &Path) -> Result<EncodeStats, CookieError> {
        let cookies = self.backend.list_all()?;
        let result = write_netscape_file(path, &cookies, &self.config.encode_options());

        match &result {
            Ok(stats) => tracing::debug!(
                path = %path.display(),
                written = stats.written,
                skipped = stats.skipped,
                "cookies saved"
            ),
            Err(e) => tracing::error!(path = %path.display(), error = %e, "unable to write cookies"),
        }
        result
    }
}

/// Write `cookies` to `path` and sync it to disk.
fn write_netscape_file(
    path: &Path,
    cookies: &[CanonicalCookie],
    options: &EncodeOptions,
) -> Result<EncodeStats, CookieError> {
    let file = File::create(path).save_context(path)?;
    let mut writer = BufWriter::new(file);
    let stats = netscape::encode(cookies, &mut writer, options).save_context(path)?;
    let file = writer
        .into_inner()
        .map_err(|e| CookieError::save_failed(path, e.into_error()))?;
    file.sync_all().save_context(path)?;
    Ok(stats)
}

impl<B: CookieBackend> Checkpointable for PersistentCookieStore<B> {
    /// Always returns write failures: a checkpoint without its cookies file is
    /// not restorable.
    fn do_checkpoint(&self, checkpoint: &Checkpoint) -> Result<(), CookieError> {
        fs::create_dir_all(checkpoint.dir()).save_context(checkpoint.dir())?;
        let path = checkpoint.scoped_path(&self.config.checkpoint_file_name);

        let stats = self.write_cookies_file(&path)?;
        tracing::info!(
            checkpoint = checkpoint.name(),
            written = stats.written,
            "cookies checkpointed"
        );
        Ok(())
    }

    fn set_recovery_checkpoint(&self, checkpoint: &Checkpoint) {
        let path = checkpoint.scoped_path(&self.config.checkpoint_file_name);
        tracing::info!(
            checkpoint = checkpoint.name(),
            path = %path.display(),
            "cookies will be restored from checkpoint"
        );
        *self
            .recovery_path
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cookies::monster::CookieMonster;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::tempdir;

    /// Backend that counts `prepare()` calls and can be told to fail it.
    struct CountingBackend {
        inner: CookieMonster,
        prepared: AtomicUsize,
        fail_prepare: bool,
    }

    impl CountingBackend {
        fn new() -> Self {
            Self {
                inner: CookieMonster::new(),
                prepared: AtomicUsize::new(0),
                fail_prepare: false,
            }
        }
    }

    impl CookieBackend for CountingBackend {
        fn prepare(&self) -> Result<(), CookieError> {
            self.prepared.fetch_add(1, Ordering::SeqCst);
            if self.fail_prepare {
                return Err(CookieError::backend("cannot open"));
            }
            Ok(())
        }
        fn insert(&self, cookie: CanonicalCookie) -> Result<(), CookieError> {
            self.inner.insert(cookie)
        }
        fn get(&self, key: &str) -> Result<Option<CanonicalCookie>, CookieError> {
            self.inner.get(key)
        }
        fn remove(&self, key: &str) -> Result<bool, CookieError> {
            self.inner.remove(key)
        }
        fn list_all(&self) -> Result<Vec<CanonicalCookie>, CookieError> {
            self.inner.list_all()
        }
        fn clear(&self) -> Result<(), CookieError> {
            self.inner.clear()
        }
        fn remove_expired(&self, now: OffsetDateTime) -> Result<usize, CookieError> {
            self.inner.remove_expired(now)
        }
    }

    const TWO_COOKIES: &str = "# seed\n\
        example.com\tTRUE\t/\tFALSE\t-1\ta\t1\n\
        example.org\tTRUE\t/\tTRUE\t1700000000\tb\t2\n";

    #[test]
    fn test_start_twice_prepares_and_loads_once() {
        let dir = tempdir().unwrap();
        let load = dir.path().join("seed.txt");
        fs::write(&load, TWO_COOKIES).unwrap();

        let store = PersistentCookieStore::new(
            CountingBackend::new(),
            CookieStoreConfig::new().with_load_path(&load),
        );
        assert!(!store.is_running());

        store.start().unwrap();
        store.backend().inner.clear().unwrap();
        store.start().unwrap();

        assert!(store.is_running());
        assert_eq!(store.backend().prepared.load(Ordering::SeqCst), 1);
        // The second start did not reload.
        assert_eq!(store.cookies().unwrap().len(), 0);
    }

    #[test]
    fn test_start_without_load_path() {
        let store = PersistentCookieStore::new(CountingBackend::new(), CookieStoreConfig::new());
        store.start().unwrap();

        assert!(store.is_running());
        assert_eq!(store.backend().prepared.load(Ordering::SeqCst), 1);
        assert!(store.cookies().unwrap().is_empty());
    }

    #[test]
    fn test_stop_transitions() {
        let store = PersistentCookieStore::new(CookieMonster::new(), CookieStoreConfig::new());

        store.stop();
        assert_eq!(store.state(), LifecycleState::Stopped);

        store.start().unwrap();
        assert_eq!(store.state(), LifecycleState::Running);

        store.stop();
        assert!(!store.is_running());
    }

    #[test]
    fn test_restart_after_stop_prepares_again() {
        let store = PersistentCookieStore::new(CountingBackend::new(), CookieStoreConfig::new());
        store.start().unwrap();
        store.stop();
        store.start().unwrap();

        assert_eq!(store.backend().prepared.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_failed_prepare_leaves_store_stopped() {
        let mut backend = CountingBackend::new();
        backend.fail_prepare = true;
        let store = PersistentCookieStore::new(backend, CookieStoreConfig::new());

        assert!(store.start().is_err());
        assert_eq!(store.state(), LifecycleState::Stopped);
    }

    #[test]
    fn test_stop_does_not_save() {
        let dir = tempdir().unwrap();
        let save = dir.path().join("out.txt");
        let store = PersistentCookieStore::new(
            CookieMonster::new(),
            CookieStoreConfig::new().with_save_path(&save),
        );

        store.start().unwrap();
        store
            .add_cookie(CanonicalCookie::new("a", "1", "example.com"))
            .unwrap();
        store.stop();

        assert!(!save.exists());
    }

    #[test]
    fn test_save_without_destination_is_noop() {
        let store = PersistentCookieStore::new(CookieMonster::new(), CookieStoreConfig::new());
        store
            .add_cookie(CanonicalCookie::new("a", "1", "example.com"))
            .unwrap();

        assert!(matches!(store.save_cookies().unwrap(), SaveOutcome::Skipped));
    }

    #[test]
    fn test_empty_save_path_is_not_configured() {
        let store = PersistentCookieStore::new(
            CookieMonster::new(),
            CookieStoreConfig::new()
                .with_save_path("")
                .with_error_policy(ErrorPolicy::Strict),
        );
        store
            .add_cookie(CanonicalCookie::new("a", "1", "example.com"))
            .unwrap();

        assert!(matches!(store.save_cookies().unwrap(), SaveOutcome::Skipped));
    }

    #[test]
    fn test_empty_load_path_is_not_configured() {
        let store = PersistentCookieStore::new(
            CountingBackend::new(),
            CookieStoreConfig::new()
                .with_load_path("")
                .with_error_policy(ErrorPolicy::Strict),
        );

        store.start().unwrap();
        assert!(store.is_running());
        assert!(store.cookies().unwrap().is_empty());
    }

    #[test]
    fn test_expired_set_cookie_deletes_slot() {
        let store = PersistentCookieStore::new(CookieMonster::new(), CookieStoreConfig::new());
        let url = Url::parse("https://example.com/").unwrap();

        assert!(store.add_set_cookie(&url, "sid=abc").unwrap());
        assert!(store.add_set_cookie(&url, "other=1").unwrap());
        assert!(store.add_set_cookie(&url, "sid=; Max-Age=0").unwrap());

        let names: Vec<String> = store.cookies().unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["other"]);
    }

    #[test]
    fn test_expired_cookie_is_not_stored() {
        let store = PersistentCookieStore::new(CookieMonster::new(), CookieStoreConfig::new());
        store
            .add_cookie(
                CanonicalCookie::new("stale", "v", "example.com")
                    .with_expiration(OffsetDateTime::from_unix_timestamp(1_000).ok()),
            )
            .unwrap();

        assert!(store.cookies().unwrap().is_empty());
    }

    #[test]
    fn test_lenient_missing_load_file() {
        let dir = tempdir().unwrap();
        let store = PersistentCookieStore::new(CookieMonster::new(), CookieStoreConfig::new());

        let report = store.load_cookies(dir.path().join("missing.txt")).unwrap();
        assert_eq!(report.loaded, 0);
        assert!(matches!(report.failure, Some(CookieError::LoadFailed { .. })));
    }

    #[test]
    fn test_strict_missing_load_file() {
        let dir = tempdir().unwrap();
        let store = PersistentCookieStore::new(
            CookieMonster::new(),
            CookieStoreConfig::new().with_error_policy(ErrorPolicy::Strict),
        );

        let err = store.load_cookies(dir.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, CookieError::LoadFailed { .. }));
    }

    #[test]
    fn test_strict_missing_load_file_fails_start() {
        let dir = tempdir().unwrap();
        let store = PersistentCookieStore::new(
            CookieMonster::new(),
            CookieStoreConfig::new()
                .with_load_path(dir.path().join("missing.txt"))
                .with_error_policy(ErrorPolicy::Strict),
        );

        assert!(store.start().is_err());
        assert!(!store.is_running());
    }

    #[test]
    fn test_lenient_unwritable_save() {
        let dir = tempdir().unwrap();
        let save = dir.path().join("no-such-dir").join("out.txt");
        let store = PersistentCookieStore::new(
            CookieMonster::new(),
            CookieStoreConfig::new().with_save_path(&save),
        );

        let outcome = store.save_cookies().unwrap();
        assert!(matches!(
            outcome,
            SaveOutcome::Failed {
                error: CookieError::SaveFailed { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_strict_unwritable_save() {
        let dir = tempdir().unwrap();
        let save = dir.path().join("no-such-dir").join("out.txt");
        let store = PersistentCookieStore::new(
            CookieMonster::new(),
            CookieStoreConfig::new()
                .with_save_path(&save)
                .with_error_policy(ErrorPolicy::Strict),
        );

        assert!(matches!(
            store.save_cookies(),
            Err(CookieError::SaveFailed { .. })
        ));
    }

    #[test]
    fn test_load_replaces_same_identity() {
        let dir = tempdir().unwrap();
        let load = dir.path().join("seed.txt");
        fs::write(
            &load,
            "Example.com\tTRUE\t/\tFALSE\t-1\tsid\told\n\
             example.com\tTRUE\t/\tFALSE\t-1\tsid\tnew\n",
        )
        .unwrap();

        let store = PersistentCookieStore::new(CookieMonster::new(), CookieStoreConfig::new());
        store
            .add_cookie(CanonicalCookie::new("sid", "runtime", "EXAMPLE.COM"))
            .unwrap();
        let report = store.load_cookies(&load).unwrap();

        assert_eq!(report.loaded, 2);
        let cookies = store.cookies().unwrap();
        assert_eq!(cookies.len(), 1);
        assert_eq!(cookies[0].value, "new");
    }

    #[test]
    fn test_add_set_cookie_and_lookup() {
        let store = PersistentCookieStore::new(CookieMonster::new(), CookieStoreConfig::new());
        let url = Url::parse("https://www.example.com/login").unwrap();

        assert!(store.add_set_cookie(&url, "sid=abc; Path=/").unwrap());
        assert!(!store.add_set_cookie(&url, "garbage").unwrap());

        let found = store.get_cookie("sid", "WWW.example.com", "/").unwrap().unwrap();
        assert_eq!(found.value, "abc");
        assert!(store.remove_cookie(&found).unwrap());
        assert!(store.cookies().unwrap().is_empty());
    }

    #[test]
    fn test_clear_and_clear_expired() {
        let store = PersistentCookieStore::new(CookieMonster::new(), CookieStoreConfig::new());
        // Loaded files may carry cookies that have since expired.
        store
            .backend()
            .insert(
                CanonicalCookie::new("old", "v", "a.com")
                    .with_expiration(OffsetDateTime::from_unix_timestamp(5).ok()),
            )
            .unwrap();
        store.add_cookie(CanonicalCookie::new("session", "v", "a.com")).unwrap();

        assert_eq!(store.clear_expired(OffsetDateTime::now_utc()).unwrap(), 1);
        assert_eq!(store.cookies().unwrap().len(), 1);

        store.clear().unwrap();
        assert!(store.cookies().unwrap().is_empty());
    }

    #[test]
    fn test_checkpoint_then_recover() {
        let dir = tempdir().unwrap();
        let checkpoint = Checkpoint::new("cp00001", dir.path().join("cp00001"));

        let store = PersistentCookieStore::new(CookieMonster::new(), CookieStoreConfig::new());
        store.start().unwrap();
        store
            .add_cookie(CanonicalCookie::new("sid", "abc", "example.com").with_secure(true))
            .unwrap();
        store.start_checkpoint(&checkpoint).unwrap();
        store.do_checkpoint(&checkpoint).unwrap();
        store.finish_checkpoint(&checkpoint).unwrap();

        assert!(checkpoint.scoped_path("cookies.txt").exists());

        let resumed = PersistentCookieStore::new(CookieMonster::new(), CookieStoreConfig::new());
        resumed.set_recovery_checkpoint(&checkpoint);
        resumed.start().unwrap();

        let cookies = resumed.cookies().unwrap();
        assert_eq!(cookies.len(), 1);
        assert_eq!(cookies[0].name, "sid");
        assert!(cookies[0].secure);
    }

    #[test]
    fn test_recovery_checkpoint_takes_precedence_over_load_path() {
        let dir = tempdir().unwrap();
        let seed = dir.path().join("seed.txt");
        fs::write(&seed, TWO_COOKIES).unwrap();

        let checkpoint = Checkpoint::new("cp00002", dir.path().join("cp00002"));
        fs::create_dir_all(checkpoint.dir()).unwrap();
        fs::write(
            checkpoint.scoped_path("cookies.txt"),
            "example.net\tTRUE\t/\tFALSE\t-1\tfrom_checkpoint\tx\n",
        )
        .unwrap();

        let store = PersistentCookieStore::new(
            CookieMonster::new(),
            CookieStoreConfig::new().with_load_path(&seed),
        );
        store.set_recovery_checkpoint(&checkpoint);
        store.start().unwrap();

        let names: Vec<String> = store.cookies().unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["from_checkpoint"]);
    }
}
