//! Ergonomic error context helpers.
//!
//! Provides extension traits for adding context to `Result` types,
//! converting IO errors into path-carrying `CookieError` variants.

use crate::base::cookieerror::CookieError;
use std::io;
use std::path::Path;

/// Extension trait for adding context to IO Results.
pub trait IoResultExt<T> {
    /// Add load context to an IO error.
    ///
    /// # Example
    /// ```ignore
    /// use crawlcookies::base::context::IoResultExt;
    ///
    /// let file = File::open(path).load_context(path)?;
    /// // Error: "Unable to read cookies from /tmp/cookies.txt: No such file or directory"
    /// ```
    fn load_context(self, path: &Path) -> Result<T, CookieError>;

    /// Add save context to an IO error.
    fn save_context(self, path: &Path) -> Result<T, CookieError>;
}

impl<T> IoResultExt<T> for Result<T, io::Error> {
    fn load_context(self, path: &Path) -> Result<T, CookieError> {
        self.map_err(|e| CookieError::load_failed(path, e))
    }

    fn save_context(self, path: &Path) -> Result<T, CookieError> {
        self.map_err(|e| CookieError::save_failed(path, e))
    }
}
