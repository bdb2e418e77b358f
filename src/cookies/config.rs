//! Cookie store configuration.
//!
//! Paths are expected to be resolved by the caller; this module only carries
//! them. The struct deserializes with `serde` so it can sit inside a crawl-job
//! configuration file, with every field optional.

use crate::cookies::netscape::{CrossSubdomainPolicy, EncodeOptions};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Product name written in the cookie file header.
pub const DEFAULT_PRODUCT: &str = "crawlcookies";

/// File name used inside a checkpoint directory.
pub const DEFAULT_CHECKPOINT_FILE: &str = "cookies.txt";

/// What to do with IO failures while loading or saving.
///
/// Malformed lines never abort a load under either policy; they are always
/// skipped and listed in the [`LoadReport`](crate::cookies::persistent::LoadReport).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// Log the failure and carry on with whatever cookies are available.
    #[default]
    Lenient,
    /// Return the failure to the caller.
    Strict,
}

/// Configuration options for [`PersistentCookieStore`](crate::cookies::persistent::PersistentCookieStore).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CookieStoreConfig {
    /// Cookies file loaded on start (None = start empty).
    pub load_path: Option<PathBuf>,

    /// Destination for `save_cookies()` (None = saving is a no-op).
    pub save_path: Option<PathBuf>,

    /// IO failure handling for load and save.
    pub error_policy: ErrorPolicy,

    /// How the "include subdomains" column is written.
    pub cross_subdomain: CrossSubdomainPolicy,

    /// Product name in the `# <product> Cookie File` header.
    pub header_product: String,

    /// File name written inside checkpoint directories.
    pub checkpoint_file_name: String,
}

impl Default for CookieStoreConfig {
    fn default() -> Self {
        Self {
            load_path: None,
            save_path: None,
            error_policy: ErrorPolicy::default(),
            cross_subdomain: CrossSubdomainPolicy::default(),
            header_product: DEFAULT_PRODUCT.to_string(),
            checkpoint_file_name: DEFAULT_CHECKPOINT_FILE.to_string(),
        }
    }
}

impl CookieStoreConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_load_path(mut self, path: impl AsRef<Path>) -> Self {
        self.load_path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn with_save_path(mut self, path: impl AsRef<Path>) -> Self {
        self.save_path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }

    pub fn with_cross_subdomain(mut self, policy: CrossSubdomainPolicy) -> Self {
        self.cross_subdomain = policy;
        self
    }

    pub fn with_header_product(mut self, product: impl Into<String>) -> Self {
        self.header_product = product.into();
        self
    }

    pub fn with_checkpoint_file_name(mut self, name: impl Into<String>) -> Self {
        self.checkpoint_file_name = name.into();
        self
    }

    /// Codec options derived from this configuration.
    pub fn encode_options(&self) -> EncodeOptions {
        EncodeOptions {
            product: self.header_product.clone(),
            cross_subdomain: self.cross_subdomain,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CookieStoreConfig::default();
        assert!(config.load_path.is_none());
        assert!(config.save_path.is_none());
        assert_eq!(config.error_policy, ErrorPolicy::Lenient);
        assert_eq!(config.cross_subdomain, CrossSubdomainPolicy::AlwaysTrue);
        assert_eq!(config.header_product, "crawlcookies");
        assert_eq!(config.checkpoint_file_name, "cookies.txt");
    }

    #[test]
    fn test_builder() {
        let config = CookieStoreConfig::new()
            .with_load_path("/data/in.txt")
            .with_save_path("/data/out.txt")
            .with_error_policy(ErrorPolicy::Strict)
            .with_header_product("Crawler");

        assert_eq!(config.load_path.as_deref(), Some(Path::new("/data/in.txt")));
        assert_eq!(config.save_path.as_deref(), Some(Path::new("/data/out.txt")));
        assert_eq!(config.encode_options().product, "Crawler");
    }

    #[test]
    fn test_deserialize_partial() {
        let config: CookieStoreConfig = serde_json::from_str(
            r#"{"save_path": "/var/crawl/cookies.txt", "cross_subdomain": "preserve"}"#,
        )
        .unwrap();

        assert_eq!(
            config.save_path.as_deref(),
            Some(Path::new("/var/crawl/cookies.txt"))
        );
        assert_eq!(config.cross_subdomain, CrossSubdomainPolicy::Preserve);
        assert_eq!(config.error_policy, ErrorPolicy::Lenient);
        assert_eq!(config.header_product, DEFAULT_PRODUCT);
    }

    #[test]
    fn test_deserialize_strict_policy() {
        let config: CookieStoreConfig =
            serde_json::from_str(r#"{"error_policy": "strict"}"#).unwrap();
        assert_eq!(config.error_policy, ErrorPolicy::Strict);
    }
}
