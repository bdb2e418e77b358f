//! Cookie identity keys.
//!
//! Two cookies with the same key occupy the same slot in a store, whatever
//! their values or expirations. The key is the ordered triple
//! `(name, normalized domain, path)` serialized as a compact JSON array, so
//! distinct triples never collide.
//!
//! Domain normalization:
//! - a domain without any `.` gets the reserved [`LOCAL_DOMAIN_SUFFIX`]
//!   appended, keeping bare hosts like `localhost` apart from real domains
//!   such as `localhost.com`;
//! - the result is lower-cased without regard to locale.

use crate::cookies::canonicalcookie::CanonicalCookie;

/// Appended to dot-less hostnames before keying.
pub const LOCAL_DOMAIN_SUFFIX: &str = ".local";

/// Derive the identity key for a cookie.
pub fn derive_key(cookie: &CanonicalCookie) -> String {
    derive_key_parts(&cookie.name, &cookie.domain, &cookie.path)
}

/// Derive the identity key from raw fields.
pub fn derive_key_parts(name: &str, domain: &str, path: &str) -> String {
    let domain = normalize_domain(domain);
    let path = if path.is_empty() { "/" } else { path };

    // Serializing a string array cannot fail.
    serde_json::to_string(&[name, domain.as_str(), path]).unwrap_or_default()
}

/// Normalize a cookie domain for keying.
pub fn normalize_domain(domain: &str) -> String {
    let domain = if domain.contains('.') {
        domain.to_string()
    } else {
        format!("{}{}", domain, LOCAL_DOMAIN_SUFFIX)
    };

    domain.to_lowercase()
}
