use time::{Duration, OffsetDateTime};
use url::Url;

/// Represents a cookie.
/// Modeled after Chromium's `net::CanonicalCookie`, reduced to the fields a
/// crawl needs to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalCookie {
    pub name: String,
    pub value: String,
    pub domain: String,
    pub path: String,
    pub creation_time: OffsetDateTime,
    /// `None` for session cookies. Whole seconds only.
    pub expiration_time: Option<OffsetDateTime>,
    pub secure: bool,
    pub http_only: bool,
    /// Netscape "include subdomains" column.
    pub domain_attribute_specified: bool,
}

impl CanonicalCookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            domain: domain.into(),
            path: "/".to_string(),
            creation_time: OffsetDateTime::now_utc(),
            expiration_time: None,
            secure: false,
            http_only: false,
            domain_attribute_specified: false,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Sets the expiration, dropping sub-second precision.
    pub fn with_expiration(mut self, expiration: Option<OffsetDateTime>) -> Self {
        self.expiration_time = expiration.map(truncate_to_second);
        self
    }

    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    pub fn with_http_only(mut self, http_only: bool) -> Self {
        self.http_only = http_only;
        self
    }

    pub fn with_domain_attribute_specified(mut self, specified: bool) -> Self {
        self.domain_attribute_specified = specified;
        self
    }

    pub fn is_session(&self) -> bool {
        self.expiration_time.is_none()
    }

    pub fn is_expired(&self, current_time: OffsetDateTime) -> bool {
        match self.expiration_time {
            Some(expiry) => expiry < current_time,
            None => false,
        }
    }

    /// Expiration as milliseconds since the Unix epoch.
    pub fn expiration_millis(&self) -> Option<i64> {
        self.expiration_time
            .map(|t| (t.unix_timestamp_nanos() / 1_000_000) as i64)
    }

    /// Build a cookie from a `Set-Cookie` header observed on a response for `url`.
    ///
    /// - An explicit `Domain` makes a domain cookie (leading dot stripped).
    /// - Without one, the cookie is host-only for the URL's host.
    /// - `Max-Age` wins over `Expires`.
    ///
    /// Returns `None` when the header does not parse.
    pub fn from_set_cookie(url: &Url, header: &str) -> Option<Self> {
        let parsed = match cookie::Cookie::parse(header) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::debug!(url = %url, error = %e, "ignoring unparseable Set-Cookie");
                return None;
            }
        };

        let now = OffsetDateTime::now_utc();

        let (domain, domain_attribute_specified) = match parsed.domain() {
            Some(d) => (d.trim_start_matches('.').to_lowercase(), true),
            None => (url.host_str().unwrap_or("").to_lowercase(), false),
        };

        let path = match parsed.path() {
            Some(p) if !p.is_empty() => p.to_string(),
            _ => "/".to_string(),
        };

        let expiration = match parsed.max_age() {
            Some(max_age) if max_age <= Duration::ZERO => Some(OffsetDateTime::UNIX_EPOCH),
            Some(max_age) => now.checked_add(max_age),
            None => parsed.expires_datetime(),
        };

        let mut cookie = Self::new(parsed.name(), parsed.value(), domain)
            .with_path(path)
            .with_expiration(expiration)
            .with_secure(parsed.secure().unwrap_or(false))
            .with_http_only(parsed.http_only().unwrap_or(false))
            .with_domain_attribute_specified(domain_attribute_specified);
        cookie.creation_time = now;

        Some(cookie)
    }
}

fn truncate_to_second(t: OffsetDateTime) -> OffsetDateTime {
    t.replace_nanosecond(0).unwrap_or(t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = CanonicalCookie::new("sid", "abc", "example.com");
        assert_eq!(c.path, "/");
        assert!(c.is_session());
        assert!(!c.secure);
        assert!(!c.domain_attribute_specified);
    }

    #[test]
    fn test_expiration_is_whole_seconds() {
        let t = OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap()
            + Duration::milliseconds(750);
        let c = CanonicalCookie::new("a", "b", "example.com").with_expiration(Some(t));

        assert_eq!(c.expiration_millis(), Some(1_700_000_000_000));
    }

    #[test]
    fn test_is_expired() {
        let past = OffsetDateTime::from_unix_timestamp(1_000).unwrap();
        let c = CanonicalCookie::new("a", "b", "example.com").with_expiration(Some(past));
        assert!(c.is_expired(OffsetDateTime::now_utc()));

        let session = CanonicalCookie::new("a", "b", "example.com");
        assert!(!session.is_expired(OffsetDateTime::now_utc()));
    }

    #[test]
    fn test_from_set_cookie_host_only() {
        let url = Url::parse("https://WWW.Example.com/foo/bar").unwrap();
        let c = CanonicalCookie::from_set_cookie(&url, "sid=abc; Secure; HttpOnly").unwrap();

        assert_eq!(c.name, "sid");
        assert_eq!(c.value, "abc");
        assert_eq!(c.domain, "www.example.com");
        assert_eq!(c.path, "/");
        assert!(c.secure);
        assert!(c.http_only);
        assert!(!c.domain_attribute_specified);
        assert!(c.is_session());
    }

    #[test]
    fn test_from_set_cookie_domain_and_expiry() {
        let url = Url::parse("https://a.example.com/").unwrap();
        let c = CanonicalCookie::from_set_cookie(
            &url,
            "id=1; Domain=.Example.com; Path=/app; Expires=Wed, 21 Oct 2037 07:28:00 GMT",
        )
        .unwrap();

        assert_eq!(c.domain, "example.com");
        assert_eq!(c.path, "/app");
        assert!(c.domain_attribute_specified);
        assert_eq!(
            c.expiration_time.map(|t| t.unix_timestamp()),
            Some(2_139_722_880)
        );
    }

    #[test]
    fn test_from_set_cookie_max_age_zero_is_expired() {
        let url = Url::parse("https://example.com/").unwrap();
        let c = CanonicalCookie::from_set_cookie(&url, "gone=x; Max-Age=0").unwrap();
        assert!(c.is_expired(OffsetDateTime::now_utc()));
    }

    #[test]
    fn test_from_set_cookie_rejects_garbage() {
        let url = Url::parse("https://example.com/").unwrap();
        assert!(CanonicalCookie::from_set_cookie(&url, "no-equals-sign").is_none());
    }
}
