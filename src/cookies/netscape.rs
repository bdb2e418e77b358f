//! Netscape `cookies.txt` codec.
//!
//! Each data line has 7 TAB-separated fields:
//!
//! 1. DOMAIN: the domain that created and has access to the cookie.
//! 2. FLAG: `TRUE`/`FALSE`, whether hosts within the domain can access it.
//! 3. PATH: the path within the domain the cookie is valid for.
//! 4. SECURE: `TRUE`/`FALSE`, whether a secure connection is required.
//! 5. EXPIRATION: epoch seconds, or `-1` for a session cookie.
//! 6. NAME
//! 7. VALUE
//!
//! ```text
//! www.archive.org	FALSE	/	FALSE	1311699995	details-visit	texts-cralond
//! ```
//!
//! Decoding is permissive: blank and `#` comment lines are ignored, malformed
//! lines are reported and skipped, and an IO failure keeps whatever was parsed
//! before it. Nothing here panics on bad input.

use crate::base::cookieerror::CookieError;
use crate::cookies::canonicalcookie::CanonicalCookie;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, BufRead, Write};
use time::OffsetDateTime;

/// Number of TAB-separated fields in a data line.
pub const FIELD_COUNT: usize = 7;

/// Second header line written by [`encode`].
pub const FORMAT_COMMENT: &str = "# This file is the Netscape cookies.txt format";

/// How the "include subdomains" column is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossSubdomainPolicy {
    /// Always write `TRUE`. Matches files written by earlier crawls, but the
    /// cookie's own flag is lost on reload.
    #[default]
    AlwaysTrue,
    /// Write the cookie's `domain_attribute_specified` flag.
    Preserve,
}

/// Options for [`encode`].
#[derive(Debug, Clone)]
pub struct EncodeOptions {
    /// Product name in the `# <product> Cookie File` header.
    pub product: String,
    pub cross_subdomain: CrossSubdomainPolicy,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            product: crate::cookies::config::DEFAULT_PRODUCT.to_string(),
            cross_subdomain: CrossSubdomainPolicy::default(),
        }
    }
}

/// A line that was dropped during decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number.
    pub line: usize,
    pub reason: String,
}

impl fmt::Display for SkippedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.reason)
    }
}

/// Outcome of [`decode`]: the cookies that parsed plus diagnostics.
#[derive(Debug, Default)]
pub struct DecodeReport {
    pub cookies: Vec<CanonicalCookie>,
    pub skipped: Vec<SkippedLine>,
    /// Set when reading stopped early. `cookies` holds everything parsed
    /// before the failure.
    pub io_error: Option<io::Error>,
}

impl DecodeReport {
    /// True when every line was either data or a comment and the read finished.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.io_error.is_none()
    }
}

/// Counts from [`encode`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodeStats {
    pub written: usize,
    /// Cookies that cannot be represented: TAB, CR or LF in a field, or a
    /// domain that would read back as a comment.
    pub skipped: usize,
}

/// Decode Netscape-format cookies from `reader`.
pub fn decode(mut reader: impl BufRead) -> DecodeReport {
    let mut report = DecodeReport::default();
    let mut buf = Vec::new();
    let mut line_number = 0;

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(line = line_number + 1, error = %e, "cookie input read failed");
                report.io_error = Some(e);
                break;
            }
        }
        line_number += 1;

        let line = String::from_utf8_lossy(&buf);
        let line = strip_line_ending(&line);

        if is_comment_or_blank(line) {
            continue;
        }

        match parse_line(line, line_number) {
            Ok(cookie) => {
                tracing::debug!(
                    line = line_number,
                    domain = %cookie.domain,
                    name = %cookie.name,
                    "adding cookie"
                );
                report.cookies.push(cookie);
            }
            Err(CookieError::MalformedLine { line, reason }) => {
                tracing::warn!(line, reason = %reason, "cookies input line invalid, skipping");
                report.skipped.push(SkippedLine { line, reason });
            }
            Err(e) => {
                tracing::warn!(line = line_number, error = %e, "cookies input line invalid, skipping");
                report.skipped.push(SkippedLine {
                    line: line_number,
                    reason: e.to_string(),
                });
            }
        }
    }

    report
}

/// Decode Netscape-format cookies held in memory.
pub fn decode_str(content: &str) -> DecodeReport {
    decode(content.as_bytes())
}

/// Encode `cookies` to `writer` in encounter order, preceded by the file header.
///
/// The writer is flushed before returning.
pub fn encode<'a, W, I>(cookies: I, mut writer: W, options: &EncodeOptions) -> io::Result<EncodeStats>
where
    W: Write,
    I: IntoIterator<Item = &'a CanonicalCookie>,
{
    let mut stats = EncodeStats::default();

    writer.write_all(header(&options.product).as_bytes())?;
    for cookie in cookies {
        match format_line(cookie, options.cross_subdomain) {
            Some(line) => {
                writer.write_all(line.as_bytes())?;
                stats.written += 1;
            }
            None => stats.skipped += 1,
        }
    }
    writer.flush()?;

    Ok(stats)
}

/// Encode `cookies` into a `String`.
pub fn encode_to_string<'a, I>(cookies: I, options: &EncodeOptions) -> String
where
    I: IntoIterator<Item = &'a CanonicalCookie>,
{
    let mut out = header(&options.product);
    for cookie in cookies {
        if let Some(line) = format_line(cookie, options.cross_subdomain) {
            out.push_str(&line);
        }
    }
    out
}

fn header(product: &str) -> String {
    format!("# {} Cookie File\n{}\n\n", product, FORMAT_COMMENT)
}

/// Format one data line, newline included.
fn format_line(cookie: &CanonicalCookie, policy: CrossSubdomainPolicy) -> Option<String> {
    let path: &str = if cookie.path.is_empty() {
        "/"
    } else {
        &cookie.path
    };

    let fields = [
        cookie.domain.as_str(),
        path,
        cookie.name.as_str(),
        cookie.value.as_str(),
    ];
    if fields
        .iter()
        .any(|f| f.contains(|c: char| matches!(c, '\t' | '\n' | '\r')))
    {
        tracing::warn!(
            domain = %cookie.domain,
            name = %cookie.name,
            "cookie contains TAB or line break, not writing it"
        );
        return None;
    }
    // Would read back as a comment line.
    if cookie.domain.trim_start().starts_with('#') {
        tracing::warn!(
            domain = %cookie.domain,
            name = %cookie.name,
            "cookie domain starts with '#', not writing it"
        );
        return None;
    }

    let include_subdomains = match policy {
        CrossSubdomainPolicy::AlwaysTrue => true,
        CrossSubdomainPolicy::Preserve => cookie.domain_attribute_specified,
    };
    let expiry = cookie
        .expiration_time
        .map(|t| t.unix_timestamp())
        .unwrap_or(-1);

    Some(format!(
        "{}\t{}\t{}\t{}\t{}\t{}\t{}\n",
        cookie.domain,
        bool_field(include_subdomains),
        path,
        bool_field(cookie.secure),
        expiry,
        cookie.name,
        cookie.value
    ))
}

fn bool_field(b: bool) -> &'static str {
    if b {
        "TRUE"
    } else {
        "FALSE"
    }
}

/// Whitespace only, optionally followed by a `#` comment.
fn is_comment_or_blank(line: &str) -> bool {
    let rest = line.trim_start();
    rest.is_empty() || rest.starts_with('#')
}

fn strip_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// Parse a `TRUE`/`FALSE` column. Anything but a case-insensitive `true` is false.
fn parse_flag(field: &str) -> bool {
    field.trim().eq_ignore_ascii_case("true")
}

/// Parse one data line into a cookie.
fn parse_line(line: &str, line_number: usize) -> Result<CanonicalCookie, CookieError> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() != FIELD_COUNT {
        return Err(CookieError::malformed_line(
            line_number,
            format!(
                "expected {} tab-delimited tokens, found {}",
                FIELD_COUNT,
                fields.len()
            ),
        ));
    }

    let epoch_seconds: i64 = fields[4].trim().parse().map_err(|_| {
        CookieError::malformed_line(
            line_number,
            format!("expiration '{}' is not an integer", fields[4]),
        )
    })?;

    let expiration = if epoch_seconds >= 0 {
        let t = OffsetDateTime::from_unix_timestamp(epoch_seconds).map_err(|_| {
            CookieError::malformed_line(
                line_number,
                format!("expiration {} is out of range", epoch_seconds),
            )
        })?;
        Some(t)
    } else {
        None
    };

    Ok(CanonicalCookie::new(fields[5], fields[6], fields[0])
        .with_path(fields[2])
        .with_secure(parse_flag(fields[3]))
        .with_expiration(expiration)
        .with_domain_attribute_specified(parse_flag(fields[1])))
}
