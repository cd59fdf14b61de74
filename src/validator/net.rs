//! Network-shaped validators: email addresses, URLs, hosts, and ports.

use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::LazyLock;

use regex::Regex;

use crate::error::ParseError;
use crate::source::RawEnv;
use crate::validator::{FieldOptions, Validator};
use crate::value::Value;

/// Full-string local@domain.tld shape.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid regex"));

/// Full-string http/https URL. Other schemes are rejected.
static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://[^\s/$.?#][^\s]*$").expect("valid regex"));

/// DNS hostname: dot-separated labels with alphanumeric edges, each label
/// up to 63 characters.
static HOSTNAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*$",
    )
    .expect("valid regex")
});

// ============================================================================
// Email
// ============================================================================

/// Validator for email addresses.
#[derive(Debug, Clone)]
pub struct EmailValidator {
    options: FieldOptions,
}

/// Builds an email validator.
#[must_use]
pub fn email() -> EmailValidator {
    EmailValidator {
        options: FieldOptions::default(),
    }
}

impl Validator for EmailValidator {
    fn kind(&self) -> &'static str {
        "email"
    }

    fn options(&self) -> &FieldOptions {
        &self.options
    }

    fn options_mut(&mut self) -> &mut FieldOptions {
        &mut self.options
    }

    fn parse_raw(&self, raw: &str, field: &str, _source: &RawEnv) -> Result<Value, ParseError> {
        if EMAIL_RE.is_match(raw) {
            Ok(Value::Str(raw.to_string()))
        } else {
            Err(ParseError::invalid(field, raw, "an email address"))
        }
    }
}

// ============================================================================
// URL
// ============================================================================

/// Validator for http/https URLs.
#[derive(Debug, Clone)]
pub struct UrlValidator {
    options: FieldOptions,
}

/// Builds a URL validator.
#[must_use]
pub fn url() -> UrlValidator {
    UrlValidator {
        options: FieldOptions::default(),
    }
}

impl Validator for UrlValidator {
    fn kind(&self) -> &'static str {
        "url"
    }

    fn options(&self) -> &FieldOptions {
        &self.options
    }

    fn options_mut(&mut self) -> &mut FieldOptions {
        &mut self.options
    }

    fn parse_raw(&self, raw: &str, field: &str, _source: &RawEnv) -> Result<Value, ParseError> {
        if URL_RE.is_match(raw) {
            Ok(Value::Str(raw.to_string()))
        } else {
            Err(ParseError::invalid(
                field,
                raw,
                "a URL with an http or https scheme",
            ))
        }
    }
}

// ============================================================================
// Host
// ============================================================================

/// Validator for hosts: a DNS hostname, an IPv4 dotted quad, or an IPv6
/// address with an optional `%zone` suffix.
#[derive(Debug, Clone)]
pub struct HostValidator {
    options: FieldOptions,
}

/// Builds a host validator.
#[must_use]
pub fn host() -> HostValidator {
    HostValidator {
        options: FieldOptions::default(),
    }
}

fn is_ipv6_with_zone(raw: &str) -> bool {
    let (addr, zone) = match raw.split_once('%') {
        Some((addr, zone)) => (addr, Some(zone)),
        None => (raw, None),
    };
    if let Some(zone) = zone {
        if zone.is_empty() || !zone.chars().all(|c| c.is_ascii_alphanumeric()) {
            return false;
        }
    }
    addr.parse::<Ipv6Addr>().is_ok()
}

impl Validator for HostValidator {
    fn kind(&self) -> &'static str {
        "host"
    }

    fn options(&self) -> &FieldOptions {
        &self.options
    }

    fn options_mut(&mut self) -> &mut FieldOptions {
        &mut self.options
    }

    fn parse_raw(&self, raw: &str, field: &str, _source: &RawEnv) -> Result<Value, ParseError> {
        let matched = HOSTNAME_RE.is_match(raw)
            || raw.parse::<Ipv4Addr>().is_ok()
            || is_ipv6_with_zone(raw);
        if matched {
            Ok(Value::Str(raw.to_string()))
        } else {
            Err(ParseError::invalid(field, raw, "a hostname or IP address"))
        }
    }
}

// ============================================================================
// Port
// ============================================================================

/// Validator for TCP/UDP port numbers.
#[derive(Debug, Clone)]
pub struct PortValidator {
    options: FieldOptions,
    min: u16,
    max: u16,
}

/// Builds a port validator with the default `[1, 65535]` bounds.
#[must_use]
pub fn port() -> PortValidator {
    PortValidator {
        options: FieldOptions::default(),
        min: 1,
        max: 65535,
    }
}

impl PortValidator {
    /// Lowers or raises the minimum accepted port.
    #[must_use]
    pub const fn min(mut self, min: u16) -> Self {
        self.min = min;
        self
    }

    /// Lowers the maximum accepted port.
    #[must_use]
    pub const fn max(mut self, max: u16) -> Self {
        self.max = max;
        self
    }
}

impl Validator for PortValidator {
    fn kind(&self) -> &'static str {
        "port"
    }

    fn options(&self) -> &FieldOptions {
        &self.options
    }

    fn options_mut(&mut self) -> &mut FieldOptions {
        &mut self.options
    }

    fn parse_raw(&self, raw: &str, field: &str, _source: &RawEnv) -> Result<Value, ParseError> {
        let parsed: u32 = raw
            .parse()
            .map_err(|_| ParseError::invalid(field, raw, "an integer port number"))?;

        if parsed < u32::from(self.min) || parsed > u32::from(self.max) {
            return Err(ParseError::invalid(
                field,
                raw,
                format!("a port between {} and {}", self.min, self.max),
            ));
        }
        Ok(Value::Num(f64::from(parsed)))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> RawEnv {
        RawEnv::new()
    }

    #[test]
    fn test_email_shapes() {
        let validator = email();
        for raw in ["user@example.com", "a@b.co", "first.last+tag@sub.domain.org"] {
            assert!(
                validator.parse(Some(raw), "E", &source()).is_ok(),
                "{raw:?} should be accepted"
            );
        }
        for raw in ["plain", "user@@example.com", "user@example", "a b@c.d", "@x.y"] {
            assert!(
                validator.parse(Some(raw), "E", &source()).is_err(),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_url_requires_http_scheme() {
        let validator = url();
        for raw in [
            "http://example.com",
            "https://example.com/path?q=1#frag",
            "http://localhost:3000",
        ] {
            assert!(
                validator.parse(Some(raw), "U", &source()).is_ok(),
                "{raw:?} should be accepted"
            );
        }
        for raw in ["ftp://example.com", "example.com", "https://", "http:// space.com"] {
            assert!(
                validator.parse(Some(raw), "U", &source()).is_err(),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_host_accepts_hostnames_and_ips() {
        let validator = host();
        for raw in [
            "localhost",
            "example.com",
            "sub-domain.example.co.uk",
            "192.168.0.1",
            "::1",
            "2001:db8::8a2e:370:7334",
            "fe80::1%eth0",
        ] {
            assert!(
                validator.parse(Some(raw), "H", &source()).is_ok(),
                "{raw:?} should be accepted"
            );
        }
    }

    #[test]
    fn test_host_rejects_malformed_input() {
        let validator = host();
        for raw in ["-bad.com", "bad-.com", "host name", "fe80::1%", "::g"] {
            assert!(
                validator.parse(Some(raw), "H", &source()).is_err(),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_port_boundaries() {
        let validator = port();
        assert!(validator.parse(Some("0"), "P", &source()).is_err());
        assert!(validator.parse(Some("1"), "P", &source()).is_ok());
        assert!(validator.parse(Some("65535"), "P", &source()).is_ok());
        assert!(validator.parse(Some("65536"), "P", &source()).is_err());
    }

    #[test]
    fn test_port_rejects_non_integers() {
        let validator = port();
        for raw in ["80.5", "-1", "abc", "8080 "] {
            assert!(
                validator.parse(Some(raw), "P", &source()).is_err(),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_port_custom_bounds() {
        let validator = port().min(1024).max(2048);
        assert!(validator.parse(Some("1023"), "P", &source()).is_err());
        assert!(validator.parse(Some("1024"), "P", &source()).is_ok());
        assert!(validator.parse(Some("2048"), "P", &source()).is_ok());
        assert!(validator.parse(Some("2049"), "P", &source()).is_err());
    }

    #[test]
    fn test_port_resolves_to_number() {
        let validator = port();
        let value = validator.parse(Some("8080"), "P", &source()).unwrap();
        assert_eq!(value, Value::Num(8080.0));
    }
}
