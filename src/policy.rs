//! Canned policy documents and the resource URLs they cover.
//!
//! The policy is signed byte for byte, so it is rendered from a fixed template
//! rather than through a JSON serializer: key order, spacing and number format
//! must match what the edge recomputes when it verifies the signature.

use std::fmt;
use std::str::FromStr;

use snafu::Snafu;

/// Scheme of the resource URL
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Http,
    #[default]
    Https,
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http => f.write_str("http"),
            Self::Https => f.write_str("https"),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Snafu)]
#[snafu(display("unknown protocol {value:?}, expected http or https"))]
pub struct ProtocolError {
    value: String,
}

impl FromStr for Protocol {
    type Err = ProtocolError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.eq_ignore_ascii_case("https") {
            Ok(Self::Https)
        } else if value.eq_ignore_ascii_case("http") {
            Ok(Self::Http)
        } else {
            ProtocolSnafu { value }.fail()
        }
    }
}

/// Replace every ASCII whitespace character of an object path with `+`.
///
/// Space, `\t`, `\n`, `\r`, form feed and vertical tab are replaced. Only
/// whitespace is touched, this is not URL encoding.
pub fn normalize_path(path: &str) -> String {
    path.chars()
        .map(|c| {
            if c.is_ascii_whitespace() || c == '\x0B' {
                '+'
            } else {
                c
            }
        })
        .collect()
}

/// Full URL of the object served by the CDN: `<protocol>://<domain>/<path>`.
///
/// The path is normalized when the URL is built, and only then.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct ResourceUrl(String);

impl ResourceUrl {
    pub fn new(protocol: Protocol, domain: &str, path: &str) -> Self {
        Self(format!("{protocol}://{domain}/{}", normalize_path(path)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Single statement policy: one resource, valid strictly before `expires` (Unix seconds).
#[derive(Debug, Clone, Copy)]
pub struct CannedPolicy<'a> {
    resource: &'a ResourceUrl,
    expires: i64,
}

impl<'a> CannedPolicy<'a> {
    pub fn new(resource: &'a ResourceUrl, expires: i64) -> Self {
        Self { resource, expires }
    }

    pub fn resource(&self) -> &ResourceUrl {
        self.resource
    }

    pub fn expires(&self) -> i64 {
        self.expires
    }
}

impl fmt::Display for CannedPolicy<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            r#"{{"Statement":[{{"Resource":"{}","Condition":{{"DateLessThan":{{"AWS:EpochTime":{}}}}}}}]}}"#,
            self.resource, self.expires
        )
    }
}
