use crate::error::SigningError;
use crate::policy::{Protocol, ResourceUrl};
use crate::timestamp::{expires_after, parse_timestamp, TimestampError};
use crate::{PrivateKey, SignedUrl};
use jiff::Timestamp;
use snafu::{ResultExt, Snafu};

pub struct SignedUrlBuilder<'a> {
    protocol: Protocol,
    domain: &'a str,
    path: &'a str,

    /// If value is None, the URL expires `retention_days` after the moment it is signed
    expires_at: Option<Timestamp>,

    retention_days: u32,
}

#[derive(Debug, Snafu)]
pub enum SignedUrlBuilderError {
    #[snafu(display("computing expiration"))]
    Expiration { source: TimestampError },
    #[snafu(display("signing URL"))]
    Signing { source: SigningError },
}

impl<'a> SignedUrlBuilder<'a> {
    /// Object at `path` served by the CDN under `domain` (no protocol prefix).
    pub fn new(domain: &'a str, path: &'a str) -> Self {
        Self {
            protocol: Protocol::default(),
            domain,
            path,
            expires_at: None,
            retention_days: 1,
        }
    }

    pub fn protocol(mut self, protocol: Protocol) -> Self {
        self.protocol = protocol;
        self
    }

    /// Absolute expiration, in Unix seconds.
    pub fn expiration(mut self, timestamp: i64) -> Result<Self, TimestampError> {
        self.expires_at = Some(parse_timestamp(timestamp)?);
        Ok(self)
    }

    /// Absolute expiration.
    pub fn expires_at(mut self, timestamp: Timestamp) -> Self {
        self.expires_at = Some(timestamp);
        self
    }

    /// Relative expiration, ignored when an absolute one is set.
    pub fn retention_days(mut self, days: u32) -> Self {
        self.retention_days = days;
        self
    }

    pub fn sign(
        self,
        private_key: &PrivateKey,
        key_pair_id: &str,
    ) -> Result<SignedUrl, SignedUrlBuilderError> {
        let expires_at = match self.expires_at {
            Some(expires_at) => expires_at,
            None => expires_after(Timestamp::now(), self.retention_days).context(ExpirationSnafu)?,
        };

        let resource = ResourceUrl::new(self.protocol, self.domain, self.path);
        crate::sign(resource, key_pair_id, private_key, expires_at).context(SigningSnafu)
    }
}
