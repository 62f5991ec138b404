//! Upload an object for a request, then hand back its signed CDN URL.

use jiff::Timestamp;
use snafu::{ResultExt, Snafu};

use crate::config::{ConfigError, SignerConfig};
use crate::error::{KeyFormatError, SigningError};
use crate::policy::{Protocol, ResourceUrl};
use crate::store::{ObjectStore, UploadError};
use crate::timestamp::{expires_after, TimestampError};
use crate::{PrivateKey, SignedUrl};

const CONTENT_TYPE: &str = "csv";

/// Object key for a request identifier
pub fn object_key(request_identifier: &str) -> String {
    format!("testfolder/sample-file-{request_identifier}.csv")
}

fn object_content(request_identifier: &str) -> String {
    format!("{request_identifier},abcd")
}

/// The service refused to start, nothing can be signed
#[derive(Debug, Snafu)]
pub enum StartupError {
    #[snafu(display("invalid signer configuration"))]
    Config { source: ConfigError },
    #[snafu(display("loading signing key"))]
    KeyFormat { source: KeyFormatError },
}

#[derive(Debug, Snafu)]
pub enum RequestError {
    #[snafu(display("uploading {key}, no URL produced"))]
    Upload { key: String, source: UploadError },
    #[snafu(display("computing expiration"))]
    Expiration { source: TimestampError },
    #[snafu(display("signing URL for {key}"))]
    Signing { key: String, source: SigningError },
}

/// Request boundary: owns the parsed key for the whole process lifetime.
///
/// `generate_signed_url` takes `&self`, share the service behind an `Arc` to
/// serve concurrent requests.
#[derive(Debug)]
pub struct SignedUrlService<S> {
    store: S,
    private_key: PrivateKey,
    bucket: String,
    key_pair_id: String,
    domain: String,
    retention_days: u32,
    protocol: Protocol,
}

impl<S: ObjectStore> SignedUrlService<S> {
    /// Validate the configuration and parse the key once. Fails before any
    /// request can be served.
    pub fn new(config: SignerConfig, store: S) -> Result<Self, StartupError> {
        config.validate().context(ConfigSnafu)?;
        let private_key = PrivateKey::from_pem(&config.private_key_pem).context(KeyFormatSnafu)?;
        tracing::info!(
            bucket = %config.bucket,
            domain = %config.domain,
            key_pair_id = %config.key_pair_id,
            retention_days = config.retention_days,
            "signed URL service ready"
        );

        Ok(Self {
            store,
            private_key,
            bucket: config.bucket,
            key_pair_id: config.key_pair_id,
            domain: config.domain,
            retention_days: config.retention_days,
            protocol: config.protocol,
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn generate_signed_url(&self, request_identifier: &str) -> Result<SignedUrl, RequestError> {
        self.generate_signed_url_at(request_identifier, Timestamp::now())
    }

    /// Same as [`Self::generate_signed_url`], with the current time supplied by the caller.
    pub fn generate_signed_url_at(
        &self,
        request_identifier: &str,
        now: Timestamp,
    ) -> Result<SignedUrl, RequestError> {
        let key = object_key(request_identifier);
        let content = object_content(request_identifier);

        let uploaded = self
            .store
            .put(&self.bucket, &key, content.as_bytes(), CONTENT_TYPE);
        tracing::info!(key = %key, uploaded = uploaded.is_ok(), "object upload");
        if let Err(error) = uploaded {
            tracing::warn!(key = %key, %error, "upload failed");
            return Err(error).context(UploadSnafu { key });
        }

        self.sign(&key, now)
    }

    /// Sign an object path that is already in storage.
    pub fn sign(&self, path: &str, now: Timestamp) -> Result<SignedUrl, RequestError> {
        let expires_at = expires_after(now, self.retention_days).context(ExpirationSnafu)?;
        let resource = ResourceUrl::new(self.protocol, &self.domain, path);
        crate::sign(resource, &self.key_pair_id, &self.private_key, expires_at)
            .context(SigningSnafu { key: path })
    }
}
