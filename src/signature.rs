pub(crate) mod builder;

use crate::policy::{CannedPolicy, ResourceUrl};
use crate::PrivateKey;
use base64ct::Encoding;
use jiff::Timestamp;
use rsa::signature::{SignatureEncoding, Signer};
use snafu::{ResultExt, Snafu};
use std::fmt;

/// A resource URL carrying its canned policy signature
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SignedUrl {
    resource: ResourceUrl,

    #[serde(with = "crate::timestamp::required")]
    expires_at: Timestamp,

    /// Expiration as whole Unix seconds, the value that was signed
    expires: i64,

    /// Signature in the CDN base64 alphabet
    signature: String,

    key_pair_id: String,
}

#[derive(Debug, Snafu)]
pub enum SigningError {
    #[snafu(display("signing canned policy with RSA-SHA1"))]
    Sign { source: rsa::signature::Error },
}

/// Sign a canned policy for `resource`, valid until `expires_at`.
///
/// Expiration is truncated to whole seconds. Past instants are signed as well,
/// the edge rejects them when the URL is used.
pub fn sign(
    resource: ResourceUrl,
    key_pair_id: &str,
    private_key: &PrivateKey,
    expires_at: Timestamp,
) -> Result<SignedUrl, SigningError> {
    let expires = crate::timestamp::epoch_seconds(expires_at);
    let policy = CannedPolicy::new(&resource, expires).to_string();

    // PKCS#1 v1.5 over SHA-1, fixed by the verifying edge
    let signature = private_key
        .signing_key
        .try_sign(policy.as_bytes())
        .context(SignSnafu)?;
    let signature = encode_signature(&signature.to_bytes());

    tracing::debug!(resource = %resource, expires, "signed canned policy");

    Ok(SignedUrl {
        resource,
        expires_at,
        expires,
        signature,
        key_pair_id: key_pair_id.to_owned(),
    })
}

/// Standard base64, then `+` -> `-`, `=` -> `_`, `/` -> `~`.
pub(crate) fn encode_signature(bytes: &[u8]) -> String {
    base64ct::Base64::encode_string(bytes)
        .chars()
        .map(|c| match c {
            '+' => '-',
            '=' => '_',
            '/' => '~',
            c => c,
        })
        .collect()
}

impl SignedUrl {
    pub fn resource(&self) -> &ResourceUrl {
        &self.resource
    }

    pub fn expires_at(&self) -> Timestamp {
        self.expires_at
    }

    /// Value of the `Expires` query parameter
    pub fn expires(&self) -> i64 {
        self.expires
    }

    /// Value of the `Signature` query parameter
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Value of the `Key-Pair-Id` query parameter
    pub fn key_pair_id(&self) -> &str {
        &self.key_pair_id
    }

    /// The exact bytes that were signed
    pub fn policy(&self) -> String {
        CannedPolicy::new(&self.resource, self.expires).to_string()
    }

    pub fn url(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SignedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}?Expires={}&Signature={}&Key-Pair-Id={}",
            self.resource, self.expires, self.signature, self.key_pair_id
        )
    }
}
