//! CloudFront style signed URLs using a canned policy.
//!
//! A [`PrivateKey`] is parsed once from PEM text, then every call to [`sign`]
//! renders the canonical policy for one resource and expiration, signs it with
//! RSA-SHA1 and appends `Expires`, `Signature` and `Key-Pair-Id` to the
//! resource URL.
//!
//! ```no_run
//! use cfsignurl::{PrivateKey, SignedUrlBuilder};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let pem = std::fs::read_to_string("private_key.pem")?;
//! let private_key = PrivateKey::from_pem(&pem)?;
//!
//! let signed = SignedUrlBuilder::new("d123.example.net", "testfolder/sample-file-42.csv")
//!     .expiration(1700000000)?
//!     .sign(&private_key, "APKAEXAMPLE")?;
//! println!("{}", signed.url());
//! # Ok(())
//! # }
//! ```

mod policy;
mod private_key;
mod signature;
mod timestamp;

pub mod config;
pub mod service;
pub mod store;

pub use policy::{normalize_path, CannedPolicy, Protocol, ResourceUrl};
pub use private_key::PrivateKey;
pub use signature::builder::SignedUrlBuilder;
pub use signature::{sign, SignedUrl};
pub use timestamp::expires_after;

pub mod error {
    pub use crate::config::ConfigError;
    pub use crate::policy::ProtocolError;
    pub use crate::private_key::KeyFormatError;
    pub use crate::service::{RequestError, StartupError};
    pub use crate::signature::builder::SignedUrlBuilderError;
    pub use crate::signature::SigningError;
    pub use crate::store::UploadError;
    pub use crate::timestamp::TimestampError;
}
