//! Object storage the signed resources are uploaded to.
//!
//! The [`ObjectStore`] trait is the only capability the service needs from a
//! storage backend. [`MemoryStore`] keeps objects in a map and is meant for
//! tests and local runs.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use snafu::{OptionExt, Snafu};

/// Write side of an object store.
pub trait ObjectStore: Send + Sync {
    /// Store `content` in `bucket` under `key`.
    fn put(
        &self,
        bucket: &str,
        key: &str,
        content: &[u8],
        content_type: &str,
    ) -> Result<(), UploadError>;
}

impl<S: ObjectStore + ?Sized> ObjectStore for Arc<S> {
    fn put(
        &self,
        bucket: &str,
        key: &str,
        content: &[u8],
        content_type: &str,
    ) -> Result<(), UploadError> {
        (**self).put(bucket, key, content, content_type)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
pub enum UploadError {
    /// The store answered and refused the write
    #[snafu(display("object store rejected {bucket}/{key}: {message}"))]
    Rejected {
        bucket: String,
        key: String,
        message: String,
    },
    /// The store could not be reached
    #[snafu(display("object store unavailable: {message}"))]
    Unavailable { message: String },
}

/// An object held by [`MemoryStore`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub content: Vec<u8>,
    pub content_type: String,
}

/// In-memory [`ObjectStore`], only accepting writes to known buckets.
#[derive(Debug, Default)]
pub struct MemoryStore {
    buckets: RwLock<HashMap<String, HashMap<String, StoredObject>>>,
}

impl MemoryStore {
    pub fn new(buckets: impl IntoIterator<Item = String>) -> Self {
        Self {
            buckets: RwLock::new(
                buckets
                    .into_iter()
                    .map(|bucket| (bucket, HashMap::new()))
                    .collect(),
            ),
        }
    }

    pub fn get(&self, bucket: &str, key: &str) -> Option<StoredObject> {
        self.buckets.read().get(bucket)?.get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.buckets.read().values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ObjectStore for MemoryStore {
    fn put(
        &self,
        bucket: &str,
        key: &str,
        content: &[u8],
        content_type: &str,
    ) -> Result<(), UploadError> {
        let mut buckets = self.buckets.write();
        let objects = buckets.get_mut(bucket).context(RejectedSnafu {
            bucket,
            key,
            message: "NoSuchBucket",
        })?;
        objects.insert(
            key.to_owned(),
            StoredObject {
                content: content.to_vec(),
                content_type: content_type.to_owned(),
            },
        );
        Ok(())
    }
}
