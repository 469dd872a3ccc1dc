//! Object-storage seam: trait, S3 implementation, in-memory test double.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Mutex, PoisonError};

use aws_sdk_s3::primitives::ByteStream;
use log::{debug, info};
use thiserror::Error;

/// Boxed future returned by dyn-compatible async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Errors from the storage backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend rejected or failed the upload.
    #[error("upload of '{key}' failed: {reason}")]
    Upload {
        /// Object key the upload targeted.
        key: String,
        /// Backend-reported failure.
        reason: String,
    },
}

/// Writes opaque objects to a storage bucket.
pub trait ObjectStore: Send + Sync {
    /// Upload `body` to `bucket` at `key`, resolving only after the
    /// remote write is acknowledged.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the write fails. No retries.
    fn put_object<'a>(
        &'a self,
        bucket: &'a str,
        key: &'a str,
        body: Vec<u8>,
    ) -> BoxFuture<'a, Result<(), StoreError>>;
}

/// `aws-sdk-s3`-backed [`ObjectStore`].
#[derive(Debug, Clone)]
pub struct S3ObjectStore {
    client: aws_sdk_s3::Client,
}

impl S3ObjectStore {
    /// Wrap an existing S3 client.
    #[must_use]
    pub fn new(client: aws_sdk_s3::Client) -> Self {
        Self { client }
    }

    /// Build a store from the ambient AWS credential chain.
    pub async fn from_env() -> Self {
        let cfg = aws_config::load_from_env().await;
        Self::new(aws_sdk_s3::Client::new(&cfg))
    }
}

impl ObjectStore for S3ObjectStore {
    fn put_object<'a>(
        &'a self,
        bucket: &'a str,
        key: &'a str,
        body: Vec<u8>,
    ) -> BoxFuture<'a, Result<(), StoreError>> {
        Box::pin(async move {
            debug!("uploading s3://{bucket}/{key} ({} bytes)", body.len());
            self.client
                .put_object()
                .bucket(bucket)
                .key(key)
                .body(ByteStream::from(body))
                .send()
                .await
                .map_err(|e| StoreError::Upload {
                    key: key.to_owned(),
                    reason: aws_sdk_s3::error::DisplayErrorContext(&e).to_string(),
                })?;
            info!("uploaded s3://{bucket}/{key}");
            Ok(())
        })
    }
}

/// A recorded upload held by [`MemoryObjectStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Bucket the object was written to.
    pub bucket: String,
    /// Object key.
    pub key: String,
    /// Object contents.
    pub body: Vec<u8>,
}

/// An in-memory [`ObjectStore`] for tests and offline scenarios.
#[derive(Debug, Default)]
pub struct MemoryObjectStore {
    objects: Mutex<Vec<StoredObject>>,
}

impl MemoryObjectStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a snapshot of everything uploaded so far.
    #[must_use]
    pub fn objects(&self) -> Vec<StoredObject> {
        self.objects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ObjectStore for MemoryObjectStore {
    fn put_object<'a>(
        &'a self,
        bucket: &'a str,
        key: &'a str,
        body: Vec<u8>,
    ) -> BoxFuture<'a, Result<(), StoreError>> {
        Box::pin(async move {
            self.objects
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(StoredObject {
                    bucket: bucket.to_owned(),
                    key: key.to_owned(),
                    body,
                });
            Ok(())
        })
    }
}
