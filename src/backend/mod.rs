//! Remote object store backends.

use crate::error::Result;

pub mod inmemory;
#[cfg(feature = "s3")]
pub mod s3;

pub use inmemory::InMemoryBackend;
#[cfg(feature = "s3")]
pub use s3::S3Backend;

/// One page request against a bucket listing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListRequest {
    pub bucket: String,
    /// Only keys starting with this string. `None` lists everything.
    pub prefix: Option<String>,
    /// Group keys at the first occurrence of this string after the prefix.
    pub delimiter: Option<String>,
    /// Token from the previous page's `next_continuation_token`.
    pub continuation_token: Option<String>,
    /// Upper bound on the entries of one page. `None` = backend default.
    pub max_keys: Option<usize>,
}

impl ListRequest {
    pub fn new(bucket: impl Into<String>) -> Self {
        ListRequest {
            bucket: bucket.into(),
            ..Default::default()
        }
    }

    pub fn with_prefix(mut self, prefix: Option<&str>) -> Self {
        self.prefix = prefix.map(str::to_string);
        self
    }

    pub fn with_delimiter(mut self, delimiter: Option<&str>) -> Self {
        self.delimiter = delimiter.map(str::to_string);
        self
    }

    pub fn with_max_keys(mut self, max_keys: usize) -> Self {
        self.max_keys = Some(max_keys);
        self
    }
}

/// One page of a bucket listing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListPage {
    /// Keys, plus one entry per group when a delimiter was given, in the
    /// store's native order.
    pub entries: Vec<String>,
    /// Present when the listing was truncated and more entries follow.
    pub next_continuation_token: Option<String>,
}

/// Trait for remote object store implementations.
///
/// Abstracts the four primitives the typed store is built on, so the network
/// service can be swapped for an in-memory double in tests.
///
/// **IMPORTANT:** All methods use `&self`. One handle is shared by every
/// caller, so implementations must be safe for concurrent use.
///
/// **ASYNC:** All methods are async and must be awaited.
#[allow(async_fn_in_trait)]
pub trait RemoteStore: Send + Sync + Clone {
    /// Fetch the raw payload stored at `key`.
    ///
    /// # Returns
    /// - `Ok(Some(bytes))` - Object exists
    /// - `Ok(None)` - No object at this key
    ///
    /// # Errors
    /// Returns `Err` on transport failure (unreachable, denied, throttled...)
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Option<Vec<u8>>>;

    /// Store `value` at `key`, replacing whatever was there.
    ///
    /// # Errors
    /// Returns `Err` on transport failure
    async fn put_object(&self, bucket: &str, key: &str, value: Vec<u8>) -> Result<()>;

    /// Remove the object at `key`. Removing an absent key succeeds.
    ///
    /// # Errors
    /// Returns `Err` on transport failure
    async fn delete_object(&self, bucket: &str, key: &str) -> Result<()>;

    /// Fetch one page of a listing.
    ///
    /// # Errors
    /// Returns `Err` on transport failure
    async fn list_page(&self, request: &ListRequest) -> Result<ListPage>;

    /// Health check - verify the store is reachable.
    ///
    /// # Errors
    /// Returns `Err` if the store is not accessible
    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }
}
