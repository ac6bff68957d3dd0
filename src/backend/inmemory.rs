//! In-memory object store backend (default, thread-safe, async).
//!
//! Uses DashMap sharded per bucket, each bucket a sorted map so listings come
//! back in lexicographic key order with native pagination.

use super::{ListPage, ListRequest, RemoteStore};
use crate::error::Result;
use dashmap::DashMap;
use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::Arc;

/// Page size used when a request does not carry `max_keys`.
pub const DEFAULT_PAGE_SIZE: usize = 1000;

type Bucket = BTreeMap<String, Vec<u8>>;

/// Thread-safe async in-memory object store.
///
/// Clones share the same storage. Listings honor prefix, delimiter and
/// continuation tokens the way a hosted object store does, truncating
/// every page at `max_keys` entries.
///
/// # Example
///
/// ```no_run
/// use cloudcraft_store::backend::{InMemoryBackend, ListRequest, RemoteStore};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let backend = InMemoryBackend::new().with_page_size(2);
///
///     backend.put_object("bucket", "a/1", b"{}".to_vec()).await?;
///     backend.put_object("bucket", "a/2", b"{}".to_vec()).await?;
///     backend.put_object("bucket", "b/1", b"{}".to_vec()).await?;
///
///     let page = backend.list_page(&ListRequest::new("bucket")).await?;
///     assert_eq!(page.entries, vec!["a/1", "a/2"]);
///     assert!(page.next_continuation_token.is_some());
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct InMemoryBackend {
    buckets: Arc<DashMap<String, Bucket>>,
    page_size: usize,
}

impl InMemoryBackend {
    /// Create a new, empty in-memory store.
    pub fn new() -> Self {
        InMemoryBackend {
            buckets: Arc::new(DashMap::new()),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Truncate listings at `page_size` entries unless a request asks for less.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Number of objects across all buckets.
    pub async fn len(&self) -> usize {
        self.buckets.iter().map(|bucket| bucket.len()).sum()
    }

    /// Check if the store holds no objects.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Get memory statistics.
    pub async fn stats(&self) -> StoreStats {
        let total_objects = self.len().await;
        let total_bytes = self
            .buckets
            .iter()
            .flat_map(|bucket| bucket.values().map(Vec::len).collect::<Vec<_>>())
            .sum();

        StoreStats {
            buckets: self.buckets.len(),
            total_objects,
            total_bytes,
        }
    }

    /// Print store statistics to debug log.
    pub async fn log_stats(&self) {
        let stats = self.stats().await;
        debug!(
            "Store Stats: {} objects in {} buckets, {} bytes",
            stats.total_objects, stats.buckets, stats.total_bytes
        );
    }
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// The listing entry a key contributes: the key itself, or its group when
/// the delimiter occurs after the prefix.
fn entry_for<'k>(key: &'k str, prefix: &str, delimiter: Option<&str>) -> &'k str {
    match delimiter.filter(|d| !d.is_empty()) {
        Some(d) => match key[prefix.len()..].find(d) {
            Some(at) => &key[..prefix.len() + at],
            None => key,
        },
        None => key,
    }
}

fn list_bucket(bucket: &Bucket, request: &ListRequest, page_size: usize) -> ListPage {
    let prefix = request.prefix.as_deref().unwrap_or("");
    let delimiter = request.delimiter.as_deref();
    let max_keys = request.max_keys.unwrap_or(page_size).max(1);

    // The token is the last stored key the previous page consumed.
    let start = match request.continuation_token.as_deref() {
        Some(token) => Bound::Excluded(token),
        None => Bound::Included(prefix),
    };

    let mut entries: Vec<String> = Vec::new();
    let mut last_key: Option<&String> = None;
    let mut truncated = false;

    for key in bucket
        .range::<str, _>((start, Bound::Unbounded))
        .map(|(key, _)| key)
        .take_while(|key| key.starts_with(prefix))
    {
        let entry = entry_for(key, prefix, delimiter);

        // Keys of one group are contiguous.
        if entries.last().map(String::as_str) == Some(entry) {
            last_key = Some(key);
            continue;
        }
        if entries.len() == max_keys {
            truncated = true;
            break;
        }
        entries.push(entry.to_string());
        last_key = Some(key);
    }

    ListPage {
        entries,
        next_continuation_token: if truncated { last_key.cloned() } else { None },
    }
}

impl RemoteStore for InMemoryBackend {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Option<Vec<u8>>> {
        let value = self
            .buckets
            .get(bucket)
            .and_then(|objects| objects.get(key).cloned());

        if value.is_some() {
            debug!("✓ InMemory GET {}:{} -> FOUND", bucket, key);
        } else {
            debug!("✓ InMemory GET {}:{} -> ABSENT", bucket, key);
        }
        Ok(value)
    }

    async fn put_object(&self, bucket: &str, key: &str, value: Vec<u8>) -> Result<()> {
        self.buckets
            .entry(bucket.to_string())
            .or_default()
            .insert(key.to_string(), value);

        debug!("✓ InMemory PUT {}:{}", bucket, key);
        Ok(())
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<()> {
        if let Some(mut objects) = self.buckets.get_mut(bucket) {
            objects.remove(key);
        }

        debug!("✓ InMemory DELETE {}:{}", bucket, key);
        Ok(())
    }

    async fn list_page(&self, request: &ListRequest) -> Result<ListPage> {
        let page = match self.buckets.get(&request.bucket) {
            Some(objects) => list_bucket(&objects, request, self.page_size),
            None => ListPage::default(),
        };

        debug!(
            "✓ InMemory LIST {} prefix={:?} delimiter={:?} -> {} entries{}",
            request.bucket,
            request.prefix,
            request.delimiter,
            page.entries.len(),
            if page.next_continuation_token.is_some() {
                " (truncated)"
            } else {
                ""
            }
        );
        Ok(page)
    }
}

/// Store statistics.
#[derive(Clone, Debug)]
pub struct StoreStats {
    pub buckets: usize,
    pub total_objects: usize,
    pub total_bytes: usize,
}
