//! Test doubles shared by the integration tests.

#![allow(dead_code)]

use cloudcraft_store::backend::{InMemoryBackend, ListPage, ListRequest, RemoteStore};
use cloudcraft_store::{Error, Result};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// In-memory store that can be told to fail.
///
/// Listing fails once `list_budget` pages have been served; reads, writes
/// and deletes fail while `offline` is set.
#[derive(Clone)]
pub struct FlakyBackend {
    pub inner: InMemoryBackend,
    list_budget: Arc<AtomicUsize>,
    list_calls: Arc<AtomicUsize>,
    offline: Arc<AtomicBool>,
}

impl FlakyBackend {
    pub fn new(inner: InMemoryBackend) -> Self {
        FlakyBackend {
            inner,
            list_budget: Arc::new(AtomicUsize::new(usize::MAX)),
            list_calls: Arc::new(AtomicUsize::new(0)),
            offline: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Serve `pages` more listing pages, then fail every listing call.
    pub fn fail_listing_after(&self, pages: usize) {
        self.list_budget.store(pages, Ordering::SeqCst);
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    fn check_online(&self) -> Result<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(Error::Backend("connection refused".to_string()));
        }
        Ok(())
    }
}

impl RemoteStore for FlakyBackend {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Option<Vec<u8>>> {
        self.check_online()?;
        self.inner.get_object(bucket, key).await
    }

    async fn put_object(&self, bucket: &str, key: &str, value: Vec<u8>) -> Result<()> {
        self.check_online()?;
        self.inner.put_object(bucket, key, value).await
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<()> {
        self.check_online()?;
        self.inner.delete_object(bucket, key).await
    }

    async fn list_page(&self, request: &ListRequest) -> Result<ListPage> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.check_online()?;

        let remaining = self.list_budget.load(Ordering::SeqCst);
        if remaining == 0 {
            return Err(Error::Backend("throttled".to_string()));
        }
        if remaining != usize::MAX {
            self.list_budget.store(remaining - 1, Ordering::SeqCst);
        }
        self.inner.list_page(request).await
    }
}

/// Store that always hands back the same continuation token.
#[derive(Clone)]
pub struct StuckTokenBackend;

impl RemoteStore for StuckTokenBackend {
    async fn get_object(&self, _bucket: &str, _key: &str) -> Result<Option<Vec<u8>>> {
        Ok(None)
    }

    async fn put_object(&self, _bucket: &str, _key: &str, _value: Vec<u8>) -> Result<()> {
        Ok(())
    }

    async fn delete_object(&self, _bucket: &str, _key: &str) -> Result<()> {
        Ok(())
    }

    async fn list_page(&self, _request: &ListRequest) -> Result<ListPage> {
        Ok(ListPage {
            entries: vec!["only".to_string()],
            next_continuation_token: Some("again".to_string()),
        })
    }
}

/// Store whose continuation tokens cycle `A`, `B`, `A`, ... forever.
#[derive(Clone, Default)]
pub struct CyclingTokenBackend {
    list_calls: Arc<AtomicUsize>,
}

impl CyclingTokenBackend {
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

impl RemoteStore for CyclingTokenBackend {
    async fn get_object(&self, _bucket: &str, _key: &str) -> Result<Option<Vec<u8>>> {
        Ok(None)
    }

    async fn put_object(&self, _bucket: &str, _key: &str, _value: Vec<u8>) -> Result<()> {
        Ok(())
    }

    async fn delete_object(&self, _bucket: &str, _key: &str) -> Result<()> {
        Ok(())
    }

    async fn list_page(&self, request: &ListRequest) -> Result<ListPage> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let (entry, token) = match request.continuation_token.as_deref() {
            None => ("first", "A"),
            Some("A") => ("after-a", "B"),
            _ => ("after-b", "A"),
        };

        Ok(ListPage {
            entries: vec![entry.to_string()],
            next_continuation_token: Some(token.to_string()),
        })
    }
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
