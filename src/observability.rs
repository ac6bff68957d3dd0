//! Metrics hooks for store operations.
//!
//! Implement [`StoreMetrics`] to feed your monitoring system:
//!
//! ```ignore
//! use cloudcraft_store::observability::StoreMetrics;
//! use std::time::Duration;
//!
//! struct PrometheusMetrics;
//!
//! impl StoreMetrics for PrometheusMetrics {
//!     fn record_found(&self, _bucket: &str, _key: &str, _duration: Duration) {
//!         // counter!("store_reads", "outcome" => "found").inc();
//!     }
//!     // ... implement other methods
//! }
//!
//! // let store = ObjectStore::new(backend)
//! //     .with_metrics(Box::new(PrometheusMetrics));
//! ```
//!
//! Methods left unimplemented log through the `log` crate. The store uses
//! [`NoOpMetrics`] unless told otherwise.

use std::time::Duration;

/// Trait for store metrics collection.
pub trait StoreMetrics: Send + Sync {
    /// A read returned a decoded entity.
    fn record_found(&self, bucket: &str, key: &str, duration: Duration) {
        debug!("Store FOUND: {}:{} took {:?}", bucket, key, duration);
    }

    /// A read found nothing at the key.
    fn record_not_found(&self, bucket: &str, key: &str, duration: Duration) {
        debug!("Store NOT FOUND: {}:{} took {:?}", bucket, key, duration);
    }

    /// A read found a payload that did not decode.
    fn record_corrupt(&self, bucket: &str, key: &str) {
        warn!("Store CORRUPT: {}:{}", bucket, key);
    }

    /// A write completed.
    fn record_put(&self, bucket: &str, key: &str, duration: Duration) {
        debug!("Store PUT: {}:{} took {:?}", bucket, key, duration);
    }

    /// A delete completed.
    fn record_delete(&self, bucket: &str, key: &str, duration: Duration) {
        debug!("Store DELETE: {}:{} took {:?}", bucket, key, duration);
    }

    /// A listing finished, possibly incomplete.
    fn record_list(&self, bucket: &str, pages: usize, keys: usize, duration: Duration) {
        debug!(
            "Store LIST: {} -> {} keys in {} pages took {:?}",
            bucket, keys, pages, duration
        );
    }

    /// An operation failed.
    fn record_error(&self, bucket: &str, key: &str, error: &str) {
        warn!("Store ERROR for {}:{}: {}", bucket, key, error);
    }
}

/// Default metrics implementation (no-op).
#[derive(Clone, Default)]
pub struct NoOpMetrics;

impl StoreMetrics for NoOpMetrics {
    fn record_found(&self, _bucket: &str, _key: &str, _duration: Duration) {}
    fn record_not_found(&self, _bucket: &str, _key: &str, _duration: Duration) {}
    fn record_corrupt(&self, _bucket: &str, _key: &str) {}
    fn record_put(&self, _bucket: &str, _key: &str, _duration: Duration) {}
    fn record_delete(&self, _bucket: &str, _key: &str, _duration: Duration) {}
    fn record_list(&self, _bucket: &str, _pages: usize, _keys: usize, _duration: Duration) {}
    fn record_error(&self, _bucket: &str, _key: &str, _error: &str) {}
}

/// Metrics that only log, using the trait's default methods.
#[derive(Clone, Default)]
pub struct LogMetrics;

impl StoreMetrics for LogMetrics {}
