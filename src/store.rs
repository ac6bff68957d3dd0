//! Object store facade - main entry point for typed store operations.
//!
//! [`ObjectStore`] is the only place lower-layer failures are translated.
//! Nothing below it swallows errors, and nothing above it sees a raw
//! transport, decode or encode failure: reads collapse to [`Lookup`] or
//! `Option`, writes to `bool`, listings to a best-effort key list. Every
//! swallowed failure is logged.

use crate::backend::{ListRequest, RemoteStore};
use crate::bucket::Category;
use crate::config::StoreConfig;
use crate::entity::StoreEntity;
use crate::error::{Error, Result};
use crate::lister::{self, Listing};
use crate::observability::{NoOpMetrics, StoreMetrics};
use std::time::Instant;

/// Outcome of a typed read.
///
/// Keeps "nothing there" apart from "something there that is not a `T`" and
/// "could not ask". [`Lookup::into_option`] folds all of them into `None`.
#[derive(Debug)]
pub enum Lookup<T> {
    /// The key holds a well-formed `T`.
    Found(T),
    /// The store has no object at the key.
    NotFound,
    /// The key holds a payload that is not a valid `T`.
    Corrupt(Error),
    /// The store could not be asked: transport failure or invalid bucket.
    Unavailable(Error),
}

impl<T> Lookup<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            Lookup::Found(entity) => Some(entity),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Lookup::NotFound)
    }

    pub fn is_corrupt(&self) -> bool {
        matches!(self, Lookup::Corrupt(_))
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Lookup::Unavailable(_))
    }

    /// The error behind a `Corrupt` or `Unavailable` outcome.
    pub fn error(&self) -> Option<&Error> {
        match self {
            Lookup::Corrupt(e) | Lookup::Unavailable(e) => Some(e),
            _ => None,
        }
    }
}

impl<T> From<Lookup<T>> for Option<T> {
    fn from(lookup: Lookup<T>) -> Self {
        lookup.into_option()
    }
}

/// Typed CRUD and listing over a [`RemoteStore`].
///
/// Holds the injected backend and no other state; each call is one
/// request/response against the store (or one run of page requests for a
/// listing). There is no caching, no locking and no versioning: concurrent
/// writes to one key resolve to whichever the store applied last.
///
/// # Example
///
/// ```ignore
/// use cloudcraft_store::{backend::InMemoryBackend, bucket, model::Server, ObjectStore};
///
/// let store = ObjectStore::new(InMemoryBackend::new());
/// let server = Server::new(id, "lobby");
///
/// assert!(store.put(bucket::SERVERS, &server).await);
/// let loaded: Option<Server> = store.get(bucket::SERVERS, "lobby/...").await;
/// ```
pub struct ObjectStore<B: RemoteStore> {
    backend: B,
    config: StoreConfig,
    metrics: Box<dyn StoreMetrics>,
}

impl<B: RemoteStore> ObjectStore<B> {
    /// Create a store over `backend` with default configuration.
    pub fn new(backend: B) -> Self {
        ObjectStore {
            backend,
            config: StoreConfig::default(),
            metrics: Box::new(NoOpMetrics),
        }
    }

    /// Create a store with explicit configuration.
    ///
    /// # Errors
    /// Returns `Error::Config` if the configuration is invalid.
    pub fn with_config(backend: B, config: StoreConfig) -> Result<Self> {
        config.validate()?;
        Ok(ObjectStore {
            backend,
            config,
            metrics: Box::new(NoOpMetrics),
        })
    }

    /// Set custom metrics handler.
    pub fn with_metrics(mut self, metrics: Box<dyn StoreMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Read the entity stored at `key`, reporting why nothing came back.
    pub async fn fetch<T: StoreEntity>(&self, bucket: &str, key: &str) -> Lookup<T> {
        let timer = Instant::now();

        if let Err(e) = check_entity_bucket::<T>(bucket) {
            warn!("Read of {}:{} refused: {}", bucket, key, e);
            return Lookup::Unavailable(e);
        }

        let bytes = match self.backend.get_object(bucket, key).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                self.metrics.record_not_found(bucket, key, timer.elapsed());
                return Lookup::NotFound;
            }
            Err(e) => {
                warn!("Unable to read {}:{}: {}", bucket, key, e);
                self.metrics.record_error(bucket, key, &e.to_string());
                return Lookup::Unavailable(e);
            }
        };

        match T::decode(&bytes) {
            Ok(entity) => {
                self.metrics.record_found(bucket, key, timer.elapsed());
                Lookup::Found(entity)
            }
            Err(e) => {
                warn!(
                    "Object \"{}:{}\" is not a valid {}: {}",
                    bucket,
                    key,
                    std::any::type_name::<T>(),
                    e
                );
                self.metrics.record_corrupt(bucket, key);
                Lookup::Corrupt(e)
            }
        }
    }

    /// Read the entity stored at `key`.
    ///
    /// `None` covers a missing key, a corrupt payload, a transport failure
    /// and an invalid bucket alike; use [`ObjectStore::fetch`] to tell them
    /// apart.
    pub async fn get<T: StoreEntity>(&self, bucket: &str, key: &str) -> Option<T> {
        self.fetch(bucket, key).await.into_option()
    }

    /// Write `entity` at its derived key, replacing any previous value.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidBucket`: bucket unbound or bound to another category
    /// - `Error::Encode`: entity could not be encoded (store untouched)
    /// - `Error::Backend`: the write failed
    pub async fn try_put<T: StoreEntity>(&self, bucket: &str, entity: &T) -> Result<()> {
        let timer = Instant::now();
        check_entity_bucket::<T>(bucket)?;

        let key = entity.store_key();
        let bytes = entity.encode()?;

        self.backend.put_object(bucket, &key, bytes).await?;
        self.metrics.record_put(bucket, &key, timer.elapsed());
        Ok(())
    }

    /// Write `entity` at its derived key. Returns `false` on any failure.
    pub async fn put<T: StoreEntity>(&self, bucket: &str, entity: &T) -> bool {
        match self.try_put(bucket, entity).await {
            Ok(()) => true,
            Err(e) => {
                let key = entity.store_key();
                warn!("Unable to write {}:{}: {}", bucket, key, e);
                self.metrics.record_error(bucket, &key, &e.to_string());
                false
            }
        }
    }

    /// Remove the object at `key`. Removing an absent key succeeds.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidBucket`: bucket not bound in the registry
    /// - `Error::Backend`: the delete failed
    pub async fn try_delete(&self, bucket: &str, key: &str) -> Result<()> {
        let timer = Instant::now();
        check_bucket(bucket)?;

        self.backend.delete_object(bucket, key).await?;
        self.metrics.record_delete(bucket, key, timer.elapsed());
        Ok(())
    }

    /// Remove the object at `key`. Returns `false` only when the delete
    /// could not be carried out.
    pub async fn delete(&self, bucket: &str, key: &str) -> bool {
        match self.try_delete(bucket, key).await {
            Ok(()) => true,
            Err(e) => {
                warn!("Unable to delete {}:{}: {}", bucket, key, e);
                self.metrics.record_error(bucket, key, &e.to_string());
                false
            }
        }
    }

    /// List keys in `bucket`, following every page.
    ///
    /// `prefix` restricts the keys; `delimiter` collapses keys into their
    /// groups (`"lobby/1"`, `"lobby/2"` become `"lobby"`). The returned
    /// [`Listing`] says whether the key list is complete.
    pub async fn try_list(
        &self,
        bucket: &str,
        prefix: Option<&str>,
        delimiter: Option<&str>,
    ) -> Listing {
        let timer = Instant::now();

        if let Err(e) = check_bucket(bucket) {
            warn!("Listing of {} refused: {}", bucket, e);
            return Listing::failed(e);
        }

        let request = ListRequest::new(bucket)
            .with_prefix(prefix)
            .with_delimiter(delimiter)
            .with_max_keys(self.config.page_size);
        let listing = lister::list_keys(&self.backend, request).await;

        if let Some(e) = &listing.error {
            self.metrics
                .record_error(bucket, prefix.unwrap_or(""), &e.to_string());
        }
        self.metrics
            .record_list(bucket, listing.pages, listing.keys.len(), timer.elapsed());
        listing
    }

    /// List keys in `bucket`, best effort.
    ///
    /// An empty list means no matching keys, an invalid bucket, or a failure
    /// on the first page. A failure on a later page returns the keys gathered
    /// so far.
    pub async fn list(
        &self,
        bucket: &str,
        prefix: Option<&str>,
        delimiter: Option<&str>,
    ) -> Vec<String> {
        self.try_list(bucket, prefix, delimiter).await.keys
    }

    /// Check that the backend is reachable.
    pub async fn health_check(&self) -> bool {
        match self.backend.health_check().await {
            Ok(healthy) => healthy,
            Err(e) => {
                warn!("Store health check failed: {}", e);
                false
            }
        }
    }
}

/// The bucket must be bound in the registry.
fn check_bucket(bucket: &str) -> Result<Category> {
    Category::from_bucket(bucket).ok_or_else(|| Error::InvalidBucket(bucket.to_string()))
}

/// The bucket must be bound to `T`'s category.
fn check_entity_bucket<T: StoreEntity>(bucket: &str) -> Result<()> {
    let category = check_bucket(bucket)?;
    if category != T::category() {
        return Err(Error::InvalidBucket(format!(
            "{} holds {:?}, not {:?}",
            bucket,
            category,
            T::category()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::InMemoryBackend;
    use crate::bucket;
    use crate::model::{Item, Server};
    use uuid::Uuid;

    fn store() -> ObjectStore<InMemoryBackend> {
        ObjectStore::new(InMemoryBackend::new())
    }

    #[test]
    fn test_check_entity_bucket() {
        assert!(check_entity_bucket::<Server>(bucket::SERVERS).is_ok());
        assert!(matches!(
            check_entity_bucket::<Server>(bucket::ITEMS),
            Err(Error::InvalidBucket(_))
        ));
        assert!(matches!(
            check_entity_bucket::<Server>("servers"),
            Err(Error::InvalidBucket(_))
        ));
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let result = ObjectStore::with_config(
            InMemoryBackend::new(),
            StoreConfig::default().with_page_size(0),
        );
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn test_put_then_fetch() {
        let store = store();
        let mut item = Item::new(Uuid::new_v4());
        item.kind = Some("DIAMOND".to_string());

        assert!(store.put(bucket::ITEMS, &item).await);

        match store.fetch::<Item>(bucket::ITEMS, &item.store_key()).await {
            Lookup::Found(loaded) => assert_eq!(loaded, item),
            other => panic!("expected Found, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_missing_key() {
        let store = store();
        let lookup = store.fetch::<Item>(bucket::ITEMS, "nope").await;
        assert!(lookup.is_not_found());
        assert!(lookup.error().is_none());
    }

    #[tokio::test]
    async fn test_fetch_corrupt_payload() {
        let store = store();
        store
            .backend()
            .put_object(bucket::ITEMS, "bad", b"{\"id\":".to_vec())
            .await
            .unwrap();

        let lookup = store.fetch::<Item>(bucket::ITEMS, "bad").await;
        assert!(lookup.is_corrupt());
        assert!(store.get::<Item>(bucket::ITEMS, "bad").await.is_none());
    }

    #[tokio::test]
    async fn test_wrong_bucket_touches_nothing() {
        let store = store();
        let item = Item::new(Uuid::new_v4());

        assert!(!store.put(bucket::SERVERS, &item).await);
        assert!(store.backend().is_empty().await);
        assert!(store
            .fetch::<Item>(bucket::SERVERS, &item.store_key())
            .await
            .is_unavailable());
    }

    #[tokio::test]
    async fn test_unknown_bucket() {
        let store = store();
        assert!(!store.delete("com.cloudcraftnetwork.nope", "key").await);
        assert!(!store.delete("", "key").await);

        let listing = store.try_list("", None, None).await;
        assert!(!listing.is_complete());
        assert!(listing.keys.is_empty());
    }

    #[tokio::test]
    async fn test_lookup_into_option() {
        let found: Option<u8> = Lookup::Found(3).into();
        assert_eq!(found, Some(3));
        assert_eq!(Lookup::<u8>::NotFound.into_option(), None);
        assert_eq!(
            Lookup::<u8>::Corrupt(Error::Decode("x".to_string())).into_option(),
            None
        );
    }
}
