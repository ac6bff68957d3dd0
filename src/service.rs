//! Shared store handle with per-entity operations.
//!
//! Provides a convenient wrapper around ObjectStore with Arc for easy sharing.

use crate::backend::RemoteStore;
use crate::bucket;
use crate::config::StoreConfig;
use crate::entity::StoreEntity;
use crate::error::Result;
use crate::key::{StoreKey, GROUP_DELIMITER};
use crate::model::{Costume, Item, Pet, PrivatePlayer, PublicPlayer, Server};
use crate::observability::StoreMetrics;
use crate::store::{Lookup, ObjectStore};
use std::sync::Arc;

/// Store handle shared by every plugin on a server.
///
/// Wraps [`ObjectStore`] in an `Arc`, so clones are cheap and all of them use
/// the one backend handle built at startup. Each entity type is read from and
/// written to its own fixed bucket.
///
/// # Example
///
/// ```ignore
/// use cloudcraft_store::{backend::InMemoryBackend, model::Server, NetworkStore};
///
/// let store = NetworkStore::new(InMemoryBackend::new());
///
/// let mut server = Server::new(id, "lobby");
/// server.address = Some("10.0.0.5".to_string());
/// store.put_server_info(&server).await;
///
/// for server_type in store.server_types().await {
///     for key in store.server_keys(&server_type).await {
///         let info = store.server_info(&key).await;
///     }
/// }
/// ```
pub struct NetworkStore<B: RemoteStore> {
    store: Arc<ObjectStore<B>>,
}

impl<B: RemoteStore> Clone for NetworkStore<B> {
    fn clone(&self) -> Self {
        NetworkStore {
            store: Arc::clone(&self.store),
        }
    }
}

impl<B: RemoteStore> NetworkStore<B> {
    /// Create a new shared store with the given backend.
    pub fn new(backend: B) -> Self {
        NetworkStore {
            store: Arc::new(ObjectStore::new(backend)),
        }
    }

    /// Create a new shared store with explicit configuration.
    ///
    /// # Errors
    /// Returns `Error::Config` if the configuration is invalid.
    pub fn with_config(backend: B, config: StoreConfig) -> Result<Self> {
        Ok(NetworkStore {
            store: Arc::new(ObjectStore::with_config(backend, config)?),
        })
    }

    /// Create a new shared store with custom metrics.
    pub fn with_metrics(backend: B, metrics: Box<dyn StoreMetrics>) -> Self {
        NetworkStore {
            store: Arc::new(ObjectStore::new(backend).with_metrics(metrics)),
        }
    }

    /// Get reference to the underlying facade.
    pub fn store(&self) -> &ObjectStore<B> {
        &self.store
    }

    // ------------------------------------------------------------------------
    // Generic access through each entity's own bucket
    // ------------------------------------------------------------------------

    /// Read a `T` from its bucket, with the reason when nothing came back.
    pub async fn lookup<T: StoreEntity>(&self, key: &str) -> Lookup<T> {
        self.store.fetch(T::bucket(), key).await
    }

    /// Read a `T` from its bucket.
    pub async fn load<T: StoreEntity>(&self, key: &str) -> Option<T> {
        self.store.get(T::bucket(), key).await
    }

    /// Write a `T` to its bucket.
    pub async fn save<T: StoreEntity>(&self, entity: &T) -> bool {
        self.store.put(T::bucket(), entity).await
    }

    /// Delete the stored copy of `entity`.
    pub async fn remove<T: StoreEntity>(&self, entity: &T) -> bool {
        self.store.delete(T::bucket(), &entity.store_key()).await
    }

    /// Every key in `T`'s bucket.
    pub async fn keys<T: StoreEntity>(&self) -> Vec<String> {
        self.store.list(T::bucket(), None, None).await
    }

    // ------------------------------------------------------------------------
    // Servers
    // ------------------------------------------------------------------------

    /// Distinct server types currently registered.
    pub async fn server_types(&self) -> Vec<String> {
        self.store
            .list(bucket::SERVERS, None, Some(GROUP_DELIMITER))
            .await
    }

    /// Keys of every server of one type.
    pub async fn server_keys(&self, server_type: &str) -> Vec<String> {
        let prefix = StoreKey::group_prefix(server_type);
        self.store
            .list(bucket::SERVERS, Some(prefix.as_str()), None)
            .await
    }

    pub async fn server_info(&self, key: &str) -> Option<Server> {
        self.load(key).await
    }

    pub async fn put_server_info(&self, server: &Server) -> bool {
        self.save(server).await
    }

    pub async fn delete_server_info(&self, server: &Server) -> bool {
        self.remove(server).await
    }

    // ------------------------------------------------------------------------
    // Players
    // ------------------------------------------------------------------------

    pub async fn public_player_keys(&self) -> Vec<String> {
        self.keys::<PublicPlayer>().await
    }

    pub async fn public_player_info(&self, key: &str) -> Option<PublicPlayer> {
        self.load(key).await
    }

    pub async fn put_public_player_info(&self, player: &PublicPlayer) -> bool {
        self.save(player).await
    }

    pub async fn delete_public_player_info(&self, player: &PublicPlayer) -> bool {
        self.remove(player).await
    }

    pub async fn private_player_keys(&self) -> Vec<String> {
        self.keys::<PrivatePlayer>().await
    }

    pub async fn private_player_info(&self, key: &str) -> Option<PrivatePlayer> {
        self.load(key).await
    }

    pub async fn put_private_player_info(&self, player: &PrivatePlayer) -> bool {
        self.save(player).await
    }

    pub async fn delete_private_player_info(&self, player: &PrivatePlayer) -> bool {
        self.remove(player).await
    }

    // ------------------------------------------------------------------------
    // Items, pets, costumes
    // ------------------------------------------------------------------------

    pub async fn item_keys(&self) -> Vec<String> {
        self.keys::<Item>().await
    }

    pub async fn item_info(&self, key: &str) -> Option<Item> {
        self.load(key).await
    }

    pub async fn put_item_info(&self, item: &Item) -> bool {
        self.save(item).await
    }

    pub async fn delete_item_info(&self, item: &Item) -> bool {
        self.remove(item).await
    }

    pub async fn pet_keys(&self) -> Vec<String> {
        self.keys::<Pet>().await
    }

    pub async fn pet_info(&self, key: &str) -> Option<Pet> {
        self.load(key).await
    }

    pub async fn put_pet_info(&self, pet: &Pet) -> bool {
        self.save(pet).await
    }

    pub async fn delete_pet_info(&self, pet: &Pet) -> bool {
        self.remove(pet).await
    }

    pub async fn costume_keys(&self) -> Vec<String> {
        self.keys::<Costume>().await
    }

    pub async fn costume_info(&self, key: &str) -> Option<Costume> {
        self.load(key).await
    }

    pub async fn put_costume_info(&self, costume: &Costume) -> bool {
        self.save(costume).await
    }

    pub async fn delete_costume_info(&self, costume: &Costume) -> bool {
        self.remove(costume).await
    }

    /// Check that the backend is reachable.
    pub async fn health_check(&self) -> bool {
        self.store.health_check().await
    }
}
