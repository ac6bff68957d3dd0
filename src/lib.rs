//! # cloudcraft-store
//!
//! Typed persistence for a CloudCraftNetwork game-server fleet, over a flat
//! remote object store addressed by bucket and key.
//!
//! ## Features
//!
//! - **Typed records:** Servers, players, items, pets and costumes implement
//!   [`StoreEntity`] and derive their own keys
//! - **Fixed buckets:** One bucket per entity category, see [`bucket`]
//! - **Plain JSON payloads:** One field-named JSON line per object, readable
//!   by any tooling
//! - **Complete listings:** Truncated listing pages are stitched together
//!   transparently
//! - **No surprises at the boundary:** Reads give `Option`/[`Lookup`], writes
//!   give `bool`, failures are logged
//! - **Backend Agnostic:** In-memory by default, S3 behind the `s3` feature,
//!   or any custom [`RemoteStore`]
//!
//! ## Quick Start
//!
//! ```ignore
//! use cloudcraft_store::{backend::InMemoryBackend, model::Server, NetworkStore};
//! use uuid::Uuid;
//!
//! // Build once at startup; clones share the backend
//! let store = NetworkStore::new(InMemoryBackend::new());
//!
//! let mut server = Server::new(Uuid::new_v4(), "lobby");
//! server.address = Some("10.0.0.5".to_string());
//! assert!(store.put_server_info(&server).await);
//!
//! let types = store.server_types().await;          // ["lobby"]
//! let keys = store.server_keys("lobby").await;     // ["lobby/<uuid>"]
//! let loaded = store.server_info(&keys[0]).await;  // Some(server)
//! ```
//!
//! ## Lower-level access
//!
//! ```ignore
//! use cloudcraft_store::{backend::InMemoryBackend, bucket, model::Item, Lookup, ObjectStore};
//!
//! let store = ObjectStore::new(InMemoryBackend::new());
//! match store.fetch::<Item>(bucket::ITEMS, key).await {
//!     Lookup::Found(item) => { /* ... */ }
//!     Lookup::NotFound => { /* ... */ }
//!     Lookup::Corrupt(e) | Lookup::Unavailable(e) => { /* ... */ }
//! }
//! ```

#[macro_use]
extern crate log;

pub mod backend;
pub mod bucket;
pub mod codec;
pub mod config;
pub mod entity;
pub mod error;
pub mod key;
pub mod lister;
pub mod model;
pub mod observability;
pub mod service;
pub mod store;

// Re-exports for convenience
pub use backend::RemoteStore;
pub use bucket::Category;
pub use config::StoreConfig;
pub use entity::StoreEntity;
pub use error::{Error, Result};
pub use lister::Listing;
pub use service::NetworkStore;
pub use store::{Lookup, ObjectStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
