//! Core entity trait that all stored records implement.

use crate::bucket::Category;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Trait that every record persisted in the remote store implements.
///
/// The key must be computed from identity fields only, so two values with the
/// same identity always land on the same key and a second `put` overwrites
/// the first.
///
/// # Example
///
/// ```
/// use cloudcraft_store::bucket::Category;
/// use cloudcraft_store::StoreEntity;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Serialize, Deserialize)]
/// pub struct Banner {
///     pub id: String,
///     pub text: String,
/// }
///
/// impl StoreEntity for Banner {
///     fn store_key(&self) -> String {
///         self.id.clone()
///     }
///
///     fn category() -> Category {
///         Category::Blacklist
///     }
/// }
/// ```
pub trait StoreEntity: Send + Sync + Serialize + for<'de> Deserialize<'de> + Clone {
    /// Return the entity's key within its bucket.
    ///
    /// Pure function of the identity fields.
    fn store_key(&self) -> String;

    /// Category (and therefore bucket) this entity type is bound to.
    fn category() -> Category;

    /// Name of the bucket this entity type is stored in.
    fn bucket() -> &'static str {
        Self::category().bucket()
    }

    /// Encode the entity as a payload.
    ///
    /// See `crate::codec` for the format.
    fn encode(&self) -> Result<Vec<u8>> {
        crate::codec::encode(self)
    }

    /// Decode an entity from a payload.
    ///
    /// # Errors
    ///
    /// - `Error::Decode`: payload is not JSON or has the wrong shape
    fn decode(bytes: &[u8]) -> Result<Self> {
        crate::codec::decode(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Serialize, Deserialize)]
    struct TestEntity {
        group: String,
        id: String,
        value: String,
    }

    impl StoreEntity for TestEntity {
        fn store_key(&self) -> String {
            format!("{}/{}", self.group, self.id)
        }

        fn category() -> Category {
            Category::Items
        }
    }

    #[test]
    fn test_encode_decode() {
        let entity = TestEntity {
            group: "g".to_string(),
            id: "test_1".to_string(),
            value: "data".to_string(),
        };

        let bytes = entity.encode().unwrap();
        let decoded = TestEntity::decode(&bytes).unwrap();

        assert_eq!(entity.id, decoded.id);
        assert_eq!(entity.value, decoded.value);
    }

    #[test]
    fn test_store_key_ignores_mutable_fields() {
        let mut entity = TestEntity {
            group: "g".to_string(),
            id: "entity_123".to_string(),
            value: "before".to_string(),
        };
        let before = entity.store_key();
        entity.value = "after".to_string();

        assert_eq!(entity.store_key(), before);
        assert_eq!(before, "g/entity_123");
        assert_eq!(TestEntity::bucket(), "com.cloudcraftnetwork.items");
    }
}
