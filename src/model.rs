//! Records shared across the server fleet.
//!
//! Identity fields are private and fixed at construction; everything else is
//! a plain public field that domain logic mutates before writing the record
//! back. Cross references (`pet_id`, `costume_id`, inventory item ids) are
//! advisory and never checked against the other buckets.
//!
//! Every field is written on encode and required on decode, with `null`
//! allowed where the field is optional. A payload that lacks a field of the
//! requested record, or carries one it does not have, is rejected, so one
//! record's payload never decodes as another.

use crate::bucket::Category;
use crate::codec::{finite_f64, null_as_default, nullable};
use crate::entity::StoreEntity;
use crate::key::StoreKey;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use uuid::Uuid;

/// A game server registered with the network.
///
/// Stored under `"{type}/{id}"`, so listing the servers bucket with a `/`
/// delimiter enumerates the server types.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Server {
    id: Uuid,
    #[serde(rename = "type")]
    kind: String,
    /// IP address or hostname the server accepts players on.
    #[serde(deserialize_with = "nullable")]
    pub address: Option<String>,
}

impl Server {
    /// Every server names a type to classify itself, prefixed by its
    /// creator, e.g. `"mycompany.spleef"`.
    pub fn new(id: Uuid, kind: impl Into<String>) -> Self {
        Server {
            id,
            kind: kind.into(),
            address: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }
}

impl StoreEntity for Server {
    fn store_key(&self) -> String {
        StoreKey::grouped(&self.kind, &self.id)
    }

    fn category() -> Category {
        Category::Servers
    }
}

/// Player data visible to every server. Keyed by the player's account UUID.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PublicPlayer {
    id: Uuid,
    #[serde(rename = "friendsList", deserialize_with = "null_as_default")]
    pub friends: BTreeSet<Uuid>,
    #[serde(rename = "ignoredList", deserialize_with = "null_as_default")]
    pub ignored: BTreeSet<Uuid>,
    #[serde(deserialize_with = "nullable")]
    pub pet_id: Option<Uuid>,
    #[serde(deserialize_with = "nullable")]
    pub costume_id: Option<Uuid>,
    /// Special items held, by item id.
    #[serde(deserialize_with = "null_as_default")]
    pub inventory: BTreeMap<Uuid, i32>,
}

impl PublicPlayer {
    pub fn new(id: Uuid) -> Self {
        PublicPlayer {
            id,
            friends: BTreeSet::new(),
            ignored: BTreeSet::new(),
            pet_id: None,
            costume_id: None,
            inventory: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }
}

impl StoreEntity for PublicPlayer {
    fn store_key(&self) -> String {
        self.id.to_string()
    }

    fn category() -> Category {
        Category::PublicPlayers
    }
}

/// Sensitive player data (balances). Keyed by the player's account UUID.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PrivatePlayer {
    id: Uuid,
    /// In-game currency.
    pub dew_points: i64,
    /// eSports currency. Must be finite to be stored.
    #[serde(serialize_with = "finite_f64")]
    pub frost_points: f64,
}

impl PrivatePlayer {
    pub fn new(id: Uuid) -> Self {
        PrivatePlayer {
            id,
            dew_points: 0,
            frost_points: 0.0,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }
}

impl StoreEntity for PrivatePlayer {
    fn store_key(&self) -> String {
        self.id.to_string()
    }

    fn category() -> Category {
        Category::PrivatePlayers
    }
}

/// A special item that can sit in a player's inventory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Item {
    id: Uuid,
    /// Material name, e.g. `"DIAMOND_SWORD"`.
    #[serde(rename = "type", deserialize_with = "nullable")]
    pub kind: Option<String>,
}

impl Item {
    pub fn new(id: Uuid) -> Self {
        Item { id, kind: None }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }
}

impl StoreEntity for Item {
    fn store_key(&self) -> String {
        self.id.to_string()
    }

    fn category() -> Category {
        Category::Items
    }
}

/// A pet owned by a player. Stored under `"{type}/{id}"`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Pet {
    id: Uuid,
    #[serde(rename = "type")]
    kind: String,
    #[serde(deserialize_with = "nullable")]
    pub name: Option<String>,
    /// Milliseconds since the Unix epoch.
    pub birthday: i64,
    #[serde(deserialize_with = "nullable")]
    pub personality: Option<String>,
}

impl Pet {
    /// `kind` is the animal, e.g. `"wolf"`.
    pub fn new(id: Uuid, kind: impl Into<String>) -> Self {
        Pet {
            id,
            kind: kind.into(),
            name: None,
            birthday: 0,
            personality: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }
}

impl StoreEntity for Pet {
    fn store_key(&self) -> String {
        StoreKey::grouped(&self.kind, &self.id)
    }

    fn category() -> Category {
        Category::Pets
    }
}

/// A cosmetic outfit a player can wear.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Costume {
    id: Uuid,
    #[serde(rename = "type", deserialize_with = "nullable")]
    pub kind: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub name: Option<String>,
}

impl Costume {
    pub fn new(id: Uuid) -> Self {
        Costume {
            id,
            kind: None,
            name: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }
}

impl StoreEntity for Costume {
    fn store_key(&self) -> String {
        self.id.to_string()
    }

    fn category() -> Category {
        Category::Costumes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SERVER_ID: &str = "11111111-1111-1111-1111-111111111111";

    fn uuid(s: &str) -> Uuid {
        Uuid::parse_str(s).unwrap()
    }

    #[test]
    fn test_grouped_keys() {
        let server = Server::new(uuid(SERVER_ID), "lobby");
        assert_eq!(server.store_key(), format!("lobby/{}", SERVER_ID));

        let pet = Pet::new(uuid(SERVER_ID), "wolf");
        assert_eq!(pet.store_key(), format!("wolf/{}", SERVER_ID));
    }

    #[test]
    fn test_plain_keys() {
        let id = Uuid::new_v4();
        assert_eq!(PublicPlayer::new(id).store_key(), id.to_string());
        assert_eq!(PrivatePlayer::new(id).store_key(), id.to_string());
        assert_eq!(Item::new(id).store_key(), id.to_string());
        assert_eq!(Costume::new(id).store_key(), id.to_string());
    }

    #[test]
    fn test_categories() {
        assert_eq!(Server::category(), Category::Servers);
        assert_eq!(PublicPlayer::category(), Category::PublicPlayers);
        assert_eq!(PrivatePlayer::category(), Category::PrivatePlayers);
        assert_eq!(Item::category(), Category::Items);
        assert_eq!(Pet::category(), Category::Pets);
        assert_eq!(Costume::category(), Category::Costumes);
    }

    #[test]
    fn test_server_field_names() {
        let mut server = Server::new(uuid(SERVER_ID), "lobby");
        server.address = Some("10.0.0.5".to_string());
        let text = String::from_utf8(server.encode().unwrap()).unwrap();
        assert_eq!(
            text,
            format!(
                r#"{{"id":"{}","type":"lobby","address":"10.0.0.5"}}"#,
                SERVER_ID
            )
        );
    }

    #[test]
    fn test_public_player_field_names() {
        let mut player = PublicPlayer::new(Uuid::new_v4());
        player.pet_id = Some(Uuid::new_v4());
        let value: serde_json::Value = serde_json::from_slice(&player.encode().unwrap()).unwrap();
        let object = value.as_object().unwrap();

        for field in ["id", "friendsList", "ignoredList", "petId", "costumeId", "inventory"] {
            assert!(object.contains_key(field), "missing {}", field);
        }
    }

    #[test]
    fn test_private_player_roundtrip() {
        let mut player = PrivatePlayer::new(Uuid::new_v4());
        player.dew_points = 1_500;
        player.frost_points = 12.25;

        let decoded = PrivatePlayer::decode(&player.encode().unwrap()).unwrap();
        assert_eq!(decoded, player);
    }

    #[test]
    fn test_non_finite_frost_points_not_encoded() {
        let mut player = PrivatePlayer::new(Uuid::new_v4());
        player.dew_points = 500;

        for frost in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            player.frost_points = frost;
            assert!(matches!(player.encode(), Err(crate::Error::Encode(_))));
        }
    }

    fn every_variant_payload() -> Vec<(&'static str, Vec<u8>)> {
        let id = Uuid::new_v4();
        let mut item = Item::new(id);
        item.kind = Some("DIAMOND".to_string());

        vec![
            ("Server", Server::new(id, "lobby").encode().unwrap()),
            ("PublicPlayer", PublicPlayer::new(id).encode().unwrap()),
            ("PrivatePlayer", PrivatePlayer::new(id).encode().unwrap()),
            ("Item", item.encode().unwrap()),
            ("Pet", Pet::new(id, "wolf").encode().unwrap()),
            ("Costume", Costume::new(id).encode().unwrap()),
        ]
    }

    fn decodes_as(variant: &str, bytes: &[u8]) -> bool {
        match variant {
            "Server" => Server::decode(bytes).is_ok(),
            "PublicPlayer" => PublicPlayer::decode(bytes).is_ok(),
            "PrivatePlayer" => PrivatePlayer::decode(bytes).is_ok(),
            "Item" => Item::decode(bytes).is_ok(),
            "Pet" => Pet::decode(bytes).is_ok(),
            "Costume" => Costume::decode(bytes).is_ok(),
            other => panic!("unknown variant {}", other),
        }
    }

    #[test]
    fn test_payload_decodes_only_as_its_own_variant() {
        let payloads = every_variant_payload();

        for (written, bytes) in &payloads {
            for (read, _) in &payloads {
                assert_eq!(
                    decodes_as(read, bytes),
                    written == read,
                    "{} payload read as {}",
                    written,
                    read
                );
            }
        }
    }

    #[test]
    fn test_missing_optional_field_fails() {
        let id = Uuid::new_v4();
        let item = format!(r#"{{"id":"{}","type":"DIAMOND"}}"#, id);

        assert!(Item::decode(item.as_bytes()).is_ok());
        assert!(Server::decode(item.as_bytes()).is_err());
        assert!(Costume::decode(item.as_bytes()).is_err());
        assert!(Pet::decode(item.as_bytes()).is_err());
    }

    #[test]
    fn test_decoding_as_wrong_variant_fails() {
        let mut pet = Pet::new(Uuid::new_v4(), "wolf");
        pet.name = Some("Rex".to_string());
        let bytes = pet.encode().unwrap();

        assert!(Pet::decode(&bytes).is_ok());
        assert!(Server::decode(&bytes).is_err());
        assert!(PublicPlayer::decode(&bytes).is_err());
        assert!(Item::decode(&bytes).is_err());
    }

    #[test]
    fn test_missing_identity_fails() {
        assert!(Server::decode(br#"{"address":"10.0.0.5"}"#).is_err());
        assert!(Server::decode(br#"{"id":"not-a-uuid","type":"lobby"}"#).is_err());
        assert!(PublicPlayer::decode(br#"{"petId":null}"#).is_err());
    }
}
