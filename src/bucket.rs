//! Fixed registry of remote buckets, one per entity category.
//!
//! Bucket names are a persisted contract: renaming one orphans every record
//! already stored under it.

use std::fmt;

/// Namespace shared by every bucket of the network.
pub const BUCKET_PREFIX: &str = "com.cloudcraftnetwork.";

pub const SERVERS: &str = "com.cloudcraftnetwork.servers";
pub const PUBLIC_PLAYERS: &str = "com.cloudcraftnetwork.players.public";
pub const PRIVATE_PLAYERS: &str = "com.cloudcraftnetwork.players.private";
pub const ITEMS: &str = "com.cloudcraftnetwork.items";
pub const PETS: &str = "com.cloudcraftnetwork.pets";
pub const COSTUMES: &str = "com.cloudcraftnetwork.costumes";
pub const BLACKLIST: &str = "com.cloudcraftnetwork.blacklist";

/// Entity category. Each category owns exactly one bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Servers,
    PublicPlayers,
    PrivatePlayers,
    Items,
    Pets,
    Costumes,
    /// Reserved. No entity variant is stored here yet.
    Blacklist,
}

impl Category {
    /// Every category, in registry order.
    pub const ALL: [Category; 7] = [
        Category::Servers,
        Category::PublicPlayers,
        Category::PrivatePlayers,
        Category::Items,
        Category::Pets,
        Category::Costumes,
        Category::Blacklist,
    ];

    /// Name of the bucket bound to this category.
    pub const fn bucket(self) -> &'static str {
        match self {
            Category::Servers => SERVERS,
            Category::PublicPlayers => PUBLIC_PLAYERS,
            Category::PrivatePlayers => PRIVATE_PLAYERS,
            Category::Items => ITEMS,
            Category::Pets => PETS,
            Category::Costumes => COSTUMES,
            Category::Blacklist => BLACKLIST,
        }
    }

    /// Reverse lookup. `None` for any name the registry does not bind.
    pub fn from_bucket(bucket: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.bucket() == bucket)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.bucket())
    }
}
