//! Store key utilities.

/// Separator between a key's group (server type, pet type) and its id.
pub const GROUP_DELIMITER: &str = "/";

/// Builder for store keys.
pub struct StoreKey;

impl StoreKey {
    /// Build a grouped key: `"{group}/{id}"`.
    pub fn grouped(group: &str, id: &dyn std::fmt::Display) -> String {
        format!("{}{}{}", group, GROUP_DELIMITER, id)
    }

    /// Prefix selecting every key of one group: `"{group}/"`.
    pub fn group_prefix(group: &str) -> String {
        format!("{}{}", group, GROUP_DELIMITER)
    }

    /// Split a key at its first delimiter into `(group, rest)`.
    ///
    /// Ungrouped keys return `(None, key)`.
    pub fn split(key: &str) -> (Option<&str>, &str) {
        match key.split_once(GROUP_DELIMITER) {
            Some((group, rest)) => (Some(group), rest),
            None => (None, key),
        }
    }
}
