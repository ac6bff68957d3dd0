//! JSON payload codec.
//!
//! Every stored object is exactly one compact JSON document on a single
//! line. Field names are preserved, so operational tooling can read a bucket
//! without this crate:
//!
//! ```text
//! {"id":"11111111-1111-1111-1111-111111111111","type":"lobby","address":"10.0.0.5"}
//! ```
//!
//! Decoding only looks at the first line of a payload. Anything after the
//! first newline is ignored.
//!
//! # Example
//!
//! ```rust
//! use cloudcraft_store::codec::{decode, encode};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Item {
//!     id: u64,
//!     name: String,
//! }
//!
//! # fn main() -> cloudcraft_store::Result<()> {
//! let item = Item { id: 1, name: "DIAMOND".to_string() };
//! let bytes = encode(&item)?;
//! assert!(!bytes.contains(&b'\n'));
//!
//! let decoded: Item = decode(&bytes)?;
//! assert_eq!(item, decoded);
//! # Ok(())
//! # }
//! ```

use crate::error::{Error, Result};
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Content type attached to payloads by backends that carry one.
pub const CONTENT_TYPE: &str = "application/json";

/// Encode a value as one compact JSON line.
///
/// # Errors
///
/// Returns `Error::Encode` if the value cannot be represented as JSON
/// (for example a map with non-string keys).
pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(|e| {
        log::error!("Payload encoding failed: {}", e);
        Error::Encode(e.to_string())
    })
}

/// Decode the first line of a payload into `T`.
///
/// # Errors
///
/// Returns `Error::Decode` if the payload is empty, not UTF-8, not JSON, or
/// does not have the fields `T` requires.
pub fn decode<T: for<'de> Deserialize<'de>>(bytes: &[u8]) -> Result<T> {
    let line = first_line(bytes);
    if line.is_empty() {
        return Err(Error::Decode("empty payload".to_string()));
    }

    serde_json::from_slice(line).map_err(|e| Error::Decode(e.to_string()))
}

/// The payload up to (not including) the first newline, without a trailing CR.
fn first_line(bytes: &[u8]) -> &[u8] {
    let line = match bytes.iter().position(|b| *b == b'\n') {
        Some(end) => &bytes[..end],
        None => bytes,
    };
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Serialize an `f64`, refusing NaN and infinities.
///
/// JSON has no literal for them and serde_json would write `null`, which
/// no reader accepts back as a number.
pub(crate) fn finite_f64<S>(value: &f64, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if !value.is_finite() {
        return Err(S::Error::custom(format!("non-finite number {}", value)));
    }
    serializer.serialize_f64(*value)
}

/// Deserialize a field that must be present but may be `null`.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer)
}

/// Deserialize `null` as `T::default()`.
///
/// Older writers left unset collections as `null`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
