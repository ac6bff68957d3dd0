//! Error types for the object store.

use std::fmt;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the object store.
///
/// Lower layers (codec, backends, lister) return `Result<T>`. The
/// [`ObjectStore`](crate::store::ObjectStore) facade is the only place these
/// errors are turned into the optional/boolean outcomes callers see.
#[derive(Debug, Clone)]
pub enum Error {
    /// Encoding failed when converting an entity to a payload.
    ///
    /// The remote store is never touched when this happens.
    Encode(String),

    /// Decoding failed when converting a payload to an entity.
    ///
    /// Common causes:
    /// - Payload is not well-formed JSON
    /// - Payload is JSON but has the shape of another entity variant
    /// - Payload is empty
    Decode(String),

    /// Remote store error (unreachable, permission denied, rate limited...).
    Backend(String),

    /// Bucket name not bound in the registry, or bound to another entity category.
    InvalidBucket(String),

    /// Configuration error during construction.
    Config(String),

    /// Generic error with custom message.
    Other(String),
}

impl Error {
    /// True for failures talking to the remote store.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Backend(_))
    }

    /// True when a stored payload could not be turned back into an entity.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, Error::Decode(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Encode(msg) => write!(f, "Encode error: {}", msg),
            Error::Decode(msg) => write!(f, "Decode error: {}", msg),
            Error::Backend(msg) => write!(f, "Backend error: {}", msg),
            Error::InvalidBucket(bucket) => write!(f, "Invalid bucket: {}", bucket),
            Error::Config(msg) => write!(f, "Config error: {}", msg),
            Error::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

// ============================================================================
// Conversions from other error types
// ============================================================================

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        if e.is_io() {
            Error::Backend(e.to_string())
        } else if e.is_syntax() || e.is_data() || e.is_eof() {
            Error::Decode(e.to_string())
        } else {
            Error::Encode(e.to_string())
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Backend(e.to_string())
    }
}

impl From<String> for Error {
    fn from(e: String) -> Self {
        Error::Other(e)
    }
}

impl From<&str> for Error {
    fn from(e: &str) -> Self {
        Error::Other(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidBucket("com.example.nope".to_string());
        assert_eq!(err.to_string(), "Invalid bucket: com.example.nope");
    }

    #[test]
    fn test_error_from_string() {
        let err: Error = "test error".into();
        assert!(matches!(err, Error::Other(_)));
    }

    #[test]
    fn test_syntax_error_is_decode() {
        let err: Error = serde_json::from_str::<serde_json::Value>("{not json")
            .unwrap_err()
            .into();
        assert!(err.is_corrupt());
        assert!(!err.is_transport());
    }
}
