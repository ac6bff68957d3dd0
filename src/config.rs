//! Store and backend configuration.
//!
//! Every struct has a `Default` and a `from_env()` that overrides individual
//! fields from environment variables, ignoring values that fail to parse.

use crate::error::{Error, Result};

/// Native page size of hosted object stores.
pub const DEFAULT_PAGE_SIZE: usize = 1000;

/// Environment variable overriding [`StoreConfig::page_size`].
pub const PAGE_SIZE_ENV: &str = "CLOUDCRAFT_PAGE_SIZE";

/// Configuration for [`ObjectStore`](crate::store::ObjectStore).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreConfig {
    /// `max_keys` sent with every listing page request.
    pub page_size: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl StoreConfig {
    /// Defaults, with `CLOUDCRAFT_PAGE_SIZE` applied when set.
    pub fn from_env() -> Self {
        let page_size = std::env::var(PAGE_SIZE_ENV)
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(DEFAULT_PAGE_SIZE);

        StoreConfig { page_size }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// # Errors
    /// Returns `Error::Config` for a zero page size.
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(Error::Config("page_size must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Configuration for the S3 backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct S3Config {
    pub region: String,
    /// Custom endpoint for S3-compatible services (MinIO, LocalStack...).
    pub endpoint: Option<String>,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    /// Address buckets as `endpoint/bucket` instead of `bucket.endpoint`.
    pub force_path_style: bool,
}

impl Default for S3Config {
    fn default() -> Self {
        S3Config {
            region: "us-east-1".to_string(),
            endpoint: None,
            access_key_id: None,
            secret_access_key: None,
            force_path_style: false,
        }
    }
}

impl S3Config {
    /// Defaults overridden by `AWS_REGION`, `CLOUDCRAFT_S3_ENDPOINT`,
    /// `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY` and
    /// `CLOUDCRAFT_S3_PATH_STYLE`.
    pub fn from_env() -> Self {
        let defaults = S3Config::default();
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());

        S3Config {
            region: var("AWS_REGION").unwrap_or(defaults.region),
            endpoint: var("CLOUDCRAFT_S3_ENDPOINT"),
            access_key_id: var("AWS_ACCESS_KEY_ID"),
            secret_access_key: var("AWS_SECRET_ACCESS_KEY"),
            force_path_style: var("CLOUDCRAFT_S3_PATH_STYLE")
                .and_then(|v| v.parse::<bool>().ok())
                .unwrap_or(defaults.force_path_style),
        }
    }
}
