//! S3 object store backend.

use super::{ListPage, ListRequest, RemoteStore};
use crate::codec::CONTENT_TYPE;
use crate::config::S3Config;
use crate::error::{Error, Result};
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;

/// S3 (or S3-compatible) backend using ListObjectsV2 pagination.
///
/// The SDK client is internally reference counted, so clones are cheap and
/// share one connection pool.
///
/// # Example
///
/// ```no_run
/// # use cloudcraft_store::backend::{RemoteStore, S3Backend};
/// # use cloudcraft_store::config::S3Config;
/// # async fn example() -> cloudcraft_store::Result<()> {
/// let backend = S3Backend::new(S3Config::from_env()).await?;
/// let value = backend
///     .get_object("com.cloudcraftnetwork.servers", "lobby/1")
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct S3Backend {
    client: Client,
}

impl S3Backend {
    /// Create a backend from configuration.
    ///
    /// Static credentials are used when both halves are configured; otherwise
    /// the default AWS provider chain applies.
    ///
    /// # Errors
    /// Returns `Err` if the configuration is incomplete.
    pub async fn new(config: S3Config) -> Result<Self> {
        if config.region.is_empty() {
            return Err(Error::Config("S3 region must not be empty".to_string()));
        }

        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(config.region.clone()));

        if let (Some(access_key_id), Some(secret_access_key)) =
            (&config.access_key_id, &config.secret_access_key)
        {
            loader = loader.credentials_provider(Credentials::new(
                access_key_id,
                secret_access_key,
                None,
                None,
                "cloudcraft-store",
            ));
        }

        let shared = loader.load().await;
        let mut builder =
            aws_sdk_s3::config::Builder::from(&shared).force_path_style(config.force_path_style);
        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint_url(endpoint);
        }

        info!(
            "✓ S3 backend initialized: region {} endpoint {}",
            config.region,
            config.endpoint.as_deref().unwrap_or("(default)")
        );

        Ok(S3Backend {
            client: Client::from_conf(builder.build()),
        })
    }

    /// Wrap an already configured SDK client.
    pub fn from_client(client: Client) -> Self {
        S3Backend { client }
    }
}

/// Common prefixes come back with the delimiter still attached.
fn strip_delimiter(prefix: &str, delimiter: Option<&str>) -> String {
    delimiter
        .and_then(|d| prefix.strip_suffix(d))
        .unwrap_or(prefix)
        .to_string()
}

impl RemoteStore for S3Backend {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Option<Vec<u8>>> {
        let output = match self.client.get_object().bucket(bucket).key(key).send().await {
            Ok(output) => output,
            Err(e) => {
                if e.as_service_error().is_some_and(|se| se.is_no_such_key()) {
                    debug!("✓ S3 GET {}:{} -> ABSENT", bucket, key);
                    return Ok(None);
                }
                return Err(Error::Backend(format!("S3 GET {}:{} failed: {}", bucket, key, e)));
            }
        };

        let bytes = output
            .body
            .collect()
            .await
            .map_err(|e| Error::Backend(format!("S3 GET {}:{} body: {}", bucket, key, e)))?
            .into_bytes();

        debug!("✓ S3 GET {}:{} -> {} bytes", bucket, key, bytes.len());
        Ok(Some(bytes.to_vec()))
    }

    async fn put_object(&self, bucket: &str, key: &str, value: Vec<u8>) -> Result<()> {
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type(CONTENT_TYPE)
            .body(ByteStream::from(value))
            .send()
            .await
            .map_err(|e| Error::Backend(format!("S3 PUT {}:{} failed: {}", bucket, key, e)))?;

        debug!("✓ S3 PUT {}:{}", bucket, key);
        Ok(())
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<()> {
        self.client
            .delete_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| Error::Backend(format!("S3 DELETE {}:{} failed: {}", bucket, key, e)))?;

        debug!("✓ S3 DELETE {}:{}", bucket, key);
        Ok(())
    }

    async fn list_page(&self, request: &ListRequest) -> Result<ListPage> {
        let output = self
            .client
            .list_objects_v2()
            .bucket(&request.bucket)
            .set_prefix(request.prefix.clone())
            .set_delimiter(request.delimiter.clone())
            .set_continuation_token(request.continuation_token.clone())
            .set_max_keys(request.max_keys.map(|n| n.min(i32::MAX as usize) as i32))
            .send()
            .await
            .map_err(|e| Error::Backend(format!("S3 LIST {} failed: {}", request.bucket, e)))?;

        let delimiter = request.delimiter.as_deref();
        let mut entries: Vec<String> = output
            .contents()
            .iter()
            .filter_map(|object| object.key().map(str::to_string))
            .chain(
                output
                    .common_prefixes()
                    .iter()
                    .filter_map(|p| p.prefix())
                    .map(|p| strip_delimiter(p, delimiter)),
            )
            .collect();
        entries.sort();

        let next_continuation_token = if output.is_truncated().unwrap_or(false) {
            output.next_continuation_token().map(str::to_string)
        } else {
            None
        };

        debug!(
            "✓ S3 LIST {} -> {} entries{}",
            request.bucket,
            entries.len(),
            if next_continuation_token.is_some() {
                " (truncated)"
            } else {
                ""
            }
        );

        Ok(ListPage {
            entries,
            next_continuation_token,
        })
    }

    async fn health_check(&self) -> Result<bool> {
        self.client
            .list_buckets()
            .send()
            .await
            .map(|_| true)
            .map_err(|e| Error::Backend(format!("S3 health check failed: {}", e)))
    }
}
