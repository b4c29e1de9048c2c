//! AWS S3 artifact publisher.
//!
//! Uploads the exported CSV in a single `PutObject` under
//! `{prefix}/{YYYYMMDD_HHMMSS}_{file_name}`. No multipart, no overwrite check.

use std::path::Path;

use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use chrono::Local;

use crate::error::{AppError, Result};
use crate::models::PublishConfig;
use crate::storage::{ArtifactPublisher, object_key};

/// S3-backed artifact publisher.
#[derive(Clone)]
pub struct S3Publisher {
    client: Client,
    bucket: String,
    key_prefix: String,
}

impl S3Publisher {
    /// Create a new S3 publisher.
    pub fn new(client: Client, bucket: impl Into<String>, key_prefix: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            key_prefix: key_prefix.into(),
        }
    }

    /// Create a publisher using the default AWS credential chain.
    pub async fn from_config(config: &PublishConfig) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(region) = &config.region {
            loader = loader.region(aws_config::Region::new(region.clone()));
        }
        let sdk_config = loader.load().await;

        Self::new(
            Client::new(&sdk_config),
            &config.bucket,
            &config.key_prefix,
        )
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

#[async_trait]
impl ArtifactPublisher for S3Publisher {
    async fn publish(&self, path: &Path) -> Result<String> {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                AppError::publish(format!("{} has no usable file name", path.display()))
            })?;

        let key = object_key(&self.key_prefix, Local::now(), file_name);

        let bytes = tokio::fs::read(path).await.map_err(|e| {
            AppError::publish(format!("failed to read {}: {}", path.display(), e))
        })?;
        let size = bytes.len();

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(bytes))
            .content_type("text/csv")
            .send()
            .await
            .map_err(|e| AppError::publish(DisplayErrorContext(&e)))?;

        let location = format!("s3://{}/{}", self.bucket, key);
        log::info!("Uploaded {} bytes to {}", size, location);
        Ok(location)
    }
}
