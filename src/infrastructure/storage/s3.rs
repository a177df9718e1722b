use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use rand::Rng;
use url::Url;

use crate::settings::AppConfig;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("S3 yükleme hatası: {0}")]
    Upload(String),

    #[error("S3 silme hatası: {0}")]
    Delete(String),

    #[error("Geçersiz nesne URL'i: {0}")]
    InvalidUrl(String),
}

/// Blob storage for project images. Implementations upload bytes under a
/// generated key and delete objects addressed by their public URL.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    async fn upload(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError>;

    async fn delete(&self, object_url: &str) -> Result<(), StorageError>;
}

#[derive(Clone)]
pub struct S3Storage {
    client: Client,
    bucket: String,
    region: String,
}

impl S3Storage {
    pub async fn from_config(config: &AppConfig) -> Self {
        let sdk_config = aws_config::from_env()
            .region(aws_config::Region::new(config.s3_region.clone()))
            .load()
            .await;

        S3Storage {
            client: Client::new(&sdk_config),
            bucket: config.s3_bucket.clone(),
            region: config.s3_region.clone(),
        }
    }

    fn public_url(&self, key: &str) -> String {
        format!(
            "https://{}.s3.{}.amazonaws.com/{}",
            self.bucket, self.region, key
        )
    }
}

/// Generates a blob key under the `projects/` prefix:
/// `projects/<millis>-<random>.<ext>`.
pub fn object_key(file_name: &str) -> String {
    let suffix = rand::thread_rng().gen_range(0..1_000_000_000u32);
    let extension = file_name
        .rsplit('.')
        .next()
        .filter(|ext| !ext.is_empty() && *ext != file_name)
        .unwrap_or("bin");

    format!(
        "projects/{}-{}.{}",
        chrono::Utc::now().timestamp_millis(),
        suffix,
        extension
    )
}

/// Extracts the object key from a public URL (the path without the
/// leading slash).
pub fn key_from_url(object_url: &str) -> Result<String, StorageError> {
    let parsed = Url::parse(object_url)
        .map_err(|_| StorageError::InvalidUrl(object_url.to_string()))?;

    let key = parsed.path().trim_start_matches('/');
    if key.is_empty() {
        return Err(StorageError::InvalidUrl(object_url.to_string()));
    }

    Ok(key.to_string())
}

#[async_trait]
impl ObjectStorage for S3Storage {
    async fn upload(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(bytes))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| StorageError::Upload(e.to_string()))?;

        Ok(self.public_url(key))
    }

    async fn delete(&self, object_url: &str) -> Result<(), StorageError> {
        let key = key_from_url(object_url)?;

        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(&key)
            .send()
            .await
            .map_err(|e| StorageError::Delete(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{key_from_url, object_key};

    #[test]
    fn keys_live_under_the_projects_prefix_and_keep_the_extension() {
        let key = object_key("cephe-gorseli.JPG");
        assert!(key.starts_with("projects/"));
        assert!(key.ends_with(".JPG"));
    }

    #[test]
    fn extensionless_names_fall_back_to_bin() {
        assert!(object_key("gorsel").ends_with(".bin"));
    }

    #[test]
    fn key_extraction_strips_host_and_leading_slash() {
        let url = "https://bucket.s3.eu-central-1.amazonaws.com/projects/17-42.jpg";
        assert_eq!(key_from_url(url).unwrap(), "projects/17-42.jpg");
    }

    #[test]
    fn non_urls_are_rejected() {
        assert!(key_from_url("not a url").is_err());
    }
}
