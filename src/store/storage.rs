//! Supabase Storage client - catalog image upload and removal

use percent_encoding::percent_decode_str;
use regex::Regex;
use reqwest::Client;
use serde::Serialize;

use crate::config::Config;

/// Object store client addressing a single public bucket
#[derive(Clone)]
pub struct StorageClient {
    client: Client,
    base_url: String,
    service_role_key: String,
    bucket: String,
}

impl StorageClient {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            base_url: config.supabase_url.clone(),
            service_role_key: config.supabase_service_role_key.clone(),
            bucket: config.storage_bucket.clone(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    fn object_url(&self, path: &str) -> String {
        format!("{}/storage/v1/object/{}/{}", self.base_url, self.bucket, path)
    }

    /// Public URL for an object in the bucket (no request needed, the
    /// bucket is public)
    pub fn public_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, self.bucket, path
        )
    }

    /// Upload raw bytes to the given path inside the bucket
    pub async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError> {
        let response = self
            .client
            .post(self.object_url(path))
            .header("apikey", &self.service_role_key)
            .header("Authorization", format!("Bearer {}", self.service_role_key))
            .header("Content-Type", content_type)
            .body(bytes)
            .send()
            .await
            .map_err(StorageError::Request)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::Api { status: status.as_u16(), body });
        }

        Ok(())
    }

    /// Remove objects by path, best-effort from the caller's perspective
    pub async fn remove(&self, paths: &[String]) -> Result<(), StorageError> {
        #[derive(Serialize)]
        struct RemoveRequest<'a> {
            prefixes: &'a [String],
        }

        let url = format!("{}/storage/v1/object/{}", self.base_url, self.bucket);

        let response = self
            .client
            .delete(&url)
            .header("apikey", &self.service_role_key)
            .header("Authorization", format!("Bearer {}", self.service_role_key))
            .json(&RemoveRequest { prefixes: paths })
            .send()
            .await
            .map_err(StorageError::Request)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::Api { status: status.as_u16(), body });
        }

        Ok(())
    }
}

/// Extract the in-bucket object path from a stored public URL.
///
/// Rows written by this server carry the canonical path in their own
/// column; this is the fallback for legacy rows that only stored the
/// derived URL. Ordered fallback:
///   1. canonical "/storage/v1/object/public/<bucket>/<path>" match
///   2. the same match anchored to a full "https://..." URL
///   3. split on "<bucket>/"
///   4. last path segment, filed under the caller's default folder
pub fn extract_object_path(image_url: &str, bucket: &str, default_folder: &str) -> Option<String> {
    let escaped = regex::escape(bucket);

    let standard = Regex::new(&format!(r"/storage/v1/object/public/{}/(.*)", escaped)).ok()?;
    if let Some(captures) = standard.captures(image_url) {
        if let Some(m) = captures.get(1) {
            return decode_path(m.as_str());
        }
    }

    let full_url =
        Regex::new(&format!(r"https?://.*/storage/v1/object/public/{}/(.*)", escaped)).ok()?;
    if let Some(captures) = full_url.captures(image_url) {
        if let Some(m) = captures.get(1) {
            return decode_path(m.as_str());
        }
    }

    if let Some((_, rest)) = image_url.split_once(&format!("{}/", bucket)) {
        if !rest.is_empty() {
            return decode_path(rest);
        }
    }

    // Last resort: treat the final segment as a bare filename
    let file_name = image_url.rsplit('/').next()?;
    if file_name.is_empty() {
        return None;
    }
    Some(format!("{}/{}", default_folder, file_name))
}

fn decode_path(raw: &str) -> Option<String> {
    percent_decode_str(raw)
        .decode_utf8()
        .ok()
        .map(|cow| cow.into_owned())
}

/// Storage errors
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Storage API error (status {status}): {body}")]
    Api { status: u16, body: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_from_canonical_public_url() {
        let url = "https://host/storage/v1/object/public/images/brand-images/x.png";
        assert_eq!(
            extract_object_path(url, "images", "brand-images"),
            Some("brand-images/x.png".to_string())
        );
    }

    #[test]
    fn extracts_from_relative_public_path() {
        let url = "/storage/v1/object/public/images/model-images/a.webp";
        assert_eq!(
            extract_object_path(url, "images", "model-images"),
            Some("model-images/a.webp".to_string())
        );
    }

    #[test]
    fn decodes_percent_encoded_segments() {
        let url = "https://host/storage/v1/object/public/images/brand-images/logo%20v2.png";
        assert_eq!(
            extract_object_path(url, "images", "brand-images"),
            Some("brand-images/logo v2.png".to_string())
        );
    }

    #[test]
    fn falls_back_to_bucket_split() {
        let url = "https://cdn.example.com/images/category-images/tv.jpg";
        assert_eq!(
            extract_object_path(url, "images", "category-images"),
            Some("category-images/tv.jpg".to_string())
        );
    }

    #[test]
    fn falls_back_to_default_folder_for_bare_filename() {
        let url = "https://elsewhere.example.com/x.png";
        assert_eq!(
            extract_object_path(url, "images", "brand-images"),
            Some("brand-images/x.png".to_string())
        );
    }

    #[test]
    fn bare_name_without_slashes() {
        assert_eq!(
            extract_object_path("x.png", "images", "model-images"),
            Some("model-images/x.png".to_string())
        );
    }
}
