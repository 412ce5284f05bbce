//! Cloudinary HTTP client implementation
//!
//! POSTs signed multipart requests to
//! `https://api.cloudinary.com/v1_1/{cloud}/{resource_type}/upload`
//! and `/{resource_type}/destroy`. Requests are signed with SHA-256
//! over the alphabetically-ordered parameters plus the API secret.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use sha2::{Digest, Sha256};

use crate::{ResourceKind, StorageConfig, StorageError, StorageService, StoredObject, UploadRequest};

/// Uploads above this size get the extended timeout (DWG files from CAD
/// tools routinely cross it).
pub const LARGE_UPLOAD_THRESHOLD: usize = 10 * 1024 * 1024;

/// Extended client-side timeout for large raw uploads.
pub const LARGE_UPLOAD_TIMEOUT: Duration = Duration::from_secs(120);

/// Default timeout for everything else.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Real Cloudinary HTTP client.
pub struct CloudinaryClient {
    http: reqwest::Client,
    config: StorageConfig,
    base_url: String,
}

impl CloudinaryClient {
    /// Create a new Cloudinary client from configuration.
    pub fn new(config: StorageConfig) -> Self {
        let base_url = format!("https://api.cloudinary.com/v1_1/{}", config.cloud_name);
        Self {
            http: reqwest::Client::new(),
            config,
            base_url,
        }
    }

    #[cfg(test)]
    fn with_base_url(config: StorageConfig, base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            base_url,
        }
    }

    fn timestamp() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }

    /// Sign a request: SHA-256 over `k=v&k=v...{api_secret}` with the
    /// parameters in alphabetical key order.
    fn sign(params: &[(&str, &str)], api_secret: &str) -> String {
        let mut sorted = params.to_vec();
        sorted.sort();

        let joined = sorted
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");

        let mut hasher = Sha256::new();
        hasher.update(joined.as_bytes());
        hasher.update(api_secret.as_bytes());
        hex::encode(hasher.finalize())
    }
}

#[async_trait::async_trait]
impl StorageService for CloudinaryClient {
    async fn upload(&self, request: UploadRequest) -> Result<StoredObject, StorageError> {
        let url = format!("{}/{}/upload", self.base_url, request.kind.as_str());
        let timestamp = Self::timestamp().to_string();

        let params: Vec<(&str, &str)> = vec![
            ("folder", request.folder.as_str()),
            ("signature_algorithm", "sha256"),
            ("timestamp", timestamp.as_str()),
            ("unique_filename", "true"),
            ("use_filename", "true"),
        ];
        let signature = Self::sign(&params, &self.config.api_secret);

        let size = request.bytes.len();
        let file_part = reqwest::multipart::Part::bytes(request.bytes)
            .file_name(request.file_name.clone());

        let mut form = reqwest::multipart::Form::new()
            .part("file", file_part)
            .text("api_key", self.config.api_key.clone())
            .text("signature", signature);
        for (key, value) in params {
            form = form.text(key.to_string(), value.to_string());
        }

        let timeout = if size > LARGE_UPLOAD_THRESHOLD {
            LARGE_UPLOAD_TIMEOUT
        } else {
            DEFAULT_TIMEOUT
        };

        tracing::info!(
            file_name = %request.file_name,
            folder = %request.folder,
            kind = %request.kind,
            size_bytes = size,
            "Uploading asset to Cloudinary"
        );

        let response = self
            .http
            .post(&url)
            .multipart(form)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| StorageError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read response body".to_string());
            return Err(StorageError::Response(format!(
                "Cloudinary upload returned {}: {}",
                status, body
            )));
        }

        let stored: StoredObject = response
            .json()
            .await
            .map_err(|e| StorageError::Response(e.to_string()))?;

        tracing::info!(public_id = %stored.public_id, "Asset uploaded");
        Ok(stored)
    }

    async fn destroy(&self, public_id: &str, kind: ResourceKind) -> Result<(), StorageError> {
        let url = format!("{}/{}/destroy", self.base_url, kind.as_str());
        let timestamp = Self::timestamp().to_string();

        let params: Vec<(&str, &str)> = vec![
            ("public_id", public_id),
            ("signature_algorithm", "sha256"),
            ("timestamp", timestamp.as_str()),
        ];
        let signature = Self::sign(&params, &self.config.api_secret);

        let mut form = reqwest::multipart::Form::new()
            .text("api_key", self.config.api_key.clone())
            .text("signature", signature);
        for (key, value) in params {
            form = form.text(key.to_string(), value.to_string());
        }

        let response = self
            .http
            .post(&url)
            .multipart(form)
            .timeout(DEFAULT_TIMEOUT)
            .send()
            .await
            .map_err(|e| StorageError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read response body".to_string());
            return Err(StorageError::Response(format!(
                "Cloudinary destroy returned {}: {}",
                status, body
            )));
        }

        tracing::debug!(public_id = %public_id, kind = %kind, "Asset destroyed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_is_order_independent() {
        let a = CloudinaryClient::sign(
            &[("timestamp", "1700000000"), ("folder", "projects/images")],
            "secret",
        );
        let b = CloudinaryClient::sign(
            &[("folder", "projects/images"), ("timestamp", "1700000000")],
            "secret",
        );
        assert_eq!(a, b);
    }

    #[test]
    fn test_signature_depends_on_secret() {
        let params = [("public_id", "projects/images/x"), ("timestamp", "1")];
        let a = CloudinaryClient::sign(&params, "secret-a");
        let b = CloudinaryClient::sign(&params, "secret-b");
        assert_ne!(a, b);
    }

    #[test]
    fn test_signature_known_value() {
        // sha256("folder=f&timestamp=1" + "s")
        let sig = CloudinaryClient::sign(&[("folder", "f"), ("timestamp", "1")], "s");
        assert_eq!(sig.len(), 64);
        assert!(sig.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[tokio::test]
    async fn test_upload_fails_cleanly_when_unreachable() {
        // Point at a port nothing listens on; the error must be Request,
        // not a panic or hang.
        let client = CloudinaryClient::with_base_url(
            StorageConfig {
                cloud_name: "test".to_string(),
                api_key: "key".to_string(),
                api_secret: "secret".to_string(),
            },
            "http://127.0.0.1:9".to_string(),
        );

        let result = client
            .upload(UploadRequest {
                bytes: vec![1, 2, 3],
                file_name: "bridge.png".to_string(),
                folder: "projects/images".to_string(),
                kind: ResourceKind::Image,
            })
            .await;

        assert!(matches!(result, Err(StorageError::Request(_))));
    }
}
