use super::mime;
use crate::models::ImageData;
use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// A local file together with the MIME type it claims to have.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    path: PathBuf,
    mime_type: String,
}

impl ImageFile {
    /// Declares the type from the file extension without touching the file.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let mime_type = mime::mime_from_path(&path).to_string();
        Self { path, mime_type }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = mime_type.into();
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}

/// Turns local files and remote URLs into [`ImageData`].
#[derive(Clone)]
pub struct ImageEncoder {
    client: reqwest::Client,
}

impl ImageEncoder {
    pub fn new() -> Self {
        Self::new_with_client(reqwest::Client::new())
    }

    pub fn new_with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    pub async fn encode_file(&self, file: &ImageFile) -> Result<ImageData> {
        if !file.is_image() {
            tracing::warn!(
                "Rejecting {} with declared type {}",
                file.path().display(),
                file.mime_type()
            );
            return Err(Error::NotAnImage);
        }

        let bytes = tokio::fs::read(file.path()).await?;
        if bytes.is_empty() {
            return Err(Error::EmptyImage("Failed to read image data.".to_string()));
        }

        tracing::debug!(
            "Encoded {} ({} bytes, {})",
            file.path().display(),
            bytes.len(),
            file.mime_type()
        );

        Ok(ImageData::from_bytes(&bytes, file.mime_type()))
    }

    pub async fn encode_url(&self, url: &str) -> Result<ImageData> {
        tracing::debug!("Fetching image from {}", url);

        let response = self.client.get(url).send().await.map_err(|e| {
            tracing::error!("Failed to fetch image from {}: {}", url, e);
            e
        })?;

        let status = response.status();
        if !status.is_success() {
            let status_text = status.canonical_reason().unwrap_or(status.as_str());
            tracing::error!("Image fetch failed (status {}): {}", status, url);
            return Err(Error::Fetch(status_text.to_string()));
        }

        let declared = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(mime::content_type_essence);

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Err(Error::EmptyImage(
                "Failed to read fetched image.".to_string(),
            ));
        }

        let mime_type = declared.unwrap_or_else(|| {
            mime::detect_image_mime(&bytes)
                .unwrap_or(mime::OCTET_STREAM)
                .to_string()
        });

        tracing::debug!("Fetched {} bytes ({}) from {}", bytes.len(), mime_type, url);

        Ok(ImageData::from_bytes(&bytes, mime_type))
    }
}

impl Default for ImageEncoder {
    fn default() -> Self {
        Self::new()
    }
}
