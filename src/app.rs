//! Edit session orchestration: load an original image, submit an edit,
//! keep the result and write it to disk.

use crate::ai::{GeminiHttpClient, GeminiImageEditor, ImageEditService, MockImageEditor};
use crate::image::{mime, ImageEncoder, ImageFile};
use crate::models::{Config, ImageData};
use crate::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::info;
use uuid::Uuid;

/// Holds the original and edited images for one editing session.
///
/// Submitting takes `&mut self`, so a session never has two edits in flight.
pub struct EditSession {
    editor: Box<dyn ImageEditService>,
    encoder: ImageEncoder,
    original: Option<ImageData>,
    edited: Option<ImageData>,
}

impl EditSession {
    /// Build a session from concrete service dependencies.
    pub fn with_services(editor: Box<dyn ImageEditService>, encoder: ImageEncoder) -> Self {
        Self {
            editor,
            encoder,
            original: None,
            edited: None,
        }
    }

    /// Construct a session from environment configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        // One connection pool for both image fetches and API calls.
        let http_client = reqwest::Client::new();

        let editor: Box<dyn ImageEditService> = if config.dry_run {
            info!("DRY_RUN enabled, edits will echo the original image");
            Box::new(MockImageEditor::new())
        } else {
            info!("Image editor: Gemini (model: {})", config.model);
            let http = GeminiHttpClient::new_with_client(
                config.require_api_key()?.to_string(),
                config.model.clone(),
                http_client.clone(),
            )
            .with_base_url(config.base_url.clone());
            Box::new(GeminiImageEditor::from_http(http))
        };

        Ok(Self::with_services(
            editor,
            ImageEncoder::new_with_client(http_client),
        ))
    }

    pub fn original(&self) -> Option<&ImageData> {
        self.original.as_ref()
    }

    pub fn edited(&self) -> Option<&ImageData> {
        self.edited.as_ref()
    }

    /// Replace the original image, discarding any previous edit.
    pub fn set_original(&mut self, image: ImageData) -> &ImageData {
        self.edited = None;
        self.original.insert(image)
    }

    pub async fn load_url(&mut self, url: &str) -> Result<&ImageData> {
        let image = self.encoder.encode_url(url).await?;
        info!("Loaded {} image from {}", image.mime_type, url);
        Ok(self.set_original(image))
    }

    /// On failure the current original is left in place.
    pub async fn load_file(&mut self, file: &ImageFile) -> Result<&ImageData> {
        let image = self.encoder.encode_file(file).await?;
        info!(
            "Loaded {} image from {}",
            image.mime_type,
            file.path().display()
        );
        Ok(self.set_original(image))
    }

    /// Edit the original image. The result is displayed with the original's
    /// MIME type.
    pub async fn submit(&mut self, prompt: &str) -> Result<&ImageData> {
        let original = match &self.original {
            Some(original) if !prompt.is_empty() => original,
            _ => {
                return Err(Error::InvalidInput(
                    "Please provide a prompt and ensure an image is loaded.".to_string(),
                ))
            }
        };

        self.edited = None;
        info!("Submitting edit: {}", prompt);

        let base64 = self.editor.edit_image(original, prompt).await?;
        let edited = ImageData::new(base64, original.mime_type.clone());
        Ok(self.edited.insert(edited))
    }

    /// Default file name for the edited image, unique per call.
    pub fn default_output_path(&self) -> PathBuf {
        let ext = self
            .original
            .as_ref()
            .map(|image| mime::extension_for_mime(&image.mime_type))
            .unwrap_or("png");
        PathBuf::from(format!("edited_{}.{}", Uuid::new_v4(), ext))
    }

    pub async fn save_edited(&self, path: &Path) -> Result<()> {
        let edited = self
            .edited
            .as_ref()
            .ok_or_else(|| Error::InvalidInput("No edited image to save.".to_string()))?;

        let bytes = edited.decode()?;
        tokio::fs::write(path, &bytes).await?;
        info!("Wrote edited image ({} bytes) to {}", bytes.len(), path.display());
        Ok(())
    }
}
