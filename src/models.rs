//! Data models and configuration
//!
//! Defines the in-memory image payload passed between the encoder, the
//! editing service and the CLI, plus the environment-driven configuration.

use crate::{Error, Result};
use base64::Engine as _;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_PLACEHOLDER_URL: &str = "https://picsum.photos/seed/ai-image-editor/1024/768";

/// Base64-encoded image bytes together with their MIME type.
///
/// The payload never carries a `data:` URI prefix. Values are replaced
/// wholesale rather than mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageData {
    pub base64: String,
    pub mime_type: String,
}

impl ImageData {
    pub fn new(base64: String, mime_type: String) -> Self {
        Self { base64, mime_type }
    }

    /// Encode raw bytes with the standard base64 alphabet.
    pub fn from_bytes(bytes: &[u8], mime_type: impl Into<String>) -> Self {
        Self {
            base64: base64::engine::general_purpose::STANDARD.encode(bytes),
            mime_type: mime_type.into(),
        }
    }

    /// Render as a `data:` URI suitable for inline display.
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64)
    }

    pub fn decode(&self) -> Result<Vec<u8>> {
        base64::engine::general_purpose::STANDARD
            .decode(&self.base64)
            .map_err(|e| Error::Decode(format!("Invalid base64 image payload: {}", e)))
    }
}

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub placeholder_url: String,
    pub dry_run: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let dry_run = std::env::var("DRY_RUN")
            .map(|v| parse_bool_flag(&v))
            .unwrap_or(false);

        let api_key = dotenvy::var("API_KEY")
            .or_else(|_| dotenvy::var("GEMINI_API_KEY"))
            .ok()
            .filter(|key| !key.trim().is_empty());

        if api_key.is_none() && !dry_run {
            return Err(Error::Config(
                "API_KEY (or GEMINI_API_KEY) not set".to_string(),
            ));
        }

        Ok(Self {
            api_key,
            model: std::env::var("GEMINI_IMAGE_MODEL")
                .unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            base_url: std::env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            placeholder_url: std::env::var("PLACEHOLDER_IMAGE_URL")
                .unwrap_or_else(|_| DEFAULT_PLACEHOLDER_URL.to_string()),
            dry_run,
        })
    }

    /// Returns the API key, failing if the configuration was built for a dry run.
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| Error::Config("API_KEY (or GEMINI_API_KEY) not set".to_string()))
    }
}

fn parse_bool_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_image_data_serialization() {
        let image = ImageData::new("QUJD".to_string(), "image/png".to_string());

        let json = serde_json::to_string(&image).unwrap();
        assert!(json.contains("\"mimeType\":\"image/png\""));

        let deserialized: ImageData = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, image);
    }

    #[test]
    fn test_from_bytes_has_no_data_uri_prefix() {
        let image = ImageData::from_bytes(b"ABC", "image/jpeg");
        assert_eq!(image.base64, "QUJD");
        assert!(!image.base64.starts_with("data:"));
    }

    #[test]
    fn test_data_uri() {
        let image = ImageData::new("QUJD".to_string(), "image/webp".to_string());
        assert_eq!(image.data_uri(), "data:image/webp;base64,QUJD");
    }

    #[test]
    fn test_decode() {
        let image = ImageData::new("QUJD".to_string(), "image/png".to_string());
        assert_eq!(image.decode().unwrap(), b"ABC".to_vec());
    }

    #[test]
    fn test_decode_rejects_invalid_base64() {
        let image = ImageData::new("!!!".to_string(), "image/png".to_string());
        assert!(matches!(image.decode(), Err(Error::Decode(_))));
    }

    #[test]
    fn test_parse_bool_flag() {
        assert!(parse_bool_flag("true"));
        assert!(parse_bool_flag(" 1 "));
        assert!(parse_bool_flag("YES"));
        assert!(!parse_bool_flag("false"));
        assert!(!parse_bool_flag(""));
    }

    #[test]
    fn test_require_api_key() {
        let config = Config {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            placeholder_url: DEFAULT_PLACEHOLDER_URL.to_string(),
            dry_run: true,
        };
        assert!(matches!(config.require_api_key(), Err(Error::Config(_))));

        let config = Config {
            api_key: Some("key".to_string()),
            ..config
        };
        assert_eq!(config.require_api_key().unwrap(), "key");
    }
}
