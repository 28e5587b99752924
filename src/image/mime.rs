use image::ImageFormat;
use std::path::Path;

pub const OCTET_STREAM: &str = "application/octet-stream";

/// Declared MIME type for a local file, derived from its extension.
///
/// Extensions the `image` crate does not recognise map to
/// `application/octet-stream`, which the encoder treats as "not an image".
pub fn mime_from_path(path: &Path) -> &'static str {
    ImageFormat::from_path(path)
        .map(|format| format.to_mime_type())
        .unwrap_or(OCTET_STREAM)
}

/// Sniff the MIME type from magic bytes.
pub fn detect_image_mime(bytes: &[u8]) -> Option<&'static str> {
    match image::guess_format(bytes) {
        Ok(format) => Some(format.to_mime_type()),
        Err(_) => {
            tracing::warn!(
                "Unrecognized image format (first 4 bytes: {:02X?})",
                &bytes[..bytes.len().min(4)]
            );
            None
        }
    }
}

/// Strip parameters from a `Content-Type` header value, e.g.
/// `image/png; charset=binary` becomes `image/png`.
pub fn content_type_essence(header: &str) -> Option<String> {
    let essence = header.split(';').next()?.trim().to_ascii_lowercase();
    if essence.is_empty() {
        None
    } else {
        Some(essence)
    }
}

/// File extension to use when saving an image of the given MIME type.
pub fn extension_for_mime(mime_type: &str) -> &'static str {
    ImageFormat::from_mime_type(mime_type)
        .and_then(|format| format.extensions_str().first().copied())
        .unwrap_or("bin")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_from_path_png() {
        assert_eq!(mime_from_path(Path::new("photo.png")), "image/png");
    }

    #[test]
    fn test_mime_from_path_jpeg() {
        assert_eq!(mime_from_path(Path::new("/tmp/cat.jpg")), "image/jpeg");
    }

    #[test]
    fn test_mime_from_path_non_image() {
        assert_eq!(mime_from_path(Path::new("notes.txt")), OCTET_STREAM);
        assert_eq!(mime_from_path(Path::new("no_extension")), OCTET_STREAM);
    }

    #[test]
    fn test_detect_png() {
        assert_eq!(
            detect_image_mime(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]),
            Some("image/png")
        );
    }

    #[test]
    fn test_detect_jpeg() {
        assert_eq!(
            detect_image_mime(&[0xFF, 0xD8, 0xFF, 0xE0]),
            Some("image/jpeg")
        );
    }

    #[test]
    fn test_detect_unknown() {
        assert_eq!(detect_image_mime(&[0x00, 0x01, 0x02, 0x03]), None);
        assert_eq!(detect_image_mime(&[]), None);
    }

    #[test]
    fn test_content_type_essence() {
        assert_eq!(
            content_type_essence("image/PNG; charset=binary"),
            Some("image/png".to_string())
        );
        assert_eq!(
            content_type_essence("image/jpeg"),
            Some("image/jpeg".to_string())
        );
        assert_eq!(content_type_essence("  "), None);
    }

    #[test]
    fn test_extension_for_mime() {
        assert_eq!(extension_for_mime("image/png"), "png");
        assert_eq!(extension_for_mime("application/x-unknown"), "bin");
    }
}
