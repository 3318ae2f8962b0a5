/// Image data for the restoration session
///
/// `UploadedImage` is created once a picked file passes validation and is
/// immutable afterwards. `EnhancedImage` is created only from a successful
/// enhancement reply and inherits the original's media type.

use std::path::{Path, PathBuf};

use iced::widget::image;
use thiserror::Error;

use crate::media::encode::{DataUri, DecodeError};
use crate::media::validate::{self, MediaType, ValidationError};

/// Why a picked file could not be turned into an `UploadedImage`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("{0}")]
    Rejected(#[from] ValidationError),
    #[error("Could not read the selected file. Please try another image.")]
    Unreadable(String),
}

/// The user-supplied original photograph
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub file_name: String,
    pub media_type: MediaType,
    pub byte_len: u64,
    /// Display-ready encoded representation, also the wire payload
    pub data: DataUri,
    /// Decoded handle for the iced image widgets
    pub handle: image::Handle,
}

impl UploadedImage {
    /// Validate and load a picked file.
    ///
    /// The policy check runs against the file metadata before any bytes
    /// are read, so an oversized file is rejected without reading 10 MB
    /// into memory first.
    pub async fn load(path: PathBuf) -> Result<Self, LoadError> {
        // Type policy comes before anything touches the filesystem
        let media_type = MediaType::from_path(&path).ok_or(ValidationError::UnsupportedType)?;

        let meta = tokio::fs::metadata(&path)
            .await
            .map_err(|e| LoadError::Unreadable(e.to_string()))?;

        let media_type = validate::validate(Some(media_type), meta.len())?;

        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| LoadError::Unreadable(e.to_string()))?;

        let file_name = file_name_of(&path);

        println!(
            "📷 Loaded {} ({:.1} KB, {})",
            file_name,
            bytes.len() as f64 / 1024.0,
            media_type.mime()
        );

        Ok(Self::from_bytes(file_name, media_type, bytes))
    }

    /// Build an `UploadedImage` from in-memory bytes
    pub fn from_bytes(file_name: String, media_type: MediaType, bytes: Vec<u8>) -> Self {
        let byte_len = bytes.len() as u64;
        let data = DataUri::encode(media_type, &bytes);
        let handle = image::Handle::from_bytes(bytes);

        UploadedImage {
            file_name,
            media_type,
            byte_len,
            data,
            handle,
        }
    }
}

/// The result of a successful enhancement call
#[derive(Debug, Clone)]
pub struct EnhancedImage {
    pub media_type: MediaType,
    pub data: DataUri,
    /// Decoded image bytes, kept for saving to disk
    pub bytes: Vec<u8>,
    pub handle: image::Handle,
}

impl EnhancedImage {
    /// Build an `EnhancedImage` from the base64 payload the provider
    /// returned. Fails if the payload is not valid base64.
    pub fn from_payload(media_type: MediaType, payload: String) -> Result<Self, DecodeError> {
        let data = DataUri {
            media_type,
            payload,
        };
        let bytes = data.bytes()?;
        let handle = image::Handle::from_bytes(bytes.clone());

        Ok(EnhancedImage {
            media_type,
            data,
            bytes,
            handle,
        })
    }
}

/// Default file name offered when saving the enhanced photo:
/// the original name with an `-enhanced` suffix before the extension.
pub fn save_file_name(original: &str) -> String {
    match original.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{stem}-enhanced.{ext}"),
        _ => format!("{original}-enhanced"),
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "photo".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_file_name_keeps_extension() {
        assert_eq!(save_file_name("gran.jpg"), "gran-enhanced.jpg");
        assert_eq!(save_file_name("holiday.webp"), "holiday-enhanced.webp");
    }

    #[test]
    fn test_save_file_name_with_dotted_stem() {
        assert_eq!(save_file_name("trip.2024.png"), "trip.2024-enhanced.png");
    }

    #[test]
    fn test_save_file_name_without_extension() {
        assert_eq!(save_file_name("photo"), "photo-enhanced");
    }

    #[test]
    fn test_uploaded_image_round_trips_bytes() {
        let bytes = vec![1u8, 2, 3, 4, 5];
        let image = UploadedImage::from_bytes("a.png".to_string(), MediaType::Png, bytes.clone());

        assert_eq!(image.byte_len, 5);
        assert_eq!(image.data.bytes().unwrap(), bytes);
    }

    #[test]
    fn test_enhanced_image_inherits_media_type() {
        let payload = DataUri::encode(MediaType::Jpeg, b"restored").payload;
        let image = EnhancedImage::from_payload(MediaType::Jpeg, payload).unwrap();

        assert_eq!(image.media_type, MediaType::Jpeg);
        assert_eq!(image.bytes, b"restored");
    }

    #[test]
    fn test_enhanced_image_rejects_bad_payload() {
        let result = EnhancedImage::from_payload(MediaType::Jpeg, "!!not base64!!".to_string());
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_load_missing_file_is_unreadable() {
        let result = UploadedImage::load(PathBuf::from("/nonexistent/photo.jpg")).await;
        assert!(matches!(result, Err(LoadError::Unreadable(_))));
    }

    #[tokio::test]
    async fn test_load_unknown_extension_is_rejected() {
        let result = UploadedImage::load(PathBuf::from("/nonexistent/photo.gif")).await;
        assert_eq!(
            result.unwrap_err(),
            LoadError::Rejected(ValidationError::UnsupportedType)
        );
    }
}
